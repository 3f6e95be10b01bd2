mod cli;
mod commands;

#[cfg(test)]
mod main_tests;

use std::io::{self, Write};
use std::process::ExitCode;

use clap::ArgMatches;

use cli::{AnalyzeParams, EstimatesParams, LogParams, USAGE, build_cli};

fn main() -> ExitCode {
    let matches = build_cli().get_matches();
    let log_matches = matches.subcommand().map_or(&matches, |(_, m)| m);
    LogParams::from_matches(log_matches).init();

    ExitCode::from(execute(&matches, &mut io::stderr().lock()))
}

/// Run the selected command and return the process exit status. Usage and
/// errors are reported on `stderr`.
fn execute(matches: &ArgMatches, stderr: &mut impl Write) -> u8 {
    let result = match matches.subcommand() {
        Some(("estimates", m)) => {
            let params = EstimatesParams::from_matches(m);
            commands::estimates::run(params.into())
        }
        Some(_) => unreachable!("clap should have caught this"),
        None => match AnalyzeParams::from_matches(matches) {
            Some(params) => commands::analyze::run(params.into()),
            None => {
                let _ = writeln!(stderr, "{USAGE}");
                return 1;
            }
        },
    };

    match result {
        Ok(()) => 0,
        Err(err) => {
            let _ = writeln!(stderr, "error: {err}");
            1
        }
    }
}
