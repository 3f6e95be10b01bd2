//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI. Without a subcommand the string compaction
/// report is produced.
pub fn build_cli() -> Command {
    Command::new("heapsqueeze")
        .about("Estimate string compaction savings from a JVM heap dump")
        .version(env!("CARGO_PKG_VERSION"))
        .override_usage(
            "\
  heapsqueeze [OPTIONS] <HEAPDUMP>
  heapsqueeze estimates <HEAPDUMP> <CLASS>",
        )
        .after_help(
            r#"EXAMPLES:
  heapsqueeze app.hprof                         # savings report, one row per model
  heapsqueeze app.hprof --json                  # same report as JSON
  heapsqueeze estimates app.hprof java.util.HashMap"#,
        )
        .args_conflicts_with_subcommands(true)
        .arg(heapdump_arg())
        .arg(text_class_arg())
        .arg(json_arg())
        .arg(verbose_arg())
        .arg(quiet_arg())
        .subcommand(estimates_command())
}

/// Simulate the layout of one class under every data model.
pub fn estimates_command() -> Command {
    Command::new("estimates")
        .about("Show the simulated layout of a class under every data model")
        .arg(heapdump_arg().required(true))
        .arg(class_arg())
}
