use std::io::{self, Write};
use std::path::PathBuf;

use heapsqueeze_lib::estimate_file;

use super::CommandError;

pub struct EstimatesArgs {
    pub heapdump: PathBuf,
    pub class: String,
}

pub fn run(args: EstimatesArgs) -> Result<(), CommandError> {
    render(&args, &mut io::stdout().lock())
}

pub fn render(args: &EstimatesArgs, out: &mut impl Write) -> Result<(), CommandError> {
    for estimate in estimate_file(&args.heapdump, &args.class)? {
        writeln!(out, "{estimate}")?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}
