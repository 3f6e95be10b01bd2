use std::io::{self, Write};
use std::path::PathBuf;

use heapsqueeze_lib::analyze;

use super::CommandError;

pub struct AnalyzeArgs {
    pub heapdump: PathBuf,
    /// Slash-separated class name.
    pub text_class: String,
    pub json: bool,
}

pub fn run(args: AnalyzeArgs) -> Result<(), CommandError> {
    render(&args, &mut io::stdout().lock())
}

/// Analyze the dump, then write the whole report at once.
pub fn render(args: &AnalyzeArgs, out: &mut impl Write) -> Result<(), CommandError> {
    let report = analyze(&args.heapdump, &args.text_class)?;
    if args.json {
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
    } else {
        write!(out, "{report}")?;
    }
    out.flush()?;
    Ok(())
}
