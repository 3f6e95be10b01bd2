mod args;
mod commands;
mod dispatch;


pub use commands::build_cli;
pub use dispatch::{AnalyzeParams, EstimatesParams, LogParams};

/// One-line usage printed when no heap dump is given.
pub const USAGE: &str = "Usage: heapsqueeze [OPTIONS] <HEAPDUMP>";
