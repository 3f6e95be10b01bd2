//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};
use heapsqueeze_lib::DEFAULT_TEXT_CLASS;

/// Heap dump file (positional).
pub fn heapdump_arg() -> Arg {
    Arg::new("heapdump")
        .value_name("HEAPDUMP")
        .value_parser(value_parser!(PathBuf))
        .help("HPROF heap dump to analyze")
}

/// Class to lay out (positional).
pub fn class_arg() -> Arg {
    Arg::new("class")
        .value_name("CLASS")
        .required(true)
        .help("Class name, e.g. java/lang/String or java.lang.String")
}

/// Text class override (--text-class).
pub fn text_class_arg() -> Arg {
    Arg::new("text_class")
        .long("text-class")
        .value_name("NAME")
        .default_value(DEFAULT_TEXT_CLASS)
        .help("Class whose instances hold the character arrays")
}

/// Machine-readable output (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print the report as JSON")
}

/// Verbosity level (-v, -vv, ...).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .global(true)
        .help("Verbosity level (-v for info, -vv for debug)")
}

/// Silence all logging (-q/--quiet).
pub fn quiet_arg() -> Arg {
    Arg::new("quiet")
        .short('q')
        .long("quiet")
        .action(ArgAction::SetTrue)
        .global(true)
        .help("Silence warnings and progress output")
}
