//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use clap::ArgMatches;
use heapsqueeze_lib::{DEFAULT_TEXT_CLASS, internal_name};
use log::LevelFilter;

use crate::commands::analyze::AnalyzeArgs;
use crate::commands::estimates::EstimatesArgs;

pub struct AnalyzeParams {
    pub heapdump: PathBuf,
    pub text_class: String,
    pub json: bool,
}

impl AnalyzeParams {
    /// `None` when no heap dump was given.
    pub fn from_matches(m: &ArgMatches) -> Option<Self> {
        let heapdump = m.get_one::<PathBuf>("heapdump").cloned()?;
        Some(Self {
            heapdump,
            text_class: m
                .get_one::<String>("text_class")
                .cloned()
                .unwrap_or_else(|| DEFAULT_TEXT_CLASS.to_owned()),
            json: m.get_flag("json"),
        })
    }
}

impl From<AnalyzeParams> for AnalyzeArgs {
    fn from(p: AnalyzeParams) -> Self {
        Self {
            heapdump: p.heapdump,
            text_class: internal_name(&p.text_class),
            json: p.json,
        }
    }
}

pub struct EstimatesParams {
    pub heapdump: PathBuf,
    pub class: String,
}

impl EstimatesParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            heapdump: m.get_one::<PathBuf>("heapdump").cloned().unwrap_or_default(),
            class: m.get_one::<String>("class").cloned().unwrap_or_default(),
        }
    }
}

impl From<EstimatesParams> for EstimatesArgs {
    fn from(p: EstimatesParams) -> Self {
        Self {
            heapdump: p.heapdump,
            class: internal_name(&p.class),
        }
    }
}

pub struct LogParams {
    pub verbose: u8,
    pub quiet: bool,
}

impl LogParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            verbose: m.get_count("verbose"),
            quiet: m.get_flag("quiet"),
        }
    }

    /// Warnings by default, each `-v` one level more.
    pub fn level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Off;
        }
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    pub fn init(&self) {
        // stderrlog counts from error (0) to trace (4).
        let verbosity = (self.level() as usize).saturating_sub(1);
        if let Err(err) = stderrlog::new()
            .quiet(self.quiet)
            .verbosity(verbosity)
            .init()
        {
            eprintln!("warning: failed to initialize logging: {err}");
        }
    }
}
