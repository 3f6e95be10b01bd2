//! String compaction savings estimator.
//!
//! Reads an HPROF heap dump twice: once to find which primitive arrays back
//! the text class's instances, once to classify those arrays as compactable
//! (every UTF-16 unit fits in one byte) or not. The resulting histograms are
//! projected through every simulated data model to estimate how much memory a
//! one-byte-per-character representation would save, after paying for either
//! a boolean flag or an extra reference field in every text instance.
//!
//! # Example
//!
//! ```no_run
//! let report = heapsqueeze_lib::analyze("app.hprof", heapsqueeze_lib::DEFAULT_TEXT_CLASS)?;
//! print!("{report}");
//! # Ok::<(), heapsqueeze_lib::AnalysisError>(())
//! ```

pub mod compress;
pub mod error;
pub mod estimate;
pub mod project;
pub mod report;
pub mod scan;

#[cfg(test)]
mod compress_tests;
#[cfg(test)]
mod test_utils;

use std::path::Path;

pub use compress::is_compactable;
pub use error::{AnalysisError, Result};
pub use estimate::{Estimate, estimate, estimate_file};
pub use project::{Projection, project, project_all};
pub use report::Report;
pub use scan::{ArrayClassifier, ReferenceDiscovery, Scan, StringStats, TextClass, scan};

pub const DEFAULT_TEXT_CLASS: &str = "java/lang/String";

/// Convert a dotted class name (`java.lang.String`) to the slash form used
/// in heap dumps.
pub fn internal_name(class_name: &str) -> String {
    class_name.replace('.', "/")
}

/// Scan the dump at `path` and project it through every catalogue model.
pub fn analyze(path: impl AsRef<Path>, class_name: &str) -> Result<Report> {
    let path = path.as_ref();
    let scan = scan(path, class_name)?;
    let rows = project_all(&scan, class_name)?;
    Ok(Report::new(path.display().to_string(), rows))
}
