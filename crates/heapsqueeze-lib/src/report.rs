//! Comma-separated report table.

use std::fmt;

use serde::Serialize;

use crate::project::Projection;

/// Numeric column names, in row order.
pub const COLUMNS: [&str; 8] = [
    "total",
    "String",
    "String+bool",
    "String+oop",
    "1-byte char[]",
    "2-byte char[]",
    "savings(bool)",
    "savings(oop)",
];

/// One header plus one row per projection, in projection order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Report {
    pub path: String,
    pub rows: Vec<Projection>,
}

impl Report {
    pub fn new(path: impl Into<String>, rows: Vec<Projection>) -> Self {
        Self {
            path: path.into(),
            rows,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for name in COLUMNS {
            write!(f, "\"{name:>12}\", ")?;
        }
        writeln!(f, "\"hprof file\", \"model\"")?;

        for row in &self.rows {
            for value in [
                row.total,
                row.strings,
                row.strings_bool,
                row.strings_ref,
                row.compactable,
                row.non_compactable,
            ] {
                write!(f, "{value:>14}, ")?;
            }
            writeln!(
                f,
                "{:>14.3}, {:>14.3}, \"{}\", \"{}\"",
                row.savings_flag_pct, row.savings_field_pct, self.path, row.model
            )?;
        }
        Ok(())
    }
}
