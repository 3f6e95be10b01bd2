//! Per-model layout of a single class found in a dump.

use std::fmt;
use std::path::Path;

use heapsqueeze_core::{ClassData, Multiset};
use heapsqueeze_hprof::{HeapVisitor, HprofError, traverse};
use heapsqueeze_layout::{CATALOGUE, ClassLayout, DataModel, HotSpotLayouter, Layouter};

use crate::error::{AnalysisError, Result};

/// Simulated layout of a class under one model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Estimate {
    pub model: DataModel,
    pub layout: ClassLayout,
}

impl fmt::Display for Estimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "***** {}", self.model)?;
        if let Some(max_heap) = self.model.max_heap_size() {
            writeln!(
                f,
                "Compressed references: shift {}, heap limit {} GiB",
                self.model.compressed_shift(),
                max_heap >> 30
            )?;
        }
        write!(f, "{}", self.layout)
    }
}

/// Lay out the first population entry named `class_name` under every
/// catalogue model.
pub fn estimate(population: &Multiset<ClassData>, class_name: &str) -> Result<Vec<Estimate>> {
    let class = population
        .keys()
        .find(|class| class.name() == class_name)
        .ok_or_else(|| AnalysisError::ClassNotFound(class_name.to_owned()))?;

    Ok(CATALOGUE
        .iter()
        .map(|model| {
            let layouter = HotSpotLayouter::new(*model);
            Estimate {
                model: *layouter.model(),
                layout: layouter.layout(class),
            }
        })
        .collect())
}

/// Read the population of the dump at `path` and estimate `class_name`.
pub fn estimate_file(path: impl AsRef<Path>, class_name: &str) -> Result<Vec<Estimate>> {
    let population = traverse(path, &mut Census)?;
    estimate(&population, class_name)
}

/// Visitor that only wants the population.
struct Census;

impl HeapVisitor for Census {
    type Error = HprofError;
}
