//! Footprint projection under a simulated data model.

use heapsqueeze_core::{BasicType, ClassData, FieldData, Multiset};
use heapsqueeze_layout::{CATALOGUE, HotSpotLayouter, Layouter};
use serde::Serialize;

use crate::error::{AnalysisError, Result};
use crate::scan::{Scan, StringStats};

/// Field added to the text class to flag compact storage.
pub const FLAG_FIELD: &str = "isCompressed";
/// Reference field added to the text class as an alternative to the flag.
pub const CODER_FIELD: &str = "coder";

/// Footprint of one dump under one data model, in bytes.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Projection {
    pub model: String,
    /// Text instances plus every other object, at their current size.
    pub total: u64,
    pub strings: u64,
    pub strings_bool: u64,
    pub strings_ref: u64,
    /// Compactable arrays at two bytes per unit.
    pub compactable: u64,
    pub non_compactable: u64,
    /// Bytes saved by storing compactable arrays at one byte per unit.
    pub savings: i64,
    pub savings_flag_pct: f64,
    pub savings_field_pct: f64,
}

/// Project the scanned dump through `layouter`.
///
/// The text class is matched by name. It is sized as found in the dump, then
/// again with a boolean flag and with an extra reference appended to its own
/// fields. Histogram keys are used as element counts for both array shapes.
pub fn project(
    stats: &StringStats,
    population: &Multiset<ClassData>,
    class_name: &str,
    layouter: &impl Layouter,
) -> Result<Projection> {
    let mut others = 0u64;
    let mut strings = 0u64;
    let mut strings_bool = 0u64;
    let mut strings_ref = 0u64;

    for (class, count) in population.iter() {
        if class.name() != class_name {
            others += layouter.instance_size(class) * count;
            continue;
        }
        strings += layouter.instance_size(class) * count;
        let with_flag = augment(class, FLAG_FIELD, BasicType::Boolean);
        let with_coder = augment(class, CODER_FIELD, BasicType::Object);
        strings_bool += layouter.instance_size(&with_flag) * count;
        strings_ref += layouter.instance_size(&with_coder) * count;
    }

    let mut savings = 0i64;
    let mut compactable = 0u64;
    for (&len, count) in stats.compactable.iter() {
        let two = layouter.instance_size(&ClassData::array(BasicType::Char, len));
        let one = layouter.instance_size(&ClassData::array(BasicType::Byte, len));
        savings += (two as i64 - one as i64) * count as i64;
        compactable += two * count;
    }

    let non_compactable: u64 = stats
        .non_compactable
        .iter()
        .map(|(&len, count)| {
            layouter.instance_size(&ClassData::array(BasicType::Char, len)) * count
        })
        .sum();

    let total = others + strings;
    if total == 0 {
        return Err(AnalysisError::EmptyFootprint {
            model: layouter.to_string(),
        });
    }

    let percent = |augmented: u64| {
        let overhead = augmented as i64 - strings as i64;
        100.0 * (savings - overhead) as f64 / total as f64
    };

    Ok(Projection {
        model: layouter.to_string(),
        total,
        strings,
        strings_bool,
        strings_ref,
        compactable,
        non_compactable,
        savings,
        savings_flag_pct: percent(strings_bool),
        savings_field_pct: percent(strings_ref),
    })
}

/// Project through a HotSpot layouter for every catalogue model, in
/// catalogue order.
pub fn project_all(scan: &Scan, class_name: &str) -> Result<Vec<Projection>> {
    CATALOGUE
        .iter()
        .map(|model| {
            project(
                &scan.stats,
                &scan.population,
                class_name,
                &HotSpotLayouter::new(*model),
            )
        })
        .collect()
}

/// Copy of `class` with one more field in its own block.
fn augment(class: &ClassData, field: &str, ty: BasicType) -> ClassData {
    let mut augmented = class.clone();
    augmented.add_field(FieldData::new(class.name(), field, ty));
    augmented
}
