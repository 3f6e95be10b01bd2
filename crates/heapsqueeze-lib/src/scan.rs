//! Two-pass heap scan.
//!
//! Pass 1 ([`ReferenceDiscovery`]) finds the text class and collects the ids
//! of the arrays its instances point at. Pass 2 ([`ArrayClassifier`]) walks
//! the dump again and sorts those arrays into the compactable and
//! non-compactable histograms. The set of backing arrays is only complete
//! once every text instance has been seen, hence the second walk.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use heapsqueeze_core::{BasicType, ClassData, Multiset};
use heapsqueeze_hprof::reader::read_reference;
use heapsqueeze_hprof::{ClassRecord, HeapDumpReader, HeapVisitor, traverse_reader};
use log::{debug, info, warn};

use crate::compress::is_compactable;
use crate::error::{AnalysisError, Result};

/// Where a text instance keeps its backing array reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextClass {
    pub class_id: u64,
    /// Offset of the reference inside the instance's field bytes.
    pub offset: usize,
    /// Reference width in bytes, 4 or 8.
    pub width: usize,
}

/// Frozen pass 2 histograms, keyed by raw array byte length.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StringStats {
    pub compactable: Multiset<u64>,
    pub non_compactable: Multiset<u64>,
    /// Number of distinct arrays referenced by text instances.
    pub referenced: usize,
}

/// Output of a complete scan.
#[derive(Clone, Debug)]
pub struct Scan {
    pub stats: StringStats,
    /// Every object of the dump, keyed by structural descriptor.
    pub population: Multiset<ClassData>,
}

/// Pass 1 visitor.
pub struct ReferenceDiscovery<'a> {
    class_name: &'a str,
    text_class: Option<TextClass>,
    referenced: HashSet<u64>,
    instances: u64,
}

impl<'a> ReferenceDiscovery<'a> {
    pub fn new(class_name: &'a str) -> Self {
        Self {
            class_name,
            text_class: None,
            referenced: HashSet::new(),
            instances: 0,
        }
    }

    pub fn text_class(&self) -> Option<TextClass> {
        self.text_class
    }

    pub fn referenced(&self) -> &HashSet<u64> {
        &self.referenced
    }

    pub fn into_referenced(self) -> HashSet<u64> {
        self.referenced
    }
}

impl HeapVisitor for ReferenceDiscovery<'_> {
    type Error = AnalysisError;

    fn visit_class(&mut self, class: &ClassRecord) -> Result<()> {
        if self.text_class.is_some() || class.name != self.class_name {
            return Ok(());
        }

        let offset = class
            .ref_offsets()
            .first()
            .copied()
            .ok_or_else(|| AnalysisError::NoReferenceField(class.name.clone()))?;
        if !matches!(class.ref_size, 4 | 8) {
            return Err(AnalysisError::UnsupportedReferenceWidth(class.ref_size));
        }

        let text_class = TextClass {
            class_id: class.id,
            offset,
            width: class.ref_size,
        };
        debug!("discovered {}: {:?}", class.name, text_class);
        self.text_class = Some(text_class);
        Ok(())
    }

    fn visit_instance(&mut self, id: u64, class_id: u64, bytes: &[u8]) -> Result<()> {
        let Some(text_class) = self.text_class else {
            return Err(AnalysisError::OrderingViolation {
                class: self.class_name.to_owned(),
                instance: id,
            });
        };
        if class_id != text_class.class_id {
            return Ok(());
        }

        let array_id = read_reference(bytes, text_class.offset, text_class.width)
            .ok_or(AnalysisError::ShortInstance(id))?;
        self.referenced.insert(array_id);
        self.instances += 1;
        Ok(())
    }
}

/// Pass 2 visitor.
pub struct ArrayClassifier<'a> {
    referenced: &'a HashSet<u64>,
    stats: StringStats,
}

impl<'a> ArrayClassifier<'a> {
    pub fn new(referenced: &'a HashSet<u64>) -> Self {
        Self {
            referenced,
            stats: StringStats {
                referenced: referenced.len(),
                ..StringStats::default()
            },
        }
    }

    pub fn finish(self) -> StringStats {
        self.stats
    }
}

impl HeapVisitor for ArrayClassifier<'_> {
    type Error = AnalysisError;

    fn visit_primitive_array(
        &mut self,
        id: u64,
        _ty: BasicType,
        _count: u32,
        bytes: &[u8],
    ) -> Result<()> {
        if !self.referenced.contains(&id) {
            return Ok(());
        }
        let len = bytes.len() as u64;
        if is_compactable(bytes) {
            self.stats.compactable.add(len);
        } else {
            self.stats.non_compactable.add(len);
        }
        Ok(())
    }
}

/// Run both passes over the dump at `path`.
pub fn scan(path: impl AsRef<Path>, class_name: &str) -> Result<Scan> {
    let path = path.as_ref();
    scan_with(|| HeapDumpReader::open(path), class_name)
}

/// Run both passes, calling `open` once per pass for a fresh reader.
pub fn scan_with<R, F>(mut open: F, class_name: &str) -> Result<Scan>
where
    R: Read,
    F: FnMut() -> heapsqueeze_hprof::Result<HeapDumpReader<R>>,
{
    let mut discovery = ReferenceDiscovery::new(class_name);
    traverse_reader(open()?, &mut discovery)?;
    if discovery.text_class().is_none() {
        warn!("class {class_name} not found in heap dump");
    }
    info!(
        "pass 1: {} {} instances, {} referenced arrays",
        discovery.instances,
        class_name,
        discovery.referenced().len()
    );
    let referenced = discovery.into_referenced();

    let mut classifier = ArrayClassifier::new(&referenced);
    let population = traverse_reader(open()?, &mut classifier)?;
    let stats = classifier.finish();
    info!(
        "pass 2: {} compactable and {} non-compactable arrays, {} objects",
        stats.compactable.total(),
        stats.non_compactable.total(),
        population.total()
    );

    Ok(Scan { stats, population })
}
