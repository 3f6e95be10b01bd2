//! Visitor-driven traversal.
//!
//! [`traverse`] drives a [`HeapDumpReader`] to the end of the dump, hands
//! each record to a [`HeapVisitor`], and meanwhile aggregates the object
//! population: every instance and array, keyed by its structural
//! [`ClassData`].

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use heapsqueeze_core::{BasicType, ClassData, FieldData, Multiset};
use log::debug;

use crate::error::{HprofError, Result};
use crate::reader::{ClassRecord, HeapDumpReader, Record};

/// Callbacks invoked for each heap record, in file order.
///
/// All methods default to doing nothing, so a visitor only implements the
/// record kinds it acts on. Returning an error stops the traversal.
pub trait HeapVisitor {
    type Error: From<HprofError>;

    fn visit_class(&mut self, _class: &ClassRecord) -> std::result::Result<(), Self::Error> {
        Ok(())
    }

    fn visit_instance(
        &mut self,
        _id: u64,
        _class_id: u64,
        _bytes: &[u8],
    ) -> std::result::Result<(), Self::Error> {
        Ok(())
    }

    fn visit_primitive_array(
        &mut self,
        _id: u64,
        _ty: BasicType,
        _count: u32,
        _bytes: &[u8],
    ) -> std::result::Result<(), Self::Error> {
        Ok(())
    }
}

/// Walk the dump at `path` with `visitor` and return the object population.
///
/// The file is opened for the duration of the walk and closed before this
/// returns, on success or error.
pub fn traverse<V: HeapVisitor>(
    path: impl AsRef<Path>,
    visitor: &mut V,
) -> std::result::Result<Multiset<ClassData>, V::Error> {
    let reader = HeapDumpReader::open(path)?;
    traverse_reader(reader, visitor)
}

/// Walk an already opened reader to the end.
pub fn traverse_reader<R: Read, V: HeapVisitor>(
    mut reader: HeapDumpReader<R>,
    visitor: &mut V,
) -> std::result::Result<Multiset<ClassData>, V::Error> {
    let mut population = Population::default();

    while let Some(record) = reader.next_record()? {
        match record {
            Record::Class(class) => {
                visitor.visit_class(&class)?;
                population.add_class(class);
            }
            Record::Instance {
                id,
                class_id,
                bytes,
            } => {
                visitor.visit_instance(id, class_id, bytes)?;
                population.instances.add(class_id);
            }
            Record::PrimitiveArray {
                id,
                ty,
                count,
                bytes,
            } => {
                visitor.visit_primitive_array(id, ty, count, bytes)?;
                population.arrays.add(ClassData::array(ty, count as u64));
            }
            Record::ObjectArray { count, .. } => {
                population
                    .arrays
                    .add(ClassData::array(BasicType::Object, count as u64));
            }
        }
    }

    debug!(
        "traversed {} bytes: {} classes, {} instances, {} arrays",
        reader.position(),
        population.classes.len(),
        population.instances.total(),
        population.arrays.total()
    );

    Ok(population.finish()?)
}

#[derive(Default)]
struct Population {
    classes: HashMap<u64, ClassRecord>,
    /// Instance counts per class id.
    instances: Multiset<u64>,
    arrays: Multiset<ClassData>,
}

impl Population {
    fn add_class(&mut self, class: ClassRecord) {
        self.classes.entry(class.id).or_insert(class);
    }

    fn finish(self) -> Result<Multiset<ClassData>> {
        let mut out = Multiset::new();
        for (&class_id, count) in self.instances.iter() {
            out.add_n(self.describe(class_id)?, count);
        }
        out.merge(self.arrays);
        Ok(out)
    }

    /// Resolve the full descriptor of a class, inherited fields first.
    fn describe(&self, class_id: u64) -> Result<ClassData> {
        let class = self
            .classes
            .get(&class_id)
            .ok_or(HprofError::MissingClassDump(class_id))?;

        let mut chain = vec![class];
        let mut super_id = class.super_id;
        while super_id != 0 {
            if chain.len() > self.classes.len() {
                return Err(HprofError::CyclicHierarchy(class_id));
            }
            let parent = self
                .classes
                .get(&super_id)
                .ok_or(HprofError::MissingClassDump(super_id))?;
            chain.push(parent);
            super_id = parent.super_id;
        }

        let fields = chain
            .iter()
            .rev()
            .flat_map(|level| {
                level
                    .fields
                    .iter()
                    .map(|f| FieldData::new(level.name.as_str(), f.name.as_str(), f.ty))
            })
            .collect();

        Ok(ClassData::with_fields(class.name.as_str(), fields))
    }
}
