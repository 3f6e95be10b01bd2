//! HotSpot-style field layout.
//!
//! Fields are laid out one class at a time, superclass first. Inside a class
//! the fields are grouped by size (8, 4, 2, 1 bytes, then references) and
//! placed at naturally aligned offsets. When the class has 8-byte fields and
//! the current offset is not 8-aligned, the gap is first filled with smaller
//! fields so it is not wasted.

use std::collections::VecDeque;
use std::fmt;

use heapsqueeze_core::{ClassData, FieldData};

use crate::Layouter;
use crate::class_layout::{ClassLayout, FieldLayout};
use crate::model::DataModel;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HotSpotLayouter {
    model: DataModel,
}

impl HotSpotLayouter {
    pub fn new(model: DataModel) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &DataModel {
        &self.model
    }

    fn layout_array(&self, class: &ClassData) -> Option<ClassLayout> {
        let shape = class.array_shape()?;
        let header = self.model.array_header_size as u64;
        let element_size = self.model.size_of(shape.component) as u64;
        let size = align(
            header + element_size * shape.length,
            self.model.object_alignment as u64,
        );
        Some(ClassLayout::array(
            class.name(),
            header,
            shape,
            header,
            element_size,
            size,
        ))
    }

    fn layout_instance(&self, class: &ClassData) -> ClassLayout {
        let header = self.model.header_size as u64;
        let reference_size = self.model.reference_size as u64;

        let mut placed = Vec::with_capacity(class.fields().len());
        let mut offset = header;
        for block in class.field_blocks() {
            let mut groups = Groups::new(&self.model, block);

            if !groups.longs.is_empty() && offset % 8 != 0 {
                let gap_end = align(offset, 8);
                while let Some((field, size)) = groups.take_fitting(offset, gap_end) {
                    placed.push(FieldLayout {
                        offset,
                        size,
                        field: field.clone(),
                    });
                    offset += size;
                }
            }

            for (queue, size) in groups.in_placement_order() {
                for field in queue {
                    offset = align(offset, size);
                    placed.push(FieldLayout {
                        offset,
                        size,
                        field: field.clone(),
                    });
                    offset += size;
                }
            }

            offset = align(offset, reference_size);
        }

        let size = align(offset, self.model.object_alignment as u64);
        ClassLayout::new(class.name(), header, placed, size)
    }
}

impl Layouter for HotSpotLayouter {
    fn layout(&self, class: &ClassData) -> ClassLayout {
        match self.layout_array(class) {
            Some(layout) => layout,
            None => self.layout_instance(class),
        }
    }
}

impl fmt::Display for HotSpotLayouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.model, f)
    }
}

/// One class's fields split by placement group, declaration order kept.
struct Groups<'a> {
    longs: VecDeque<&'a FieldData>,
    ints: VecDeque<&'a FieldData>,
    shorts: VecDeque<&'a FieldData>,
    bytes: VecDeque<&'a FieldData>,
    oops: VecDeque<&'a FieldData>,
    reference_size: u64,
}

impl<'a> Groups<'a> {
    fn new(model: &DataModel, block: &'a [FieldData]) -> Self {
        let mut groups = Self {
            longs: VecDeque::new(),
            ints: VecDeque::new(),
            shorts: VecDeque::new(),
            bytes: VecDeque::new(),
            oops: VecDeque::new(),
            reference_size: model.reference_size as u64,
        };
        for field in block {
            let queue = if field.ty().is_reference() {
                &mut groups.oops
            } else {
                match model.size_of(field.ty()) {
                    8 => &mut groups.longs,
                    4 => &mut groups.ints,
                    2 => &mut groups.shorts,
                    _ => &mut groups.bytes,
                }
            };
            queue.push_back(field);
        }
        groups
    }

    /// Pop the largest field that sits aligned at `offset` and ends by
    /// `limit`. Narrow references are candidates after ints.
    fn take_fitting(&mut self, offset: u64, limit: u64) -> Option<(&'a FieldData, u64)> {
        let reference_size = self.reference_size;
        let candidates: [(&mut VecDeque<&'a FieldData>, u64); 4] = [
            (&mut self.ints, 4),
            (&mut self.oops, reference_size),
            (&mut self.shorts, 2),
            (&mut self.bytes, 1),
        ];
        for (queue, size) in candidates {
            if size < 8
                && offset % size == 0
                && offset + size <= limit
                && let Some(field) = queue.pop_front()
            {
                return Some((field, size));
            }
        }
        None
    }

    fn in_placement_order(self) -> [(VecDeque<&'a FieldData>, u64); 5] {
        [
            (self.longs, 8),
            (self.ints, 4),
            (self.shorts, 2),
            (self.bytes, 1),
            (self.oops, self.reference_size),
        ]
    }
}

fn align(value: u64, alignment: u64) -> u64 {
    value.next_multiple_of(alignment)
}
