//! Heap dump encoder.
//!
//! Writes the record subset the reader understands. Heap sub-records are
//! buffered and emitted as one HEAP DUMP SEGMENT when the segment is flushed,
//! so string and class-name records written in between always precede the
//! segment that uses them.

use std::io::{self, Write};

use heapsqueeze_core::BasicType;

use crate::header::FileHeader;
use crate::tags;

pub struct HprofWriter<W: Write> {
    out: W,
    id_size: usize,
    segment: Vec<u8>,
    next_string_id: u64,
    next_class_serial: u32,
}

impl<W: Write> HprofWriter<W> {
    /// Write the file header. `id_size` must be 4 or 8.
    pub fn new(mut out: W, id_size: u32) -> io::Result<Self> {
        out.write_all(&FileHeader::new(id_size).to_bytes())?;
        Ok(Self {
            out,
            id_size: id_size as usize,
            segment: Vec::new(),
            next_string_id: 1,
            next_class_serial: 1,
        })
    }

    /// Write a UTF8 record under a fresh string id and return the id.
    pub fn string(&mut self, text: &str) -> io::Result<u64> {
        let id = self.next_string_id;
        self.next_string_id += 1;
        let mut body = Vec::with_capacity(self.id_size + text.len());
        push_id(&mut body, self.id_size, id);
        body.extend_from_slice(text.as_bytes());
        self.record(tags::UTF8, &body)?;
        Ok(id)
    }

    /// Write a LOAD CLASS record naming `class_id`.
    pub fn load_class(&mut self, class_id: u64, name: &str) -> io::Result<()> {
        let name_id = self.string(name)?;
        let serial = self.next_class_serial;
        self.next_class_serial += 1;

        let mut body = Vec::new();
        body.extend_from_slice(&serial.to_be_bytes());
        push_id(&mut body, self.id_size, class_id);
        body.extend_from_slice(&0u32.to_be_bytes());
        push_id(&mut body, self.id_size, name_id);
        self.record(tags::LOAD_CLASS, &body)
    }

    /// Name a class and buffer its CLASS DUMP. Fields are the class's own
    /// instance fields in declaration order.
    pub fn class_dump(
        &mut self,
        class_id: u64,
        name: &str,
        super_id: u64,
        fields: &[(&str, BasicType)],
    ) -> io::Result<()> {
        self.load_class(class_id, name)?;
        let mut field_ids = Vec::with_capacity(fields.len());
        for (field_name, ty) in fields {
            field_ids.push((self.string(field_name)?, *ty));
        }

        let instance_size: usize = fields
            .iter()
            .map(|(_, ty)| ty.size_with_reference(self.id_size))
            .sum();

        let id_size = self.id_size;
        let seg = &mut self.segment;
        seg.push(tags::CLASS_DUMP);
        push_id(seg, id_size, class_id);
        seg.extend_from_slice(&0u32.to_be_bytes());
        push_id(seg, id_size, super_id);
        for _ in 0..5 {
            push_id(seg, id_size, 0);
        }
        seg.extend_from_slice(&(instance_size as u32).to_be_bytes());
        seg.extend_from_slice(&0u16.to_be_bytes()); // constant pool
        seg.extend_from_slice(&0u16.to_be_bytes()); // statics
        seg.extend_from_slice(&(field_ids.len() as u16).to_be_bytes());
        for (name_id, ty) in field_ids {
            push_id(seg, id_size, name_id);
            seg.push(ty.tag());
        }
        Ok(())
    }

    /// Buffer an INSTANCE DUMP with raw field bytes.
    pub fn instance_dump(&mut self, id: u64, class_id: u64, bytes: &[u8]) {
        let id_size = self.id_size;
        let seg = &mut self.segment;
        seg.push(tags::INSTANCE_DUMP);
        push_id(seg, id_size, id);
        seg.extend_from_slice(&0u32.to_be_bytes());
        push_id(seg, id_size, class_id);
        seg.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
        seg.extend_from_slice(bytes);
    }

    /// Buffer a PRIM ARRAY DUMP. `bytes` must hold `count` big-endian
    /// elements of `ty`.
    pub fn prim_array_dump(&mut self, id: u64, ty: BasicType, count: u32, bytes: &[u8]) {
        let id_size = self.id_size;
        let seg = &mut self.segment;
        seg.push(tags::PRIM_ARRAY_DUMP);
        push_id(seg, id_size, id);
        seg.extend_from_slice(&0u32.to_be_bytes());
        seg.extend_from_slice(&count.to_be_bytes());
        seg.push(ty.tag());
        seg.extend_from_slice(bytes);
    }

    /// Buffer a `char[]` holding the UTF-16 units of `text`.
    pub fn char_array_dump(&mut self, id: u64, text: &str) {
        let bytes: Vec<u8> = text.encode_utf16().flat_map(u16::to_be_bytes).collect();
        self.prim_array_dump(id, BasicType::Char, (bytes.len() / 2) as u32, &bytes);
    }

    /// Buffer an OBJ ARRAY DUMP.
    pub fn obj_array_dump(&mut self, id: u64, class_id: u64, elements: &[u64]) {
        let id_size = self.id_size;
        let seg = &mut self.segment;
        seg.push(tags::OBJ_ARRAY_DUMP);
        push_id(seg, id_size, id);
        seg.extend_from_slice(&0u32.to_be_bytes());
        seg.extend_from_slice(&(elements.len() as u32).to_be_bytes());
        push_id(seg, id_size, class_id);
        for &element in elements {
            push_id(seg, id_size, element);
        }
    }

    /// Buffer a ROOT UNKNOWN.
    pub fn root_unknown(&mut self, id: u64) {
        self.segment.push(tags::ROOT_UNKNOWN);
        push_id(&mut self.segment, self.id_size, id);
    }

    /// Emit buffered sub-records as one HEAP DUMP SEGMENT.
    pub fn flush_segment(&mut self) -> io::Result<()> {
        if self.segment.is_empty() {
            return Ok(());
        }
        let body = std::mem::take(&mut self.segment);
        self.record(tags::HEAP_DUMP_SEGMENT, &body)
    }

    /// Flush the pending segment, write HEAP DUMP END and return the sink.
    pub fn finish(mut self) -> io::Result<W> {
        self.flush_segment()?;
        self.record(tags::HEAP_DUMP_END, &[])?;
        self.out.flush()?;
        Ok(self.out)
    }

    fn record(&mut self, tag: u8, body: &[u8]) -> io::Result<()> {
        self.out.write_all(&[tag])?;
        self.out.write_all(&0u32.to_be_bytes())?;
        self.out.write_all(&(body.len() as u32).to_be_bytes())?;
        self.out.write_all(body)
    }
}

/// Encode an instance's field bytes: each value is written big-endian with
/// the width of its type, references with `id_size`.
pub fn encode_fields(id_size: usize, values: &[(BasicType, u64)]) -> Vec<u8> {
    let mut bytes = Vec::new();
    for &(ty, value) in values {
        let width = ty.size_with_reference(id_size);
        bytes.extend_from_slice(&value.to_be_bytes()[8 - width..]);
    }
    bytes
}

fn push_id(buf: &mut Vec<u8>, id_size: usize, id: u64) {
    match id_size {
        4 => buf.extend_from_slice(&(id as u32).to_be_bytes()),
        _ => buf.extend_from_slice(&id.to_be_bytes()),
    }
}
