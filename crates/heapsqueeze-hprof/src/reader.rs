//! Pull-based heap dump decoder.
//!
//! [`HeapDumpReader`] walks the dump once, front to back. Top-level string
//! and class-name records are absorbed into lookup tables; heap dump
//! segments are decoded sub-record by sub-record and surfaced as [`Record`]s.
//! Instance and array payloads borrow an internal buffer that is reused for
//! every record, so memory use stays bounded by the largest single object.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use heapsqueeze_core::BasicType;
use log::{debug, trace};

use crate::error::{HprofError, Result};
use crate::header::{FileHeader, MAX_FORMAT_LEN};
use crate::tags;

/// One declared instance field of a class dump.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDecl {
    pub name: String,
    pub ty: BasicType,
}

/// Decoded CLASS DUMP sub-record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassRecord {
    pub id: u64,
    pub name: String,
    /// Zero for `java/lang/Object`.
    pub super_id: u64,
    pub instance_size: u32,
    /// Own instance fields in declaration order (inherited fields excluded).
    pub fields: Vec<FieldDecl>,
    /// Width of a reference inside instance bytes (the identifier size).
    pub ref_size: usize,
}

impl ClassRecord {
    /// Byte offsets of the own reference fields inside an instance dump's
    /// field bytes, in declaration order.
    ///
    /// Instance dumps list the class's own field values first, so these
    /// offsets are valid for the raw bytes of any instance of this class.
    pub fn ref_offsets(&self) -> Vec<usize> {
        let mut offsets = Vec::new();
        let mut offset = 0;
        for field in &self.fields {
            if field.ty.is_reference() {
                offsets.push(offset);
            }
            offset += field.ty.size_with_reference(self.ref_size);
        }
        offsets
    }
}

/// A decoded heap object record.
#[derive(Debug)]
pub enum Record<'a> {
    Class(ClassRecord),
    Instance {
        id: u64,
        class_id: u64,
        bytes: &'a [u8],
    },
    PrimitiveArray {
        id: u64,
        ty: BasicType,
        count: u32,
        bytes: &'a [u8],
    },
    ObjectArray {
        id: u64,
        class_id: u64,
        count: u32,
    },
}

/// Streaming heap dump reader.
pub struct HeapDumpReader<R> {
    input: R,
    id_size: usize,
    /// Bytes consumed so far.
    position: u64,
    /// End offset of the heap dump segment being decoded, if any.
    heap_end: Option<u64>,
    strings: HashMap<u64, String>,
    class_names: HashMap<u64, String>,
    buf: Vec<u8>,
}

impl HeapDumpReader<BufReader<File>> {
    /// Open a dump file. The file is closed when the reader is dropped.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("opening heap dump {}", path.display());
        let file = File::open(path)?;
        Self::new(BufReader::with_capacity(1 << 16, file))
    }
}

impl<R: Read> HeapDumpReader<R> {
    /// Wrap a byte stream positioned at the start of a dump and decode its
    /// header.
    pub fn new(input: R) -> Result<Self> {
        let mut reader = Self {
            input,
            id_size: 8,
            position: 0,
            heap_end: None,
            strings: HashMap::new(),
            class_names: HashMap::new(),
            buf: Vec::new(),
        };
        let header = reader.read_header()?;
        reader.id_size = header.id_size as usize;
        debug!(
            "heap dump format {:?}, identifier size {}",
            header.format, reader.id_size
        );
        Ok(reader)
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Decode the next heap object record. Returns `None` at the end of the
    /// dump.
    pub fn next_record(&mut self) -> Result<Option<Record<'_>>> {
        loop {
            match self.heap_end {
                Some(end) if self.position < end => {
                    let offset = self.position;
                    let tag = self.read_u8()?;
                    match tag {
                        tags::CLASS_DUMP => {
                            return self.read_class_dump().map(|c| Some(Record::Class(c)));
                        }
                        tags::INSTANCE_DUMP => return self.read_instance_dump().map(Some),
                        tags::OBJ_ARRAY_DUMP => return self.read_obj_array_dump().map(Some),
                        tags::PRIM_ARRAY_DUMP => return self.read_prim_array_dump().map(Some),
                        _ => self.skip_root(tag, offset)?,
                    }
                }
                Some(end) => {
                    if self.position != end {
                        return Err(HprofError::SegmentOverrun {
                            expected: end,
                            actual: self.position,
                        });
                    }
                    self.heap_end = None;
                }
                None => {
                    let Some(tag) = self.read_tag()? else {
                        return Ok(None);
                    };
                    let _time = self.read_u32()?;
                    let length = self.read_u32()? as u64;
                    self.read_top_level(tag, length)?;
                }
            }
        }
    }

    fn read_top_level(&mut self, tag: u8, length: u64) -> Result<()> {
        match tag {
            tags::UTF8 => {
                let id = self.read_id()?;
                let len = length
                    .checked_sub(self.id_size as u64)
                    .ok_or(HprofError::Truncated(self.position))?;
                self.fill_buf(len)?;
                let text = String::from_utf8_lossy(&self.buf).into_owned();
                self.strings.insert(id, text);
            }
            tags::LOAD_CLASS => {
                let _serial = self.read_u32()?;
                let class_id = self.read_id()?;
                let _stack_serial = self.read_u32()?;
                let name_id = self.read_id()?;
                let name = self.string(name_id)?.to_owned();
                trace!("class 0x{class_id:x} is {name}");
                self.class_names.insert(class_id, name);
            }
            tags::HEAP_DUMP | tags::HEAP_DUMP_SEGMENT => {
                trace!("heap dump segment of {length} bytes at {}", self.position);
                self.heap_end = Some(self.position + length);
            }
            _ => self.skip(length)?,
        }
        Ok(())
    }

    fn skip_root(&mut self, tag: u8, offset: u64) -> Result<()> {
        let id = self.id_size as u64;
        let len = match tag {
            tags::ROOT_UNKNOWN | tags::ROOT_STICKY_CLASS | tags::ROOT_MONITOR_USED => id,
            tags::ROOT_JNI_GLOBAL => 2 * id,
            tags::ROOT_NATIVE_STACK | tags::ROOT_THREAD_BLOCK => id + 4,
            tags::ROOT_JNI_LOCAL | tags::ROOT_JAVA_FRAME | tags::ROOT_THREAD_OBJECT => id + 8,
            _ => return Err(HprofError::UnknownSubRecord { tag, offset }),
        };
        self.skip(len)
    }

    fn read_class_dump(&mut self) -> Result<ClassRecord> {
        let id = self.read_id()?;
        let _stack_serial = self.read_u32()?;
        let super_id = self.read_id()?;
        // class loader, signers, protection domain, two reserved
        self.skip(5 * self.id_size as u64)?;
        let instance_size = self.read_u32()?;

        let constants = self.read_u16()?;
        for _ in 0..constants {
            let _index = self.read_u16()?;
            let ty = self.read_basic_type()?;
            self.skip(ty.size_with_reference(self.id_size) as u64)?;
        }

        let statics = self.read_u16()?;
        for _ in 0..statics {
            let _name = self.read_id()?;
            let ty = self.read_basic_type()?;
            self.skip(ty.size_with_reference(self.id_size) as u64)?;
        }

        let field_count = self.read_u16()?;
        let mut fields = Vec::with_capacity(field_count as usize);
        for _ in 0..field_count {
            let name_id = self.read_id()?;
            let ty = self.read_basic_type()?;
            fields.push(FieldDecl {
                name: self.string(name_id)?.to_owned(),
                ty,
            });
        }

        let name = self
            .class_names
            .get(&id)
            .cloned()
            .ok_or(HprofError::UnresolvedClassName(id))?;

        Ok(ClassRecord {
            id,
            name,
            super_id,
            instance_size,
            fields,
            ref_size: self.id_size,
        })
    }

    fn read_instance_dump(&mut self) -> Result<Record<'_>> {
        let id = self.read_id()?;
        let _stack_serial = self.read_u32()?;
        let class_id = self.read_id()?;
        let len = self.read_u32()?;
        self.fill_buf(u64::from(len))?;
        Ok(Record::Instance {
            id,
            class_id,
            bytes: &self.buf,
        })
    }

    fn read_obj_array_dump(&mut self) -> Result<Record<'_>> {
        let id = self.read_id()?;
        let _stack_serial = self.read_u32()?;
        let count = self.read_u32()?;
        let class_id = self.read_id()?;
        self.skip(count as u64 * self.id_size as u64)?;
        Ok(Record::ObjectArray {
            id,
            class_id,
            count,
        })
    }

    fn read_prim_array_dump(&mut self) -> Result<Record<'_>> {
        let id = self.read_id()?;
        let _stack_serial = self.read_u32()?;
        let count = self.read_u32()?;
        let ty = self.read_basic_type()?;
        let elem_size = ty
            .primitive_size()
            .ok_or(HprofError::ObjectPrimitiveArray(id))?;
        self.fill_buf(u64::from(count) * elem_size as u64)?;
        Ok(Record::PrimitiveArray {
            id,
            ty,
            count,
            bytes: &self.buf,
        })
    }

    fn read_header(&mut self) -> Result<FileHeader> {
        let mut format = Vec::new();
        loop {
            let b = self
                .read_u8()
                .map_err(|_| HprofError::InvalidHeader("missing format string".to_string()))?;
            if b == 0 {
                break;
            }
            if format.len() == MAX_FORMAT_LEN {
                return Err(HprofError::InvalidHeader(
                    "format string is not terminated".to_string(),
                ));
            }
            format.push(b);
        }
        let format = String::from_utf8_lossy(&format).into_owned();
        let id_size = self.read_u32()?;
        let high = self.read_u32()? as u64;
        let low = self.read_u32()? as u64;

        let header = FileHeader {
            format,
            id_size,
            timestamp: (high << 32) | low,
        };
        header.validate()?;
        Ok(header)
    }

    fn string(&self, id: u64) -> Result<&str> {
        self.strings
            .get(&id)
            .map(String::as_str)
            .ok_or(HprofError::UnresolvedString(id))
    }

    /// Read a record tag, or `None` on a clean end of input.
    fn read_tag(&mut self) -> Result<Option<u8>> {
        let mut b = [0u8; 1];
        loop {
            match self.input.read(&mut b) {
                Ok(0) => return Ok(None),
                Ok(_) => {
                    self.position += 1;
                    return Ok(Some(b[0]));
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn read_exact(&mut self, out: &mut [u8]) -> Result<()> {
        self.input.read_exact(out).map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => HprofError::Truncated(self.position),
            _ => HprofError::Io(e),
        })?;
        self.position += out.len() as u64;
        Ok(())
    }

    /// Replace the buffer contents with the next `len` bytes.
    ///
    /// The buffer grows with the bytes actually read, not with the length a
    /// record claims, so a truncated file cannot force a huge allocation.
    fn fill_buf(&mut self, len: u64) -> Result<()> {
        self.buf.clear();
        let read = (&mut self.input).take(len).read_to_end(&mut self.buf)?;
        self.position += read as u64;
        if (read as u64) < len {
            return Err(HprofError::Truncated(self.position));
        }
        Ok(())
    }

    fn skip(&mut self, len: u64) -> Result<()> {
        let copied = io::copy(&mut (&mut self.input).take(len), &mut io::sink())?;
        self.position += copied;
        if copied != len {
            return Err(HprofError::Truncated(self.position));
        }
        Ok(())
    }

    fn read_u8(&mut self) -> Result<u8> {
        let mut b = [0u8; 1];
        self.read_exact(&mut b)?;
        Ok(b[0])
    }

    fn read_u16(&mut self) -> Result<u16> {
        let mut b = [0u8; 2];
        self.read_exact(&mut b)?;
        Ok(u16::from_be_bytes(b))
    }

    fn read_u32(&mut self) -> Result<u32> {
        let mut b = [0u8; 4];
        self.read_exact(&mut b)?;
        Ok(u32::from_be_bytes(b))
    }

    fn read_u64(&mut self) -> Result<u64> {
        let mut b = [0u8; 8];
        self.read_exact(&mut b)?;
        Ok(u64::from_be_bytes(b))
    }

    fn read_id(&mut self) -> Result<u64> {
        match self.id_size {
            4 => self.read_u32().map(u64::from),
            _ => self.read_u64(),
        }
    }

    fn read_basic_type(&mut self) -> Result<BasicType> {
        let offset = self.position;
        let tag = self.read_u8()?;
        BasicType::from_tag(tag).ok_or(HprofError::UnknownBasicType { tag, offset })
    }
}

/// Decode a reference stored at `offset` in instance bytes.
///
/// Returns `None` when the bytes are too short or `width` is not 4 or 8.
pub fn read_reference(bytes: &[u8], offset: usize, width: usize) -> Option<u64> {
    let slot = bytes.get(offset..offset.checked_add(width)?)?;
    match width {
        4 => Some(u32::from_be_bytes(slot.try_into().ok()?) as u64),
        8 => Some(u64::from_be_bytes(slot.try_into().ok()?)),
        _ => None,
    }
}
