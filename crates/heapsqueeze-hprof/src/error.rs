use std::io;

/// Heap dump decoding error.
#[derive(Debug, thiserror::Error)]
pub enum HprofError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid header: {0}")]
    InvalidHeader(String),
    #[error("unsupported identifier size: {0} (expected 4 or 8)")]
    UnsupportedIdSize(u32),
    #[error("truncated heap dump at offset {0}")]
    Truncated(u64),
    #[error("unknown heap dump sub-record tag 0x{tag:02x} at offset {offset}")]
    UnknownSubRecord { tag: u8, offset: u64 },
    #[error("unknown basic type {tag} at offset {offset}")]
    UnknownBasicType { tag: u8, offset: u64 },
    #[error("object type in primitive array 0x{0:x}")]
    ObjectPrimitiveArray(u64),
    #[error("string 0x{0:x} is referenced before it is defined")]
    UnresolvedString(u64),
    #[error("class 0x{0:x} has no LOAD CLASS record")]
    UnresolvedClassName(u64),
    #[error("class 0x{0:x} has instances but no CLASS DUMP record")]
    MissingClassDump(u64),
    #[error("class 0x{0:x} has a cyclic superclass chain")]
    CyclicHierarchy(u64),
    #[error("heap dump segment overrun: ended at {actual}, expected {expected}")]
    SegmentOverrun { expected: u64, actual: u64 },
}

pub type Result<T> = std::result::Result<T, HprofError>;
