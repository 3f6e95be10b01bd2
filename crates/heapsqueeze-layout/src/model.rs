//! Data models: the machine-level parameters that decide object sizes.

use std::fmt;

use heapsqueeze_core::BasicType;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DataModel {
    /// Width of a native pointer in bytes.
    pub address_bits: u32,
    /// Object header (mark word + class pointer).
    pub header_size: usize,
    /// Array header (object header + length).
    pub array_header_size: usize,
    /// Width of a reference stored in a field or array slot.
    pub reference_size: usize,
    /// References are stored compressed as `(address - base) >> shift`.
    pub compressed_refs: bool,
    pub object_alignment: usize,
}

/// Models analysed by default, in report order.
pub const CATALOGUE: [DataModel; 4] = [
    DataModel::x86_32(),
    DataModel::x86_64(),
    DataModel::x86_64_compressed(8),
    DataModel::x86_64_compressed(16),
];

impl DataModel {
    pub const fn x86_32() -> Self {
        Self {
            address_bits: 32,
            header_size: 8,
            array_header_size: 12,
            reference_size: 4,
            compressed_refs: false,
            object_alignment: 8,
        }
    }

    pub const fn x86_64() -> Self {
        Self {
            address_bits: 64,
            header_size: 16,
            array_header_size: 20,
            reference_size: 8,
            compressed_refs: false,
            object_alignment: 8,
        }
    }

    /// 64-bit with compressed references and class pointers.
    ///
    /// `object_alignment` must be a power of two, at least 8.
    pub const fn x86_64_compressed(object_alignment: usize) -> Self {
        Self {
            address_bits: 64,
            header_size: 12,
            array_header_size: 16,
            reference_size: 4,
            compressed_refs: true,
            object_alignment,
        }
    }

    /// Size of a field or element of type `ty`.
    pub fn size_of(&self, ty: BasicType) -> usize {
        ty.size_with_reference(self.reference_size)
    }

    /// Shift applied to compressed references. Zero when references are not
    /// compressed.
    pub fn compressed_shift(&self) -> u32 {
        if self.compressed_refs {
            self.object_alignment.trailing_zeros()
        } else {
            0
        }
    }

    /// Largest heap addressable with compressed references.
    pub fn max_heap_size(&self) -> Option<u64> {
        self.compressed_refs
            .then(|| 1u64 << (8 * self.reference_size as u32 + self.compressed_shift()))
    }
}

impl fmt::Display for DataModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.address_bits, self.compressed_refs) {
            (32, _) => write!(f, "x86 32-bit")?,
            (_, false) => write!(f, "x86-64")?,
            (_, true) => write!(f, "x86-64 compressed oops")?,
        }
        write!(f, ", {}-byte aligned", self.object_alignment)
    }
}
