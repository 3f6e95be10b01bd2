//! Basic value types as they appear in heap dumps.
//!
//! The numeric tags follow the HPROF encoding, so a type read from a dump
//! can be converted with [`BasicType::from_tag`] and written back with
//! [`BasicType::tag`].

/// Type of a field or array element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BasicType {
    Object,
    Boolean,
    Char,
    Float,
    Double,
    Byte,
    Short,
    Int,
    Long,
}

impl BasicType {
    /// Decode an HPROF basic type tag.
    pub fn from_tag(tag: u8) -> Option<Self> {
        Some(match tag {
            2 => Self::Object,
            4 => Self::Boolean,
            5 => Self::Char,
            6 => Self::Float,
            7 => Self::Double,
            8 => Self::Byte,
            9 => Self::Short,
            10 => Self::Int,
            11 => Self::Long,
            _ => return None,
        })
    }

    /// HPROF basic type tag.
    pub fn tag(self) -> u8 {
        match self {
            Self::Object => 2,
            Self::Boolean => 4,
            Self::Char => 5,
            Self::Float => 6,
            Self::Double => 7,
            Self::Byte => 8,
            Self::Short => 9,
            Self::Int => 10,
            Self::Long => 11,
        }
    }

    /// Java-style type name. References are reported as `java/lang/Object`
    /// since dumps do not record the declared type of a reference field.
    pub fn name(self) -> &'static str {
        match self {
            Self::Object => crate::OBJECT_CLASS,
            Self::Boolean => "boolean",
            Self::Char => "char",
            Self::Float => "float",
            Self::Double => "double",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
        }
    }

    /// Size in bytes of a primitive value. `None` for references, whose size
    /// depends on the identifier size or the simulated data model.
    pub fn primitive_size(self) -> Option<usize> {
        match self {
            Self::Object => None,
            Self::Boolean | Self::Byte => Some(1),
            Self::Char | Self::Short => Some(2),
            Self::Float | Self::Int => Some(4),
            Self::Double | Self::Long => Some(8),
        }
    }

    pub fn is_reference(self) -> bool {
        self == Self::Object
    }

    /// Size in bytes given the width of a reference.
    pub fn size_with_reference(self, reference_size: usize) -> usize {
        self.primitive_size().unwrap_or(reference_size)
    }
}

impl std::fmt::Display for BasicType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
