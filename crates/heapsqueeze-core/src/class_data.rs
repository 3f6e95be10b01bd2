//! Structural class descriptors.
//!
//! A [`ClassData`] describes the shape of an object: its class name, its
//! instance fields (including inherited ones), and for arrays the element
//! type and length. Two objects with equal descriptors occupy the same
//! amount of memory under any data model, which is what makes descriptors
//! usable as histogram keys.

use crate::BasicType;

/// Name of the root class, also the type name reported for references.
pub const OBJECT_CLASS: &str = "java/lang/Object";

/// One declared instance field.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldData {
    owner: String,
    name: String,
    ty: BasicType,
}

impl FieldData {
    pub fn new(owner: impl Into<String>, name: impl Into<String>, ty: BasicType) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            ty,
        }
    }

    /// Class that declares this field.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> BasicType {
        self.ty
    }
}

/// Element type and length of an array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ArrayShape {
    pub component: BasicType,
    pub length: u64,
}

/// Structural description of a class or an array.
///
/// Instance fields are stored in hierarchy order: the fields of the topmost
/// superclass come first, the class's own fields last. Each field records
/// its declaring class, so the per-class blocks can be recovered with
/// [`ClassData::field_blocks`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ClassData {
    name: String,
    fields: Vec<FieldData>,
    array: Option<ArrayShape>,
}

impl ClassData {
    /// A class without instance fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            array: None,
        }
    }

    pub fn with_fields(name: impl Into<String>, fields: Vec<FieldData>) -> Self {
        Self {
            name: name.into(),
            fields,
            array: None,
        }
    }

    /// An array of `length` elements of `component`.
    ///
    /// Primitive arrays are named after their element type (`char[]`),
    /// reference arrays are all `java/lang/Object[]`.
    pub fn array(component: BasicType, length: u64) -> Self {
        Self {
            name: format!("{}[]", component.name()),
            fields: Vec::new(),
            array: Some(ArrayShape { component, length }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// All instance fields in hierarchy order.
    pub fn fields(&self) -> &[FieldData] {
        &self.fields
    }

    /// Append a field. The field's owner decides which class block it joins:
    /// a field owned by this class extends the last block.
    pub fn add_field(&mut self, field: FieldData) {
        self.fields.push(field);
    }

    pub fn array_shape(&self) -> Option<ArrayShape> {
        self.array
    }

    /// Fields grouped by declaring class, superclass blocks first.
    pub fn field_blocks(&self) -> impl Iterator<Item = &[FieldData]> {
        self.fields.chunk_by(|a, b| a.owner == b.owner)
    }
}
