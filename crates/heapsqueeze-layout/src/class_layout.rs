//! Simulated layout of one class.

use std::fmt;

use heapsqueeze_core::{ArrayShape, FieldData};

/// A field placed at a fixed offset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldLayout {
    pub offset: u64,
    pub size: u64,
    pub field: FieldData,
}

/// Result of laying out a class or array under one data model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassLayout {
    class_name: String,
    header_size: u64,
    /// Sorted by offset.
    fields: Vec<FieldLayout>,
    array: Option<ArrayBody>,
    instance_size: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ArrayBody {
    shape: ArrayShape,
    base: u64,
    element_size: u64,
}

impl ArrayBody {
    fn bytes(&self) -> u64 {
        self.element_size * self.shape.length
    }
}

impl ClassLayout {
    pub fn new(
        class_name: impl Into<String>,
        header_size: u64,
        mut fields: Vec<FieldLayout>,
        instance_size: u64,
    ) -> Self {
        fields.sort_by_key(|f| f.offset);
        Self {
            class_name: class_name.into(),
            header_size,
            fields,
            array: None,
            instance_size,
        }
    }

    /// Layout of an array whose elements start at `base_offset`.
    pub fn array(
        class_name: impl Into<String>,
        header_size: u64,
        shape: ArrayShape,
        base_offset: u64,
        element_size: u64,
        instance_size: u64,
    ) -> Self {
        Self {
            class_name: class_name.into(),
            header_size,
            fields: Vec::new(),
            array: Some(ArrayBody {
                shape,
                base: base_offset,
                element_size,
            }),
            instance_size,
        }
    }

    pub fn fields(&self) -> &[FieldLayout] {
        &self.fields
    }

    /// Simulated instance size in bytes, padding included.
    pub fn instance_size(&self) -> u64 {
        self.instance_size
    }

    /// End of the last byte of data.
    fn data_end(&self) -> u64 {
        match self.array {
            Some(body) => body.base + body.bytes(),
            None => self
                .fields
                .last()
                .map_or(self.header_size, |f| f.offset + f.size),
        }
    }

    /// Bytes lost to gaps between the header and fields.
    pub fn internal_loss(&self) -> u64 {
        let mut loss = 0;
        let mut cursor = self.header_size;
        for f in &self.fields {
            loss += f.offset.saturating_sub(cursor);
            cursor = cursor.max(f.offset + f.size);
        }
        if let Some(body) = self.array {
            loss += body.base.saturating_sub(self.header_size);
        }
        loss
    }

    /// Bytes lost to alignment at the end of the object.
    pub fn external_loss(&self) -> u64 {
        self.instance_size.saturating_sub(self.data_end())
    }
}

impl fmt::Display for ClassLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} object internals:", self.class_name)?;
        writeln!(f, "{:>7} {:>5} {:>18} DESCRIPTION", "OFFSET", "SIZE", "TYPE")?;
        writeln!(
            f,
            "{:>7} {:>5} {:>18} (object header)",
            0, self.header_size, ""
        )?;

        let mut cursor = self.header_size;
        for field in &self.fields {
            if field.offset > cursor {
                writeln!(
                    f,
                    "{:>7} {:>5} {:>18} (alignment/padding gap)",
                    cursor,
                    field.offset - cursor,
                    ""
                )?;
            }
            writeln!(
                f,
                "{:>7} {:>5} {:>18} {}.{}",
                field.offset,
                field.size,
                field.field.ty().name(),
                short_name(field.field.owner()),
                field.field.name()
            )?;
            cursor = field.offset + field.size;
        }

        if let Some(body) = self.array {
            if body.base > self.header_size {
                writeln!(
                    f,
                    "{:>7} {:>5} {:>18} (alignment/padding gap)",
                    self.header_size,
                    body.base - self.header_size,
                    ""
                )?;
            }
            writeln!(
                f,
                "{:>7} {:>5} {:>18} [{} elements]",
                body.base,
                body.bytes(),
                body.shape.component.name(),
                body.shape.length
            )?;
        }

        let external = self.external_loss();
        if external > 0 {
            writeln!(
                f,
                "{:>7} {:>5} {:>18} (loss due to the next object alignment)",
                self.data_end(),
                external,
                ""
            )?;
        }
        writeln!(f, "Instance size: {} bytes", self.instance_size)?;
        write!(
            f,
            "Space losses: {} bytes internal + {} bytes external = {} bytes total",
            self.internal_loss(),
            external,
            self.internal_loss() + external
        )
    }
}

/// `java/lang/String` -> `String`.
fn short_name(class: &str) -> &str {
    class.rsplit('/').next().unwrap_or(class)
}
