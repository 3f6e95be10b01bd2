//! Streaming reader and writer for HPROF heap dumps.
//!
//! This crate contains:
//! - [`HeapDumpReader`], a pull-based decoder yielding one [`Record`] per
//!   class, instance or array dump, in file order
//! - [`traverse`], a visitor-driven walk over a dump that also builds the
//!   object population histogram
//! - [`HprofWriter`], an encoder for the same record subset

pub mod error;
pub mod header;
pub mod reader;
pub mod tags;
pub mod visit;
pub mod writer;


pub use error::{HprofError, Result};
pub use header::{FORMAT_1_0_2, FileHeader};
pub use reader::{ClassRecord, FieldDecl, HeapDumpReader, Record};
pub use visit::{HeapVisitor, traverse, traverse_reader};
pub use writer::{HprofWriter, encode_fields};
