//! Core data structures for heapsqueeze.
//!
//! This crate contains:
//! - Structural class descriptors ([`ClassData`], [`FieldData`], [`BasicType`])
//!   shared between the heap dump reader and the layout simulator
//! - [`Multiset`], the histogram type used to aggregate objects without
//!   retaining per-object detail

pub mod basic_type;
pub mod class_data;
pub mod multiset;

#[cfg(test)]
mod basic_type_tests;
#[cfg(test)]
mod class_data_tests;
#[cfg(test)]
mod multiset_tests;

pub use basic_type::BasicType;
pub use class_data::{ArrayShape, ClassData, FieldData, OBJECT_CLASS};
pub use multiset::Multiset;
