//! Object layout simulation.
//!
//! Given a structural [`ClassData`](heapsqueeze_core::ClassData) and a
//! [`DataModel`], a [`Layouter`] computes where every field would live and
//! how large an instance would be, including header and padding.

pub mod class_layout;
pub mod hotspot;
pub mod model;

#[cfg(test)]
mod class_layout_tests;

pub use class_layout::{ClassLayout, FieldLayout};
pub use hotspot::HotSpotLayouter;
pub use model::{CATALOGUE, DataModel};

/// Computes simulated object layouts.
///
/// The `Display` output labels the simulation in reports.
pub trait Layouter: std::fmt::Display {
    fn layout(&self, class: &heapsqueeze_core::ClassData) -> ClassLayout;

    /// Shorthand for `layout(class).instance_size()`.
    fn instance_size(&self, class: &heapsqueeze_core::ClassData) -> u64 {
        self.layout(class).instance_size()
    }
}
