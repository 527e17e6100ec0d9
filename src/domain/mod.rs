//! Domain layer types and invariants.

pub mod headings;
pub mod navigation;
pub mod slug;
