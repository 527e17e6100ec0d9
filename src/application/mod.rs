//! Application services: document catalog, template expansion and rendering.

pub mod catalog;
pub mod error;
pub mod render;
pub mod templates;
