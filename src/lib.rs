//! Markdown documentation site: heading anchors, navigation trees and page rendering.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
