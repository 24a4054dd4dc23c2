//! Command handlers for the Toonify CLI.

pub mod catalog;
pub mod config;
pub mod interactive;
pub mod transform;
