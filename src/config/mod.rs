//! Configuration for the color grid editor
//!
//! Provides types and parsing for `cgrid.toml`, and builds the palette,
//! preset catalog and export settings the editor runs with.

pub mod loader;
pub mod registries;
pub mod schema;

pub use loader::*;
pub use registries::*;
pub use schema::*;
