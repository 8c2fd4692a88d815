//! ColorGrid - Library for editing 4x4 color grids and their order codes
//!
//! This library provides functionality to:
//! - Format and parse order codes (`RD_RD_RD_RD/...`)
//! - Resolve color codes through a palette registry
//! - Match grids against a catalog of named presets
//! - Track the current grid, its canonical code and its label
//! - Render grids to the terminal and to PNG/JPEG images

pub mod catalog;
pub mod cli;
pub mod clipboard;
pub mod codec;
pub mod color;
pub mod config;
pub mod grid;
pub mod output;
pub mod palette;
pub mod state;
pub mod terminal;
