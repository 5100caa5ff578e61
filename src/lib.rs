//! Month-grid date/time picker that shades each day by how busy it is.
//!
//! The [`calendar`] module holds the pure pieces: month math, grid building,
//! and the density classifier. Everything else wires them into a terminal UI.

pub mod app;
pub mod calendar;
pub mod clock;
pub mod components;
pub mod config;
pub mod error;
pub mod theme;

pub use error::{Error, Result};
