//! weatherview library
//!
//! Current weather lookup by city or location, with a live clock, rendered
//! as a terminal UI. The binary in `main.rs` wires these modules together.

pub mod app;
pub mod cli;
pub mod clock;
pub mod config;
pub mod data;
pub mod events;
pub mod fetch;
pub mod input;
pub mod logging;
pub mod presentation;
pub mod ui;
