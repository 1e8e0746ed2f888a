//! # Client Layer
//!
//! The interaction controller and its terminal front end: submission
//! lifecycle, progressive answer reveal, bounded history, theme, clipboard.

pub mod clipboard;
pub mod controller;
pub mod history;
pub mod reveal;
pub mod sanitize;
pub mod tui;

pub use clipboard::*;
pub use controller::*;
pub use history::*;
pub use reveal::*;
pub use sanitize::*;
