//! Terminal UI for the Spinwheel wheel-of-names.
//!
//! Provides a ratatui-based interface with tabs for the spinning wheel, the
//! option list, win statistics, and saved wheels.

pub mod app;
pub mod shared;
pub mod tabs;
pub mod terminal;
