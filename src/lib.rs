//! Per-source bounded logs for a multi-document workbench (sourcelog)
//!
//! Every open document ("source") gets its own bounded log. A single viewer
//! shows the log of the focused document, and a status indicator flashes
//! when a hidden source receives new entries.
//!
//! The log core (`model`, `state`, `workbench`) is pure and single-threaded;
//! the terminal UI in `view` is one host for it.

pub mod commands;
pub mod config;
pub mod demo;
pub mod host;
pub mod layout_store;
pub mod logging;
pub mod model;
pub mod shell;
pub mod state;
pub mod view;
pub mod workbench;

pub use workbench::{HostEvent, LayoutRecord, Workbench};
