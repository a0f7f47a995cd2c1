//! Record Cleaner Command Line
//!
//! Wires the record pipeline and series repair crates to files, standard
//! streams, layered settings, and structured logging.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod settings;
