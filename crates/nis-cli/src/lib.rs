//! Library side of the `nis` binary: argument definitions, commands,
//! CSV input/output and logging setup.

pub mod cli;
pub mod commands;
pub mod io;
pub mod logging;
pub mod summary;
