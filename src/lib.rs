//! Builds and runs database dump/restore commands for MySQL, PostgreSQL and MongoDB.

pub mod backup;
pub mod config;
pub mod dumper;
pub mod errors;
pub mod restore;
pub mod utils;

pub use config::DumperOptions;
pub use dumper::{Dumper, Engine};
pub use errors::{DumperError, Result};
