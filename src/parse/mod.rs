//! Pure parsing functions for every `/proc`/`/sys` source this crate
//! reads. Each submodule takes file content as `&str` and returns typed
//! records from [`crate::model`], so every parser is testable with
//! string fixtures alone.

pub mod cifs;
pub mod cpu;
pub mod disk;
pub mod irq;
pub mod mount;
pub mod net;
pub mod process;
pub mod psi;
pub mod tape;
pub mod uptime;

pub use crate::error::ParseError;
