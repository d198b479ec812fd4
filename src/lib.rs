//! sarcore - sampling-and-differencing core shared by Linux performance
//! telemetry tools (iostat/mpstat/pidstat/tapestat/cifsiostat-style
//! front-ends).
//!
//! This crate owns reading kernel counters, holding them across ticks,
//! and deriving rates and percentages from them. It renders nothing and
//! knows nothing about terminals, files on disk, or argument parsing —
//! those are a front-end's job, built on top of [`emit::EmissionSink`].

pub mod average;
pub mod collect;
pub mod derive;
pub mod emit;
pub mod error;
pub mod fs;
pub mod mock;
pub mod model;
pub mod parse;
pub mod registry;
pub mod scheduler;
pub mod statvfs;
