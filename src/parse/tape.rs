//! Parser for `/sys/class/scsi_tape/st<N>/stats/*` counter files.
//!
//! Each counter lives in its own file holding a single decimal integer,
//! unlike the single-file grids elsewhere in `/proc`; the collector
//! (`crate::collect::tape`) reads each file and calls
//! [`parse_counter_file`] per value.

use crate::error::ParseError;

/// Parses a single-line decimal counter file such as
/// `stats/read_ns` or `stats/in_flight`.
pub fn parse_counter_file(content: &str) -> Result<u64, ParseError> {
    content
        .trim()
        .parse()
        .map_err(|_| ParseError::new(format!("invalid tape counter value: {:?}", content.trim())))
}
