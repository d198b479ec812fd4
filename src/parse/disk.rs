//! Parser for `/proc/diskstats`.
//!
//! Three layouts exist depending on kernel version: the original 14-field
//! layout (no discard counters), the 18-field layout (adds discard
//! counters), and the 20-field layout (adds flush counters). All three
//! share the same first 14 fields, so the extra columns are read only
//! when present rather than erroring out.

use crate::error::ParseError;
use crate::model::DiskRaw;

/// Parses every row of `/proc/diskstats` into `(device name, raw
/// counters)` pairs, preserving file order.
pub fn parse_diskstats(content: &str) -> Result<Vec<(String, DiskRaw)>, ParseError> {
    let mut rows = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 14 {
            return Err(ParseError::new(format!(
                "diskstats row has {} fields, expected at least 14",
                fields.len()
            )));
        }
        let major: u32 = fields[0].parse().map_err(|_| ParseError::new("invalid major"))?;
        let minor: u32 = fields[1].parse().map_err(|_| ParseError::new("invalid minor"))?;
        let name = fields[2].to_string();

        let u = |i: usize| -> Result<u64, ParseError> {
            fields
                .get(i)
                .ok_or_else(|| ParseError::new(format!("missing diskstats field {i}")))?
                .parse()
                .map_err(|_| ParseError::new(format!("invalid diskstats field {i}")))
        };
        let opt_u = |i: usize| -> u64 { fields.get(i).and_then(|s| s.parse().ok()).unwrap_or(0) };

        let raw = DiskRaw {
            major,
            minor,
            rd_ios: u(3)?,
            rd_merges: u(4)?,
            rd_sectors: u(5)?,
            rd_ticks: u(6)?,
            wr_ios: u(7)?,
            wr_merges: u(8)?,
            wr_sectors: u(9)?,
            wr_ticks: u(10)?,
            ios_in_progress: u(11)?,
            tot_ticks: u(12)?,
            rq_ticks: u(13)?,
            dc_ios: opt_u(14),
            dc_merges: opt_u(15),
            dc_sectors: opt_u(16),
            dc_ticks: opt_u(17),
            fl_ios: opt_u(18),
            fl_ticks: opt_u(19),
        };
        rows.push((name, raw));
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_14_field_layout() {
        let content = "   8       0 sda 100 20 4000 300 80 10 3000 200 0 400 500\n";
        let rows = parse_diskstats(content).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].0, "sda");
        assert_eq!(rows[0].1.rd_ios, 100);
        assert_eq!(rows[0].1.dc_ios, 0);
    }

    #[test]
    fn parses_18_field_layout_with_discards() {
        let content =
            "   8       1 sda1 100 20 4000 300 80 10 3000 200 0 400 500 5 1 200 10\n";
        let rows = parse_diskstats(content).unwrap();
        assert_eq!(rows[0].1.dc_ios, 5);
        assert_eq!(rows[0].1.dc_ticks, 10);
        assert_eq!(rows[0].1.fl_ios, 0);
    }

    #[test]
    fn parses_20_field_layout_with_flush() {
        let content =
            "  253       0 dm-0 100 20 4000 300 80 10 3000 200 0 400 500 5 1 200 10 2 30\n";
        let rows = parse_diskstats(content).unwrap();
        assert_eq!(rows[0].1.fl_ios, 2);
        assert_eq!(rows[0].1.fl_ticks, 30);
    }

    #[test]
    fn rejects_too_few_fields() {
        let content = "8 0 sda 1 2 3\n";
        assert!(parse_diskstats(content).is_err());
    }
}
