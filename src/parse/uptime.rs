//! Parser for `/proc/uptime`: the universal interval clock used by every
//! derivation in this crate, expressed in centiseconds.

use crate::error::ParseError;
use crate::model::UptimeRaw;

/// Parses `/proc/uptime`'s two space-separated floating-point seconds
/// fields (system uptime, cumulative idle time summed across CPUs) into
/// centiseconds.
pub fn parse_uptime(content: &str) -> Result<UptimeRaw, ParseError> {
    let mut fields = content.trim().split_whitespace();
    let uptime: f64 = fields
        .next()
        .ok_or_else(|| ParseError::new("missing uptime field"))?
        .parse()
        .map_err(|_| ParseError::new("invalid uptime field"))?;
    let idle: f64 = fields
        .next()
        .ok_or_else(|| ParseError::new("missing idle field"))?
        .parse()
        .map_err(|_| ParseError::new("invalid idle field"))?;
    Ok(UptimeRaw { uptime_cs: (uptime * 100.0).round() as u64, idle_cs: (idle * 100.0).round() as u64 })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_seconds_into_centiseconds() {
        let raw = parse_uptime("12345.67 54321.89\n").unwrap();
        assert_eq!(raw.uptime_cs, 1234567);
        assert_eq!(raw.idle_cs, 5432189);
    }

    #[test]
    fn rejects_empty_content() {
        assert!(parse_uptime("").is_err());
    }
}
