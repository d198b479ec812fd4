//! Parser for `/proc/fs/cifs/Stats`.
//!
//! The file is a sequence of per-share blocks, each starting with a line
//! of the form `N) \\server\share`, followed by free-form counter lines.
//! This parser only extracts the handful of counters the CIFS derivation
//! needs; unrecognized lines within a block are ignored.

use crate::error::ParseError;
use crate::model::CifsRaw;

fn extract_after(line: &str, label: &str) -> Option<u64> {
    let idx = line.find(label)?;
    line[idx + label.len()..]
        .split_whitespace()
        .next()
        .and_then(|s| s.parse().ok())
}

/// Parses every share block into `(share name, counters)` pairs, in file
/// order.
pub fn parse_cifs_stats(content: &str) -> Result<Vec<(String, CifsRaw)>, ParseError> {
    let mut rows = Vec::new();
    let mut current: Option<(String, CifsRaw)> = None;

    for line in content.lines() {
        let trimmed = line.trim();
        if let Some(rest) = trimmed.split_once(')').filter(|(n, _)| n.trim().parse::<u32>().is_ok())
        {
            if let Some(row) = current.take() {
                rows.push(row);
            }
            current = Some((rest.1.trim().to_string(), CifsRaw::default()));
            continue;
        }
        let Some((_, raw)) = current.as_mut() else { continue };
        if let Some(v) = extract_after(trimmed, "Reads:") {
            raw.read_ops = v;
        }
        if let Some(v) = extract_after(trimmed, "Writes:") {
            raw.write_ops = v;
        }
        if let Some(v) = extract_after(trimmed, "Bytes:") {
            // The same label appears on both the Reads and Writes lines;
            // attribute it to whichever counter was just set on this line.
            if trimmed.contains("Reads:") {
                raw.read_bytes = v;
            } else if trimmed.contains("Writes:") {
                raw.write_bytes = v;
            }
        }
        if let Some(v) = extract_after(trimmed, "Opens:") {
            raw.file_opens = v;
        }
        if let Some(v) = extract_after(trimmed, "Closes:") {
            raw.file_closes = v;
        }
        if let Some(v) = extract_after(trimmed, "Deletes:") {
            raw.file_deletes = v;
        }
    }
    if let Some(row) = current.take() {
        rows.push(row);
    }
    if rows.is_empty() {
        return Err(ParseError::new("no CIFS share blocks found"));
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATS: &str = "\
Resources in use
CIFS Session: 1
1) \\\\server\\share1
SMBs: 1000 Oplocks breaks: 0
Reads:  100 Bytes: 4096000
Writes: 50 Bytes: 2048000
Opens: 10 Closes: 8 Deletes: 1
2) \\\\server\\share2
Reads:  5 Bytes: 1024
Writes: 2 Bytes: 512
Opens: 1 Closes: 1 Deletes: 0
";

    #[test]
    fn parses_two_share_blocks() {
        let rows = parse_cifs_stats(STATS).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].0, "\\\\server\\share1");
        assert_eq!(rows[0].1.read_ops, 100);
        assert_eq!(rows[0].1.read_bytes, 4096000);
        assert_eq!(rows[0].1.write_bytes, 2048000);
        assert_eq!(rows[0].1.file_opens, 10);
        assert_eq!(rows[1].1.read_ops, 5);
    }

    #[test]
    fn rejects_content_with_no_share_blocks() {
        assert!(parse_cifs_stats("Resources in use\nCIFS Session: 1\n").is_err());
    }
}
