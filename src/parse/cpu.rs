//! Parser for `/proc/stat`'s `cpu`/`cpu<N>` rows.

use crate::error::ParseError;
use crate::model::{CpuKey, CpuRaw};

/// Parses every `cpu`/`cpu<N>` line of `/proc/stat`. Lines for other
/// counters (`intr`, `ctxt`, `btime`, `processes`, ...) are ignored here;
/// see [`super::uptime`] and the IRQ parser for those.
///
/// Kernels before guest-time accounting was added report only 8 fields;
/// missing trailing fields are treated as zero rather than an error,
/// since the row's layout only ever grows new trailing counters across
/// kernel versions.
pub fn parse_stat_cpu_rows(content: &str) -> Result<Vec<(CpuKey, CpuRaw)>, ParseError> {
    let mut rows = Vec::new();
    for line in content.lines() {
        let mut fields = line.split_whitespace();
        let Some(label) = fields.next() else { continue };
        if !label.starts_with("cpu") {
            continue;
        }
        let key = if label == "cpu" {
            CpuKey::All
        } else {
            match label[3..].parse::<u32>() {
                Ok(n) => CpuKey::Cpu(n),
                Err(_) => continue,
            }
        };
        let values: Vec<u64> = fields.filter_map(|f| f.parse::<u64>().ok()).collect();
        if values.len() < 4 {
            return Err(ParseError::new(format!("cpu row {label} has too few fields")));
        }
        let get = |i: usize| values.get(i).copied().unwrap_or(0);
        rows.push((
            key,
            CpuRaw {
                user: get(0),
                nice: get(1),
                system: get(2),
                idle: get(3),
                iowait: get(4),
                irq: get(5),
                softirq: get(6),
                steal: get(7),
                guest: get(8),
                guest_nice: get(9),
            },
        ));
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STAT: &str = "\
cpu  1000 200 500 9000 50 10 5 0 30 0
cpu0 500 100 250 4500 25 5 2 0 15 0
cpu1 500 100 250 4500 25 5 3 0 15 0
intr 12345 0 0 0
ctxt 98765
btime 1700000000
processes 4321
";

    #[test]
    fn parses_aggregate_and_per_cpu_rows() {
        let rows = parse_stat_cpu_rows(STAT).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].0, CpuKey::All);
        assert_eq!(rows[0].1.user, 1000);
        assert_eq!(rows[1].0, CpuKey::Cpu(0));
        assert_eq!(rows[2].0, CpuKey::Cpu(1));
    }

    #[test]
    fn tolerates_missing_guest_fields() {
        let content = "cpu 1 2 3 4 5 6 7 8\n";
        let rows = parse_stat_cpu_rows(content).unwrap();
        assert_eq!(rows[0].1.guest, 0);
        assert_eq!(rows[0].1.guest_nice, 0);
        assert_eq!(rows[0].1.steal, 8);
    }

    #[test]
    fn rejects_truncated_row() {
        let content = "cpu 1 2\n";
        assert!(parse_stat_cpu_rows(content).is_err());
    }

    #[test]
    fn ignores_non_cpu_lines() {
        let rows = parse_stat_cpu_rows("ctxt 123\nbtime 456\n").unwrap();
        assert!(rows.is_empty());
    }
}
