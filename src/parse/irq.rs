//! Parser for `/proc/interrupts` and `/proc/softirqs`.
//!
//! Both files share a layout: a header row naming the CPU columns,
//! followed by one row per interrupt with a `<name>:` label, one counter
//! per CPU column, and (for `/proc/interrupts` only) a trailing
//! free-text description that this parser ignores.

use crate::error::ParseError;
use crate::model::IrqRaw;

/// Parses an interrupt grid into `(name, per-cpu counts)` rows, in file
/// order. `name` includes the original label without the trailing colon
/// (e.g. `"0"`, `"NMI"`, `"TIMER"`).
pub fn parse_irq_grid(content: &str) -> Result<Vec<(String, IrqRaw)>, ParseError> {
    let mut lines = content.lines();
    let header = lines
        .next()
        .ok_or_else(|| ParseError::new("empty interrupt grid"))?;
    let ncpus = header.split_whitespace().filter(|f| f.starts_with("CPU")).count();
    if ncpus == 0 {
        return Err(ParseError::new("interrupt grid header has no CPU columns"));
    }

    let mut rows = Vec::new();
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some(colon) = line.find(':') else { continue };
        let mut name = line[..colon].trim().to_string();
        if name.is_empty() {
            continue;
        }
        name.truncate(15);
        let per_cpu: Vec<u64> = line[colon + 1..]
            .split_whitespace()
            .take(ncpus)
            .map(|f| f.parse::<u64>().unwrap_or(0))
            .collect();
        rows.push((name, IrqRaw { per_cpu }));
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERRUPTS: &str = "\
            CPU0       CPU1
  0:         45          0   IO-APIC   2-edge      timer
  1:          0          5   IO-APIC   1-edge      i8042
NMI:          3          2   Non-maskable interrupts
";

    const SOFTIRQS: &str = "\
            CPU0       CPU1
      HI:          0          0
   TIMER:      10000      20000
";

    #[test]
    fn parses_interrupts_with_description() {
        let rows = parse_irq_grid(INTERRUPTS).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].0, "0");
        assert_eq!(rows[0].1.per_cpu, vec![45, 0]);
        assert_eq!(rows[2].0, "NMI");
        assert_eq!(rows[2].1.per_cpu, vec![3, 2]);
    }

    #[test]
    fn parses_softirqs_without_description() {
        let rows = parse_irq_grid(SOFTIRQS).unwrap();
        assert_eq!(rows[1].0, "TIMER");
        assert_eq!(rows[1].1.per_cpu, vec![10000, 20000]);
    }

    #[test]
    fn rejects_header_without_cpu_columns() {
        assert!(parse_irq_grid("nonsense\n").is_err());
    }
}
