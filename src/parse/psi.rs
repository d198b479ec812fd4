//! Parser for `/proc/pressure/{cpu,io,memory}`.

use crate::error::ParseError;
use crate::model::{PsiLine, PsiRaw};

fn parse_line(line: &str) -> Result<PsiLine, ParseError> {
    let mut out = PsiLine::default();
    for field in line.split_whitespace().skip(1) {
        let (key, value) = field
            .split_once('=')
            .ok_or_else(|| ParseError::new(format!("malformed psi field: {field}")))?;
        match key {
            "avg10" => out.avg10 = value.parse().map_err(|_| ParseError::new("invalid avg10"))?,
            "avg60" => out.avg60 = value.parse().map_err(|_| ParseError::new("invalid avg60"))?,
            "avg300" => {
                out.avg300 = value.parse().map_err(|_| ParseError::new("invalid avg300"))?
            }
            "total" => {
                out.total_us = value.parse().map_err(|_| ParseError::new("invalid total"))?
            }
            _ => {}
        }
    }
    Ok(out)
}

/// Parses a PSI file's `some` line, and its `full` line when present (the
/// `cpu` domain has no `full` line on most kernels).
pub fn parse_psi(content: &str) -> Result<PsiRaw, ParseError> {
    let mut some = None;
    let mut full = None;
    for line in content.lines() {
        if let Some(rest) = line.strip_prefix("some") {
            some = Some(parse_line(&format!("some{rest}"))?);
        } else if let Some(rest) = line.strip_prefix("full") {
            full = Some(parse_line(&format!("full{rest}"))?);
        }
    }
    let some = some.ok_or_else(|| ParseError::new("missing 'some' line"))?;
    Ok(PsiRaw { some, full })
}
