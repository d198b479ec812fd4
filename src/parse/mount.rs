//! Parser for `/etc/mtab`.
//!
//! Mount points containing spaces, tabs, backslashes or newlines are
//! octal-escaped by the kernel/mount tooling (e.g. `/mnt/my\040disk` for
//! `/mnt/my disk`); this parser decodes those escapes before handing the
//! mount point back to callers.

use crate::error::ParseError;

/// One `/etc/mtab` row: device/share spec, decoded mount point,
/// filesystem type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountEntry {
    pub device: String,
    pub mount_point: String,
    pub fs_type: String,
}

/// Decodes `\NNN` octal escapes in a mtab field.
fn decode_octal_escapes(field: &str) -> String {
    let bytes = field.as_bytes();
    let mut out = String::with_capacity(field.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' && i + 3 < bytes.len() {
            let digits = &field[i + 1..i + 4];
            if digits.bytes().all(|b| (b'0'..=b'7').contains(&b)) {
                if let Ok(value) = u8::from_str_radix(digits, 8) {
                    out.push(value as char);
                    i += 4;
                    continue;
                }
            }
        }
        out.push(bytes[i] as char);
        i += 1;
    }
    out
}

/// Parses `/etc/mtab`, returning one entry per mounted filesystem in
/// file order.
pub fn parse_mtab(content: &str) -> Result<Vec<MountEntry>, ParseError> {
    let mut rows = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut fields = line.split_whitespace();
        let device = fields.next().ok_or_else(|| ParseError::new("mtab row missing device"))?;
        let mount_point =
            fields.next().ok_or_else(|| ParseError::new("mtab row missing mount point"))?;
        let fs_type = fields.next().ok_or_else(|| ParseError::new("mtab row missing fstype"))?;
        rows.push(MountEntry {
            device: decode_octal_escapes(device),
            mount_point: decode_octal_escapes(mount_point),
            fs_type: fs_type.to_string(),
        });
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_space_escape_in_mount_point() {
        let content = "/dev/sdb1 /mnt/my\\040disk ext4 rw,relatime 0 0\n";
        let rows = parse_mtab(content).unwrap();
        assert_eq!(rows[0].mount_point, "/mnt/my disk");
    }

    #[test]
    fn parses_plain_row() {
        let content = "/dev/sda1 / ext4 rw,relatime 0 1\n";
        let rows = parse_mtab(content).unwrap();
        assert_eq!(rows[0].device, "/dev/sda1");
        assert_eq!(rows[0].mount_point, "/");
        assert_eq!(rows[0].fs_type, "ext4");
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let content = "# comment\n\n/dev/sda1 / ext4 rw 0 1\n";
        let rows = parse_mtab(content).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn rejects_truncated_row() {
        assert!(parse_mtab("/dev/sda1\n").is_err());
    }
}
