//! System-wide collectors: CPU, disks, network interfaces, interrupts,
//! PSI, uptime. Each one reads a single whole-system source file and
//! hands its content to the matching parser.

use super::read_optional;
use crate::error::CollectError;
use crate::fs::FileSystem;
use crate::model::{CpuKey, DiskRaw, IrqRaw, NetRaw, NetSnmpRaw, NetSockstatRaw, PsiRaw, UptimeRaw};
use crate::parse;
use std::path::Path;

/// Reads `<root>/stat`'s `cpu`/`cpu<N>` rows. Always present on Linux; a
/// missing file (e.g. a container without `/proc` mounted) yields an
/// empty list rather than an error.
pub fn read_cpu(fs: &dyn FileSystem, proc_root: &Path) -> Result<Vec<(CpuKey, crate::model::CpuRaw)>, CollectError> {
    match read_optional(fs, &proc_root.join("stat"))? {
        Some(content) => Ok(parse::cpu::parse_stat_cpu_rows(&content)?),
        None => Ok(Vec::new()),
    }
}

/// Reads `<root>/uptime`.
pub fn read_uptime(fs: &dyn FileSystem, proc_root: &Path) -> Result<Option<UptimeRaw>, CollectError> {
    match read_optional(fs, &proc_root.join("uptime"))? {
        Some(content) => Ok(Some(parse::uptime::parse_uptime(&content)?)),
        None => Ok(None),
    }
}

/// Reads `<root>/diskstats`.
pub fn read_diskstats(fs: &dyn FileSystem, proc_root: &Path) -> Result<Vec<(String, DiskRaw)>, CollectError> {
    match read_optional(fs, &proc_root.join("diskstats"))? {
        Some(content) => Ok(parse::disk::parse_diskstats(&content)?),
        None => Ok(Vec::new()),
    }
}

/// Reads `<root>/net/dev`.
pub fn read_net_dev(fs: &dyn FileSystem, proc_root: &Path) -> Result<Vec<(String, NetRaw)>, CollectError> {
    match read_optional(fs, &proc_root.join("net/dev"))? {
        Some(content) => Ok(parse::net::parse_net_dev(&content)?),
        None => Ok(Vec::new()),
    }
}

/// Reads `<root>/net/snmp` (IPv4 traffic/error counters). A kernel built
/// without IPv4 SNMP accounting yields an all-zero record, same as any
/// other "feature absent" source.
pub fn read_net_snmp(fs: &dyn FileSystem, proc_root: &Path) -> Result<NetSnmpRaw, CollectError> {
    Ok(read_optional(fs, &proc_root.join("net/snmp"))?.map(|c| parse::net::parse_net_snmp(&c)).unwrap_or_default())
}

/// Reads `<root>/net/snmp6` (IPv6 traffic/error counters). Absent on an
/// IPv6-disabled host.
pub fn read_net_snmp6(fs: &dyn FileSystem, proc_root: &Path) -> Result<NetSnmpRaw, CollectError> {
    Ok(read_optional(fs, &proc_root.join("net/snmp6"))?.map(|c| parse::net::parse_net_snmp(&c)).unwrap_or_default())
}

/// Reads `<root>/net/sockstat` (IPv4 socket-in-use gauges).
pub fn read_net_sockstat(fs: &dyn FileSystem, proc_root: &Path) -> Result<NetSockstatRaw, CollectError> {
    Ok(read_optional(fs, &proc_root.join("net/sockstat"))?.map(|c| parse::net::parse_net_sockstat(&c)).unwrap_or_default())
}

/// Reads `<root>/net/sockstat6` (IPv6 socket-in-use gauges).
pub fn read_net_sockstat6(fs: &dyn FileSystem, proc_root: &Path) -> Result<NetSockstatRaw, CollectError> {
    Ok(read_optional(fs, &proc_root.join("net/sockstat6"))?.map(|c| parse::net::parse_net_sockstat(&c)).unwrap_or_default())
}

/// Reads `<root>/interrupts`.
pub fn read_interrupts(fs: &dyn FileSystem, proc_root: &Path) -> Result<Vec<(String, IrqRaw)>, CollectError> {
    match read_optional(fs, &proc_root.join("interrupts"))? {
        Some(content) => Ok(parse::irq::parse_irq_grid(&content)?),
        None => Ok(Vec::new()),
    }
}

/// Reads `<root>/softirqs`.
pub fn read_softirqs(fs: &dyn FileSystem, proc_root: &Path) -> Result<Vec<(String, IrqRaw)>, CollectError> {
    match read_optional(fs, &proc_root.join("softirqs"))? {
        Some(content) => Ok(parse::irq::parse_irq_grid(&content)?),
        None => Ok(Vec::new()),
    }
}

/// Reads `<root>/pressure/<domain>`, where `domain` is `cpu`, `io` or
/// `memory`. Absent on kernels without `CONFIG_PSI`.
pub fn read_psi(fs: &dyn FileSystem, proc_root: &Path, domain: &str) -> Result<Option<PsiRaw>, CollectError> {
    match read_optional(fs, &proc_root.join("pressure").join(domain))? {
        Some(content) => Ok(Some(parse::psi::parse_psi(&content)?)),
        None => Ok(None),
    }
}
