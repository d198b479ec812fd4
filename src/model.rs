//! Raw counter snapshots and small derived-value types shared across the
//! readers, the registry and the derivation library: one struct per
//! `/proc`/`/sys` source, fields named after the kernel counter they
//! hold, with the sourcing file noted in the doc comment.

use serde::{Deserialize, Serialize};

/// Identifies a CPU row: the kernel-provided aggregate ("all", `cpu`
/// line) or one logical CPU. Ordered so `All` always sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CpuKey {
    All,
    Cpu(u32),
}

/// Raw jiffy counters for one CPU row from `/proc/stat`.
/// Source: `/proc/stat`, lines `cpu` / `cpu<N>`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CpuRaw {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub iowait: u64,
    pub irq: u64,
    pub softirq: u64,
    pub steal: u64,
    pub guest: u64,
    pub guest_nice: u64,
}

/// A NUMA node index, or the kernel-provided aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NodeKey {
    All,
    Node(u32),
}

/// Kind of interrupt grid a row comes from. Both share the same per-CPU
/// count shape; only the source file differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IrqKind {
    Hardware,
    Soft,
}

/// One row of `/proc/interrupts` or `/proc/softirqs`: a named interrupt
/// and its cumulative count on every CPU column, in the column order the
/// reader observed this tick. Source: `/proc/interrupts`, `/proc/softirqs`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IrqRaw {
    /// Per-CPU cumulative counts, indexed by CPU column position.
    pub per_cpu: Vec<u64>,
}

/// Raw counters for one block device row.
/// Source: `/proc/diskstats` (14-field or 18-field layout) or
/// `/sys/block/<dev>/stat`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DiskRaw {
    pub major: u32,
    pub minor: u32,
    pub rd_ios: u64,
    pub rd_merges: u64,
    pub rd_sectors: u64,
    pub rd_ticks: u64,
    pub wr_ios: u64,
    pub wr_merges: u64,
    pub wr_sectors: u64,
    pub wr_ticks: u64,
    pub ios_in_progress: u64,
    pub tot_ticks: u64,
    pub rq_ticks: u64,
    /// Discard counters, present on 18+-field kernels; zero otherwise.
    pub dc_ios: u64,
    pub dc_merges: u64,
    pub dc_sectors: u64,
    pub dc_ticks: u64,
    /// Flush counters, present on 20-field kernels; zero otherwise.
    pub fl_ios: u64,
    pub fl_ticks: u64,
}

/// Raw counters for one network interface row.
/// Source: `/proc/net/dev`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NetRaw {
    pub rx_bytes: u64,
    pub rx_packets: u64,
    pub rx_errs: u64,
    pub rx_drop: u64,
    pub rx_fifo: u64,
    pub rx_frame: u64,
    pub rx_compressed: u64,
    pub rx_multicast: u64,
    pub tx_bytes: u64,
    pub tx_packets: u64,
    pub tx_errs: u64,
    pub tx_drop: u64,
    pub tx_fifo: u64,
    pub tx_colls: u64,
    pub tx_carrier: u64,
    pub tx_compressed: u64,
}

/// Counters pulled from `/proc/net/snmp` (IPv4) or `/proc/net/snmp6`
/// (IPv6), a small selection of the fields each protocol block exposes —
/// the ones the traffic-rate and error-rate derivations need. Source:
/// `/proc/net/snmp`, `/proc/net/snmp6`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NetSnmpRaw {
    pub ip_in_receives: u64,
    pub ip_out_requests: u64,
    pub ip_forw_datagrams: u64,
    pub ip_in_delivers: u64,
    pub icmp_in_msgs: u64,
    pub icmp_out_msgs: u64,
    pub tcp_active_opens: u64,
    pub tcp_passive_opens: u64,
    pub tcp_in_segs: u64,
    pub tcp_out_segs: u64,
    pub tcp_retrans_segs: u64,
    pub tcp_curr_estab: u64,
    pub udp_in_datagrams: u64,
    pub udp_out_datagrams: u64,
    pub udp_no_ports: u64,
    pub udp_in_errors: u64,
}

/// Socket-in-use gauges from `/proc/net/sockstat` or `/proc/net/sockstat6`.
/// Unlike [`NetSnmpRaw`]'s fields these are point-in-time counts, not
/// monotonic counters, except `tcp_tw` which the kernel does treat as a
/// live gauge too. Source: `/proc/net/sockstat`, `/proc/net/sockstat6`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NetSockstatRaw {
    pub sock_inuse: u64,
    pub tcp_inuse: u64,
    pub tcp_tw: u64,
    pub udp_inuse: u64,
    pub raw_inuse: u64,
    pub frag_inuse: u64,
}

/// Identifies a task row: the leading thread of a process is `tid == tgid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TaskKey {
    pub tgid: u32,
    pub tid: u32,
}

impl TaskKey {
    pub fn process(pid: u32) -> Self {
        Self { tgid: pid, tid: pid }
    }

    pub fn thread(tgid: u32, tid: u32) -> Self {
        Self { tgid, tid }
    }

    pub fn is_thread(&self) -> bool {
        self.tgid != self.tid
    }
}

/// Raw per-task counters.
/// Source: `/proc/<pid>/stat`, `/proc/<pid>/status`, `/proc/<pid>/io`,
/// `/proc/<pid>/schedstat`, `/proc/<pid>/fd/`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskRaw {
    pub utime: u64,
    pub stime: u64,
    pub cutime: i64,
    pub cstime: i64,
    pub gtime: u64,
    pub cgtime: i64,
    pub minflt: u64,
    pub cminflt: u64,
    pub majflt: u64,
    pub cmajflt: u64,
    pub vsz: u64,
    pub rss: i64,
    pub processor: i32,
    pub priority: i32,
    pub policy: u32,
    pub nvcsw: u64,
    pub nivcsw: u64,
    pub sched_wait_ns: u64,
    pub read_bytes: u64,
    pub write_bytes: u64,
    pub cancelled_write_bytes: u64,
    pub fd_count: u32,
    pub num_threads: u32,
    /// Set when `/proc/<pid>/io` could not be read (permission denied);
    /// the IO fields above are then left at zero rather than re-attempted.
    pub io_unreadable: bool,
}

/// Gauge-style filesystem usage, not differenced between ticks.
/// Source: `/etc/mtab` + `statvfs(2)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FsRaw {
    pub f_blocks: u64,
    pub f_bfree: u64,
    pub f_bavail: u64,
    pub f_files: u64,
    pub f_ffree: u64,
    pub frsize: u64,
}

/// Raw counters for one tape drive, plus the wall-clock timestamp the
/// snapshot was taken at (tape throughput is wall-clock-derived, not
/// uptime-derived, since sysfs counters carry no interval clock of
/// their own).
/// Source: `/sys/class/scsi_tape/st<N>/stats/*`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TapeRaw {
    pub read_ns: u64,
    pub write_ns: u64,
    pub io_ns: u64,
    pub read_bytes: u64,
    pub write_bytes: u64,
    pub read_cnt: u64,
    pub write_cnt: u64,
    pub other_cnt: u64,
    pub resid_cnt: u64,
    pub timestamp_ms: i64,
    /// Set when any stats file failed to read; the whole row is then
    /// invalid for this tick.
    pub invalid: bool,
}

/// Raw counters for one CIFS mount.
/// Source: `/proc/fs/cifs/Stats`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CifsRaw {
    pub read_ops: u64,
    pub write_ops: u64,
    pub read_bytes: u64,
    pub write_bytes: u64,
    pub file_opens: u64,
    pub file_closes: u64,
    pub file_deletes: u64,
}

/// PSI resource domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PsiDomain {
    Cpu,
    Io,
    Memory,
}

/// One `some`/`full` line of a PSI file: three rolling averages (percent
/// times 100) plus a cumulative microsecond total.
/// Source: `/proc/pressure/{cpu,io,memory}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PsiLine {
    pub avg10: f64,
    pub avg60: f64,
    pub avg300: f64,
    pub total_us: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PsiRaw {
    pub some: PsiLine,
    /// `full` is absent for the `cpu` domain on most kernels.
    pub full: Option<PsiLine>,
}

/// System-wide uptime, in centiseconds, from `/proc/uptime`. Used as the
/// universal interval clock every derivation measures elapsed time
/// against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UptimeRaw {
    pub uptime_cs: u64,
    pub idle_cs: u64,
}
