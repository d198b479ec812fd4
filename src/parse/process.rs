//! Parsers for `/proc/<pid>/{stat,status,io,schedstat}`.

use crate::error::ParseError;

/// Fields pulled out of `/proc/<pid>/stat`. The `comm` field is
/// parenthesized and may itself contain spaces or parentheses, so it is
/// located by the outermost `(`/`)` pair rather than positional
/// splitting, exactly as the kernel documents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskStat {
    pub pid: u32,
    pub comm: String,
    pub state: char,
    pub ppid: u32,
    pub minflt: u64,
    pub cminflt: u64,
    pub majflt: u64,
    pub cmajflt: u64,
    pub utime: u64,
    pub stime: u64,
    pub cutime: i64,
    pub cstime: i64,
    pub priority: i32,
    pub num_threads: u32,
    pub starttime: u64,
    pub vsize: u64,
    pub rss: i64,
    pub processor: i32,
    pub policy: u32,
    pub gtime: u64,
    pub cgtime: i64,
}

/// Parses `/proc/<pid>/stat`. Kernels predating guest-time accounting
/// omit the trailing `guest_time`/`cguest_time` fields; they are treated
/// as zero rather than an error.
pub fn parse_task_stat(content: &str) -> Result<TaskStat, ParseError> {
    let content = content.trim();
    let open = content.find('(').ok_or_else(|| ParseError::new("missing '(' in stat"))?;
    let close = content.rfind(')').ok_or_else(|| ParseError::new("missing ')' in stat"))?;
    if close <= open {
        return Err(ParseError::new("invalid parentheses in stat"));
    }

    let pid: u32 = content[..open]
        .trim()
        .parse()
        .map_err(|_| ParseError::new("invalid pid in stat"))?;
    let comm = content[open + 1..close].to_string();

    let fields: Vec<&str> = content[close + 1..].split_whitespace().collect();
    if fields.len() < 17 {
        return Err(ParseError::new(format!(
            "stat for pid {pid} has {} fields after comm, expected 17+",
            fields.len()
        )));
    }

    let state = fields[0].chars().next().unwrap_or('?');
    let parse_at = |idx: usize| -> Result<i64, ParseError> {
        fields
            .get(idx)
            .ok_or_else(|| ParseError::new(format!("missing stat field {idx}")))?
            .parse()
            .map_err(|_| ParseError::new(format!("invalid stat field {idx}")))
    };
    let opt_u64 = |idx: usize| -> u64 { fields.get(idx).and_then(|s| s.parse().ok()).unwrap_or(0) };
    let opt_i64 = |idx: usize| -> i64 { fields.get(idx).and_then(|s| s.parse().ok()).unwrap_or(0) };

    Ok(TaskStat {
        pid,
        comm,
        state,
        ppid: parse_at(1)? as u32,
        minflt: parse_at(7)? as u64,
        cminflt: parse_at(8)? as u64,
        majflt: parse_at(9)? as u64,
        cmajflt: parse_at(10)? as u64,
        utime: parse_at(11)? as u64,
        stime: parse_at(12)? as u64,
        cutime: parse_at(13)?,
        cstime: parse_at(14)?,
        priority: parse_at(15)? as i32,
        num_threads: parse_at(17)? as u32,
        starttime: opt_u64(19),
        vsize: opt_u64(20),
        rss: opt_i64(21),
        processor: opt_i64(36) as i32,
        policy: opt_u64(38) as u32,
        gtime: opt_u64(40),
        cgtime: opt_i64(41),
    })
}

/// Pulls `voluntary_ctxt_switches`/`nonvoluntary_ctxt_switches` out of
/// `/proc/<pid>/status`. Returns `(nvcsw, nivcsw)`, defaulting missing
/// fields to zero (older kernels built without `CONFIG_SCHEDSTATS`).
pub fn parse_task_status_ctxt_switches(content: &str) -> (u64, u64) {
    let mut nvcsw = 0;
    let mut nivcsw = 0;
    for line in content.lines() {
        if let Some(rest) = line.strip_prefix("voluntary_ctxt_switches:") {
            nvcsw = rest.trim().parse().unwrap_or(0);
        } else if let Some(rest) = line.strip_prefix("nonvoluntary_ctxt_switches:") {
            nivcsw = rest.trim().parse().unwrap_or(0);
        }
    }
    (nvcsw, nivcsw)
}

/// Parsed `/proc/<pid>/io` counters.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TaskIo {
    pub read_bytes: u64,
    pub write_bytes: u64,
    pub cancelled_write_bytes: u64,
}

/// Parses `/proc/<pid>/io`. Missing lines (a field set that changes
/// across kernel versions) default to zero rather than erroring.
pub fn parse_task_io(content: &str) -> TaskIo {
    let mut io = TaskIo::default();
    for line in content.lines() {
        if let Some(rest) = line.strip_prefix("read_bytes:") {
            io.read_bytes = rest.trim().parse().unwrap_or(0);
        } else if let Some(rest) = line.strip_prefix("write_bytes:") {
            io.write_bytes = rest.trim().parse().unwrap_or(0);
        } else if let Some(rest) = line.strip_prefix("cancelled_write_bytes:") {
            io.cancelled_write_bytes = rest.trim().parse().unwrap_or(0);
        }
    }
    io
}

/// Parses `/proc/<pid>/schedstat`'s three whitespace-separated
/// nanosecond/count fields, returning the run-queue wait time (second
/// field).
pub fn parse_task_schedstat(content: &str) -> Result<u64, ParseError> {
    let fields: Vec<&str> = content.split_whitespace().collect();
    fields
        .get(1)
        .ok_or_else(|| ParseError::new("schedstat missing wait-time field"))?
        .parse()
        .map_err(|_| ParseError::new("invalid schedstat wait-time field"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_stat_with_simple_comm() {
        let content = "1234 (bash) S 1 1234 1234 0 -1 4194304 100 0 0 0 50 20 0 0 20 0 1 0 \
                        99999 10240000 512 18446744073709551615 1 1 0 0 0 0 0 0 0 0 0 0 17 2 \
                        0 0 0 0 0 0 0 0 0 0 0 0 0\n";
        let stat = parse_task_stat(content).unwrap();
        assert_eq!(stat.pid, 1234);
        assert_eq!(stat.comm, "bash");
        assert_eq!(stat.state, 'S');
        assert_eq!(stat.utime, 50);
        assert_eq!(stat.stime, 20);
        assert_eq!(stat.num_threads, 1);
        assert_eq!(stat.processor, 2);
    }

    #[test]
    fn parses_comm_containing_parentheses_and_spaces() {
        let content = "1234 (my (weird) proc) S 1 0 0 0 -1 0 0 0 0 0 10 5 0 0 20 0 2 0 0 0 0 \
                        0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0\n";
        let stat = parse_task_stat(content).unwrap();
        assert_eq!(stat.comm, "my (weird) proc");
    }

    #[test]
    fn rejects_missing_parens() {
        assert!(parse_task_stat("1234 bash S 1 0\n").is_err());
    }

    #[test]
    fn status_defaults_missing_ctxt_switches_to_zero() {
        let (nvcsw, nivcsw) = parse_task_status_ctxt_switches("Name:\tbash\n");
        assert_eq!((nvcsw, nivcsw), (0, 0));
    }

    #[test]
    fn status_parses_ctxt_switches() {
        let content = "voluntary_ctxt_switches:\t42\nnonvoluntary_ctxt_switches:\t7\n";
        assert_eq!(parse_task_status_ctxt_switches(content), (42, 7));
    }

    #[test]
    fn parses_io_counters() {
        let content = "rchar: 100\nwchar: 200\nsyscr: 1\nsyscw: 2\nread_bytes: 4096\n\
                        write_bytes: 8192\ncancelled_write_bytes: 0\n";
        let io = parse_task_io(content);
        assert_eq!(io.read_bytes, 4096);
        assert_eq!(io.write_bytes, 8192);
    }

    #[test]
    fn parses_schedstat_wait_time() {
        assert_eq!(parse_task_schedstat("123456 7890 42\n").unwrap(), 7890);
    }
}
