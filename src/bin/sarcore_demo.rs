//! Thin command-line harness over `sarcore`: wires the scheduler,
//! collectors, registry and derivation library together and prints CPU
//! and disk rows to stdout. Argument parsing is the only thing this
//! binary does that the library itself refuses to — `clap` stays out of
//! the library crate so every front-end can choose its own CLI surface.

use clap::Parser;
use sarcore::collect::system::{read_cpu, read_diskstats, read_uptime};
use sarcore::derive::{cpu as derive_cpu, disk as derive_disk};
use sarcore::emit::{EmissionSink, Field, NullSink};
use sarcore::fs::RealFs;
use sarcore::model::CpuKey;
use sarcore::registry::EntityRegistry;
use sarcore::scheduler::{Scheduler, SchedulerConfig};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Samples CPU and disk activity and prints derived rates, the way
/// `iostat`/`mpstat` do, minus their rendering layer.
#[derive(Parser)]
#[command(name = "sarcore-demo", about = "Minimal front-end over the sarcore sampling engine", version)]
struct Args {
    /// Seconds between samples. 0 means "since boot": one sample only.
    #[arg(default_value = "1")]
    interval: u64,

    /// Number of samples to take. Omit to run until interrupted.
    count: Option<u32>,

    /// Path to the `/proc` tree to read from.
    #[arg(long, default_value = "/proc")]
    proc_path: String,
}

fn print_row(entity_kind: &str, key: &str, fields: &[Field<'_>]) {
    let rendered: Vec<String> = fields.iter().map(|f| format!("{}={:.2}", f.name, f.value)).collect();
    println!("{entity_kind:<8} {key:<8} {}", rendered.join(" "));
}

fn main() {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let args = Args::parse();
    let proc_root = PathBuf::from(&args.proc_path);
    let fs = RealFs::new();

    let config = SchedulerConfig {
        interval_cs: args.interval * 100,
        count: args.count,
        skip_first_sample: false,
    };
    let scheduler = Scheduler::new(config);
    if let Err(e) = scheduler.install_signal_handler() {
        warn!("failed to install signal handler: {e}");
    }

    let mut cpu_registry: EntityRegistry<CpuKey, sarcore::model::CpuRaw> = EntityRegistry::new();
    let mut disk_registry: EntityRegistry<String, sarcore::model::DiskRaw> = EntityRegistry::new();
    let mut sink = NullSink;
    let mut prev_uptime_cs: Option<u64> = None;

    let result = scheduler.run(|is_first| {
        let uptime = match read_uptime(&fs, &proc_root) {
            Ok(Some(u)) => u,
            Ok(None) => {
                warn!("/proc/uptime not available; skipping tick");
                return Ok(());
            }
            Err(e) => {
                warn!("failed to read uptime: {e}");
                return Ok(());
            }
        };
        let interval_cs = prev_uptime_cs.map(|p| uptime.uptime_cs.saturating_sub(p)).unwrap_or(0);
        prev_uptime_cs = Some(uptime.uptime_cs);

        cpu_registry.mark_all_absent();
        match read_cpu(&fs, &proc_root) {
            Ok(rows) => {
                for (key, raw) in rows {
                    cpu_registry.lookup_or_insert(key, raw);
                }
            }
            Err(e) => warn!("failed to read CPU stats: {e}"),
        }
        cpu_registry.reap_absent();

        disk_registry.mark_all_absent();
        match read_diskstats(&fs, &proc_root) {
            Ok(rows) => {
                for (name, raw) in rows {
                    disk_registry.lookup_or_insert(name, raw);
                }
            }
            Err(e) => warn!("failed to read diskstats: {e}"),
        }
        disk_registry.reap_absent();

        if is_first {
            info!("baseline sample taken, interval={interval_cs}cs");
            return Ok(());
        }

        sink.begin_sample(interval_cs)?;
        for (key, prev, curr) in cpu_registry.iter_derivable() {
            let pct = derive_cpu::derive_percent(prev, curr);
            let key_str = match key {
                CpuKey::All => "all".to_string(),
                CpuKey::Cpu(n) => n.to_string(),
            };
            let fields = [
                Field::new("user", pct.user),
                Field::new("system", pct.system),
                Field::new("iowait", pct.iowait),
                Field::new("idle", pct.idle),
            ];
            print_row("cpu", &key_str, &fields);
            sink.record("cpu", &key_str, &fields)?;
        }
        for (name, prev, curr) in disk_registry.iter_derivable() {
            let d = derive_disk::derive(prev, curr, interval_cs);
            let fields = [
                Field::new("r/s", d.reads_per_s),
                Field::new("w/s", d.writes_per_s),
                Field::new("util", d.util_percent),
            ];
            print_row("disk", name, &fields);
            sink.record("disk", name, &fields)?;
        }
        sink.end_sample()
    });

    if let Err(e) = result {
        eprintln!("fatal: {e}");
        std::process::exit(e.exit_code());
    }
}
