use crate::resource::ResourceKind;
use crate::thread::ThreadId;
use log::warn;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

/// Append-only audit trail for resource use, one file per resource.
///
/// `use_cpu` and `use_io` stand in for the real work: they write one audit
/// line and then block the calling driver for the simulated duration. A
/// failed write is reported and the duration still elapses, so a logging
/// fault never corrupts scheduling state.
pub struct AuditLog {
    cpu_path: PathBuf,
    io_path: PathBuf,
}

impl AuditLog {
    pub fn new(cpu_path: impl Into<PathBuf>, io_path: impl Into<PathBuf>) -> Self {
        Self {
            cpu_path: cpu_path.into(),
            io_path: io_path.into(),
        }
    }

    pub fn use_cpu(&self, label: &str, id: ThreadId, ms: u64) {
        self.use_resource(ResourceKind::Cpu, label, id, ms);
    }

    pub fn use_io(&self, label: &str, id: ThreadId, ms: u64) {
        self.use_resource(ResourceKind::Io, label, id, ms);
    }

    fn use_resource(&self, kind: ResourceKind, label: &str, id: ThreadId, ms: u64) {
        let path = match kind {
            ResourceKind::Cpu => &self.cpu_path,
            ResourceKind::Io => &self.io_path,
        };
        let line = format!("{label} ID:{id} {} Time:{ms}ms", kind.label());
        if let Err(err) = append_line(path, &line) {
            warn!(
                "failed to write {} audit line to {}: {err}",
                kind.label(),
                path.display()
            );
        }
        thread::sleep(Duration::from_millis(ms));
    }
}

impl Default for AuditLog {
    fn default() -> Self {
        Self::new("cpu.txt", "io.txt")
    }
}

fn append_line(path: &Path, line: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new().append(true).create(true).open(path)?;
    writeln!(file, "{line}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_file(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("timeslice-audit-{}-{name}", std::process::id()));
        let _ = fs::remove_file(&path);
        path
    }

    #[test]
    fn appends_one_line_per_use() {
        let cpu = temp_file("cpu.txt");
        let io = temp_file("io.txt");
        let audit = AuditLog::new(&cpu, &io);
        let id = ThreadId::new(3).unwrap();

        audit.use_cpu("web", id, 2);
        audit.use_io("web", id, 1);
        audit.use_cpu("web", id, 0);

        let cpu_lines = fs::read_to_string(&cpu).unwrap();
        assert_eq!(cpu_lines, "web ID:3 CPU Time:2ms\nweb ID:3 CPU Time:0ms\n");

        let io_lines = fs::read_to_string(&io).unwrap();
        assert_eq!(io_lines, "web ID:3 IO Time:1ms\n");

        let _ = fs::remove_file(cpu);
        let _ = fs::remove_file(io);
    }

    #[test]
    fn write_failure_is_not_fatal() {
        // A directory path cannot be opened for appending; the call must
        // still return after the simulated duration.
        let audit = AuditLog::new(std::env::temp_dir(), std::env::temp_dir());
        audit.use_cpu("web", ThreadId::new(1).unwrap(), 1);
    }
}
