use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// The two exclusive resources threads contend for.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ResourceKind {
    Cpu,
    Io,
}

impl ResourceKind {
    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Cpu => "CPU",
            ResourceKind::Io => "IO",
        }
    }

    /// The resource a thread visits after its primary one.
    pub fn other(&self) -> ResourceKind {
        match self {
            ResourceKind::Cpu => ResourceKind::Io,
            ResourceKind::Io => ResourceKind::Cpu,
        }
    }
}

/// How long a driver sleeps after a failed acquisition before retrying.
pub const BACKOFF: Duration = Duration::from_millis(2);

/// Two independent binary locks, one per resource kind, capacity one each.
///
/// Acquisition is non-blocking: the CPU-bound driver wants CPU then IO
/// while the IO-bound driver wants IO then CPU, and a blocking wait in
/// opposite orders would deadlock the pair. A caller that fails
/// `try_acquire` backs off for [`BACKOFF`] and retries; there is no
/// fairness guarantee among competitors.
pub struct ResourceGuard {
    cpu: AtomicBool,
    io: AtomicBool,
}

impl ResourceGuard {
    pub fn new() -> Self {
        Self {
            cpu: AtomicBool::new(false),
            io: AtomicBool::new(false),
        }
    }

    /// Returns a permit if the resource was free. The permit releases the
    /// resource when dropped.
    pub fn try_acquire(&self, kind: ResourceKind) -> Option<ResourcePermit<'_>> {
        let free = self
            .flag(kind)
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok();
        free.then(|| ResourcePermit { guard: self, kind })
    }

    pub fn is_held(&self, kind: ResourceKind) -> bool {
        self.flag(kind).load(Ordering::Acquire)
    }

    fn flag(&self, kind: ResourceKind) -> &AtomicBool {
        match kind {
            ResourceKind::Cpu => &self.cpu,
            ResourceKind::Io => &self.io,
        }
    }

    fn release(&self, kind: ResourceKind) {
        self.flag(kind).store(false, Ordering::Release);
    }
}

impl Default for ResourceGuard {
    fn default() -> Self {
        Self::new()
    }
}

/// Exclusive hold on one resource, released on drop.
pub struct ResourcePermit<'a> {
    guard: &'a ResourceGuard,
    kind: ResourceKind,
}

impl ResourcePermit<'_> {
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }
}

impl Drop for ResourcePermit<'_> {
    fn drop(&mut self) {
        self.guard.release(self.kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::thread;

    #[test]
    fn second_acquire_fails_until_permit_drops() {
        let guard = ResourceGuard::new();

        let permit = guard.try_acquire(ResourceKind::Cpu).unwrap();
        assert!(guard.is_held(ResourceKind::Cpu));
        assert!(guard.try_acquire(ResourceKind::Cpu).is_none());

        drop(permit);
        assert!(!guard.is_held(ResourceKind::Cpu));
        assert!(guard.try_acquire(ResourceKind::Cpu).is_some());
    }

    #[test]
    fn cpu_and_io_locks_are_independent() {
        let guard = ResourceGuard::new();
        let _cpu = guard.try_acquire(ResourceKind::Cpu).unwrap();
        let _io = guard.try_acquire(ResourceKind::Io).unwrap();
        assert!(guard.try_acquire(ResourceKind::Cpu).is_none());
        assert!(guard.try_acquire(ResourceKind::Io).is_none());
    }

    #[test]
    fn at_most_one_holder_under_contention() {
        let guard = ResourceGuard::new();
        let holders = AtomicUsize::new(0);
        let violations = AtomicUsize::new(0);

        thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    let mut held = 0;
                    while held < 100 {
                        if let Some(permit) = guard.try_acquire(ResourceKind::Io) {
                            if holders.fetch_add(1, Ordering::SeqCst) != 0 {
                                violations.fetch_add(1, Ordering::SeqCst);
                            }
                            std::hint::spin_loop();
                            holders.fetch_sub(1, Ordering::SeqCst);
                            drop(permit);
                            held += 1;
                        } else {
                            thread::yield_now();
                        }
                    }
                });
            }
        });

        assert_eq!(violations.load(Ordering::SeqCst), 0);
        assert!(!guard.is_held(ResourceKind::Io));
    }
}
