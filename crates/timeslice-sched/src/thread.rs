use std::fmt;
use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

/// Thread identifier
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ThreadId(NonZeroU32);

impl ThreadId {
    pub fn new(id: u32) -> Option<Self> {
        NonZeroU32::new(id).map(Self)
    }

    pub fn val(&self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for ThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hands out thread IDs from an atomic counter. IDs start at 1 and are
/// never reused, even when threads are created concurrently.
pub struct IdAllocator {
    next: AtomicU32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self {
            next: AtomicU32::new(1),
        }
    }

    pub fn allocate(&self) -> ThreadId {
        let raw = self.next.fetch_add(1, Ordering::Relaxed);
        ThreadId::new(raw).unwrap()
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
struct Remaining {
    cpu: u64,
    io: u64,
}

/// A simulated unit of work (not an OS-level thread). The bound kind is
/// fixed at creation and decides which resource a round-robin driver
/// treats as primary.
///
/// The remaining counters sit behind a mutex: the registry and the ready
/// queue hold the same `Arc<Thread>`, and during a round-robin cycle a
/// concurrent driver decrements its own candidate's counters in place.
#[derive(Debug)]
pub struct Thread {
    pub id: ThreadId,
    pub name: String,
    pub priority: u32,
    pub io_bound: bool,
    pub total_cpu: u64,
    pub total_io: u64,
    remaining: Mutex<Remaining>,
}

impl Thread {
    pub fn new(
        id: ThreadId,
        name: impl Into<String>,
        priority: u32,
        io_bound: bool,
        total_cpu: u64,
        total_io: u64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            priority,
            io_bound,
            total_cpu,
            total_io,
            remaining: Mutex::new(Remaining {
                cpu: total_cpu,
                io: total_io,
            }),
        }
    }

    pub fn remaining_cpu(&self) -> u64 {
        self.remaining.lock().unwrap().cpu
    }

    pub fn remaining_io(&self) -> u64 {
        self.remaining.lock().unwrap().io
    }

    /// Remaining CPU plus IO time, read under a single lock.
    pub fn remaining_total(&self) -> u64 {
        let remaining = self.remaining.lock().unwrap();
        remaining.cpu + remaining.io
    }

    /// Consuming more than remains clamps to zero, keeping the counter
    /// inside `0..=total_cpu`.
    pub fn consume_cpu(&self, ms: u64) {
        let mut remaining = self.remaining.lock().unwrap();
        remaining.cpu = remaining.cpu.saturating_sub(ms);
    }

    pub fn consume_io(&self, ms: u64) {
        let mut remaining = self.remaining.lock().unwrap();
        remaining.io = remaining.io.saturating_sub(ms);
    }

    /// A thread with no remaining CPU or IO time is finished and must not
    /// appear in the ready queue.
    pub fn is_finished(&self) -> bool {
        self.remaining_total() == 0
    }

    pub fn kind_label(&self) -> &'static str {
        if self.io_bound {
            "I/O-bound"
        } else {
            "CPU-bound"
        }
    }
}
