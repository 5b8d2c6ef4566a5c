use crate::audit::AuditLog;
use crate::error::ConfigError;
use crate::policy::{self, Algorithm};
use crate::queue::ReadyQueue;
use crate::resource::ResourceGuard;
use crate::thread::{IdAllocator, Thread, ThreadId};
use log::info;
use rand::Rng;
use std::fmt::Write as _;
use std::sync::Arc;

/// Owns the thread registry and the ready queue, and drives the dispatch
/// loop under the selected policy until the queue drains.
///
/// `processes` is append-only and keeps every thread ever created so the
/// final statistics can be computed; the ready queue is the working set.
pub struct Scheduler {
    pub(crate) processes: Vec<Arc<Thread>>,
    pub(crate) ready: ReadyQueue,
    pub(crate) current: Option<Arc<Thread>>,
    pub(crate) algorithm: Option<Algorithm>,
    pub(crate) quantum_ms: u64,
    pub(crate) ids: IdAllocator,
    pub(crate) resources: ResourceGuard,
    pub(crate) audit: AuditLog,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::with_audit(AuditLog::default())
    }

    /// Scheduler whose CPU/IO audit trail goes to the given log.
    pub fn with_audit(audit: AuditLog) -> Self {
        Self {
            processes: Vec::new(),
            ready: ReadyQueue::new(),
            current: None,
            algorithm: None,
            quantum_ms: 0,
            ids: IdAllocator::new(),
            resources: ResourceGuard::new(),
            audit,
        }
    }

    /// Registers a thread and makes it ready. A thread created with no
    /// work at all is kept in the registry for statistics but never
    /// enters the ready queue.
    pub fn create_thread(
        &mut self,
        name: impl Into<String>,
        priority: u32,
        io_bound: bool,
        total_cpu: u64,
        total_io: u64,
    ) -> ThreadId {
        let thread = Arc::new(Thread::new(
            self.ids.allocate(),
            name,
            priority,
            io_bound,
            total_cpu,
            total_io,
        ));
        let id = thread.id;
        self.processes.push(Arc::clone(&thread));
        if !thread.is_finished() {
            self.ready.enqueue(thread);
        }
        id
    }

    /// Bulk random workloads: 3-letter name, priority and totals in
    /// 1..=10, IO-bound when the IO total is the larger one.
    pub fn create_random_threads(&mut self, count: usize) {
        let mut rng = rand::thread_rng();
        for _ in 0..count {
            let name: String = (0..3).map(|_| rng.gen_range(b'A'..=b'Z') as char).collect();
            let priority = rng.gen_range(1..=10);
            let total_cpu = rng.gen_range(1..=10);
            let total_io = rng.gen_range(1..=10);
            let io_bound = total_io > total_cpu;
            self.create_thread(name, priority, io_bound, total_cpu, total_io);
        }
    }

    pub fn choose_algorithm(&mut self, algorithm: Algorithm) {
        self.algorithm = Some(algorithm);
    }

    pub fn algorithm(&self) -> Option<Algorithm> {
        self.algorithm
    }

    /// Quantum in milliseconds; zero means unset.
    pub fn select_quantum(&mut self, quantum_ms: u64) {
        self.quantum_ms = quantum_ms;
    }

    pub fn quantum_ms(&self) -> u64 {
        self.quantum_ms
    }

    pub fn ready(&self) -> &ReadyQueue {
        &self.ready
    }

    /// Every thread ever created, in insertion order.
    pub fn processes(&self) -> &[Arc<Thread>] {
        &self.processes
    }

    pub fn thread(&self, id: ThreadId) -> Option<&Arc<Thread>> {
        self.processes.iter().find(|t| t.id == id)
    }

    /// Renders the ready queue without mutating it.
    pub fn format_ready_queue(&self) -> String {
        let mut out = String::from("Ready queue:\n");
        for thread in self.ready.iter() {
            let _ = writeln!(
                out,
                "  ID: {}, name: {}, priority: {}, CPU left: {} ms, IO left: {} ms, {}",
                thread.id,
                thread.name,
                thread.priority,
                thread.remaining_cpu(),
                thread.remaining_io(),
                thread.kind_label()
            );
        }
        out
    }

    pub fn print_ready_queue(&self) {
        print!("{}", self.format_ready_queue());
    }

    /// One policy invocation. Does nothing until an algorithm is chosen.
    pub fn dispatch_once(&mut self) {
        match self.algorithm {
            Some(Algorithm::RoundRobin) => policy::round_robin::dispatch(self),
            Some(Algorithm::Priority) => policy::priority::dispatch(self),
            None => {}
        }
    }

    /// Runs "display queue, dispatch once" until the ready queue drains,
    /// then reports and returns the average turnaround. Refuses to start
    /// when misconfigured, leaving all state untouched.
    ///
    /// There is no iteration cap: every policy invocation strictly reduces
    /// the total remaining work or removes a thread, which is what makes
    /// the loop terminate.
    pub fn run_simulation(&mut self) -> Result<f64, ConfigError> {
        if self.algorithm.is_none() {
            return Err(ConfigError::NoAlgorithm);
        }
        if self.quantum_ms == 0 {
            return Err(ConfigError::ZeroQuantum);
        }
        if self.ready.is_empty() {
            return Err(ConfigError::EmptyReadyQueue);
        }

        while !self.ready.is_empty() {
            self.print_ready_queue();
            self.dispatch_once();
        }

        let average = self.average_turnaround();
        info!("average turnaround time: {average:.2} ms");
        Ok(average)
    }

    /// Mean CPU time consumed (total minus remaining) across every thread
    /// ever created. IO progress is deliberately not counted.
    pub fn average_turnaround(&self) -> f64 {
        if self.processes.is_empty() {
            return 0.0;
        }
        let consumed: u64 = self
            .processes
            .iter()
            .map(|t| t.total_cpu - t.remaining_cpu())
            .sum();
        consumed as f64 / self.processes.len() as f64
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_work_threads_register_but_never_become_ready() {
        let mut sched = Scheduler::new();
        let id = sched.create_thread("noop", 5, false, 0, 0);

        assert_eq!(sched.processes().len(), 1);
        assert!(sched.ready().is_empty());
        assert!(sched.thread(id).unwrap().is_finished());
    }

    #[test]
    fn created_threads_get_increasing_ids() {
        let mut sched = Scheduler::new();
        let a = sched.create_thread("a", 1, false, 1, 0);
        let b = sched.create_thread("b", 1, false, 1, 0);
        assert!(b > a);
        assert_eq!(sched.ready().len(), 2);
    }

    #[test]
    fn turnaround_of_empty_registry_is_zero() {
        let sched = Scheduler::new();
        assert_eq!(sched.average_turnaround(), 0.0);
    }
}
