use crate::audit::AuditLog;
use crate::resource::{ResourceGuard, ResourceKind, ResourcePermit, BACKOFF};
use crate::scheduler::Scheduler;
use crate::thread::Thread;
use log::{debug, info};

/// One round-robin cycle.
///
/// Picks the head of the CPU-bound partition and the head of the IO-bound
/// partition, drives both candidates on concurrent workers, joins them,
/// and only then settles queue membership: a finished candidate leaves the
/// queue for good, a preempted one goes to the back. Queue and registry
/// are touched exclusively by this orchestrating thread.
pub fn dispatch(sched: &mut Scheduler) {
    let cpu_candidate = sched.ready.first_cpu_bound();
    let io_candidate = sched.ready.first_io_bound();
    if cpu_candidate.is_none() && io_candidate.is_none() {
        return;
    }

    let quantum = sched.quantum_ms;
    let resources = &sched.resources;
    let audit = &sched.audit;

    std::thread::scope(|scope| {
        if let Some(thread) = cpu_candidate.as_deref() {
            scope.spawn(move || drive(thread, ResourceKind::Cpu, quantum, resources, audit));
        }
        if let Some(thread) = io_candidate.as_deref() {
            scope.spawn(move || drive(thread, ResourceKind::Io, quantum, resources, audit));
        }
    });

    for candidate in [cpu_candidate, io_candidate].into_iter().flatten() {
        sched.ready.remove(candidate.id);
        if candidate.is_finished() {
            info!("thread {} ({}) finished", candidate.name, candidate.id);
        } else {
            // preempted: back of the queue for a later cycle
            sched.ready.enqueue(candidate);
        }
    }
}

/// Runs one candidate for one cycle: the primary leg, then the secondary.
/// The legs are strictly sequential and the primary's resource is released
/// before the secondary's is requested.
fn drive(
    thread: &Thread,
    primary: ResourceKind,
    quantum_ms: u64,
    resources: &ResourceGuard,
    audit: &AuditLog,
) {
    run_leg(thread, primary, quantum_ms, resources, audit);
    run_leg(thread, primary.other(), quantum_ms, resources, audit);
}

fn run_leg(
    thread: &Thread,
    kind: ResourceKind,
    quantum_ms: u64,
    resources: &ResourceGuard,
    audit: &AuditLog,
) {
    let remaining = match kind {
        ResourceKind::Cpu => thread.remaining_cpu(),
        ResourceKind::Io => thread.remaining_io(),
    };
    if remaining == 0 {
        return;
    }

    // at most one quantum; less than a quantum of work runs to completion
    let slice = remaining.min(quantum_ms);
    let _permit = acquire(thread, kind, resources);
    info!(
        "{} thread {} is on the {} for {slice} ms",
        thread.kind_label(),
        thread.name,
        kind.label()
    );
    match kind {
        ResourceKind::Cpu => {
            audit.use_cpu(&thread.name, thread.id, slice);
            thread.consume_cpu(slice);
        }
        ResourceKind::Io => {
            audit.use_io(&thread.name, thread.id, slice);
            thread.consume_io(slice);
        }
    }
}

fn acquire<'a>(
    thread: &Thread,
    kind: ResourceKind,
    resources: &'a ResourceGuard,
) -> ResourcePermit<'a> {
    loop {
        if let Some(permit) = resources.try_acquire(kind) {
            return permit;
        }
        debug!(
            "{} thread {} backing off: {} resource is busy",
            thread.kind_label(),
            thread.name,
            kind.label()
        );
        std::thread::sleep(BACKOFF);
    }
}
