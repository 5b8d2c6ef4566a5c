use crate::scheduler::Scheduler;
use log::info;

/// One strict-priority invocation.
///
/// Selects the highest-priority ready thread (stable sort, so equal
/// priorities keep their prior order) and runs it for at most one quantum
/// of CPU time. On finish the thread is removed from the working set; on
/// preemption it is re-enqueued at the back. Either way `current` is empty
/// again when the invocation returns.
///
/// This policy is CPU-only: it does not model IO contention, and a thread
/// whose CPU demand drains is finished here even if IO demand remains.
pub fn dispatch(sched: &mut Scheduler) {
    if sched.current.is_none() {
        sched.ready.sort_by_priority();
        sched.current = sched.ready.pop_front();
    }

    let Some(thread) = sched.current.take() else {
        return;
    };

    let slice = thread.remaining_cpu().min(sched.quantum_ms);
    info!(
        "thread {} (priority {}) is on the CPU for {slice} ms",
        thread.name, thread.priority
    );
    thread.consume_cpu(slice);

    if thread.remaining_cpu() == 0 {
        info!("thread {} ({}) finished", thread.name, thread.id);
    } else {
        sched.ready.enqueue(thread);
    }
}
