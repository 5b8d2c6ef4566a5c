pub mod priority;
pub mod round_robin;

/// The closed set of dispatch policies.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Algorithm {
    /// Preemptive round-robin pairing one CPU-bound and one IO-bound
    /// thread per cycle.
    RoundRobin,
    /// Strict priority, CPU time only.
    Priority,
}

impl Algorithm {
    pub fn label(&self) -> &'static str {
        match self {
            Algorithm::RoundRobin => "Round Robin",
            Algorithm::Priority => "Priority",
        }
    }
}
