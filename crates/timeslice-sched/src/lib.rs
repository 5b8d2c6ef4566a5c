//! Scheduling core for the Timeslice simulator.
//!
//! Models CPU/IO process scheduling for teaching: simulated workloads
//! ("threads", not OS threads) carry CPU and IO demand and are dispatched
//! under preemptive round-robin or strict priority, while the CPU and the
//! IO subsystem are two exclusive resources contended by one CPU-bound and
//! one IO-bound thread running concurrently.

pub mod audit;
pub mod error;
pub mod policy;
pub mod queue;
pub mod resource;
pub mod scheduler;
pub mod thread;

pub use audit::AuditLog;
pub use error::ConfigError;
pub use policy::Algorithm;
pub use queue::ReadyQueue;
pub use resource::{ResourceGuard, ResourceKind, ResourcePermit};
pub use scheduler::Scheduler;
pub use thread::{IdAllocator, Thread, ThreadId};
