use thiserror::Error;

/// Configuration problems detected before a simulation starts. The
/// scheduler reports these and refuses to run; its state is unchanged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no scheduling algorithm selected")]
    NoAlgorithm,

    #[error("quantum is unset; select a positive number of milliseconds")]
    ZeroQuantum,

    #[error("ready queue is empty; create threads before starting")]
    EmptyReadyQueue,
}
