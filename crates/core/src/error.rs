use thiserror::Error;

pub type Result<T> = std::result::Result<T, HeraldError>;

#[derive(Debug, Error)]
pub enum HeraldError {
    /// The authenticated-session marker never appeared. Fatal for the run:
    /// pairing requires a human to scan the code, so there is nothing the
    /// engine can retry on its own.
    #[error("session not ready after {ms}ms (pairing code was not scanned)")]
    SessionTimeout { ms: u64 },

    /// A fault inside the automation driver itself. Distinct from a bounded
    /// wait expiring, which is a normal outcome reported as [`crate::Probe::Absent`].
    #[error("automation driver error: {0}")]
    Driver(String),

    /// A fault inside the OS input injector.
    #[error("input injector error: {0}")]
    Injector(String),
}
