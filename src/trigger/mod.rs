// src/trigger/mod.rs

//! On-demand report triggering.
//!
//! [`TriggerSource`] is the single-question seam the monitor loop polls on
//! each tick: "was a report requested?". Observing a request consumes it,
//! so a single request produces at most one report run.
//!
//! The shipped implementation is [`RequestFileTrigger`] (`file.rs`): a
//! request file dropped next to the report artifacts. The trait is the seam
//! for richer sources (e.g. a mailbox poller).

pub mod file;

pub use file::RequestFileTrigger;

/// External channel queried for an on-demand report request.
pub trait TriggerSource: Send + 'static {
    /// Returns `true` if a request was observed since the last call, and
    /// consumes it. Errors while querying are absorbed and reported as
    /// "no request this tick".
    fn has_pending_request(&mut self) -> bool;
}
