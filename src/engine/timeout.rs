//! Deadline guard for a single blocking call.

use crossbeam_channel::bounded;
use std::thread;
use std::time::Duration;

/// Outcome of racing a blocking call against a deadline. `TimedOut` is a
/// recoverable result, not an error: scan workers skip the item and keep going.
#[derive(Debug)]
pub enum TimeoutOutcome<T> {
    Completed(T),
    TimedOut,
}

impl<T> TimeoutOutcome<T> {
    pub fn timed_out(&self) -> bool {
        matches!(self, TimeoutOutcome::TimedOut)
    }
}

/// Run `op` on a helper thread and wait at most `deadline` for its result.
///
/// On timeout the helper is abandoned rather than killed: it finishes its
/// blocking call in the background and its send into the result channel fails
/// harmlessly once the receiver is gone. Callers pair this with a transport
/// timeout on the underlying client so the abandoned call unblocks soon after.
pub fn run_with_timeout<T, F>(deadline: Duration, op: F) -> TimeoutOutcome<T>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let (tx, rx) = bounded(1);
    thread::spawn(move || {
        let _ = tx.send(op());
    });
    match rx.recv_timeout(deadline) {
        Ok(value) => TimeoutOutcome::Completed(value),
        Err(_) => TimeoutOutcome::TimedOut,
    }
}
