//! Progress aggregation: a single actor thread owns the counter and the bar.
//!
//! Workers never share a counter; they send increment messages to the actor,
//! which is the only owner of the count and the kdam bar. The final count is
//! exact: `finish` closes the channel and joins the actor after every sender
//! is gone.

use anyhow::Result;
use crossbeam_channel::{Sender, unbounded};
use kdam::{Animation, BarExt};
use std::thread::{self, JoinHandle};

/// Cloneable handle workers use to report increments.
#[derive(Clone)]
pub struct ProgressHandle {
    tx: Sender<usize>,
}

impl ProgressHandle {
    pub fn inc(&self, n: usize) {
        let _ = self.tx.send(n);
    }
}

/// Spawns and owns the aggregator actor. One tracker per pipeline stage, so
/// the count always starts at zero.
pub struct ProgressTracker {
    tx: Sender<usize>,
    actor: JoinHandle<usize>,
}

impl ProgressTracker {
    /// Start the actor. With `show_bar` false (tests, quiet runs) only the
    /// count is kept; no bar is drawn.
    pub fn spawn(desc: &'static str, show_bar: bool) -> Self {
        let (tx, rx) = unbounded::<usize>();
        let actor = thread::spawn(move || {
            let mut bar = show_bar.then(|| {
                kdam::tqdm!(
                    total = 0,
                    desc = desc,
                    animation = Animation::Classic,
                    position = 0,
                    unit = " items"
                )
            });
            let mut count = 0_usize;
            while let Ok(n) = rx.recv() {
                count += n;
                if let Some(bar) = bar.as_mut() {
                    let _ = bar.update(n);
                }
            }
            if let Some(bar) = bar.as_mut() {
                let _ = bar.refresh();
                eprintln!();
            }
            count
        });
        Self { tx, actor }
    }

    /// Handle for workers. Increments sent after `finish` are dropped.
    pub fn handle(&self) -> ProgressHandle {
        ProgressHandle {
            tx: self.tx.clone(),
        }
    }

    /// Drop our sender, join the actor, return the exact final count. Call
    /// after the pool is joined so every worker-held handle is gone too.
    pub fn finish(self) -> Result<usize> {
        drop(self.tx);
        self.actor
            .join()
            .map_err(|_| anyhow::anyhow!("progress actor panicked"))
    }
}
