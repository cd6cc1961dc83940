//! Channel wiring for one pipeline stage.

use crossbeam_channel::{Receiver, Sender, bounded};

use super::RESULT_CHANNEL_CAP;
use super::pool::Task;

/// Channels for one stage. The task channel is sized to hold every task plus
/// one stop token per worker, so seeding never blocks; the result channel is
/// capped and drained continuously by the driver.
pub struct StageChannels<T, R> {
    pub task_tx: Sender<Task<T>>,
    pub task_rx: Receiver<Task<T>>,
    pub result_tx: Sender<R>,
    pub result_rx: Receiver<R>,
}

pub fn create_stage_channels<T, R>(task_count: usize, workers: usize) -> StageChannels<T, R> {
    let (task_tx, task_rx) = bounded::<Task<T>>(task_count + workers);
    let (result_tx, result_rx) = bounded::<R>(RESULT_CHANNEL_CAP);
    StageChannels {
        task_tx,
        task_rx,
        result_tx,
        result_rx,
    }
}

/// Enqueue all tasks, then exactly one stop token per worker.
pub fn seed_tasks<T>(task_tx: &Sender<Task<T>>, tasks: Vec<T>, workers: usize) {
    for task in tasks {
        let _ = task_tx.send(Task::Work(task));
    }
    for _ in 0..workers {
        let _ = task_tx.send(Task::Stop);
    }
}
