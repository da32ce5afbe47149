/// Execution Queue - Admission Control for the Judge Backend
///
/// Bounded-worker-pool gate: at most `max_concurrent` tasks run at once,
/// everyone else waits in strict FIFO order, and a finishing task (success
/// or failure) immediately frees its slot for the next waiter. One instance
/// exists per process - the backend it protects is a global resource - but
/// the instance is constructed at the composition root and injected, never
/// a module-level global.
///
/// "Concurrent" means in-flight asynchronous calls, not parallel CPU work;
/// a slot is held for the full task, including any retries inside it.

use serde::Serialize;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Semaphore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueStatus {
    pub running: usize,
    pub queued: usize,
    pub max_concurrent: usize,
}

pub struct ExecutionQueue {
    semaphore: Semaphore,
    running: AtomicUsize,
    queued: AtomicUsize,
    max_concurrent: usize,
}

/// Decrements a counter when dropped, so the books stay balanced even if
/// the submitting future is cancelled while waiting for a slot.
struct CountGuard<'a>(&'a AtomicUsize);

impl Drop for CountGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl ExecutionQueue {
    pub const DEFAULT_MAX_CONCURRENT: usize = 5;

    pub fn new(max_concurrent: usize) -> Self {
        ExecutionQueue {
            semaphore: Semaphore::new(max_concurrent),
            running: AtomicUsize::new(0),
            queued: AtomicUsize::new(0),
            max_concurrent,
        }
    }

    pub fn with_default_limit() -> Self {
        Self::new(Self::DEFAULT_MAX_CONCURRENT)
    }

    /// Run `task` once a slot frees up. Admission is FIFO: tokio's semaphore
    /// hands out permits in acquire order, so no task jumps the line.
    pub async fn submit<F, Fut, T>(&self, task: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        self.queued.fetch_add(1, Ordering::SeqCst);
        let queued_guard = CountGuard(&self.queued);
        let _permit = self
            .semaphore
            .acquire()
            .await
            .expect("execution queue semaphore closed");
        drop(queued_guard);

        self.running.fetch_add(1, Ordering::SeqCst);
        let _running_guard = CountGuard(&self.running);
        task().await
    }

    pub fn status(&self) -> QueueStatus {
        QueueStatus {
            running: self.running.load(Ordering::SeqCst),
            queued: self.queued.load(Ordering::SeqCst),
            max_concurrent: self.max_concurrent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::future::join_all;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[tokio::test]
    async fn test_admission_bound_and_fifo_order() {
        let queue = Arc::new(ExecutionQueue::new(2));
        let current = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let completion_order = Arc::new(Mutex::new(Vec::new()));

        let mut handles = Vec::new();
        for index in 0..6usize {
            let queue = Arc::clone(&queue);
            let current = Arc::clone(&current);
            let peak = Arc::clone(&peak);
            let completion_order = Arc::clone(&completion_order);
            handles.push(tokio::spawn(async move {
                queue
                    .submit(|| async move {
                        let now = current.fetch_add(1, Ordering::SeqCst) + 1;
                        peak.fetch_max(now, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(20)).await;
                        current.fetch_sub(1, Ordering::SeqCst);
                        completion_order.lock().unwrap().push(index);
                    })
                    .await
            }));
            // Stagger arrival so acquire order (and thus FIFO order) is fixed
            tokio::time::sleep(Duration::from_millis(2)).await;
        }

        join_all(handles).await;

        assert!(peak.load(Ordering::SeqCst) <= 2, "admission bound violated");
        let order = completion_order.lock().unwrap().clone();
        assert_eq!(order.len(), 6);
        // Equal-duration tasks drain in FIFO order
        assert_eq!(order, vec![0, 1, 2, 3, 4, 5]);

        let status = queue.status();
        assert_eq!(status.running, 0);
        assert_eq!(status.queued, 0);
        assert_eq!(status.max_concurrent, 2);
    }

    #[tokio::test]
    async fn test_status_reflects_waiting_tasks() {
        let queue = Arc::new(ExecutionQueue::new(1));
        let (release_tx, release_rx) = tokio::sync::oneshot::channel::<()>();

        let blocker = {
            let queue = Arc::clone(&queue);
            tokio::spawn(async move {
                queue
                    .submit(|| async move {
                        let _ = release_rx.await;
                    })
                    .await
            })
        };

        // Let the blocker take the only slot
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(queue.status().running, 1);

        let waiter = {
            let queue = Arc::clone(&queue);
            tokio::spawn(async move { queue.submit(|| async move { 42 }).await })
        };

        tokio::time::sleep(Duration::from_millis(10)).await;
        let status = queue.status();
        assert_eq!(status.running, 1);
        assert_eq!(status.queued, 1);

        release_tx.send(()).expect("blocker alive");
        assert_eq!(waiter.await.expect("waiter task"), 42);
        blocker.await.expect("blocker task");
        assert_eq!(queue.status().running, 0);
    }

    #[tokio::test]
    async fn test_task_failure_frees_the_slot() {
        let queue = ExecutionQueue::new(1);
        let failed: Result<(), &str> = queue.submit(|| async { Err("boom") }).await;
        assert!(failed.is_err());
        // Slot was released despite the failure
        let ok: Result<i32, &str> = queue.submit(|| async { Ok(7) }).await;
        assert_eq!(ok, Ok(7));
        assert_eq!(queue.status().running, 0);
    }
}
