//! Task manager for in-flight requests
//!
//! Each request runs as its own tokio task and reports back by sending an
//! [`Action`] on the controller's channel. Tasks are keyed so logs and tests
//! can see what is still outstanding.
//!
//! Deactivating the view does not abort anything: late results are dropped
//! by the controller instead. Tasks are only aborted when the manager itself
//! goes away.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::action::Action;

/// Identifies a request task, e.g. `summary#3`
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TaskKey(String);

impl TaskKey {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Request A of the given cycle
    pub fn summary(cycle: u64) -> Self {
        Self(format!("summary#{cycle}"))
    }

    /// Request B of the given cycle
    pub fn detail(cycle: u64) -> Self {
        Self(format!("detail#{cycle}"))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for TaskKey {
    fn from(s: &'static str) -> Self {
        Self::new(s)
    }
}

pub struct TaskManager {
    tasks: HashMap<TaskKey, JoinHandle<()>>,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl TaskManager {
    pub fn new(action_tx: mpsc::UnboundedSender<Action>) -> Self {
        Self {
            tasks: HashMap::new(),
            action_tx,
        }
    }

    /// Spawn a task whose output is sent back as an action.
    ///
    /// A running task with the same key is aborted first. If the channel is
    /// gone by the time the task finishes, the action is dropped.
    pub fn spawn<F>(&mut self, key: impl Into<TaskKey>, future: F) -> &mut Self
    where
        F: Future<Output = Action> + Send + 'static,
    {
        let key = key.into();
        self.prune();

        if let Some(previous) = self.tasks.remove(&key) {
            previous.abort();
        }

        let tx = self.action_tx.clone();
        let task_key = key.clone();
        let handle = tokio::spawn(async move {
            let action = future.await;
            if tx.send(action).is_err() {
                debug!(task = %task_key, "action channel closed, dropping result");
            }
        });

        self.tasks.insert(key, handle);
        self
    }

    /// Whether a task with this key is still running
    pub fn is_running(&self, key: &TaskKey) -> bool {
        self.tasks
            .get(key)
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Number of tasks still running
    pub fn in_flight(&self) -> usize {
        self.tasks
            .values()
            .filter(|handle| !handle.is_finished())
            .count()
    }

    pub fn cancel_all(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }

    fn prune(&mut self) {
        self.tasks.retain(|_, handle| !handle.is_finished());
    }
}

impl Drop for TaskManager {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_task_key() {
        assert_eq!(TaskKey::summary(3).name(), "summary#3");
        assert_eq!(TaskKey::detail(3).to_string(), "detail#3");
        assert_eq!(TaskKey::from("x"), TaskKey::new("x"));
    }

    #[tokio::test]
    async fn test_spawn_sends_action() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        tasks.spawn("exit", async { Action::ViewExit });

        let action = tokio::time::timeout(Duration::from_millis(100), rx.recv())
            .await
            .expect("timeout")
            .expect("channel closed");

        assert_eq!(action, Action::ViewExit);
    }

    #[tokio::test]
    async fn test_same_key_replaces() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        tasks.spawn("fetch", async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            Action::ViewExit
        });
        tasks.spawn("fetch", async { Action::WeatherFetch });

        let action = tokio::time::timeout(Duration::from_millis(200), rx.recv())
            .await
            .expect("timeout")
            .expect("channel closed");
        assert_eq!(action, Action::WeatherFetch);

        let late = tokio::time::timeout(Duration::from_millis(150), rx.recv()).await;
        assert!(late.is_err());
    }

    #[tokio::test]
    async fn test_in_flight() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        tasks.spawn(TaskKey::summary(1), async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Action::WeatherFetch
        });

        assert!(tasks.is_running(&TaskKey::summary(1)));
        assert_eq!(tasks.in_flight(), 1);

        tasks.cancel_all();
        assert_eq!(tasks.in_flight(), 0);
    }
}
