//! Fan-out/fan-in over independent futures.
//!
//! Built on `futures::future::join_all` so it runs on any executor. Tasks are
//! polled concurrently; `join` resolves once every task has settled, and
//! results come back in the order the tasks were added.

use futures::future::{BoxFuture, FutureExt, join_all};
use std::future::Future;

/// A batch of keyed futures awaited together.
pub struct TaskGroup<'a, K, T> {
    tasks: Vec<(K, BoxFuture<'a, T>)>,
}

impl<K, T> Default for TaskGroup<'_, K, T> {
    fn default() -> Self {
        Self { tasks: Vec::new() }
    }
}

impl<'a, K, T> TaskGroup<'a, K, T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a task. Nothing runs until [`TaskGroup::join`] is awaited.
    pub fn spawn<F>(&mut self, key: K, task: F)
    where
        F: Future<Output = T> + Send + 'a,
    {
        self.tasks.push((key, task.boxed()));
    }

    /// Runs every task concurrently and waits for all of them.
    pub async fn join(self) -> Joined<K, T> {
        let (keys, tasks): (Vec<K>, Vec<BoxFuture<'a, T>>) = self.tasks.into_iter().unzip();
        let outputs = join_all(tasks).await;
        Joined { entries: keys.into_iter().zip(outputs).collect() }
    }
}

/// Settled outputs of a [`TaskGroup`], keyed like the tasks were.
#[derive(Debug)]
pub struct Joined<K, T> {
    entries: Vec<(K, T)>,
}

impl<K: PartialEq, T> Joined<K, T> {
    /// Removes and returns the output of the first task added under `key`.
    pub fn take(&mut self, key: &K) -> Option<T> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
