use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use tokio::sync::OnceCell;

/// Keyed async memo.
///
/// Each key owns a [`OnceCell`]: the first caller for a key runs the
/// initialiser, concurrent callers for the same key wait on it, and later
/// callers get the stored value. A failed initialiser drops the key's cell
/// once no other caller holds it, so the next caller retries and failing
/// keys do not accumulate. The map lock is never held across an await.
pub struct Memo<V> {
    cells: Mutex<HashMap<String, Arc<OnceCell<V>>>>,
}

impl<V: Clone> Memo<V> {
    pub fn new() -> Self {
        Self {
            cells: Mutex::new(HashMap::new()),
        }
    }

    /// Return the value for `key`, running `init` if no value is stored yet.
    pub async fn get_or_try_init<F, Fut, E>(&self, key: &str, init: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let cell = {
            let mut cells = self.cells.lock().expect("lock poisoned");
            Arc::clone(cells.entry(key.to_string()).or_default())
        };
        let result = cell.get_or_try_init(init).await.cloned();
        if result.is_err() {
            self.evict_empty(key, &cell);
        }
        result
    }

    /// Remove `cell` from the map if it is still empty and unshared.
    fn evict_empty(&self, key: &str, cell: &Arc<OnceCell<V>>) {
        let mut cells = self.cells.lock().expect("lock poisoned");
        let unshared = cells.get(key).is_some_and(|current| {
            Arc::ptr_eq(current, cell) && !current.initialized() && Arc::strong_count(cell) == 2
        });
        if unshared {
            cells.remove(key);
        }
    }

    /// The stored value for `key`, if initialised.
    pub fn get(&self, key: &str) -> Option<V> {
        let cells = self.cells.lock().expect("lock poisoned");
        cells.get(key).and_then(|cell| cell.get().cloned())
    }

    /// Sorted keys that hold a value.
    pub fn keys(&self) -> Vec<String> {
        let cells = self.cells.lock().expect("lock poisoned");
        let mut keys: Vec<String> = cells
            .iter()
            .filter(|(_, cell)| cell.initialized())
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();
        keys
    }

    /// Number of keys that hold a value.
    pub fn len(&self) -> usize {
        let cells = self.cells.lock().expect("lock poisoned");
        cells.values().filter(|cell| cell.initialized()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V: Clone> Default for Memo<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> std::fmt::Debug for Memo<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self
            .cells
            .lock()
            .map(|cells| cells.values().filter(|cell| cell.initialized()).count())
            .unwrap_or(0);
        f.debug_struct("Memo").field("keys", &count).finish()
    }
}
