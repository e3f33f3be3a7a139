//! A transition table that can be shared between threads.
//!
//! [`TransitionTable`] itself is single-threaded: inserts race on the state
//! and identifier counters. `SharedTable` serializes every operation behind
//! one mutex, so concurrent inserts of the same keyword still agree on its
//! identifier.

use parking_lot::Mutex;

use crate::config::TableConfig;
use crate::diagnostics::DiagnosticSink;
use crate::error::Result;
use crate::table::{TableStats, TransitionTable};

pub struct SharedTable {
    inner: Mutex<TransitionTable>,
}

impl SharedTable {
    pub fn new(config: TableConfig) -> Result<Self> {
        TransitionTable::new(config).map(Self::from_table)
    }

    pub fn with_sink(config: TableConfig, sink: impl DiagnosticSink + 'static) -> Result<Self> {
        TransitionTable::with_sink(config, sink).map(Self::from_table)
    }

    pub fn from_table(table: TransitionTable) -> Self {
        Self {
            inner: Mutex::new(table),
        }
    }

    pub fn insert(&self, pattern: impl AsRef<[u8]>) -> Result<u32> {
        self.inner.lock().insert(pattern.as_ref())
    }

    pub fn lookup(&self, pattern: impl AsRef<[u8]>) -> Result<u32> {
        self.inner.lock().lookup(pattern.as_ref())
    }

    pub fn contains(&self, pattern: impl AsRef<[u8]>) -> bool {
        self.inner.lock().contains(pattern.as_ref())
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn size(&self) -> usize {
        self.inner.lock().size()
    }

    pub fn stats(&self) -> TableStats {
        self.inner.lock().stats()
    }

    /// Run `f` with exclusive access to the underlying table.
    pub fn with_table<R>(&self, f: impl FnOnce(&mut TransitionTable) -> R) -> R {
        f(&mut self.inner.lock())
    }

    pub fn into_inner(self) -> TransitionTable {
        self.inner.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_basic_operations() {
        let t = SharedTable::new(TableConfig::default()).unwrap();
        assert_eq!(t.insert("ram"), Ok(0));
        assert_eq!(t.insert(b"rat"), Ok(1));
        assert_eq!(t.lookup("RAT"), Ok(1));
        assert!(t.contains("ram"));
        assert!(!t.contains("rim"));
        assert_eq!(t.len(), 2);
        assert_eq!(t.stats().identifiers, 2);
    }

    #[test]
    fn test_concurrent_inserts_agree() {
        let t = Arc::new(SharedTable::new(TableConfig::new(16, 16)).unwrap());
        let keys: Arc<Vec<String>> = Arc::new((0..500).map(|i| format!("id{:06}", i)).collect());

        let handles: Vec<_> = (0..4)
            .map(|w| {
                let t = Arc::clone(&t);
                let keys = Arc::clone(&keys);
                thread::spawn(move || {
                    let mut seen = HashMap::new();
                    // Each worker walks the keys from a different offset.
                    for i in 0..keys.len() {
                        let k = &keys[(i + w * 125) % keys.len()];
                        seen.insert(k.clone(), t.insert(k).unwrap());
                    }
                    seen
                })
            })
            .collect();

        let results: Vec<HashMap<String, u32>> =
            handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(t.len(), 500);
        for k in keys.iter() {
            let id = t.lookup(k).unwrap();
            for r in &results {
                assert_eq!(r[k], id);
            }
        }

        let mut ids: Vec<u32> = keys.iter().map(|k| t.lookup(k).unwrap()).collect();
        ids.sort_unstable();
        assert_eq!(ids, (0..500).collect::<Vec<u32>>());
    }

    #[test]
    fn test_with_table_and_into_inner() {
        let t = SharedTable::new(TableConfig::default()).unwrap();
        t.with_table(|inner| {
            inner.insert(b"abc").unwrap();
        });
        let inner = t.into_inner();
        assert_eq!(inner.lookup(b"abc"), Ok(0));
    }
}
