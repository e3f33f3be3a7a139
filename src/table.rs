use std::fmt;
use std::mem;

use crate::alphabet::{self, ID_LANE, LANE_COUNT};
use crate::config::TableConfig;
use crate::diagnostics::{DiagnosticSink, Level};
use crate::error::{Result, TableError};
use crate::lanes::Lanes;

// =============================================================================
// Statistics
// =============================================================================

/// Point-in-time counters of a [`TransitionTable`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableStats {
    /// States handed out so far, including the start state
    pub states: u32,
    /// Length of every lane
    pub capacity: u32,
    /// Identifiers assigned so far
    pub identifiers: u32,
    /// Footprint as reported by [`TransitionTable::size`]
    pub bytes_used: usize,
    /// Bytes actually held, including unused lane capacity
    pub bytes_reserved: usize,
    /// Number of times the lanes were grown
    pub growth_events: u32,
}

// =============================================================================
// Transition table
// =============================================================================

/// Keyword-to-identifier map built as a trie over 37 parallel lanes.
///
/// `lane[symbol][state]` holds the state reached by consuming `symbol` from
/// `state`, with `0` meaning "no transition". State `0` is also the start
/// state, so real transitions always point at states `>= 1`. The identifier
/// of a pattern ending in state `s` is stored in the identifier lane at
/// `s + 1`, the slot allocated right after the pattern's last state.
///
/// Bytes outside `[0-9A-Za-z]` are skipped, and letters are case-folded:
/// `"A-b"`, `"ab"` and `"AB"` are the same keyword.
///
/// The table is append-only and not synchronized; wrap it in a
/// [`SharedTable`](crate::SharedTable) to share it between threads.
pub struct TransitionTable {
    lanes: Lanes,
    next_state: u32,
    max_state: u32,
    growth_increment: u32,
    hash_index: u32,
    growth_events: u32,
    released: bool,
    sink: Option<Box<dyn DiagnosticSink>>,
}

impl TransitionTable {
    /// Allocate a table with every lane zeroed to the configured capacity.
    pub fn new(config: TableConfig) -> Result<Self> {
        Self::build(config, None)
    }

    /// Like [`new`](Self::new), reporting diagnostics to `sink`.
    pub fn with_sink(config: TableConfig, sink: impl DiagnosticSink + 'static) -> Result<Self> {
        Self::build(config, Some(Box::new(sink)))
    }

    fn build(config: TableConfig, sink: Option<Box<dyn DiagnosticSink>>) -> Result<Self> {
        let max_state = config.capacity();
        let growth_increment = config.increment();
        diag!(
            sink.as_deref(),
            Level::DEBUG,
            "initializing table, max_state = {}, delta_state = {}",
            max_state,
            growth_increment
        );

        let lanes = match Lanes::with_capacity(max_state as usize) {
            Ok(lanes) => lanes,
            Err(e) => {
                diag!(
                    sink.as_deref(),
                    Level::ERROR,
                    "unable to allocate {} lanes of {} states",
                    LANE_COUNT,
                    max_state
                );
                return Err(e);
            }
        };

        Ok(Self {
            lanes,
            next_state: 1,
            max_state,
            growth_increment,
            hash_index: 0,
            growth_events: 0,
            released: false,
            sink,
        })
    }

    #[inline]
    fn sink(&self) -> Option<&dyn DiagnosticSink> {
        self.sink.as_deref()
    }

    /// Number of identifiers assigned.
    #[inline]
    pub fn len(&self) -> usize {
        self.hash_index as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.hash_index == 0
    }

    /// Next state that will be handed out.
    #[inline]
    pub fn next_state(&self) -> u32 {
        self.next_state
    }

    /// Current length of every lane.
    #[inline]
    pub fn capacity(&self) -> u32 {
        self.max_state
    }

    #[inline]
    pub fn growth_increment(&self) -> u32 {
        self.growth_increment
    }

    #[inline]
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Insert `pattern`, returning its identifier.
    ///
    /// A pattern whose path already exists in full returns the identifier
    /// stored when that path was first created. Shared prefixes are walked,
    /// not duplicated.
    pub fn insert(&mut self, pattern: &[u8]) -> Result<u32> {
        diag!(
            self.sink(),
            Level::TRACE,
            "insert entry = {}, len = {}",
            String::from_utf8_lossy(pattern),
            pattern.len()
        );
        self.check_usable(pattern)?;
        self.ensure_room(pattern.len())?;

        let mut state = 0u32;
        let mut created = false;
        for symbol in alphabet::symbols(pattern) {
            let next = self.lanes.get(symbol, state);
            if next != 0 {
                state = next;
                continue;
            }
            let fresh = self.next_state;
            self.lanes.set(symbol, state, fresh);
            self.next_state += 1;
            state = fresh;
            created = true;
        }

        if !created {
            return Ok(self.lanes.get(ID_LANE, state + 1));
        }

        let slot = self.next_state;
        self.next_state += 1;
        let id = self.hash_index;
        self.lanes.set(ID_LANE, slot, id);
        self.hash_index += 1;
        Ok(id)
    }

    /// Identifier of a previously inserted `pattern`.
    ///
    /// Fails with [`TableError::NotFound`] as soon as a symbol has no
    /// transition. Never modifies the table.
    pub fn lookup(&self, pattern: &[u8]) -> Result<u32> {
        diag!(
            self.sink(),
            Level::TRACE,
            "lookup entry = {}, len = {}",
            String::from_utf8_lossy(pattern),
            pattern.len()
        );
        self.check_usable(pattern)?;

        let mut state = 0u32;
        for symbol in alphabet::symbols(pattern) {
            match self.lanes.get(symbol, state) {
                0 => {
                    let pattern = String::from_utf8_lossy(pattern).into_owned();
                    diag!(
                        self.sink(),
                        Level::ERROR,
                        "Pattern [ {} ] not found in the state machine",
                        pattern
                    );
                    return Err(TableError::NotFound { pattern });
                }
                next => state = next,
            }
        }
        Ok(self.lanes.get(ID_LANE, state + 1))
    }

    /// Whether [`lookup`](Self::lookup) would succeed for `pattern`.
    pub fn contains(&self, pattern: &[u8]) -> bool {
        self.lookup(pattern).is_ok()
    }

    /// Footprint in bytes: the struct plus every lane up to `next_state`.
    pub fn size(&self) -> usize {
        mem::size_of::<Self>() + LANE_COUNT * self.next_state as usize * mem::size_of::<u32>()
    }

    pub fn stats(&self) -> TableStats {
        TableStats {
            states: self.next_state,
            capacity: self.max_state,
            identifiers: self.hash_index,
            bytes_used: self.size(),
            bytes_reserved: mem::size_of::<Self>() + self.lanes.reserved_bytes(),
            growth_events: self.growth_events,
        }
    }

    /// Free every lane and zero all counters.
    ///
    /// Later inserts and lookups fail with [`TableError::InvalidArgument`].
    /// Releasing twice is harmless.
    pub fn release(&mut self) {
        diag!(
            self.sink(),
            Level::DEBUG,
            "releasing table, max_state = {}, next_state = {}",
            self.max_state,
            self.next_state
        );
        self.lanes.release();
        self.max_state = 0;
        self.next_state = 0;
        self.hash_index = 0;
        self.released = true;
    }

    fn check_usable(&self, pattern: &[u8]) -> Result<()> {
        let reason = if self.released {
            "table has been released"
        } else if pattern.is_empty() {
            "empty pattern"
        } else {
            return Ok(());
        };
        diag!(self.sink(), Level::ERROR, "invalid argument: {}", reason);
        Err(TableError::InvalidArgument(reason))
    }

    /// Grow the lanes so `len` more symbols plus an identifier slot fit.
    fn ensure_room(&mut self, len: usize) -> Result<()> {
        let required = (self.next_state as usize)
            .saturating_add(len)
            .saturating_add(1);
        if required <= self.max_state as usize {
            return Ok(());
        }

        let increment = self.growth_increment as usize;
        let mut target = self.max_state as usize + increment;
        if len > increment {
            target = target.saturating_add(len);
        }
        // One step must always be enough, even when next_state sits at the
        // old capacity and the pattern is exactly one increment long.
        let target = target.max(required);

        if target > u32::MAX as usize {
            diag!(
                self.sink(),
                Level::ERROR,
                "state space exhausted, requested {} states",
                target
            );
            return Err(TableError::AllocationFailure { requested: target });
        }

        diag!(
            self.sink(),
            Level::DEBUG,
            "growing lanes from {} to {} states, delta_state = {}",
            self.max_state,
            target,
            self.growth_increment
        );
        if let Err(e) = self.lanes.grow_to(target) {
            diag!(
                self.sink(),
                Level::ERROR,
                "unable to grow lanes to {} states",
                target
            );
            return Err(e);
        }
        self.max_state = target as u32;
        self.growth_events += 1;
        diag!(
            self.sink(),
            Level::DEBUG,
            "size of hash table = {}",
            mem::size_of::<Self>() + LANE_COUNT * target * mem::size_of::<u32>()
        );
        Ok(())
    }
}

impl fmt::Debug for TransitionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionTable")
            .field("next_state", &self.next_state)
            .field("max_state", &self.max_state)
            .field("growth_increment", &self.growth_increment)
            .field("hash_index", &self.hash_index)
            .field("released", &self.released)
            .field("sink", &self.sink.is_some())
            .finish()
    }
}
