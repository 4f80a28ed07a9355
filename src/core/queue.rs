//! Shared work queue
//!
//! Distribution is a single cursor over the scanned file list, advanced
//! under a mutex. Workers claim the next unclaimed index and do all I/O
//! outside the lock, so the critical section is a bare read-and-increment.
//! Every index is handed out exactly once; there is no retry and no
//! re-queueing.

use std::sync::Mutex;

/// Claim-next cursor over a fixed-length list of work items.
#[derive(Debug)]
pub struct WorkQueue {
    cursor: Mutex<usize>,
    len: usize,
}

impl WorkQueue {
    /// Creates a queue over `len` items, all initially unclaimed.
    pub fn new(len: usize) -> Self {
        Self {
            cursor: Mutex::new(0),
            len,
        }
    }

    /// Claims the next unprocessed index, or `None` once the queue is
    /// exhausted. Exhaustion is permanent.
    pub fn claim_next(&self) -> Option<usize> {
        // The critical section only moves an integer forward, so a
        // poisoned lock still holds a consistent cursor.
        let mut cursor = self
            .cursor
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if *cursor >= self.len {
            return None;
        }
        let index = *cursor;
        *cursor += 1;
        Some(index)
    }

    /// Total number of items the queue was created over.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the queue was created over zero items.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of items not yet claimed.
    pub fn remaining(&self) -> usize {
        let cursor = self
            .cursor
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        self.len - *cursor
    }
}
