//! Pending-work container with a fixed removal order.

use std::collections::VecDeque;
use std::fmt;

/// Removal order of a [`Storage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// Last in, first out. Explores one branch fully before backtracking.
    #[default]
    Stack,
    /// First in, first out. Finishes every trace of one length before the next.
    Queue,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stack => f.write_str("stack"),
            Self::Queue => f.write_str("queue"),
        }
    }
}

/// A LIFO or FIFO container, chosen once at construction.
///
/// Items are never deduplicated.
#[derive(Debug, Clone)]
pub enum Storage<T> {
    Stack(Vec<T>),
    Queue(VecDeque<T>),
}

impl<T> Storage<T> {
    /// Create an empty storage with the given removal order.
    pub fn new(mode: Mode) -> Self {
        match mode {
            Mode::Stack => Self::Stack(Vec::new()),
            Mode::Queue => Self::Queue(VecDeque::new()),
        }
    }

    /// The removal order this storage was created with.
    pub fn mode(&self) -> Mode {
        match self {
            Self::Stack(_) => Mode::Stack,
            Self::Queue(_) => Mode::Queue,
        }
    }

    /// Insert one item.
    pub fn store(&mut self, item: T) {
        match self {
            Self::Stack(v) => v.push(item),
            Self::Queue(q) => q.push_back(item),
        }
    }

    /// Remove and return the next item.
    ///
    /// Fails with [`StorageError::Empty`] when there is nothing left.
    pub fn retrieve(&mut self) -> Result<T, StorageError> {
        let item = match self {
            Self::Stack(v) => v.pop(),
            Self::Queue(q) => q.pop_front(),
        };
        item.ok_or(StorageError::Empty)
    }

    /// Number of pending items.
    pub fn len(&self) -> usize {
        match self {
            Self::Stack(v) => v.len(),
            Self::Queue(q) => q.len(),
        }
    }

    /// Whether no items are pending.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Errors returned by [`Storage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// `retrieve` was called with nothing stored.
    Empty,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("storage is empty"),
        }
    }
}

impl std::error::Error for StorageError {}
