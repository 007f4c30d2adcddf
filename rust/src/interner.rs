//! Task id interning.
//!
//! Maps string task ids to dense integer indices so the graph can be stored as
//! flat arrays.

use rustc_hash::FxHashMap;

/// Dense task index (u32 for compact adjacency lists).
pub type TaskIdx = u32;

/// Bidirectional id <-> index mapping. Indices follow insertion order.
#[derive(Debug, Clone, Default)]
pub struct TaskIdInterner {
    to_idx: FxHashMap<String, TaskIdx>,
    from_idx: Vec<String>,
}

impl TaskIdInterner {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            to_idx: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            from_idx: Vec::with_capacity(capacity),
        }
    }

    /// Intern a new id. Returns `None` if the id was already taken.
    pub fn insert_unique(&mut self, id: &str) -> Option<TaskIdx> {
        if self.to_idx.contains_key(id) {
            return None;
        }
        let idx = self.from_idx.len() as TaskIdx;
        self.from_idx.push(id.to_string());
        self.to_idx.insert(id.to_string(), idx);
        Some(idx)
    }

    #[inline]
    pub fn get(&self, id: &str) -> Option<TaskIdx> {
        self.to_idx.get(id).copied()
    }

    /// Id for an index, if this interner issued it.
    #[inline]
    pub fn resolve(&self, idx: TaskIdx) -> Option<&str> {
        self.from_idx.get(idx as usize).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.from_idx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.from_idx.is_empty()
    }
}
