use std::collections::HashMap;

/// Victim-selection strategy for the page replacement loop.
///
/// The shared loop in [`crate::paging`] owns hit/fault detection, the
/// empty-slot fast path, and trace emission; a policy only supplies the
/// bookkeeping hooks and the eviction decision. `select_victim` is called
/// only when every slot is occupied.
pub trait ReplacementPolicy {
    /// Called when the referenced page is already resident.
    fn note_hit(&mut self, _page: u32, _step: usize) {}

    /// Pick the slot to evict. `step` is the current position in the
    /// reference string and `references` is the full known string, so
    /// lookahead policies can scan forward from `step + 1`.
    fn select_victim(&mut self, frames: &[Option<u32>], step: usize, references: &[u32]) -> usize;

    /// Called after a faulted-in page has been placed into its slot.
    fn note_placement(&mut self, _page: u32, _step: usize) {}
}

/// Which of the four replacement strategies a run should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    Fifo,
    Lru,
    Optimal,
    Lfu,
}

/// Round-robin eviction. A single circular cursor over slot indices advances
/// once per fault, whether the fault filled an empty slot or evicted; when
/// slots fill in index order this matches textbook FIFO exactly.
pub struct Fifo {
    cursor: usize,
    capacity: usize,
}

impl Fifo {
    pub fn new(capacity: usize) -> Self {
        Fifo { cursor: 0, capacity }
    }
}

impl ReplacementPolicy for Fifo {
    fn select_victim(&mut self, _frames: &[Option<u32>], _step: usize, _references: &[u32]) -> usize {
        self.cursor
    }

    fn note_placement(&mut self, _page: u32, _step: usize) {
        self.cursor = (self.cursor + 1) % self.capacity;
    }
}

/// Evicts the resident page with the smallest last-used step.
pub struct Lru {
    last_used: HashMap<u32, usize>,
}

impl Lru {
    pub fn new() -> Self {
        Lru {
            last_used: HashMap::new(),
        }
    }
}

impl Default for Lru {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplacementPolicy for Lru {
    fn note_hit(&mut self, page: u32, step: usize) {
        self.last_used.insert(page, step);
    }

    fn select_victim(&mut self, frames: &[Option<u32>], _step: usize, _references: &[u32]) -> usize {
        // Strict less-than keeps the lowest slot index on ties.
        let mut victim = 0;
        let mut oldest = usize::MAX;
        for (i, slot) in frames.iter().enumerate() {
            if let Some(page) = slot {
                let used = self.last_used.get(page).copied().unwrap_or(0);
                if used < oldest {
                    victim = i;
                    oldest = used;
                }
            }
        }
        victim
    }

    fn note_placement(&mut self, page: u32, step: usize) {
        self.last_used.insert(page, step);
    }
}

/// Evicts the resident page whose next use lies farthest in the future,
/// judged by scanning forward in the already-known reference string.
pub struct Optimal;

impl ReplacementPolicy for Optimal {
    fn select_victim(&mut self, frames: &[Option<u32>], step: usize, references: &[u32]) -> usize {
        let mut victim = 0;
        let mut farthest = 0;
        for (i, slot) in frames.iter().enumerate() {
            let page = match slot {
                Some(page) => *page,
                None => continue,
            };
            let next_use = references[step + 1..].iter().position(|&r| r == page);
            match next_use {
                // Never referenced again: nothing can beat this, and the
                // first such slot in index order wins.
                None => return i,
                Some(distance) => {
                    // Strict greater-than keeps the lowest slot index on ties.
                    if distance + 1 > farthest {
                        victim = i;
                        farthest = distance + 1;
                    }
                }
            }
        }
        victim
    }
}

/// Evicts the resident page with the lowest cumulative reference frequency.
///
/// Counts are never reset: a page evicted and later re-admitted resumes from
/// its previous total.
pub struct Lfu {
    frequency: HashMap<u32, usize>,
}

impl Lfu {
    pub fn new() -> Self {
        Lfu {
            frequency: HashMap::new(),
        }
    }
}

impl Default for Lfu {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplacementPolicy for Lfu {
    fn note_hit(&mut self, page: u32, _step: usize) {
        *self.frequency.entry(page).or_insert(0) += 1;
    }

    fn select_victim(&mut self, frames: &[Option<u32>], _step: usize, _references: &[u32]) -> usize {
        let mut victim = 0;
        let mut lowest = usize::MAX;
        for (i, slot) in frames.iter().enumerate() {
            if let Some(page) = slot {
                let freq = self.frequency.get(page).copied().unwrap_or(0);
                if freq < lowest {
                    victim = i;
                    lowest = freq;
                }
            }
        }
        victim
    }

    fn note_placement(&mut self, page: u32, _step: usize) {
        // The reference that faulted this page in still counts toward it.
        *self.frequency.entry(page).or_insert(0) += 1;
    }
}
