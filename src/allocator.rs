use crate::error::{AllocationError, DeallocationError};

/// One contiguous range of the managed address space.
///
/// Blocks are kept in ascending address order; the sequence as a whole covers
/// the entire configured memory with no gaps or overlaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryBlock {
    pub id: u32,
    pub size: u32,
    pub allocated: bool,
}

/// A transient allocation request. Not retained once its block is assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Process {
    pub id: u32,
    pub size: u32,
}

/// Contiguous-memory partition allocator using a best-fit placement policy.
///
/// The block sequence is an index-addressable vector rather than a linked
/// structure, so splitting and coalescing are plain insert/remove operations.
pub struct Allocator {
    blocks: Vec<MemoryBlock>,
    total_size: u32,
    next_block_id: u32,
}

impl Allocator {
    /// Create an allocator managing `total_size` units as one free block.
    pub fn new(total_size: u32) -> Self {
        Allocator {
            blocks: vec![MemoryBlock {
                id: 0,
                size: total_size,
                allocated: false,
            }],
            total_size,
            next_block_id: 1,
        }
    }

    /// Place a process into the free block leaving the smallest leftover.
    ///
    /// Among blocks with equal leftover the lowest-address one wins (the scan
    /// only replaces its candidate on strict improvement). An exact fit
    /// relabels the block in place; a positive leftover splits the block,
    /// inserting a fresh free remainder immediately after it.
    ///
    /// Returns the id of the block the process now occupies.
    pub fn allocate_best_fit(&mut self, process: Process) -> Result<u32, AllocationError> {
        if process.size == 0 {
            return Err(AllocationError::InvalidSize);
        }

        let mut best: Option<usize> = None;
        let mut min_leftover = u32::MAX;
        for (i, block) in self.blocks.iter().enumerate() {
            if !block.allocated && block.size >= process.size {
                let leftover = block.size - process.size;
                if leftover < min_leftover {
                    best = Some(i);
                    min_leftover = leftover;
                }
            }
        }

        let i = best.ok_or(AllocationError::NoFit {
            requested: process.size,
        })?;

        if self.blocks[i].size > process.size {
            // Split: the chosen block shrinks to the requested size and the
            // remainder becomes a new free block right after it.
            let remainder = MemoryBlock {
                id: self.next_block_id,
                size: self.blocks[i].size - process.size,
                allocated: false,
            };
            self.next_block_id += 1;
            self.blocks[i].size = process.size;
            self.blocks.insert(i + 1, remainder);
        }
        self.blocks[i].allocated = true;
        self.blocks[i].id = process.id;

        Ok(self.blocks[i].id)
    }

    /// Free the block held by `process_id`, then merge adjacent free blocks.
    pub fn deallocate(&mut self, process_id: u32) -> Result<(), DeallocationError> {
        let i = self
            .blocks
            .iter()
            .position(|b| b.allocated && b.id == process_id)
            .ok_or(DeallocationError::NotFound(process_id))?;

        self.blocks[i].allocated = false;
        self.merge_free_blocks();
        Ok(())
    }

    /// The current block sequence, in ascending address order.
    pub fn snapshot(&self) -> &[MemoryBlock] {
        &self.blocks
    }

    /// Total memory managed by this allocator.
    #[inline]
    pub fn total_size(&self) -> u32 {
        self.total_size
    }

    /// Merge every maximal run of consecutive free blocks into its first
    /// (lowest-address) block. One forward pass is enough because address
    /// order never changes between passes.
    fn merge_free_blocks(&mut self) {
        let mut i = 0;
        while i + 1 < self.blocks.len() {
            if !self.blocks[i].allocated && !self.blocks[i + 1].allocated {
                self.blocks[i].size += self.blocks[i + 1].size;
                self.blocks.remove(i + 1);
            } else {
                i += 1;
            }
        }
    }
}
