/// One page table slot. A slot keeps its last frame after invalidation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTableEntry {
    pub frame: usize,
    pub valid: bool,
}

/// Row of a page table dump
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTableRow {
    pub page: usize,
    pub frame: usize,
    pub valid: bool,
}

/// Single-level page table indexed by page number.
///
/// Slots are created lazily on first bind, so a dump only lists pages
/// that were loaded at some point in the session.
#[derive(Debug, Clone)]
pub struct PageTable {
    entries: Vec<Option<PageTableEntry>>,
}

impl PageTable {
    pub fn new(num_pages: usize) -> Self {
        PageTable {
            entries: vec![None; num_pages],
        }
    }

    /// Frame holding `page`, only if the entry is valid
    #[inline]
    pub fn lookup(&self, page: usize) -> Option<usize> {
        match self.entries.get(page) {
            Some(Some(entry)) if entry.valid => Some(entry.frame),
            _ => None,
        }
    }

    pub fn entry(&self, page: usize) -> Option<PageTableEntry> {
        self.entries.get(page).copied().flatten()
    }

    pub fn bind(&mut self, page: usize, frame: usize) {
        self.entries[page] = Some(PageTableEntry { frame, valid: true });
    }

    /// Valid page currently mapped to `frame`
    pub fn find_by_frame(&self, frame: usize) -> Option<usize> {
        self.entries.iter().position(|slot| {
            matches!(slot, Some(entry) if entry.valid && entry.frame == frame)
        })
    }

    /// Clear the valid bit of whatever page occupies `frame`.
    ///
    /// Returns the page that lost its frame.
    pub fn invalidate_frame(&mut self, frame: usize) -> Option<usize> {
        let mut invalidated = None;
        for (page, slot) in self.entries.iter_mut().enumerate() {
            if let Some(entry) = slot {
                if entry.valid && entry.frame == frame {
                    entry.valid = false;
                    invalidated = Some(page);
                }
            }
        }
        invalidated
    }

    pub fn num_pages(&self) -> usize {
        self.entries.len()
    }

    /// Every created entry, ordered by page number
    pub fn snapshot(&self) -> Vec<PageTableRow> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(page, slot)| {
                slot.map(|entry| PageTableRow {
                    page,
                    frame: entry.frame,
                    valid: entry.valid,
                })
            })
            .collect()
    }
}
