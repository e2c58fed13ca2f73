use std::collections::VecDeque;

/// A cached page -> frame mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TlbEntry {
    pub page: usize,
    pub frame: usize,
}

/// Fully associative translation cache.
///
/// Entries are kept oldest first. Inserting into a full TLB drops the front
/// entry, whatever frame replacement policy the session uses. `touch` moves
/// an entry to the back, so under LRU the front is also the least recently
/// used.
#[derive(Debug, Clone)]
pub struct Tlb {
    entries: VecDeque<TlbEntry>,
    capacity: usize,
}

impl Tlb {
    pub fn new(capacity: usize) -> Self {
        Tlb {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Linear scan for `page`
    pub fn lookup(&self, page: usize) -> Option<usize> {
        self.entries.iter().find(|e| e.page == page).map(|e| e.frame)
    }

    /// Cache `page -> frame`, returning the entry evicted to make room.
    ///
    /// An existing entry for `page` is replaced so that pages stay unique.
    pub fn insert(&mut self, page: usize, frame: usize) -> Option<TlbEntry> {
        if let Some(idx) = self.position_of(page) {
            self.entries.remove(idx);
        }

        let evicted = if self.entries.len() >= self.capacity {
            self.entries.pop_front()
        } else {
            None
        };
        self.entries.push_back(TlbEntry { page, frame });
        evicted
    }

    /// Mark `page` as most recently used
    pub fn touch(&mut self, page: usize) {
        if let Some(idx) = self.position_of(page) {
            if let Some(entry) = self.entries.remove(idx) {
                self.entries.push_back(entry);
            }
        }
    }

    /// Index of the entry caching `frame`, oldest first
    pub fn find_by_frame(&self, frame: usize) -> Option<usize> {
        self.entries.iter().position(|e| e.frame == frame)
    }

    /// Drop the entry that maps to `frame`, if any
    pub fn invalidate_frame(&mut self, frame: usize) -> Option<TlbEntry> {
        self.find_by_frame(frame).and_then(|idx| self.entries.remove(idx))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries from oldest to newest
    pub fn snapshot(&self) -> Vec<TlbEntry> {
        self.entries.iter().copied().collect()
    }

    fn position_of(&self, page: usize) -> Option<usize> {
        self.entries.iter().position(|e| e.page == page)
    }
}
