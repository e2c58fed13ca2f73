use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use crate::error::{ConfigError, Result};
use crate::memory::{BackingStore, PhysicalMemory};
use crate::page_table::PageTable;

/// Frame eviction discipline, fixed for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplacementPolicy {
    /// Evict the frame allocated longest ago
    #[default]
    Fifo,
    /// Evict the frame referenced longest ago
    Lru,
}

impl FromStr for ReplacementPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FIFO" => Ok(ReplacementPolicy::Fifo),
            "LRU" => Ok(ReplacementPolicy::Lru),
            _ => Err(ConfigError::UnknownPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for ReplacementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplacementPolicy::Fifo => write!(f, "FIFO"),
            ReplacementPolicy::Lru => write!(f, "LRU"),
        }
    }
}

/// Resident frames in eviction order; the front is the next victim
#[derive(Debug, Clone, Default)]
pub struct ReplacementQueue {
    frames: VecDeque<usize>,
}

impl ReplacementQueue {
    pub fn with_capacity(capacity: usize) -> Self {
        ReplacementQueue {
            frames: VecDeque::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn push_back(&mut self, frame: usize) {
        self.frames.push_back(frame);
    }

    pub fn pop_front(&mut self) -> Option<usize> {
        self.frames.pop_front()
    }

    /// Position of `frame`, counted from the front
    pub fn find_by_frame(&self, frame: usize) -> Option<usize> {
        self.frames.iter().position(|&f| f == frame)
    }

    /// Move `frame` to the back. Returns false if it is not queued.
    pub fn touch(&mut self, frame: usize) -> bool {
        match self.find_by_frame(frame) {
            Some(idx) => {
                self.frames.remove(idx);
                self.frames.push_back(frame);
                true
            }
            None => false,
        }
    }

    pub fn snapshot(&self) -> Vec<usize> {
        self.frames.iter().copied().collect()
    }
}

/// Frame reclaimed from a resident page during a fault
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Eviction {
    pub frame: usize,
    pub page: Option<usize>,
}

/// Result of servicing a page fault
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fault {
    pub frame: usize,
    pub evicted: Option<Eviction>,
}

/// Picks frames for faulting pages and loads them.
///
/// FIFO and LRU share the queue; they differ only in whether hits reorder it.
pub struct ReplacementEngine {
    policy: ReplacementPolicy,
    queue: ReplacementQueue,
    num_frames: usize,
    scratch: Vec<u8>,
}

impl ReplacementEngine {
    pub fn new(policy: ReplacementPolicy, num_frames: usize, page_size: usize) -> Self {
        ReplacementEngine {
            policy,
            queue: ReplacementQueue::with_capacity(num_frames),
            num_frames,
            scratch: vec![0u8; page_size],
        }
    }

    pub fn queue(&self) -> &ReplacementQueue {
        &self.queue
    }

    /// Note a reference to an already resident frame
    pub fn record_hit(&mut self, frame: usize) {
        if self.policy == ReplacementPolicy::Lru {
            self.queue.touch(frame);
        }
    }

    /// Bring `page` into memory and return the frame now holding it.
    ///
    /// Frames are handed out in order 0, 1, 2, ... until the pool is full,
    /// then the front of the queue is reused. The page is read before any
    /// structure is changed, so a failed read leaves the session untouched.
    pub fn fault<S: BackingStore + ?Sized>(
        &mut self,
        page: usize,
        page_table: &mut PageTable,
        memory: &mut PhysicalMemory,
        store: &mut S,
    ) -> Result<Fault> {
        store.read_page(page, &mut self.scratch)?;

        let (frame, evicted) = if self.queue.len() < self.num_frames {
            (self.queue.len(), None)
        } else {
            // The queue is full and num_frames is positive, so it has a front
            let frame = self.queue.pop_front().unwrap_or_default();
            let victim = page_table.invalidate_frame(frame);
            log::debug!("evicting page {:?} from frame {} ({})", victim, frame, self.policy);
            (frame, Some(Eviction { frame, page: victim }))
        };

        memory.frame_mut(frame).copy_from_slice(&self.scratch);
        page_table.bind(page, frame);
        self.queue.push_back(frame);

        log::debug!("page {} loaded into frame {}", page, frame);
        Ok(Fault { frame, evicted })
    }
}
