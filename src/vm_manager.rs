use crate::config::SessionConfig;
use crate::error::Result;
use crate::memory::{BackingStore, PhysicalMemory};
use crate::page_table::{PageTable, PageTableRow};
use crate::replacement::{ReplacementEngine, ReplacementPolicy};
use crate::stats::Statistics;
use crate::tlb::{Tlb, TlbEntry};
use crate::translation::{LogicalAddress, Resolution, Translation};

/// One address-translation session.
///
/// Owns the frame pool, page table, TLB, replacement queue and backing
/// store for the lifetime of a run. Nothing is shared between sessions.
pub struct Translator<S> {
    config: SessionConfig,
    memory: PhysicalMemory,
    page_table: PageTable,
    tlb: Tlb,
    replacer: ReplacementEngine,
    store: S,
    stats: Statistics,
}

impl<S: BackingStore> Translator<S> {
    /// Validate `config` and allocate an empty session
    pub fn new(config: SessionConfig, store: S) -> Result<Self> {
        config.validate()?;

        log::info!(
            "session: {} frames, {} replacement, TLB of {}, {}-byte pages",
            config.num_frames,
            config.policy,
            config.tlb_size,
            config.page_size
        );

        Ok(Translator {
            memory: PhysicalMemory::new(config.resident_frames(), config.page_size),
            page_table: PageTable::new(config.num_pages()),
            tlb: Tlb::new(config.tlb_size),
            replacer: ReplacementEngine::new(config.policy, config.resident_frames(), config.page_size),
            store,
            stats: Statistics::default(),
            config,
        })
    }

    /// Resolve a logical address to its physical address and byte.
    ///
    /// Only a failed page load can fail; the run is expected to stop there.
    pub fn translate(&mut self, raw: u16) -> Result<Translation> {
        self.stats.total_references += 1;
        let la = LogicalAddress::split(raw, self.config.offset_bits());

        let (frame, resolution) = if let Some(frame) = self.tlb.lookup(la.page) {
            self.stats.tlb_hits += 1;
            if self.config.policy == ReplacementPolicy::Lru {
                self.tlb.touch(la.page);
            }
            self.replacer.record_hit(frame);
            (frame, Resolution::TlbHit)
        } else if let Some(frame) = self.page_table.lookup(la.page) {
            self.cache(la.page, frame);
            self.replacer.record_hit(frame);
            (frame, Resolution::PageTableHit)
        } else {
            self.stats.page_faults += 1;
            let fault = self.replacer.fault(
                la.page,
                &mut self.page_table,
                &mut self.memory,
                &mut self.store,
            )?;
            if let Some(eviction) = fault.evicted {
                if let Some(stale) = self.tlb.invalidate_frame(eviction.frame) {
                    log::debug!("dropped stale TLB entry {} -> {}", stale.page, stale.frame);
                }
            }
            self.cache(la.page, fault.frame);
            (fault.frame, Resolution::PageFault)
        };

        let translation = Translation {
            logical: raw,
            physical: la.physical(frame, self.config.page_size),
            value: self.memory.read(frame, la.offset),
            resolution,
        };

        log::trace!(
            "{} -> frame {} ({:?}), physical {}",
            la,
            frame,
            resolution,
            translation.physical
        );
        Ok(translation)
    }

    /// Translate a batch, stopping at the first failed page load
    pub fn translate_all(&mut self, addresses: &[u16]) -> Result<Vec<Translation>> {
        addresses.iter().map(|&raw| self.translate(raw)).collect()
    }

    fn cache(&mut self, page: usize, frame: usize) {
        if let Some(evicted) = self.tlb.insert(page, frame) {
            log::debug!("TLB full, evicted {} -> {}", evicted.page, evicted.frame);
        }
    }

    pub fn stats(&self) -> Statistics {
        self.stats
    }

    pub fn memory(&self) -> &PhysicalMemory {
        &self.memory
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Page table rows ordered by page number
    pub fn snapshot_page_table(&self) -> Vec<PageTableRow> {
        self.page_table.snapshot()
    }

    /// TLB entries from oldest to newest
    pub fn snapshot_tlb(&self) -> Vec<TlbEntry> {
        self.tlb.snapshot()
    }

    /// Resident frames, next victim first
    pub fn snapshot_frames(&self) -> Vec<usize> {
        self.replacer.queue().snapshot()
    }
}
