/// Reference counters for one session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Statistics {
    pub total_references: u64,
    pub page_faults: u64,
    pub tlb_hits: u64,
}

impl Statistics {
    /// Faults per reference, `None` before the first reference
    pub fn page_fault_rate(&self) -> Option<f64> {
        self.ratio(self.page_faults)
    }

    /// TLB hits per reference, `None` before the first reference
    pub fn tlb_hit_rate(&self) -> Option<f64> {
        self.ratio(self.tlb_hits)
    }

    fn ratio(&self, count: u64) -> Option<f64> {
        if self.total_references == 0 {
            None
        } else {
            Some(count as f64 / self.total_references as f64)
        }
    }
}
