use crate::constants::*;
use crate::error::ConfigError;
use crate::replacement::ReplacementPolicy;

/// Parameters of one translation session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub num_frames: usize,
    pub policy: ReplacementPolicy,
    pub tlb_size: usize,
    pub page_size: usize,
}

impl SessionConfig {
    /// Default TLB and page geometry with the given frame pool
    pub fn new(num_frames: usize, policy: ReplacementPolicy) -> Self {
        SessionConfig {
            num_frames,
            policy,
            tlb_size: TLB_SIZE,
            page_size: PAGE_SIZE,
        }
    }

    pub fn with_tlb_size(mut self, tlb_size: usize) -> Self {
        self.tlb_size = tlb_size;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_frames == 0 {
            return Err(ConfigError::ZeroFrames);
        }
        if self.tlb_size == 0 {
            return Err(ConfigError::ZeroTlbSize);
        }
        // Both the page and the offset need at least one bit of the address
        if !self.page_size.is_power_of_two() || self.page_size < 2 || self.page_size > ADDRESS_SPACE / 2 {
            return Err(ConfigError::InvalidPageSize(self.page_size));
        }
        Ok(())
    }

    /// Bits of a logical address taken by the offset
    #[inline]
    pub fn offset_bits(&self) -> u32 {
        self.page_size.trailing_zeros()
    }

    /// Number of pages in the 16-bit address space
    #[inline]
    pub fn num_pages(&self) -> usize {
        ADDRESS_SPACE / self.page_size
    }

    /// Frames actually allocated. Only distinct pages ever occupy a frame,
    /// so a pool larger than the address space is capped at one frame per page.
    #[inline]
    pub fn resident_frames(&self) -> usize {
        self.num_frames.min(self.num_pages())
    }
}
