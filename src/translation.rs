use crate::constants::*;

/// Represents the decomposed components of a Logical Address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicalAddress {
    pub raw: u16,
    pub page: usize,
    pub offset: usize,
}

impl LogicalAddress {
    /// Decompose a raw address using the default 256-byte page geometry
    pub fn from_raw(raw: u16) -> Self {
        let page = ((raw >> OFFSET_BITS) & PAGE_MASK) as usize;
        let offset = (raw & OFFSET_MASK) as usize;

        LogicalAddress { raw, page, offset }
    }

    /// Decompose a raw address for a page of `1 << offset_bits` bytes
    pub fn split(raw: u16, offset_bits: u32) -> Self {
        let page = (raw as usize) >> offset_bits;
        let offset = (raw as usize) & ((1 << offset_bits) - 1);

        LogicalAddress { raw, page, offset }
    }

    /// Physical address of this offset inside `frame`
    #[inline]
    pub fn physical(&self, frame: usize, page_size: usize) -> u32 {
        (frame * page_size + self.offset) as u32
    }
}

impl std::fmt::Display for LogicalAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LA({}) = (page={}, offset={})", self.raw, self.page, self.offset)
    }
}

/// Which structure resolved a reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    TlbHit,
    PageTableHit,
    PageFault,
}

/// Outcome of one successful translation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translation {
    pub logical: u16,
    pub physical: u32,
    pub value: u8,
    pub resolution: Resolution,
}

impl Translation {
    /// The byte as the report prints it (a signed char)
    #[inline]
    pub fn signed_value(&self) -> i8 {
        self.value as i8
    }
}
