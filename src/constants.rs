pub const OFFSET_BITS: u32 = 8;
pub const PAGE_BITS: u32 = 8;

pub const PAGE_SIZE: usize = 1 << OFFSET_BITS;
pub const NUM_PAGES: usize = 1 << PAGE_BITS;
pub const TLB_SIZE: usize = 16;

/// Size of the logical address space (16-bit addresses)
pub const ADDRESS_SPACE: usize = NUM_PAGES * PAGE_SIZE;
pub const MAX_LOGICAL_ADDRESS: u32 = (ADDRESS_SPACE - 1) as u32;

pub const OFFSET_MASK: u16 = (1 << OFFSET_BITS) - 1;
pub const PAGE_MASK: u16 = (1 << PAGE_BITS) - 1;

pub const DEFAULT_BACKING_STORE: &str = "BACKING_STORE.bin";
pub const DEFAULT_OUTPUT: &str = "correct.txt";

pub const PAGE_TABLE_DIRECTIVE: &str = "PageTable";
pub const TLB_DIRECTIVE: &str = "TLB";
