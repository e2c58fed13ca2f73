pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod memory;
pub mod page_table;
pub mod replacement;
pub mod stats;
pub mod tlb;
pub mod translation;
pub mod vm_manager;

// Re-export commonly used items for convenience
pub use config::SessionConfig;
pub use constants::*;
pub use error::{ConfigError, Result, VmError};
pub use memory::{BackingStore, FileBackingStore, MemoryStore};
pub use replacement::ReplacementPolicy;
pub use stats::Statistics;
pub use translation::{LogicalAddress, Resolution, Translation};
pub use vm_manager::Translator;
