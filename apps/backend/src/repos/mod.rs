//! Reading storage: the `ReadingStore` contract and its two backends.

pub mod memory;
pub mod readings;
pub mod sea;

pub use memory::MemoryReadingStore;
pub use readings::{DetailsKey, InterpretationKey, ReadingStore};
pub use sea::SeaReadingStore;
