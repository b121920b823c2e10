//! Client-local persisted state.
//!
//! A small key-value store holding plain-text values between runs, plus a
//! typed [`StateSlot`] that treats missing or corrupted content as absent.
//!
//! Stores assume a single writer. Read-modify-write sequences through a
//! store are not guarded against interleaving with another process.

pub mod error;
pub mod file;
pub mod memory;
pub mod slot;
pub mod store;

pub use error::{Result, StateError};
pub use file::FileStateStore;
pub use memory::InMemoryStateStore;
pub use slot::StateSlot;
pub use store::StateStore;
