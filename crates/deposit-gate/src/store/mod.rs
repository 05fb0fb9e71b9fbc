//! Typed key-value storage for gate state.
//!
//! Components never address raw bytes: every value lives under a
//! [`StateKey`] variant and is read back through the typed accessors of
//! [`StateRead`]. Mutations go through a [`StagedState`] overlay and reach a
//! [`StateStore`] only as one [`WriteBatch`] per successful operation.

mod error;
mod file;
mod keys;
mod memory;
mod staged;
mod traits;

pub use error::{StorageError, StorageResult};
pub use file::FileStore;
pub use keys::{RoleGrant, StateKey, StateValue};
pub use memory::MemoryStore;
pub use staged::StagedState;
pub use traits::{StateRead, StateStore, StateWrite, WriteBatch};
