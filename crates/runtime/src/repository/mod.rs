//! Repository layer for dynamic session data.
//!
//! Repositories handle data that CHANGES during play: the case board saved
//! under named slots. Authored content (dialogs, case file, effects) is
//! loaded by `casebook-content`, not stored here.

mod error;
mod file;
mod memory;
mod traits;

pub use error::RepositoryError;
pub use file::FileStateRepository;
pub use memory::InMemoryStateRepository;
pub use traits::StateRepository;
