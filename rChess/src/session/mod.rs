//! Session storage.

mod context;
mod file;
mod memory;
mod traits;

pub use context::{Session, TOKEN_KEY};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use traits::KeyValueStore;
