//! Persistence: the save record, its codecs and storage backends.
//!
//! - `SaveFile`: Flat, versioned snapshot with strict validation
//! - `SaveCodec`: JSON (default) or bincode bytes
//! - `SaveStorage`: Key-value byte store the record is written to
//! - `MemoryStorage` / `FileStorage`: The two bundled stores

pub mod record;
pub mod storage;

pub use record::{LoadOutcome, SaveCodec, SaveFile, SAVE_KEY, SAVE_VERSION};
pub use storage::{FileStorage, MemoryStorage, SaveStorage};
