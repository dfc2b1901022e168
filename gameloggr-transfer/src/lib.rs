//! JSON backup and restore for the game collection.
//!
//! This crate owns the versioned export document, writing it from the
//! store, and merging it back with natural-key deduplication.

pub mod envelope;
pub mod error;
pub mod export;
pub mod import;
pub mod progress;

pub use envelope::{
    ExportEnvelope, ExportedGame, ExportedHardware, ExportedHelpfulLink, ExportedPlatform,
    ExportedPlayLogEntry, CURRENT_VERSION,
};
pub use error::TransferError;
pub use export::{
    encode_envelope, export_collection, export_file_name, export_game, export_json,
};
pub use import::{decode_envelope, import_data, import_envelope, import_game, ImportResult};
pub use progress::{ImportStage, ItemOutcome, LogProgress, SilentProgress, TransferProgress};
