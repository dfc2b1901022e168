//! SQLite persistence layer for the game collection.
//!
//! Provides schema creation, CRUD operations, and query APIs
//! backed by SQLite (via rusqlite with bundled feature).

pub mod operations;
pub mod queries;
pub mod schema;

pub use operations::{
    add_helpful_link, add_play_log_entry, add_sub_game, clear_all, delete_game,
    delete_hardware, delete_helpful_link, delete_play_log_entry, insert_game,
    insert_hardware_if_absent, insert_platform_if_absent, install_game, move_to_collection,
    set_game_status, uninstall_game, unmark_collection, update_game, upsert_hardware,
    upsert_platform, OperationError,
};
pub use queries::{
    backlog, collection_by_platform, collection_counts, find_game, find_games_by_title,
    find_hardware, find_platform, graveyard, hardware_usage, links_for_game, list_games,
    list_hardware, list_platforms, load_collection, play_log_for_game, sub_games, wishlist,
    Collection, CollectionCounts, GameFilter,
};
pub use schema::{open_database, open_memory, SchemaError};
