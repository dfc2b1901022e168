//! Data model types for the game collection.
//!
//! These types represent the persistent collection: platforms, hardware,
//! games with their play logs and helpful links, and the status enums that
//! drive backlog and ownership views.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ── Platform ────────────────────────────────────────────────────────────────

/// A gaming platform, keyed by its IGDB catalog id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub logo_url: Option<String>,
}

impl Platform {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            logo_url: None,
        }
    }
}

// ── Hardware ────────────────────────────────────────────────────────────────

/// A console or device the user owns. The name is the natural key.
#[derive(Debug, Clone, PartialEq)]
pub struct Hardware {
    pub name: String,
    pub platform_id: Option<i64>,
    pub serial_number: Option<String>,
    pub purchase_price: f64,
    pub purchase_date: DateTime<Utc>,
    pub msrp: f64,
    pub release_date: Option<DateTime<Utc>>,
    pub internal_storage_gb: f64,
    pub external_storage_gb: f64,
}

impl Hardware {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            platform_id: None,
            serial_number: None,
            purchase_price: 0.0,
            purchase_date: Utc::now(),
            msrp: 0.0,
            release_date: None,
            internal_storage_gb: 0.0,
            external_storage_gb: 0.0,
        }
    }

    pub fn total_storage_gb(&self) -> f64 {
        self.internal_storage_gb + self.external_storage_gb
    }
}

// ── Play Log ────────────────────────────────────────────────────────────────

/// A single play session. `time_spent` is in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayLogEntry {
    /// Row id once persisted.
    pub id: Option<i64>,
    pub timestamp: DateTime<Utc>,
    pub time_spent: f64,
    pub notes: String,
    pub checkpoint: bool,
    pub title: Option<String>,
}

impl PlayLogEntry {
    pub fn new(timestamp: DateTime<Utc>, time_spent: f64, notes: impl Into<String>) -> Self {
        Self {
            id: None,
            timestamp,
            time_spent,
            notes: notes.into(),
            checkpoint: false,
            title: None,
        }
    }
}

/// A named link attached to a game (guides, wikis, maps).
#[derive(Debug, Clone, PartialEq)]
pub struct HelpfulLink {
    pub id: Option<i64>,
    pub name: String,
    pub url: String,
}

impl HelpfulLink {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            url: url.into(),
        }
    }
}

// ── Status Enums ────────────────────────────────────────────────────────────

/// Play progress of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GameStatus {
    Backlog,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    #[serde(rename = "On Hold")]
    OnHold,
    Dropped,
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::Backlog
    }
}

impl GameStatus {
    pub const ALL: [GameStatus; 5] = [
        Self::Backlog,
        Self::InProgress,
        Self::Completed,
        Self::OnHold,
        Self::Dropped,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Backlog => "Backlog",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::OnHold => "On Hold",
            Self::Dropped => "Dropped",
        }
    }

    /// Parse a status name, accepting stored labels and CLI spellings
    /// (`in-progress`, `on_hold`). Unknown values fall back to Backlog.
    pub fn from_str_loose(s: &str) -> Self {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "inprogress" | "playing" => Self::InProgress,
            "completed" | "done" => Self::Completed,
            "onhold" | "paused" => Self::OnHold,
            "dropped" | "abandoned" => Self::Dropped,
            _ => Self::Backlog,
        }
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a game is still physically with the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OwnershipStatus {
    #[serde(rename = "In Collection")]
    Owned,
    Sold,
    #[serde(rename = "Lent Out")]
    LentOut,
}

impl Default for OwnershipStatus {
    fn default() -> Self {
        Self::Owned
    }
}

impl OwnershipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owned => "In Collection",
            Self::Sold => "Sold",
            Self::LentOut => "Lent Out",
        }
    }

    pub fn from_str_loose(s: &str) -> Self {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "sold" => Self::Sold,
            "lentout" | "lent" => Self::LentOut,
            _ => Self::Owned,
        }
    }
}

impl std::fmt::Display for OwnershipStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Physical completeness of a boxed copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectorsGrade {
    Sealed,
    CompleteInBoxPlus,
    CompleteInBox,
    InCase,
    Loose,
}

impl CollectorsGrade {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Sealed => "Sealed",
            Self::CompleteInBoxPlus => "CIB+",
            Self::CompleteInBox => "CIB (Complete in Box)",
            Self::InCase => "In Case",
            Self::Loose => "Loose",
        }
    }
}

impl std::fmt::Display for CollectorsGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ── Game ────────────────────────────────────────────────────────────────────

/// A game in the collection or on the wishlist.
///
/// Time-to-beat values and `manually_set_total_time` are in hours;
/// `game_size_mb` is in megabytes.
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub id: Uuid,
    pub title: String,
    pub cover_art_url: Option<String>,
    pub platform_id: Option<i64>,
    pub purchase_date: DateTime<Utc>,
    pub is_digital: bool,
    pub purchase_price: f64,
    pub msrp: f64,
    pub status: GameStatus,
    pub start_date: Option<DateTime<Utc>>,
    pub completion_date: Option<DateTime<Utc>>,
    pub hltb_main: f64,
    pub hltb_extra: f64,
    pub hltb_completionist: f64,
    pub user_hltb_main: f64,
    pub user_hltb_extra: f64,
    pub user_hltb_completionist: f64,
    pub manually_set_total_time: f64,
    pub star_rating: f64,
    pub is_wishlisted: bool,
    pub ownership_status: OwnershipStatus,
    pub has_case: bool,
    pub has_manual: bool,
    pub has_inserts: bool,
    pub is_sealed: bool,
    pub is_installed: bool,
    pub game_size_mb: f64,
    /// Name of the hardware the game is installed on.
    pub linked_hardware: Option<String>,
    pub release_date: Option<DateTime<Utc>>,
    pub genres: Vec<String>,
    pub developers: Vec<String>,
    pub publishers: Vec<String>,
    pub is_sub_game: bool,
    pub parent_collection_id: Option<Uuid>,
    pub is_collection: bool,
    pub play_log: Vec<PlayLogEntry>,
    pub helpful_links: Vec<HelpfulLink>,
}

impl Game {
    /// A new backlog game with a fresh id, purchased now.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), title)
    }

    pub fn with_id(id: Uuid, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            cover_art_url: None,
            platform_id: None,
            purchase_date: Utc::now(),
            is_digital: false,
            purchase_price: 0.0,
            msrp: 0.0,
            status: GameStatus::Backlog,
            start_date: None,
            completion_date: None,
            hltb_main: 0.0,
            hltb_extra: 0.0,
            hltb_completionist: 0.0,
            user_hltb_main: 0.0,
            user_hltb_extra: 0.0,
            user_hltb_completionist: 0.0,
            manually_set_total_time: 0.0,
            star_rating: 0.0,
            is_wishlisted: false,
            ownership_status: OwnershipStatus::Owned,
            has_case: false,
            has_manual: false,
            has_inserts: false,
            is_sealed: false,
            is_installed: false,
            game_size_mb: 0.0,
            linked_hardware: None,
            release_date: None,
            genres: Vec::new(),
            developers: Vec::new(),
            publishers: Vec::new(),
            is_sub_game: false,
            parent_collection_id: None,
            is_collection: false,
            play_log: Vec::new(),
            helpful_links: Vec::new(),
        }
    }

    /// Hours played. A manual override wins over the play log sum.
    pub fn total_time_played(&self) -> f64 {
        if self.manually_set_total_time > 0.0 {
            self.manually_set_total_time
        } else {
            self.play_log.iter().map(|e| e.time_spent).sum::<f64>() / 3600.0
        }
    }

    pub fn collectors_grade(&self) -> CollectorsGrade {
        if self.is_sealed {
            CollectorsGrade::Sealed
        } else if self.has_case && self.has_manual && self.has_inserts {
            CollectorsGrade::CompleteInBoxPlus
        } else if self.has_case && self.has_manual {
            CollectorsGrade::CompleteInBox
        } else if self.has_case {
            CollectorsGrade::InCase
        } else {
            CollectorsGrade::Loose
        }
    }

    /// Not wishlisted, not a sub-game, and not yet completed. Sold and lent
    /// out games still count.
    pub fn is_backlog(&self) -> bool {
        !self.is_wishlisted && !self.is_sub_game && self.status != GameStatus::Completed
    }

    /// Shown in the main collection view.
    pub fn is_in_collection(&self) -> bool {
        self.ownership_status == OwnershipStatus::Owned && !self.is_wishlisted && !self.is_sub_game
    }

    pub fn game_size_gb(&self) -> f64 {
        self.game_size_mb / 1000.0
    }

    /// Play log entries marked as checkpoints.
    pub fn checkpoints(&self) -> impl Iterator<Item = &PlayLogEntry> {
        self.play_log.iter().filter(|e| e.checkpoint)
    }
}

// ── List Helpers ────────────────────────────────────────────────────────────

/// Split a comma-joined list, trimming pieces and dropping empty ones.
pub fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect()
}

/// Join a list into its comma-joined stored form.
pub fn join_list(items: &[String]) -> String {
    items.join(",")
}
