//! Rules that span several entities: hardware storage and game collections.

use crate::error::ModelError;
use crate::types::{Game, GameStatus, Hardware};

// ── Storage ─────────────────────────────────────────────────────────────────

/// Storage accounting for one piece of hardware.
#[derive(Debug, Clone, PartialEq)]
pub struct HardwareUsage {
    pub name: String,
    pub total_storage_gb: f64,
    pub used_storage_gb: f64,
    /// Installed games linked to this hardware.
    pub installed_games: usize,
}

impl HardwareUsage {
    /// Compute usage from every game linked to `hardware`. Only installed
    /// games count toward used space.
    pub fn compute<'a>(hardware: &Hardware, games: impl IntoIterator<Item = &'a Game>) -> Self {
        let mut used_mb = 0.0;
        let mut installed_games = 0;
        for game in games {
            if game.is_installed && game.linked_hardware.as_deref() == Some(hardware.name.as_str()) {
                used_mb += game.game_size_mb;
                installed_games += 1;
            }
        }
        Self {
            name: hardware.name.clone(),
            total_storage_gb: hardware.total_storage_gb(),
            used_storage_gb: used_mb / 1000.0,
            installed_games,
        }
    }

    pub fn available_storage_gb(&self) -> f64 {
        self.total_storage_gb - self.used_storage_gb
    }
}

/// Check that `game` fits in the space left on the hardware described by
/// `usage`. A game already counted in `usage` should be excluded by the caller.
pub fn check_install_fits(usage: &HardwareUsage, game: &Game) -> Result<(), ModelError> {
    let required_gb = game.game_size_gb();
    let available_gb = usage.available_storage_gb();
    if available_gb < required_gb {
        return Err(ModelError::InsufficientStorage {
            hardware: usage.name.clone(),
            required_gb,
            available_gb,
        });
    }
    Ok(())
}

/// Check that hardware resized to `capacity_gb` still holds everything
/// installed on it.
pub fn check_capacity(usage: &HardwareUsage, capacity_gb: f64) -> Result<(), ModelError> {
    if usage.used_storage_gb > capacity_gb {
        return Err(ModelError::StorageOverCommitted {
            hardware: usage.name.clone(),
            used_gb: usage.used_storage_gb,
            capacity_gb,
        });
    }
    Ok(())
}

// ── Collections ─────────────────────────────────────────────────────────────

/// A collection can only be marked Completed once every sub-game is.
pub fn check_can_complete(collection: &Game, sub_games: &[Game]) -> Result<(), ModelError> {
    let remaining = sub_games
        .iter()
        .filter(|g| g.status != GameStatus::Completed)
        .count();
    if remaining > 0 {
        return Err(ModelError::IncompleteCollection {
            title: collection.title.clone(),
            remaining,
        });
    }
    Ok(())
}

/// Validate a star rating (0 to 5 inclusive, half steps allowed).
pub fn check_rating(rating: f64) -> Result<f64, ModelError> {
    if !(0.0..=5.0).contains(&rating) {
        return Err(ModelError::InvalidRating(rating));
    }
    Ok(rating)
}
