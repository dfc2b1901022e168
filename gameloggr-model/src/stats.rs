//! Aggregate statistics over the owned collection.

use std::collections::{BTreeMap, HashMap};

use uuid::Uuid;

use crate::types::{Game, GameStatus, Hardware, Platform};

/// Label used for games with no platform.
pub const NO_PLATFORM: &str = "No Platform";

const TOP_N: usize = 5;

/// Purchase value of the games on one platform.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformValue {
    pub platform_name: String,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCount {
    pub status: GameStatus,
    pub count: usize,
}

/// A game reference in a ranked list.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedGame {
    pub id: Uuid,
    pub title: String,
    /// Hours played.
    pub hours: f64,
}

impl RankedGame {
    fn from_game(game: &Game) -> Self {
        Self {
            id: game.id,
            title: game.title.clone(),
            hours: game.total_time_played(),
        }
    }
}

/// Collection statistics. Wishlisted games are excluded throughout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionStats {
    pub games: usize,
    pub hardware: usize,
    pub five_star_games: usize,

    pub games_purchase_total: f64,
    pub games_msrp_total: f64,
    pub hardware_purchase_total: f64,
    pub hardware_msrp_total: f64,

    /// Total hours played across all games.
    pub total_time_played: f64,

    pub by_status: Vec<StatusCount>,
    /// Platforms with non-zero value, highest first.
    pub value_by_platform: Vec<PlatformValue>,

    pub top_played: Vec<RankedGame>,
    /// Five-star games, most recently completed first.
    pub top_rated: Vec<RankedGame>,
    pub recently_completed: Vec<RankedGame>,
    pub recently_purchased: Vec<RankedGame>,
    pub oldest_backlog: Vec<RankedGame>,
}

impl CollectionStats {
    pub fn compute(games: &[Game], hardware: &[Hardware], platforms: &[Platform]) -> Self {
        let owned: Vec<&Game> = games.iter().filter(|g| !g.is_wishlisted).collect();
        let platform_names: HashMap<i64, &str> =
            platforms.iter().map(|p| (p.id, p.name.as_str())).collect();

        let mut stats = Self {
            games: owned.len(),
            hardware: hardware.len(),
            five_star_games: owned.iter().filter(|g| g.star_rating >= 5.0).count(),
            games_purchase_total: owned.iter().map(|g| g.purchase_price).sum(),
            games_msrp_total: owned.iter().map(|g| g.msrp).sum(),
            hardware_purchase_total: hardware.iter().map(|h| h.purchase_price).sum(),
            hardware_msrp_total: hardware.iter().map(|h| h.msrp).sum(),
            total_time_played: owned.iter().map(|g| g.total_time_played()).sum(),
            ..Default::default()
        };

        // Status counts in display order
        let mut by_status: BTreeMap<GameStatus, usize> = BTreeMap::new();
        for game in &owned {
            *by_status.entry(game.status).or_default() += 1;
        }
        stats.by_status = by_status
            .into_iter()
            .map(|(status, count)| StatusCount { status, count })
            .collect();

        // Value per platform
        let mut values: HashMap<&str, f64> = HashMap::new();
        for game in &owned {
            let name = game
                .platform_id
                .and_then(|id| platform_names.get(&id).copied())
                .unwrap_or(NO_PLATFORM);
            *values.entry(name).or_default() += game.purchase_price;
        }
        let mut value_by_platform: Vec<PlatformValue> = values
            .into_iter()
            .filter(|(_, v)| *v > 0.0)
            .map(|(name, value)| PlatformValue {
                platform_name: name.to_string(),
                value,
            })
            .collect();
        value_by_platform.sort_by(|a, b| {
            b.value
                .total_cmp(&a.value)
                .then_with(|| a.platform_name.cmp(&b.platform_name))
        });
        stats.value_by_platform = value_by_platform;

        // Ranked lists
        let mut played: Vec<&Game> = owned
            .iter()
            .copied()
            .filter(|g| g.total_time_played() > 0.0)
            .collect();
        played.sort_by(|a, b| b.total_time_played().total_cmp(&a.total_time_played()));
        stats.top_played = top(played);

        // None sorts below any date, so unfinished games come last
        let mut rated: Vec<&Game> = owned
            .iter()
            .copied()
            .filter(|g| g.star_rating >= 5.0)
            .collect();
        rated.sort_by(|a, b| b.completion_date.cmp(&a.completion_date));
        stats.top_rated = top(rated);

        let mut completed: Vec<&Game> = owned
            .iter()
            .copied()
            .filter(|g| g.status == GameStatus::Completed)
            .collect();
        completed.sort_by(|a, b| b.completion_date.cmp(&a.completion_date));
        stats.recently_completed = top(completed);

        let mut purchased = owned.clone();
        purchased.sort_by(|a, b| b.purchase_date.cmp(&a.purchase_date));
        stats.recently_purchased = top(purchased);

        let mut backlog: Vec<&Game> = owned
            .iter()
            .copied()
            .filter(|g| g.status != GameStatus::Completed)
            .collect();
        backlog.sort_by(|a, b| a.purchase_date.cmp(&b.purchase_date));
        stats.oldest_backlog = top(backlog);

        stats
    }

    /// MSRP minus purchase price for games.
    pub fn games_savings(&self) -> f64 {
        self.games_msrp_total - self.games_purchase_total
    }

    pub fn hardware_savings(&self) -> f64 {
        self.hardware_msrp_total - self.hardware_purchase_total
    }

    pub fn combined_purchase_total(&self) -> f64 {
        self.games_purchase_total + self.hardware_purchase_total
    }

    pub fn combined_msrp_total(&self) -> f64 {
        self.games_msrp_total + self.hardware_msrp_total
    }

    pub fn combined_savings(&self) -> f64 {
        self.combined_msrp_total() - self.combined_purchase_total()
    }
}

fn top(games: Vec<&Game>) -> Vec<RankedGame> {
    games
        .into_iter()
        .take(TOP_N)
        .map(RankedGame::from_game)
        .collect()
}
