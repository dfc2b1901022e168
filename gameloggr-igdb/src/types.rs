use chrono::DateTime;
use gameloggr_model::{Game, GameStatus, Platform};
use serde::{Deserialize, Serialize};

/// Access token returned by the Twitch OAuth endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// A game from the `games` endpoint. Only the fields the search query
/// requests are present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IgdbGame {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub cover: Option<IgdbImage>,
    #[serde(default)]
    pub platforms: Option<Vec<IgdbPlatform>>,
    /// Unix timestamp, seconds.
    #[serde(default)]
    pub first_release_date: Option<i64>,
    #[serde(default)]
    pub genres: Option<Vec<IgdbGenre>>,
    #[serde(default)]
    pub involved_companies: Option<Vec<IgdbInvolvedCompany>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IgdbPlatform {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub platform_logo: Option<IgdbImage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IgdbImage {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IgdbGenre {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IgdbInvolvedCompany {
    #[serde(default)]
    pub developer: bool,
    #[serde(default)]
    pub publisher: bool,
    pub company: IgdbCompany,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IgdbCompany {
    pub name: String,
}

/// Rewrite an IGDB image URL to the 1080p variant.
///
/// IGDB hands out protocol-relative URLs (`//images.igdb.com/...`) with a
/// size token in the path.
pub fn high_res_url(url: &str) -> String {
    let absolute = if url.starts_with("//") {
        format!("https:{url}")
    } else {
        url.to_string()
    };
    absolute
        .replace("t_thumb", "t_1080p")
        .replace("t_cover_big", "t_1080p")
}

impl IgdbImage {
    pub fn high_res_url(&self) -> Option<String> {
        self.url.as_deref().map(high_res_url)
    }
}

impl IgdbPlatform {
    pub fn to_platform(&self) -> Platform {
        Platform {
            id: self.id,
            name: self.name.clone(),
            logo_url: self.platform_logo.as_ref().and_then(IgdbImage::high_res_url),
        }
    }
}

impl IgdbGame {
    pub fn genre_names(&self) -> Vec<String> {
        self.genres
            .iter()
            .flatten()
            .map(|g| g.name.clone())
            .collect()
    }

    pub fn developers(&self) -> Vec<String> {
        self.companies(|c| c.developer)
    }

    pub fn publishers(&self) -> Vec<String> {
        self.companies(|c| c.publisher)
    }

    fn companies(&self, role: impl Fn(&IgdbInvolvedCompany) -> bool) -> Vec<String> {
        self.involved_companies
            .iter()
            .flatten()
            .filter(|c| role(c))
            .map(|c| c.company.name.clone())
            .collect()
    }

    pub fn platform_names(&self) -> Vec<&str> {
        self.platforms
            .iter()
            .flatten()
            .map(|p| p.name.as_str())
            .collect()
    }

    pub fn release_year(&self) -> Option<i32> {
        use chrono::Datelike;
        self.first_release_date
            .and_then(|ts| DateTime::from_timestamp(ts, 0))
            .map(|d| d.year())
    }

    /// Build a backlog game from this search result.
    pub fn to_new_game(&self, platform_id: Option<i64>) -> Game {
        let mut game = Game::new(self.name.clone());
        game.status = GameStatus::Backlog;
        game.platform_id = platform_id;
        game.cover_art_url = self.cover.as_ref().and_then(IgdbImage::high_res_url);
        game.release_date = self
            .first_release_date
            .and_then(|ts| DateTime::from_timestamp(ts, 0));
        game.genres = self.genre_names();
        game.developers = self.developers();
        game.publishers = self.publishers();
        game
    }
}

#[cfg(test)]
#[path = "tests/types_tests.rs"]
mod tests;
