//! The versioned JSON export document.
//!
//! Field names are camelCase and dates are ISO-8601 UTC at second
//! precision, so files written by older builds keep loading.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Format version written by this build.
pub const CURRENT_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportEnvelope {
    pub version: String,
    #[serde(with = "iso8601")]
    pub export_date: DateTime<Utc>,
    #[serde(default)]
    pub games: Vec<ExportedGame>,
    #[serde(default)]
    pub platforms: Vec<ExportedPlatform>,
    #[serde(default)]
    pub hardware: Vec<ExportedHardware>,
}

impl ExportEnvelope {
    /// Whether this build can read the document's format version.
    pub fn is_supported_version(&self) -> bool {
        self.version.split('.').next() == CURRENT_VERSION.split('.').next()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedGame {
    pub id: Uuid,
    pub title: String,
    #[serde(rename = "coverArtURL", default, skip_serializing_if = "Option::is_none")]
    pub cover_art_url: Option<String>,
    #[serde(with = "iso8601::option", default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<DateTime<Utc>>,
    #[serde(with = "iso8601")]
    pub purchase_date: DateTime<Utc>,
    #[serde(with = "iso8601::option", default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(with = "iso8601::option", default, skip_serializing_if = "Option::is_none")]
    pub completion_date: Option<DateTime<Utc>>,
    pub is_digital: bool,
    pub purchase_price: f64,
    pub msrp: f64,
    pub status: String,
    #[serde(default)]
    pub star_rating: f64,
    #[serde(default)]
    pub is_wishlisted: bool,
    #[serde(default)]
    pub ownership_status: String,
    #[serde(default)]
    pub is_installed: bool,
    #[serde(rename = "gameSizeInMB", default)]
    pub game_size_mb: f64,
    /// Derived; written for readers, ignored on import.
    #[serde(default)]
    pub total_time_played: f64,
    #[serde(default)]
    pub manually_set_total_time: f64,
    #[serde(default)]
    pub has_case: bool,
    #[serde(default)]
    pub has_manual: bool,
    #[serde(default)]
    pub has_inserts: bool,
    #[serde(default)]
    pub is_sealed: bool,
    /// Derived; written for readers, ignored on import.
    #[serde(default)]
    pub collectors_grade: String,
    #[serde(rename = "hltbMain", default)]
    pub hltb_main: f64,
    #[serde(rename = "hltbExtra", default)]
    pub hltb_extra: f64,
    #[serde(rename = "hltbCompletionist", default)]
    pub hltb_completionist: f64,
    #[serde(rename = "userHLTBMain", default)]
    pub user_hltb_main: f64,
    #[serde(rename = "userHLTBExtra", default)]
    pub user_hltb_extra: f64,
    #[serde(rename = "userHLTBCompletionist", default)]
    pub user_hltb_completionist: f64,
    #[serde(default)]
    pub genres_string: String,
    #[serde(default)]
    pub developers_string: String,
    #[serde(default)]
    pub publishers_string: String,
    #[serde(default)]
    pub is_sub_game: bool,
    #[serde(default)]
    pub is_collection: bool,
    #[serde(rename = "parentCollectionID", default, skip_serializing_if = "Option::is_none")]
    pub parent_collection_id: Option<Uuid>,
    #[serde(rename = "platformID", default, skip_serializing_if = "Option::is_none")]
    pub platform_id: Option<i64>,
    /// Hardware name.
    #[serde(rename = "linkedHardwareID", default, skip_serializing_if = "Option::is_none")]
    pub linked_hardware_id: Option<String>,
    #[serde(default)]
    pub play_log_entries: Vec<ExportedPlayLogEntry>,
    #[serde(default)]
    pub helpful_links: Vec<ExportedHelpfulLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedPlayLogEntry {
    #[serde(with = "iso8601")]
    pub timestamp: DateTime<Utc>,
    /// Seconds.
    pub time_spent: f64,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub checkpoint: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedHelpfulLink {
    pub name: String,
    pub url_string: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedPlatform {
    pub id: i64,
    pub name: String,
    #[serde(rename = "logoURL", default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedHardware {
    /// Same as `name`; hardware has no other identity.
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub purchase_price: f64,
    #[serde(with = "iso8601")]
    pub purchase_date: DateTime<Utc>,
    #[serde(default)]
    pub msrp: f64,
    #[serde(with = "iso8601::option", default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<DateTime<Utc>>,
    #[serde(rename = "platformID", default, skip_serializing_if = "Option::is_none")]
    pub platform_id: Option<i64>,
    #[serde(rename = "internalStorageInGB", default)]
    pub internal_storage_gb: f64,
    #[serde(rename = "externalStorageInGB", default)]
    pub external_storage_gb: f64,
}

/// ISO-8601 dates without fractional seconds (`2025-07-10T18:30:00Z`).
///
/// Parsing accepts any RFC 3339 offset and fractional seconds.
pub mod iso8601 {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn format(date: &DateTime<Utc>) -> String {
        date.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    pub fn parse(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        DateTime::parse_from_rfc3339(s).map(|d| d.with_timezone(&Utc))
    }

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&format(date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let s = String::deserialize(d)?;
        parse(&s).map_err(serde::de::Error::custom)
    }

    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            date: &Option<DateTime<Utc>>,
            s: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(d) => s.serialize_str(&super::format(d)),
                None => s.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            d: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            Option::<String>::deserialize(d)?
                .map(|s| super::parse(&s).map_err(serde::de::Error::custom))
                .transpose()
        }
    }
}
