// Catalog data model shared by ingestion, search and the HTTP layer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Store platform a catalog was sourced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    Android,
}

impl Platform {
    /// Ingestion order: ios first, then android.
    pub const ALL: [Platform; 2] = [Platform::Ios, Platform::Android];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Ios => "ios",
            Platform::Android => "android",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ios" => Ok(Platform::Ios),
            "android" => Ok(Platform::Android),
            other => Err(format!("unknown platform '{other}'")),
        }
    }
}

fn published_by_default() -> bool {
    true
}

/// Normalized, storage-ready game record.
///
/// Also used as the request body for direct creates and updates, where
/// `isPublished` defaults to `true` when omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    #[serde(default)]
    pub publisher_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub platform: Platform,
    #[serde(default)]
    pub store_id: Option<String>,
    #[serde(default)]
    pub bundle_id: Option<String>,
    #[serde(default)]
    pub app_version: Option<String>,
    #[serde(default = "published_by_default")]
    pub is_published: bool,
}

/// A persisted game: a catalog entry plus the identity and timestamps the
/// store assigns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: i64,
    pub publisher_id: Option<String>,
    pub name: Option<String>,
    pub platform: Platform,
    pub store_id: Option<String>,
    pub bundle_id: Option<String>,
    pub app_version: Option<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn entry_body_uses_camel_case_and_defaults_published() {
        let entry: CatalogEntry = serde_json::from_value(json!({
            "publisherId": "1234567890",
            "name": "Test App",
            "platform": "ios",
            "storeId": "1234",
            "bundleId": "test.bundle.id",
            "appVersion": "1.0.0"
        }))
        .expect("valid entry body");

        assert_eq!(entry.platform, Platform::Ios);
        assert_eq!(entry.store_id.as_deref(), Some("1234"));
        assert!(entry.is_published);
    }

    #[test]
    fn entry_body_rejects_unknown_platform() {
        let res = serde_json::from_value::<CatalogEntry>(json!({
            "name": "Test App",
            "platform": "windows"
        }));
        assert!(res.is_err());
    }

    #[test]
    fn platform_round_trips_through_str() {
        for p in Platform::ALL {
            assert_eq!(p.as_str().parse::<Platform>(), Ok(p));
        }
        assert!("IOS".parse::<Platform>().is_err());
    }
}
