use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier assigned by the content store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CreativeId(pub String);

impl fmt::Display for CreativeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where on a page a slot sits. The store spells these in Portuguese.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdPosition {
    #[serde(alias = "topo")]
    Top,
    #[serde(alias = "meio")]
    Middle,
    #[serde(alias = "rodape")]
    Footer,
}

impl AdPosition {
    pub const fn ordered() -> [Self; 3] {
        [Self::Top, Self::Middle, Self::Footer]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Middle => "middle",
            Self::Footer => "footer",
        }
    }
}

impl fmt::Display for AdPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdPosition {
    type Err = UnknownPosition;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "top" | "topo" => Ok(Self::Top),
            "middle" | "meio" => Ok(Self::Middle),
            "footer" | "rodape" | "rodapé" => Ok(Self::Footer),
            _ => Err(UnknownPosition(raw.trim().to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown ad position '{0}' (expected top, middle or footer)")]
pub struct UnknownPosition(pub String);

/// Ad snippet stored verbatim by an administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdCreative {
    pub id: CreativeId,
    pub page_slug: String,
    pub position: AdPosition,
    #[serde(alias = "ad_code")]
    pub raw_markup: String,
    pub active: bool,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
}

impl AdCreative {
    pub fn belongs_to(&self, page_slug: &str, position: AdPosition) -> bool {
        self.page_slug == page_slug && self.position == position
    }
}
