//! Seeding the creative store from a CSV export of the admin table.
//!
//! Expected header: `id,page_slug,position,ad_code,active,created_at`.

use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};

use super::domain::{AdCreative, AdPosition, CreativeId};

#[derive(Debug, thiserror::Error)]
pub enum AdImportError {
    #[error("failed to read ad export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid ad CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: {reason}")]
    InvalidRow { line: u64, reason: String },
}

pub struct AdCreativeImporter;

impl AdCreativeImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<AdCreative>, AdImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<AdCreative>, AdImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        let mut record = csv::StringRecord::new();
        let mut creatives = Vec::new();

        while csv_reader.read_record(&mut record)? {
            let line = record.position().map(|pos| pos.line()).unwrap_or_default();
            let row: AdCreativeRow = record.deserialize(Some(&headers))?;
            let creative = row
                .into_creative()
                .map_err(|reason| AdImportError::InvalidRow { line, reason })?;
            creatives.push(creative);
        }

        Ok(creatives)
    }
}

#[derive(Debug, Deserialize)]
struct AdCreativeRow {
    id: String,
    page_slug: String,
    position: String,
    #[serde(alias = "raw_markup")]
    ad_code: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    active: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    created_at: Option<String>,
}

impl AdCreativeRow {
    fn into_creative(self) -> Result<AdCreative, String> {
        let id = self.id.trim();
        if id.is_empty() {
            return Err("missing creative id".to_string());
        }
        let page_slug = self.page_slug.trim();
        if page_slug.is_empty() {
            return Err(format!("creative {id} has no page slug"));
        }
        let position = self
            .position
            .parse::<AdPosition>()
            .map_err(|err| err.to_string())?;
        let active = match self.active.as_deref() {
            None => true,
            Some(flag) => {
                parse_flag(flag).ok_or_else(|| format!("invalid active flag '{flag}'"))?
            }
        };
        let created_at = match self.created_at.as_deref() {
            None => DateTime::<Utc>::default(),
            Some(raw) => {
                parse_timestamp(raw).ok_or_else(|| format!("invalid created_at '{raw}'"))?
            }
        };

        Ok(AdCreative {
            id: CreativeId(id.to_string()),
            page_slug: page_slug.to_string(),
            position,
            raw_markup: self.ad_code,
            active,
            created_at,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty()))
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "t" | "yes" | "y" | "sim" | "s" => Some(true),
        "0" | "false" | "f" | "no" | "n" | "nao" | "não" => Some(false),
        _ => None,
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(Utc.from_utc_datetime(&naive));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}
