// src/model/store.rs
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::whole_number;

/// Store identifier as the backend sends it: either a store number or a code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum StoreId {
    Number(i64),
    Text(String),
}

impl StoreId {
    pub fn is_blank(&self) -> bool {
        match self {
            StoreId::Number(_) => false,
            StoreId::Text(text) => text.trim().is_empty(),
        }
    }
}

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreId::Number(number) => write!(f, "{}", number),
            StoreId::Text(text) => f.write_str(text),
        }
    }
}

struct StoreIdVisitor;

impl<'de> Visitor<'de> for StoreIdVisitor {
    type Value = StoreId;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a store number or store code")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<StoreId, E> {
        Ok(StoreId::Number(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<StoreId, E> {
        i64::try_from(value)
            .map(StoreId::Number)
            .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(value), &self))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<StoreId, E> {
        whole_number(value)
            .map(StoreId::Number)
            .ok_or_else(|| E::invalid_value(de::Unexpected::Float(value), &self))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<StoreId, E> {
        Ok(StoreId::Text(value.to_string()))
    }
}

impl<'de> Deserialize<'de> for StoreId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(StoreIdVisitor)
    }
}

impl From<&str> for StoreId {
    fn from(value: &str) -> Self {
        StoreId::Text(value.to_string())
    }
}

impl From<i64> for StoreId {
    fn from(value: i64) -> Self {
        StoreId::Number(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreRecord {
    #[serde(rename = "Store Number", alias = "store_number")]
    pub store_number: StoreId,
    #[serde(rename = "City", alias = "city", default)]
    pub city: Option<String>,
    #[serde(rename = "County", alias = "county", default)]
    pub county: Option<String>,
}

/// One entry of the `/api/stores` listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoreEntry {
    Id(StoreId),
    Record(StoreRecord),
}

impl StoreEntry {
    pub fn id(&self) -> &StoreId {
        match self {
            StoreEntry::Id(id) => id,
            StoreEntry::Record(record) => &record.store_number,
        }
    }

    /// Location suffix shown next to the identifier, if the backend sent one.
    pub fn location(&self) -> Option<String> {
        let StoreEntry::Record(record) = self else {
            return None;
        };
        match (record.city.as_deref(), record.county.as_deref()) {
            (Some(city), Some(county)) => Some(format!("{}, {}", city, county)),
            (Some(place), None) | (None, Some(place)) => Some(place.to_string()),
            (None, None) => None,
        }
    }

    pub fn label(&self) -> String {
        match self.location() {
            Some(location) => format!("{} · {}", self.id(), location),
            None => self.id().to_string(),
        }
    }
}

/// Store metadata returned alongside a forecast.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreInfo {
    #[serde(default)]
    pub store_number: Option<StoreId>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub county: Option<String>,
    #[serde(default)]
    pub avg_sales: Option<f64>,
    #[serde(default, alias = "peak_period")]
    pub peak_month: Option<String>,
    #[serde(default)]
    pub peak_value: Option<f64>,
}
