use serde::{Deserialize, Serialize};

const KEY_SCALE: f64 = 1e7;

/// One validated spreadsheet row in the shape the map front end consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lng")]
    pub longitude: f64,
    pub weight: u32,
    pub count: u32,
    pub updated: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Deduplication key: coordinates rounded to 7 decimal places, plus the name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentityKey {
    latitude: i64,
    longitude: i64,
    name: String,
}

impl Record {
    pub fn identity_key(&self) -> IdentityKey {
        IdentityKey {
            latitude: round_to_key(self.latitude),
            longitude: round_to_key(self.longitude),
            name: self.name.clone(),
        }
    }
}

fn round_to_key(degrees: f64) -> i64 {
    (degrees * KEY_SCALE).round() as i64
}
