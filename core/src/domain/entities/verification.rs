//! Stored carrier verification entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether the handset was reachable on the network at lookup time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Presence {
    Yes,
    No,
    Na,
}

impl Presence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Presence::Yes => "yes",
            Presence::No => "no",
            Presence::Na => "na",
        }
    }

    /// Lenient conversion used for carrier payloads and stored rows;
    /// unknown values collapse to `Na`
    pub fn from_loose(value: &str) -> Self {
        value.parse().unwrap_or(Presence::Na)
    }
}

impl fmt::Display for Presence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Presence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yes" => Ok(Presence::Yes),
            "no" => Ok(Presence::No),
            "na" | "n/a" | "" => Ok(Presence::Na),
            other => Err(format!("Invalid presence value: {}", other)),
        }
    }
}

/// Result of a successful carrier lookup, persisted once per number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRecord {
    /// Database identifier, absent until persisted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Cleaned phone number (upsert key)
    pub number: String,

    /// Prefix that resolved the number
    #[serde(default)]
    pub prefix: Option<String>,

    #[serde(default)]
    pub cic: Option<String>,

    /// Carrier error code, 0 when none
    #[serde(default)]
    pub error: i32,

    #[serde(default)]
    pub imsi: Option<String>,

    #[serde(default)]
    pub mcc: Option<String>,

    #[serde(default)]
    pub mnc: Option<String>,

    /// Network name as reported by the carrier
    #[serde(default)]
    pub network: Option<String>,

    #[serde(default)]
    pub ported: bool,

    #[serde(default)]
    pub present: Option<Presence>,

    /// Carrier status code, 0 on success
    pub status: i32,

    #[serde(default)]
    pub status_message: Option<String>,

    /// Line type (mobile, fixed, ...)
    #[serde(default, rename = "type")]
    pub number_type: Option<String>,

    /// Carrier transaction id
    #[serde(default)]
    pub trxid: Option<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl VerificationRecord {
    /// Create an unsaved record stamped with the current time
    pub fn new(number: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            number: number.into(),
            prefix: None,
            cic: None,
            error: 0,
            imsi: None,
            mcc: None,
            mnc: None,
            network: None,
            ported: false,
            present: None,
            status: 0,
            status_message: None,
            number_type: None,
            trxid: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Timestamp used for freshness decisions
    pub fn stored_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_successful(&self) -> bool {
        self.status == 0
    }

    /// Serialize into the cache payload
    pub fn to_cache_payload(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse a cache payload; malformed payloads are an error, not a miss
    pub fn from_cache_payload(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }
}
