//! Carrier reply decoding
//!
//! The carrier answers with a JSON object keyed by the looked-up number:
//!
//! ```json
//! {"85592313242": {"status": 0, "status_message": "Success", "network": "Cellcard", ...}}
//! ```
//!
//! Field types are loose in practice (numbers as strings, flags as 0/1), so
//! values are read leniently. A missing `status` is treated as a refusal.

use serde_json::{Map, Value};

use pv_core::domain::entities::Presence;
use pv_core::errors::CarrierError;
use pv_core::services::verification::UNKNOWN_STATUS_MESSAGE;
use pv_core::{CarrierLookup, CarrierReply};

/// Status assumed when the reply carries none
const MISSING_STATUS: i32 = 1;

/// Decode a carrier response body for `number`
///
/// Empty or undecodable bodies, and bodies that decode to an empty value,
/// are [`CarrierError::EmptyResponse`]. A body that decodes but has the wrong
/// shape is [`CarrierError::Unexpected`].
pub fn decode_reply(number: &str, body: &str) -> Result<CarrierReply, CarrierError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(CarrierError::EmptyResponse);
    }

    let value: Value = serde_json::from_str(trimmed).map_err(|_| CarrierError::EmptyResponse)?;
    if is_empty_value(&value) {
        return Err(CarrierError::EmptyResponse);
    }

    let object = value.as_object().ok_or_else(|| CarrierError::Unexpected {
        message: "Carrier response is not a JSON object".to_string(),
    })?;

    // Keyed by the submitted number; fall back to the first entry when the
    // carrier echoes a reformatted key
    let entry = object
        .get(number)
        .or_else(|| object.values().next())
        .and_then(Value::as_object)
        .ok_or_else(|| CarrierError::Unexpected {
            message: format!("Carrier response has no entry for {}", number),
        })?;

    Ok(entry_to_reply(entry))
}

fn entry_to_reply(entry: &Map<String, Value>) -> CarrierReply {
    let fields = Fields(entry);
    let status = fields.int("status").unwrap_or(MISSING_STATUS);
    let error = fields.int("error").unwrap_or(0);

    if status != 0 {
        return CarrierReply::Rejected {
            status,
            status_message: fields
                .text("status_message")
                .unwrap_or_else(|| UNKNOWN_STATUS_MESSAGE.to_string()),
            error,
        };
    }

    CarrierReply::Success(CarrierLookup {
        number: fields.text("number"),
        cic: fields.text("cic"),
        error,
        imsi: fields.text("imsi"),
        mcc: fields.text("mcc"),
        mnc: fields.text("mnc"),
        network: fields.text("network"),
        ported: fields.flag("ported"),
        present: fields.text("present").map(|p| Presence::from_loose(&p)),
        status_message: fields.text("status_message"),
        number_type: fields.text("type"),
        trxid: fields.text("trxid"),
    })
}

/// Lenient accessors over one reply entry
struct Fields<'a>(&'a Map<String, Value>);

impl Fields<'_> {
    /// String or number rendered as text; null and blank strings are absent
    fn text(&self, name: &str) -> Option<String> {
        match self.0.get(name)? {
            Value::String(s) if s.trim().is_empty() => None,
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    fn int(&self, name: &str) -> Option<i32> {
        match self.0.get(name)? {
            Value::Number(n) => n.as_i64().and_then(|v| i32::try_from(v).ok()),
            Value::String(s) => s.trim().parse().ok(),
            Value::Bool(b) => Some(i32::from(*b)),
            _ => None,
        }
    }

    fn flag(&self, name: &str) -> bool {
        match self.0.get(name) {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_i64().map_or(false, |v| v != 0),
            Some(Value::String(s)) => {
                matches!(s.trim().to_lowercase().as_str(), "1" | "true" | "yes")
            }
            _ => false,
        }
    }
}

/// Values that carry no reply at all
fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
    }
}
