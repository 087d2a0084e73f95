//! Carrier lookup reply, decoded at the infrastructure boundary

use crate::domain::entities::prefix::PrefixRecord;
use crate::domain::entities::verification::{Presence, VerificationRecord};

/// Status text used when the carrier omits one
pub const UNKNOWN_STATUS_MESSAGE: &str = "Unknown";

/// Reply from the carrier lookup API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CarrierReply {
    /// Status 0: the lookup succeeded
    Success(CarrierLookup),
    /// Any other status: the carrier refused or could not look up the number
    Rejected {
        status: i32,
        status_message: String,
        error: i32,
    },
}

/// Fields of a successful carrier lookup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarrierLookup {
    /// Number as echoed by the carrier
    pub number: Option<String>,
    pub cic: Option<String>,
    pub error: i32,
    pub imsi: Option<String>,
    pub mcc: Option<String>,
    pub mnc: Option<String>,
    pub network: Option<String>,
    pub ported: bool,
    pub present: Option<Presence>,
    pub status_message: Option<String>,
    pub number_type: Option<String>,
    pub trxid: Option<String>,
}

impl CarrierLookup {
    /// Build the record to persist for `number`
    ///
    /// Network name, MCC and MNC missing from the reply are taken from the
    /// prefix that resolved the number.
    pub fn into_record(self, number: &str, prefix: &PrefixRecord) -> VerificationRecord {
        let mut record = VerificationRecord::new(number);
        record.prefix = Some(prefix.prefix.clone());
        record.cic = self.cic;
        record.error = self.error;
        record.imsi = self.imsi;
        record.mcc = self.mcc.or_else(|| Some(prefix.mcc.clone()));
        record.mnc = self.mnc.or_else(|| Some(prefix.mnc.clone()));
        record.network = self.network.or_else(|| Some(prefix.network_name.clone()));
        record.ported = self.ported;
        record.present = self.present;
        record.status = 0;
        record.status_message = Some(
            self.status_message
                .unwrap_or_else(|| UNKNOWN_STATUS_MESSAGE.to_string()),
        );
        record.number_type = self.number_type;
        record.trxid = self.trxid;
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cellcard() -> PrefixRecord {
        PrefixRecord {
            prefix: "85592".to_string(),
            min_length: 11,
            max_length: 11,
            country_name: "Cambodia".to_string(),
            network_name: "Cellcard".to_string(),
            mcc: "456".to_string(),
            mnc: "01".to_string(),
            live_coverage: true,
        }
    }

    #[test]
    fn test_missing_network_identity_filled_from_prefix() {
        let record = CarrierLookup::default().into_record("85592313242", &cellcard());

        assert_eq!(record.number, "85592313242");
        assert_eq!(record.prefix.as_deref(), Some("85592"));
        assert_eq!(record.network.as_deref(), Some("Cellcard"));
        assert_eq!(record.mcc.as_deref(), Some("456"));
        assert_eq!(record.mnc.as_deref(), Some("01"));
        assert_eq!(record.status_message.as_deref(), Some("Unknown"));
    }

    #[test]
    fn test_carrier_values_take_precedence() {
        let lookup = CarrierLookup {
            network: Some("Metfone".to_string()),
            mnc: Some("08".to_string()),
            ported: true,
            present: Some(Presence::Yes),
            status_message: Some("Success".to_string()),
            ..Default::default()
        };

        let record = lookup.into_record("85592313242", &cellcard());
        assert_eq!(record.network.as_deref(), Some("Metfone"));
        assert_eq!(record.mnc.as_deref(), Some("08"));
        assert_eq!(record.mcc.as_deref(), Some("456"));
        assert!(record.ported);
        assert_eq!(record.present, Some(Presence::Yes));
    }
}
