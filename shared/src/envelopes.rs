//! Wire Envelopes
//!
//! The exact response bodies the portal pages consume. Keys are
//! camelCase on the envelope level while record payloads inside keep
//! their sheet-header names. Failure bodies are `ErrorBody` in
//! `error.rs`; everything here is a success shape, so `success` is
//! always `true` by construction.

use serde::{Deserialize, Serialize};

/// `{ nextId }` — for `getNextDutySlipId` and the salary counterpart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NextIdBody {
    #[serde(rename = "nextId")]
    pub next_id: i64,
}

/// `{ slips: [...] }` — duty and salary listings share the key; the
/// action name disambiguates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlipListBody<T> {
    pub slips: Vec<T>,
}

/// `{ slip: {...} }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlipBody<T> {
    pub slip: T,
}

/// `{ invoices: [...] }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceListBody<T> {
    pub invoices: Vec<T>,
}

/// `{ invoice: {...} }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceBody<T> {
    pub invoice: T,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingListBody<T> {
    pub bookings: Vec<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteListBody<T> {
    pub routes: Vec<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewListBody<T> {
    pub reviews: Vec<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryListBody<T> {
    pub entries: Vec<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryBody<T> {
    pub directory: T,
}

/// `{ success, message }` — generic save/update acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveAck {
    pub success: bool,
    pub message: String,
}

impl SaveAck {
    pub fn saved(message: impl Into<String>) -> Self {
        Self { success: true, message: message.into() }
    }
}

/// Duty-slip save ack: echoes the assigned number
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DutySaveAck {
    pub success: bool,
    pub message: String,
    #[serde(rename = "dsNo")]
    pub ds_no: String,
}

impl DutySaveAck {
    pub fn saved(ds_no: impl Into<String>) -> Self {
        let ds_no = ds_no.into();
        Self {
            success: true,
            message: format!("Duty slip {ds_no} saved"),
            ds_no,
        }
    }
}

/// Invoice save ack: echoes both identifiers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceSaveAck {
    pub success: bool,
    pub message: String,
    #[serde(rename = "invoiceId")]
    pub invoice_id: String,
    #[serde(rename = "publicId")]
    pub public_id: String,
}

impl InvoiceSaveAck {
    pub fn saved(invoice_id: impl Into<String>, public_id: impl Into<String>) -> Self {
        let invoice_id = invoice_id.into();
        Self {
            success: true,
            message: format!("Invoice {invoice_id} saved"),
            invoice_id,
            public_id: public_id.into(),
        }
    }
}

/// Salary-slip save ack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalarySaveAck {
    pub success: bool,
    pub message: String,
    #[serde(rename = "slipNo")]
    pub slip_no: String,
}

impl SalarySaveAck {
    pub fn saved(slip_no: impl Into<String>) -> Self {
        let slip_no = slip_no.into();
        Self {
            success: true,
            message: format!("Salary slip {slip_no} saved"),
            slip_no,
        }
    }
}

/// `{ success, url }` — signature upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadAck {
    pub success: bool,
    pub url: String,
}

impl UploadAck {
    pub fn stored(url: impl Into<String>) -> Self {
        Self { success: true, url: url.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_keys_are_camel_case() {
        let v = serde_json::to_value(NextIdBody { next_id: 1001 }).unwrap();
        assert_eq!(v, serde_json::json!({"nextId": 1001}));

        let v = serde_json::to_value(DutySaveAck::saved("1002")).unwrap();
        assert_eq!(v["dsNo"], "1002");
        assert_eq!(v["success"], true);
        assert_eq!(v["message"], "Duty slip 1002 saved");
    }

    #[test]
    fn upload_ack_shape() {
        let v = serde_json::to_value(UploadAck::stored("/signatures/abc.png")).unwrap();
        assert_eq!(v, serde_json::json!({"success": true, "url": "/signatures/abc.png"}));
    }
}
