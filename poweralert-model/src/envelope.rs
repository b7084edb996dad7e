//! Response envelope for admin API payloads
//!
//! Every backend endpoint wraps its payload as `{ code, message, data }`.
//! `data` is usually an array of records, but single-record endpoints return
//! a bare object and some error responses carry `null`; all three parse.

use serde::Deserialize;
use serde::Deserializer;

use crate::Record;
use crate::error::EnvelopeError;

/// Parsed body of an admin API response.
///
/// # Example
///
/// ```
/// use poweralert_model::Envelope;
///
/// let body = r#"{"code":200,"message":"OK","data":[{"title":"Cedar Grove"}]}"#;
/// let envelope = Envelope::from_json(body).unwrap();
/// assert!(envelope.is_success());
/// assert_eq!(envelope.data.len(), 1);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    /// Application-level status code; 200 means success.
    pub code: i64,
    /// Human-readable status message.
    #[serde(default)]
    pub message: String,
    /// The payload records.
    #[serde(default, deserialize_with = "records_payload")]
    pub data: Vec<Record>,
}

impl Envelope {
    /// Parses an envelope from a JSON body.
    pub fn from_json(body: &str) -> Result<Self, EnvelopeError> {
        Ok(serde_json::from_str(body)?)
    }

    /// Returns `true` if the backend reported success.
    pub fn is_success(&self) -> bool {
        self.code == 200
    }

    /// Unwraps the payload, turning a non-success code into an error.
    pub fn records(self) -> Result<Vec<Record>, EnvelopeError> {
        if self.is_success() {
            Ok(self.data)
        } else {
            Err(EnvelopeError::Api {
                code: self.code,
                message: self.message,
            })
        }
    }
}

fn records_payload<'de, D>(deserializer: D) -> Result<Vec<Record>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Payload {
        Many(Vec<Record>),
        One(Record),
    }

    Ok(match Option::<Payload>::deserialize(deserializer)? {
        Some(Payload::Many(records)) => records,
        Some(Payload::One(record)) => vec![record],
        None => Vec::new(),
    })
}
