//! Data model for PowerAlert admin payloads
//!
//! Records are schemaless field-to-value maps parsed from the REST envelope
//! the admin backend returns. The transport that produced a payload is not
//! this crate's concern; callers hand over a parsed JSON body whether it came
//! from a fetch or a file.

mod envelope;
mod error;
mod record;
mod value;

pub use envelope::Envelope;
pub use error::{EnvelopeError, FieldError};
pub use record::Record;
pub use value::Value;
