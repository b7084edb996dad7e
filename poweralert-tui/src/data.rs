//! Data loading from exported JSON envelopes

use std::fs;
use std::path::Path;

use log::debug;
use poweralert_model::{Envelope, Record};

use crate::app::AppError;
use crate::pages::PageKind;

/// Reads a page's envelope file and unwraps its records. A non-success
/// envelope code surfaces as an error even when the file parses.
pub fn load_records(dir: &Path, page: PageKind) -> Result<Vec<Record>, AppError> {
    let path = dir.join(page.data_file());
    debug!("loading {}", path.display());
    let body = fs::read_to_string(&path).map_err(|source| AppError::Read {
        path: path.clone(),
        source,
    })?;
    let records = Envelope::from_json(&body)?.records()?;
    debug!("loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

// =============================================================================
// Tests
// =============================================================================
