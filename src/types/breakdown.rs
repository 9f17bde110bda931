use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Per-application click volume for one (media source, date, hour) cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppBreakdownRecord {
    pub app_id: String,
    pub total_clicks: u64,
}

/// Envelope of `GET /anomalies/app-breakdown`, keyed by the composite
/// `{media_source}_{date}_{hour}` key (see `keys::BreakdownKey`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppBreakdownEnvelope {
    pub level3: HashMap<String, Vec<AppBreakdownRecord>>,
}
