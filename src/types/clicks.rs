use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One sparse per-hour click count for a media source.
///
/// Records for the same source must not share `(event_date, event_hour)`;
/// hours with no traffic are simply absent and get zero-filled downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickRecord {
    pub event_date: String,
    pub event_hour: u8,
    pub total_clicks: u64,
}

/// One point of the dense 3-day chart series.
///
/// `index` runs 0..=71 with no gaps; `day_num` is 1-based within the window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DensePoint {
    pub index: usize,
    pub date: String,
    pub hour: u8,
    pub clicks: u64,
    pub day_num: u8,
}

/// Envelope of `GET /anomalies/all-clicks`, keyed by media source.
/// The service also sends `status`/`count`/`data` fields; only `level2` matters here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllClicksEnvelope {
    pub level2: HashMap<String, Vec<ClickRecord>>,
}
