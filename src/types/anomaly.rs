use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    Warning,
    Normal,
}

/// One ranked row of the top-anomalies table.
///
/// `mean_3d`/`std_3d`/`cv` are precomputed upstream over a 3-day window; this
/// crate only classifies them. Field names follow the service wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyRow {
    pub id: u32,
    pub media_source: String,
    pub hr: u8,
    pub mean_3d: f64,
    pub std_3d: f64,
    pub cv: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopAnomalies {
    pub media_sources: Vec<AnomalyRow>,
}

/// Envelope of `GET /anomalies/top10`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopAnomaliesEnvelope {
    pub level1: TopAnomalies,
}
