use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api";

/// Dimension being analyzed for anomalies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    MediaSource,
    Partner,
}

impl EntityKind {
    /// Value of the `entity_kind` query parameter.
    pub fn as_query(&self) -> &'static str {
        match self {
            EntityKind::MediaSource => "media_source",
            EntityKind::Partner => "partner",
        }
    }
}

/// Process-scoped dashboard configuration, injected into the controller at
/// construction. The session id comes from `session::load_or_create`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub api_base_url: String,
    pub entity_kind: EntityKind,
    pub session_id: String,
}

impl DashboardConfig {
    pub fn new(
        api_base_url: impl Into<String>,
        entity_kind: EntityKind,
        session_id: impl Into<String>,
    ) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            entity_kind,
            session_id: session_id.into(),
        }
    }

    /// Build from environment, loading `.env` first if present.
    /// `CLICKWATCH_API_URL` overrides the default local service address;
    /// `CLICKWATCH_ENTITY_KIND=partner` switches to the partner dimension.
    pub fn from_env(session_id: impl Into<String>) -> Self {
        dotenvy::dotenv().ok();
        let api_base_url = std::env::var("CLICKWATCH_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let entity_kind = match std::env::var("CLICKWATCH_ENTITY_KIND").as_deref() {
            Ok("partner") => EntityKind::Partner,
            _ => EntityKind::MediaSource,
        };
        Self::new(api_base_url, entity_kind, session_id)
    }
}
