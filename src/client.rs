use std::collections::HashMap;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::anomaly::{AnomalyRow, TopAnomaliesEnvelope};
use crate::types::breakdown::{AppBreakdownEnvelope, AppBreakdownRecord};
use crate::types::clicks::{AllClicksEnvelope, ClickRecord};
use crate::types::config::EntityKind;

/// Read-only queries against the anomaly-data service, one per drill-down
/// level. Injected into the controller so tests can substitute a stub.
#[async_trait]
pub trait AnomalyApi: Send + Sync {
    /// Ranked top-10 anomalies. Order is the service's; the core never re-sorts it.
    async fn top_anomalies(&self, kind: EntityKind) -> Result<Vec<AnomalyRow>>;

    /// Sparse hourly clicks, keyed by media source.
    async fn all_clicks(&self, kind: EntityKind) -> Result<HashMap<String, Vec<ClickRecord>>>;

    /// Per-app breakdowns, keyed by composite `{source}_{date}_{hour}` key.
    async fn app_breakdown(
        &self,
        kind: EntityKind,
    ) -> Result<HashMap<String, Vec<AppBreakdownRecord>>>;
}

/// HTTP client for the anomaly-data service.
pub struct HttpAnomalyApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAnomalyApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        kind: EntityKind,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%url, kind = kind.as_query(), "Fetching anomaly data");
        let response = self
            .client
            .get(&url)
            .query(&[("entity_kind", kind.as_query())])
            .send()
            .await
            .map_err(|e| Error::fetch(endpoint, e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::fetch(
                endpoint,
                format!("HTTP {}", response.status()),
            ));
        }

        response
            .json()
            .await
            .map_err(|e| Error::fetch(endpoint, e.to_string()))
    }
}

#[async_trait]
impl AnomalyApi for HttpAnomalyApi {
    async fn top_anomalies(&self, kind: EntityKind) -> Result<Vec<AnomalyRow>> {
        let envelope: TopAnomaliesEnvelope = self.get_json("/anomalies/top10", kind).await?;
        Ok(envelope.level1.media_sources)
    }

    async fn all_clicks(&self, kind: EntityKind) -> Result<HashMap<String, Vec<ClickRecord>>> {
        let envelope: AllClicksEnvelope = self.get_json("/anomalies/all-clicks", kind).await?;
        Ok(envelope.level2)
    }

    async fn app_breakdown(
        &self,
        kind: EntityKind,
    ) -> Result<HashMap<String, Vec<AppBreakdownRecord>>> {
        let envelope: AppBreakdownEnvelope =
            self.get_json("/anomalies/app-breakdown", kind).await?;
        Ok(envelope.level3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed_from_base_url() {
        let api = HttpAnomalyApi::new("http://127.0.0.1:8000/api/");
        assert_eq!(api.base_url, "http://127.0.0.1:8000/api");
    }

    #[test]
    fn fetch_error_names_its_endpoint() {
        let err = Error::fetch("/anomalies/top10", "HTTP 502 Bad Gateway");
        assert_eq!(
            err.to_string(),
            "fetch failed for /anomalies/top10: HTTP 502 Bad Gateway"
        );
    }
}
