use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use tracing::{debug, warn};

use crate::client::AnomalyApi;
use crate::densify;
use crate::error::Result;
use crate::keys::{self, BreakdownKey};
use crate::navigator::{HourSelection, Level, Navigator};
use crate::types::anomaly::AnomalyRow;
use crate::types::breakdown::AppBreakdownRecord;
use crate::types::clicks::DensePoint;
use crate::types::config::DashboardConfig;

/// View-model slot for one drill-down level. A failure here never leaks into
/// the other levels' slots.
#[derive(Debug, Clone, PartialEq)]
pub enum LevelSlot<T> {
    Empty,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> LevelSlot<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, LevelSlot::Ready(_))
    }
}

/// Render-ready view of the current level.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardView {
    Table(LevelSlot<Vec<AnomalyRow>>),
    TimeSeries {
        media_source: String,
        points: LevelSlot<Vec<DensePoint>>,
    },
    AppBreakdown {
        media_source: String,
        selection: HourSelection,
        apps: LevelSlot<Vec<AppBreakdownRecord>>,
    },
}

struct DashboardState {
    navigator: Navigator,
    table: LevelSlot<Vec<AnomalyRow>>,
    series: LevelSlot<Vec<DensePoint>>,
    breakdown: LevelSlot<Vec<AppBreakdownRecord>>,
}

enum Refetch {
    None,
    Table,
    Series { media_source: String },
}

/// Orchestrates the drill-down dashboard: owns the navigator, issues the
/// fetch each transition requires, and shapes results into view models.
///
/// Every transition bumps a generation token; a fetch result is stored only
/// if its token is still current, so a slow fetch resolving after the user
/// has navigated away is discarded (last selection wins).
pub struct DashboardController<A: AnomalyApi> {
    config: DashboardConfig,
    api: A,
    state: Mutex<DashboardState>,
    generation: AtomicU64,
}

impl<A: AnomalyApi> DashboardController<A> {
    pub fn new(config: DashboardConfig, api: A) -> Self {
        Self {
            config,
            api,
            state: Mutex::new(DashboardState {
                navigator: Navigator::new(),
                table: LevelSlot::Empty,
                series: LevelSlot::Empty,
                breakdown: LevelSlot::Empty,
            }),
            generation: AtomicU64::new(0),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.config.session_id
    }

    pub fn level(&self) -> Level {
        self.lock().navigator.level()
    }

    /// Fetch the ranked anomaly table. Called once at dashboard mount and on
    /// explicit refresh; the service's ranking order is kept as-is.
    pub async fn load(&self) {
        let token = {
            let mut state = self.lock();
            state.table = LevelSlot::Loading;
            self.bump()
        };
        self.fetch_table(token).await;
    }

    /// Table row click: select a media source and fetch its click series.
    pub async fn select_source(&self, media_source: &str) -> Result<()> {
        let token = {
            let mut state = self.lock();
            state.navigator.select_source(media_source)?;
            // Selection change governs levels 2 and 3; both caches go.
            state.series = LevelSlot::Loading;
            state.breakdown = LevelSlot::Empty;
            self.bump()
        };
        self.fetch_series(token, media_source).await;
        Ok(())
    }

    /// Chart point click: select an hour and fetch its app breakdown.
    pub async fn select_hour(&self, date: &str, hour: u8) -> Result<()> {
        let (token, key) = {
            let mut state = self.lock();
            state.navigator.select_hour(date, hour)?;
            let media_source = state
                .navigator
                .selected_source()
                .unwrap_or_default()
                .to_string();
            state.breakdown = LevelSlot::Loading;
            (self.bump(), BreakdownKey::new(media_source, date, hour))
        };
        self.fetch_breakdown(token, &key).await;
        Ok(())
    }

    /// Go up one level, dropping the selection that belongs to the level
    /// being left. The destination level's cache is reused when still valid,
    /// otherwise its fetch is reissued.
    pub async fn back(&self) -> Result<()> {
        let (token, refetch) = {
            let mut state = self.lock();
            let leaving = state.navigator.level();
            state.navigator.back()?;
            let token = self.bump();
            let refetch = match leaving {
                Level::AppBreakdown => {
                    state.breakdown = LevelSlot::Empty;
                    // Source unchanged, so a ready series cache is still valid.
                    if state.series.is_ready() {
                        Refetch::None
                    } else {
                        state.series = LevelSlot::Loading;
                        Refetch::Series {
                            media_source: state
                                .navigator
                                .selected_source()
                                .unwrap_or_default()
                                .to_string(),
                        }
                    }
                }
                Level::TimeSeries => {
                    state.series = LevelSlot::Empty;
                    state.breakdown = LevelSlot::Empty;
                    if state.table.is_ready() {
                        Refetch::None
                    } else {
                        state.table = LevelSlot::Loading;
                        Refetch::Table
                    }
                }
                // back() from the table already failed above.
                Level::Table => Refetch::None,
            };
            (token, refetch)
        };

        match refetch {
            Refetch::None => {}
            Refetch::Table => self.fetch_table(token).await,
            Refetch::Series { media_source } => self.fetch_series(token, &media_source).await,
        }
        Ok(())
    }

    /// Top-level reset: discard all selections and caches, reload the table.
    pub async fn reset(&self) {
        let token = {
            let mut state = self.lock();
            state.navigator.reset();
            state.table = LevelSlot::Loading;
            state.series = LevelSlot::Empty;
            state.breakdown = LevelSlot::Empty;
            self.bump()
        };
        self.fetch_table(token).await;
    }

    /// Render-ready view model for the current level.
    pub fn view(&self) -> DashboardView {
        let state = self.lock();
        match state.navigator.level() {
            Level::Table => DashboardView::Table(state.table.clone()),
            Level::TimeSeries => DashboardView::TimeSeries {
                media_source: state
                    .navigator
                    .selected_source()
                    .unwrap_or_default()
                    .to_string(),
                points: state.series.clone(),
            },
            Level::AppBreakdown => DashboardView::AppBreakdown {
                media_source: state
                    .navigator
                    .selected_source()
                    .unwrap_or_default()
                    .to_string(),
                selection: state.navigator.selected_hour().cloned().unwrap_or(
                    HourSelection {
                        date: String::new(),
                        hour: 0,
                    },
                ),
                apps: state.breakdown.clone(),
            },
        }
    }

    pub fn table_view(&self) -> LevelSlot<Vec<AnomalyRow>> {
        self.lock().table.clone()
    }

    pub fn series_view(&self) -> LevelSlot<Vec<DensePoint>> {
        self.lock().series.clone()
    }

    pub fn breakdown_view(&self) -> LevelSlot<Vec<AppBreakdownRecord>> {
        self.lock().breakdown.clone()
    }

    async fn fetch_table(&self, token: u64) {
        let slot = match self.api.top_anomalies(self.config.entity_kind).await {
            Ok(rows) => LevelSlot::Ready(rows),
            Err(e) => {
                warn!("Top-anomalies fetch failed: {}", e);
                LevelSlot::Failed(e.to_string())
            }
        };
        self.store(token, |state| state.table = slot);
    }

    async fn fetch_series(&self, token: u64, media_source: &str) {
        let slot = match self.api.all_clicks(self.config.entity_kind).await {
            Ok(by_source) => {
                let records = by_source
                    .get(media_source)
                    .map(Vec::as_slice)
                    .unwrap_or(&[]);
                LevelSlot::Ready(densify::densify(records))
            }
            Err(e) => {
                warn!(media_source, "Click-series fetch failed: {}", e);
                LevelSlot::Failed(e.to_string())
            }
        };
        self.store(token, |state| state.series = slot);
    }

    async fn fetch_breakdown(&self, token: u64, key: &BreakdownKey) {
        let slot = match self.api.app_breakdown(self.config.entity_kind).await {
            Ok(by_key) => {
                // A missing key means no app data for that hour, not an error.
                let apps = by_key.get(&key.encode()).map(Vec::as_slice).unwrap_or(&[]);
                LevelSlot::Ready(keys::rank(apps, keys::TOP_K))
            }
            Err(e) => {
                warn!(key = %key, "App-breakdown fetch failed: {}", e);
                LevelSlot::Failed(e.to_string())
            }
        };
        self.store(token, |state| state.breakdown = slot);
    }

    /// Apply a fetch result only if no transition happened since it was issued.
    fn store(&self, token: u64, apply: impl FnOnce(&mut DashboardState)) {
        let mut state = self.lock();
        if self.generation.load(Ordering::SeqCst) != token {
            debug!(token, "Discarding stale fetch result");
            return;
        }
        apply(&mut state);
    }

    fn bump(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, DashboardState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}
