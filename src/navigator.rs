use std::fmt;

use crate::error::{Error, Result};

/// Drill-down depth, from the ranked table down to the app breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Table,
    TimeSeries,
    AppBreakdown,
}

impl Level {
    pub fn depth(&self) -> u8 {
        match self {
            Level::Table => 1,
            Level::TimeSeries => 2,
            Level::AppBreakdown => 3,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "level {}", self.depth())
    }
}

/// The hour picked on the time-series chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourSelection {
    pub date: String,
    pub hour: u8,
}

/// Query parameters the current level needs for its fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelQuery<'a> {
    Table,
    TimeSeries {
        media_source: &'a str,
    },
    AppBreakdown {
        media_source: &'a str,
        date: &'a str,
        hour: u8,
    },
}

/// Three-level drill-down state machine.
///
/// Selections flow downward (row click sets the source, point click sets the
/// hour) and are discarded one at a time on `back`. The navigator exclusively
/// owns the selection state; invariants hold by construction:
/// a source is selected at levels 2 and 3, an hour only at level 3.
#[derive(Debug, Clone)]
pub struct Navigator {
    level: Level,
    selected_source: Option<String>,
    selected_hour: Option<HourSelection>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self {
            level: Level::Table,
            selected_source: None,
            selected_hour: None,
        }
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn selected_source(&self) -> Option<&str> {
        self.selected_source.as_deref()
    }

    pub fn selected_hour(&self) -> Option<&HourSelection> {
        self.selected_hour.as_ref()
    }

    /// Table row click: drill into the per-source time series.
    pub fn select_source(&mut self, media_source: impl Into<String>) -> Result<()> {
        if self.level != Level::Table {
            return Err(Error::InvalidTransition {
                level: self.level,
                action: "select_source",
            });
        }
        self.selected_source = Some(media_source.into());
        self.selected_hour = None;
        self.level = Level::TimeSeries;
        Ok(())
    }

    /// Chart point click: drill into the app breakdown for that hour.
    pub fn select_hour(&mut self, date: impl Into<String>, hour: u8) -> Result<()> {
        if self.level != Level::TimeSeries {
            return Err(Error::InvalidTransition {
                level: self.level,
                action: "select_hour",
            });
        }
        self.selected_hour = Some(HourSelection {
            date: date.into(),
            hour,
        });
        self.level = Level::AppBreakdown;
        Ok(())
    }

    /// Leave the current level, discarding the selection that belongs to it.
    pub fn back(&mut self) -> Result<()> {
        match self.level {
            Level::Table => Err(Error::InvalidTransition {
                level: Level::Table,
                action: "back",
            }),
            Level::TimeSeries => {
                self.selected_source = None;
                self.level = Level::Table;
                Ok(())
            }
            Level::AppBreakdown => {
                self.selected_hour = None;
                self.level = Level::TimeSeries;
                Ok(())
            }
        }
    }

    /// Top-level reset: back to the table with no selections.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The fetch parameters the current level requires.
    pub fn query(&self) -> LevelQuery<'_> {
        match self.level {
            Level::Table => LevelQuery::Table,
            Level::TimeSeries => LevelQuery::TimeSeries {
                media_source: self.selected_source.as_deref().unwrap_or_default(),
            },
            Level::AppBreakdown => {
                let hour = self.selected_hour.as_ref();
                LevelQuery::AppBreakdown {
                    media_source: self.selected_source.as_deref().unwrap_or_default(),
                    date: hour.map(|h| h.date.as_str()).unwrap_or_default(),
                    hour: hour.map(|h| h.hour).unwrap_or_default(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_table_with_no_selections() {
        let nav = Navigator::new();
        assert_eq!(nav.level(), Level::Table);
        assert!(nav.selected_source().is_none());
        assert!(nav.selected_hour().is_none());
        assert_eq!(nav.query(), LevelQuery::Table);
    }

    #[test]
    fn full_drill_down_walk() {
        let mut nav = Navigator::new();
        nav.select_source("X").unwrap();
        nav.select_hour("2024-01-02", 5).unwrap();

        assert_eq!(nav.level(), Level::AppBreakdown);
        assert_eq!(nav.selected_source(), Some("X"));
        assert_eq!(
            nav.selected_hour(),
            Some(&HourSelection {
                date: "2024-01-02".to_string(),
                hour: 5
            })
        );

        nav.back().unwrap();
        assert_eq!(nav.level(), Level::TimeSeries);
        assert_eq!(nav.selected_source(), Some("X"));
        assert!(nav.selected_hour().is_none());

        nav.back().unwrap();
        assert_eq!(nav.level(), Level::Table);
        assert!(nav.selected_source().is_none());
        assert!(nav.selected_hour().is_none());
    }

    #[test]
    fn select_hour_from_table_is_invalid() {
        let mut nav = Navigator::new();
        let err = nav.select_hour("2024-01-02", 5).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidTransition {
                level: Level::Table,
                action: "select_hour"
            }
        ));
        // State untouched on rejection.
        assert_eq!(nav.level(), Level::Table);
    }

    #[test]
    fn select_source_below_table_is_invalid() {
        let mut nav = Navigator::new();
        nav.select_source("X").unwrap();
        assert!(nav.select_source("Y").is_err());
        assert_eq!(nav.selected_source(), Some("X"));
    }

    #[test]
    fn back_from_table_is_invalid() {
        let mut nav = Navigator::new();
        assert!(nav.back().is_err());
    }

    #[test]
    fn query_exposes_per_level_parameters() {
        let mut nav = Navigator::new();
        nav.select_source("tiktok_int").unwrap();
        assert_eq!(
            nav.query(),
            LevelQuery::TimeSeries {
                media_source: "tiktok_int"
            }
        );

        nav.select_hour("2024-12-20", 14).unwrap();
        assert_eq!(
            nav.query(),
            LevelQuery::AppBreakdown {
                media_source: "tiktok_int",
                date: "2024-12-20",
                hour: 14
            }
        );
    }

    #[test]
    fn reset_returns_to_initial_state() {
        let mut nav = Navigator::new();
        nav.select_source("X").unwrap();
        nav.select_hour("2024-01-02", 5).unwrap();
        nav.reset();
        assert_eq!(nav.level(), Level::Table);
        assert!(nav.selected_source().is_none());
        assert!(nav.selected_hour().is_none());
    }
}
