use std::collections::HashMap;

use chrono::{Days, NaiveDate};
use tracing::warn;

use crate::types::clicks::{ClickRecord, DensePoint};

pub const WINDOW_DAYS: u64 = 3;
pub const HOURS_PER_DAY: u64 = 24;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Fill a sparse per-hour click series into a dense 3-day window (72 points).
pub fn densify(records: &[ClickRecord]) -> Vec<DensePoint> {
    densify_window(records, WINDOW_DAYS)
}

/// Fill a sparse per-hour click series into a dense `days`-day window.
///
/// The window is anchored at the earliest `(event_date, event_hour)` record;
/// hours with no record get zero clicks. Empty input has no anchor and
/// produces an empty series. Output `index` is strictly 0..days*24.
pub fn densify_window(records: &[ClickRecord], days: u64) -> Vec<DensePoint> {
    if records.is_empty() {
        return Vec::new();
    }

    let mut sorted: Vec<&ClickRecord> = records.iter().collect();
    sorted.sort_by(|a, b| {
        a.event_date
            .cmp(&b.event_date)
            .then(a.event_hour.cmp(&b.event_hour))
    });

    let first_date = sorted[0].event_date.as_str();
    let anchor = match NaiveDate::parse_from_str(first_date, DATE_FORMAT) {
        Ok(date) => date,
        Err(e) => {
            warn!(date = first_date, "Unparseable anchor date: {}", e);
            return Vec::new();
        }
    };

    let by_slot: HashMap<(&str, u8), u64> = sorted
        .iter()
        .map(|r| ((r.event_date.as_str(), r.event_hour), r.total_clicks))
        .collect();

    let mut points = Vec::with_capacity((days * HOURS_PER_DAY) as usize);
    for day_offset in 0..days {
        let date = match anchor.checked_add_days(Days::new(day_offset)) {
            Some(date) => date,
            None => break,
        };
        let date_str = date.format(DATE_FORMAT).to_string();
        for hour in 0..HOURS_PER_DAY as u8 {
            let clicks = by_slot
                .get(&(date_str.as_str(), hour))
                .copied()
                .unwrap_or(0);
            points.push(DensePoint {
                index: (day_offset * HOURS_PER_DAY) as usize + hour as usize,
                date: date_str.clone(),
                hour,
                clicks,
                day_num: day_offset as u8 + 1,
            });
        }
    }
    points
}
