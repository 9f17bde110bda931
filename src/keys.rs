use std::fmt;

use crate::types::breakdown::AppBreakdownRecord;

/// How many apps the breakdown view shows at most.
pub const TOP_K: usize = 15;

const SEPARATOR: char = '_';

/// Composite key joining hour-level app breakdowns to a
/// (media source, date, hour) selection.
///
/// The wire format is `{media_source}_{date}_{hour}`. Media source names
/// routinely contain the separator themselves (`facebook_int`), so decoding
/// splits from the right: the ISO date and the hour never contain `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BreakdownKey {
    pub media_source: String,
    pub date: String,
    pub hour: u8,
}

impl BreakdownKey {
    pub fn new(media_source: impl Into<String>, date: impl Into<String>, hour: u8) -> Self {
        Self {
            media_source: media_source.into(),
            date: date.into(),
            hour,
        }
    }

    /// Wire key as produced by the breakdown endpoint.
    pub fn encode(&self) -> String {
        format!(
            "{}{sep}{}{sep}{}",
            self.media_source,
            self.date,
            self.hour,
            sep = SEPARATOR
        )
    }

    /// Decode a wire key. Returns `None` when the tail is not `_date_hour`.
    pub fn parse(key: &str) -> Option<Self> {
        let mut parts = key.rsplitn(3, SEPARATOR);
        let hour: u8 = parts.next()?.parse().ok()?;
        let date = parts.next()?;
        let media_source = parts.next()?;
        if hour > 23 || media_source.is_empty() || date.is_empty() {
            return None;
        }
        Some(Self::new(media_source, date, hour))
    }
}

impl fmt::Display for BreakdownKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.encode())
    }
}

/// Top-K apps by click volume, descending. The sort is stable, so apps with
/// equal volume keep their incoming order.
pub fn rank(records: &[AppBreakdownRecord], k: usize) -> Vec<AppBreakdownRecord> {
    let mut ranked = records.to_vec();
    ranked.sort_by(|a, b| b.total_clicks.cmp(&a.total_clicks));
    ranked.truncate(k);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(id: &str, clicks: u64) -> AppBreakdownRecord {
        AppBreakdownRecord {
            app_id: id.to_string(),
            total_clicks: clicks,
        }
    }

    #[test]
    fn encode_matches_wire_format() {
        let key = BreakdownKey::new("tiktok_int", "2024-12-20", 14);
        assert_eq!(key.encode(), "tiktok_int_2024-12-20_14");
    }

    #[test]
    fn equal_selections_produce_equal_keys() {
        let a = BreakdownKey::new("facebook_int", "2024-01-02", 5);
        let b = BreakdownKey::new("facebook_int", "2024-01-02", 5);
        assert_eq!(a.encode(), b.encode());
    }

    #[test]
    fn parse_handles_underscored_source_names() {
        let key = BreakdownKey::parse("facebook_int_2024-01-02_5").unwrap();
        assert_eq!(key.media_source, "facebook_int");
        assert_eq!(key.date, "2024-01-02");
        assert_eq!(key.hour, 5);
    }

    #[test]
    fn parse_roundtrips_encode() {
        let key = BreakdownKey::new("some_long_source_name", "2024-12-20", 23);
        assert_eq!(BreakdownKey::parse(&key.encode()), Some(key));
    }

    #[test]
    fn parse_rejects_malformed_keys() {
        assert_eq!(BreakdownKey::parse("no-separators"), None);
        assert_eq!(BreakdownKey::parse("source_2024-01-02_notahour"), None);
        assert_eq!(BreakdownKey::parse("source_2024-01-02_24"), None);
        assert_eq!(BreakdownKey::parse("_2024-01-02_5"), None);
    }

    #[test]
    fn rank_sorts_descending_and_truncates() {
        let apps = vec![app("a", 5), app("b", 50)];
        let ranked = rank(&apps, 1);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].app_id, "b");
    }

    #[test]
    fn rank_is_idempotent() {
        let apps = vec![app("x", 30), app("y", 20), app("z", 10)];
        let once = rank(&apps, 15);
        let twice = rank(&once, 15);
        assert_eq!(once, twice);
    }

    #[test]
    fn rank_length_is_min_of_input_and_k() {
        let apps: Vec<AppBreakdownRecord> =
            (0..20).map(|i| app(&format!("app{}", i), i)).collect();
        assert_eq!(rank(&apps, TOP_K).len(), 15);
        assert_eq!(rank(&apps[..4], TOP_K).len(), 4);
    }

    #[test]
    fn rank_ties_keep_incoming_order() {
        let apps = vec![app("first", 10), app("second", 10), app("third", 10)];
        let ranked = rank(&apps, 15);
        assert_eq!(ranked[0].app_id, "first");
        assert_eq!(ranked[1].app_id, "second");
        assert_eq!(ranked[2].app_id, "third");
    }
}
