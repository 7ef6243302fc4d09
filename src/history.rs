//! History normalization.
//!
//! Bill history arrives either as a compact action string (dates implied by
//! `[N]` legislative-day markers) or as LegiScan's array of dated items. Both
//! become the canonical `HistoryDisplayItem` list stored for each bill.

use crate::calendar::date_for_legislative_day;
use crate::parser::{clean, parse_tokens, split_leading_day, tokenize};
use crate::rules::{classify, ParseState};
use crate::types::{
    ActionType, Chamber, HistoryDisplayItem, LegiScanHistoryItem, ParsedAction, ParsedBillActions,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

cached_regex!(day_marker_re, r"\[\d+\]");

/// Either shape of raw history input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HistoryInput {
    /// Compact nmlegis action string
    Actions(String),
    /// Pre-dated LegiScan history
    Items(Vec<LegiScanHistoryItem>),
}

/// One slice of an action string starting at a `[N]` marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySegment<'a> {
    pub day: Option<u32>,
    /// Segment text with the marker removed
    pub body: &'a str,
}

/// Split an action string into segments, each anchored at a `[N]` marker.
/// Text before the first marker forms a segment with no day.
pub fn split_day_segments(actions: &str) -> Vec<DaySegment<'_>> {
    let mut starts: Vec<usize> = day_marker_re().find_iter(actions).map(|m| m.start()).collect();
    if starts.first() != Some(&0) {
        starts.insert(0, 0);
    }

    let mut segments = Vec::new();
    for (idx, &start) in starts.iter().enumerate() {
        let end = starts.get(idx + 1).copied().unwrap_or(actions.len());
        let (day, body) = split_leading_day(actions[start..end].trim_start());
        let body = body.trim();
        if day.is_none() && body.is_empty() {
            continue;
        }
        segments.push(DaySegment { day, body });
    }
    segments
}

/// Normalize either input shape into canonical history
pub fn normalize(
    input: &HistoryInput,
    session_start: NaiveDate,
    origin: Chamber,
) -> Vec<HistoryDisplayItem> {
    match input {
        HistoryInput::Actions(actions) => normalize_actions(actions, session_start, origin),
        HistoryInput::Items(items) => normalize_items(items),
    }
}

/// Chamber an action moves the bill into, if it says so
fn chamber_signal(action: &ParsedAction) -> Option<Chamber> {
    match action.action_type {
        ActionType::Passed | ActionType::Failed => action.chamber,
        _ => action.committee.as_deref().and_then(Chamber::from_prefix),
    }
}

/// Convert a compact action string into dated history.
///
/// One parse state runs across every segment, so a `DP` on a later day is
/// still tagged with the committee named earlier. Sequence numbers run across
/// the whole string so same-day ties keep parse order. Text without any `[N]`
/// marker is dated at the session start.
pub fn normalize_actions(
    actions: &str,
    session_start: NaiveDate,
    origin: Chamber,
) -> Vec<HistoryDisplayItem> {
    let cleaned = clean(actions);
    let mut state = ParseState::default();
    let mut items = Vec::new();
    let mut current_day = 1;
    let mut chamber = origin;
    let mut sequence = 0u32;

    for segment in split_day_segments(&cleaned) {
        if let Some(day) = segment.day {
            current_day = day;
        }
        let date = date_for_legislative_day(session_start, current_day);

        for token in tokenize(segment.body) {
            let action = classify(&token, &mut state);
            sequence += 1;
            if let Some(next) = chamber_signal(&action) {
                chamber = next;
            }
            items.push(HistoryDisplayItem {
                date,
                action: action.description,
                chamber,
                chamber_id: chamber.id(),
                importance: u8::from(action.action_type.is_milestone()),
                sequence,
            });
        }
    }

    items
}

/// Parse a multi-day action string as one action sequence.
///
/// Embedded `[N]` markers separate tokens instead of being glued into them,
/// and `legislative_day` is the last marker seen. The actions line up one to
/// one with the items from [`normalize_actions`].
pub fn parse_all_days(actions: &str) -> ParsedBillActions {
    let cleaned = clean(actions);
    let segments = split_day_segments(&cleaned);
    let legislative_day = segments.iter().filter_map(|s| s.day).last();
    let tokens: Vec<String> = segments.iter().flat_map(|s| tokenize(s.body)).collect();
    parse_tokens(actions, legislative_day, &tokens)
}

/// Adapt LegiScan items, filling in sequence from array position
pub fn normalize_items(items: &[LegiScanHistoryItem]) -> Vec<HistoryDisplayItem> {
    items
        .iter()
        .enumerate()
        .map(|(idx, item)| HistoryDisplayItem {
            date: item.date,
            action: item.action.clone(),
            chamber: item.chamber,
            chamber_id: item.chamber.id(),
            importance: item.importance.min(1),
            sequence: item.sequence.unwrap_or(idx as u32 + 1),
        })
        .collect()
}

/// Which source a stored history value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryFormat {
    LegiScan,
    NmLegis,
    Unknown,
}

/// Stored history value after format detection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedHistory {
    pub format: HistoryFormat,
    pub items: Vec<HistoryDisplayItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsed: Option<ParsedBillActions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_actions: Option<String>,
}

impl DetectedHistory {
    fn unknown() -> Self {
        Self {
            format: HistoryFormat::Unknown,
            items: Vec::new(),
            parsed: None,
            raw_actions: None,
        }
    }
}

/// Detect and normalize a stored history value: a LegiScan array, an
/// nmlegis object with an `actions` string, or anything else (unknown).
pub fn parse_history_data(
    history: &Value,
    session_start: NaiveDate,
    origin: Chamber,
) -> DetectedHistory {
    match history {
        Value::Array(entries) => {
            let items: Vec<LegiScanHistoryItem> = entries
                .iter()
                .enumerate()
                .filter_map(|(idx, entry)| {
                    match serde_json::from_value::<LegiScanHistoryItem>(entry.clone()) {
                        Ok(item) => Some(item.with_default_sequence(idx as u32 + 1)),
                        Err(e) => {
                            tracing::warn!(index = idx, error = %e, "skipping malformed history item");
                            None
                        }
                    }
                })
                .collect();
            DetectedHistory {
                format: HistoryFormat::LegiScan,
                items: normalize_items(&items),
                parsed: None,
                raw_actions: None,
            }
        }
        Value::Object(map) => match map.get("actions").and_then(Value::as_str) {
            Some(actions) if !actions.trim().is_empty() => DetectedHistory {
                format: HistoryFormat::NmLegis,
                items: normalize_actions(actions, session_start, origin),
                parsed: Some(parse_all_days(actions)),
                raw_actions: Some(actions.to_string()),
            },
            _ => DetectedHistory::unknown(),
        },
        _ => DetectedHistory::unknown(),
    }
}

impl LegiScanHistoryItem {
    /// Keep an explicit sequence, otherwise use the given position
    fn with_default_sequence(mut self, position: u32) -> Self {
        self.sequence.get_or_insert(position);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::BillStatus;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_split_day_segments() {
        let segments = split_day_segments("[1] HAFC-DP [3] PASSED/H (54-2) [4] SFC");
        assert_eq!(
            segments,
            vec![
                DaySegment { day: Some(1), body: "HAFC-DP" },
                DaySegment { day: Some(3), body: "PASSED/H (54-2)" },
                DaySegment { day: Some(4), body: "SFC" },
            ]
        );
    }

    #[test]
    fn test_split_without_markers() {
        assert_eq!(
            split_day_segments("HPREF-HJC"),
            vec![DaySegment { day: None, body: "HPREF-HJC" }]
        );
        assert!(split_day_segments("").is_empty());
    }

    #[test]
    fn test_split_leading_text_before_marker() {
        let segments = split_day_segments("HPREF [2] HJC");
        assert_eq!(segments[0], DaySegment { day: None, body: "HPREF" });
        assert_eq!(segments[1], DaySegment { day: Some(2), body: "HJC" });
    }

    #[test]
    fn test_chamber_follows_committees_and_votes() {
        let items = normalize_actions(
            "[1] HJC-DP-PASSED/H (60-8) [5] SFC-DP",
            ymd(2025, 1, 21),
            Chamber::House,
        );
        let chambers: Vec<_> = items.iter().map(|i| i.chamber).collect();
        assert_eq!(
            chambers,
            vec![
                Chamber::House,
                Chamber::House,
                Chamber::House,
                Chamber::Senate,
                Chamber::Senate
            ]
        );
        assert_eq!(items[3].chamber_id, 2);
        assert_eq!(items[3].date, ymd(2025, 1, 27));
    }

    #[test]
    fn test_importance_marks_milestones() {
        let items = normalize_actions("HJC-DP-PASSED/H (60-8)", ymd(2025, 1, 21), Chamber::House);
        let importance: Vec<_> = items.iter().map(|i| i.importance).collect();
        assert_eq!(importance, vec![0, 0, 1]);
    }

    #[test]
    fn test_marker_only_segment_carries_day_forward() {
        let items = normalize_actions("[3] [4] HJC", ymd(2025, 1, 21), Chamber::House);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].date, ymd(2025, 1, 24));
    }

    #[test]
    fn test_normalize_items_fills_sequence() {
        let items = vec![
            LegiScanHistoryItem {
                date: ymd(2025, 1, 21),
                action: "Sent to HJC".to_string(),
                chamber: Chamber::House,
                chamber_id: None,
                importance: 0,
                sequence: None,
            },
            LegiScanHistoryItem {
                date: ymd(2025, 1, 21),
                action: "Passed Senate".to_string(),
                chamber: Chamber::Senate,
                chamber_id: Some(1),
                importance: 1,
                sequence: Some(7),
            },
        ];
        let normalized = normalize_items(&items);
        assert_eq!(normalized[0].sequence, 1);
        assert_eq!(normalized[0].chamber_id, 1);
        assert_eq!(normalized[1].sequence, 7);
        // chamber_id is always derived from chamber
        assert_eq!(normalized[1].chamber_id, 2);
    }

    #[test]
    fn test_history_input_untagged() {
        let input: HistoryInput = serde_json::from_str("\"HJC-DP\"").unwrap();
        assert_eq!(input, HistoryInput::Actions("HJC-DP".to_string()));

        let input: HistoryInput = serde_json::from_str(
            r#"[{"date":"2025-01-21","action":"Introduced","chamber":"S","chamber_id":2,"importance":0}]"#,
        )
        .unwrap();
        assert!(matches!(input, HistoryInput::Items(ref items) if items.len() == 1));
    }

    #[test]
    fn test_parse_history_data_formats() {
        let start = ymd(2025, 1, 21);

        let detected = parse_history_data(&Value::Null, start, Chamber::House);
        assert_eq!(detected.format, HistoryFormat::Unknown);
        assert!(detected.items.is_empty());

        let detected = parse_history_data(
            &serde_json::json!({"actions": "[2] HJC-DP", "emergency": false}),
            start,
            Chamber::House,
        );
        assert_eq!(detected.format, HistoryFormat::NmLegis);
        assert_eq!(detected.items.len(), 2);
        assert_eq!(detected.raw_actions.as_deref(), Some("[2] HJC-DP"));
        assert_eq!(detected.parsed.unwrap().legislative_day, Some(2));

        let detected = parse_history_data(&serde_json::json!({"actions": ""}), start, Chamber::House);
        assert_eq!(detected.format, HistoryFormat::Unknown);
    }

    #[test]
    fn test_multi_day_parse_agrees_with_items() {
        let detected = parse_history_data(
            &serde_json::json!({"actions": "[2] HAFC [5] DP [12] PASSED/H (54-2)"}),
            ymd(2025, 1, 21),
            Chamber::House,
        );
        let parsed = detected.parsed.unwrap();
        assert_eq!(detected.items.len(), 3);
        assert_eq!(parsed.actions.len(), 3);
        assert_eq!(parsed.legislative_day, Some(12));
        assert_eq!(parsed.status, BillStatus::PassedOne);
        assert_eq!(parsed.summary, "Passed House (54-2)");
        assert_eq!(parsed.actions[1].committee.as_deref(), Some("HAFC"));

        let descriptions: Vec<_> = parsed.actions.iter().map(|a| a.description.as_str()).collect();
        let item_actions: Vec<_> = detected.items.iter().map(|i| i.action.as_str()).collect();
        assert_eq!(descriptions, item_actions);
    }

    #[test]
    fn test_committee_carries_across_days() {
        let parsed = parse_all_days("[1] SFC [3] DP");
        // DP on day 3 still belongs to the committee named on day 1
        assert_eq!(parsed.actions[1].committee.as_deref(), Some("SFC"));
        assert_eq!(parsed.current_committee.as_deref(), Some("SFC"));
    }

    #[test]
    fn test_oversized_marker_splits_segments() {
        let segments = split_day_segments("HJC [99999999999] DP");
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1], DaySegment { day: Some(u32::MAX), body: "DP" });
    }

    #[test]
    fn test_parse_history_data_skips_bad_items() {
        let detected = parse_history_data(
            &serde_json::json!([
                {"date": "2025-01-21", "action": "Introduced", "chamber": "H", "chamber_id": 1, "importance": 0},
                {"date": "not a date", "action": "???", "chamber": "H"},
                {"date": "2025-01-22", "action": "Sent to HJC", "chamber": "H", "chamber_id": 1, "importance": 0}
            ]),
            ymd(2025, 1, 21),
            Chamber::House,
        );
        assert_eq!(detected.format, HistoryFormat::LegiScan);
        assert_eq!(detected.items.len(), 2);
        // Sequence keeps the original array position
        assert_eq!(detected.items[1].sequence, 3);
    }
}
