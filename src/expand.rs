//! Display expansion: annotate raw action text with plain-English segments.
//!
//! Read-time only. Already human-readable history text passes through as a
//! single `text` segment so re-expanding normalized history changes nothing.

use crate::codes::{action_codes, find_committee, lookup_action};
use crate::history::split_day_segments;
use crate::parser::{clean, parse, tokenize};
use crate::types::{ActionType, ParsedAction};
use regex::RegexSet;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

cached_regex!(standalone_vote_re, r"^\((\d+)\s*-\s*(\d+)\)$");

/// Phrases produced by the parser's descriptions
const HUMAN_READABLE_PATTERNS: &[&str] = &[
    r"(?i)^Referred to",
    r"(?i)^Sent to",
    r"(?i)^Committee voted",
    r"(?i)^Committee substitute",
    r"(?i)^Pre-filed",
    r"(?i)^Passed (House|Senate)",
    r"(?i)^Failed in",
    r"(?i)^Signed",
    r"(?i)vetoed",
    r"(?i)tabled",
    r"(?i)floor amendment",
    r"(?i)^Reported without",
    r"(?i)^Action postponed",
    r"(?i)^On Speaker",
    r"(?i)concurred",
];

fn human_readable_set() -> &'static RegexSet {
    static SET: OnceLock<RegexSet> = OnceLock::new();
    SET.get_or_init(|| RegexSet::new(HUMAN_READABLE_PATTERNS).expect("hard-coded patterns are valid"))
}

/// Kind of an expanded segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentType {
    Action,
    Committee,
    Vote,
    Day,
    Text,
    Referral,
}

/// One annotated piece of action text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpandedSegment {
    pub original: String,
    pub expanded: String,
    #[serde(rename = "type")]
    pub segment_type: SegmentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
}

impl ExpandedSegment {
    fn new(original: &str, expanded: impl Into<String>, segment_type: SegmentType) -> Self {
        Self {
            original: original.to_string(),
            expanded: expanded.into(),
            segment_type,
            tooltip: None,
        }
    }

    fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }
}

/// Expansion result for one piece of action text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpandedAction {
    pub original: String,
    pub segments: Vec<ExpandedSegment>,
    /// Segment expansions joined with arrows
    pub expanded: String,
}

/// True when the text is already a description rather than raw codes
pub fn looks_human_readable(text: &str) -> bool {
    let text = text.trim();
    human_readable_set().is_match(text) || action_codes().any(|code| code.short == text)
}

/// Expand raw action codes into annotated segments
pub fn expand(action: &str) -> ExpandedAction {
    let segments = if action.trim().is_empty() {
        Vec::new()
    } else if looks_human_readable(action) {
        vec![ExpandedSegment::new(action, action, SegmentType::Text)]
    } else {
        expand_codes(&clean(action))
    };

    let expanded = if segments.len() == 1 && segments[0].segment_type == SegmentType::Text {
        segments[0].expanded.clone()
    } else {
        segments
            .iter()
            .map(|s| s.expanded.as_str())
            .collect::<Vec<_>>()
            .join(" → ")
    };

    ExpandedAction {
        original: action.to_string(),
        segments,
        expanded,
    }
}

fn expand_codes(text: &str) -> Vec<ExpandedSegment> {
    let mut segments = Vec::new();

    for segment in split_day_segments(text) {
        if let Some(day) = segment.day {
            segments.push(
                ExpandedSegment::new(&format!("[{}]", day), format!("Day {}", day), SegmentType::Day)
                    .with_tooltip(format!("Legislative Day {}", day)),
            );
        }

        let tokens = tokenize(segment.body);
        let actions = parse(segment.body).actions;
        for (token, action) in tokens.iter().zip(actions.iter()) {
            segments.push(segment_for(token, action));
        }
    }

    segments
}

/// Table tooltip for a token, from the action table or the committee table
fn table_tooltip(token: &str) -> Option<String> {
    lookup_action(token)
        .map(|meaning| format!("{}: {}", token, meaning.full))
        .or_else(|| find_committee(token).map(|c| format!("{}: {}", token, c.name)))
}

fn segment_for(token: &str, action: &ParsedAction) -> ExpandedSegment {
    if let Some(caps) = standalone_vote_re().captures(token) {
        return ExpandedSegment::new(token, token, SegmentType::Vote)
            .with_tooltip(format!("Vote: {}-{}", &caps[1], &caps[2]));
    }

    match action.action_type {
        ActionType::Referred if token.contains('/') => {
            let names = action
                .description
                .trim_start_matches("Referred to: ")
                .to_string();
            ExpandedSegment::new(token, format!("Referrals: {}", names), SegmentType::Referral)
                .with_tooltip(format!("Referred to committees: {}", names))
        }
        ActionType::Referred => {
            let name = action.committee_name.as_deref().unwrap_or(token);
            ExpandedSegment::new(token, name, SegmentType::Committee)
                .with_tooltip(format!("{}: {}", token, name))
        }
        ActionType::Passed | ActionType::Failed if action.chamber.is_some() => {
            let segment = ExpandedSegment::new(token, &action.description, SegmentType::Vote);
            let verb = if action.action_type == ActionType::Passed {
                "Passed"
            } else {
                "Failed"
            };
            let chamber = action.chamber.map(|c| c.name()).unwrap_or_default();
            match &action.vote {
                Some(vote) => segment
                    .with_tooltip(format!("{} in the {} with vote {}", verb, chamber, vote)),
                None => segment.with_tooltip(format!("{} in the {}", verb, chamber)),
            }
        }
        ActionType::Signed => {
            let mut tooltip = "Signed by the Governor".to_string();
            if let Some(date) = &action.date {
                tooltip.push_str(&format!(" on {}", date));
            }
            if let Some(chapter) = &action.chapter {
                tooltip.push_str(&format!(", became Chapter {}", chapter));
            }
            ExpandedSegment::new(token, &action.description, SegmentType::Action).with_tooltip(tooltip)
        }
        ActionType::Vetoed => {
            let verb = if action.description.starts_with("Pocket") {
                "Pocket vetoed"
            } else {
                "Vetoed"
            };
            let tooltip = match &action.date {
                Some(date) => format!("{} by the Governor on {}", verb, date),
                None => format!("{} by the Governor", verb),
            };
            ExpandedSegment::new(token, &action.description, SegmentType::Action).with_tooltip(tooltip)
        }
        ActionType::Other if action.description == action.code && lookup_action(token).is_none() => {
            ExpandedSegment::new(token, token, SegmentType::Text)
        }
        _ => {
            let segment = ExpandedSegment::new(token, &action.description, SegmentType::Action);
            match table_tooltip(token) {
                Some(tooltip) => segment.with_tooltip(tooltip),
                None => segment,
            }
        }
    }
}
