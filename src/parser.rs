//! Action-string parser.
//!
//! Turns a compact NM Legislature action string such as
//! `[1] HPREF-HAFC-DP-PASSED/H (54-2)` into an ordered list of classified
//! actions plus the derived committee, referral and status state.

use crate::rules::{classify, ParseState};
use crate::status::BillStatus;
use crate::types::{ActionType, ParsedBillActions};

cached_regex!(leading_day_re, r"^\[(\d+)\]\s*");

/// Remove stray backticks and surrounding whitespace
pub fn clean(raw: &str) -> String {
    raw.replace('`', "").trim().to_string()
}

/// Split off a leading `[N]` legislative-day marker
pub fn split_leading_day(text: &str) -> (Option<u32>, &str) {
    match leading_day_re().captures(text) {
        Some(caps) => {
            // Oversized day numbers saturate rather than leak into the tokens
            let day = caps[1].parse().unwrap_or(u32::MAX);
            let rest = &text[caps[0].len()..];
            (Some(day), rest)
        }
        None => (None, text),
    }
}

/// Split an action string on hyphens, trimming tokens and dropping empties.
///
/// Hyphens inside parentheses belong to vote tallies like `(54-2)` and do
/// not split.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;

    for ch in text.chars() {
        match ch {
            '(' => {
                depth += 1;
                current.push(ch);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            '-' if depth == 0 => {
                push_token(&mut tokens, &current);
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    push_token(&mut tokens, &current);

    tokens
}

fn push_token(tokens: &mut Vec<String>, token: &str) {
    let trimmed = token.trim();
    if !trimmed.is_empty() {
        tokens.push(trimmed.to_string());
    }
}

/// Parse one action string. Never fails: unknown tokens become `other`
/// actions carrying their raw text.
pub fn parse(raw: &str) -> ParsedBillActions {
    let cleaned = clean(raw);
    if cleaned.is_empty() {
        return ParsedBillActions::empty(raw);
    }

    let (legislative_day, body) = split_leading_day(&cleaned);
    parse_tokens(raw, legislative_day, &tokenize(body))
}

/// Run the rule table over already-split tokens with one shared state
pub fn parse_tokens(raw: &str, legislative_day: Option<u32>, tokens: &[String]) -> ParsedBillActions {
    let mut state = ParseState::default();
    let actions: Vec<_> = tokens
        .iter()
        .map(|token| classify(token, &mut state))
        .collect();

    let status = state.status.current();
    // A bill in a terminal state no longer sits in any committee
    let (current_committee, current_committee_name) = if status.is_terminal() {
        (None, None)
    } else {
        (state.current_committee, state.current_committee_name)
    };

    let mut parsed = ParsedBillActions {
        raw: raw.to_string(),
        legislative_day,
        current_committee,
        current_committee_name,
        referrals: state.referrals,
        referral_names: state.referral_names,
        actions,
        summary: String::new(),
        status,
    };
    parsed.summary = summarize(&parsed);
    parsed
}

/// One-line description of where the parsed bill stands
pub fn summarize(parsed: &ParsedBillActions) -> String {
    let mut parts = Vec::new();

    let headline = match parsed.status {
        BillStatus::Signed => "Signed into law".to_string(),
        BillStatus::Vetoed => "Vetoed by Governor".to_string(),
        BillStatus::Failed => "Failed".to_string(),
        BillStatus::Tabled => "Tabled".to_string(),
        BillStatus::PassedBoth => "Passed both chambers - awaiting Governor".to_string(),
        BillStatus::PassedOne => parsed
            .last_of(ActionType::Passed)
            .map(|a| a.description.clone())
            .unwrap_or_else(|| "Passed one chamber".to_string()),
        BillStatus::Prefiled | BillStatus::InCommittee => {
            match (&parsed.current_committee, &parsed.current_committee_name) {
                (Some(_), Some(name)) => format!("In {}", name),
                _ => parsed
                    .actions
                    .last()
                    .map(|a| a.description.clone())
                    .unwrap_or_else(|| "No action recorded".to_string()),
            }
        }
    };
    parts.push(headline);

    // Referrals only matter while the bill is still working through committees
    let pending = matches!(parsed.status, BillStatus::Prefiled | BillStatus::InCommittee);
    if pending && parsed.referrals.len() > 1 {
        parts.push(format!("Referrals: {}", parsed.referral_names.join(", ")));
    }

    parts.join(". ")
}
