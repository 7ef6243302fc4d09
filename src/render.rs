//! Plain-text renderings used by the CLI's `--format text` mode.

use crate::expand::ExpandedAction;
use crate::reference::CodeReference;
use crate::types::{HistoryDisplayItem, ParsedBillActions};
use std::fmt::Write;

/// Summary line followed by one line per action
pub fn parsed_actions(parsed: &ParsedBillActions) -> String {
    let mut out = String::new();
    match parsed.legislative_day {
        Some(day) => {
            let _ = writeln!(out, "Day {}: {}", day, parsed.summary);
        }
        None => {
            let _ = writeln!(out, "{}", parsed.summary);
        }
    }
    let _ = writeln!(out, "Status: {}", parsed.status.as_str());
    for action in &parsed.actions {
        let _ = writeln!(
            out,
            "  {:<16} {:<18} {}",
            action.code,
            action.action_type.as_str(),
            action.description
        );
    }
    out
}

/// One line per history item; milestones are starred
pub fn history(items: &[HistoryDisplayItem]) -> String {
    let mut out = String::new();
    for item in items {
        let marker = if item.importance > 0 { '*' } else { ' ' };
        let _ = writeln!(
            out,
            "{} {} {:>3} {} {}",
            item.date, item.chamber, item.sequence, marker, item.action
        );
    }
    out
}

/// Arrow-joined expansion followed by tooltips
pub fn expanded(action: &ExpandedAction) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", action.expanded);
    for segment in &action.segments {
        if let Some(tooltip) = &segment.tooltip {
            let _ = writeln!(out, "  - {}", tooltip);
        }
    }
    out
}

/// Two-section code listing
pub fn codes(reference: &CodeReference) -> String {
    let mut out = String::new();
    if !reference.actions.is_empty() {
        let _ = writeln!(out, "Actions:");
        for action in &reference.actions {
            let _ = writeln!(out, "  {:<14} {}", action.code, action.short);
        }
    }
    if !reference.committees.is_empty() {
        let _ = writeln!(out, "Committees:");
        for committee in &reference.committees {
            let _ = writeln!(out, "  {:<14} {}", committee.code, committee.name);
        }
    }
    out
}
