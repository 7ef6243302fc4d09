//! Bill status state machine and location derivation from canonical history.

use crate::types::{Chamber, HistoryDisplayItem};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

cached_regex!(referred_re, r"(?i)(?:sent to|referred to):?\s+(.+)");

/// Finite bill status derived from the parsed action sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillStatus {
    Prefiled,
    InCommittee,
    PassedOne,
    PassedBoth,
    Signed,
    Vetoed,
    Failed,
    Tabled,
}

impl BillStatus {
    /// Terminal states never transition again
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            BillStatus::Signed | BillStatus::Vetoed | BillStatus::Failed | BillStatus::Tabled
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BillStatus::Prefiled => "prefiled",
            BillStatus::InCommittee => "in_committee",
            BillStatus::PassedOne => "passed_one",
            BillStatus::PassedBoth => "passed_both",
            BillStatus::Signed => "signed",
            BillStatus::Vetoed => "vetoed",
            BillStatus::Failed => "failed",
            BillStatus::Tabled => "tabled",
        }
    }

    /// LegiScan progress code: 1 introduced, 2 engrossed, 3 enrolled,
    /// 4 passed, 5 vetoed, 6 failed
    pub fn progress_code(self) -> u8 {
        match self {
            BillStatus::Prefiled | BillStatus::InCommittee => 1,
            BillStatus::PassedOne => 2,
            BillStatus::PassedBoth => 3,
            BillStatus::Signed => 4,
            BillStatus::Vetoed => 5,
            BillStatus::Failed | BillStatus::Tabled => 6,
        }
    }

    /// Human label and description for the LegiScan progress code
    pub fn progress_label(self) -> (&'static str, &'static str) {
        match self.progress_code() {
            1 => ("In Committee", "Being reviewed by committee"),
            2 => ("Passed One Chamber", "Heading to the other chamber"),
            3 => ("Passed Both Chambers", "Waiting for Governor's signature"),
            4 => ("Signed Into Law", "Signed by the Governor"),
            5 => ("Vetoed", "Rejected by the Governor"),
            _ => ("Did Not Pass", "Failed to advance"),
        }
    }
}

/// Left-to-right status state machine fed by the parser.
///
/// Once a terminal status is reached every further transition is ignored.
#[derive(Debug, Clone)]
pub struct StatusTracker {
    status: BillStatus,
    passed: HashSet<Chamber>,
}

impl Default for StatusTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusTracker {
    pub fn new() -> Self {
        Self {
            status: BillStatus::Prefiled,
            passed: HashSet::new(),
        }
    }

    pub fn current(&self) -> BillStatus {
        self.status
    }

    fn set(&mut self, next: BillStatus) {
        if !self.status.is_terminal() {
            self.status = next;
        }
    }

    pub fn prefiled(&mut self) {
        self.set(BillStatus::Prefiled);
    }

    /// Bill referred to a committee. A bill that already passed both chambers
    /// keeps that status while it sits on a concurrence calendar.
    pub fn enter_committee(&mut self) {
        if self.status != BillStatus::PassedBoth {
            self.set(BillStatus::InCommittee);
        }
    }

    /// Record a chamber passage; repeating the same chamber never escalates
    pub fn record_passage(&mut self, chamber: Chamber) {
        if self.status.is_terminal() {
            return;
        }
        self.passed.insert(chamber);
        if self.passed.contains(&chamber.opposite()) {
            self.status = BillStatus::PassedBoth;
        } else {
            self.status = BillStatus::PassedOne;
        }
    }

    /// Move into a terminal status (signed, vetoed, failed or tabled)
    pub fn terminate(&mut self, status: BillStatus) {
        debug_assert!(status.is_terminal());
        self.set(status);
    }
}

/// Where a bill currently sits, derived from its canonical history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationStatus {
    InCommittee,
    PassedHouse,
    PassedSenate,
    PassedBoth,
    Signed,
    Vetoed,
    Failed,
    Unknown,
}

/// Human-readable current location of a bill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillLocation {
    pub location: String,
    pub status: LocationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub committee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_date: Option<NaiveDate>,
}

/// History sorted ascending by date, then sequence
fn chronological(history: &[HistoryDisplayItem]) -> Vec<&HistoryDisplayItem> {
    let mut sorted: Vec<&HistoryDisplayItem> = history.iter().collect();
    sorted.sort_by(|a, b| a.date.cmp(&b.date).then(a.sequence.cmp(&b.sequence)));
    sorted
}

/// Committee named by "Sent to X" / "Referred to X"
fn referred_committee(action: &str) -> Option<String> {
    referred_re()
        .captures(action)
        .map(|caps| caps[1].trim().to_string())
        .filter(|name| !name.is_empty())
}

fn clears_committee(lower: &str) -> bool {
    ["passed", "signed", "vetoed", "failed"]
        .iter()
        .any(|word| lower.contains(word))
}

/// Latest history item by date, then sequence
pub fn most_recent_action(history: &[HistoryDisplayItem]) -> Option<&HistoryDisplayItem> {
    chronological(history).last().copied()
}

/// Last committee the bill was sent to, unless a later passage or terminal
/// action moved it out
pub fn current_committee(history: &[HistoryDisplayItem]) -> Option<String> {
    let mut committee = None;
    for item in chronological(history) {
        if let Some(name) = referred_committee(&item.action) {
            committee = Some(name);
        }
        if clears_committee(&item.action.to_lowercase()) {
            committee = None;
        }
    }
    committee
}

/// Describe where a bill is now, given its canonical history
pub fn current_bill_location(history: &[HistoryDisplayItem]) -> BillLocation {
    if history.is_empty() {
        return BillLocation {
            location: "Waiting for first committee assignment".to_string(),
            status: LocationStatus::Unknown,
            committee: None,
            last_action: None,
            last_date: None,
        };
    }

    let sorted = chronological(history);
    let mut committee: Option<String> = None;
    let mut passed_house = false;
    let mut passed_senate = false;
    let mut signed = false;
    let mut vetoed = false;
    let mut failed = false;

    for item in &sorted {
        let lower = item.action.to_lowercase();

        if let Some(name) = referred_committee(&item.action) {
            committee = Some(name);
        }

        // Only passage verbs count; "Failed to pass" must not mark passage
        let passed = lower.starts_with("passed");
        let names_house = lower.contains("house");
        let names_senate = lower.contains("senate");
        if passed && (names_house || (!names_senate && item.chamber == Chamber::House)) {
            passed_house = true;
            committee = None;
        }
        if passed && (names_senate || (!names_house && item.chamber == Chamber::Senate)) {
            passed_senate = true;
            committee = None;
        }

        if lower.contains("signed") {
            signed = true;
        }
        if lower.contains("veto") {
            vetoed = true;
        }
        if lower.contains("failed")
            || lower.contains("did not pass")
            || lower.contains("do not pass")
            || lower.contains("tabled indefinitely")
            || lower.contains("postponed indefinitely")
        {
            failed = true;
        }
    }

    let last = sorted.last();
    let last_action = last.map(|item| item.action.clone());
    let last_date = last.map(|item| item.date);

    let (location, status, committee) = if signed {
        ("Signed into law by the Governor".to_string(), LocationStatus::Signed, None)
    } else if vetoed {
        ("Vetoed by the Governor".to_string(), LocationStatus::Vetoed, None)
    } else if failed {
        ("Did not pass".to_string(), LocationStatus::Failed, None)
    } else if passed_house && passed_senate {
        (
            "Passed both chambers, waiting for Governor".to_string(),
            LocationStatus::PassedBoth,
            None,
        )
    } else if passed_house || passed_senate {
        let (chamber, other, status) = if passed_house {
            ("House", "Senate", LocationStatus::PassedHouse)
        } else {
            ("Senate", "House", LocationStatus::PassedSenate)
        };
        match committee {
            Some(name) => (
                format!("Passed the {}, now in {}", chamber, name),
                status,
                Some(name),
            ),
            None => (
                format!("Passed the {}, heading to {}", chamber, other),
                status,
                None,
            ),
        }
    } else if let Some(name) = committee {
        (
            format!("Currently in {}", name),
            LocationStatus::InCommittee,
            Some(name),
        )
    } else {
        (
            "Waiting for committee assignment".to_string(),
            LocationStatus::Unknown,
            None,
        )
    };

    BillLocation {
        location,
        status,
        committee,
        last_action,
        last_date,
    }
}
