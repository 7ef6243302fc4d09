use crate::error::Error;
use crate::status::BillStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Legislative chamber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Chamber {
    #[serde(rename = "H")]
    House,
    #[serde(rename = "S")]
    Senate,
}

impl Chamber {
    /// Single-letter code used in action strings and history items
    pub fn letter(self) -> &'static str {
        match self {
            Chamber::House => "H",
            Chamber::Senate => "S",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Chamber::House => "House",
            Chamber::Senate => "Senate",
        }
    }

    /// Numeric id stored alongside the letter (House = 1, Senate = 2)
    pub fn id(self) -> u8 {
        match self {
            Chamber::House => 1,
            Chamber::Senate => 2,
        }
    }

    pub fn opposite(self) -> Chamber {
        match self {
            Chamber::House => Chamber::Senate,
            Chamber::Senate => Chamber::House,
        }
    }

    /// Chamber named by a leading `H`/`S` (case-insensitive), e.g. a committee code
    pub fn from_prefix(code: &str) -> Option<Chamber> {
        match code.chars().next() {
            Some('H') | Some('h') => Some(Chamber::House),
            Some('S') | Some('s') => Some(Chamber::Senate),
            _ => None,
        }
    }
}

impl FromStr for Chamber {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "H" | "HOUSE" => Ok(Chamber::House),
            "S" | "SENATE" => Ok(Chamber::Senate),
            _ => Err(Error::InvalidChamber(s.to_string())),
        }
    }
}

impl fmt::Display for Chamber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letter())
    }
}

/// Semantic classification of one action token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Prefiled,
    Referred,
    CommitteeAction,
    FloorAction,
    Passed,
    Failed,
    Signed,
    Vetoed,
    Tabled,
    Other,
}

impl ActionType {
    /// Passage, signing, veto and failure are the milestones of a bill's life
    pub fn is_milestone(self) -> bool {
        matches!(
            self,
            ActionType::Passed | ActionType::Signed | ActionType::Vetoed | ActionType::Failed
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActionType::Prefiled => "prefiled",
            ActionType::Referred => "referred",
            ActionType::CommitteeAction => "committee_action",
            ActionType::FloorAction => "floor_action",
            ActionType::Passed => "passed",
            ActionType::Failed => "failed",
            ActionType::Signed => "signed",
            ActionType::Vetoed => "vetoed",
            ActionType::Tabled => "tabled",
            ActionType::Other => "other",
        }
    }
}

/// One classified step parsed out of an action string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedAction {
    #[serde(rename = "type")]
    pub action_type: ActionType,
    /// The raw token this action was parsed from
    pub code: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub committee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub committee_name: Option<String>,
    /// Chamber named explicitly by the token (PASSED/H, s/cncrd, SPREF)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chamber: Option<Chamber>,
    /// Vote tally as "yea-nay"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vote: Option<String>,
    /// Best-effort date fragment, e.g. "Mar.4"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chapter: Option<String>,
}

impl ParsedAction {
    pub fn new(action_type: ActionType, code: &str, description: impl Into<String>) -> Self {
        Self {
            action_type,
            code: code.to_string(),
            description: description.into(),
            committee: None,
            committee_name: None,
            chamber: None,
            vote: None,
            date: None,
            chapter: None,
        }
    }

    /// Tag the action with a committee and its display name
    pub fn in_committee(mut self, committee: Option<String>, name: Option<String>) -> Self {
        self.committee = committee;
        self.committee_name = name;
        self
    }

    pub fn with_chamber(mut self, chamber: Chamber) -> Self {
        self.chamber = Some(chamber);
        self
    }
}

/// Full parse result for one action string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedBillActions {
    pub raw: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legislative_day: Option<u32>,
    pub current_committee: Option<String>,
    pub current_committee_name: Option<String>,
    pub referrals: Vec<String>,
    pub referral_names: Vec<String>,
    pub actions: Vec<ParsedAction>,
    pub summary: String,
    pub status: BillStatus,
}

impl ParsedBillActions {
    /// Result for input with no actions at all
    pub fn empty(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            legislative_day: None,
            current_committee: None,
            current_committee_name: None,
            referrals: Vec::new(),
            referral_names: Vec::new(),
            actions: Vec::new(),
            summary: "No action recorded".to_string(),
            status: BillStatus::Prefiled,
        }
    }

    /// Most recent action of the given type
    pub fn last_of(&self, action_type: ActionType) -> Option<&ParsedAction> {
        self.actions.iter().rev().find(|a| a.action_type == action_type)
    }
}

/// Canonical, persisted unit of bill history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryDisplayItem {
    pub date: NaiveDate,
    pub action: String,
    pub chamber: Chamber,
    pub chamber_id: u8,
    /// 1 for passage/signing/veto/failure milestones, otherwise 0
    pub importance: u8,
    /// 1-based order among events, used to break ties on the same date
    pub sequence: u32,
}

/// History item as delivered by LegiScan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegiScanHistoryItem {
    pub date: NaiveDate,
    pub action: String,
    pub chamber: Chamber,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chamber_id: Option<u8>,
    #[serde(default)]
    pub importance: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<u32>,
}
