//! Reference listing of every known code, for display and search.

use crate::codes::{action_codes, committee_codes};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionCodeEntry {
    pub code: String,
    pub short: String,
    pub full: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitteeCodeEntry {
    pub code: String,
    pub name: String,
}

/// Both code tables in table order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeReference {
    pub actions: Vec<ActionCodeEntry>,
    pub committees: Vec<CommitteeCodeEntry>,
}

impl CodeReference {
    /// Entries whose code or description contains `term` (case-insensitive)
    pub fn search(&self, term: &str) -> CodeReference {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return self.clone();
        }
        CodeReference {
            actions: self
                .actions
                .iter()
                .filter(|a| contains_term(&[&a.code, &a.short, &a.full], &needle))
                .cloned()
                .collect(),
            committees: self
                .committees
                .iter()
                .filter(|c| contains_term(&[&c.code, &c.name], &needle))
                .cloned()
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty() && self.committees.is_empty()
    }
}

fn contains_term(fields: &[&String], needle: &str) -> bool {
    fields.iter().any(|f| f.to_lowercase().contains(needle))
}

/// Every action and committee code
pub fn get_all_codes() -> CodeReference {
    CodeReference {
        actions: action_codes()
            .map(|a| ActionCodeEntry {
                code: a.code.to_string(),
                short: a.short.to_string(),
                full: a.full.to_string(),
            })
            .collect(),
        committees: committee_codes()
            .map(|c| CommitteeCodeEntry {
                code: c.code.to_string(),
                name: c.name.to_string(),
            })
            .collect(),
    }
}

/// Codes matching a search term
pub fn search_codes(term: &str) -> CodeReference {
    get_all_codes().search(term)
}
