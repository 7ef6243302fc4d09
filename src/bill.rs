//! Bill number helpers: `HB 1`, `CS/*SJR5` and friends.

use crate::types::Chamber;
use serde::{Deserialize, Serialize};
use std::fmt;

// CS = committee substitute, * = emergency clause
cached_regex!(bill_name_re, r"(?i)^(CS[\s/]*)?(\*)?(H|S)(B|M|R|CR|JM|JR)\s*(\d+)$");
cached_regex!(bill_search_re, r"(?i)^(H|S)(B|JR|M|R|CR|JM)?\d*$");

/// Kind of legislation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BillType {
    #[serde(rename = "B")]
    Bill,
    #[serde(rename = "M")]
    Memorial,
    #[serde(rename = "JM")]
    JointMemorial,
    #[serde(rename = "R")]
    Resolution,
    #[serde(rename = "JR")]
    JointResolution,
    #[serde(rename = "CR")]
    ConcurrentResolution,
}

impl BillType {
    pub fn code(self) -> &'static str {
        match self {
            BillType::Bill => "B",
            BillType::Memorial => "M",
            BillType::JointMemorial => "JM",
            BillType::Resolution => "R",
            BillType::JointResolution => "JR",
            BillType::ConcurrentResolution => "CR",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BillType::Bill => "Bill",
            BillType::Memorial => "Memorial",
            BillType::JointMemorial => "Joint Memorial",
            BillType::Resolution => "Resolution",
            BillType::JointResolution => "Joint Resolution",
            BillType::ConcurrentResolution => "Concurrent Resolution",
        }
    }

    pub fn from_code(code: &str) -> Option<BillType> {
        match code.to_uppercase().as_str() {
            "B" => Some(BillType::Bill),
            "M" => Some(BillType::Memorial),
            "JM" => Some(BillType::JointMemorial),
            "R" => Some(BillType::Resolution),
            "JR" => Some(BillType::JointResolution),
            "CR" => Some(BillType::ConcurrentResolution),
            _ => None,
        }
    }
}

/// A parsed bill number such as `SJR5`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillNumber {
    pub chamber: Chamber,
    pub bill_type: BillType,
    pub number: u32,
    #[serde(default)]
    pub committee_substitute: bool,
    #[serde(default)]
    pub emergency: bool,
}

impl BillNumber {
    /// Compact form without substitute or emergency markers, e.g. `HB1`
    pub fn normalized(&self) -> String {
        format!("{}{}{}", self.chamber.letter(), self.bill_type.code(), self.number)
    }
}

impl fmt::Display for BillNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.committee_substitute {
            write!(f, "CS/")?;
        }
        if self.emergency {
            write!(f, "*")?;
        }
        write!(f, "{}", self.normalized())
    }
}

/// Parse a bill name like `HB 1` or `CS/*SJR5`
pub fn parse_bill_name(name: &str) -> Option<BillNumber> {
    let caps = bill_name_re().captures(name.trim())?;
    Some(BillNumber {
        chamber: Chamber::from_prefix(&caps[3])?,
        bill_type: BillType::from_code(&caps[4])?,
        number: caps[5].parse().ok()?,
        committee_substitute: caps.get(1).is_some(),
        emergency: caps.get(2).is_some(),
    })
}

/// Full name for a bill type code, or the code itself when unknown
pub fn bill_type_name(code: &str) -> &str {
    BillType::from_code(code).map(BillType::name).unwrap_or(code)
}

/// True for search terms shaped like a bill number prefix (`HB`, `sjr12`)
pub fn is_bill_number_pattern(search: &str) -> bool {
    bill_search_re().is_match(search.trim())
}
