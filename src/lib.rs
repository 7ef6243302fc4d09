//! Parser and history normalizer for New Mexico Legislature bill actions.
//!
//! The legislature publishes each bill's history as one compact string such
//! as `[1] HPREF-HAFC-DP-PASSED/H (54-2)`. This library tokenizes and
//! classifies those strings, tracks the bill's status, converts legislative
//! days to calendar dates and expands codes back into plain English for
//! display.

/// Lazily compiled regex behind a zero-argument accessor
macro_rules! cached_regex {
    ($name:ident, $pattern:expr) => {
        fn $name() -> &'static regex::Regex {
            static RE: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
            RE.get_or_init(|| regex::Regex::new($pattern).expect("hard-coded pattern is valid"))
        }
    };
}

pub mod bill;
pub mod calendar;
pub mod codes;
pub mod config;
pub mod error;
pub mod expand;
pub mod history;
pub mod parser;
pub mod reference;
pub mod render;
pub mod rules;
pub mod status;
pub mod types;

pub use bill::{bill_type_name, parse_bill_name, BillNumber, BillType};
pub use calendar::date_for_legislative_day;
pub use codes::{lookup_action, lookup_committee, ActionMeaning, Committee};
pub use config::{Config, ConfigBuilder, OutputFormat};
pub use error::{Error, Result};
pub use expand::{expand, ExpandedAction, ExpandedSegment, SegmentType};
pub use history::{
    normalize, parse_all_days, parse_history_data, DetectedHistory, HistoryFormat, HistoryInput,
};
pub use parser::parse;
pub use reference::{get_all_codes, CodeReference};
pub use status::{current_bill_location, BillLocation, BillStatus, LocationStatus};
pub use types::{
    ActionType, Chamber, HistoryDisplayItem, LegiScanHistoryItem, ParsedAction, ParsedBillActions,
};

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::config::{Config, ConfigBuilder, OutputFormat};
    pub use crate::error::{Error, Result};
    pub use crate::expand::{expand, ExpandedAction};
    pub use crate::history::{normalize, normalize_actions, HistoryInput};
    pub use crate::parser::parse;
    pub use crate::reference::get_all_codes;
    pub use crate::status::BillStatus;
    pub use crate::types::{
        ActionType, Chamber, HistoryDisplayItem, LegiScanHistoryItem, ParsedAction,
        ParsedBillActions,
    };
}
