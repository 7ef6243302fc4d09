//! Static lookup tables for NM Legislature action and committee abbreviations.
//!
//! Source: the legislature's "Key to Abbreviations" page. The tables are
//! immutable and indexed once on first use.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Action codes: (code, short description, full description)
const ACTION_CODES: &[(&str, &str, &str)] = &[
    ("*", "Emergency clause", "Emergency clause. If a bill passes by less than the required two-thirds vote, this symbol is deleted."),
    ("API", "Postponed Indefinitely", "Action postponed indefinitely"),
    ("CA", "Constitutional Amendment", "Constitutional Amendment"),
    ("CC", "Conference Committee", "Conference committee. This entry follows when the Senate and House fail to agree on amendments to a bill."),
    ("CS", "Committee Substitute", "Committee substitute. This entry, following a DNP report, indicates the committee's substitute bill. Succeeding entries will record the action on the committee substitute."),
    ("DEAD", "Dead", "Bill Has Died"),
    ("DNP", "Do Not Pass", "DO NOT PASS committee report adopted"),
    ("DNP.", "Do Not Pass", "DO NOT PASS committee report adopted"),
    ("DNP nt adptd", "DNP Not Adopted", "DO NOT PASS committee report NOT adopted"),
    ("DP", "Do Pass", "DO PASS committee report adopted"),
    ("DP/a", "Do Pass (amended)", "DO PASS, as amended, committee report adopted"),
    ("E&E", "Enrolled & Engrossed", "The final authoritative version of a bill passed by both houses of the legislature. The preparation is performed by the house of introduction and incorporates all amendments adopted and agreed to by both houses."),
    ("PASSED", "Passed", "Passed"),
    ("PASS", "Passed", "Passed"),
    ("PASSED/H", "Passed House", "Passed House (always followed by announced vote)"),
    ("PASSED/S", "Passed Senate", "Passed Senate (always followed by announced vote)"),
    ("FAILED/H", "Failed House", "Failed passage in House (sometimes followed by announced vote)"),
    ("FAILED/S", "Failed Senate", "Failed passage in Senate (sometimes followed by announced vote)"),
    ("FL/", "Floor Substitute", "Floor substitute. A bill or committee substitute may be substituted on final passage by any legislator. Succeeding entries will record the action on the floor substitute."),
    ("fl/a", "Floor Amendment", "Floor amendment adopted"),
    ("fl/aa", "Floor Amendments (2)", "Two floor amendments adopted"),
    ("fl/aaa", "Floor Amendments (3)", "Three floor amendments adopted"),
    ("h/fld cncr", "House Failed Concur", "House has failed to concur in Senate amendments on a House bill. The House then sends a message requesting the Senate to recede from its amendments."),
    ("s/cncrd", "Senate Concurred", "Senate has concurred in House amendments on a Senate bill"),
    ("s/fld recede", "Senate Failed Recede", "This procedure could follow if the Senate refuses to recede from its amendments"),
    ("germane", "Germane", "Bills which fall within the purview of a 30-day session"),
    ("m/rcnsr adptd", "Reconsider Adopted", "Motion to reconsider previous action adopted"),
    ("rcld frm/h", "Recalled from House", "Bill recalled from the House for further consideration by the Senate"),
    ("rcld frm/s", "Recalled from Senate", "Bill recalled from the Senate for further consideration by the House"),
    ("SGND", "Signed", "Signed by one or both houses. For legislation not requiring Governor's signature."),
    ("SGND.", "Signed", "Signed by one or both houses. For legislation not requiring Governor's signature."),
    ("PSGN", "Signed", "Signed by the Governor"),
    ("PVET", "Vetoed", "Vetoed by the Governor"),
    ("PKVT", "Pocket Veto", "Pocket Veto"),
    ("VETO", "Vetoed", "Vetoed by the Governor"),
    ("OCER", "Certificate", "Certificate"),
    ("PCH", "Chaptered", "Chaptered into law"),
    ("PCA", "Constitutional Amendment", "Constitutional Amendment"),
    ("QSUB", "Substituted", "Substituted"),
    ("T", "Speaker's Table", "On the Speaker's table by rule (temporary calendar). This entry appears only on House action. By House Rule 11-20-1, legislation, except that on the Consent Calendar, is placed on the Speaker's table for 24 hours before being placed on the House Calendar for action by the House."),
    ("tbld", "Tabled", "Tabled temporarily by motion"),
    ("TBLD INDEF", "Tabled Indefinitely", "Tabled indefinitely"),
    ("TBLD INDEF.", "Tabled Indefinitely", "Tabled indefinitely"),
    ("w/drn", "Withdrawn", "Withdrawn from committee or daily calendar for subsequent action"),
    ("w/o rec", "Without Recommendation", "WITHOUT RECOMMENDATION committee report adopted"),
    ("prntd", "Printed", "Bill has been printed"),
    ("nt prntd", "Not Printed", "Bill not printed"),
    ("nt ref com", "Not Referred", "Not referred to committee"),
];

/// Committee codes: (code, committee name)
const COMMITTEE_CODES: &[(&str, &str)] = &[
    ("HAAWC", "House Agriculture, Acequias And Water Resources"),
    ("HAFC", "House Appropriations & Finance"),
    ("HAGC", "House Agriculture & Water Resources Committee"),
    ("HAWC", "House Agriculture, Water & Wildlife"),
    ("HBEC", "House Business & Employment"),
    ("HBIC", "House Business & Industry Committee"),
    ("HCAL", "House Calendar"),
    ("HCAT", "House Temporary Calendar"),
    ("HCEDC", "House Commerce & Economic Development Committee"),
    ("HCNR", "House Concurrence Calendar"),
    ("HCPAC", "House Consumer & Public Affairs Committee"),
    ("HCW", "House Committee of the Whole"),
    ("HE&EC", "House Enrolling & Engrossing"),
    ("HEC", "House Education"),
    ("HEEC", "House Enrolling & Engrossing Committee"),
    ("HEENC", "House Energy, Environment & Natural Resources (former)"),
    ("HENRC", "House Energy, Environment & Natural Resources"),
    ("HGEIC", "House Government, Elections & Indian Affairs"),
    ("HGUAC", "House Government & Urban Affairs"),
    ("HHC", "House Health"),
    ("HHGAC", "House Health & Government Affairs Committee"),
    ("HHGIC", "House Health, Government & Indian Affairs Committee"),
    ("HHHC", "House Health & Human Services"),
    ("HINT", "House Intro"),
    ("HJC", "House Judiciary"),
    ("HLC", "House Labor & Human Resources Committee"),
    ("HLEDC", "House Labor & Economic Development"),
    ("HLELC", "House Local Government, Elections, Land Grants & Cultural Affairs"),
    ("HLLC", "House Local Government, Land Grants & Cultural Affairs"),
    ("HLVMC", "House Labor, Veterans' And Military Affairs Committee"),
    ("HPREF", "House Pre-file"),
    ("HPSC", "House Printing & Supplies"),
    ("HRC", "House Rules & Order of Business"),
    ("HRDLC", "House Rural Development, Land Grants And Cultural Affairs"),
    ("HRPAC", "House Regulatory & Public Affairs"),
    ("HSCAC", "House Safety & Civil Affairs"),
    ("HSEIC", "House State Government, Elections & Indian Affairs Committee"),
    ("HSIVC", "House State Government, Indian & Veterans' Affairs"),
    ("HTBL", "House Table"),
    ("HTC", "House Transportation Committee"),
    ("HTPWC", "House Transportation & Public Works"),
    ("HTRC", "House Taxation & Revenue Committee"),
    ("HVEC", "House Voters & Elections Committee"),
    ("HWMC", "House Ways & Means"),
    ("HXPSC", "House Printing & Supplies Committee"),
    ("HXRC", "House Rules & Order of Business"),
    ("HZLM", "In Limbo (House)"),
    ("SCAL", "Senate Calendar"),
    ("SCC", "Senate Committees' Committee"),
    ("SCNR", "Senate Concurrence Calendar"),
    ("SCONC", "Senate Conservation"),
    ("SCORC", "Senate Corporations & Transportation"),
    ("SCW", "Senate Committee of the Whole"),
    ("SEC", "Senate Education"),
    ("SFC", "Senate Finance"),
    ("SGC", "Senate Select Gaming Committee"),
    ("SHPAC", "Senate Health and Public Affairs"),
    ("SIAC", "Senate Indian & Cultural Affairs"),
    ("SINT", "Senate Intro"),
    ("SIRC", "Senate Indian, Rural and Cultural Affairs"),
    ("SJC", "Senate Judiciary"),
    ("SPAC", "Senate Public Affairs"),
    ("SPREF", "Senate Pre-file"),
    ("SRC", "Senate Rules"),
    ("STBL", "Senate Table"),
    ("STBTC", "Senate Tax, Business and Transportation"),
    ("SWMC", "Senate Ways & Means Committee"),
    ("SZLM", "In Limbo (Senate)"),
];

/// Meaning of an action code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionMeaning {
    pub code: &'static str,
    pub short: &'static str,
    pub full: &'static str,
}

/// A committee table row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Committee {
    pub code: &'static str,
    pub name: &'static str,
}

/// Exact and uppercased indexes into one of the static tables
struct CodeIndex {
    exact: HashMap<&'static str, usize>,
    upper: HashMap<String, usize>,
}

impl CodeIndex {
    fn build<'a>(codes: impl Iterator<Item = &'a &'static str>) -> Self {
        let mut exact = HashMap::new();
        let mut upper = HashMap::new();
        for (idx, code) in codes.enumerate() {
            exact.insert(*code, idx);
            // First spelling wins when two codes differ only by case
            upper.entry(code.to_uppercase()).or_insert(idx);
        }
        Self { exact, upper }
    }

    /// Exact match, then case-insensitive, then both again with a trailing period
    fn find(&self, code: &str) -> Option<usize> {
        let code = code.trim();
        if code.is_empty() {
            return None;
        }
        self.find_once(code).or_else(|| {
            if code.ends_with('.') {
                None
            } else {
                self.find_once(&format!("{}.", code))
            }
        })
    }

    fn find_once(&self, code: &str) -> Option<usize> {
        self.exact
            .get(code)
            .or_else(|| self.upper.get(&code.to_uppercase()))
            .copied()
    }
}

fn action_index() -> &'static CodeIndex {
    static INDEX: OnceLock<CodeIndex> = OnceLock::new();
    INDEX.get_or_init(|| CodeIndex::build(ACTION_CODES.iter().map(|(code, _, _)| code)))
}

fn committee_index() -> &'static CodeIndex {
    static INDEX: OnceLock<CodeIndex> = OnceLock::new();
    INDEX.get_or_init(|| CodeIndex::build(COMMITTEE_CODES.iter().map(|(code, _)| code)))
}

/// Look up the meaning of an action code
pub fn lookup_action(code: &str) -> Option<ActionMeaning> {
    action_index().find(code).map(|idx| {
        let (code, short, full) = ACTION_CODES[idx];
        ActionMeaning { code, short, full }
    })
}

/// Look up a committee table row by code
pub fn find_committee(code: &str) -> Option<Committee> {
    committee_index().find(code).map(|idx| {
        let (code, name) = COMMITTEE_CODES[idx];
        Committee { code, name }
    })
}

/// Look up the name of a committee
pub fn lookup_committee(code: &str) -> Option<&'static str> {
    find_committee(code).map(|c| c.name)
}

/// Check if a string is a known action code
pub fn is_action_code(code: &str) -> bool {
    lookup_action(code).is_some()
}

/// Check if a string is a known committee code
pub fn is_committee_code(code: &str) -> bool {
    find_committee(code).is_some()
}

/// Iterate over every action code in table order
pub fn action_codes() -> impl Iterator<Item = ActionMeaning> {
    ACTION_CODES
        .iter()
        .map(|&(code, short, full)| ActionMeaning { code, short, full })
}

/// Iterate over every committee code in table order
pub fn committee_codes() -> impl Iterator<Item = Committee> {
    COMMITTEE_CODES
        .iter()
        .map(|&(code, name)| Committee { code, name })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_action_exact() {
        let dp = lookup_action("DP").unwrap();
        assert_eq!(dp.short, "Do Pass");
        assert_eq!(dp.code, "DP");
    }

    #[test]
    fn test_lookup_action_case_insensitive() {
        assert_eq!(lookup_action("dp/A").unwrap().code, "DP/a");
        assert_eq!(lookup_action("TBLD").unwrap().short, "Tabled");
        assert_eq!(lookup_action("W/DRN").unwrap().short, "Withdrawn");
    }

    #[test]
    fn test_lookup_action_period_variants() {
        assert_eq!(lookup_action("DNP.").unwrap().code, "DNP.");
        assert_eq!(lookup_action("tbld indef.").unwrap().code, "TBLD INDEF.");
        assert_eq!(lookup_action("tbld indef").unwrap().code, "TBLD INDEF");
    }

    #[test]
    fn test_lookup_unknown() {
        assert!(lookup_action("XYZZY").is_none());
        assert!(lookup_action("").is_none());
        assert!(lookup_committee("XYZ").is_none());
        assert!(!is_committee_code("   "));
    }

    #[test]
    fn test_lookup_committee() {
        assert_eq!(lookup_committee("HAFC"), Some("House Appropriations & Finance"));
        assert_eq!(lookup_committee("sfc"), Some("Senate Finance"));
        assert_eq!(find_committee("hjc").unwrap().code, "HJC");
        assert!(is_committee_code("SRC"));
        assert!(!is_committee_code("DP"));
    }

    #[test]
    fn test_tables_have_unique_codes() {
        let mut seen = std::collections::HashSet::new();
        for entry in action_codes() {
            assert!(seen.insert(entry.code), "duplicate action code {}", entry.code);
        }
        seen.clear();
        for entry in committee_codes() {
            assert!(seen.insert(entry.code), "duplicate committee code {}", entry.code);
        }
    }
}
