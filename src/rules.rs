//! Ordered token classification rules.
//!
//! Each rule pairs a predicate with a handler. Rules are evaluated top to
//! bottom and the first matching predicate wins, so the order of [`RULES`]
//! matters: `DNP-CS` style tokens, slash-joined referrals and `PASSED/H`
//! votes all satisfy more than one pattern. The final rule matches anything,
//! which keeps every token accounted for.

use crate::codes::{find_committee, lookup_action};
use crate::status::{BillStatus, StatusTracker};
use crate::types::{ActionType, Chamber, ParsedAction};

cached_regex!(chamber_vote_re, r"(?i)^(PASSED|FAILED)/(H|S)\s*(?:\(\s*(\d+)\s*-\s*(\d+)\s*\))?\.?$");
cached_regex!(floor_amendment_re, r"^FL/(A+)$");
cached_regex!(parenthesized_re, r"\(([^)]*)\)");
cached_regex!(
    signed_re,
    r"(?i)^(?:SGND|PSGN)\.?\s*(?:\(([^)]*)\))?\s*\.?\s*(?:CH\.?\s*(\d+))?\.?$"
);

/// Pseudo-committee code for the Speaker's table
pub const SPEAKERS_TABLE: &str = "T";
pub const SPEAKERS_TABLE_NAME: &str = "Speaker's Table";

/// A single token under classification
#[derive(Debug, Clone)]
pub struct Token<'a> {
    pub raw: &'a str,
    pub upper: String,
}

impl<'a> Token<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self {
            raw,
            upper: raw.to_uppercase(),
        }
    }
}

/// Mutable state threaded through the rules while parsing one action string
#[derive(Debug, Clone, Default)]
pub struct ParseState {
    pub current_committee: Option<String>,
    pub current_committee_name: Option<String>,
    pub referrals: Vec<String>,
    pub referral_names: Vec<String>,
    pub status: StatusTracker,
}

impl ParseState {
    fn committee_tag(&self) -> (Option<String>, Option<String>) {
        (
            self.current_committee.clone(),
            self.current_committee_name.clone(),
        )
    }

    fn clear_committee(&mut self) {
        self.current_committee = None;
        self.current_committee_name = None;
    }

    /// Tag an action with the current committee
    fn tagged(&self, action: ParsedAction) -> ParsedAction {
        let (committee, name) = self.committee_tag();
        action.in_committee(committee, name)
    }
}

/// One `(predicate, handler)` pair
pub struct Rule {
    pub name: &'static str,
    pub matches: fn(&Token) -> bool,
    pub apply: fn(&Token, &mut ParseState) -> ParsedAction,
}

/// Classification rules in priority order
pub static RULES: &[Rule] = &[
    Rule { name: "prefiled", matches: is_prefile, apply: apply_prefile },
    Rule { name: "multi_referral", matches: is_multi_referral, apply: apply_multi_referral },
    Rule { name: "passed", matches: is_passed, apply: apply_passed },
    Rule { name: "failed", matches: is_failed, apply: apply_failed },
    Rule { name: "do_pass", matches: is_do_pass, apply: apply_do_pass },
    Rule { name: "do_not_pass", matches: is_do_not_pass, apply: apply_do_not_pass },
    Rule { name: "committee_substitute", matches: is_committee_substitute, apply: apply_committee_substitute },
    Rule { name: "floor_amendment", matches: is_floor_amendment, apply: apply_floor_amendment },
    Rule { name: "tabled", matches: is_tabled, apply: apply_tabled },
    Rule { name: "postponed_indefinitely", matches: is_postponed, apply: apply_postponed },
    Rule { name: "signed", matches: is_signed, apply: apply_signed },
    Rule { name: "vetoed", matches: is_vetoed, apply: apply_vetoed },
    Rule { name: "without_recommendation", matches: is_without_recommendation, apply: apply_without_recommendation },
    Rule { name: "concurrence", matches: is_concurrence, apply: apply_concurrence },
    Rule { name: "speakers_table", matches: is_speakers_table, apply: apply_speakers_table },
    Rule { name: "conference_committee", matches: is_conference, apply: apply_conference },
    Rule { name: "committee", matches: is_committee, apply: apply_committee },
    Rule { name: "known_action", matches: is_known_action, apply: apply_known_action },
    Rule { name: "unrecognized", matches: any_token, apply: apply_unrecognized },
];

/// First rule whose predicate accepts the token
pub fn matching_rule(token: &Token) -> &'static Rule {
    RULES
        .iter()
        .find(|rule| (rule.matches)(token))
        .unwrap_or(&RULES[RULES.len() - 1])
}

/// Classify one token, updating the parse state
pub fn classify(raw: &str, state: &mut ParseState) -> ParsedAction {
    let token = Token::new(raw);
    let rule = matching_rule(&token);
    (rule.apply)(&token, state)
}

// Prefiled: HPREF / SPREF

fn is_prefile(t: &Token) -> bool {
    t.upper == "HPREF" || t.upper == "SPREF"
}

fn apply_prefile(t: &Token, state: &mut ParseState) -> ParsedAction {
    let chamber = if t.upper == "SPREF" {
        Chamber::Senate
    } else {
        Chamber::House
    };
    state.status.prefiled();
    ParsedAction::new(
        ActionType::Prefiled,
        t.raw,
        format!("Pre-filed in {}", chamber.name()),
    )
    .with_chamber(chamber)
}

// Multiple referral: SRC/SFC

fn is_multi_referral(t: &Token) -> bool {
    t.upper.contains('/')
        && !t.upper.starts_with("PASSED")
        && !t.upper.starts_with("FAILED")
        && t.upper.split('/').all(|c| find_committee(c).is_some())
}

fn apply_multi_referral(t: &Token, state: &mut ParseState) -> ParsedAction {
    let committees: Vec<_> = t.raw.split('/').filter_map(find_committee).collect();
    state.referrals = committees.iter().map(|c| c.code.to_string()).collect();
    state.referral_names = committees.iter().map(|c| c.name.to_string()).collect();
    ParsedAction::new(
        ActionType::Referred,
        t.raw,
        format!("Referred to: {}", state.referral_names.join(", ")),
    )
}

// Chamber votes: PASSED/H (54-2), FAILED/S (10-30)

struct ChamberVote {
    chamber: Chamber,
    vote: Option<String>,
}

fn chamber_vote(t: &Token, verb: &str) -> Option<ChamberVote> {
    let caps = chamber_vote_re().captures(t.raw)?;
    if !caps[1].eq_ignore_ascii_case(verb) {
        return None;
    }
    let chamber = Chamber::from_prefix(&caps[2])?;
    let vote = match (caps.get(3), caps.get(4)) {
        (Some(yea), Some(nay)) => Some(format!("{}-{}", yea.as_str(), nay.as_str())),
        _ => None,
    };
    Some(ChamberVote { chamber, vote })
}

fn vote_action(action_type: ActionType, t: &Token, verb: &str, v: ChamberVote) -> ParsedAction {
    let description = match &v.vote {
        Some(vote) => format!("{} {} ({})", verb, v.chamber.name(), vote),
        None => format!("{} {}", verb, v.chamber.name()),
    };
    let mut action = ParsedAction::new(action_type, t.raw, description).with_chamber(v.chamber);
    action.vote = v.vote;
    action
}

fn is_passed(t: &Token) -> bool {
    chamber_vote(t, "PASSED").is_some()
}

fn apply_passed(t: &Token, state: &mut ParseState) -> ParsedAction {
    match chamber_vote(t, "PASSED") {
        Some(v) => {
            state.status.record_passage(v.chamber);
            state.clear_committee();
            vote_action(ActionType::Passed, t, "Passed", v)
        }
        None => apply_unrecognized(t, state),
    }
}

fn is_failed(t: &Token) -> bool {
    chamber_vote(t, "FAILED").is_some()
}

fn apply_failed(t: &Token, state: &mut ParseState) -> ParsedAction {
    match chamber_vote(t, "FAILED") {
        Some(v) => {
            state.status.terminate(BillStatus::Failed);
            state.clear_committee();
            vote_action(ActionType::Failed, t, "Failed in", v)
        }
        None => apply_unrecognized(t, state),
    }
}

// Committee reports: DP, DP/a, DNP, CS, w/o rec

fn is_do_pass(t: &Token) -> bool {
    t.upper == "DP" || t.upper == "DP/A"
}

fn apply_do_pass(t: &Token, state: &mut ParseState) -> ParsedAction {
    let description = if t.upper == "DP/A" {
        "Committee voted Do Pass, as amended"
    } else {
        "Committee voted Do Pass"
    };
    state.tagged(ParsedAction::new(ActionType::CommitteeAction, t.raw, description))
}

fn is_do_not_pass(t: &Token) -> bool {
    t.upper == "DNP" || t.upper == "DNP."
}

fn apply_do_not_pass(t: &Token, state: &mut ParseState) -> ParsedAction {
    let action = state.tagged(ParsedAction::new(
        ActionType::CommitteeAction,
        t.raw,
        "Committee voted Do Not Pass",
    ));
    state.status.terminate(BillStatus::Failed);
    state.clear_committee();
    action
}

fn is_committee_substitute(t: &Token) -> bool {
    t.upper.contains("CS")
}

fn apply_committee_substitute(t: &Token, state: &mut ParseState) -> ParsedAction {
    state.tagged(ParsedAction::new(
        ActionType::CommitteeAction,
        t.raw,
        "Committee substitute adopted",
    ))
}

fn is_without_recommendation(t: &Token) -> bool {
    t.upper == "W/O REC" || t.upper == "W/O REC/A"
}

fn apply_without_recommendation(t: &Token, state: &mut ParseState) -> ParsedAction {
    let description = if t.upper.ends_with("/A") {
        "Reported without recommendation, as amended"
    } else {
        "Reported without recommendation"
    };
    state.tagged(ParsedAction::new(ActionType::CommitteeAction, t.raw, description))
}

// Floor actions: fl/aa, s/cncrd, T, CC

fn is_floor_amendment(t: &Token) -> bool {
    floor_amendment_re().is_match(&t.upper)
}

fn apply_floor_amendment(t: &Token, _state: &mut ParseState) -> ParsedAction {
    let count = floor_amendment_re()
        .captures(&t.upper)
        .map(|caps| caps[1].len())
        .unwrap_or(1);
    let description = if count == 1 {
        "1 floor amendment adopted".to_string()
    } else {
        format!("{} floor amendments adopted", count)
    };
    ParsedAction::new(ActionType::FloorAction, t.raw, description)
}

fn is_concurrence(t: &Token) -> bool {
    t.upper == "S/CNCRD" || t.upper == "H/CNCRD"
}

fn apply_concurrence(t: &Token, _state: &mut ParseState) -> ParsedAction {
    let chamber = Chamber::from_prefix(&t.upper).unwrap_or(Chamber::House);
    ParsedAction::new(
        ActionType::FloorAction,
        t.raw,
        format!("{} concurred with amendments", chamber.name()),
    )
    .with_chamber(chamber)
}

fn is_speakers_table(t: &Token) -> bool {
    t.upper == SPEAKERS_TABLE
}

fn apply_speakers_table(t: &Token, state: &mut ParseState) -> ParsedAction {
    state.current_committee = Some(SPEAKERS_TABLE.to_string());
    state.current_committee_name = Some(SPEAKERS_TABLE_NAME.to_string());
    ParsedAction::new(
        ActionType::FloorAction,
        t.raw,
        "On Speaker's table (24-hour hold)",
    )
    .with_chamber(Chamber::House)
}

fn is_conference(t: &Token) -> bool {
    t.upper == "CC"
}

fn apply_conference(t: &Token, _state: &mut ParseState) -> ParsedAction {
    ParsedAction::new(ActionType::FloorAction, t.raw, "Sent to conference committee")
}

// Terminal actions: TBLD, API, SGND, VETO

fn is_tabled(t: &Token) -> bool {
    t.upper == "TBLD" || t.upper.starts_with("TBLD ")
}

fn apply_tabled(t: &Token, state: &mut ParseState) -> ParsedAction {
    let description = if t.upper.contains("INDEF") {
        "Tabled indefinitely"
    } else {
        "Temporarily tabled"
    };
    let action = state.tagged(ParsedAction::new(ActionType::Tabled, t.raw, description));
    state.status.terminate(BillStatus::Tabled);
    state.clear_committee();
    action
}

fn is_postponed(t: &Token) -> bool {
    t.upper == "API" || t.upper == "API."
}

fn apply_postponed(t: &Token, state: &mut ParseState) -> ParsedAction {
    let action = state.tagged(ParsedAction::new(
        ActionType::Failed,
        t.raw,
        "Action postponed indefinitely",
    ));
    state.status.terminate(BillStatus::Failed);
    state.clear_committee();
    action
}

/// Date fragment inside parentheses, kept as written
fn date_fragment(raw: &str) -> Option<String> {
    parenthesized_re()
        .captures(raw)
        .map(|caps| caps[1].trim().to_string())
        .filter(|date| !date.is_empty())
}

/// `SGND`, optionally followed by `(date)` and `Ch.N`
fn is_signed(t: &Token) -> bool {
    signed_re().is_match(t.raw)
}

fn apply_signed(t: &Token, state: &mut ParseState) -> ParsedAction {
    let Some(caps) = signed_re().captures(t.raw) else {
        return apply_unrecognized(t, state);
    };
    let date = caps
        .get(1)
        .map(|m| m.as_str().trim().to_string())
        .filter(|date| !date.is_empty());
    let chapter = caps.get(2).map(|m| m.as_str().to_string());

    let mut description = "Signed into law".to_string();
    if let Some(date) = &date {
        description.push_str(&format!(" on {}", date));
    }
    if let Some(chapter) = &chapter {
        description.push_str(&format!(", Chapter {}", chapter));
    }

    state.status.terminate(BillStatus::Signed);
    state.clear_committee();
    let mut action = ParsedAction::new(ActionType::Signed, t.raw, description);
    action.date = date;
    action.chapter = chapter;
    action
}

fn is_vetoed(t: &Token) -> bool {
    t.upper.contains("VETO") || t.upper == "PVET" || t.upper == "PKVT"
}

fn apply_vetoed(t: &Token, state: &mut ParseState) -> ParsedAction {
    let pocket = t.upper == "PKVT" || t.upper.contains("POCKET");
    let date = date_fragment(t.raw);
    let mut description = if pocket {
        "Pocket vetoed by Governor".to_string()
    } else {
        "Vetoed by Governor".to_string()
    };
    if let Some(date) = &date {
        description.push_str(&format!(" on {}", date));
    }
    state.status.terminate(BillStatus::Vetoed);
    state.clear_committee();
    let mut action = ParsedAction::new(ActionType::Vetoed, t.raw, description);
    action.date = date;
    action
}

// Committee assignment and table fallbacks

fn is_committee(t: &Token) -> bool {
    find_committee(t.raw).is_some()
}

fn apply_committee(t: &Token, state: &mut ParseState) -> ParsedAction {
    let Some(committee) = find_committee(t.raw) else {
        return apply_unrecognized(t, state);
    };
    state.current_committee = Some(committee.code.to_string());
    state.current_committee_name = Some(committee.name.to_string());
    state.status.enter_committee();
    ParsedAction::new(
        ActionType::Referred,
        t.raw,
        format!("Sent to {}", committee.name),
    )
    .in_committee(
        Some(committee.code.to_string()),
        Some(committee.name.to_string()),
    )
}

fn is_known_action(t: &Token) -> bool {
    lookup_action(t.raw).is_some()
}

fn apply_known_action(t: &Token, state: &mut ParseState) -> ParsedAction {
    match lookup_action(t.raw) {
        Some(meaning) => ParsedAction::new(ActionType::Other, t.raw, meaning.short),
        None => apply_unrecognized(t, state),
    }
}

fn any_token(_t: &Token) -> bool {
    true
}

fn apply_unrecognized(t: &Token, _state: &mut ParseState) -> ParsedAction {
    tracing::debug!(token = %t.raw, "unrecognized action token");
    ParsedAction::new(ActionType::Other, t.raw, t.raw)
}
