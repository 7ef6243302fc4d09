use chrono::{Datelike, Days, NaiveDate, Weekday};
use nmlegis::calendar::date_for_legislative_day;
use nmlegis::expand::{expand, SegmentType};
use nmlegis::history::normalize_actions;
use nmlegis::parser::{clean, parse, split_leading_day, tokenize};
use nmlegis::{BillStatus, Chamber};
use proptest::prelude::*;
use proptest::test_runner::Config;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Fragments that exercise the tokenizer and every rule
const TOKENS: &[&str] = &[
    "-", "-", "-", "(", ")", "[", "]", "`", "/", " ", "7", "54", "H", "S", "DP", "DNP", "CS",
    "PASSED/H", "FAILED/S", "SGND", "VETO", "TBLD", "API", "T", "fl/aa", "HJC", "SRC/SFC", "é",
    "ß", "İ", "\t", ".", "Ch.", "[3]", "[99999999999]", "w/o rec",
];

/// Whole tokens without day markers
const BODY_TOKENS: &[&str] = &[
    "HPREF", "HAFC", "SFC", "SRC/SFC", "DP", "DP/a", "CS", "fl/a", "PASSED/H (54-2)",
    "PASSED/S (30-5)", "T", "TBLD", "SGND(Mar.4)Ch.9", "XYZZY123", "prntd",
];

const TERMINALS: &[(&str, BillStatus)] = &[
    ("SGND", BillStatus::Signed),
    ("SGND(Mar.4)Ch.9", BillStatus::Signed),
    ("VETO", BillStatus::Vetoed),
    ("PKVT", BillStatus::Vetoed),
    ("FAILED/H (10-50)", BillStatus::Failed),
    ("DNP", BillStatus::Failed),
    ("API", BillStatus::Failed),
    ("TBLD", BillStatus::Tabled),
    ("TBLD INDEF.", BillStatus::Tabled),
];

const FOLLOWUPS: &[&str] = &[
    "HJC", "SRC/SFC", "PASSED/H (40-0)", "PASSED/S (30-2)", "HPREF", "DP", "T", "SGND", "VETO",
];

fn token_soup() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(TOKENS), 0..16).prop_map(|parts| parts.concat())
}

fn raw_input() -> impl Strategy<Value = String> {
    prop_oneof![token_soup(), ".*"]
}

fn expected_tokens(raw: &str) -> Vec<String> {
    let cleaned = clean(raw);
    let (_, body) = split_leading_day(&cleaned);
    tokenize(body)
}

proptest! {
    #![proptest_config(Config::with_cases(256))]
    #[test]
    fn parse_accounts_for_every_token(raw in raw_input()) {
        let parsed = parse(&raw);
        let codes: Vec<_> = parsed.actions.iter().map(|a| a.code.clone()).collect();
        prop_assert_eq!(codes, expected_tokens(&raw));
    }

    #[test]
    fn history_and_expansion_never_panic(raw in raw_input()) {
        let items = normalize_actions(&raw, ymd(2025, 1, 21), Chamber::House);
        for item in &items {
            let _ = expand(&item.action);
        }
        let _ = expand(&raw);
    }

    #[test]
    fn terminal_status_never_reverts(
        terminal in prop::sample::select(TERMINALS),
        followups in prop::collection::vec(
            prop_oneof![
                prop::sample::select(FOLLOWUPS).prop_map(String::from),
                "[A-Za-z0-9/(). ]{1,12}",
            ],
            0..8,
        ),
    ) {
        let (code, status) = terminal;
        let mut raw = format!("HJC-{}", code);
        for followup in &followups {
            raw.push('-');
            raw.push_str(followup);
        }
        let parsed = parse(&raw);
        prop_assert_eq!(parsed.status, status);
        prop_assert!(parsed.status.is_terminal());
    }

    #[test]
    fn history_dates_are_monotonic(
        start_offset in 0_u64..3650,
        segments in prop::collection::vec(
            (0_u32..5, prop::collection::vec(prop::sample::select(BODY_TOKENS), 0..4)),
            1..10,
        ),
    ) {
        let start = ymd(2015, 1, 1) + Days::new(start_offset);
        let mut day = 1;
        let mut raw = String::new();
        for (step, tokens) in &segments {
            day += step;
            raw.push_str(&format!("[{}] {} ", day, tokens.join("-")));
        }

        let items = normalize_actions(&raw, start, Chamber::House);
        let token_count: usize = segments.iter().map(|(_, tokens)| tokens.len()).sum();
        prop_assert_eq!(items.len(), token_count);
        for pair in items.windows(2) {
            prop_assert!(pair[0].date <= pair[1].date);
            prop_assert!(pair[0].sequence < pair[1].sequence);
        }
    }

    #[test]
    fn weekday_starts_never_land_on_weekends(start_offset in 0_u64..3650, day in 1_u32..400) {
        let start = ymd(2015, 1, 1) + Days::new(start_offset);
        prop_assume!(!matches!(start.weekday(), Weekday::Sat | Weekday::Sun));
        let date = date_for_legislative_day(start, day);
        prop_assert!(!matches!(date.weekday(), Weekday::Sat | Weekday::Sun));
        prop_assert!(date >= start);
    }
}

#[test]
fn repeated_passage_in_one_chamber_stays_passed_one() {
    let parsed = parse("PASSED/H (40-0)-PASSED/H (40-0)");
    assert_eq!(parsed.status, BillStatus::PassedOne);

    let parsed = parse("PASSED/H (40-0)-PASSED/H (40-0)-PASSED/S (20-1)");
    assert_eq!(parsed.status, BillStatus::PassedBoth);
}

#[test]
fn history_dates_follow_day_markers() {
    let raw = "[1] HPREF-HAFC [3] DP [3] fl/a-PASSED/H (54-2) [8] SFC-DP [12] PASSED/S (30-5) [20] SGND(Mar.4)Ch.9";
    for start in [ymd(2025, 1, 21), ymd(2024, 1, 15), ymd(2023, 12, 30)] {
        let items = normalize_actions(raw, start, Chamber::House);
        assert_eq!(items.len(), 9);
        for pair in items.windows(2) {
            assert!(pair[0].date <= pair[1].date, "{:?}", pair);
            assert!(pair[0].sequence < pair[1].sequence, "{:?}", pair);
        }
    }
}

#[test]
fn weekends_are_skipped() {
    let monday = ymd(2025, 1, 20);
    assert_eq!(monday.weekday(), Weekday::Mon);

    let items = normalize_actions("[6] HJC", monday, Chamber::House);
    assert_eq!(items[0].date, ymd(2025, 1, 27));
    assert_eq!(items[0].date.weekday(), Weekday::Mon);

    let items = normalize_actions("[1] HPREF [2] HJC [5] DP [10] PASSED/H (1-0)", monday, Chamber::House);
    for item in &items {
        assert!(!matches!(item.date.weekday(), Weekday::Sat | Weekday::Sun));
    }
}

#[test]
fn expanding_normalized_history_is_identity() {
    let raws = [
        "[1] HPREF-HAFC-DP-PASSED/H (54-2)",
        "[5] SRC/SFC-SRC-DP/a-CS-SFC-w/o rec/a",
        "[2] T-fl/aa-fl/a-PASSED/S (30-10)-s/cncrd-h/cncrd",
        "[3] HJC-DNP-FAILED/H (1-60)-API-TBLD-TBLD INDEF",
        "[9] CC-SGND(Mar.4)Ch.9-VETO-PKVT-prntd-germane-XYZZY123",
        "SPREF-SJC-nt prntd-E&E",
    ];
    let start = ymd(2025, 1, 21);

    for raw in raws {
        for item in normalize_actions(raw, start, Chamber::Senate) {
            let expanded = expand(&item.action);
            assert_eq!(expanded.segments.len(), 1, "{:?}", item.action);
            assert_eq!(expanded.segments[0].segment_type, SegmentType::Text, "{:?}", item.action);
            assert_eq!(expanded.expanded, item.action);
        }
    }

    // A bare tally is not prose, but its display text still survives expansion
    let items = normalize_actions("HJC-(12-0)", start, Chamber::House);
    let expanded = expand(&items[1].action);
    assert_eq!(expanded.segments[0].segment_type, SegmentType::Vote);
    assert_eq!(expanded.expanded, "(12-0)");
}
