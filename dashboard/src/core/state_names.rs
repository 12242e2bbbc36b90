//! Translation between state codes and full names
//!
//! The us-atlas topology on the map page labels regions by full name while
//! aggregation is keyed by two-letter code; the lookup endpoint translates here.

use shared::StateCode;

const fn entry(code: &'static str, name: &'static str) -> (StateCode, &'static str) {
    (StateCode::from_static(code), name)
}

static STATE_NAMES: &[(StateCode, &str)] = &[
    entry("AL", "Alabama"),
    entry("AK", "Alaska"),
    entry("AZ", "Arizona"),
    entry("AR", "Arkansas"),
    entry("CA", "California"),
    entry("CO", "Colorado"),
    entry("CT", "Connecticut"),
    entry("DE", "Delaware"),
    entry("DC", "District of Columbia"),
    entry("FL", "Florida"),
    entry("GA", "Georgia"),
    entry("HI", "Hawaii"),
    entry("ID", "Idaho"),
    entry("IL", "Illinois"),
    entry("IN", "Indiana"),
    entry("IA", "Iowa"),
    entry("KS", "Kansas"),
    entry("KY", "Kentucky"),
    entry("LA", "Louisiana"),
    entry("ME", "Maine"),
    entry("MD", "Maryland"),
    entry("MA", "Massachusetts"),
    entry("MI", "Michigan"),
    entry("MN", "Minnesota"),
    entry("MS", "Mississippi"),
    entry("MO", "Missouri"),
    entry("MT", "Montana"),
    entry("NE", "Nebraska"),
    entry("NV", "Nevada"),
    entry("NH", "New Hampshire"),
    entry("NJ", "New Jersey"),
    entry("NM", "New Mexico"),
    entry("NY", "New York"),
    entry("NC", "North Carolina"),
    entry("ND", "North Dakota"),
    entry("OH", "Ohio"),
    entry("OK", "Oklahoma"),
    entry("OR", "Oregon"),
    entry("PA", "Pennsylvania"),
    entry("RI", "Rhode Island"),
    entry("SC", "South Carolina"),
    entry("SD", "South Dakota"),
    entry("TN", "Tennessee"),
    entry("TX", "Texas"),
    entry("UT", "Utah"),
    entry("VT", "Vermont"),
    entry("VA", "Virginia"),
    entry("WA", "Washington"),
    entry("WV", "West Virginia"),
    entry("WI", "Wisconsin"),
    entry("WY", "Wyoming"),
    entry("AS", "American Samoa"),
    entry("GU", "Guam"),
    entry("MP", "Commonwealth of the Northern Mariana Islands"),
    entry("PR", "Puerto Rico"),
    entry("VI", "United States Virgin Islands"),
];

pub fn state_name(code: StateCode) -> Option<&'static str> {
    STATE_NAMES.iter().find(|(c, _)| *c == code).map(|(_, name)| *name)
}

pub fn code_for_name(name: &str) -> Option<StateCode> {
    let name = name.trim();
    STATE_NAMES
        .iter()
        .find(|(_, n)| n.eq_ignore_ascii_case(name))
        .map(|(code, _)| *code)
}

/// Resolve a map click key: a known two-letter code first, then a full name
pub fn lookup_state_key(key: &str) -> Option<StateCode> {
    StateCode::parse(key)
        .ok()
        .filter(|code| state_name(*code).is_some())
        .or_else(|| code_for_name(key))
}
