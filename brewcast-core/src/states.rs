//! Static directory of US states and state-code resolution.

use crate::{error::BrewcastError, model::StateEntry};

const fn entry(name: &'static str, code: &'static str) -> StateEntry {
    StateEntry { name, code }
}

pub const STATES: &[StateEntry] = &[
    entry("Alabama", "AL"),
    entry("Alaska", "AK"),
    entry("Arizona", "AZ"),
    entry("Arkansas", "AR"),
    entry("California", "CA"),
    entry("Colorado", "CO"),
    entry("Connecticut", "CT"),
    entry("Delaware", "DE"),
    entry("District of Columbia", "DC"),
    entry("Florida", "FL"),
    entry("Georgia", "GA"),
    entry("Hawaii", "HI"),
    entry("Idaho", "ID"),
    entry("Illinois", "IL"),
    entry("Indiana", "IN"),
    entry("Iowa", "IA"),
    entry("Kansas", "KS"),
    entry("Kentucky", "KY"),
    entry("Louisiana", "LA"),
    entry("Maine", "ME"),
    entry("Maryland", "MD"),
    entry("Massachusetts", "MA"),
    entry("Michigan", "MI"),
    entry("Minnesota", "MN"),
    entry("Mississippi", "MS"),
    entry("Missouri", "MO"),
    entry("Montana", "MT"),
    entry("Nebraska", "NE"),
    entry("Nevada", "NV"),
    entry("New Hampshire", "NH"),
    entry("New Jersey", "NJ"),
    entry("New Mexico", "NM"),
    entry("New York", "NY"),
    entry("North Carolina", "NC"),
    entry("North Dakota", "ND"),
    entry("Ohio", "OH"),
    entry("Oklahoma", "OK"),
    entry("Oregon", "OR"),
    entry("Pennsylvania", "PA"),
    entry("Rhode Island", "RI"),
    entry("South Carolina", "SC"),
    entry("South Dakota", "SD"),
    entry("Tennessee", "TN"),
    entry("Texas", "TX"),
    entry("Utah", "UT"),
    entry("Vermont", "VT"),
    entry("Virginia", "VA"),
    entry("Washington", "WA"),
    entry("West Virginia", "WV"),
    entry("Wisconsin", "WI"),
    entry("Wyoming", "WY"),
];

/// Full state names in table order, as offered by the state prompt.
pub fn state_names() -> Vec<String> {
    STATES.iter().map(|s| s.name.to_string()).collect()
}

/// Find the entry for a code or full name, ignoring case and surrounding whitespace.
pub fn lookup_state(input: &str) -> Result<StateEntry, BrewcastError> {
    let normalized = input.trim().to_uppercase();

    STATES
        .iter()
        .find(|s| s.code == normalized)
        .or_else(|| STATES.iter().find(|s| s.name.to_uppercase() == normalized))
        .copied()
        .ok_or_else(|| BrewcastError::NotFound(input.trim().to_string()))
}

/// Canonical two-letter code for a code or full state name.
pub fn resolve_state_code(input: &str) -> Result<&'static str, BrewcastError> {
    lookup_state(input).map(|s| s.code)
}
