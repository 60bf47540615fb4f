//! The single accepted login name.
//!
//! There is no identity store: one fixed name is accepted, compared after
//! trimming surrounding whitespace and ignoring case.

pub const ACCEPTED_NAME: &str = "yogesh";

pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

pub fn is_accepted_name(name: &str) -> bool {
    normalize_name(name) == ACCEPTED_NAME
}
