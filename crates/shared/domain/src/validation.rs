//! Login identifier validation.

use once_cell::sync::Lazy;
use regex::Regex;

/// Local part, a single `@`, then at least two dot-separated domain labels.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .expect("email regex is valid")
});

/// Maximum total length of an address (RFC 5321 path limit)
const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum length of the local part
const MAX_LOCAL_PART_LENGTH: usize = 64;

/// Check whether a candidate login is a syntactically valid email address.
///
/// Purely syntactic: no DNS or mailbox verification is performed.
pub fn is_valid_email(candidate: &str) -> bool {
    if candidate.len() > MAX_EMAIL_LENGTH {
        return false;
    }

    match candidate.split_once('@') {
        Some((local, _)) if local.len() > MAX_LOCAL_PART_LENGTH => return false,
        Some(_) => {}
        None => return false,
    }

    EMAIL_REGEX.is_match(candidate)
}
