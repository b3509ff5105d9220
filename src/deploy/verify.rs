//! Response body verification

use serde::Serialize;

use crate::error::{Result, deploy};

/// Presence of one expected substring in one body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Check {
    pub expected: String,
    pub found: bool,
}

/// Check every expected substring against `body`
pub fn check(body: &str, expected: &[String]) -> Vec<Check> {
    expected
        .iter()
        .map(|e| Check {
            expected: e.clone(),
            found: body.contains(e.as_str()),
        })
        .collect()
}

/// Fail on the first expected substring missing from `body`
pub fn verify_body(body: &str, expected: &[String], url: &str) -> Result<()> {
    match check(body, expected).into_iter().find(|c| !c.found) {
        Some(missing) => Err(deploy::missing_expected(missing.expected, url)),
        None => Ok(()),
    }
}
