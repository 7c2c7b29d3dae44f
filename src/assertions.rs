//! Outcome checks used by the scenarios.
//!
//! Every check returns [`E2eError::Assertion`] on mismatch, so a failed
//! expectation travels the same `?` path as a failed browser action.

use std::fmt::Debug;
use std::ops::Range;

use crate::error::{E2eError, Result};

pub fn ensure(condition: bool, message: impl Into<String>) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(E2eError::Assertion(message.into()))
    }
}

pub fn expect_eq<T>(what: &str, actual: &T, expected: &T) -> Result<()>
where
    T: PartialEq + Debug + ?Sized,
{
    ensure(
        actual == expected,
        format!("{}: expected {:?}, got {:?}", what, expected, actual),
    )
}

pub fn expect_contains(what: &str, haystack: &str, needle: &str) -> Result<()> {
    ensure(
        haystack.contains(needle),
        format!("{}: expected {:?} to contain {:?}", what, haystack, needle),
    )
}

pub fn expect_status(actual: u16, expected: u16) -> Result<()> {
    ensure(
        actual == expected,
        format!("HTTP status: expected {}, got {}", expected, actual),
    )
}

/// Status inside `[range.start, range.end)`.
pub fn expect_status_in(actual: u16, range: Range<u16>) -> Result<()> {
    ensure(
        range.contains(&actual),
        format!(
            "HTTP status: expected {}..{}, got {}",
            range.start, range.end, actual
        ),
    )
}

/// Compare URLs ignoring a trailing slash.
pub fn expect_same_url(actual: &str, expected: &str) -> Result<()> {
    ensure(
        actual.trim_end_matches('/') == expected.trim_end_matches('/'),
        format!("URL: expected {:?}, got {:?}", expected, actual),
    )
}

pub fn is_non_increasing<T: PartialOrd>(items: &[T]) -> bool {
    items.windows(2).all(|w| w[0] >= w[1])
}

pub fn is_non_decreasing<T: PartialOrd>(items: &[T]) -> bool {
    items.windows(2).all(|w| w[0] <= w[1])
}

pub fn expect_non_increasing<T: PartialOrd + Debug>(what: &str, items: &[T]) -> Result<()> {
    ensure(
        is_non_increasing(items),
        format!("{} not in non-increasing order: {:?}", what, items),
    )
}

pub fn expect_non_decreasing<T: PartialOrd + Debug>(what: &str, items: &[T]) -> Result<()> {
    ensure(
        is_non_decreasing(items),
        format!("{} not in non-decreasing order: {:?}", what, items),
    )
}
