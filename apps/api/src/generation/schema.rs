//! Reply validation helpers shared by every contract.
//!
//! Contracts deserialize the model reply into a raw wire struct and then
//! promote it to a typed result through these checks. A failed check is
//! reported as a plain message; callers wrap it in their failure variant.

use std::collections::HashSet;
use std::ops::RangeInclusive;

/// Trims `value`, rejecting blank text.
pub fn require_text(field: &str, value: String) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(format!("`{field}` is empty"))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Accepts a whole number inside `range`. Models sometimes emit `4.0`; that is fine, `4.5` is not.
pub fn whole_score(field: &str, value: f64, range: RangeInclusive<u8>) -> Result<u8, String> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(format!("`{field}` must be a whole number, got {value}"));
    }
    let (lo, hi) = (*range.start() as f64, *range.end() as f64);
    if value < lo || value > hi {
        return Err(format!("`{field}` must be within {lo}..={hi}, got {value}"));
    }
    Ok(value as u8)
}

/// Trims every item, rejecting blanks, and checks the item count.
pub fn text_list(
    field: &str,
    items: Vec<String>,
    count: RangeInclusive<usize>,
) -> Result<Vec<String>, String> {
    let items = items
        .into_iter()
        .map(|item| require_text(field, item))
        .collect::<Result<Vec<_>, _>>()?;
    check_count(field, items.len(), count)?;
    Ok(items)
}

/// Like `text_list`, but drops blanks and case-insensitive duplicates instead of rejecting them.
pub fn distinct_list(
    field: &str,
    items: Vec<String>,
    count: RangeInclusive<usize>,
) -> Result<Vec<String>, String> {
    let mut seen = HashSet::new();
    let items: Vec<String> = items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && seen.insert(s.to_lowercase()))
        .collect();
    check_count(field, items.len(), count)?;
    Ok(items)
}

pub fn check_count(field: &str, len: usize, count: RangeInclusive<usize>) -> Result<(), String> {
    if count.contains(&len) {
        Ok(())
    } else if count.start() == count.end() {
        Err(format!("`{field}` must have {} items, got {len}", count.start()))
    } else if *count.end() == usize::MAX {
        Err(format!("`{field}` must have at least {} items, got {len}", count.start()))
    } else {
        Err(format!(
            "`{field}` must have {}-{} items, got {len}",
            count.start(),
            count.end()
        ))
    }
}
