//! Gaps between ranges on the forward walk

use crate::error::RangeResult;
use crate::overlap::find_overlaps;
use crate::position::normalize;
use crate::types::{Range, SeqPos};

/// Bases walked from just after `a.end` to just before `b.start`.
///
/// `None` when `b` starts right after `a`, or when the walk would run into
/// `a` or `b`. `gap(a, a)` is the complement of `a`.
pub fn gap(a: &Range, b: &Range, length: SeqPos) -> RangeResult<Option<Range>> {
    a.validate(length)?;
    b.validate(length)?;

    let start = normalize(a.end() + 1, length)?;
    if start == b.start() {
        return Ok(None);
    }
    let end = normalize(b.start() - 1, length)?;
    let walk = Range::from_bounds(start, end);

    if !find_overlaps(&walk, a, length)?.is_empty() || !find_overlaps(&walk, b, length)?.is_empty() {
        return Ok(None);
    }
    Ok(Some(walk))
}

/// Signed distance from the end of `a` to the start of `b`.
///
/// Positive values are gap sizes, `0` means `b` starts right after `a`, and
/// a negative value counts the bases from `b.start` through `a.end` when `b`
/// starts inside `a`. `None` when one range contains the other.
pub fn gap_span(a: &Range, b: &Range, length: SeqPos) -> RangeResult<Option<SeqPos>> {
    if let Some(walk) = gap(a, b, length)? {
        return Ok(Some(walk.coverage(length)));
    }
    if normalize(a.end() + 1, length)? == b.start() {
        return Ok(Some(0));
    }

    let shared: SeqPos = find_overlaps(a, b, length)?
        .iter()
        .map(|f| f.coverage(length))
        .sum();
    if shared == a.coverage(length) || shared == b.coverage(length) {
        return Ok(None);
    }
    Ok(Some(-(normalize(a.end() - b.start(), length)? + 1)))
}
