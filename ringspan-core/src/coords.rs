//! Decomposition of ranges into fragments that never cross the origin

use crate::error::RangeResult;
use crate::types::{Range, SeqPos};

/// Split a wrapping range at the origin.
///
/// Linear ranges come back unchanged. A wrapping range yields its tail
/// fragment `[start, length-1]` first and its head fragment `[0, end]`
/// second; together they cover exactly the original bases.
pub fn split_if_circular(range: &Range, length: SeqPos) -> RangeResult<Vec<Range>> {
    range.validate(length)?;
    let fragments = match *range {
        Range::Linear { .. } => vec![*range],
        Range::Wrapping { start, end } => vec![
            Range::Linear {
                start,
                end: length - 1,
            },
            Range::Linear { start: 0, end },
        ],
    };
    log::trace!("split {} over {} into {:?}", range, length, fragments);
    Ok(fragments)
}

/// Intersection of two fragments. Both must be linear.
pub(crate) fn intersect_linear(a: &Range, b: &Range) -> Option<Range> {
    let start = a.start().max(b.start());
    let end = a.end().min(b.end());
    if start <= end {
        Some(Range::Linear { start, end })
    } else {
        None
    }
}

/// Sort fragments ascending by start
pub(crate) fn sort_fragments(fragments: &mut [Range]) {
    fragments.sort_unstable_by_key(|f| (f.start(), f.end()));
}
