//! Intersection of possibly-wrapping ranges

use crate::coords::{intersect_linear, sort_fragments, split_if_circular};
use crate::error::{RangeError, RangeResult};
use crate::position::check_length;
use crate::types::{Range, SeqPos};

/// All intersection fragments of `a` and `b`, ascending by start.
///
/// Both ranges are split at the origin and every pair of fragments is
/// intersected, so the result is always linear and pairwise disjoint. An
/// overlap that crosses the origin comes back as two fragments; see
/// [`collapse_overlaps`].
pub fn find_overlaps(a: &Range, b: &Range, length: SeqPos) -> RangeResult<Vec<Range>> {
    let a_fragments = split_if_circular(a, length)?;
    let b_fragments = split_if_circular(b, length)?;

    let mut overlaps: Vec<Range> = a_fragments
        .iter()
        .flat_map(|fa| b_fragments.iter().filter_map(move |fb| intersect_linear(fa, fb)))
        .collect();
    sort_fragments(&mut overlaps);

    log::trace!("overlaps of {} and {} over {}: {:?}", a, b, length, overlaps);
    Ok(overlaps)
}

/// Re-merge fragments that were only separated by linearisation.
///
/// Fragments that abut (`previous.end + 1 == next.start`) always belong to
/// one continuous overlap and are joined. When `source` wraps, a fragment
/// starting at `0` and another ending at `length - 1` are joined across the
/// origin into a single wrapping range. Anything else is returned as given,
/// ascending by start.
pub fn collapse_overlaps(
    fragments: &[Range],
    length: SeqPos,
    source: &Range,
) -> RangeResult<Vec<Range>> {
    check_length(length)?;
    source.validate(length)?;
    for fragment in fragments {
        fragment.validate(length)?;
        if fragment.is_wrapping() {
            return Err(RangeError::invalid_range(
                fragment.start(),
                fragment.end(),
                length,
                "fragments must not wrap",
            ));
        }
    }

    let mut sorted = fragments.to_vec();
    sort_fragments(&mut sorted);

    let mut merged: Vec<Range> = Vec::with_capacity(sorted.len());
    for fragment in sorted {
        match merged.last_mut() {
            Some(last) if last.end() >= fragment.start() => {
                return Err(RangeError::invalid_range(
                    fragment.start(),
                    fragment.end(),
                    length,
                    format!("fragment overlaps {}", last),
                ));
            }
            Some(last) if last.end() + 1 == fragment.start() => {
                *last = Range::Linear {
                    start: last.start(),
                    end: fragment.end(),
                };
            }
            _ => merged.push(fragment),
        }
    }

    if source.is_wrapping() && merged.len() >= 2 {
        let head = merged[0];
        let tail = merged[merged.len() - 1];
        if head.start() == 0 && tail.end() == length - 1 {
            merged.pop();
            merged.remove(0);
            let joined = Range::Wrapping {
                start: tail.start(),
                end: head.end(),
            };
            log::debug!("joined {} and {} across the origin into {}", tail, head, joined);
            merged.push(joined);
        }
    }

    if merged.len() > 2 {
        return Err(RangeError::inconsistency("collapse_overlaps", merged.len()));
    }
    Ok(merged)
}
