//! Subtracting one range from another

use crate::error::{RangeError, RangeResult};
use crate::overlap::find_overlaps;
use crate::types::{Range, Remainder, SeqPos};

/// Coverage of `target` that `cutter` does not touch.
///
/// Work happens in offsets along the target's own walk (offset 0 is
/// `target.start`), where the target is a plain `[0, coverage)` interval
/// regardless of whether it crosses the origin. Pieces are returned in walk
/// order. A flank keeps whatever shape its bases have on the sequence, so a
/// flank of a wrapping target may itself wrap.
pub fn trim(target: &Range, cutter: &Range, length: SeqPos) -> RangeResult<Remainder> {
    let covered = find_overlaps(target, cutter, length)?;
    if covered.is_empty() {
        return Ok(Remainder::Single(*target));
    }

    let origin = target.start();
    let total = target.coverage(length);
    let offset = |pos: SeqPos| (pos - origin).rem_euclid(length);

    let mut cut: Vec<(SeqPos, SeqPos)> = covered
        .iter()
        .map(|f| (offset(f.start()), offset(f.end())))
        .collect();
    cut.sort_unstable();

    let mut merged: Vec<(SeqPos, SeqPos)> = Vec::with_capacity(cut.len());
    for (start, end) in cut {
        match merged.last_mut() {
            Some(last) if last.1 + 1 >= start => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }

    let mut kept: Vec<(SeqPos, SeqPos)> = Vec::with_capacity(2);
    let mut cursor = 0;
    for &(start, end) in &merged {
        if start > cursor {
            kept.push((cursor, start - 1));
        }
        cursor = end + 1;
    }
    if cursor < total {
        kept.push((cursor, total - 1));
    }

    let cut_bases: SeqPos = merged.iter().map(|(s, e)| e - s + 1).sum();
    let kept_bases: SeqPos = kept.iter().map(|(s, e)| e - s + 1).sum();
    if cut_bases + kept_bases != total {
        log::warn!(
            "trim of {} by {} lost coverage: {} cut + {} kept != {}",
            target,
            cutter,
            cut_bases,
            kept_bases,
            total
        );
        return Err(RangeError::inconsistency("trim", kept.len()));
    }

    let ranges: Vec<Range> = kept
        .iter()
        .map(|&(start, end)| {
            Range::from_bounds(
                (origin + start).rem_euclid(length),
                (origin + end).rem_euclid(length),
            )
        })
        .collect();

    let remainder = Remainder::from_ranges(&ranges, "trim")?;
    log::debug!("trim {} by {} -> {:?}", target, cutter, remainder);
    Ok(remainder)
}
