//! Consecutive ranges and sub-ranges along the forward walk

use crate::error::{RangeError, RangeResult};
use crate::position::normalize;
use crate::types::{Range, SeqPos, SequenceSpace};

/// True when `b` starts on the base right after `a` ends.
///
/// The walk crosses the origin, so on a circle of 100 `0..9` follows
/// `90..99`. A full circle is consecutive with itself.
pub fn consecutive_with(a: &Range, b: &Range, length: SeqPos) -> RangeResult<bool> {
    a.validate(length)?;
    b.validate(length)?;
    Ok(normalize(a.end() + 1, length)? == b.start())
}

/// Join `b` onto the end of `a`.
///
/// `None` when `b` does not follow `a`, or when together they would cover
/// more than the whole sequence.
pub fn fuse(a: &Range, b: &Range, length: SeqPos) -> RangeResult<Option<Range>> {
    if !consecutive_with(a, b, length)? {
        return Ok(None);
    }
    if a.coverage(length) + b.coverage(length) > length {
        return Ok(None);
    }
    let fused = Range::from_bounds(a.start(), b.end());
    log::trace!("fused {} and {} into {}", a, b, fused);
    Ok(Some(fused))
}

/// The range `start..end`, checked to lie inside `parent`'s walk.
pub fn sub_range(parent: &Range, start: SeqPos, end: SeqPos, length: SeqPos) -> RangeResult<Range> {
    parent.validate(length)?;
    let sub = Range::new(start, end, length)?;
    let offset = normalize(sub.start() - parent.start(), length)?;
    if offset + sub.coverage(length) > parent.coverage(length) {
        return Err(RangeError::invalid_range(
            start,
            end,
            length,
            format!("not within {}", parent),
        ));
    }
    Ok(sub)
}

impl SequenceSpace {
    /// Like [`consecutive_with`], but nothing follows the last base of a
    /// linear sequence.
    pub fn consecutive_with(&self, a: &Range, b: &Range) -> RangeResult<bool> {
        self.validate(a)?;
        self.validate(b)?;
        if !self.is_circular() && a.end() == self.length - 1 {
            return Ok(false);
        }
        consecutive_with(a, b, self.length)
    }

    pub fn fuse(&self, a: &Range, b: &Range) -> RangeResult<Option<Range>> {
        if !self.consecutive_with(a, b)? {
            return Ok(None);
        }
        fuse(a, b, self.length)
    }

    pub fn sub_range(&self, parent: &Range, start: SeqPos, end: SeqPos) -> RangeResult<Range> {
        self.validate(parent)?;
        let sub = self.range(start, end)?;
        sub_range(parent, sub.start(), sub.end(), self.length)
    }
}
