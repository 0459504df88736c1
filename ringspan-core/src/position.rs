//! Position normalisation over a sequence of fixed length

use crate::error::{RangeError, RangeResult};
use crate::types::SeqPos;

/// Fail with [`RangeError::InvalidLength`] unless `length >= 1`
pub fn check_length(length: SeqPos) -> RangeResult<()> {
    if length <= 0 {
        return Err(RangeError::InvalidLength { length });
    }
    Ok(())
}

/// Reduce any integer to a coordinate in `[0, length)`.
///
/// Negative and overflowing positions both wrap, so `-1` is the last base
/// and `length` is the first.
pub fn normalize(pos: SeqPos, length: SeqPos) -> RangeResult<SeqPos> {
    check_length(length)?;
    Ok(pos.rem_euclid(length))
}
