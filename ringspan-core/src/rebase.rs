//! Re-expressing ranges against a new origin

use crate::error::RangeResult;
use crate::position::normalize;
use crate::types::{Range, SeqPos};

/// Shift `subrange` so that `container_start` becomes position 0.
///
/// Whether the result wraps is decided by the new endpoints, so a range that
/// crossed the old origin may become linear and vice versa.
pub fn zero(subrange: &Range, container_start: SeqPos, length: SeqPos) -> RangeResult<Range> {
    subrange.validate(length)?;
    let origin = normalize(container_start, length)?;
    let start = normalize(subrange.start() - origin, length)?;
    let end = normalize(subrange.end() - origin, length)?;
    Ok(Range::from_bounds(start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_linear() {
        assert_eq!(
            zero(&Range::Linear { start: 5, end: 7 }, 3, 10).unwrap(),
            Range::Linear { start: 2, end: 4 }
        );
    }

    #[test]
    fn test_zero_unwraps_when_origin_moves_inside() {
        assert_eq!(
            zero(&Range::Wrapping { start: 8, end: 2 }, 7, 10).unwrap(),
            Range::Linear { start: 1, end: 5 }
        );
    }

    #[test]
    fn test_zero_can_introduce_wrap() {
        assert_eq!(
            zero(&Range::Linear { start: 2, end: 6 }, 4, 10).unwrap(),
            Range::Wrapping { start: 8, end: 2 }
        );
    }

    #[test]
    fn test_zero_round_trip() {
        let original = Range::Wrapping { start: 8, end: 2 };
        let moved = zero(&original, 13, 10).unwrap();
        assert_eq!(zero(&moved, -13, 10).unwrap(), original);
    }

    #[test]
    fn test_zero_extreme_container_start() {
        let r = Range::Linear { start: 5, end: 7 };
        // i64::MIN is 2 mod 10, i64::MAX is 7 mod 10
        assert_eq!(zero(&r, i64::MIN, 10).unwrap(), Range::Linear { start: 3, end: 5 });
        assert_eq!(zero(&r, i64::MAX, 10).unwrap(), Range::Wrapping { start: 8, end: 0 });
        assert_eq!(zero(&r, i64::MIN, 10).unwrap(), zero(&r, 2, 10).unwrap());
    }

    #[test]
    fn test_zero_keeps_full_circle_full() {
        let full = Range::full_circle(6, 10).unwrap();
        assert_eq!(zero(&full, 6, 10).unwrap(), Range::Linear { start: 0, end: 9 });
        assert!(zero(&full, 2, 10).unwrap().is_full(10));
    }

    #[test]
    fn test_zero_rejects_invalid() {
        assert!(zero(&Range::Linear { start: 5, end: 17 }, 3, 10).is_err());
        assert!(zero(&Range::Linear { start: 5, end: 7 }, 3, 0).is_err());
    }
}
