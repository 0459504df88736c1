//! Renumbering ranges after bases are removed from the sequence

use crate::coords::split_if_circular;
use crate::error::{RangeError, RangeResult};
use crate::trim::trim;
use crate::types::{Feature, Range, Remainder, SeqPos};
use rayon::prelude::*;

/// Recompute `target` after the bases of `deletion` are cut out.
///
/// The deleted bases are first trimmed away from the target. Each surviving
/// piece is then shifted left by the size of every deletion piece that
/// precedes it. A wrapping deletion is applied tail piece first, head piece
/// second, and each comparison sees the shifts already applied. Results are
/// in the coordinates of the shortened sequence of length
/// `length - deletion.coverage(length)`.
pub fn adjust_to_deletion(
    target: &Range,
    deletion: &Range,
    length: SeqPos,
) -> RangeResult<Remainder> {
    let trimmed = trim(target, deletion, length)?;
    if trimmed.is_empty() {
        log::debug!("{} lies inside deletion {}", target, deletion);
        return Ok(Remainder::Empty);
    }

    let pieces = split_if_circular(deletion, length)?;
    let new_length = length - deletion.coverage(length);

    let mut adjusted = Vec::with_capacity(2);
    for range in trimmed.ranges() {
        let shifted = shift_past_deletion(&range, &pieces);
        if shifted.validate(new_length).is_err() {
            log::warn!(
                "{} shifted to {} which does not fit length {}",
                range,
                shifted,
                new_length
            );
            return Err(RangeError::inconsistency("adjust_to_deletion", adjusted.len() + 1));
        }
        adjusted.push(shifted);
    }

    Remainder::from_ranges(&adjusted, "adjust_to_deletion")
}

fn shift_past_deletion(range: &Range, pieces: &[Range]) -> Range {
    let (mut start, mut end) = (range.start(), range.end());
    for piece in pieces {
        let removed = piece.end() - piece.start() + 1;
        let (shift_start, shift_end) = if range.is_wrapping() {
            if piece.start() < end {
                (true, true)
            } else {
                (piece.start() < start, false)
            }
        } else if piece.start() < start {
            (true, true)
        } else {
            (false, piece.start() < end)
        };
        if shift_start {
            start -= removed;
        }
        if shift_end {
            end -= removed;
        }
        log::trace!("piece {} moves {} to {}..{}", piece, range, start, end);
    }

    match range {
        Range::Linear { .. } => Range::Linear { start, end },
        Range::Wrapping { .. } => Range::Wrapping { start, end },
    }
}

/// Apply one deletion to every feature.
///
/// Features that were entirely deleted are dropped and a feature cut in two
/// becomes two features with the same metadata. Input order is kept.
pub fn adjust_features_to_deletion(
    features: &[Feature],
    deletion: &Range,
    length: SeqPos,
) -> RangeResult<Vec<Feature>> {
    let remainders: Vec<Remainder> = features
        .par_iter()
        .map(|feature| adjust_to_deletion(&feature.range, deletion, length))
        .collect::<RangeResult<Vec<_>>>()?;

    let mut adjusted = Vec::with_capacity(features.len());
    let (mut dropped, mut split) = (0usize, 0usize);
    for (feature, remainder) in features.iter().zip(remainders) {
        match remainder {
            Remainder::Empty => dropped += 1,
            Remainder::Pair(..) => split += 1,
            Remainder::Single(_) => {}
        }
        adjusted.extend(remainder.ranges().into_iter().map(|r| feature.with_range(r)));
    }

    log::debug!(
        "deletion {} over {}: {} features in, {} out ({} dropped, {} split)",
        deletion,
        length,
        features.len(),
        adjusted.len(),
        dropped,
        split
    );
    Ok(adjusted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lin(start: SeqPos, end: SeqPos) -> Range {
        Range::Linear { start, end }
    }

    fn wrap(start: SeqPos, end: SeqPos) -> Range {
        Range::Wrapping { start, end }
    }

    #[test]
    fn test_deletion_after_target() {
        assert_eq!(
            adjust_to_deletion(&lin(2, 4), &lin(6, 7), 10).unwrap(),
            Remainder::Single(lin(2, 4))
        );
    }

    #[test]
    fn test_deletion_before_target() {
        assert_eq!(
            adjust_to_deletion(&lin(6, 8), &lin(1, 2), 10).unwrap(),
            Remainder::Single(lin(4, 6))
        );
    }

    #[test]
    fn test_target_inside_deletion() {
        assert_eq!(adjust_to_deletion(&lin(3, 4), &lin(2, 6), 10).unwrap(), Remainder::Empty);
        assert_eq!(adjust_to_deletion(&wrap(9, 0), &wrap(8, 1), 10).unwrap(), Remainder::Empty);
    }

    #[test]
    fn test_deletion_overlapping_front() {
        // bases 1..4 go, target keeps 5..8 which slides to 1..4
        assert_eq!(
            adjust_to_deletion(&lin(3, 8), &lin(1, 4), 10).unwrap(),
            Remainder::Single(lin(1, 4))
        );
    }

    #[test]
    fn test_deletion_overlapping_back() {
        assert_eq!(
            adjust_to_deletion(&lin(3, 8), &lin(6, 9), 10).unwrap(),
            Remainder::Single(lin(3, 5))
        );
    }

    #[test]
    fn test_interior_deletion_splits_target() {
        assert_eq!(
            adjust_to_deletion(&lin(2, 8), &lin(4, 5), 10).unwrap(),
            Remainder::Pair(lin(2, 3), lin(4, 6))
        );
    }

    #[test]
    fn test_deletion_in_gap_of_wrapping_target() {
        // target covers 7,8,9,0,1; removing 3..4 moves only the start
        assert_eq!(
            adjust_to_deletion(&wrap(7, 1), &lin(3, 4), 10).unwrap(),
            Remainder::Single(wrap(5, 1))
        );
    }

    #[test]
    fn test_deletion_closes_whole_gap() {
        // everything outside the target is removed: the target becomes the full circle
        let result = adjust_to_deletion(&wrap(7, 1), &lin(2, 6), 10).unwrap();
        assert_eq!(result, Remainder::Single(wrap(2, 1)));
        assert!(wrap(2, 1).is_full(5));
    }

    #[test]
    fn test_wrapping_deletion_linear_target() {
        // pieces 8..9 then 0..1; only the head piece precedes the target
        assert_eq!(
            adjust_to_deletion(&lin(4, 6), &wrap(8, 1), 10).unwrap(),
            Remainder::Single(lin(2, 4))
        );
    }

    #[test]
    fn test_wrapping_deletion_piece_order_is_tail_then_head() {
        // target covers 7,8,9,0,1,2,3; bases 9 and 0 go. Tail piece 9..9 is
        // applied first, then head piece 0..0, giving flanks 6..7 and 0..2
        // on the 8-base sequence.
        assert_eq!(
            adjust_to_deletion(&wrap(7, 3), &wrap(9, 0), 10).unwrap(),
            Remainder::Pair(lin(6, 7), lin(0, 2))
        );
    }

    #[test]
    fn test_deleting_the_origin_from_wrapping_target() {
        // target covers 8,9,0,1; deleting 9..0 leaves flanks 8..8 and 1..1
        assert_eq!(
            adjust_to_deletion(&wrap(8, 1), &wrap(9, 0), 10).unwrap(),
            Remainder::Pair(lin(7, 7), lin(0, 0))
        );
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(
            adjust_to_deletion(&lin(2, 4), &lin(6, 7), 0),
            Err(RangeError::InvalidLength { length: 0 })
        );
        assert!(matches!(
            adjust_to_deletion(&lin(2, 14), &lin(6, 7), 10),
            Err(RangeError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_deterministic() {
        let first = adjust_to_deletion(&wrap(7, 3), &wrap(9, 0), 10).unwrap();
        let second = adjust_to_deletion(&wrap(7, 3), &wrap(9, 0), 10).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_adjust_features() {
        let features = vec![
            Feature::new("promoter", "promoter", lin(0, 1)),
            Feature::new("inside", "misc_feature", lin(4, 5)),
            Feature::new("ori", "rep_origin", lin(2, 8)),
            Feature::new("tail", "CDS", lin(7, 9)),
        ];
        let adjusted = adjust_features_to_deletion(&features, &lin(4, 5), 10).unwrap();
        let summary: Vec<(&str, Range)> =
            adjusted.iter().map(|f| (f.name.as_str(), f.range)).collect();
        assert_eq!(
            summary,
            vec![
                ("promoter", lin(0, 1)),
                ("ori", lin(2, 3)),
                ("ori", lin(4, 6)),
                ("tail", lin(5, 7)),
            ]
        );
    }

    #[test]
    fn test_adjust_features_propagates_errors() {
        let features = vec![Feature::new("bad", "gene", lin(4, 20))];
        assert!(adjust_features_to_deletion(&features, &lin(1, 2), 10).is_err());
    }
}
