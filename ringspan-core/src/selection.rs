//! Where an annotation shows up inside a selection, in selection-local
//! coordinates.

use crate::error::RangeResult;
use crate::overlap::{collapse_overlaps, find_overlaps};
use crate::rebase::zero;
use crate::types::{Feature, Range, SeqPos};
use rayon::prelude::*;

/// Overlap of `annotation` with `selection`, rebased so that
/// `selection.start` is position 0.
///
/// The rebasing container is the whole circle anchored at the selection
/// start, so offsets are valid indices into a selection-local buffer even
/// when the selection itself crosses the origin.
pub fn get_zeroed_overlaps(
    annotation: &Range,
    selection: &Range,
    length: SeqPos,
) -> RangeResult<Vec<Range>> {
    let raw = find_overlaps(annotation, selection, length)?;
    let collapsed = collapse_overlaps(&raw, length, annotation)?;
    let container = Range::full_circle(selection.start(), length)?;

    collapsed
        .iter()
        .map(|fragment| zero(fragment, container.start(), length))
        .collect()
}

/// Zeroed overlaps for every feature touching `selection`, as
/// `(feature index, fragments)` in input order.
pub fn visible_features(
    features: &[Feature],
    selection: &Range,
    length: SeqPos,
) -> RangeResult<Vec<(usize, Vec<Range>)>> {
    let visible: Vec<(usize, Vec<Range>)> = features
        .par_iter()
        .enumerate()
        .map(|(index, feature)| {
            get_zeroed_overlaps(&feature.range, selection, length).map(|f| (index, f))
        })
        .collect::<RangeResult<Vec<_>>>()?
        .into_iter()
        .filter(|(_, fragments)| !fragments.is_empty())
        .collect();

    log::trace!(
        "{} of {} features visible in {}",
        visible.len(),
        features.len(),
        selection
    );
    Ok(visible)
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
    fn test_wrapping_annotation_at_selection_start() {
        assert_eq!(get_zeroed_overlaps(&wrap(8, 2), &lin(0, 4), 10).unwrap(), vec![lin(0, 2)]);
    }

    #[test]
    fn test_selection_offset() {
        assert_eq!(get_zeroed_overlaps(&lin(4, 6), &lin(3, 8), 10).unwrap(), vec![lin(1, 3)]);
    }

    #[test]
    fn test_wrapping_selection_and_annotation() {
        // annotation 8,9,0,1,2 inside selection 7..3 starts one base in
        assert_eq!(get_zeroed_overlaps(&wrap(8, 2), &wrap(7, 3), 10).unwrap(), vec![lin(1, 5)]);
    }

    #[test]
    fn test_linear_annotation_in_wrapping_selection() {
        assert_eq!(get_zeroed_overlaps(&lin(0, 1), &wrap(8, 3), 10).unwrap(), vec![lin(2, 3)]);
    }

    #[test]
    fn test_two_visible_pieces() {
        assert_eq!(
            get_zeroed_overlaps(&lin(1, 8), &wrap(7, 2), 10).unwrap(),
            vec![lin(4, 5), lin(0, 1)]
        );
    }

    #[test]
    fn test_no_overlap() {
        assert!(get_zeroed_overlaps(&lin(4, 5), &lin(6, 9), 10).unwrap().is_empty());
    }

    #[test]
    fn test_visible_features() {
        let features = vec![
            Feature::new("a", "gene", wrap(8, 2)),
            Feature::new("b", "gene", lin(5, 6)),
            Feature::new("c", "gene", lin(3, 4)),
        ];
        let visible = visible_features(&features, &lin(0, 4), 10).unwrap();
        assert_eq!(visible, vec![(0, vec![lin(0, 2)]), (2, vec![lin(3, 4)])]);
    }
}
