//! Selection-local views: zero and view

use anyhow::Result;
use ringspan_core::{get_zeroed_overlaps, visible_features, zero, Feature, Range, SeqPos, SequenceSpace};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

use super::{emit, load_features, parse_range};

#[derive(Debug, Serialize)]
struct VisibleFeature<'a> {
    name: &'a str,
    kind: &'a str,
    strand: char,
    fragments: Vec<Range>,
}

pub fn zero_range<W: Write>(
    space: &SequenceSpace,
    range: &str,
    origin: SeqPos,
    out: &mut W,
    pretty: bool,
) -> Result<()> {
    let range = parse_range(range, space)?;
    let moved = zero(&range, origin, space.length)?;
    emit(out, &moved, pretty)?;
    Ok(())
}

pub fn view_annotation<W: Write>(
    space: &SequenceSpace,
    selection: &str,
    annotation: &str,
    out: &mut W,
    pretty: bool,
) -> Result<()> {
    let selection = parse_range(selection, space)?;
    let annotation = parse_range(annotation, space)?;
    let fragments = get_zeroed_overlaps(&annotation, &selection, space.length)?;
    emit(out, &fragments, pretty)?;
    Ok(())
}

/// List every feature in a JSON feature file that shows up in `selection`
pub fn view_features<W: Write>(
    space: &SequenceSpace,
    selection: &str,
    input: &Path,
    out: &mut W,
    pretty: bool,
) -> Result<()> {
    let features = load_features(input, space)?;
    let selection = parse_range(selection, space)?;
    let visible = visible_features(&features, &selection, space.length)?;
    log::info!("{} of {} features visible in {}", visible.len(), features.len(), selection);

    let rows: Vec<VisibleFeature> = visible
        .into_iter()
        .map(|(index, fragments)| VisibleFeature {
            name: &features[index].name,
            kind: &features[index].kind,
            strand: features[index].strand.into(),
            fragments,
        })
        .collect();
    emit(out, &rows, pretty)?;
    Ok(())
}
