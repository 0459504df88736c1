//! Read-only queries over ranges

use anyhow::Result;
use ringspan_core::{
    collapse_overlaps, find_overlaps, gap, gap_span, normalize, split_if_circular, Range, SeqPos,
    SequenceSpace,
};
use serde::Serialize;
use std::io::Write;

use super::{emit, parse_range};

#[derive(Debug, Serialize)]
struct FuseReport {
    consecutive: bool,
    fused: Option<Range>,
}

#[derive(Debug, Serialize)]
struct GapReport {
    gap: Option<Range>,
    span: Option<SeqPos>,
}

pub fn normalize_position<W: Write>(
    space: &SequenceSpace,
    position: SeqPos,
    out: &mut W,
    pretty: bool,
) -> Result<()> {
    let normalized = normalize(position, space.length)?;
    log::debug!("{} normalizes to {} on length {}", position, normalized, space.length);
    emit(out, &normalized, pretty)?;
    Ok(())
}

pub fn split<W: Write>(space: &SequenceSpace, range: &str, out: &mut W, pretty: bool) -> Result<()> {
    let range = parse_range(range, space)?;
    let fragments = split_if_circular(&range, space.length)?;
    emit(out, &fragments, pretty)?;
    Ok(())
}

pub fn overlaps<W: Write>(
    space: &SequenceSpace,
    a: &str,
    b: &str,
    out: &mut W,
    pretty: bool,
) -> Result<()> {
    let a = parse_range(a, space)?;
    let b = parse_range(b, space)?;
    let fragments = find_overlaps(&a, &b, space.length)?;
    log::info!("{} and {} share {} fragment(s)", a, b, fragments.len());
    emit(out, &fragments, pretty)?;
    Ok(())
}

pub fn collapse<W: Write>(
    space: &SequenceSpace,
    fragments: &[String],
    source: &str,
    out: &mut W,
    pretty: bool,
) -> Result<()> {
    let source = parse_range(source, space)?;
    let fragments = fragments
        .iter()
        .map(|f| parse_range(f, space))
        .collect::<Result<Vec<_>, _>>()?;
    let collapsed = collapse_overlaps(&fragments, space.length, &source)?;
    emit(out, &collapsed, pretty)?;
    Ok(())
}

pub fn gap_between<W: Write>(
    space: &SequenceSpace,
    from: &str,
    to: &str,
    out: &mut W,
    pretty: bool,
) -> Result<()> {
    let from = parse_range(from, space)?;
    let to = parse_range(to, space)?;
    let report = GapReport {
        gap: gap(&from, &to, space.length)?,
        span: gap_span(&from, &to, space.length)?,
    };
    emit(out, &report, pretty)?;
    Ok(())
}

pub fn fuse_ranges<W: Write>(
    space: &SequenceSpace,
    a: &str,
    b: &str,
    out: &mut W,
    pretty: bool,
) -> Result<()> {
    let a = parse_range(a, space)?;
    let b = parse_range(b, space)?;
    let report = FuseReport {
        consecutive: space.consecutive_with(&a, &b)?,
        fused: space.fuse(&a, &b)?,
    };
    emit(out, &report, pretty)?;
    Ok(())
}

/// Check that `range` lies inside `parent` and print it
pub fn sub_range_of<W: Write>(
    space: &SequenceSpace,
    parent: &str,
    range: &str,
    out: &mut W,
    pretty: bool,
) -> Result<()> {
    let parent = parse_range(parent, space)?;
    let range = parse_range(range, space)?;
    let sub = space.sub_range(&parent, range.start(), range.end())?;
    emit(out, &sub, pretty)?;
    Ok(())
}
