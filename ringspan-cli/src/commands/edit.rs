//! Editing commands: trim, delete and delete-features

use anyhow::{Context, Result};
use ringspan_core::{
    adjust_features_to_deletion, adjust_to_deletion, trim, Feature, Remainder, SeqPos,
    SequenceSpace,
};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::{emit, load_features, parse_range};

#[derive(Debug, Serialize)]
struct DeletionReport {
    length: SeqPos,
    remainder: Remainder,
}

#[derive(Debug, Serialize)]
struct FeatureReport {
    length: SeqPos,
    features: Vec<Feature>,
}

pub fn trim_range<W: Write>(
    space: &SequenceSpace,
    target: &str,
    cutter: &str,
    out: &mut W,
    pretty: bool,
) -> Result<()> {
    let target = parse_range(target, space)?;
    let cutter = parse_range(cutter, space)?;
    let remainder = trim(&target, &cutter, space.length)?;
    emit(out, &remainder, pretty)?;
    Ok(())
}

pub fn delete<W: Write>(
    space: &SequenceSpace,
    target: &str,
    deletion: &str,
    out: &mut W,
    pretty: bool,
) -> Result<()> {
    let target = parse_range(target, space)?;
    let deletion = parse_range(deletion, space)?;
    let remainder = adjust_to_deletion(&target, &deletion, space.length)?;
    let report = DeletionReport {
        length: space.length - deletion.coverage(space.length),
        remainder,
    };
    emit(out, &report, pretty)?;
    Ok(())
}

/// Apply a deletion to every feature in a JSON feature file
pub fn delete_features<W: Write>(
    space: &SequenceSpace,
    input: &Path,
    deletion: &str,
    output: Option<&Path>,
    out: &mut W,
    pretty: bool,
) -> Result<()> {
    let features = load_features(input, space)?;

    let deletion = parse_range(deletion, space)?;
    let edited = adjust_features_to_deletion(&features, &deletion, space.length)?;
    let report = FeatureReport {
        length: space.length - deletion.coverage(space.length),
        features: edited,
    };
    log::info!(
        "Deleted {} ({} bases): {} feature(s) in, {} out",
        deletion,
        deletion.coverage(space.length),
        features.len(),
        report.features.len()
    );

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            emit(&mut writer, &report, pretty)?;
            writer.flush()?;
            log::info!("Wrote edited features to: {}", path.display());
        }
        None => emit(out, &report, pretty)?,
    }
    Ok(())
}
