//! Command implementations for the ringspan CLI

use anyhow::{Context, Result};
use ringspan_core::{Feature, Range, SeqPos, SequenceSpace};
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

use crate::error::{CliError, CliResult};

pub mod edit;
pub mod inspect;
pub mod view;

/// Parse a range argument.
///
/// Accepts `START..END` (inclusive, either end may be negative) and
/// `full` or `full@ORIGIN` for the whole sequence walked from `ORIGIN`.
pub fn parse_range(text: &str, space: &SequenceSpace) -> CliResult<Range> {
    let text = text.trim();

    if let Some(rest) = text.strip_prefix("full") {
        let origin = match rest.strip_prefix('@') {
            Some(origin) => parse_position(origin, text)?,
            None if rest.is_empty() => 0,
            None => return Err(CliError::parse(text, "expected full or full@ORIGIN")),
        };
        if !space.is_circular() && origin != 0 {
            return Err(CliError::validation(format!(
                "linear sequences have no whole-sequence range starting at {}",
                origin
            )));
        }
        return Ok(Range::full_circle(origin, space.length)?);
    }

    let (start, end) = text
        .split_once("..")
        .ok_or_else(|| CliError::parse(text, "expected START..END"))?;
    let start = parse_position(start, text)?;
    let end = parse_position(end, text)?;
    Ok(space.range(start, end)?)
}

fn parse_position(value: &str, input: &str) -> CliResult<SeqPos> {
    value
        .trim()
        .parse::<SeqPos>()
        .map_err(|e| CliError::parse(input, format!("invalid position '{}': {}", value, e)))
}

/// Read a JSON array of features and check each one fits `space`
pub fn load_features(input: &Path, space: &SequenceSpace) -> Result<Vec<Feature>> {
    log::info!("Reading features from: {}", input.display());
    if !input.exists() {
        return Err(CliError::file_not_found(input.to_path_buf()).into());
    }
    let reader = BufReader::new(
        File::open(input).with_context(|| format!("Failed to open {}", input.display()))?,
    );
    let features: Vec<Feature> = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse features from {}", input.display()))?;

    for feature in &features {
        space
            .validate(&feature.range)
            .with_context(|| format!("Feature '{}' does not fit the sequence", feature.name))?;
    }
    Ok(features)
}

/// Write `value` as JSON followed by a newline
pub fn emit<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T, pretty: bool) -> CliResult<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}
