use crate::error::{RangeError, RangeResult};
use crate::position::{check_length, normalize};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coordinate or length on a sequence. Signed so that callers may pass
/// unnormalised positions such as `-1`.
pub type SeqPos = i64;

/// An inclusive coordinate pair over `[0, length)`.
///
/// The sequence length is supplied per call and never stored on the value.
/// A `Wrapping` range always has `start > end` and covers
/// `[start, length-1]` followed by `[0, end]`; a `Linear` range has
/// `start <= end`. Equal endpoints always mean a single base; the whole
/// circle is built explicitly with [`Range::full_circle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Range {
    Linear { start: SeqPos, end: SeqPos },
    Wrapping { start: SeqPos, end: SeqPos },
}

impl Range {
    /// Normalise both endpoints into `[0, length)` and pick the variant
    pub fn new(start: SeqPos, end: SeqPos, length: SeqPos) -> RangeResult<Self> {
        let start = normalize(start, length)?;
        let end = normalize(end, length)?;
        Ok(Self::from_bounds(start, end))
    }

    /// The whole sequence, walked starting at `origin`
    pub fn full_circle(origin: SeqPos, length: SeqPos) -> RangeResult<Self> {
        let origin = normalize(origin, length)?;
        if origin == 0 {
            Ok(Range::Linear {
                start: 0,
                end: length - 1,
            })
        } else {
            Ok(Range::Wrapping {
                start: origin,
                end: origin - 1,
            })
        }
    }

    /// Build from bounds that are already normalised
    pub fn from_bounds(start: SeqPos, end: SeqPos) -> Self {
        if start > end {
            Range::Wrapping { start, end }
        } else {
            Range::Linear { start, end }
        }
    }

    pub fn start(&self) -> SeqPos {
        match *self {
            Range::Linear { start, .. } | Range::Wrapping { start, .. } => start,
        }
    }

    pub fn end(&self) -> SeqPos {
        match *self {
            Range::Linear { end, .. } | Range::Wrapping { end, .. } => end,
        }
    }

    pub fn is_wrapping(&self) -> bool {
        matches!(self, Range::Wrapping { .. })
    }

    /// Number of bases covered
    pub fn coverage(&self, length: SeqPos) -> SeqPos {
        match *self {
            Range::Linear { start, end } => end - start + 1,
            Range::Wrapping { start, end } => (length - start) + (end + 1),
        }
    }

    pub fn is_full(&self, length: SeqPos) -> bool {
        self.coverage(length) == length
    }

    /// Check that both endpoints lie in `[0, length)` and that the variant
    /// agrees with the endpoint order.
    pub fn validate(&self, length: SeqPos) -> RangeResult<()> {
        check_length(length)?;
        let (start, end) = (self.start(), self.end());
        if !(0..length).contains(&start) {
            return Err(RangeError::invalid_range(start, end, length, "start outside sequence"));
        }
        if !(0..length).contains(&end) {
            return Err(RangeError::invalid_range(start, end, length, "end outside sequence"));
        }
        match self {
            Range::Linear { .. } if start > end => Err(RangeError::invalid_range(
                start,
                end,
                length,
                "linear range with start after end",
            )),
            Range::Wrapping { .. } if start <= end => Err(RangeError::invalid_range(
                start,
                end,
                length,
                "wrapping range must start after its end",
            )),
            _ => Ok(()),
        }
    }

    /// Inclusive membership of `pos` (normalised first)
    pub fn contains(&self, pos: SeqPos, length: SeqPos) -> RangeResult<bool> {
        self.validate(length)?;
        let pos = normalize(pos, length)?;
        Ok(match *self {
            Range::Linear { start, end } => start <= pos && pos <= end,
            Range::Wrapping { start, end } => pos >= start || pos <= end,
        })
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}..{}", self.start(), self.end())
    }
}

/// Coverage left over after a trim or a deletion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "ranges", rename_all = "lowercase")]
pub enum Remainder {
    Empty,
    Single(Range),
    Pair(Range, Range),
}

impl Remainder {
    /// Wrap up to two ranges; more is an algebra violation
    pub fn from_ranges(ranges: &[Range], operation: &'static str) -> RangeResult<Self> {
        match *ranges {
            [] => Ok(Remainder::Empty),
            [only] => Ok(Remainder::Single(only)),
            [first, second] => Ok(Remainder::Pair(first, second)),
            _ => Err(RangeError::inconsistency(operation, ranges.len())),
        }
    }

    pub fn ranges(&self) -> Vec<Range> {
        match *self {
            Remainder::Empty => Vec::new(),
            Remainder::Single(range) => vec![range],
            Remainder::Pair(first, second) => vec![first, second],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Remainder::Empty)
    }

    pub fn coverage(&self, length: SeqPos) -> SeqPos {
        self.ranges().iter().map(|r| r.coverage(length)).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topology {
    Linear,
    #[default]
    Circular,
}

/// A validated coordinate context: a length plus whether the ends join
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceSpace {
    pub length: SeqPos,
    pub topology: Topology,
}

impl SequenceSpace {
    pub fn new(length: SeqPos, topology: Topology) -> RangeResult<Self> {
        check_length(length)?;
        Ok(Self { length, topology })
    }

    pub fn circular(length: SeqPos) -> RangeResult<Self> {
        Self::new(length, Topology::Circular)
    }

    pub fn linear(length: SeqPos) -> RangeResult<Self> {
        Self::new(length, Topology::Linear)
    }

    pub fn is_circular(&self) -> bool {
        self.topology == Topology::Circular
    }

    /// Build a range in this space.
    ///
    /// Circular sequences normalise both ends. Linear sequences have no
    /// origin to cross, so positions must already be in bounds and ordered.
    pub fn range(&self, start: SeqPos, end: SeqPos) -> RangeResult<Range> {
        if self.is_circular() {
            return Range::new(start, end, self.length);
        }
        if start < 0 || end >= self.length {
            return Err(RangeError::invalid_range(
                start,
                end,
                self.length,
                "position outside linear sequence",
            ));
        }
        if start > end {
            return Err(RangeError::invalid_range(
                start,
                end,
                self.length,
                "linear sequences cannot hold wrapping ranges",
            ));
        }
        Ok(Range::Linear { start, end })
    }

    pub fn full(&self) -> Range {
        Range::Linear {
            start: 0,
            end: self.length - 1,
        }
    }

    /// Validate `range` against this space, rejecting wrap on linear sequences
    pub fn validate(&self, range: &Range) -> RangeResult<()> {
        range.validate(self.length)?;
        if range.is_wrapping() && !self.is_circular() {
            return Err(RangeError::invalid_range(
                range.start(),
                range.end(),
                self.length,
                "linear sequences cannot hold wrapping ranges",
            ));
        }
        Ok(())
    }
}

/// Written as `"+"` or `"-"` in feature files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "char", into = "char")]
pub enum Strand {
    #[default]
    Forward,
    Reverse,
}

impl From<char> for Strand {
    fn from(c: char) -> Self {
        match c {
            '-' => Strand::Reverse,
            _ => Strand::Forward,
        }
    }
}

impl From<Strand> for char {
    fn from(strand: Strand) -> Self {
        match strand {
            Strand::Forward => '+',
            Strand::Reverse => '-',
        }
    }
}

/// An annotation decoded upstream. Only `range` is read by the algebra.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub name: String,
    pub kind: String,
    #[serde(default)]
    pub strand: Strand,
    pub range: Range,
}

impl Feature {
    pub fn new(name: impl Into<String>, kind: impl Into<String>, range: Range) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            strand: Strand::Forward,
            range,
        }
    }

    pub fn with_strand(mut self, strand: Strand) -> Self {
        self.strand = strand;
        self
    }

    /// Same metadata, different coordinates
    pub fn with_range(&self, range: Range) -> Self {
        Self {
            range,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_infers_variant() {
        assert_eq!(Range::new(2, 4, 10).unwrap(), Range::Linear { start: 2, end: 4 });
        assert_eq!(Range::new(8, 2, 10).unwrap(), Range::Wrapping { start: 8, end: 2 });
        assert_eq!(Range::new(-2, 12, 10).unwrap(), Range::Wrapping { start: 8, end: 2 });
        assert_eq!(Range::new(5, 5, 10).unwrap(), Range::Linear { start: 5, end: 5 });
    }

    #[test]
    fn test_full_circle() {
        assert_eq!(Range::full_circle(0, 10).unwrap(), Range::Linear { start: 0, end: 9 });
        assert_eq!(Range::full_circle(4, 10).unwrap(), Range::Wrapping { start: 4, end: 3 });
        assert_eq!(Range::full_circle(-1, 10).unwrap(), Range::Wrapping { start: 9, end: 8 });
        assert!(Range::full_circle(4, 10).unwrap().is_full(10));
        // single base is never the whole circle
        assert!(!Range::new(4, 4, 10).unwrap().is_full(10));
        assert!(Range::full_circle(0, 1).unwrap().is_full(1));
    }

    #[test]
    fn test_coverage() {
        assert_eq!(Range::Linear { start: 2, end: 4 }.coverage(10), 3);
        assert_eq!(Range::Wrapping { start: 8, end: 2 }.coverage(10), 5);
        assert_eq!(Range::Linear { start: 7, end: 7 }.coverage(10), 1);
    }

    #[test]
    fn test_validate() {
        assert!(Range::Linear { start: 0, end: 9 }.validate(10).is_ok());
        assert!(Range::Linear { start: 0, end: 10 }.validate(10).is_err());
        assert!(Range::Linear { start: -1, end: 3 }.validate(10).is_err());
        assert!(Range::Linear { start: 5, end: 3 }.validate(10).is_err());
        assert!(Range::Wrapping { start: 3, end: 5 }.validate(10).is_err());
        assert!(Range::Wrapping { start: 3, end: 3 }.validate(10).is_err());
        assert_eq!(
            Range::Linear { start: 0, end: 0 }.validate(0),
            Err(RangeError::InvalidLength { length: 0 })
        );
    }

    #[test]
    fn test_contains() {
        let r = Range::Wrapping { start: 8, end: 2 };
        assert!(r.contains(8, 10).unwrap());
        assert!(r.contains(0, 10).unwrap());
        assert!(r.contains(2, 10).unwrap());
        assert!(r.contains(-1, 10).unwrap());
        assert!(!r.contains(3, 10).unwrap());
        assert!(!r.contains(7, 10).unwrap());

        let r = Range::Linear { start: 3, end: 5 };
        assert!(r.contains(13, 10).unwrap());
        assert!(!r.contains(6, 10).unwrap());
    }

    #[test]
    fn test_remainder_from_ranges() {
        let a = Range::Linear { start: 0, end: 1 };
        let b = Range::Linear { start: 4, end: 5 };
        assert_eq!(Remainder::from_ranges(&[], "t").unwrap(), Remainder::Empty);
        assert_eq!(Remainder::from_ranges(&[a], "t").unwrap(), Remainder::Single(a));
        assert_eq!(Remainder::from_ranges(&[a, b], "t").unwrap(), Remainder::Pair(a, b));
        assert!(matches!(
            Remainder::from_ranges(&[a, b, a], "t"),
            Err(RangeError::InternalInconsistency { fragments: 3, .. })
        ));
        assert_eq!(Remainder::Pair(a, b).coverage(10), 4);
    }

    #[test]
    fn test_linear_space_rejects_wrap() {
        let space = SequenceSpace::linear(10).unwrap();
        assert!(space.range(8, 2).is_err());
        assert!(space.range(0, 10).is_err());
        assert_eq!(space.range(2, 4).unwrap(), Range::Linear { start: 2, end: 4 });
        assert!(space.validate(&Range::Wrapping { start: 8, end: 2 }).is_err());

        let space = SequenceSpace::circular(10).unwrap();
        assert_eq!(space.range(8, 2).unwrap(), Range::Wrapping { start: 8, end: 2 });
        assert_eq!(space.full(), Range::Linear { start: 0, end: 9 });
        assert!(SequenceSpace::circular(0).is_err());
    }

    #[test]
    fn test_range_serde_shape() {
        let json = serde_json::to_string(&Range::Wrapping { start: 8, end: 2 }).unwrap();
        assert_eq!(json, r#"{"kind":"wrapping","start":8,"end":2}"#);
        let back: Range = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Range::Wrapping { start: 8, end: 2 });
    }

    #[test]
    fn test_strand_conversions() {
        assert_eq!(Strand::from('+'), Strand::Forward);
        assert_eq!(Strand::from('-'), Strand::Reverse);
        assert_eq!(char::from(Strand::Reverse), '-');
    }

    #[test]
    fn test_feature_strand_is_a_sign() {
        let feature = Feature::new("bla", "CDS", Range::Linear { start: 1, end: 3 })
            .with_strand(Strand::Reverse);
        let json = serde_json::to_string(&feature).unwrap();
        assert!(json.contains(r#""strand":"-""#));
        assert_eq!(serde_json::from_str::<Feature>(&json).unwrap(), feature);

        let unstranded: Feature = serde_json::from_str(
            r#"{"name":"ori","kind":"rep_origin","range":{"kind":"linear","start":0,"end":4}}"#,
        )
        .unwrap();
        assert_eq!(unstranded.strand, Strand::Forward);
    }

    #[test]
    fn test_feature_builder() {
        let feature = Feature::new("lacZ", "gene", Range::Linear { start: 1, end: 3 })
            .with_strand(Strand::Reverse);
        let moved = feature.with_range(Range::Linear { start: 0, end: 2 });
        assert_eq!(moved.name, "lacZ");
        assert_eq!(moved.strand, Strand::Reverse);
        assert_eq!(moved.range, Range::Linear { start: 0, end: 2 });
    }
}
