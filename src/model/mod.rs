use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One of the three scores mopo16s assigns to a primer pair.
///
/// The discriminant is the column the score occupies in a flat result row
/// (`[forward, reverse, efficiency, coverage, matching-bias]`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoreField {
    Efficiency = 2,
    Coverage = 3,
    MatchingBias = 4,
}

impl ScoreField {
    /// Processing order of the normalizer and column order of the tables.
    pub const ALL: [ScoreField; 3] = [
        ScoreField::Efficiency,
        ScoreField::Coverage,
        ScoreField::MatchingBias,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Result<Self> {
        match index {
            2 => Ok(ScoreField::Efficiency),
            3 => Ok(ScoreField::Coverage),
            4 => Ok(ScoreField::MatchingBias),
            other => Err(Error::UnknownScoreField(other)),
        }
    }

    /// Name shown on axes, tooltips and table headers.
    pub fn label(self) -> &'static str {
        match self {
            ScoreField::Efficiency => "Efficiency",
            ScoreField::Coverage => "Coverage",
            ScoreField::MatchingBias => "Matching-bias",
        }
    }

    /// Matching-bias is minimized by the optimizer, the other two are maximized.
    pub fn lower_is_better(self) -> bool {
        matches!(self, ScoreField::MatchingBias)
    }
}

impl fmt::Display for ScoreField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ScoreField {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let lower = value.trim().to_lowercase();
        match lower.as_str() {
            "efficiency" | "eff" => Ok(ScoreField::Efficiency),
            "coverage" | "cov" => Ok(ScoreField::Coverage),
            "matching-bias" | "matching_bias" | "matchingbias" | "bias" => {
                Ok(ScoreField::MatchingBias)
            }
            _ => match lower.parse::<usize>() {
                Ok(index) => ScoreField::from_index(index),
                Err(_) => Err(Error::UnknownScoreName(value.trim().to_string())),
            },
        }
    }
}

/// Which of the two compared record sets a record belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Baseline,
    Optimized,
}

impl Collection {
    pub const ALL: [Collection; 2] = [Collection::Baseline, Collection::Optimized];

    pub fn name(self) -> &'static str {
        match self {
            Collection::Baseline => "baseline",
            Collection::Optimized => "optimized",
        }
    }

    /// Legend text of the chart series.
    pub fn series_label(self) -> &'static str {
        match self {
            Collection::Baseline => "Initial primer pairs",
            Collection::Optimized => "Optimized primer pairs",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RawScores {
    pub efficiency: f64,
    pub coverage: f64,
    pub matching_bias: f64,
}

impl RawScores {
    pub fn get(&self, field: ScoreField) -> f64 {
        match field {
            ScoreField::Efficiency => self.efficiency,
            ScoreField::Coverage => self.coverage,
            ScoreField::MatchingBias => self.matching_bias,
        }
    }
}

/// Bubble sizes in [5, 14], one per score.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DerivedSizes {
    pub efficiency: f64,
    pub coverage: f64,
    pub matching_bias: f64,
}

impl DerivedSizes {
    pub fn get(&self, field: ScoreField) -> f64 {
        match field {
            ScoreField::Efficiency => self.efficiency,
            ScoreField::Coverage => self.coverage,
            ScoreField::MatchingBias => self.matching_bias,
        }
    }

    pub(crate) fn set(&mut self, field: ScoreField, value: f64) {
        match field {
            ScoreField::Efficiency => self.efficiency = value,
            ScoreField::Coverage => self.coverage = value,
            ScoreField::MatchingBias => self.matching_bias = value,
        }
    }
}

/// A primer pair with its scores.
///
/// On the wire a record stays the flat row the web application has always
/// exchanged: five elements before normalization, eight afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "FlatRecord", into = "FlatRecord")]
pub struct Record {
    pub forward_primers: Vec<String>,
    pub reverse_primers: Vec<String>,
    pub raw: RawScores,
    pub derived: Option<DerivedSizes>,
}

impl Record {
    pub fn new(
        forward_primers: Vec<String>,
        reverse_primers: Vec<String>,
        efficiency: f64,
        coverage: f64,
        matching_bias: f64,
    ) -> Self {
        Record {
            forward_primers,
            reverse_primers,
            raw: RawScores {
                efficiency,
                coverage,
                matching_bias,
            },
            derived: None,
        }
    }

    pub fn raw_score(&self, field: ScoreField) -> f64 {
        self.raw.get(field)
    }

    /// Bubble size derived from `field`, `None` until the record is normalized.
    pub fn derived_size(&self, field: ScoreField) -> Option<f64> {
        self.derived.map(|d| d.get(field))
    }

    pub fn is_normalized(&self) -> bool {
        self.derived.is_some()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum FlatRecord {
    Normalized(Vec<String>, Vec<String>, f64, f64, f64, f64, f64, f64),
    Raw(Vec<String>, Vec<String>, f64, f64, f64),
}

impl From<FlatRecord> for Record {
    fn from(flat: FlatRecord) -> Self {
        match flat {
            FlatRecord::Raw(fwd, rev, eff, cov, mb) => Record::new(fwd, rev, eff, cov, mb),
            FlatRecord::Normalized(fwd, rev, eff, cov, mb, d_eff, d_cov, d_mb) => {
                let mut record = Record::new(fwd, rev, eff, cov, mb);
                record.derived = Some(DerivedSizes {
                    efficiency: d_eff,
                    coverage: d_cov,
                    matching_bias: d_mb,
                });
                record
            }
        }
    }
}

impl From<Record> for FlatRecord {
    fn from(record: Record) -> Self {
        let RawScores {
            efficiency,
            coverage,
            matching_bias,
        } = record.raw;
        match record.derived {
            None => FlatRecord::Raw(
                record.forward_primers,
                record.reverse_primers,
                efficiency,
                coverage,
                matching_bias,
            ),
            Some(d) => FlatRecord::Normalized(
                record.forward_primers,
                record.reverse_primers,
                efficiency,
                coverage,
                matching_bias,
                d.efficiency,
                d.coverage,
                d.matching_bias,
            ),
        }
    }
}

/// Primer pairs before (`baseline`) and after (`optimized`) optimization.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    #[serde(alias = "init")]
    pub baseline: Vec<Record>,
    #[serde(alias = "out")]
    pub optimized: Vec<Record>,
}

impl ResultSet {
    pub fn new(baseline: Vec<Record>, optimized: Vec<Record>) -> Self {
        ResultSet {
            baseline,
            optimized,
        }
    }

    pub fn collection(&self, which: Collection) -> &[Record] {
        match which {
            Collection::Baseline => &self.baseline,
            Collection::Optimized => &self.optimized,
        }
    }

    pub(crate) fn collection_mut(&mut self, which: Collection) -> &mut Vec<Record> {
        match which {
            Collection::Baseline => &mut self.baseline,
            Collection::Optimized => &mut self.optimized,
        }
    }
}

/// Assignment of scores to the x axis, the y axis and the bubble size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ScoreSelection {
    pub x: ScoreField,
    pub y: ScoreField,
    pub size: ScoreField,
}

impl ScoreSelection {
    /// The axis pairings the report offers, default first.
    pub const PRESETS: [ScoreSelection; 3] = [
        ScoreSelection {
            x: ScoreField::Efficiency,
            y: ScoreField::Coverage,
            size: ScoreField::MatchingBias,
        },
        ScoreSelection {
            x: ScoreField::Efficiency,
            y: ScoreField::MatchingBias,
            size: ScoreField::Coverage,
        },
        ScoreSelection {
            x: ScoreField::Coverage,
            y: ScoreField::MatchingBias,
            size: ScoreField::Efficiency,
        },
    ];

    pub fn new(x: ScoreField, y: ScoreField, size: ScoreField) -> Result<Self> {
        if x == y || x == size {
            return Err(Error::DuplicateScoreField(x));
        }
        if y == size {
            return Err(Error::DuplicateScoreField(y));
        }
        Ok(ScoreSelection { x, y, size })
    }

    /// Builds a selection from flat row indexes, e.g. `[2, 3, 4]`.
    pub fn from_indexes(indexes: [usize; 3]) -> Result<Self> {
        let [x, y, size] = indexes;
        ScoreSelection::new(
            ScoreField::from_index(x)?,
            ScoreField::from_index(y)?,
            ScoreField::from_index(size)?,
        )
    }

    pub fn indexes(&self) -> [usize; 3] {
        [self.x.index(), self.y.index(), self.size.index()]
    }

    /// The field left over once both axes are chosen.
    pub fn remaining(x: ScoreField, y: ScoreField) -> Result<ScoreField> {
        ScoreField::ALL
            .into_iter()
            .find(|f| *f != x && *f != y)
            .filter(|_| x != y)
            .ok_or(Error::DuplicateScoreField(x))
    }
}

impl Default for ScoreSelection {
    fn default() -> Self {
        ScoreSelection::PRESETS[0]
    }
}

impl fmt::Display for ScoreSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {} (size: {})", self.x, self.y, self.size)
    }
}
