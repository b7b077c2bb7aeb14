//! Min-max rescaling of scores into bubble sizes.
//!
//! Every score is rescaled per collection into `[MIN_BUBBLE_SIZE, MAX_BUBBLE_SIZE]`.
//! Matching-bias is inverted so that the better (lower) value draws the
//! larger bubble, like the two maximized scores.

use itertools::{Itertools, MinMaxResult};
use log::debug;

use crate::error::{Error, Result};
use crate::model::{Collection, DerivedSizes, Record, ResultSet, ScoreField};

pub const MIN_BUBBLE_SIZE: f64 = 5.0;
pub const BUBBLE_SIZE_SPAN: f64 = 9.0;
pub const MAX_BUBBLE_SIZE: f64 = MIN_BUBBLE_SIZE + BUBBLE_SIZE_SPAN;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoreBounds {
    pub min: f64,
    pub max: f64,
}

impl ScoreBounds {
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Bubble size for `value`. Callers guarantee `range()` is finite and positive.
    pub fn size_of(&self, field: ScoreField, value: f64) -> f64 {
        let scaled = (value - self.min) / self.range() * BUBBLE_SIZE_SPAN;
        if field.lower_is_better() {
            MAX_BUBBLE_SIZE - scaled
        } else {
            scaled + MIN_BUBBLE_SIZE
        }
    }
}

/// Bounds of the three scores over one collection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollectionBounds {
    pub efficiency: ScoreBounds,
    pub coverage: ScoreBounds,
    pub matching_bias: ScoreBounds,
}

impl CollectionBounds {
    /// Scans `records` and fails on anything that would yield a non-finite size.
    pub fn scan(collection: Collection, records: &[Record]) -> Result<Self> {
        if records.is_empty() {
            return Err(Error::EmptyCollection { collection });
        }
        if records.iter().any(Record::is_normalized) {
            return Err(Error::AlreadyNormalized { collection });
        }

        let mut bounds = [ScoreBounds { min: 0.0, max: 0.0 }; 3];
        for (slot, field) in bounds.iter_mut().zip(ScoreField::ALL) {
            *slot = field_bounds(collection, field, records)?;
        }
        let [efficiency, coverage, matching_bias] = bounds;
        Ok(CollectionBounds {
            efficiency,
            coverage,
            matching_bias,
        })
    }

    pub fn get(&self, field: ScoreField) -> ScoreBounds {
        match field {
            ScoreField::Efficiency => self.efficiency,
            ScoreField::Coverage => self.coverage,
            ScoreField::MatchingBias => self.matching_bias,
        }
    }

    pub fn sizes_for(&self, record: &Record) -> DerivedSizes {
        let mut sizes = DerivedSizes::default();
        for field in ScoreField::ALL {
            sizes.set(field, self.get(field).size_of(field, record.raw_score(field)));
        }
        sizes
    }
}

fn field_bounds(collection: Collection, field: ScoreField, records: &[Record]) -> Result<ScoreBounds> {
    if let Some((index, value)) = records
        .iter()
        .map(|r| r.raw_score(field))
        .enumerate()
        .find(|(_, v)| !v.is_finite())
    {
        return Err(Error::NonFiniteScore {
            collection,
            field,
            index,
            value,
        });
    }

    let bounds = match records.iter().map(|r| r.raw_score(field)).minmax() {
        MinMaxResult::MinMax(min, max) => ScoreBounds { min, max },
        MinMaxResult::OneElement(v) => ScoreBounds { min: v, max: v },
        MinMaxResult::NoElements => return Err(Error::EmptyCollection { collection }),
    };
    if bounds.range() <= 0.0 {
        return Err(Error::DegenerateRange {
            collection,
            field,
            value: bounds.min,
        });
    }
    if !bounds.range().is_finite() {
        return Err(Error::UnboundedRange {
            collection,
            field,
            min: bounds.min,
            max: bounds.max,
        });
    }
    Ok(bounds)
}

/// Bounds of both collections, computed before anything is written.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalizationPlan {
    pub baseline: CollectionBounds,
    pub optimized: CollectionBounds,
}

impl NormalizationPlan {
    pub fn for_results(results: &ResultSet) -> Result<Self> {
        Ok(NormalizationPlan {
            baseline: CollectionBounds::scan(Collection::Baseline, &results.baseline)?,
            optimized: CollectionBounds::scan(Collection::Optimized, &results.optimized)?,
        })
    }

    pub fn bounds(&self, collection: Collection) -> &CollectionBounds {
        match collection {
            Collection::Baseline => &self.baseline,
            Collection::Optimized => &self.optimized,
        }
    }

    pub fn apply(&self, results: &mut ResultSet) {
        for collection in Collection::ALL {
            let bounds = self.bounds(collection);
            debug!("{collection} bounds: {bounds:?}");
            for record in results.collection_mut(collection).iter_mut() {
                record.derived = Some(bounds.sizes_for(record));
            }
        }
    }
}

/// Attaches bubble sizes to every record of both collections.
///
/// Either both collections are normalized or, on error, neither is touched.
pub fn normalize(results: &mut ResultSet) -> Result<()> {
    let plan = NormalizationPlan::for_results(results)?;
    plan.apply(results);
    Ok(())
}
