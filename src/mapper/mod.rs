use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::{Record, ScoreField, ScoreSelection};

/// A bubble as Chart.js expects it, plus the tooltip lines.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub r: f64,
    pub label: Vec<String>,
}

pub fn map_record(record: &Record, selection: ScoreSelection) -> Result<Point> {
    let r = record
        .derived_size(selection.size)
        .ok_or(Error::NotNormalized)?;
    Ok(Point {
        x: record.raw_score(selection.x),
        y: record.raw_score(selection.y),
        r,
        label: tooltip_lines(record),
    })
}

pub fn map_collection(records: &[Record], selection: ScoreSelection) -> Result<Vec<Point>> {
    records.iter().map(|r| map_record(r, selection)).collect()
}

/// Always all five fields, whichever scores are on the axes.
pub fn tooltip_lines(record: &Record) -> Vec<String> {
    let mut lines = Vec::with_capacity(2 + ScoreField::ALL.len());
    lines.push(format!(
        "Forward primers: {}",
        record.forward_primers.join("  ")
    ));
    lines.push(format!(
        "Reverse primers: {}",
        record.reverse_primers.join("  ")
    ));
    for field in ScoreField::ALL {
        lines.push(format!("{}: {}", field.label(), record.raw_score(field)));
    }
    lines
}
