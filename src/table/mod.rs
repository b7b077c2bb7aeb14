use itertools::Itertools;
use serde::Serialize;

use crate::model::{Collection, Record, ScoreField};

pub const PAGE_LENGTH: usize = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportButton {
    Copy,
    Pdf,
    Excel,
}

/// DataTables initialisation options shared by both tables.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableOptions {
    pub page_length: usize,
    pub select: bool,
    pub dom: &'static str,
    pub buttons: Vec<ExportButton>,
}

impl Default for TableOptions {
    fn default() -> Self {
        TableOptions {
            page_length: PAGE_LENGTH,
            select: true,
            dom: "Bfrtip",
            buttons: vec![ExportButton::Copy, ExportButton::Pdf, ExportButton::Excel],
        }
    }
}

impl TableOptions {
    pub fn with_page_length(mut self, page_length: usize) -> Self {
        self.page_length = page_length;
        self
    }
}

pub fn table_id(collection: Collection) -> &'static str {
    match collection {
        Collection::Baseline => "T_table_init",
        Collection::Optimized => "T_table_out",
    }
}

pub fn column_names() -> Vec<&'static str> {
    let mut names = vec!["Forward primers", "Reverse primers"];
    names.extend(ScoreField::ALL.iter().map(|f| f.label()));
    names
}

/// Highlight of the best and worst value in each score column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Emphasis {
    None,
    Best,
    Worst,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScoreCell {
    pub value: f64,
    pub emphasis: Emphasis,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TableRow {
    pub forward_primers: String,
    pub reverse_primers: String,
    pub scores: Vec<ScoreCell>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TableView {
    pub id: &'static str,
    pub collection: Collection,
    pub columns: Vec<&'static str>,
    pub rows: Vec<TableRow>,
}

impl TableView {
    pub fn build(collection: Collection, records: &[Record]) -> Self {
        let extremes: Vec<Option<(f64, f64)>> = ScoreField::ALL
            .iter()
            .map(|field| column_extremes(records, *field))
            .collect();

        let rows = records
            .iter()
            .map(|record| TableRow {
                forward_primers: record.forward_primers.join("\n"),
                reverse_primers: record.reverse_primers.join("\n"),
                scores: ScoreField::ALL
                    .iter()
                    .zip(&extremes)
                    .map(|(field, bounds)| {
                        let value = record.raw_score(*field);
                        ScoreCell {
                            value,
                            emphasis: emphasis_of(*field, value, *bounds),
                        }
                    })
                    .collect(),
            })
            .collect();

        TableView {
            id: table_id(collection),
            collection,
            columns: column_names(),
            rows,
        }
    }
}

fn column_extremes(records: &[Record], field: ScoreField) -> Option<(f64, f64)> {
    records
        .iter()
        .map(|r| r.raw_score(field))
        .minmax_by(f64::total_cmp)
        .into_option()
}

fn emphasis_of(field: ScoreField, value: f64, bounds: Option<(f64, f64)>) -> Emphasis {
    let Some((lo, hi)) = bounds else {
        return Emphasis::None;
    };
    let (best, worst) = if field.lower_is_better() {
        (lo, hi)
    } else {
        (hi, lo)
    };
    if value == best {
        Emphasis::Best
    } else if value == worst {
        Emphasis::Worst
    } else {
        Emphasis::None
    }
}
