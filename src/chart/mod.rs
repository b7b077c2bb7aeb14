use std::collections::HashMap;

use log::debug;
use serde::Serialize;

use crate::error::Result;
use crate::mapper::{self, Point};
use crate::model::{Collection, ResultSet, ScoreField, ScoreSelection};

/// Canvas the report draws the bubble chart on.
pub const CHART_TARGET: &str = "chart_1";

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartData {
    pub datasets: Vec<Dataset>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: &'static str,
    pub data: Vec<Point>,
    pub background_color: String,
    pub point_background_color: String,
    pub border_color: String,
    pub point_border_color: String,
    pub point_stroke_color: String,
}

impl Dataset {
    fn new(collection: Collection, data: Vec<Point>) -> Self {
        let rgb = series_rgb(collection);
        let rgba = |alpha: &str| format!("rgba({rgb},{alpha})");
        Dataset {
            label: collection.series_label(),
            data,
            background_color: rgba("0.2"),
            point_background_color: rgba("0.5"),
            border_color: rgba("0.5"),
            point_border_color: rgba("1"),
            point_stroke_color: rgba("1"),
        }
    }
}

fn series_rgb(collection: Collection) -> &'static str {
    match collection {
        Collection::Baseline => "0,0,255",
        Collection::Optimized => "0,255,0",
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartOptions {
    pub scales: Scales,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scales {
    pub x_axes: Vec<Axis>,
    pub y_axes: Vec<Axis>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    pub scale_label: ScaleLabel,
    pub ticks: Ticks,
}

impl Axis {
    /// Matching-bias runs high to low so "better" points the same way on every axis.
    pub fn for_field(field: ScoreField) -> Self {
        Axis {
            scale_label: ScaleLabel {
                display: true,
                label_string: field.label(),
            },
            ticks: Ticks {
                reverse: field.lower_is_better(),
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleLabel {
    pub display: bool,
    pub label_string: &'static str,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Ticks {
    pub reverse: bool,
}

pub fn build_options(selection: ScoreSelection) -> ChartOptions {
    ChartOptions {
        scales: Scales {
            x_axes: vec![Axis::for_field(selection.x)],
            y_axes: vec![Axis::for_field(selection.y)],
        },
    }
}

/// Mapped points of both collections for one axis pairing.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesPoints {
    pub baseline: Vec<Point>,
    pub optimized: Vec<Point>,
}

impl SeriesPoints {
    pub fn map(results: &ResultSet, selection: ScoreSelection) -> Result<Self> {
        Ok(SeriesPoints {
            baseline: mapper::map_collection(&results.baseline, selection)?,
            optimized: mapper::map_collection(&results.optimized, selection)?,
        })
    }

    pub fn to_config(&self, selection: ScoreSelection) -> ChartConfig {
        ChartConfig {
            kind: "bubble",
            data: ChartData {
                datasets: vec![
                    Dataset::new(Collection::Baseline, self.baseline.clone()),
                    Dataset::new(Collection::Optimized, self.optimized.clone()),
                ],
            },
            options: build_options(selection),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChartInstance {
    pub target: String,
    pub config: ChartConfig,
    /// Number of redraws since creation.
    pub revision: u32,
}

impl ChartInstance {
    fn create(target: &str, config: ChartConfig) -> Self {
        ChartInstance {
            target: target.to_string(),
            config,
            revision: 0,
        }
    }

    fn update(&mut self, config: ChartConfig) {
        self.config = config;
        self.revision += 1;
    }
}

/// Lifecycle of the report's chart: created on first render, then only redrawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartState {
    Absent,
    Present,
}

/// Owns the single chart of a report and the points already mapped for it.
#[derive(Debug)]
pub struct ChartPresenter {
    target: String,
    cache: HashMap<(ScoreField, ScoreField), SeriesPoints>,
    chart: Option<ChartInstance>,
}

impl Default for ChartPresenter {
    fn default() -> Self {
        ChartPresenter::new(CHART_TARGET)
    }
}

impl ChartPresenter {
    pub fn new(target: &str) -> Self {
        ChartPresenter {
            target: target.to_string(),
            cache: HashMap::new(),
            chart: None,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn state(&self) -> ChartState {
        match self.chart {
            None => ChartState::Absent,
            Some(_) => ChartState::Present,
        }
    }

    pub fn instance(&self) -> Option<&ChartInstance> {
        self.chart.as_ref()
    }

    pub fn cached_pairings(&self) -> usize {
        self.cache.len()
    }

    /// Points for `selection`, mapped once per axis pairing.
    ///
    /// Selections never repeat a field, so the pairing fixes the size field too.
    pub fn points(&mut self, results: &ResultSet, selection: ScoreSelection) -> Result<&SeriesPoints> {
        let key = (selection.x, selection.y);
        if !self.cache.contains_key(&key) {
            debug!("mapping points for {selection}");
            let points = SeriesPoints::map(results, selection)?;
            self.cache.insert(key, points);
        } else {
            debug!("reusing points for {selection}");
        }
        Ok(&self.cache[&key])
    }

    pub fn render(&mut self, results: &ResultSet, selection: ScoreSelection) -> Result<&ChartInstance> {
        let config = self.points(results, selection)?.to_config(selection);
        let chart = match self.chart.take() {
            None => {
                debug!("creating chart on '{}'", self.target);
                ChartInstance::create(&self.target, config)
            }
            Some(mut chart) => {
                chart.update(config);
                debug!("redrawing chart on '{}' (revision {})", chart.target, chart.revision);
                chart
            }
        };
        Ok(&*self.chart.insert(chart))
    }
}
