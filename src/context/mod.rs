use serde::Serialize;

use crate::chart::{ChartConfig, ChartInstance, ChartPresenter, ChartState};
use crate::error::Result;
use crate::model::{ResultSet, ScoreSelection};
use crate::normalize;

/// One axis pairing the report can switch to.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartView {
    pub selection: ScoreSelection,
    pub title: String,
    pub config: ChartConfig,
}

/// Everything a report needs between renders: the normalized results, the
/// current score selection and the chart presenter.
#[derive(Debug)]
pub struct ChartContext {
    results: ResultSet,
    selection: ScoreSelection,
    presenter: ChartPresenter,
}

impl ChartContext {
    /// Normalizes `results` and starts on the default selection with no chart.
    pub fn new(mut results: ResultSet) -> Result<Self> {
        normalize::normalize(&mut results)?;
        Ok(ChartContext {
            results,
            selection: ScoreSelection::default(),
            presenter: ChartPresenter::default(),
        })
    }

    pub fn with_selection(mut self, selection: ScoreSelection) -> Self {
        self.selection = selection;
        self
    }

    pub fn results(&self) -> &ResultSet {
        &self.results
    }

    pub fn selection(&self) -> ScoreSelection {
        self.selection
    }

    /// Switches the chart to `selection`, redrawing it.
    pub fn select(&mut self, selection: ScoreSelection) -> Result<&ChartInstance> {
        self.selection = selection;
        self.render()
    }

    pub fn chart(&self) -> Option<&ChartInstance> {
        self.presenter.instance()
    }

    pub fn chart_state(&self) -> ChartState {
        self.presenter.state()
    }

    pub fn presenter(&self) -> &ChartPresenter {
        &self.presenter
    }

    pub fn render(&mut self) -> Result<&ChartInstance> {
        self.presenter.render(&self.results, self.selection)
    }

    /// Renders every preset pairing, plus the current selection when it is
    /// not a preset, and ends on the current selection.
    pub fn render_views(&mut self) -> Result<Vec<ChartView>> {
        let mut selections = ScoreSelection::PRESETS.to_vec();
        if !selections.contains(&self.selection) {
            selections.push(self.selection);
        }

        let mut views = Vec::with_capacity(selections.len());
        for selection in selections {
            let chart = self.presenter.render(&self.results, selection)?;
            views.push(ChartView {
                selection,
                title: format!("{} x {}", selection.x, selection.y),
                config: chart.config.clone(),
            });
        }
        self.render()?;
        Ok(views)
    }
}
