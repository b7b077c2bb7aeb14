pub mod report;

use serde::Serialize;

use crate::chart::CHART_TARGET;
use crate::context::{ChartContext, ChartView};
use crate::error::Result;
use crate::model::{Collection, ResultSet, ScoreField};
use crate::table::{TableOptions, TableView};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Html,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" | "tsv" => Some(Self::Text),
            "json" => Some(Self::Json),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }
}

pub fn infer_format_from_path(path: &str) -> Option<OutputFormat> {
    let lower = path.trim().to_lowercase();
    if lower.ends_with(".json") {
        return Some(OutputFormat::Json);
    }
    if lower.ends_with(".html") || lower.ends_with(".htm") {
        return Some(OutputFormat::Html);
    }
    if lower.ends_with(".txt") || lower.ends_with(".tsv") {
        return Some(OutputFormat::Text);
    }
    None
}

/// Everything the report page needs, in the shape its script consumes.
#[derive(Clone, Debug, Serialize)]
pub struct PageModel {
    pub title: String,
    pub chart_target: &'static str,
    pub active_view: usize,
    pub views: Vec<ChartView>,
    pub tables: Vec<TableView>,
    pub table_options: TableOptions,
}

pub fn build_page(
    context: &mut ChartContext,
    title: &str,
    table_options: TableOptions,
) -> Result<PageModel> {
    let views = context.render_views()?;
    let selection = context.selection();
    let active_view = views
        .iter()
        .position(|v| v.selection == selection)
        .unwrap_or_default();
    let tables = Collection::ALL
        .iter()
        .map(|c| TableView::build(*c, context.results().collection(*c)))
        .collect();
    Ok(PageModel {
        title: title.to_string(),
        chart_target: CHART_TARGET,
        active_view,
        views,
        tables,
        table_options,
    })
}

/// Tab-separated rows: raw scores followed by bubble sizes.
pub fn render_text(results: &ResultSet) -> Vec<u8> {
    let mut out = String::from("collection\tforward_primers\treverse_primers");
    for field in ScoreField::ALL {
        out.push('\t');
        out.push_str(field.label());
    }
    for field in ScoreField::ALL {
        out.push_str("\tsize:");
        out.push_str(field.label());
    }
    out.push('\n');

    for collection in Collection::ALL {
        for record in results.collection(collection) {
            out.push_str(collection.name());
            out.push('\t');
            out.push_str(&record.forward_primers.join(","));
            out.push('\t');
            out.push_str(&record.reverse_primers.join(","));
            for field in ScoreField::ALL {
                out.push_str(&format!("\t{}", record.raw_score(field)));
            }
            for field in ScoreField::ALL {
                match record.derived_size(field) {
                    Some(size) => out.push_str(&format!("\t{size:.3}")),
                    None => out.push('\t'),
                }
            }
            out.push('\n');
        }
    }
    out.into_bytes()
}

pub fn render_json(page: &PageModel) -> Result<Vec<u8>> {
    let mut out = serde_json::to_vec_pretty(page)?;
    out.push(b'\n');
    Ok(out)
}

pub fn render_html(page: &PageModel) -> Result<Vec<u8>> {
    report::render_html(page)
}
