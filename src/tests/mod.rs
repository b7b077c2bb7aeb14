use pretty_assertions::assert_eq;

use crate::chart::{build_options, ChartPresenter, ChartState, CHART_TARGET};
use crate::context::ChartContext;
use crate::error::Error;
use crate::mapper::{map_record, tooltip_lines};
use crate::model::{Collection, Record, ResultSet, ScoreField, ScoreSelection};
use crate::normalize::{normalize, MAX_BUBBLE_SIZE, MIN_BUBBLE_SIZE};
use crate::output;
use crate::table::TableOptions;

fn rec(fwd: &str, rev: &str, eff: f64, cov: f64, mb: f64) -> Record {
    Record::new(vec![fwd.to_string()], vec![rev.to_string()], eff, cov, mb)
}

fn sample() -> ResultSet {
    ResultSet::new(
        vec![rec("F1", "R1", 1.0, 10.0, 0.1), rec("F2", "R2", 5.0, 20.0, 0.5)],
        vec![
            rec("F3", "R3", 6.0, 30.0, 0.2),
            rec("F4", "R4", 8.0, 35.0, 0.05),
            rec("F5", "R5", 7.0, 32.0, 0.4),
        ],
    )
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn efficiency_example_spans_five_to_fourteen() {
    let mut results = sample();
    normalize(&mut results).unwrap();
    let sizes: Vec<f64> = results
        .baseline
        .iter()
        .map(|r| r.derived_size(ScoreField::Efficiency).unwrap())
        .collect();
    assert_eq!(sizes, vec![5.0, 14.0]);
}

#[test]
fn derived_sizes_stay_within_bubble_range() {
    let mut results = sample();
    normalize(&mut results).unwrap();
    for collection in Collection::ALL {
        for record in results.collection(collection) {
            for field in ScoreField::ALL {
                let size = record.derived_size(field).unwrap();
                assert!(
                    (MIN_BUBBLE_SIZE - 1e-9..=MAX_BUBBLE_SIZE + 1e-9).contains(&size),
                    "{collection} {field} size {size} out of range"
                );
            }
        }
    }
}

#[test]
fn matching_bias_sizes_decrease_as_bias_grows() {
    let mut results = sample();
    normalize(&mut results).unwrap();
    let records = &results.optimized;
    for a in records {
        for b in records {
            let (ra, rb) = (
                a.raw_score(ScoreField::MatchingBias),
                b.raw_score(ScoreField::MatchingBias),
            );
            if ra < rb {
                assert!(
                    a.derived_size(ScoreField::MatchingBias).unwrap()
                        >= b.derived_size(ScoreField::MatchingBias).unwrap()
                );
            }
        }
    }
    let lowest = &records[1];
    assert!(close(
        lowest.derived_size(ScoreField::MatchingBias).unwrap(),
        MAX_BUBBLE_SIZE
    ));
}

#[test]
fn maximized_scores_grow_with_their_raw_value() {
    let mut results = sample();
    normalize(&mut results).unwrap();
    for field in [ScoreField::Efficiency, ScoreField::Coverage] {
        for a in &results.optimized {
            for b in &results.optimized {
                if a.raw_score(field) < b.raw_score(field) {
                    assert!(a.derived_size(field).unwrap() <= b.derived_size(field).unwrap());
                }
            }
        }
    }
}

#[test]
fn second_normalization_is_rejected_and_changes_nothing() {
    let mut results = sample();
    normalize(&mut results).unwrap();
    let snapshot = results.clone();
    let err = normalize(&mut results).unwrap_err();
    assert!(matches!(
        err,
        Error::AlreadyNormalized {
            collection: Collection::Baseline
        }
    ));
    assert_eq!(results, snapshot);
}

#[test]
fn augmented_rows_from_json_are_not_normalized_again() {
    let json = r#"{"baseline":[[["F"],["R"],1,2,3,5,5,14],[["G"],["S"],2,3,4,14,14,5]],
                   "optimized":[[["F"],["R"],1,2,3],[["G"],["S"],2,3,4]]}"#;
    let mut results: ResultSet = serde_json::from_str(json).unwrap();
    let before = results.clone();
    assert!(normalize(&mut results).is_err());
    assert_eq!(results, before);
}

#[test]
fn empty_collection_fails_before_anything_is_written() {
    let mut results = sample();
    results.optimized.clear();
    let err = normalize(&mut results).unwrap_err();
    assert!(matches!(
        err,
        Error::EmptyCollection {
            collection: Collection::Optimized
        }
    ));
    assert!(results.baseline.iter().all(|r| !r.is_normalized()));
}

#[test]
fn zero_spread_is_reported_instead_of_nan() {
    let mut results = sample();
    for record in &mut results.optimized {
        record.raw.coverage = 42.0;
    }
    match normalize(&mut results).unwrap_err() {
        Error::DegenerateRange {
            collection,
            field,
            value,
        } => {
            assert_eq!(collection, Collection::Optimized);
            assert_eq!(field, ScoreField::Coverage);
            assert_eq!(value, 42.0);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(results.baseline.iter().all(|r| !r.is_normalized()));
}

#[test]
fn spread_too_wide_for_f64_is_rejected() {
    let mut results = sample();
    results.baseline[0].raw.efficiency = -1e308;
    results.baseline[1].raw.efficiency = 1e308;
    match normalize(&mut results).unwrap_err() {
        Error::UnboundedRange {
            collection, field, ..
        } => {
            assert_eq!(collection, Collection::Baseline);
            assert_eq!(field, ScoreField::Efficiency);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(results.baseline.iter().all(|r| !r.is_normalized()));
}

#[test]
fn huge_but_finite_spread_still_yields_finite_sizes() {
    let mut results = sample();
    results.baseline[0].raw.efficiency = -1e308;
    results.baseline[1].raw.efficiency = 0.0;
    normalize(&mut results).unwrap();
    for record in &results.baseline {
        let size = record.derived_size(ScoreField::Efficiency).unwrap();
        assert!(size.is_finite());
        assert!((MIN_BUBBLE_SIZE..=MAX_BUBBLE_SIZE).contains(&size));
    }
    assert_eq!(results.baseline[0].derived_size(ScoreField::Efficiency), Some(5.0));
}

#[test]
fn non_finite_scores_are_rejected() {
    let mut results = sample();
    results.baseline[1].raw.efficiency = f64::NAN;
    assert!(matches!(
        normalize(&mut results),
        Err(Error::NonFiniteScore {
            collection: Collection::Baseline,
            field: ScoreField::Efficiency,
            index: 1,
            ..
        })
    ));
}

#[test]
fn map_record_reads_axes_raw_and_size_derived() {
    let mut results = sample();
    normalize(&mut results).unwrap();
    let selection =
        ScoreSelection::new(ScoreField::Coverage, ScoreField::Efficiency, ScoreField::MatchingBias)
            .unwrap();
    let point = map_record(&results.baseline[0], selection).unwrap();
    assert_eq!(point.x, 10.0);
    assert_eq!(point.y, 1.0);
    assert_eq!(point.r, 14.0);
}

#[test]
fn matching_bias_size_is_the_last_flat_column() {
    let mut results = sample();
    normalize(&mut results).unwrap();
    let record = &results.baseline[0];
    let flat = serde_json::to_value(record).unwrap();
    let selection = ScoreSelection::default();
    assert_eq!(selection.size, ScoreField::MatchingBias);
    let point = map_record(record, selection).unwrap();
    assert_eq!(flat[ScoreField::MatchingBias.index() + 3].as_f64(), Some(point.r));
    assert_eq!(flat.as_array().map(Vec::len), Some(8));
}

#[test]
fn map_record_is_pure() {
    let mut results = sample();
    normalize(&mut results).unwrap();
    let record = results.optimized[2].clone();
    let selection = ScoreSelection::PRESETS[2];
    let first = map_record(&record, selection).unwrap();
    let second = map_record(&record, selection).unwrap();
    assert_eq!(first, second);
    assert_eq!(record, results.optimized[2]);
}

#[test]
fn map_record_requires_normalized_records() {
    let record = rec("F", "R", 1.0, 2.0, 3.0);
    assert!(matches!(
        map_record(&record, ScoreSelection::default()),
        Err(Error::NotNormalized)
    ));
}

#[test]
fn tooltip_lists_all_scores_whatever_the_axes() {
    let record = Record::new(
        vec!["ACGT".into(), "ACGA".into()],
        vec!["TTTT".into()],
        1.0,
        10.0,
        0.1,
    );
    assert_eq!(
        tooltip_lines(&record),
        vec![
            "Forward primers: ACGT  ACGA",
            "Reverse primers: TTTT",
            "Efficiency: 1",
            "Coverage: 10",
            "Matching-bias: 0.1",
        ]
    );
}

#[test]
fn only_matching_bias_axes_are_reversed() {
    let selection =
        ScoreSelection::new(ScoreField::Coverage, ScoreField::MatchingBias, ScoreField::Efficiency)
            .unwrap();
    let options = build_options(selection);
    assert!(!options.scales.x_axes[0].ticks.reverse);
    assert!(options.scales.y_axes[0].ticks.reverse);
    assert_eq!(options.scales.x_axes[0].scale_label.label_string, "Coverage");
    assert_eq!(options.scales.y_axes[0].scale_label.label_string, "Matching-bias");
}

#[test]
fn chart_config_serializes_in_chartjs_shape() {
    let mut results = sample();
    normalize(&mut results).unwrap();
    let mut presenter = ChartPresenter::default();
    let chart = presenter.render(&results, ScoreSelection::default()).unwrap();
    let json = serde_json::to_value(&chart.config).unwrap();

    assert_eq!(json["type"], "bubble");
    let datasets = json["data"]["datasets"].as_array().unwrap();
    assert_eq!(datasets.len(), 2);
    assert_eq!(datasets[0]["label"], "Initial primer pairs");
    assert_eq!(datasets[0]["backgroundColor"], "rgba(0,0,255,0.2)");
    assert_eq!(datasets[1]["label"], "Optimized primer pairs");
    assert_eq!(datasets[1]["pointBorderColor"], "rgba(0,255,0,1)");
    assert_eq!(datasets[1]["data"].as_array().unwrap().len(), 3);
    assert_eq!(
        json["options"]["scales"]["xAxes"][0]["scaleLabel"]["labelString"],
        "Efficiency"
    );
    assert_eq!(json["options"]["scales"]["yAxes"][0]["ticks"]["reverse"], false);
}

#[test]
fn presenter_creates_once_then_redraws() {
    let mut results = sample();
    normalize(&mut results).unwrap();
    let mut presenter = ChartPresenter::default();
    assert_eq!(presenter.state(), ChartState::Absent);

    let chart = presenter.render(&results, ScoreSelection::PRESETS[0]).unwrap();
    assert_eq!(chart.target, CHART_TARGET);
    assert_eq!(chart.revision, 0);
    assert_eq!(presenter.state(), ChartState::Present);

    presenter.render(&results, ScoreSelection::PRESETS[1]).unwrap();
    let chart = presenter.render(&results, ScoreSelection::PRESETS[0]).unwrap();
    assert_eq!(chart.revision, 2);
    assert_eq!(
        chart.config.options.scales.y_axes[0].scale_label.label_string,
        "Coverage"
    );
    assert_eq!(presenter.cached_pairings(), 2);
}

#[test]
fn cached_points_survive_changes_to_the_result_set() {
    let mut results = sample();
    normalize(&mut results).unwrap();
    let mut presenter = ChartPresenter::default();
    let before = presenter
        .points(&results, ScoreSelection::default())
        .unwrap()
        .clone();

    results.baseline[0].raw.efficiency = 3.0;
    let after = presenter.points(&results, ScoreSelection::default()).unwrap();
    assert_eq!(&before, after);
}

#[test]
fn context_renders_every_preset_and_ends_on_its_selection() {
    let selection = ScoreSelection::PRESETS[1];
    let mut context = ChartContext::new(sample()).unwrap().with_selection(selection);
    assert_eq!(context.chart_state(), ChartState::Absent);

    let views = context.render_views().unwrap();
    assert_eq!(views.len(), 3);
    assert_eq!(views[2].title, "Coverage x Matching-bias");
    let chart = context.chart().unwrap();
    assert_eq!(chart.config, views[1].config);
    assert_eq!(chart.revision, 3);
    assert_eq!(context.presenter().cached_pairings(), 3);
}

#[test]
fn selecting_a_pairing_redraws_the_existing_chart() {
    let mut context = ChartContext::new(sample()).unwrap();
    context.render().unwrap();
    let chart = context.select(ScoreSelection::PRESETS[2]).unwrap();
    assert_eq!(chart.revision, 1);
    assert!(chart.config.options.scales.y_axes[0].ticks.reverse);
    assert_eq!(context.selection(), ScoreSelection::PRESETS[2]);
    assert_eq!(context.chart_state(), ChartState::Present);
}

#[test]
fn context_adds_a_view_for_a_custom_selection() {
    let custom =
        ScoreSelection::new(ScoreField::MatchingBias, ScoreField::Coverage, ScoreField::Efficiency)
            .unwrap();
    let mut context = ChartContext::new(sample()).unwrap();
    let chart = context.select(custom).unwrap();
    assert_eq!(chart.revision, 0);
    let page = output::build_page(&mut context, "t", TableOptions::default()).unwrap();
    assert_eq!(page.views.len(), 4);
    assert_eq!(page.active_view, 3);
    assert!(page.views[3].config.options.scales.x_axes[0].ticks.reverse);
}

#[test]
fn context_refuses_unusable_results() {
    let mut results = sample();
    results.baseline.truncate(1);
    assert!(matches!(
        ChartContext::new(results),
        Err(Error::DegenerateRange {
            collection: Collection::Baseline,
            ..
        })
    ));
}

#[test]
fn html_page_wires_chart_and_tables() {
    let mut context = ChartContext::new(sample()).unwrap();
    let page = output::build_page(&mut context, "Run <42>", TableOptions::default()).unwrap();
    let html = String::from_utf8(output::render_html(&page).unwrap()).unwrap();
    assert!(html.contains("<canvas id=\"chart_1\"></canvas>"));
    assert!(html.contains("id=\"T_table_init\""));
    assert!(html.contains("id=\"T_table_out\""));
    assert!(html.contains("<title>Run &lt;42&gt;</title>"));
    assert!(html.contains("\"pageLength\":50"));
    assert!(html.contains("\"buttons\":[\"copy\",\"pdf\",\"excel\"]"));
}

#[test]
fn json_page_carries_views_and_table_options() {
    let mut context = ChartContext::new(sample()).unwrap();
    let page = output::build_page(&mut context, "t", TableOptions::default().with_page_length(25))
        .unwrap();
    let json: serde_json::Value =
        serde_json::from_slice(&output::render_json(&page).unwrap()).unwrap();
    assert_eq!(json["chart_target"], "chart_1");
    assert_eq!(json["active_view"], 0);
    assert_eq!(json["views"][0]["selection"]["size"], "matching-bias");
    assert_eq!(json["table_options"]["pageLength"], 25);
    assert_eq!(json["tables"][1]["id"], "T_table_out");
}

#[test]
fn text_output_lists_raw_scores_and_sizes() {
    let mut results = sample();
    normalize(&mut results).unwrap();
    let text = String::from_utf8(output::render_text(&results)).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next().unwrap(),
        "collection\tforward_primers\treverse_primers\tEfficiency\tCoverage\tMatching-bias\t\
         size:Efficiency\tsize:Coverage\tsize:Matching-bias"
    );
    assert_eq!(
        lines.next().unwrap(),
        "baseline\tF1\tR1\t1\t10\t0.1\t5.000\t5.000\t14.000"
    );
    assert_eq!(text.lines().count(), 6);
}

#[test]
fn output_format_is_inferred_from_extension() {
    use crate::output::{infer_format_from_path, OutputFormat};
    assert_eq!(infer_format_from_path("r.HTML"), Some(OutputFormat::Html));
    assert_eq!(infer_format_from_path("r.tsv"), Some(OutputFormat::Text));
    assert_eq!(infer_format_from_path("r.pdf"), None);
    assert_eq!(OutputFormat::parse(" Json "), Some(OutputFormat::Json));
}
