//! Loading primer-design results, either as the JSON result set the web
//! pages exchange or straight from the optimizer's `.primers`/`.scores` files.

pub mod degenerate;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::{Error, Result};
use crate::model::{Record, ResultSet, ScoreField};

/// Separates forward from reverse primers on a `.primers` line.
const PAIR_SEPARATOR: &str = "\tx\t";

pub fn load_result_json(path: &Path) -> Result<ResultSet> {
    let contents = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let results = serde_json::from_str(&contents)?;
    Ok(results)
}

fn with_suffix(prefix: &Path, suffix: &str) -> PathBuf {
    let mut raw: OsString = prefix.as_os_str().to_owned();
    raw.push(suffix);
    PathBuf::from(raw)
}

/// Reads `<prefix>.primers` and `<prefix>.scores`.
pub fn read_run(prefix: &Path) -> Result<Vec<Record>> {
    let primers_path = with_suffix(prefix, ".primers");
    let scores_path = with_suffix(prefix, ".scores");
    let primers =
        std::fs::read_to_string(&primers_path).map_err(|e| Error::io(&primers_path, e))?;
    let scores = std::fs::read_to_string(&scores_path).map_err(|e| Error::io(&scores_path, e))?;
    parse_run(&prefix.display().to_string(), &primers, &scores)
}

pub fn read_result_set(init_prefix: &Path, out_prefix: &Path) -> Result<ResultSet> {
    Ok(ResultSet::new(read_run(init_prefix)?, read_run(out_prefix)?))
}

/// Pairs primer lines with score lines. The first score line holds the score
/// names and is skipped.
pub fn parse_run(origin: &str, primers: &str, scores: &str) -> Result<Vec<Record>> {
    let scores_origin = format!("{origin}.scores");
    let primers_origin = format!("{origin}.primers");

    let mut score_lines = scores.lines();
    if score_lines.next().is_none() {
        return Err(Error::parse(scores_origin, 1, "missing score header line"));
    }

    let primer_count = primers.lines().count();
    let score_count = scores.lines().count() - 1;
    if primer_count != score_count {
        warn!(
            "{origin}: {primer_count} primer pairs but {score_count} score lines, ignoring the surplus"
        );
    }

    let mut records = Vec::with_capacity(primer_count.min(score_count));
    for (i, (primer_line, score_line)) in primers.lines().zip(score_lines).enumerate() {
        let (forward, reverse) = parse_primer_line(primer_line)
            .map_err(|msg| Error::parse(primers_origin.as_str(), i + 1, msg))?;
        let [efficiency, coverage, matching_bias] = parse_score_line(score_line)
            .map_err(|msg| Error::parse(scores_origin.as_str(), i + 2, msg))?;
        records.push(Record::new(
            forward,
            reverse,
            efficiency,
            coverage,
            matching_bias,
        ));
    }
    debug!("{origin}: read {} primer pairs", records.len());
    Ok(records)
}

fn parse_primer_line(line: &str) -> std::result::Result<(Vec<String>, Vec<String>), String> {
    let Some((forward, reverse)) = line.split_once(PAIR_SEPARATOR) else {
        return Err("expected forward and reverse primers separated by 'x'".to_string());
    };
    if reverse.contains(PAIR_SEPARATOR) {
        return Err("more than one 'x' separator".to_string());
    }
    Ok((collapse_primer_set(forward)?, collapse_primer_set(reverse)?))
}

/// One degenerate consensus per primer length.
fn collapse_primer_set(set: &str) -> std::result::Result<Vec<String>, String> {
    let primers: Vec<&str> = set.split('\t').filter(|p| !p.is_empty()).collect();
    degenerate::cluster_by_length(&primers)
        .iter()
        .map(|cluster| degenerate::degenerate_consensus(cluster))
        .collect()
}

fn parse_score_line(line: &str) -> std::result::Result<[f64; 3], String> {
    let values = line
        .split('\t')
        .map(|raw| {
            raw.trim()
                .parse::<f64>()
                .map_err(|e| format!("invalid score '{}': {e}", raw.trim()))
        })
        .collect::<std::result::Result<Vec<f64>, String>>()?;
    match values.as_slice() {
        [efficiency, coverage, matching_bias] => Ok([*efficiency, *coverage, *matching_bias]),
        other => Err(format!(
            "expected {} scores, found {}",
            ScoreField::ALL.len(),
            other.len()
        )),
    }
}
