use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use clap::{error::ErrorKind, Parser};
use colored::Colorize;
use log::{info, LevelFilter};

use crate::cli::args::CliArgs;
use crate::cli::validation;
use crate::config::{self, ConfigFile};
use crate::context::ChartContext;
use crate::error::{Error, Result};
use crate::ingest;
use crate::model::{Collection, ResultSet, ScoreField, ScoreSelection};
use crate::output::{self, OutputFormat};
use crate::table::{TableOptions, PAGE_LENGTH};

const DEFAULT_TITLE: &str = "Primer pairs: initial vs optimized";

fn print_banner() {
    eprintln!(
        "{} v{}",
        "mopoviz".bold(),
        env!("CARGO_PKG_VERSION").dimmed()
    );
}

fn format_kv_line(label: &str, value: &str) {
    eprintln!(":: {:<10}: {}", label, value);
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .try_init();
}

#[derive(Clone, Debug, PartialEq)]
enum InputSource {
    Json(PathBuf),
    Runs { init: PathBuf, out: PathBuf },
}

impl InputSource {
    fn describe(&self) -> String {
        match self {
            InputSource::Json(path) => path.display().to_string(),
            InputSource::Runs { init, out } => {
                format!("{} / {}", init.display(), out.display())
            }
        }
    }

    fn load(&self) -> Result<ResultSet> {
        match self {
            InputSource::Json(path) => ingest::load_result_json(path),
            InputSource::Runs { init, out } => ingest::read_result_set(init, out),
        }
    }
}

#[derive(Clone, Debug)]
struct RunConfig {
    input: InputSource,
    selection: ScoreSelection,
    output: Option<PathBuf>,
    output_format: OutputFormat,
    title: String,
    page_length: usize,
    no_color: bool,
}

fn parse_field(flag: &str, raw: Option<String>) -> Result<Option<ScoreField>> {
    raw.map(|raw| {
        raw.parse::<ScoreField>()
            .map_err(|e| Error::Config(format!("invalid {flag} '{raw}': {e}")))
    })
    .transpose()
}

/// Fields given on the command line are kept as is. A configured field is used
/// only when no earlier pick already took it. Whatever is still unset gets its
/// default pairing, or the first score not yet on the chart.
fn resolve_selection(
    cli: [Option<ScoreField>; 3],
    configured: [Option<ScoreField>; 3],
) -> Result<ScoreSelection> {
    let mut slots = cli;
    for (i, field) in configured.into_iter().enumerate() {
        if let Some(field) = field {
            if slots[i].is_none() && !slots.contains(&Some(field)) {
                slots[i] = Some(field);
            }
        }
    }

    let default = ScoreSelection::default();
    let preferred = [default.x, default.y, default.size];
    for i in 0..slots.len() {
        if slots[i].is_some() {
            continue;
        }
        let pick = if slots.contains(&Some(preferred[i])) {
            ScoreField::ALL
                .into_iter()
                .find(|f| !slots.contains(&Some(*f)))
        } else {
            Some(preferred[i])
        };
        slots[i] = pick;
    }

    match slots {
        [Some(x), Some(y), Some(size)] => ScoreSelection::new(x, y, size),
        _ => Err(Error::Config(
            "cannot pick three distinct scores for the chart".to_string(),
        )),
    }
}

fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig> {
    validation::validate(&args).map_err(Error::Config)?;

    let result = args.result.or(if args.init.is_some() { None } else { cfg.result });
    let init = args.init.or(cfg.init);
    let out = args.out.or(cfg.out);
    let input = match (result, init, out) {
        (Some(result), _, _) => InputSource::Json(config::expand_tilde(&result)),
        (None, Some(init), Some(out)) => InputSource::Runs {
            init: config::expand_tilde(&init),
            out: config::expand_tilde(&out),
        },
        _ => {
            return Err(Error::Config(
                "no input, pass --result FILE or --init PREFIX --out PREFIX".to_string(),
            ))
        }
    };

    let selection = resolve_selection(
        [
            parse_field("--x-axis", args.x_axis)?,
            parse_field("--y-axis", args.y_axis)?,
            parse_field("--size", args.size)?,
        ],
        [
            parse_field("x_axis", cfg.x_axis)?,
            parse_field("y_axis", cfg.y_axis)?,
            parse_field("size", cfg.size)?,
        ],
    )?;

    let output_path = args.output.or(cfg.output);
    let output_format = match args.output_format.or(cfg.output_format) {
        Some(raw) => OutputFormat::parse(&raw).ok_or_else(|| {
            Error::Config(format!(
                "invalid output format '{raw}', expected html, json or text"
            ))
        })?,
        None => output_path
            .as_deref()
            .and_then(output::infer_format_from_path)
            .unwrap_or(OutputFormat::Html),
    };

    let page_length = args.page_length.or(cfg.page_length).unwrap_or(PAGE_LENGTH);
    if page_length == 0 {
        return Err(Error::Config(
            "invalid page_length, expected positive integer".to_string(),
        ));
    }

    Ok(RunConfig {
        input,
        selection,
        output: output_path.map(|p| config::expand_tilde(&p)),
        output_format,
        title: args
            .title
            .or(cfg.title)
            .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        page_length,
        no_color: args.no_color || cfg.no_color.unwrap_or(false),
    })
}

fn format_name(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Text => "text",
        OutputFormat::Json => "json",
        OutputFormat::Html => "html",
    }
}

fn render(run: &RunConfig, results: ResultSet) -> Result<Vec<u8>> {
    let mut context = ChartContext::new(results)?.with_selection(run.selection);
    match run.output_format {
        OutputFormat::Text => Ok(output::render_text(context.results())),
        OutputFormat::Json | OutputFormat::Html => {
            let options = TableOptions::default().with_page_length(run.page_length);
            let page = output::build_page(&mut context, &run.title, options)?;
            info!(
                "rendered {} chart views on '{}'",
                page.views.len(),
                page.chart_target
            );
            if run.output_format == OutputFormat::Json {
                output::render_json(&page)
            } else {
                output::render_html(&page)
            }
        }
    }
}

fn run(run: RunConfig) -> Result<()> {
    if run.no_color {
        colored::control::set_override(false);
    }
    print_banner();
    let now = Instant::now();

    format_kv_line("Input", &run.input.describe());
    format_kv_line("Chart", &run.selection.to_string());
    format_kv_line("Format", format_name(run.output_format));

    let results = run.input.load()?;
    for collection in Collection::ALL {
        format_kv_line(
            collection.name(),
            &format!("{} primer pairs", results.collection(collection).len()),
        );
    }

    let bytes = render(&run, results)?;
    match run.output.as_ref() {
        Some(path) => {
            std::fs::write(path, &bytes).map_err(|e| Error::io(path, e))?;
            format_kv_line("Output", &path.display().to_string());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(&bytes)
                .and_then(|_| stdout.flush())
                .map_err(|e| Error::io("<stdout>", e))?;
        }
    }

    eprintln!(
        "{} report took {}ms ::",
        ":: Completed ::".green(),
        now.elapsed().as_millis()
    );
    Ok(())
}

pub fn run_cli() -> Result<()> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                let _ = e.print();
                return Ok(());
            }
            _ => return Err(Error::Config(e.to_string())),
        },
    };
    init_logging(args.verbose);

    let explicit_config = args.config.as_deref().map(config::expand_tilde);
    if args.init_config {
        let path = explicit_config
            .or_else(config::default_config_path)
            .ok_or_else(|| Error::Config("cannot locate a home directory".to_string()))?;
        config::ensure_default_config_file(&path)?;
        println!("{}", path.display());
        return Ok(());
    }

    let cfg = match explicit_config {
        Some(path) => config::load_config(&path, false)?,
        None => match config::default_config_path() {
            Some(path) => config::load_config(&path, true)?,
            None => ConfigFile::default(),
        },
    };

    let run_config = build_run_config(args, cfg)?;
    run(run_config)
}
