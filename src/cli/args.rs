use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "mopoviz",
    version,
    about = "bubble-chart reports for mopo16s primer-design results",
    long_about = "mopoviz turns the initial and optimized primer pairs of a mopo16s run into a report: a bubble chart comparing both sets and two exportable tables.\n\nExamples:\n  mopoviz --result result.json -o report.html\n  mopoviz --init run/init --out run/out -x coverage -y matching-bias\n  mopoviz --result result.json --output-format json\n\nTip: Use --config to keep default axes and output settings."
)]
pub struct CliArgs {
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        help_heading = "Output",
        help = "Increase log verbosity (-v, -vv)."
    )]
    pub verbose: u8,

    #[arg(
        long = "no-color",
        help_heading = "Output",
        help = "Disable colored console output."
    )]
    pub no_color: bool,

    #[arg(
        short = 'r',
        long = "result",
        value_name = "FILE",
        help_heading = "Input",
        help = "JSON result set ({\"baseline\": [...], \"optimized\": [...]})."
    )]
    pub result: Option<String>,

    #[arg(
        long = "init",
        value_name = "PREFIX",
        help_heading = "Input",
        help = "Prefix of the initial primer pairs (<PREFIX>.primers, <PREFIX>.scores)."
    )]
    pub init: Option<String>,

    #[arg(
        long = "out",
        value_name = "PREFIX",
        help_heading = "Input",
        help = "Prefix of the optimized primer pairs (<PREFIX>.primers, <PREFIX>.scores)."
    )]
    pub out: Option<String>,

    #[arg(
        short = 'C',
        long = "config",
        value_name = "FILE",
        help_heading = "Input",
        help = "Path to config file (defaults to ~/.mopoviz/config.yml when present)."
    )]
    pub config: Option<String>,

    #[arg(
        long = "init-config",
        help_heading = "Input",
        help = "Write a default config file if none exists, then exit."
    )]
    pub init_config: bool,

    #[arg(
        short = 'x',
        long = "x-axis",
        value_name = "SCORE",
        help_heading = "Chart",
        help = "Score on the x axis: efficiency, coverage or matching-bias."
    )]
    pub x_axis: Option<String>,

    #[arg(
        short = 'y',
        long = "y-axis",
        value_name = "SCORE",
        help_heading = "Chart",
        help = "Score on the y axis."
    )]
    pub y_axis: Option<String>,

    #[arg(
        short = 's',
        long = "size",
        value_name = "SCORE",
        help_heading = "Chart",
        help = "Score sizing the bubbles (defaults to the one not on an axis)."
    )]
    pub size: Option<String>,

    #[arg(
        long = "title",
        value_name = "TEXT",
        help_heading = "Output",
        help = "Report title."
    )]
    pub title: Option<String>,

    #[arg(
        long = "page-length",
        value_name = "ROWS",
        help_heading = "Output",
        help = "Rows per table page (default 50)."
    )]
    pub page_length: Option<usize>,

    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help_heading = "Output",
        help = "Write the report to a file instead of stdout."
    )]
    pub output: Option<String>,

    #[arg(
        long = "output-format",
        value_name = "FORMAT",
        help_heading = "Output",
        help = "Report format: html, json or text (inferred from --output when omitted)."
    )]
    pub output_format: Option<String>,
}
