use crate::cli::args::CliArgs;
use crate::model::ScoreField;
use crate::output::OutputFormat;

pub fn validate(args: &CliArgs) -> Result<(), String> {
    if args.result.is_some() && (args.init.is_some() || args.out.is_some()) {
        return Err("--result cannot be combined with --init/--out".to_string());
    }
    if args.init.is_some() != args.out.is_some() {
        return Err("--init and --out must be given together".to_string());
    }
    for (flag, raw) in [
        ("--x-axis", &args.x_axis),
        ("--y-axis", &args.y_axis),
        ("--size", &args.size),
    ] {
        if let Some(raw) = raw.as_deref() {
            raw.parse::<ScoreField>()
                .map_err(|e| format!("invalid {flag} '{raw}': {e}"))?;
        }
    }
    if let Some(raw) = args.output_format.as_deref() {
        if OutputFormat::parse(raw).is_none() {
            return Err(format!(
                "invalid --output-format '{raw}', expected html, json or text"
            ));
        }
    }
    if args.page_length == Some(0) {
        return Err("invalid --page-length, expected positive integer".to_string());
    }
    Ok(())
}
