use airpanel::PanelOptions;
use airpanel::config::{DEFAULT_OUTPUT, DEFAULT_RESOURCE_DIR};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Panel(airpanel::Error),
    Logging(tracing::subscriber::SetGlobalDefaultError),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Panel(err) => write!(f, "{err}"),
            CliError::Logging(err) => write!(f, "failed to install logger: {err}"),
        }
    }
}

impl From<airpanel::Error> for CliError {
    fn from(value: airpanel::Error) -> Self {
        Self::Panel(value)
    }
}

impl From<tracing::subscriber::SetGlobalDefaultError> for CliError {
    fn from(value: tracing::subscriber::SetGlobalDefaultError) -> Self {
        Self::Logging(value)
    }
}

#[derive(Debug, Default)]
struct Args {
    resources: Option<PathBuf>,
    config: Option<PathBuf>,
    seed: Option<u64>,
    verbose: bool,
    out: Option<PathBuf>,
}

fn usage() -> &'static str {
    "airpanel\n\
\n\
USAGE:\n\
  airpanel [--resources <dir>] [--config <file.json>] [--seed <n>] [-v|--verbose] [<output>]\n\
\n\
NOTES:\n\
  - <output> defaults to ./te.svg.\n\
  - Resources are read from <dir>/js/update.js and <dir>/style/defs.xml (default dir: ./res).\n\
    Missing resources are skipped.\n\
  - --config reads a JSON object with optional script_path, style_path and seed fields;\n\
    --resources and --seed override it.\n\
  - Logs go to stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "--verbose" | "-v" => args.verbose = true,
            "--resources" => {
                let Some(dir) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.resources = Some(PathBuf::from(dir));
            }
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(PathBuf::from(path));
            }
            "--seed" => {
                let Some(seed) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.seed = Some(seed.parse::<u64>().map_err(|_| CliError::Usage(usage()))?);
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.out.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.out = Some(PathBuf::from(path));
            }
        }
    }

    Ok(args)
}

fn panel_options(args: &Args) -> Result<PanelOptions, CliError> {
    let mut opts = match &args.config {
        Some(path) => PanelOptions::from_json_file(path)?,
        None => PanelOptions::from_resource_dir(DEFAULT_RESOURCE_DIR),
    };
    if let Some(dir) = &args.resources {
        let from_dir = PanelOptions::from_resource_dir(dir);
        opts.script_path = from_dir.script_path;
        opts.style_path = from_dir.style_path;
    }
    if let Some(seed) = args.seed {
        opts.seed = Some(seed);
    }
    Ok(opts)
}

fn run(args: Args) -> Result<(), CliError> {
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let opts = panel_options(&args)?;
    let out = args.out.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
    airpanel::write_panel(&out, &opts)?;
    Ok(())
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        std::iter::once("airpanel")
            .chain(args.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn defaults() {
        let args = parse_args(&argv(&[])).expect("parse");
        assert!(args.out.is_none());
        let opts = panel_options(&args).expect("options");
        assert_eq!(opts, PanelOptions::from_resource_dir("res"));
    }

    #[test]
    fn flags_override_resource_dir_and_seed() {
        let args = parse_args(&argv(&["--resources", "assets", "--seed", "12", "-v", "out.svg"]))
            .expect("parse");
        assert!(args.verbose);
        assert_eq!(args.out, Some(PathBuf::from("out.svg")));
        let opts = panel_options(&args).expect("options");
        assert_eq!(opts, PanelOptions::from_resource_dir("assets").with_seed(12));
    }

    #[test]
    fn rejects_two_outputs_and_bad_seed() {
        assert!(matches!(parse_args(&argv(&["a.svg", "b.svg"])), Err(CliError::Usage(_))));
        assert!(matches!(parse_args(&argv(&["--seed", "x"])), Err(CliError::Usage(_))));
        assert!(matches!(parse_args(&argv(&["--bogus"])), Err(CliError::Usage(_))));
    }
}
