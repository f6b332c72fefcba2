mod report;

use plenary::{AnalysisOptions, Dataset, MemoryStore, Period, Periodicity, VoteStore};
use serde::Serialize;
use std::io::Read;
use std::str::FromStr;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Analysis(plenary::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Analysis(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<plenary::Error> for CliError {
    fn from(value: plenary::Error) -> Self {
        Self::Analysis(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Analyse,
    Periods,
}

#[derive(Debug, Clone, Copy, Default)]
enum OutputFormat {
    /// The bubble-chart frames consumed by the frontend.
    #[default]
    Frames,
    /// The full analysis: party list, raw layouts and scale.
    Full,
}

impl FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "frames" => Ok(Self::Frames),
            "full" => Ok(Self::Full),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    config: Option<String>,
    pretty: bool,
    keep_empty: bool,
    periodicity: Option<Periodicity>,
    format: OutputFormat,
}

#[derive(Serialize)]
struct PeriodOut<'a> {
    #[serde(flatten)]
    period: &'a Period,
    roll_calls: usize,
}

fn usage() -> &'static str {
    "plenary-cli\n\
\n\
USAGE:\n\
  plenary-cli [analyse] [--pretty] [--format frames|full] [--periodicity <p>] [--keep-empty] [--config <path>] [<path>|-]\n\
  plenary-cli periods [--pretty] [--periodicity <p>] [--config <path>] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', the dataset JSON is read from stdin.\n\
  - <p> is one of month, semester, year, biennium, quadrennium (default: semester).\n\
  - --config reads analysis options as JSON; flags given on the command line win.\n\
  - Set RUST_LOG (e.g. RUST_LOG=plenary=debug) for progress on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "analyse" | "analyze" => args.command = Command::Analyse,
            "periods" => args.command = Command::Periods,
            "--pretty" => args.pretty = true,
            "--keep-empty" => args.keep_empty = true,
            "--format" => {
                let Some(fmt) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.format = fmt
                    .parse::<OutputFormat>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--periodicity" => {
                let Some(p) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.periodicity = Some(
                    p.parse::<Periodicity>()
                        .map_err(|_| CliError::Usage(usage()))?,
                );
            }
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn load_options(args: &Args) -> Result<AnalysisOptions, CliError> {
    let mut opts = match args.config.as_deref() {
        Some(path) => serde_json::from_str::<AnalysisOptions>(&std::fs::read_to_string(path)?)?,
        None => AnalysisOptions::default(),
    };
    if let Some(p) = args.periodicity {
        opts.periodicity = p;
    }
    if args.keep_empty {
        opts.skip_empty_periods = false;
    }
    Ok(opts)
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("plenary=warn"));
    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn run(args: Args) -> Result<(), CliError> {
    let opts = load_options(&args)?;
    let text = read_input(args.input.as_deref())?;
    let dataset: Dataset = serde_json::from_str(&text)?;
    let store = MemoryStore::new(dataset);

    match args.command {
        Command::Periods => {
            let Some((first, last)) = store.date_range()? else {
                return Err(plenary::Error::NoRollCalls.into());
            };
            let mut out: Vec<PeriodOut<'_>> = Vec::new();
            let periods = plenary::period::periods(opts.periodicity, first, last);
            for p in &periods {
                out.push(PeriodOut {
                    period: p,
                    roll_calls: store.roll_calls(p)?.len(),
                });
            }
            write_json(&out, args.pretty)
        }
        Command::Analyse => {
            let analysis = plenary::analyse(&store, &opts)?;
            match args.format {
                OutputFormat::Frames => write_json(&report::frames(&analysis), args.pretty),
                OutputFormat::Full => write_json(&analysis, args.pretty),
            }
        }
    }
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

    init_tracing();

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
