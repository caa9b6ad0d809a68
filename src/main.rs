use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, info, warn};
use std::fs;
use std::path::PathBuf;

use rawcase::{case_to_raw, read_case, validate_case};

/// Read a PSS/E v33 RAW case and write it back out.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The input RAW file
    #[arg(required = true)]
    input: PathBuf,

    /// Output file, standard output when absent
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write the parsed case as JSON instead of RAW.
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Run the range checks on the parsed case.
    #[arg(long, default_value_t = false)]
    validate: bool,

    /// Only log errors.
    #[arg(short, long, default_value_t = false)]
    quiet: bool,

    /// Send the log to a file instead of standard error.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = init_logger(&cli) {
        eprintln!("error: {:#}", err);
        std::process::exit(2);
    }

    if let Err(err) = execute(&cli) {
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}

fn init_logger(cli: &Cli) -> Result<()> {
    // RUST_LOG wins unless --quiet is given
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(LevelFilter::Error);
    }
    if let Some(path) = &cli.log_file {
        let log_file = fs::File::create(path)
            .with_context(|| format!("could not create log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(log_file)));
    }
    builder.init();
    Ok(())
}

fn execute(cli: &Cli) -> Result<()> {
    info!("Beginning run...");

    let parsed = read_case(&cli.input)
        .with_context(|| format!("could not parse {}", cli.input.display()))?;
    let case = parsed.case;

    if cli.validate {
        let warnings = validate_case(&case);
        for warning in &warnings {
            warn!("{}", warning);
        }
        info!("Validation raised {} warnings", warnings.len());
    }

    let text = if cli.json {
        serde_json::to_string_pretty(&case)?
    } else {
        case_to_raw(&case)
    };

    match &cli.output {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("could not write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => print!("{}", text),
    }
    Ok(())
}
