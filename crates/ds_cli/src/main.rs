use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use ds_ast::{StripOptions, DEFAULT_TARGET_ENV};
use ds_parser::{emit_module, parse_source};
use ds_strip::eliminate_debug_blocks;

#[derive(Parser)]
#[command(name = "dbgstrip", about = "dbgstrip — remove DEBUG-guarded blocks for a target environment")]
struct Cli {
    /// Log every rewritten or removed guard.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite `if (DEBUG)` guards and remove guarded blocks for the target environment.
    Strip {
        /// Input .js/.jsx/.ts/.tsx file.
        input: PathBuf,
        /// Output file (stdout if omitted).
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Environment in which guarded blocks are removed.
        #[arg(long, conflicts_with = "config")]
        env: Option<String>,
        /// JSON options file, e.g. `{ "env": "production" }`.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Environment being built for.
        #[arg(long, env = "NODE_ENV", default_value = "")]
        current_env: String,
        /// Generate a source map.
        #[arg(long)]
        source_map: bool,
    },
    /// Parse the file and report any syntax errors.
    Check { input: PathBuf },
    /// Parse and dump the AST.
    Parse {
        input: PathBuf,
        /// Dump as JSON instead of Rust debug output.
        #[arg(long)]
        ast: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Strip {
            input,
            output,
            env,
            config,
            current_env,
            source_map,
        } => {
            let options = load_options(env, config.as_deref())?;
            let source = read_source(&input)?;
            let filename = input.display().to_string();

            let parsed = parse_source(&source, &filename)?;
            let module = eliminate_debug_blocks(parsed.module, &options, &current_env);
            let emitted = emit_module(&module, &parsed.source_map, source_map)?;

            match &output {
                Some(path) => std::fs::write(path, &emitted.code)
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => print!("{}", emitted.code),
            }

            if let Some(srcmap) = emitted.source_map {
                let map_path = match &output {
                    Some(path) => format!("{}.map", path.display()),
                    None => format!("{filename}.map"),
                };
                std::fs::write(&map_path, &srcmap)
                    .with_context(|| format!("failed to write {map_path}"))?;
                eprintln!("Source map written to {map_path}");
            }
        }
        Commands::Check { input } => {
            let source = read_source(&input)?;
            let filename = input.display().to_string();

            parse_source(&source, &filename)?;
            eprintln!("OK: {filename}");
        }
        Commands::Parse { input, ast } => {
            let source = read_source(&input)?;
            let filename = input.display().to_string();
            let parsed = parse_source(&source, &filename)?;

            if ast {
                let json = serde_json::to_string_pretty(&parsed.module)?;
                println!("{json}");
            } else {
                println!("{:#?}", parsed.module);
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn read_source(input: &Path) -> Result<String> {
    std::fs::read_to_string(input).with_context(|| format!("failed to read {}", input.display()))
}

/// Resolve the pass options from `--env`, `--config`, or the default target.
fn load_options(env: Option<String>, config: Option<&Path>) -> Result<StripOptions> {
    let options = match (env, config) {
        (Some(env), _) => StripOptions::new(env),
        (None, Some(path)) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("invalid options in {}", path.display()))?
        }
        (None, None) => StripOptions::new(DEFAULT_TARGET_ENV),
    };

    if options.env.is_empty() {
        bail!("target environment must not be empty");
    }
    log::debug!("target environment: {:?}", options.env);

    Ok(options)
}
