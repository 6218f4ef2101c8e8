//! Command-line interface for satysfi-token-gen
//! Reads the tree-sitter-satysfi `grammar.js` and prints the `Token` enum.
//!
//! Usage:
//!   satysfi-token-gen [GRAMMAR] > src/token/list.rs
//!   satysfi-token-gen scripts/grammar.js --profile minimal
//!   SATYSFI_TOKEN_GEN_LOG=debug satysfi-token-gen --rustfmt -o src/token/list.rs

use std::fs;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use satysfi_token_gen::{Config, Error, Generator, HiddenRules, Profile};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// grammar definition file
    #[arg(value_name = "GRAMMAR", default_value = "scripts/grammar.js")]
    grammar: PathBuf,
    /// which generator preset to start from
    #[arg(long, value_enum, default_value_t = ProfileArg::Full)]
    profile: ProfileArg,
    /// name of the generated enum
    #[arg(long)]
    enum_name: Option<String>,
    /// name of the variant holding unknown token text
    #[arg(long, conflicts_with = "no_fallback")]
    fallback: Option<String>,
    /// do not generate a fallback variant
    #[arg(long)]
    no_fallback: bool,
    /// extra token names appended after the extracted ones
    #[arg(long = "extra", value_name = "NAME")]
    extra: Vec<String>,
    /// drop hidden rules (names starting with `_`)
    #[arg(long)]
    skip_hidden: bool,
    /// output file
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// format the output with rustfmt
    #[arg(long)]
    rustfmt: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ProfileArg {
    Minimal,
    Full,
}

impl From<ProfileArg> for Profile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Minimal => Profile::Minimal,
            ProfileArg::Full => Profile::Full,
        }
    }
}

impl Cli {
    fn config(&self) -> Config {
        let mut config = Config::from_profile(self.profile.into()).with_extra_tokens(self.extra.iter().cloned());
        if let Some(name) = &self.enum_name {
            config = config.with_enum_name(name.clone());
        }
        if self.no_fallback {
            config = config.with_fallback(None);
        } else if let Some(name) = &self.fallback {
            config = config.with_fallback(Some(name.clone()));
        }
        if self.skip_hidden {
            config = config.with_hidden_rules(HiddenRules::Skip);
        }
        config
    }
}

fn main() {
    setup_log();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Error> {
    let config = cli.config();
    tracing::debug!(?config, grammar = %cli.grammar.display(), "generating");

    let generator = Generator::new(".", config);
    let source = generator.generate_source(&cli.grammar, cli.rustfmt)?;

    match &cli.output {
        Some(path) => fs::write(path, source).map_err(|source| Error::Write {
            path: path.clone(),
            source,
        })?,
        None => print!("{}", source),
    }
    Ok(())
}

/// Installs a stderr subscriber when `SATYSFI_TOKEN_GEN_LOG` or `RUST_LOG` is set.
fn setup_log() {
    use tracing_subscriber::EnvFilter;

    let filter = match std::env::var("SATYSFI_TOKEN_GEN_LOG") {
        Ok(val) => EnvFilter::builder().parse_lossy(val),
        Err(_) if std::env::var("RUST_LOG").is_ok() => EnvFilter::from_default_env(),
        Err(_) => return,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
