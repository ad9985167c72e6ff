//! PhotonQL command-line front end
//!
//! Builds predicate documents from the command line and prints them as JSON,
//! ready to be piped to a query backend.
//!
//! # Examples
//!
//! ```bash
//! # Single constraint
//! photonql build 'age:greaterThan:25'
//!
//! # Two constraints combined with OR, pretty-printed and validated
//! photonql build --or --pretty --strict 'role:equalTo:"admin"' 'tags:containsAll:["ops","oncall"]'
//!
//! # Show the effective configuration
//! PHOTONQL_OUTPUT__PRETTY=true photonql config
//! ```

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use photonql::config::Config;
use photonql::{Document, Factory, Operand, Operator, Predicate};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// PhotonQL - fluent predicate builder for query backends
#[derive(Parser, Debug)]
#[command(name = "photonql")]
#[command(version = photonql::VERSION)]
#[command(about = "Build canonical predicate documents", long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML)
    #[arg(long, global = true, env = "PHOTONQL_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn", env = "RUST_LOG")]
    log_level: String,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a predicate document from constraints
    Build(BuildArgs),

    /// List operators and the operand shape each expects
    Operators,

    /// Print the effective configuration as TOML
    Config,
}

/// Build arguments
#[derive(Args, Debug)]
struct BuildArgs {
    /// Constraints as key:operator:operand (operand is JSON, or a bare string)
    #[arg(required = true, value_name = "CONSTRAINT")]
    constraints: Vec<ConstraintArg>,

    /// Combine constraints with AND (default for more than one)
    #[arg(long, conflicts_with = "or")]
    and: bool,

    /// Combine constraints with OR
    #[arg(long)]
    or: bool,

    /// Pretty-print the document
    #[arg(long)]
    pretty: bool,

    /// Validate the document before printing
    #[arg(long)]
    strict: bool,
}

/// One `key:operator:operand` argument.
#[derive(Debug, Clone, PartialEq)]
struct ConstraintArg {
    where_key: String,
    operator: Operator,
    operand: Operand,
}

impl FromStr for ConstraintArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let (Some(where_key), Some(operator), Some(operand)) =
            (parts.next(), parts.next(), parts.next())
        else {
            return Err(format!("expected key:operator:operand, got '{}'", s));
        };

        let operator = operator.parse::<Operator>().map_err(|e| e.to_string())?;
        let operand = serde_json::from_str::<serde_json::Value>(operand)
            .map(Operand::from)
            .unwrap_or_else(|_| Operand::from(operand));

        Ok(Self {
            where_key: where_key.to_string(),
            operator,
            operand,
        })
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(&cli);

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Commands::Build(args) => build_command(config, args),
        Commands::Operators => {
            for op in Operator::ALL {
                let shape = if op.expects_array() { "array" } else { "scalar" };
                println!("{:<12} {}", op.name(), shape);
            }
            Ok(())
        }
        Commands::Config => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

/// Setup logging to stderr so stdout only carries documents
fn setup_logging(cli: &Cli) {
    let log_level = cli
        .log_level
        .parse::<tracing::Level>()
        .unwrap_or(tracing::Level::WARN);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(!cli.no_color),
        )
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .init();
}

/// Build command - evaluate the constraints and print the document
fn build_command(mut config: Config, args: BuildArgs) -> anyhow::Result<()> {
    if args.pretty {
        config.output.pretty = true;
    }
    if args.strict {
        config.validation.enabled = true;
    }

    let document = build_document(&args)?;
    info!(document = %document, "Built predicate document");

    check_document(&config, &document)?;

    println!("{}", config.encode(&document)?);
    Ok(())
}

/// A lone constraint without `--and` / `--or` stays standalone; anything
/// else goes under one root expression, combined with AND unless `--or`.
fn build_document(args: &BuildArgs) -> anyhow::Result<Document> {
    if let [arg] = args.constraints.as_slice() {
        if !args.and && !args.or {
            return Ok(Factory::constraint(arg.where_key.as_str())
                .apply(arg.operator, arg.operand.clone())
                .evaluate());
        }
    }

    let root = Factory::expression();
    for arg in &args.constraints {
        root.constraint(arg.where_key.as_str())
            .apply(arg.operator, arg.operand.clone());
    }
    if args.or {
        root.or()?;
    } else {
        root.and()?;
    }
    Ok(root.evaluate())
}

/// Runs the configured validator, if any, reporting every violation on stderr.
fn check_document(config: &Config, document: &Document) -> anyhow::Result<()> {
    let Some(validator) = config.validator() else {
        return Ok(());
    };

    let violations = validator.violations(document);
    if !violations.is_empty() {
        for violation in &violations {
            eprintln!("invalid: {}", violation);
        }
        bail!("document failed validation ({} problem(s))", violations.len());
    }
    debug!("Document passed validation");
    Ok(())
}
