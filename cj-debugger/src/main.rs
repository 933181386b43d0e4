use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use cj_format::json::JsonError;
use cj_format::writer;
use cj_format::ConstraintDef;
use cj_format::Instance;
use cj_format::ParseError;
use clap::Parser;
use clap::Subcommand;

#[derive(Parser)]
struct Cli {
    /// The CSP-JSON instance file to inspect.
    instance: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse the instance and check its referential integrity.
    Validate,

    /// Parse, validate, and re-emit the instance in the canonical form.
    Canonicalize {
        /// The output file. Prints to stdout when omitted.
        output: Option<PathBuf>,
    },

    /// Print statistics about the instance.
    Stats,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let source = std::fs::read_to_string(&cli.instance)
        .with_context(|| format!("Failed to read '{}'", cli.instance.display()))?;

    let instance = parse(&source)
        .with_context(|| format!("Failed to parse '{}'", cli.instance.display()))?;

    log::info!(
        "parsed instance '{}' generated by '{}'",
        instance.meta.id,
        instance.meta.algo
    );

    match cli.command {
        Commands::Validate => {
            cj_format::validate(&instance).context("Instance failed validation")?;
            println!("OK");
        }

        Commands::Canonicalize { output } => {
            cj_format::validate(&instance).context("Instance failed validation")?;

            match output {
                Some(path) => {
                    let file = File::create(&path)
                        .with_context(|| format!("Failed to create '{}'", path.display()))?;
                    let mut sink = BufWriter::new(file);
                    writer::write_instance(&mut sink, &instance)?;
                    sink.flush()?;
                }
                None => {
                    let stdout = std::io::stdout();
                    writer::write_instance(&mut stdout.lock(), &instance)?;
                }
            }
        }

        Commands::Stats => print_stats(&instance),
    }

    Ok(())
}

/// Parse the instance, flattening the borrowed parse error into an
/// [`anyhow::Error`] that can outlive the source buffer.
fn parse(source: &str) -> anyhow::Result<Instance> {
    cj_format::parse_instance(source).map_err(|error| anyhow::anyhow!(render(&error)))
}

fn render(error: &ParseError<'_>) -> String {
    match error {
        ParseError::Json(JsonError::Lex { reasons }) => reasons
            .iter()
            .map(|reason| format!("{reason} at {}", reason.span()))
            .collect::<Vec<_>>()
            .join("; "),

        ParseError::Json(JsonError::Parse { reasons }) => reasons
            .iter()
            .map(|reason| format!("{reason} at {}", reason.span()))
            .collect::<Vec<_>>()
            .join("; "),

        ParseError::Schema(schema_error) => schema_error.to_string(),
    }
}

fn print_stats(instance: &Instance) {
    println!("id:              {}", instance.meta.id);
    println!("algo:            {}", instance.meta.algo);
    println!("domains:         {}", instance.domains.len());
    println!("variables:       {}", instance.vars.size());
    println!("constraint defs: {}", instance.constraint_defs.len());
    println!("constraints:     {}", instance.constraints.len());

    let no_goods: usize = instance
        .constraint_defs
        .iter()
        .map(|def| {
            let ConstraintDef::NoGoods(no_goods) = def;
            no_goods.size()
        })
        .sum();
    println!("no-goods:        {no_goods}");

    let max_arity = instance
        .constraints
        .iter()
        .map(|constraint| constraint.vars.size())
        .max()
        .unwrap_or(0);
    println!("max arity:       {max_arity}");
}
