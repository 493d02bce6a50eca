use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use vira_core::{
    config::{max_input_chars_from_env_value, resolve_taxonomy},
    ClassificationResult, ClassifierService, CoreConfig, Taxonomy, Utterance,
};

#[derive(Parser)]
#[command(name = "vira")]
#[command(about = "VIRA symptom classifier CLI")]
struct Cli {
    /// Taxonomy YAML file to use instead of the built-in table
    #[arg(long, global = true, env = "VIRA_TAXONOMY_FILE")]
    taxonomy: Option<PathBuf>,
    /// Maximum number of characters of user text to analyse
    #[arg(long, global = true, env = "VIRA_MAX_INPUT_CHARS")]
    max_input_chars: Option<String>,
    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify text as a single user utterance
    Classify {
        /// Words of the utterance (joined with spaces)
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Classify a JSON transcript file
    ClassifyFile {
        /// Path to a JSON array of {role, text} or an object with a "transcript" array
        path: PathBuf,
    },
    /// List symptom categories
    Categories,
    /// Validate a taxonomy file (or the built-in table)
    CheckTaxonomy {
        /// Taxonomy YAML file; defaults to --taxonomy or the built-in table
        path: Option<PathBuf>,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TranscriptFile {
    Bare(Vec<Utterance>),
    Wrapped { transcript: Vec<Utterance> },
}

fn parse_transcript(json: &str) -> Result<Vec<Utterance>, serde_json::Error> {
    Ok(match serde_json::from_str::<TranscriptFile>(json)? {
        TranscriptFile::Bare(transcript) => transcript,
        TranscriptFile::Wrapped { transcript } => transcript,
    })
}

fn build_service(
    taxonomy: Option<PathBuf>,
    max_input_chars: Option<String>,
) -> Result<ClassifierService, Box<dyn std::error::Error>> {
    let cfg = CoreConfig::new(
        resolve_taxonomy(taxonomy)?,
        max_input_chars_from_env_value(max_input_chars)?,
    )?;
    Ok(ClassifierService::new(Arc::new(cfg)))
}

fn print_result(
    result: &ClassificationResult,
    pretty: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = if pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{}", json);
    Ok(())
}

fn check_taxonomy(path: Option<&Path>) -> Result<Taxonomy, Box<dyn std::error::Error>> {
    let taxonomy = match path {
        Some(path) => Taxonomy::from_yaml_file(path)?,
        None => Taxonomy::builtin()?,
    };
    Ok(taxonomy)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("vira_core=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Classify { text }) => {
            let service = build_service(cli.taxonomy, cli.max_input_chars)?;
            let result = service.classify_text(&text.join(" "));
            print_result(&result, cli.pretty)?;
        }
        Some(Commands::ClassifyFile { path }) => {
            let json = std::fs::read_to_string(&path)?;
            let transcript = parse_transcript(&json)?;
            let service = build_service(cli.taxonomy, cli.max_input_chars)?;
            print_result(&service.classify(&transcript), cli.pretty)?;
        }
        Some(Commands::Categories) => {
            let service = build_service(cli.taxonomy, cli.max_input_chars)?;
            for category in service.taxonomy().categories() {
                println!(
                    "{} {:<18} urgency: {:<8} keywords: {:>2}  diseases: {}",
                    category.icon,
                    category.id,
                    category.urgency,
                    category.keywords.len(),
                    category.diseases.join(", ")
                );
            }
        }
        Some(Commands::CheckTaxonomy { path }) => {
            let path = path.or(cli.taxonomy);
            let source = path
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "built-in taxonomy".into());
            match check_taxonomy(path.as_deref()) {
                Ok(taxonomy) => {
                    println!("{}: OK ({} categories)", source, taxonomy.len());
                }
                Err(e) => {
                    eprintln!("{}: {}", source, e);
                    std::process::exit(1);
                }
            }
        }
        None => {
            println!("Use 'vira --help' for commands");
        }
    }

    Ok(())
}
