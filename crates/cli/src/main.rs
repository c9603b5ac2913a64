use clap::{Parser, Subcommand, ValueEnum};
use intake_core::config::{clinician_from_env_value, initial_section_from_env_value};
use intake_core::{
    catalogue, summary, CoreConfig, FlagField, FormStore, IntakeError, IntakeRecord,
    IntakeResult, Script, SectionKey, TextField, ToggleField,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "intake")]
#[command(about = "Clinical intake form tooling")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the form sections in order
    Sections,
    /// List every editable field path
    Fields,
    /// List the options offered for a field
    Options {
        /// Field path (e.g. complaints.selectedComplaints); omit to list all
        field: Option<String>,
    },
    /// Print a fresh, empty intake record
    Blank {
        #[arg(long, value_enum, default_value_t = Format::Yaml)]
        format: Format,
    },
    /// Replay a form-event script and print the resulting record
    Replay {
        /// Path to a YAML or JSON script
        script: PathBuf,
        #[arg(long, value_enum, default_value_t = Format::Yaml, conflicts_with = "summary")]
        format: Format,
        /// Print the summary of one section instead of the whole record
        #[arg(long)]
        summary: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Yaml,
    Json,
}

fn render(record: &IntakeRecord, format: Format) -> IntakeResult<String> {
    match format {
        Format::Yaml => record.to_yaml(),
        Format::Json => record.to_json_pretty(),
    }
}

/// Option lines for a list field or a single-choice field.
fn options_for(path: &str) -> IntakeResult<Vec<String>> {
    if let Ok(field) = path.parse::<ToggleField>() {
        return Ok(catalogue::options(field)
            .iter()
            .map(|option| catalogue::describe(field, option))
            .collect());
    }
    let field = path.parse::<TextField>()?;
    catalogue::choices(field)
        .map(|choices| choices.iter().map(|choice| choice.to_string()).collect())
        .ok_or_else(|| IntakeError::InvalidInput(format!("{field} is free text")))
}

fn start_store() -> anyhow::Result<FormStore> {
    let initial_section =
        initial_section_from_env_value(std::env::var("INTAKE_INITIAL_SECTION").ok())?;
    let clinician = clinician_from_env_value(std::env::var("INTAKE_CLINICIAN").ok());
    let cfg = Arc::new(CoreConfig::new(initial_section, clinician));

    let mut store = FormStore::with_static_suggestions(cfg);
    store.start()?;
    Ok(store)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("intake_core=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Sections) => {
            for (index, section) in SectionKey::ORDER.iter().enumerate() {
                println!("{}. {} ({})", index + 1, section.label(), section);
            }
        }
        Some(Commands::Fields) => {
            for field in TextField::ALL {
                println!("text  {field}");
            }
            for field in FlagField::ALL {
                println!("flag  {field}");
            }
            for field in ToggleField::ALL {
                println!("list  {field}");
            }
        }
        Some(Commands::Options { field: Some(path) }) => {
            for option in options_for(&path)? {
                println!("{option}");
            }
        }
        Some(Commands::Options { field: None }) => {
            for field in ToggleField::ALL {
                println!("{field}:");
                for option in catalogue::options(field) {
                    println!("  {}", catalogue::describe(field, option));
                }
            }
            for field in TextField::ALL {
                if let Some(choices) = catalogue::choices(field) {
                    println!("{field}:");
                    for choice in choices {
                        println!("  {choice}");
                    }
                }
            }
        }
        Some(Commands::Blank { format }) => {
            let mut store = start_store()?;
            let record = store.end()?;
            println!("{}", render(&record, format)?);
        }
        Some(Commands::Replay {
            script,
            format,
            summary: section,
        }) => {
            let section = section.map(|s| s.parse::<SectionKey>()).transpose()?;
            let events = Script::load(&script)?;

            let mut store = start_store()?;
            let applied = Script::replay(&mut store, events)?;
            tracing::info!(applied, "replayed script {}", script.display());

            let record = store.end()?;
            match section {
                Some(section) => print!("{}", summary::summarise(&record, section)),
                None => println!("{}", render(&record, format)?),
            }
        }
        None => {
            println!("Use 'intake --help' for commands");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_resolve_list_and_choice_fields() {
        let complaints = options_for("complaints.selectedComplaints").expect("list field");
        assert_eq!(complaints[0], "Fever");

        let onset = options_for("history.onset").expect("choice field");
        assert_eq!(onset[0], "Sudden (minutes)");
    }

    #[test]
    fn suggested_investigations_show_priority_and_reason() {
        let suggested = options_for("investigations.suggested").expect("list field");
        assert_eq!(
            suggested[0],
            "Complete Blood Count (CBC) [High] - To evaluate for infection, anemia, or hematologic disorders"
        );
    }

    #[test]
    fn replay_summary_conflicts_with_format() {
        let err = Cli::try_parse_from([
            "intake",
            "replay",
            "visit.yaml",
            "--summary",
            "history",
            "--format",
            "json",
        ])
        .expect_err("conflicting flags");
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);

        let cli = Cli::try_parse_from(["intake", "replay", "visit.yaml", "--summary", "history"])
            .expect("summary alone");
        match cli.command {
            Some(Commands::Replay { format, summary, .. }) => {
                assert_eq!(format, Format::Yaml);
                assert_eq!(summary.as_deref(), Some("history"));
            }
            other => panic!("expected Replay command, got {other:?}"),
        }
    }

    #[test]
    fn free_text_fields_have_no_options() {
        let err = options_for("demographics.name").expect_err("free text");
        assert!(matches!(err, IntakeError::InvalidInput(msg) if msg.contains("free text")));

        assert!(options_for("demographics.nickname").is_err());
    }
}
