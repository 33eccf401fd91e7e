use std::io::{self, BufRead};

use anyhow::{bail, Context};
use colored::Colorize;
use sectfile_store::{RewriteMode, SectionStore, StoreConfig, WriteOutcome};
use serde_json::json;
use tracing::debug;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = store_config(&cli)?;
    debug!(path = %config.path().display(), mode = ?config.rewrite_mode, "store resolved");
    let store = SectionStore::open(&config);
    let format = cli.format;

    match cli.command {
        Command::Init => cmd_init(&store, &config, &format),
        Command::Exists => cmd_exists(&store, &format),
        Command::Get(args) => cmd_get(&store, &args.section, &format),
        Command::GetLine(args) => cmd_get_line(&store, &args.section, &format),
        Command::Set(args) => {
            let lines = if args.stdin {
                io::stdin()
                    .lock()
                    .lines()
                    .collect::<io::Result<Vec<_>>>()
                    .context("reading body lines from stdin")?
            } else {
                args.lines
            };
            cmd_set(&store, &args.section, &lines, &format)
        }
        Command::SetLine(args) => cmd_set(&store, &args.section, &[args.line], &format),
        Command::Append(args) => cmd_append(&store, &args.section, &format),
        Command::List => cmd_list(&store, &format),
        Command::Dump => cmd_dump(&store, &format),
    }
}

/// Resolve the store configuration: file first, then command-line overrides.
fn store_config(cli: &Cli) -> anyhow::Result<StoreConfig> {
    let mut config = match &cli.config {
        Some(path) => StoreConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => StoreConfig::default(),
    };
    if let Some(dir) = &cli.dir {
        config.base_dir = dir.clone();
    }
    if let Some(name) = &cli.name {
        config.name = name.clone();
    }
    if let Some(ext) = &cli.ext {
        config.extension = ext.clone();
    }
    if cli.legacy {
        config.rewrite_mode = RewriteMode::Legacy;
    }
    Ok(config)
}

fn store_context(store: &SectionStore) -> String {
    format!("reading {}", store.resource().path().display())
}

fn print_lines(lines: &[String], format: &OutputFormat) {
    match format {
        OutputFormat::Text => {
            for line in lines {
                println!("{line}");
            }
        }
        OutputFormat::Json => println!("{}", json!(lines)),
    }
}

fn cmd_init(store: &SectionStore, config: &StoreConfig, format: &OutputFormat) -> anyhow::Result<()> {
    let created = store
        .create()
        .with_context(|| format!("creating {}", config.path().display()))?;
    match format {
        OutputFormat::Text if created => println!(
            "{} Created store {}",
            "✓".green().bold(),
            config.path().display().to_string().bold()
        ),
        OutputFormat::Text => println!("Store {} already exists", config.path().display().to_string().bold()),
        OutputFormat::Json => println!(
            "{}",
            json!({ "path": config.path(), "created": created })
        ),
    }
    Ok(())
}

fn cmd_exists(store: &SectionStore, format: &OutputFormat) -> anyhow::Result<()> {
    let exists = store.exists();
    match format {
        OutputFormat::Text if exists => println!("{}", "exists".green()),
        OutputFormat::Text => println!("{}", "missing".red()),
        OutputFormat::Json => println!("{}", json!({ "exists": exists })),
    }
    Ok(())
}

fn cmd_get(store: &SectionStore, section: &str, format: &OutputFormat) -> anyhow::Result<()> {
    match store.read_section(section).with_context(|| store_context(store))? {
        Some(body) => {
            print_lines(&body, format);
            Ok(())
        }
        None => bail!("section not found: {section}"),
    }
}

fn cmd_get_line(store: &SectionStore, section: &str, format: &OutputFormat) -> anyhow::Result<()> {
    let line = store
        .read_first_line(section)
        .with_context(|| store_context(store))?
        .unwrap_or_default();
    match format {
        OutputFormat::Text => println!("{line}"),
        OutputFormat::Json => println!("{}", json!(line)),
    }
    Ok(())
}

fn cmd_set(
    store: &SectionStore,
    section: &str,
    lines: &[String],
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let outcome = store
        .write_section(section, lines)
        .with_context(|| format!("writing section {section}"))?;
    match outcome {
        WriteOutcome::Replaced { sections } => {
            match format {
                OutputFormat::Text => println!(
                    "{} Updated {} ({} {})",
                    "✓".green().bold(),
                    section.yellow(),
                    sections,
                    if sections == 1 { "section" } else { "sections" }
                ),
                OutputFormat::Json => println!(
                    "{}",
                    json!({ "section": section, "replaced": sections })
                ),
            }
            Ok(())
        }
        WriteOutcome::NotFound => bail!("section not found: {section} (use `append` to create it)"),
    }
}

fn cmd_append(store: &SectionStore, section: &str, format: &OutputFormat) -> anyhow::Result<()> {
    store
        .add_section(section)
        .with_context(|| format!("appending section {section}"))?;
    match format {
        OutputFormat::Text => println!("{} Appended {}", "✓".green().bold(), section.yellow()),
        OutputFormat::Json => println!("{}", json!({ "section": section, "appended": true })),
    }
    Ok(())
}

fn cmd_list(store: &SectionStore, format: &OutputFormat) -> anyhow::Result<()> {
    let names = store.read_section_names().with_context(|| store_context(store))?;
    match format {
        OutputFormat::Text if names.is_empty() => println!("No sections."),
        OutputFormat::Text => {
            for name in &names {
                println!("{}", name.yellow());
            }
        }
        OutputFormat::Json => println!("{}", json!(names)),
    }
    Ok(())
}

fn cmd_dump(store: &SectionStore, format: &OutputFormat) -> anyhow::Result<()> {
    let lines = store.read_all_lines().with_context(|| store_context(store))?;
    print_lines(&lines, format);
    Ok(())
}
