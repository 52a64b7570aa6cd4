//! CLI entrypoint for Agent Saloon
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use saloon_application::{
    CollaborationProgress, ConversationLogger, NoProgress, ProviderRegistry, SectionGenerator,
    SectionRequest, TitleGenerator, TocGenerator, WriteBookInput, WriteBookUseCase,
};
use saloon_domain::Outline;
use saloon_domain::extraction::outline::parse_outline;
use saloon_infrastructure::{
    ConfigLoader, FileConfig, JsonlConversationLogger, ResolvedConfig, build_registry,
};
use saloon_presentation::{
    Cli, Command, ConsoleFormatter, OutputFormat, ProgressReporter, SimpleProgress,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting Agent Saloon");

    let file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())?
    };

    if cli.command == Command::ShowConfig {
        return show_config(&file_config);
    }

    let (resolved, warnings) = file_config.clone().into_resolved()?;
    for issue in &warnings {
        eprintln!("warning: {}", issue);
    }

    // === Dependency Injection ===
    let registry = build_registry(&file_config.providers);
    if registry.is_empty() {
        bail!(
            "No provider is configured. Set OPENAI_API_KEY or ANTHROPIC_API_KEY, \
             or add [providers.*] to saloon.toml"
        );
    }

    let progress: Arc<dyn CollaborationProgress> = if cli.quiet || cli.output == OutputFormat::Json
    {
        Arc::new(NoProgress)
    } else if cli.plain_progress {
        Arc::new(SimpleProgress)
    } else {
        Arc::new(ProgressReporter::new())
    };

    let transcript_dir = cli
        .transcript_dir
        .clone()
        .or_else(|| file_config.logging.resolved_transcript_dir());
    let logger = transcript_dir.and_then(|dir| {
        let logger = JsonlConversationLogger::for_run(&dir, command_label(&cli.command));
        if logger.is_none() {
            warn!("Continuing without a transcript");
        }
        logger
    });

    let app = App {
        config: resolved,
        registry,
        progress,
        logger: logger.map(|l| Arc::new(l) as Arc<dyn ConversationLogger>),
        output: cli.output,
    };

    app.run(cli.command).await
}

fn command_label(command: &Command) -> &'static str {
    match command {
        Command::Title { .. } => "title",
        Command::Toc { .. } => "toc",
        Command::Section { .. } => "section",
        Command::Book { .. } => "book",
        Command::ShowConfig => "config",
    }
}

fn show_config(config: &FileConfig) -> Result<()> {
    ConfigLoader::print_config_sources();
    for issue in config.validate() {
        println!("  {:?}: {}", issue.severity, issue);
    }
    println!();
    let mut shown = config.clone();
    // Keys stay out of the terminal
    shown.providers.openai.api_key = shown.providers.openai.api_key.map(|_| "***".to_string());
    shown.providers.anthropic.api_key =
        shown.providers.anthropic.api_key.map(|_| "***".to_string());
    println!("{}", ConsoleFormatter::format_json(&shown));
    Ok(())
}

/// Wired dependencies for one command
struct App {
    config: ResolvedConfig,
    registry: ProviderRegistry,
    progress: Arc<dyn CollaborationProgress>,
    logger: Option<Arc<dyn ConversationLogger>>,
    output: OutputFormat,
}

impl App {
    async fn run(self, command: Command) -> Result<()> {
        let agents = self.config.agents.clone();
        let params = self.config.params.clone();
        let generation = &self.config.generation;

        let output = match command {
            Command::Title { topic } => {
                let mut generator =
                    TitleGenerator::new(agents.title, &self.registry, params, &generation.title)?
                        .with_progress(self.progress.clone());
                if let Some(logger) = &self.logger {
                    generator = generator.with_logger(logger.clone());
                }
                let outcome = generator.generate(&topic).await;
                match self.output {
                    OutputFormat::Full => ConsoleFormatter::format_title(&outcome),
                    OutputFormat::Plain => ConsoleFormatter::format_plain(&outcome.value),
                    OutputFormat::Json => ConsoleFormatter::format_json(&outcome),
                }
            }
            Command::Toc { title, topic } => {
                let mut generator =
                    TocGenerator::new(agents.toc, &self.registry, params, &generation.toc)?
                        .with_progress(self.progress.clone());
                if let Some(logger) = &self.logger {
                    generator = generator.with_logger(logger.clone());
                }
                let outcome = generator.generate(&title, &topic).await;
                match self.output {
                    OutputFormat::Full => ConsoleFormatter::format_toc(&outcome),
                    OutputFormat::Plain => ConsoleFormatter::format_outline(&outcome.value),
                    OutputFormat::Json => ConsoleFormatter::format_json(&outcome),
                }
            }
            Command::Section {
                book_title,
                id,
                title,
                parent,
                previous,
            } => {
                let mut generator = SectionGenerator::new(
                    agents.section,
                    &self.registry,
                    params,
                    &generation.section,
                )?
                .with_progress(self.progress.clone());
                if let Some(logger) = &self.logger {
                    generator = generator.with_logger(logger.clone());
                }
                let mut request = SectionRequest::new(book_title, &id, &title).with_previous(previous);
                if let Some(parent) = parent {
                    request = request.with_parent(parent);
                }
                let outcome = generator.generate(&request).await;
                match self.output {
                    OutputFormat::Full => ConsoleFormatter::format_section(&id, &title, &outcome),
                    OutputFormat::Plain => ConsoleFormatter::format_plain(&outcome.value.content),
                    OutputFormat::Json => ConsoleFormatter::format_json(&outcome),
                }
            }
            Command::Book {
                topic,
                title,
                outline,
                sections,
            } => {
                let mut input = WriteBookInput::new(topic);
                if let Some(title) = title {
                    input = input.with_title(title);
                }
                if let Some(path) = outline {
                    let outline = read_outline(&path)?;
                    if outline.len() < generation.toc.min_chapters {
                        warn!(
                            "Outline {} has {} chapters, fewer than the configured {}",
                            path.display(),
                            outline.len(),
                            generation.toc.min_chapters
                        );
                    }
                    input = input.with_outline(outline);
                }
                if !sections.is_empty() {
                    input = input.only_sections(sections);
                }

                let mut use_case = WriteBookUseCase::new(agents, &self.registry, params, generation)?
                    .with_progress(self.progress.clone());
                if let Some(logger) = &self.logger {
                    use_case = use_case.with_logger(logger.clone());
                }
                let draft = use_case.execute(input).await;
                match self.output {
                    OutputFormat::Full | OutputFormat::Plain => ConsoleFormatter::format_book(&draft),
                    OutputFormat::Json => ConsoleFormatter::format_json(&draft),
                }
            }
            Command::ShowConfig => return Ok(()),
        };

        println!("{}", output);
        Ok(())
    }
}

/// Outline files are used as written: JSON or a numbered text list
fn read_outline(path: &Path) -> Result<Outline> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read outline {}", path.display()))?;
    let outline = parse_outline(&text);
    if outline.is_empty() {
        bail!("No chapters found in {}", path.display());
    }
    Ok(outline)
}
