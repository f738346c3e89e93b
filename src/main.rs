use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};

use careerist::config::Config;
use careerist::orchestrator::Orchestrator;

mod cli;

use cli::commands::Commands;
use cli::{Cli, read_text_argument};

/// Inputs that end an interactive session
const EXIT_WORDS: &[&str] = &["exit", "quit", "выход"];

fn setup_logging(default_level: &str) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("careerist")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("careerist.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize result")?;
    println!("{}", json);
    Ok(())
}

async fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    let mut orchestrator = Orchestrator::new(config)?;

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
        if orchestrator.is_online() {
            println!("{} {} ({})", "GigaChat:".cyan(), config.llm.model, config.llm.api_url);
        } else {
            println!("{}", "GigaChat: offline".yellow());
        }
    }

    match &cli.command {
        Commands::Roadmap {
            direction,
            current,
            target,
        } => print_json(&orchestrator.create_roadmap(direction, current, target)),
        Commands::Templates { group } => print_json(&orchestrator.fetch_templates(group.as_deref())?),
        Commands::AnalyzeDoc { doc_type, text, file } => {
            let text = read_text_argument(text.as_deref(), file.as_deref())?;
            print_json(&orchestrator.review_document(&text, *doc_type))
        }
        Commands::AnalyzeVacancy { text, file } => {
            let text = read_text_argument(text.as_deref(), file.as_deref())?;
            print_json(&orchestrator.review_vacancy(&text))
        }
        Commands::Chat { message, pdf } => handle_chat_command(&mut orchestrator, message.as_deref(), pdf).await,
    }
}

async fn handle_chat_command(orchestrator: &mut Orchestrator, message: Option<&str>, pdfs: &[PathBuf]) -> Result<()> {
    for path in pdfs {
        let document = orchestrator.attach_document(path)?;
        println!("{} {}", "Прикреплён".green(), document.name);
    }

    match message {
        Some(message) => {
            let reply = orchestrator.chat(message).await?;
            print_json(&reply)
        }
        None => run_interactive_chat(orchestrator).await,
    }
}

async fn run_interactive_chat(orchestrator: &mut Orchestrator) -> Result<()> {
    info!("Interactive chat started");
    println!(
        "{}",
        "Запущен чат. Используй /attach <путь> для добавления документов, /docs для списка и 'exit' для выхода.".cyan()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("Вы: ");
        std::io::stdout().flush().context("Failed to flush stdout")?;

        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            println!();
            break;
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if EXIT_WORDS.contains(&input.to_lowercase().as_str()) {
            break;
        }

        if let Some(rest) = input
            .strip_prefix("/attach")
            .filter(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
        {
            attach_interactive(orchestrator, rest.trim());
            continue;
        }

        if input == "/docs" {
            list_documents(orchestrator);
            continue;
        }

        match orchestrator.chat(input).await {
            Ok(reply) => println!("{} {}", "Ассистент:".green(), reply.answer),
            Err(e) if e.is_transport() => {
                log::error!("GigaChat rejected the turn: {}", e);
                println!("{} {}", "GigaChat недоступен:".red(), e);
            }
            Err(e) => {
                log::error!("Chat turn failed: {}", e);
                println!("{} {}", "Ошибка:".red(), e);
            }
        }
    }

    info!("Interactive chat finished");
    Ok(())
}

fn attach_interactive(orchestrator: &mut Orchestrator, path: &str) {
    if path.is_empty() {
        println!("{}", "Укажи путь к файлу после /attach".yellow());
        return;
    }

    match orchestrator.attach_document(Path::new(path)) {
        Ok(document) => println!("{} {}", "Добавлен".green(), document.name),
        Err(e) => println!("{} {}", "Ошибка:".red(), e),
    }
}

fn list_documents(orchestrator: &Orchestrator) {
    let documents = orchestrator.attachments();
    if documents.is_empty() {
        println!("{}", "Документы не прикреплены".yellow());
        return;
    }

    for document in documents {
        println!(
            "  {} ({}, {} симв.)",
            document.name.cyan(),
            document.attached_at.format("%H:%M:%S"),
            document.excerpt.chars().count()
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    // Setup logging with the configured default level
    setup_logging(config.log_level.as_deref().unwrap_or("info")).context("Failed to setup logging")?;

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).await.context("Application failed")?;

    Ok(())
}
