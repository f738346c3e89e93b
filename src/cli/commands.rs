//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - roadmap: study plan for a direction
//! - templates: résumé and cover letter templates
//! - analyze-doc / analyze-vacancy: text reviews
//! - chat: single message or interactive session

use careerist::agents::DocumentKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Careerist - career and learning assistant
#[derive(Parser, Debug)]
#[command(name = "careerist")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a study roadmap
    Roadmap {
        /// Direction (frontend, backend, data, ...)
        #[arg(long)]
        direction: String,

        /// Current level (e.g. выпускник)
        #[arg(long)]
        current: String,

        /// Target level (e.g. junior)
        #[arg(long)]
        target: String,
    },

    /// Résumé and cover letter templates
    Templates {
        /// Project group (e.g. 'ИТ-продукты')
        #[arg(long)]
        group: Option<String>,
    },

    /// Review a résumé or cover letter
    AnalyzeDoc {
        /// Document type
        #[arg(long = "type", value_enum)]
        doc_type: DocumentKind,

        /// Text to review
        #[arg(long)]
        text: Option<String>,

        /// File with the text
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Check a job posting for red and green flags
    AnalyzeVacancy {
        /// Posting text
        #[arg(long)]
        text: Option<String>,

        /// File with the posting
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Chat with the assistant
    Chat {
        /// Single message; omit for an interactive session
        #[arg(long)]
        message: Option<String>,

        /// Document to attach (repeatable)
        #[arg(long = "pdf")]
        pdf: Vec<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["careerist"]).is_err());
    }

    #[test]
    fn test_cli_global_flags() {
        let cli = Cli::try_parse_from(["careerist", "templates", "-v", "-c", "/tmp/careerist.yml"]).unwrap();
        assert!(cli.is_verbose());
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/careerist.yml")));
    }

    #[test]
    fn test_roadmap_command() {
        let cli = Cli::try_parse_from([
            "careerist",
            "roadmap",
            "--direction",
            "frontend",
            "--current",
            "выпускник",
            "--target",
            "junior",
        ])
        .unwrap();
        match cli.command {
            Commands::Roadmap {
                direction,
                current,
                target,
            } => {
                assert_eq!(direction, "frontend");
                assert_eq!(current, "выпускник");
                assert_eq!(target, "junior");
            }
            _ => panic!("Expected roadmap command"),
        }
    }

    #[test]
    fn test_roadmap_requires_all_levels() {
        assert!(Cli::try_parse_from(["careerist", "roadmap", "--direction", "frontend"]).is_err());
    }

    #[test]
    fn test_templates_group() {
        let cli = Cli::try_parse_from(["careerist", "templates", "--group", "ИТ-продукты"]).unwrap();
        match cli.command {
            Commands::Templates { group } => assert_eq!(group.as_deref(), Some("ИТ-продукты")),
            _ => panic!("Expected templates command"),
        }
    }

    #[test]
    fn test_analyze_doc_type() {
        let cli = Cli::try_parse_from(["careerist", "analyze-doc", "--type", "cover", "--text", "Здравствуйте"]).unwrap();
        match cli.command {
            Commands::AnalyzeDoc { doc_type, text, file } => {
                assert_eq!(doc_type, DocumentKind::Cover);
                assert_eq!(text.as_deref(), Some("Здравствуйте"));
                assert!(file.is_none());
            }
            _ => panic!("Expected analyze-doc command"),
        }
    }

    #[test]
    fn test_analyze_doc_rejects_unknown_type() {
        assert!(Cli::try_parse_from(["careerist", "analyze-doc", "--type", "letter"]).is_err());
    }

    #[test]
    fn test_analyze_vacancy_file() {
        let cli = Cli::try_parse_from(["careerist", "analyze-vacancy", "--file", "job.txt"]).unwrap();
        match cli.command {
            Commands::AnalyzeVacancy { text, file } => {
                assert!(text.is_none());
                assert_eq!(file, Some(PathBuf::from("job.txt")));
            }
            _ => panic!("Expected analyze-vacancy command"),
        }
    }

    #[test]
    fn test_chat_repeated_pdf() {
        let cli = Cli::try_parse_from(["careerist", "chat", "--pdf", "a.pdf", "--pdf", "b.pdf"]).unwrap();
        match cli.command {
            Commands::Chat { message, pdf } => {
                assert!(message.is_none());
                assert_eq!(pdf, vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")]);
            }
            _ => panic!("Expected chat command"),
        }
    }
}
