use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "ragtube",
    version,
    about = "Ask questions about YouTube videos through a RagTube backend"
)]
pub struct Cli {
    /// Config file (default: ~/.ragtube/ragtube.toml, or $RAGTUBE_CONFIG).
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Backend base URL, overriding the config file.
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Stream the answer to one question.
    Ask {
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },
    /// Load a video transcript into the knowledge base.
    Ingest { url: String },
    /// Interactive session: /load <url>, /history, /clear, /quit.
    Chat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ask_joins_words() {
        let cli = Cli::parse_from(["ragtube", "ask", "what", "is", "this?"]);
        match cli.command {
            Command::Ask { question } => assert_eq!(question.join(" "), "what is this?"),
            other => panic!("expected ask, got {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "ragtube",
            "ingest",
            "https://youtu.be/x",
            "--api-base",
            "http://b:1",
        ]);
        assert_eq!(cli.api_base.as_deref(), Some("http://b:1"));
        assert!(matches!(cli.command, Command::Ingest { url } if url == "https://youtu.be/x"));
    }

    #[test]
    fn ask_requires_a_question() {
        assert!(Cli::try_parse_from(["ragtube", "ask"]).is_err());
    }

    #[test]
    fn definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
