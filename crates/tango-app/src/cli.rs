use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tango_types::{AppEvent, WordForm};

#[derive(Parser)]
#[command(author, version, about = "Build a Japanese vocabulary list from images")]
pub struct Cli {
    /// Config file (JSON) used instead of a profile
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Profile name
    #[arg(long, global = true, default_value = "main")]
    pub profile: String,

    #[command(subcommand)]
    pub cmd: Option<Cmd>,
}

#[derive(Subcommand)]
pub enum Cmd {
    /// Interactive shell (default)
    Shell,
    /// Recognize an image and print the confident lines
    Ocr { image: PathBuf },
    /// Split a line into word and meaning
    Parse { text: String },
    /// Add a word
    Add {
        japanese: String,
        meaning: String,
        #[arg(long)]
        reading: Option<String>,
    },
    /// List saved words
    List,
    /// Delete a word by id
    Delete { id: u64 },
    /// Shorten a URL
    Shorten { url: String },
    /// Evaluate arithmetic
    Calc { expr: String },
    /// Show the note, or replace it
    Note { text: Option<String> },
    /// Todo list
    Todo {
        #[command(subcommand)]
        action: Option<TodoCmd>,
    },
    /// Current date and time
    Clock,
    /// Profile management
    Profile {
        #[command(subcommand)]
        action: ProfileCmd,
    },
}

#[derive(Subcommand)]
pub enum TodoCmd {
    Add { text: String },
    Done { id: String },
    Rm { id: String },
    List,
}

#[derive(Subcommand)]
pub enum ProfileCmd {
    /// Create a profile copied from main
    New { name: String },
}

impl Cmd {
    /// Events a one-shot command sends; `None` for the shell and local commands
    pub fn into_events(self) -> Option<Vec<AppEvent>> {
        let events = match self {
            Cmd::Shell | Cmd::Profile { .. } => return None,
            Cmd::Ocr { image } => vec![AppEvent::LoadImage(image), AppEvent::StartOcr],
            Cmd::Parse { text } => vec![AppEvent::ParseText(text)],
            Cmd::Add {
                japanese,
                meaning,
                reading,
            } => vec![AppEvent::AddWord(WordForm {
                japanese,
                reading: reading.unwrap_or_default(),
                meaning,
            })],
            Cmd::List => vec![AppEvent::ListWords],
            Cmd::Delete { id } => vec![AppEvent::DeleteWord(id)],
            Cmd::Shorten { url } => vec![AppEvent::Shorten(url)],
            Cmd::Calc { expr } => vec![AppEvent::Calculate(expr)],
            Cmd::Note { text: None } => vec![AppEvent::ShowNote],
            Cmd::Note { text: Some(text) } => vec![AppEvent::SaveNote(text)],
            Cmd::Todo { action } => vec![match action {
                Some(TodoCmd::Add { text }) => AppEvent::AddTodo(text),
                Some(TodoCmd::Done { id }) => AppEvent::ToggleTodo(id),
                Some(TodoCmd::Rm { id }) => AppEvent::RemoveTodo(id),
                Some(TodoCmd::List) | None => AppEvent::ListTodos,
            }],
            Cmd::Clock => vec![AppEvent::ShowClock],
        };
        Some(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events(args: &[&str]) -> Option<Vec<AppEvent>> {
        let cli = Cli::try_parse_from(args).unwrap();
        cli.cmd.and_then(Cmd::into_events)
    }

    #[test]
    fn no_command_means_shell() {
        let cli = Cli::try_parse_from(["tango"]).unwrap();
        assert!(cli.cmd.is_none());
        assert_eq!(cli.profile, "main");
    }

    #[test]
    fn ocr_loads_then_recognizes() {
        let events = events(&["tango", "ocr", "page.png"]).unwrap();
        assert!(matches!(&events[0], AppEvent::LoadImage(p) if p == &PathBuf::from("page.png")));
        assert!(matches!(events[1], AppEvent::StartOcr));
    }

    #[test]
    fn add_with_optional_reading() {
        let events = events(&["tango", "add", "猫", "cat", "--reading", "ねこ"]).unwrap();
        match &events[0] {
            AppEvent::AddWord(form) => {
                assert_eq!(form.japanese, "猫");
                assert_eq!(form.reading, "ねこ");
                assert_eq!(form.meaning, "cat");
            }
            _ => panic!("expected AddWord"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["tango", "list", "--profile", "study"]).unwrap();
        assert_eq!(cli.profile, "study");
        assert!(events(&["tango", "profile", "new", "study"]).is_none());
        assert!(matches!(
            events(&["tango", "todo"]).unwrap()[0],
            AppEvent::ListTodos
        ));
    }
}
