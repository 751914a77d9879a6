use std::path::PathBuf;

use tango_types::AppEvent;

pub const HELP: &str = "\
load <path>               load an image file
paste                     paste an image from the clipboard
ocr                       recognize text in the current image
use <n>                   fill the form from recognized line n
parse <text>              fill the form from typed text
set japanese|reading|meaning <text>
form                      show the form
clear                     clear the form
add                       save the form as a new word
list                      show the vocabulary
delete <id>               delete a listed word
shorten <url>             shorten a URL
copy                      copy the last short URL
calc <expr>               evaluate arithmetic
note [text]               show the note, or replace it
todo [add <text> | done <id> | rm <id>]
stopwatch                 start or stop the stopwatch
timer <minutes>           start a countdown
clock                     show the date and time
help
quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Japanese,
    Reading,
    Meaning,
}

/// A parsed shell line. Some commands only touch UI state.
#[derive(Debug, Clone)]
pub enum Command {
    App(AppEvent),
    UseLine(usize),
    Delete(u64),
    SetField(Field, String),
    ShowForm,
    ClearForm,
    SubmitForm,
    Help,
    Quit,
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Unknown command '{0}', type help")]
    Unknown(String),

    #[error("Missing {0}")]
    MissingArgument(&'static str),

    #[error("Invalid {what}: {value}")]
    InvalidArgument { what: &'static str, value: String },
}

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };

    let required = |what: &'static str| {
        if rest.is_empty() {
            Err(CommandError::MissingArgument(what))
        } else {
            Ok(rest.to_string())
        }
    };

    let command = match name {
        "" => Command::Empty,
        "load" => Command::App(AppEvent::LoadImage(PathBuf::from(required("path")?))),
        "paste" => Command::App(AppEvent::PasteImage),
        "ocr" => Command::App(AppEvent::StartOcr),
        "use" => {
            let value = required("line number")?;
            match value.parse::<usize>() {
                Ok(n) if n > 0 => Command::UseLine(n),
                _ => {
                    return Err(CommandError::InvalidArgument {
                        what: "line number",
                        value,
                    });
                }
            }
        }
        "parse" => Command::App(AppEvent::ParseText(required("text")?)),
        "set" => parse_set(rest)?,
        "form" => Command::ShowForm,
        "clear" => Command::ClearForm,
        "add" => Command::SubmitForm,
        "list" => Command::App(AppEvent::ListWords),
        "delete" => {
            let value = required("word id")?;
            let id = value.parse::<u64>().map_err(|_| CommandError::InvalidArgument {
                what: "word id",
                value: value.clone(),
            })?;
            Command::Delete(id)
        }
        // An empty URL still goes to the app, which answers with a prompt
        "shorten" => Command::App(AppEvent::Shorten(rest.to_string())),
        "copy" => Command::App(AppEvent::CopyShortUrl),
        "calc" => Command::App(AppEvent::Calculate(required("expression")?)),
        "note" if rest.is_empty() => Command::App(AppEvent::ShowNote),
        "note" => Command::App(AppEvent::SaveNote(rest.to_string())),
        "todo" => parse_todo(rest)?,
        "stopwatch" => Command::App(AppEvent::ToggleStopwatch),
        "timer" => Command::App(AppEvent::StartTimer(required("minutes")?)),
        "clock" => Command::App(AppEvent::ShowClock),
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };

    Ok(command)
}

fn parse_set(rest: &str) -> Result<Command, CommandError> {
    let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    let field = match field {
        "japanese" | "word" => Field::Japanese,
        "reading" => Field::Reading,
        "meaning" => Field::Meaning,
        "" => return Err(CommandError::MissingArgument("field")),
        other => {
            return Err(CommandError::InvalidArgument {
                what: "field",
                value: other.to_string(),
            });
        }
    };
    Ok(Command::SetField(field, value.trim().to_string()))
}

fn parse_todo(rest: &str) -> Result<Command, CommandError> {
    let (action, arg) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    let arg = arg.trim();

    let needs = |what: &'static str| {
        if arg.is_empty() {
            Err(CommandError::MissingArgument(what))
        } else {
            Ok(arg.to_string())
        }
    };

    let event = match action {
        "" | "list" => AppEvent::ListTodos,
        "add" => AppEvent::AddTodo(needs("todo text")?),
        "done" => AppEvent::ToggleTodo(needs("todo id")?),
        "rm" => AppEvent::RemoveTodo(needs("todo id")?),
        other => {
            return Err(CommandError::InvalidArgument {
                what: "todo action",
                value: other.to_string(),
            });
        }
    };
    Ok(Command::App(event))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_app_commands() {
        assert!(matches!(
            parse_command("load  ./page.png"),
            Ok(Command::App(AppEvent::LoadImage(p))) if p == PathBuf::from("./page.png")
        ));
        assert!(matches!(parse_command("ocr"), Ok(Command::App(AppEvent::StartOcr))));
        assert!(matches!(
            parse_command("parse 1. 猫 [ねこ] cat"),
            Ok(Command::App(AppEvent::ParseText(t))) if t == "1. 猫 [ねこ] cat"
        ));
        assert!(matches!(
            parse_command("note"),
            Ok(Command::App(AppEvent::ShowNote))
        ));
        assert!(matches!(
            parse_command("note buy milk"),
            Ok(Command::App(AppEvent::SaveNote(t))) if t == "buy milk"
        ));
        assert!(matches!(
            parse_command("shorten"),
            Ok(Command::App(AppEvent::Shorten(u))) if u.is_empty()
        ));
    }

    #[test]
    fn parses_local_commands() {
        assert!(matches!(parse_command("use 2"), Ok(Command::UseLine(2))));
        assert!(matches!(
            parse_command("delete 1712345678901"),
            Ok(Command::Delete(1712345678901))
        ));
        assert!(matches!(
            parse_command("set meaning to eat"),
            Ok(Command::SetField(Field::Meaning, v)) if v == "to eat"
        ));
        assert!(matches!(
            parse_command("set reading"),
            Ok(Command::SetField(Field::Reading, v)) if v.is_empty()
        ));
        assert!(matches!(parse_command("add"), Ok(Command::SubmitForm)));
        assert!(matches!(parse_command("   "), Ok(Command::Empty)));
        assert!(matches!(parse_command("exit"), Ok(Command::Quit)));
    }

    #[test]
    fn todo_subcommands() {
        assert!(matches!(
            parse_command("todo"),
            Ok(Command::App(AppEvent::ListTodos))
        ));
        assert!(matches!(
            parse_command("todo add water plants"),
            Ok(Command::App(AppEvent::AddTodo(t))) if t == "water plants"
        ));
        assert!(matches!(
            parse_command("todo done 3fa8"),
            Ok(Command::App(AppEvent::ToggleTodo(id))) if id == "3fa8"
        ));
        assert_eq!(
            parse_command("todo rm").unwrap_err(),
            CommandError::MissingArgument("todo id")
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(
            parse_command("fly").unwrap_err(),
            CommandError::Unknown("fly".to_string())
        );
        assert_eq!(
            parse_command("use 0").unwrap_err(),
            CommandError::InvalidArgument {
                what: "line number",
                value: "0".to_string()
            }
        );
        assert_eq!(
            parse_command("delete abc").unwrap_err(),
            CommandError::InvalidArgument {
                what: "word id",
                value: "abc".to_string()
            }
        );
        assert_eq!(
            parse_command("load").unwrap_err(),
            CommandError::MissingArgument("path")
        );
        assert!(parse_command("set colour red").is_err());
    }
}
