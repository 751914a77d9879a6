use std::io::{self, Write};

use tango_config::ui::UiConfig;
use tango_types::AppEvent;

use crate::command::{Command, Field, HELP, parse_command};
use crate::events::{handle_events, write_form};
use crate::state::UiState;

/// What the loop should do after a line of input
#[derive(Debug)]
pub enum InputAction {
    Send(AppEvent),
    Quit,
    Nothing,
}

/// Terminal front end: turns typed lines into events and events into text
pub struct Shell<W: Write> {
    state: UiState,
    out: W,
    config: UiConfig,
}

impl<W: Write> Shell<W> {
    pub fn new(out: W, config: UiConfig) -> Self {
        Self {
            state: UiState::new(),
            out,
            config,
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn ocr_running(&self) -> bool {
        self.state.ocr_running
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn greet(&mut self) -> io::Result<()> {
        writeln!(self.out, "Type help for a list of commands")
    }

    pub fn prompt(&mut self) -> io::Result<()> {
        write!(self.out, "{}", self.config.prompt)?;
        self.out.flush()
    }

    pub fn handle_app_event(&mut self, event: AppEvent) -> io::Result<()> {
        handle_events(event, &mut self.state, &mut self.out)
    }

    pub fn show_progress(&mut self, fraction: f32) -> io::Result<()> {
        if !self.config.show_progress {
            return Ok(());
        }
        write!(self.out, "\rRecognizing... {:>3.0}%", fraction * 100.0)?;
        self.out.flush()
    }

    pub fn handle_input(&mut self, line: &str) -> io::Result<InputAction> {
        let command = match parse_command(line) {
            Ok(command) => command,
            Err(e) => {
                writeln!(self.out, "{e}")?;
                return Ok(InputAction::Nothing);
            }
        };

        let action = match command {
            Command::App(event) => InputAction::Send(event),
            Command::UseLine(n) => match self.state.lines.get(n - 1) {
                Some(line) => InputAction::Send(AppEvent::ParseText(line.text.clone())),
                None => {
                    writeln!(self.out, "No recognized line {n}")?;
                    InputAction::Nothing
                }
            },
            Command::Delete(id) => match self.state.cards.iter().find(|card| card.id == id) {
                Some(card) => InputAction::Send(card.delete_action()),
                None => {
                    writeln!(self.out, "No listed word {id}, type list")?;
                    InputAction::Nothing
                }
            },
            Command::SetField(field, value) => {
                let form = &mut self.state.form;
                match field {
                    Field::Japanese => form.japanese = value,
                    Field::Reading => form.reading = value,
                    Field::Meaning => form.meaning = value,
                }
                write_form(&self.state, &mut self.out)?;
                InputAction::Nothing
            }
            Command::ShowForm => {
                write_form(&self.state, &mut self.out)?;
                InputAction::Nothing
            }
            Command::ClearForm => {
                self.state.form = Default::default();
                InputAction::Nothing
            }
            Command::SubmitForm => InputAction::Send(AppEvent::AddWord(self.state.form.clone())),
            Command::Help => {
                writeln!(self.out, "{HELP}")?;
                InputAction::Nothing
            }
            Command::Quit => InputAction::Quit,
            Command::Empty => InputAction::Nothing,
        };

        Ok(action)
    }
}

#[cfg(test)]
mod tests {
    use tango_types::{RecognizedLine, VocabularyEntry};

    use super::*;

    fn shell() -> Shell<Vec<u8>> {
        Shell::new(Vec::new(), UiConfig::default())
    }

    fn output(shell: Shell<Vec<u8>>) -> String {
        String::from_utf8(shell.into_inner()).unwrap()
    }

    #[test]
    fn use_resolves_recognized_line() {
        let mut shell = shell();
        shell
            .handle_app_event(AppEvent::ShowLines(vec![RecognizedLine {
                text: "2. 食べる [たべる] to eat".to_string(),
                confidence: 88.0,
            }]))
            .unwrap();

        match shell.handle_input("use 1").unwrap() {
            InputAction::Send(AppEvent::ParseText(text)) => {
                assert_eq!(text, "2. 食べる [たべる] to eat")
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            shell.handle_input("use 2").unwrap(),
            InputAction::Nothing
        ));
        assert!(output(shell).contains("No recognized line 2"));
    }

    #[test]
    fn delete_goes_through_the_listed_card() {
        let mut shell = shell();
        assert!(matches!(
            shell.handle_input("delete 9").unwrap(),
            InputAction::Nothing
        ));

        shell
            .handle_app_event(AppEvent::ShowVocabulary(vec![VocabularyEntry {
                id: 9,
                japanese: "本".to_string(),
                reading: None,
                meaning: "book".to_string(),
            }]))
            .unwrap();

        assert!(matches!(
            shell.handle_input("delete 9").unwrap(),
            InputAction::Send(AppEvent::DeleteWord(9))
        ));
        assert!(output(shell).contains("No listed word 9, type list"));
    }

    #[test]
    fn reusing_a_line_does_not_carry_the_old_reading() {
        let mut shell = shell();
        shell.handle_input("set reading ねこ").unwrap();
        shell
            .handle_app_event(AppEvent::FillForm {
                japanese: "犬".to_string(),
                meaning: "dog".to_string(),
                focus: tango_types::FormFocus::Confirm,
            })
            .unwrap();

        match shell.handle_input("add").unwrap() {
            InputAction::Send(AppEvent::AddWord(form)) => {
                assert_eq!(form.japanese, "犬");
                assert_eq!(form.reading, "");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn add_submits_the_typed_form() {
        let mut shell = shell();
        shell.handle_input("set japanese 猫").unwrap();
        shell.handle_input("set reading ねこ").unwrap();
        shell.handle_input("set meaning cat").unwrap();

        match shell.handle_input("add").unwrap() {
            InputAction::Send(AppEvent::AddWord(form)) => {
                assert_eq!(form.japanese, "猫");
                assert_eq!(form.reading, "ねこ");
                assert_eq!(form.meaning, "cat");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn bad_command_prints_error_and_sends_nothing() {
        let mut shell = shell();
        assert!(matches!(
            shell.handle_input("teleport").unwrap(),
            InputAction::Nothing
        ));
        assert!(matches!(shell.handle_input("quit").unwrap(), InputAction::Quit));
        assert!(output(shell).contains("Unknown command 'teleport'"));
    }

    #[test]
    fn progress_respects_config() {
        let mut quiet = Shell::new(
            Vec::new(),
            UiConfig {
                show_progress: false,
                ..UiConfig::default()
            },
        );
        quiet.show_progress(0.5).unwrap();
        assert!(output(quiet).is_empty());

        let mut loud = shell();
        loud.show_progress(0.5).unwrap();
        assert_eq!(output(loud), "\rRecognizing...  50%");
    }
}
