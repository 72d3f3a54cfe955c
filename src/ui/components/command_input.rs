use super::input::{InputResult, TextInput};
use super::KeyResult;
use crate::commands::{self, Command};
use crate::ui::renderfns::draw_prompt_overlay;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;

/// `:` command prompt with autocomplete
#[derive(Debug, Clone, Default)]
pub struct CommandInput {
  input: TextInput,
  active: bool,
  selected_suggestion: usize,
}

impl CommandInput {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn is_active(&self) -> bool {
    self.active
  }

  pub fn activate(&mut self) {
    self.active = true;
    self.input.clear();
    self.selected_suggestion = 0;
  }

  fn suggestions(&self) -> Vec<&'static Command> {
    commands::get_suggestions(&self.input.value())
  }

  fn close(&mut self) {
    self.active = false;
    self.input.clear();
    self.selected_suggestion = 0;
  }

  /// Emits the resolved command on Enter. Only call while active.
  pub fn handle_key(&mut self, key: KeyEvent) -> KeyResult<Option<&'static Command>> {
    let count = self.suggestions().len();
    match key.code {
      KeyCode::Tab | KeyCode::Down if count > 0 => {
        self.selected_suggestion = (self.selected_suggestion + 1) % count;
        return KeyResult::Handled;
      }
      KeyCode::BackTab | KeyCode::Up if count > 0 => {
        self.selected_suggestion = (self.selected_suggestion + count - 1) % count;
        return KeyResult::Handled;
      }
      _ => {}
    }

    match self.input.handle_key(key) {
      InputResult::Changed => {
        self.selected_suggestion = 0;
        KeyResult::Handled
      }
      InputResult::Submitted(_) => {
        let command = self.suggestions().get(self.selected_suggestion).copied();
        self.close();
        KeyResult::Event(command)
      }
      InputResult::Cancelled => {
        self.close();
        KeyResult::Handled
      }
      InputResult::Moved | InputResult::NotHandled => KeyResult::Handled,
    }
  }

  pub fn render_overlay(&self, frame: &mut Frame, area: Rect) {
    if !self.active {
      return;
    }
    let suggestions: Vec<(&str, &str)> = self
      .suggestions()
      .iter()
      .map(|cmd| (cmd.name, cmd.description))
      .collect();
    draw_prompt_overlay(
      frame,
      area,
      " Command ",
      ":",
      &self.input.value(),
      &suggestions,
      self.selected_suggestion,
    );
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crossterm::event::KeyModifiers;

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
  }

  fn submit(input: &mut CommandInput, text: &str) -> KeyResult<Option<&'static Command>> {
    input.activate();
    for c in text.chars() {
      input.handle_key(key(KeyCode::Char(c)));
    }
    input.handle_key(key(KeyCode::Enter))
  }

  #[test]
  fn test_submit_resolves_alias() {
    let mut input = CommandInput::new();
    match submit(&mut input, "p") {
      KeyResult::Event(Some(cmd)) => assert_eq!(cmd.name, "products"),
      other => panic!("unexpected {:?}", other),
    }
    assert!(!input.is_active());
  }

  #[test]
  fn test_unknown_command_resolves_to_none() {
    let mut input = CommandInput::new();
    assert_eq!(submit(&mut input, "zzz"), KeyResult::Event(None));
  }

  #[test]
  fn test_tab_cycles_suggestions() {
    let mut input = CommandInput::new();
    input.activate();
    input.handle_key(key(KeyCode::Tab));
    match input.handle_key(key(KeyCode::Enter)) {
      KeyResult::Event(Some(cmd)) => assert_eq!(cmd.name, commands::COMMANDS[1].name),
      other => panic!("unexpected {:?}", other),
    }
  }
}
