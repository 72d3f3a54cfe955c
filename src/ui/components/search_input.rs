use super::input::{InputResult, TextInput};
use super::KeyResult;
use crate::ui::renderfns::draw_prompt_overlay;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;

/// Events emitted by search input that parent needs to handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
  /// Text changed; emitted on every edit, and with "" when cancelled
  Changed(String),
  /// Overlay closed, search text kept
  Submitted,
}

/// `/` search box shown as an overlay while active
#[derive(Debug, Clone, Default)]
pub struct SearchInput {
  input: TextInput,
  active: bool,
}

impl SearchInput {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn is_active(&self) -> bool {
    self.active
  }

  pub fn query(&self) -> String {
    self.input.value()
  }

  /// Handle a key event, including the activating `/`
  pub fn handle_key(&mut self, key: KeyEvent) -> KeyResult<SearchEvent> {
    if !self.active {
      if key.code == KeyCode::Char('/') {
        // Reopening edits the current search instead of starting over
        self.active = true;
        return KeyResult::Handled;
      }
      return KeyResult::NotHandled;
    }

    match self.input.handle_key(key) {
      InputResult::Changed => KeyResult::Event(SearchEvent::Changed(self.input.value())),
      InputResult::Moved => KeyResult::Handled,
      InputResult::Submitted(_) => {
        self.active = false;
        KeyResult::Event(SearchEvent::Submitted)
      }
      InputResult::Cancelled => {
        self.active = false;
        if self.input.is_empty() {
          return KeyResult::Handled;
        }
        self.input.clear();
        KeyResult::Event(SearchEvent::Changed(String::new()))
      }
      InputResult::NotHandled => KeyResult::Handled,
    }
  }

  pub fn render_overlay(&self, frame: &mut Frame, area: Rect) {
    if self.active {
      draw_prompt_overlay(frame, area, " Search ", "/", &self.input.value(), &[], 0);
    }
  }
}
