use crossterm::event::KeyEvent;
use ratatui::prelude::*;

/// Key hint shown in the header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortcut {
  pub key: &'static str,
  pub label: &'static str,
  /// Sort position, ascending
  pub order: u8,
  /// Only relevant while a text input has focus
  pub while_typing: bool,
}

impl Shortcut {
  pub const fn new(key: &'static str, label: &'static str) -> Self {
    Self {
      key,
      label,
      order: u8::MAX,
      while_typing: false,
    }
  }

  pub const fn order(mut self, order: u8) -> Self {
    self.order = order;
    self
  }

  pub const fn while_typing(mut self) -> Self {
    self.while_typing = true;
    self
  }
}

/// What the App should do after a view handled a key
pub enum ViewAction {
  None,
  /// Open a view on top of this one
  Push(Box<dyn View>),
  /// Close this view
  Pop,
}

/// A screen in the App's view stack.
///
/// Views own their inputs (search box, category tabs) and report navigation
/// through `ViewAction`. Pending async work is picked up in `tick()`.
pub trait View {
  fn handle_key(&mut self, key: KeyEvent) -> ViewAction;

  fn render(&mut self, frame: &mut Frame, area: Rect);

  /// Label in the breadcrumb trail
  fn breadcrumb_label(&self) -> String;

  fn tick(&mut self) {}

  /// True while a text input owns the keyboard, so `:` is typed rather than
  /// opening the command prompt
  fn capturing_input(&self) -> bool {
    false
  }

  fn shortcuts(&self) -> Vec<Shortcut> {
    vec![Shortcut::new(":", "command").order(10), Shortcut::new("q", "back").order(30)]
  }
}
