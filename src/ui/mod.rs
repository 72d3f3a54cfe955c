pub mod components;
pub mod renderfns;
pub mod view;
pub mod views;

use crate::app::App;
use ratatui::prelude::*;
use ratatui::widgets::ListState;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &mut App) {
  let chunks = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // Header
      Constraint::Min(1),    // Current view
      Constraint::Length(1), // Breadcrumbs
    ])
    .split(frame.area());

  let api_url = app.config().api.url.clone();
  let section = app.section().label();
  let breadcrumbs = app.breadcrumbs();
  let status = app.status().map(String::from);

  let view = app.current_view_mut();
  let shortcuts = view.shortcuts();
  let input_active = view.capturing_input();
  renderfns::draw_header(frame, chunks[0], &api_url, section, &shortcuts, input_active);
  view.render(frame, chunks[1]);

  renderfns::draw_footer(frame, chunks[2], &breadcrumbs, status.as_deref());
  app.command_input().render_overlay(frame, chunks[1]);
}

/// Keep a list selection inside `len` items
pub fn ensure_valid_selection(state: &mut ListState, len: usize) {
  if len == 0 {
    state.select(None);
    return;
  }
  match state.selected() {
    None => state.select(Some(0)),
    Some(idx) if idx >= len => state.select(Some(len - 1)),
    Some(_) => {}
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_selection_clamped_to_shorter_list() {
    let mut state = ListState::default();
    state.select(Some(9));
    ensure_valid_selection(&mut state, 4);
    assert_eq!(state.selected(), Some(3));
  }

  #[test]
  fn test_selection_cleared_for_empty_list() {
    let mut state = ListState::default();
    state.select(Some(2));
    ensure_valid_selection(&mut state, 0);
    assert_eq!(state.selected(), None);
  }

  #[test]
  fn test_selection_defaults_to_first() {
    let mut state = ListState::default();
    ensure_valid_selection(&mut state, 3);
    assert_eq!(state.selected(), Some(0));
  }
}
