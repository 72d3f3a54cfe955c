use super::KeyResult;
use crate::ui::renderfns::truncate;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Tab strip for choosing a category: "All" followed by each category.
///
/// PageUp/PageDown move between tabs and wrap around.
#[derive(Debug, Clone, Default)]
pub struct CategoryBar {
  categories: Vec<String>,
  selected: usize, // 0 = All, 1+ = index into categories
}

impl CategoryBar {
  pub fn new(categories: Vec<String>) -> Self {
    Self {
      categories,
      selected: 0,
    }
  }

  /// Selected category, `None` for "All"
  pub fn selected(&self) -> Option<&str> {
    self
      .selected
      .checked_sub(1)
      .and_then(|i| self.categories.get(i))
      .map(String::as_str)
  }

  /// Emits the newly selected category (`None` for "All")
  pub fn handle_key(&mut self, key: KeyEvent) -> KeyResult<Option<String>> {
    if self.categories.is_empty() {
      return KeyResult::NotHandled;
    }

    match key.code {
      KeyCode::PageUp => self.navigate(-1),
      KeyCode::PageDown => self.navigate(1),
      _ => return KeyResult::NotHandled,
    }
    KeyResult::Event(self.selected().map(String::from))
  }

  fn navigate(&mut self, direction: i32) {
    let total_tabs = self.categories.len() + 1;
    self.selected = if direction > 0 {
      (self.selected + 1) % total_tabs
    } else if self.selected == 0 {
      total_tabs - 1
    } else {
      self.selected - 1
    };
  }

  /// Render the tabs, scrolled so the selected one stays visible
  pub fn render(&self, frame: &mut Frame, area: Rect) {
    let labels: Vec<String> = std::iter::once("All".to_string())
      .chain(self.categories.iter().map(|c| truncate(c, 16)))
      .collect();

    // Skip leading tabs until the selected one fits
    let width = area.width as usize;
    let mut start = 0;
    while start < self.selected {
      let used: usize = labels[start..=self.selected].iter().map(|l| l.len() + 3).sum();
      if used <= width.saturating_sub(12) {
        break;
      }
      start += 1;
    }

    let mut spans = vec![Span::styled("[category] ", Style::default().fg(Color::Yellow))];
    for (idx, label) in labels.iter().enumerate().skip(start) {
      if idx > start {
        spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));
      }
      let style = if idx == self.selected {
        Style::default().fg(Color::Black).bg(Color::Cyan)
      } else {
        Style::default().fg(Color::Gray)
      };
      spans.push(Span::styled(format!(" {} ", label), style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crossterm::event::KeyModifiers;

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
  }

  fn bar() -> CategoryBar {
    CategoryBar::new(vec!["laptops".into(), "groceries".into()])
  }

  #[test]
  fn test_starts_on_all() {
    assert_eq!(bar().selected(), None);
  }

  #[test]
  fn test_page_down_cycles_and_wraps() {
    let mut bar = bar();
    assert_eq!(
      bar.handle_key(key(KeyCode::PageDown)),
      KeyResult::Event(Some("laptops".into()))
    );
    bar.handle_key(key(KeyCode::PageDown));
    assert_eq!(bar.selected(), Some("groceries"));
    assert_eq!(bar.handle_key(key(KeyCode::PageDown)), KeyResult::Event(None));
  }

  #[test]
  fn test_page_up_from_all_wraps_to_last() {
    let mut bar = bar();
    bar.handle_key(key(KeyCode::PageUp));
    assert_eq!(bar.selected(), Some("groceries"));
  }

  #[test]
  fn test_empty_bar_ignores_keys() {
    let mut bar = CategoryBar::new(Vec::new());
    assert_eq!(bar.handle_key(key(KeyCode::PageDown)), KeyResult::NotHandled);
  }
}
