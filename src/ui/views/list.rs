use std::sync::Arc;

use crate::api::ApiClient;
use crate::listing::{ListController, ListingSettings, ListingView, PageFetcher, PageSource};
use crate::ui::components::{CategoryBar, KeyResult, SearchEvent, SearchInput};
use crate::ui::ensure_valid_selection;
use crate::ui::view::{Shortcut, View, ViewAction};
use crate::ui::views::rows::RecordDisplay;
use crate::ui::views::DetailView;
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

/// Paged, searchable list of one collection
pub struct ListView<R: RecordDisplay> {
  client: ApiClient,
  controller: ListController<R>,
  list_state: ListState,
  search: SearchInput,
  categories: Option<CategoryBar>,
  /// Offset of the page the selection belongs to
  shown_offset: u64,
  loaded: bool,
}

impl<R: RecordDisplay> ListView<R> {
  pub fn new(client: ApiClient, settings: ListingSettings) -> Self {
    let fetcher: Arc<dyn PageFetcher<R>> = Arc::new(client.clone());
    Self {
      client,
      controller: ListController::new(R::COLLECTION, fetcher, settings),
      list_state: ListState::default(),
      search: SearchInput::new(),
      categories: None,
      shown_offset: 0,
      loaded: false,
    }
  }

  /// Show a category tab strip above the list
  pub fn with_categories(mut self, categories: Vec<String>) -> Self {
    self.categories = Some(CategoryBar::new(categories));
    self
  }

  /// Load the first page the first time the list is shown
  pub fn ensure_loaded(&mut self) {
    if !self.loaded {
      self.loaded = true;
      self.controller.load();
    }
  }

  pub fn clear_cache(&mut self) {
    self.controller.clear_cache();
  }

  fn listing(&self) -> &ListingView<R> {
    self.controller.view()
  }

  fn selected_record(&self) -> Option<&R> {
    self
      .list_state
      .selected()
      .and_then(|idx| self.listing().records.get(idx))
  }

  fn title(&self) -> String {
    let mut title = format!(" {}", capitalize(R::COLLECTION));
    let committed = self.controller.committed();
    if let Some(search) = &committed.search {
      title.push_str(&format!(" [/{}]", search));
    }
    if let Some(category) = &committed.category {
      title.push_str(&format!(" [{}]", category));
    }
    if self.listing().loading {
      title.push_str(" (loading...)");
    } else if self.controller.search_pending() {
      title.push_str(" (typing...)");
    }
    title.push(' ');
    title
  }

  fn status_line(&self) -> Line<'static> {
    let listing = self.listing();
    let mut spans = vec![Span::styled(
      format!(" {}", listing.showing()),
      Style::default().fg(Color::Gray),
    )];

    let page_count = self.controller.page_count();
    if page_count > 0 {
      spans.push(Span::styled(
        format!("  page {}/{}", self.controller.page_index() + 1, page_count),
        Style::default().fg(Color::DarkGray),
      ));
    }

    match (listing.source, listing.cached_at) {
      (Some(PageSource::Cache), Some(at)) => spans.push(Span::styled(
        format!("  cached {}", at.with_timezone(&Local).format("%H:%M:%S")),
        Style::default().fg(Color::DarkGray),
      )),
      (Some(PageSource::Network), _) => {
        spans.push(Span::styled("  live", Style::default().fg(Color::DarkGray)))
      }
      _ => {}
    }

    spans.push(Span::styled(
      format!("  {} cached", self.controller.cached_pages()),
      Style::default().fg(Color::DarkGray),
    ));

    if let Some(error) = &listing.error {
      spans.push(Span::styled(
        format!("  {} (r to retry)", error),
        Style::default().fg(Color::Red),
      ));
    }
    Line::from(spans)
  }

  fn render_list(&mut self, frame: &mut Frame, area: Rect) {
    let offset = self.listing().offset;
    if offset != self.shown_offset {
      self.shown_offset = offset;
      self.list_state.select(Some(0));
    }
    let len = self.listing().records.len();
    ensure_valid_selection(&mut self.list_state, len);

    let block = Block::default()
      .title(self.title())
      .title_alignment(Alignment::Center)
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Blue));

    let listing = self.listing();
    if listing.records.is_empty() {
      let content = if listing.loading {
        "Loading..."
      } else if listing.error.is_some() {
        "Failed to load. Press 'r' to retry."
      } else {
        "No results."
      };
      let paragraph = Paragraph::new(content)
        .block(block)
        .style(Style::default().fg(Color::DarkGray));
      frame.render_widget(paragraph, area);
      return;
    }

    let items: Vec<ListItem> = listing
      .records
      .iter()
      .map(|record| ListItem::new(record.row()))
      .collect();
    let list = List::new(items)
      .block(block)
      .highlight_style(
        Style::default()
          .bg(Color::DarkGray)
          .add_modifier(Modifier::BOLD),
      )
      .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut self.list_state);
  }
}

impl<R: RecordDisplay> View for ListView<R> {
  fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
    match self.search.handle_key(key) {
      KeyResult::Event(SearchEvent::Changed(text)) => {
        self.controller.on_search_text_changed(text);
        return ViewAction::None;
      }
      KeyResult::Event(SearchEvent::Submitted) => {
        self.controller.submit_search();
        return ViewAction::None;
      }
      KeyResult::Handled => return ViewAction::None,
      KeyResult::NotHandled => {}
    }

    if let Some(bar) = &mut self.categories {
      match bar.handle_key(key) {
        KeyResult::Event(category) => {
          self.controller.set_category(category);
          return ViewAction::None;
        }
        KeyResult::Handled => return ViewAction::None,
        KeyResult::NotHandled => {}
      }
    }

    match key.code {
      KeyCode::Char('j') | KeyCode::Down => self.list_state.select_next(),
      KeyCode::Char('k') | KeyCode::Up => self.list_state.select_previous(),
      KeyCode::Char('n') | KeyCode::Right => {
        self.controller.next_page();
      }
      KeyCode::Char('p') | KeyCode::Left => {
        self.controller.prev_page();
      }
      KeyCode::Char('g') | KeyCode::Home => {
        self.controller.set_page(0);
      }
      KeyCode::Char('G') | KeyCode::End => {
        self.controller.set_page(u64::MAX);
      }
      KeyCode::Char('r') => {
        self.controller.reload();
      }
      KeyCode::Enter => {
        if let Some(record) = self.selected_record() {
          return ViewAction::Push(Box::new(DetailView::<R>::new(
            record.id(),
            self.client.clone(),
          )));
        }
      }
      KeyCode::Char('q') | KeyCode::Esc => return ViewAction::Pop,
      _ => {}
    }
    ViewAction::None
  }

  fn render(&mut self, frame: &mut Frame, area: Rect) {
    let bar_height = u16::from(self.categories.is_some());
    let chunks = Layout::default()
      .direction(Direction::Vertical)
      .constraints([
        Constraint::Length(bar_height),
        Constraint::Min(1),
        Constraint::Length(1),
      ])
      .split(area);

    if let Some(bar) = &self.categories {
      bar.render(frame, chunks[0]);
    }
    self.render_list(frame, chunks[1]);
    frame.render_widget(Paragraph::new(self.status_line()), chunks[2]);
    self.search.render_overlay(frame, chunks[1]);
  }

  fn breadcrumb_label(&self) -> String {
    capitalize(R::COLLECTION)
  }

  fn tick(&mut self) {
    self.controller.tick();
  }

  fn capturing_input(&self) -> bool {
    self.search.is_active()
  }

  fn shortcuts(&self) -> Vec<Shortcut> {
    let mut shortcuts = vec![
      Shortcut::new(":", "command").order(10),
      Shortcut::new("/", "search").order(20),
      Shortcut::new("n/p", "page").order(30),
      Shortcut::new("r", "reload").order(50),
      Shortcut::new("enter", "detail").order(60),
      Shortcut::new("esc", "clear search").while_typing(),
    ];
    if self.categories.is_some() {
      shortcuts.push(Shortcut::new("pgup/pgdn", "category").order(40));
    }
    shortcuts
  }
}

fn capitalize(s: &str) -> String {
  let mut chars = s.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars).collect(),
    None => String::new(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::api::{Product, User};
  use crossterm::event::KeyModifiers;
  use std::time::Duration;

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
  }

  fn products() -> ListView<Product> {
    // Nothing listens here; requests fail and only the error state changes
    let client = ApiClient::with_base("http://127.0.0.1:9", None).unwrap();
    ListView::new(client, ListingSettings::default()).with_categories(vec!["laptops".into()])
  }

  #[test]
  fn test_capitalize() {
    assert_eq!(capitalize("users"), "Users");
    assert_eq!(capitalize(""), "");
  }

  #[tokio::test]
  async fn test_category_key_commits_category() {
    let mut view = products();
    view.ensure_loaded();
    view.handle_key(key(KeyCode::PageDown));
    assert_eq!(view.controller.committed().category.as_deref(), Some("laptops"));
    assert!(view.title().contains("[laptops]"));
  }

  #[tokio::test]
  async fn test_search_typing_is_debounced() {
    let mut view = products();
    view.handle_key(key(KeyCode::Char('/')));
    assert!(view.capturing_input());
    view.handle_key(key(KeyCode::Char('q')));
    // Typed 'q' goes to the search box instead of closing the view
    assert!(view.controller.search_pending());
    assert_eq!(view.controller.committed().search, None);
    assert!(view.title().contains("(typing...)"));
  }

  #[tokio::test]
  async fn test_render_draws_title_and_status() {
    use ratatui::backend::TestBackend;

    let mut view = products();
    view.list_state.select(Some(5));
    let mut terminal = Terminal::new(TestBackend::new(100, 12)).unwrap();
    terminal.draw(|frame| view.render(frame, frame.area())).unwrap();

    // Empty list clears the selection
    assert_eq!(view.list_state.selected(), None);
    let screen: String = terminal
      .backend()
      .buffer()
      .content()
      .iter()
      .map(|cell| cell.symbol())
      .collect();
    assert!(screen.contains("Products"));
    assert!(screen.contains("Showing 0 of 0"));
  }

  #[tokio::test]
  async fn test_escape_pops_when_idle() {
    let client = ApiClient::with_base("http://127.0.0.1:9", None).unwrap();
    let mut view: ListView<User> = ListView::new(client, ListingSettings::default());
    assert!(matches!(view.handle_key(key(KeyCode::Esc)), ViewAction::Pop));
  }

  #[tokio::test]
  async fn test_failed_load_shows_error() {
    let mut view = products();
    view.ensure_loaded();
    for _ in 0..50 {
      tokio::time::sleep(Duration::from_millis(20)).await;
      view.tick();
      if !view.listing().loading {
        break;
      }
    }
    assert!(view.listing().error.is_some());
    let status: String = view
      .status_line()
      .spans
      .iter()
      .map(|s| s.content.as_ref())
      .collect();
    assert!(status.contains("r to retry"));
  }
}
