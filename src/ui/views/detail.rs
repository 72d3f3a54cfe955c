use crate::api::ApiClient;
use crate::query::{Query, QueryState};
use crate::ui::view::{Shortcut, View, ViewAction};
use crate::ui::views::rows::RecordDisplay;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

/// Full record fetched by id
pub struct DetailView<R: RecordDisplay> {
  id: u64,
  query: Query<R>,
  scroll: u16,
}

impl<R: RecordDisplay> DetailView<R> {
  pub fn new(id: u64, client: ApiClient) -> Self {
    let mut query = Query::new(move || {
      let client = client.clone();
      async move { client.get_record::<R>(id).await }
    });
    query.fetch();

    Self { id, query, scroll: 0 }
  }

  fn label(&self) -> String {
    format!("{} #{}", R::LABEL, self.id)
  }
}

impl<R: RecordDisplay> View for DetailView<R> {
  fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
    match key.code {
      KeyCode::Char('r') => self.query.refetch(),
      KeyCode::Char('j') | KeyCode::Down => self.scroll = self.scroll.saturating_add(1),
      KeyCode::Char('k') | KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
      KeyCode::Char('q') | KeyCode::Esc => return ViewAction::Pop,
      _ => {}
    }
    ViewAction::None
  }

  fn render(&mut self, frame: &mut Frame, area: Rect) {
    let title = match self.query.state() {
      QueryState::Success(record) => format!(" {} ", record.heading()),
      QueryState::Loading | QueryState::Idle => format!(" {} (loading...) ", self.label()),
      QueryState::Error(_) => format!(" {} ", self.label()),
    };

    let block = Block::default()
      .title(title)
      .title_alignment(Alignment::Center)
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Blue));

    let paragraph = match self.query.state() {
      QueryState::Success(record) => Paragraph::new(record.detail())
        .wrap(Wrap { trim: false })
        .scroll((self.scroll, 0)),
      QueryState::Error(e) => Paragraph::new(format!("{}\n\nPress 'r' to retry.", e))
        .style(Style::default().fg(Color::Red)),
      QueryState::Loading | QueryState::Idle => {
        Paragraph::new("Loading...").style(Style::default().fg(Color::DarkGray))
      }
    };
    frame.render_widget(paragraph.block(block), area);
  }

  fn breadcrumb_label(&self) -> String {
    match self.query.data() {
      Some(record) => record.heading(),
      None => self.label(),
    }
  }

  fn tick(&mut self) {
    self.query.poll();
  }

  fn shortcuts(&self) -> Vec<Shortcut> {
    vec![
      Shortcut::new("j/k", "scroll").order(20),
      Shortcut::new("r", "refresh").order(30),
      Shortcut::new("q", "back").order(40),
    ]
  }
}
