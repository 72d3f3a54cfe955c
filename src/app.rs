use crate::api::{ApiClient, Product, User};
use crate::commands::Command;
use crate::config::Config;
use crate::event::{Event, EventHandler};
use crate::ui;
use crate::ui::components::{CommandInput, KeyResult};
use crate::ui::view::{View, ViewAction};
use crate::ui::views::ListView;
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{
  disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use std::io::stdout;
use std::time::Duration;
use tracing::info;

/// Top-level collection being browsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Section {
  #[default]
  Users,
  Products,
}

impl Section {
  pub fn label(self) -> &'static str {
    match self {
      Section::Users => "Users",
      Section::Products => "Products",
    }
  }
}

/// Main application state
pub struct App {
  config: Config,
  users: ListView<User>,
  products: ListView<Product>,
  section: Section,
  /// Detail screens pushed on top of the current section
  stack: Vec<Box<dyn View>>,
  command: CommandInput,
  /// One-off message shown in the footer until the next key press
  status: Option<String>,
  should_quit: bool,
}

impl App {
  /// Must be called from within a tokio runtime
  pub fn new(config: Config, section: Section) -> Result<Self> {
    let client = ApiClient::new(&config)?;
    let settings = config.listing_settings();
    info!(api = %config.api.url, page_size = settings.page_size, "starting");

    let mut app = Self {
      users: ListView::new(client.clone(), settings),
      products: ListView::new(client, settings).with_categories(config.categories.clone()),
      config,
      section,
      stack: Vec::new(),
      command: CommandInput::new(),
      status: None,
      should_quit: false,
    };
    app.switch_section(section);
    Ok(app)
  }

  pub fn config(&self) -> &Config {
    &self.config
  }

  pub fn section(&self) -> Section {
    self.section
  }

  pub fn status(&self) -> Option<&str> {
    self.status.as_deref()
  }

  pub fn command_input(&self) -> &CommandInput {
    &self.command
  }

  fn section_view(&self) -> &dyn View {
    match self.section {
      Section::Users => &self.users,
      Section::Products => &self.products,
    }
  }

  /// Top of the stack, or the section list
  pub fn current_view_mut(&mut self) -> &mut dyn View {
    if let Some(view) = self.stack.last_mut() {
      return view.as_mut();
    }
    match self.section {
      Section::Users => &mut self.users,
      Section::Products => &mut self.products,
    }
  }

  pub fn breadcrumbs(&self) -> Vec<String> {
    std::iter::once(self.section_view().breadcrumb_label())
      .chain(self.stack.iter().map(|v| v.breadcrumb_label()))
      .collect()
  }

  pub async fn run(&mut self) -> Result<()> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut events = EventHandler::new(Duration::from_millis(self.config.tick_ms.max(10)));

    let result = self.event_loop(&mut terminal, &mut events).await;

    // Restore the terminal even if drawing failed
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    result
  }

  async fn event_loop<B: Backend>(
    &mut self,
    terminal: &mut Terminal<B>,
    events: &mut EventHandler,
  ) -> Result<()> {
    while !self.should_quit {
      terminal.draw(|frame| ui::draw(frame, self))?;

      match events.next().await {
        Some(Event::Key(key)) => self.handle_key(key),
        Some(Event::Resize) | Some(Event::Tick) => {}
        None => break,
      }
      // Poll on every event so responses land even while keys stream in
      self.tick();
    }
    Ok(())
  }

  fn tick(&mut self) {
    // Both lists keep collecting responses so their caches fill in the background
    self.users.tick();
    self.products.tick();
    for view in &mut self.stack {
      view.tick();
    }
  }

  fn handle_key(&mut self, key: KeyEvent) {
    self.status = None;

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
      self.should_quit = true;
      return;
    }

    if self.command.is_active() {
      match self.command.handle_key(key) {
        KeyResult::Event(Some(cmd)) => self.execute_command(cmd),
        KeyResult::Event(None) => self.status = Some("Unknown command".to_string()),
        KeyResult::Handled | KeyResult::NotHandled => {}
      }
      return;
    }

    let view = self.current_view_mut();
    if key.code == KeyCode::Char(':') && !view.capturing_input() {
      self.command.activate();
      return;
    }

    match view.handle_key(key) {
      ViewAction::None => {}
      ViewAction::Push(view) => self.stack.push(view),
      ViewAction::Pop => {
        if self.stack.pop().is_none() {
          self.should_quit = true;
        }
      }
    }
  }

  fn switch_section(&mut self, section: Section) {
    self.section = section;
    self.stack.clear();
    match section {
      Section::Users => self.users.ensure_loaded(),
      Section::Products => self.products.ensure_loaded(),
    }
  }

  fn execute_command(&mut self, cmd: &Command) {
    match cmd.name {
      "users" => self.switch_section(Section::Users),
      "products" => self.switch_section(Section::Products),
      "flush" => {
        self.users.clear_cache();
        self.products.clear_cache();
        info!("cache flushed");
        self.status = Some("Cache cleared".to_string());
      }
      "quit" => self.should_quit = true,
      _ => {}
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::commands::get_suggestions;

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
  }

  fn app() -> App {
    let mut config = Config::default();
    // Nothing listens here, requests just fail
    config.api.url = "http://127.0.0.1:9".to_string();
    App::new(config, Section::Users).unwrap()
  }

  fn run_command(app: &mut App, text: &str) {
    app.handle_key(key(KeyCode::Char(':')));
    for c in text.chars() {
      app.handle_key(key(KeyCode::Char(c)));
    }
    app.handle_key(key(KeyCode::Enter));
  }

  #[tokio::test]
  async fn test_switch_section_by_command() {
    let mut app = app();
    assert_eq!(app.breadcrumbs(), vec!["Users".to_string()]);
    run_command(&mut app, "products");
    assert_eq!(app.section(), Section::Products);
    assert_eq!(app.breadcrumbs(), vec!["Products".to_string()]);
  }

  #[tokio::test]
  async fn test_flush_reports_status() {
    let mut app = app();
    run_command(&mut app, "flush");
    assert_eq!(app.status(), Some("Cache cleared"));
    app.handle_key(key(KeyCode::Char('j')));
    assert_eq!(app.status(), None);
  }

  #[tokio::test]
  async fn test_unknown_command() {
    let mut app = app();
    run_command(&mut app, "zzz");
    assert!(get_suggestions("zzz").is_empty());
    assert_eq!(app.status(), Some("Unknown command"));
    assert!(!app.should_quit);
  }

  #[tokio::test]
  async fn test_back_from_root_quits() {
    let mut app = app();
    app.handle_key(key(KeyCode::Char('q')));
    assert!(app.should_quit);
  }

  #[tokio::test]
  async fn test_colon_types_into_open_search() {
    let mut app = app();
    app.handle_key(key(KeyCode::Char('/')));
    app.handle_key(key(KeyCode::Char(':')));
    assert!(!app.command_input().is_active());
  }
}
