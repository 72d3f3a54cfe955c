use ratatui::prelude::Color;

/// Truncate to at most `max_len` characters, ending in "..." when cut
pub fn truncate(s: &str, max_len: usize) -> String {
  if s.chars().count() <= max_len {
    s.to_string()
  } else {
    let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
    format!("{}...", kept)
  }
}

/// Display color for a product's stock level
pub fn stock_color(stock: u64) -> Color {
  match stock {
    0 => Color::Red,
    1..=10 => Color::Yellow,
    _ => Color::Green,
  }
}
