use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Draw the breadcrumb trail, optionally with a transient status message
pub fn draw_footer(frame: &mut Frame, area: Rect, breadcrumbs: &[String], status: Option<&str>) {
  let mut spans = vec![Span::raw(" ")];
  let last = breadcrumbs.len().saturating_sub(1);
  for (idx, crumb) in breadcrumbs.iter().enumerate() {
    if idx > 0 {
      spans.push(Span::styled(" > ", Style::default().fg(Color::DarkGray)));
    }
    let style = if idx == last {
      Style::default().fg(Color::Black).bg(Color::Cyan)
    } else {
      Style::default().fg(Color::Cyan)
    };
    spans.push(Span::styled(format!(" {} ", crumb), style));
  }

  if let Some(message) = status {
    spans.push(Span::raw("   "));
    spans.push(Span::styled(message.to_string(), Style::default().fg(Color::Yellow)));
  }

  frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
