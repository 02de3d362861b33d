//! Centered overlays: QR preview, delete confirmation, notices.

use ratatui::{
  Frame,
  layout::{Alignment, Constraint, Flex, Layout, Rect},
  style::{Color, Modifier, Style},
  text::Line,
  widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use visitcard_views::{Notice, admin::QrPreview};

/// A `width` x `height` rect centered in `area`, clamped to fit.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
  let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
    .flex(Flex::Center)
    .areas(area);
  let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
    .flex(Flex::Center)
    .areas(row);
  cell
}

fn draw_box(f: &mut Frame, area: Rect, title: &str, border: Color, lines: Vec<Line<'_>>) {
  f.render_widget(Clear, area);
  let block = Block::default()
    .title(format!(" {title} "))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(border));
  f.render_widget(
    Paragraph::new(lines)
      .block(block)
      .alignment(Alignment::Center)
      .wrap(Wrap { trim: true }),
    area,
  );
}

pub fn draw_qr(f: &mut Frame, area: Rect, preview: &QrPreview<'_>) {
  let url = match preview.url {
    Some(url) => Line::styled(url.to_string(), Style::default().fg(Color::Yellow)),
    None => Line::styled("No QR code for this card.", Style::default().fg(Color::DarkGray)),
  };
  let lines = vec![
    Line::styled(preview.name.to_string(), Style::default().add_modifier(Modifier::BOLD)),
    Line::from(""),
    url,
    Line::from(""),
    Line::styled(preview.caption, Style::default().fg(Color::DarkGray)),
  ];
  draw_box(f, centered(area, 72, 9), preview.title, Color::Cyan, lines);
}

pub fn draw_confirm(f: &mut Frame, area: Rect, prompt: &str) {
  let lines = vec![
    Line::from(prompt.to_string()),
    Line::from(""),
    Line::styled("[y] delete   [n] cancel", Style::default().fg(Color::DarkGray)),
  ];
  draw_box(f, centered(area, 56, 6), "Delete", Color::Red, lines);
}

pub fn draw_notice(f: &mut Frame, area: Rect, notice: &Notice) {
  let (title, color) = if notice.is_failure() {
    ("Error", Color::Red)
  } else {
    ("Done", Color::Green)
  };
  let lines = vec![
    Line::styled(notice.message.clone(), Style::default().fg(color)),
    Line::from(""),
    Line::styled("press any key", Style::default().fg(Color::DarkGray)),
  ];
  draw_box(f, centered(area, 48, 6), title, color, lines);
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn centered_rect_fits_inside() {
    let area = Rect::new(0, 0, 100, 40);
    let r = centered(area, 40, 10);
    assert_eq!((r.width, r.height), (40, 10));
    assert_eq!((r.x, r.y), (30, 15));

    let small = centered(Rect::new(0, 0, 20, 5), 40, 10);
    assert_eq!((small.width, small.height), (20, 5));
  }
}
