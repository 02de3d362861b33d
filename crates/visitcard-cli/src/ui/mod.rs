//! TUI rendering — orchestrates screens and overlays.

pub mod admin_table;
pub mod form_dialog;
pub mod modal;
pub mod profile_card;

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Paragraph},
};
use visitcard_core::backend::CardBackend;

use crate::app::{App, Screen};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw<B: CardBackend + 'static>(f: &mut Frame, app: &App<B>) {
  let area = f.area();

  // Vertical stack: header, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  match app.screen {
    Screen::Admin => admin_table::draw(f, rows[1], &app.admin, app.cursor),
    Screen::Profile => profile_card::draw(f, rows[1], &app.profile),
  }
  draw_status(f, rows[2], app);

  // Overlays, bottom to top.
  if let Some(editor) = app.active_editor() {
    form_dialog::draw(f, area, editor);
  }
  if let Some(preview) = app.admin.qr_preview() {
    modal::draw_qr(f, area, &preview);
  }
  if let Some(pending) = app.admin.pending_delete() {
    modal::draw_confirm(f, area, &pending.prompt);
  }
  if let Some(notice) = app.notice() {
    modal::draw_notice(f, area, notice);
  }
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header<B: CardBackend + 'static>(f: &mut Frame, area: Rect, app: &App<B>) {
  let date = Local::now().format("%Y-%m-%d").to_string();
  let title = match app.screen {
    Screen::Admin => " visitcard  admin dashboard",
    Screen::Profile => " visitcard  card",
  };

  let left = Span::styled(
    title,
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(
    format!("{date} "),
    Style::default().fg(Color::DarkGray),
  );

  let pad = area
    .width
    .saturating_sub(left.width() as u16)
    .saturating_sub(right.width() as u16);

  let line = Line::from(vec![
    left,
    Span::raw(" ".repeat(pad as usize)),
    right,
  ]);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status<B: CardBackend + 'static>(f: &mut Frame, area: Rect, app: &App<B>) {
  let (mode_label, hints) = if app.notice().is_some() {
    ("NOTICE", "any key to dismiss")
  } else if app.admin.pending_delete().is_some() {
    ("CONFIRM", "y delete  n cancel")
  } else if app.admin.qr_preview().is_some() {
    ("QR", "Esc close")
  } else if app.active_form.is_some() {
    ("FORM", "Tab/↓ next  ↑ prev  Ctrl-S submit  Esc cancel")
  } else {
    match app.screen {
      Screen::Admin => (
        "ADMIN",
        "↑↓/jk select  ←→ page  n new  e edit  d delete  v QR  Enter open  r refresh  q quit",
      ),
      Screen::Profile if app.from_admin => ("CARD", "d download vCard  Esc back  q quit"),
      Screen::Profile => ("CARD", "d download vCard  q quit"),
    }
  };

  let status = if app.status_msg.is_empty() {
    hints.to_string()
  } else {
    app.status_msg.clone()
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(
    format!("  {status}"),
    Style::default().fg(Color::DarkGray),
  );

  f.render_widget(
    Paragraph::new(Line::from(vec![mode_span, hint_span]))
      .style(Style::default().bg(Color::Black)),
    area,
  );
}
