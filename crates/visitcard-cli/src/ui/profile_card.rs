//! Profile card — a single record as a visitor sees it.

use ratatui::{
  Frame,
  layout::{Alignment, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Wrap},
};
use visitcard_views::{
  ProfileState, ProfileView,
  profile::{LOADING_TEXT, NOT_FOUND_TEXT},
};

// ─── Public entry ─────────────────────────────────────────────────────────────

pub fn draw(f: &mut Frame, area: Rect, view: &ProfileView) {
  let block = Block::default()
    .title(" Card ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let dim = Style::default().fg(Color::DarkGray);
  let lines = match view.state() {
    ProfileState::Idle => vec![Line::styled("No card selected.", dim)],
    ProfileState::Loading => vec![Line::styled(LOADING_TEXT, dim)],
    ProfileState::NotFound => vec![Line::styled(NOT_FOUND_TEXT, dim)],
    ProfileState::Error(msg) => vec![Line::styled(
      msg.clone(),
      Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    )],
    ProfileState::Populated(_) => card_lines(view),
  };

  f.render_widget(
    Paragraph::new(lines)
      .alignment(Alignment::Center)
      .wrap(Wrap { trim: false }),
    inner,
  );
}

// ─── Populated card ───────────────────────────────────────────────────────────

fn card_lines(view: &ProfileView) -> Vec<Line<'_>> {
  let (Some(record), Some(sections)) = (view.record(), view.sections()) else {
    return Vec::new();
  };

  let label = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
  let dim = Style::default().fg(Color::DarkGray);
  let mut lines = Vec::new();

  if let Some(logo) = sections.company_logo {
    lines.push(Line::styled(format!("[logo] {logo}"), dim));
  }
  if let Some(image) = sections.profile_image {
    lines.push(Line::styled(format!("[photo] {image}"), dim));
  }
  lines.push(Line::from(""));

  lines.push(Line::styled(
    record.name.clone(),
    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
  ));
  if let Some(designation) = record.designation() {
    lines.push(Line::from(designation.to_string()));
  }
  if let Some(company) = record.company() {
    lines.push(Line::styled(company.to_string(), dim));
  }
  if let Some(tagline) = sections.tagline {
    lines.push(Line::from(""));
    lines.push(Line::styled(
      format!("“{tagline}”"),
      Style::default().add_modifier(Modifier::ITALIC),
    ));
  }

  lines.push(Line::from(""));
  for action in &sections.actions {
    lines.push(Line::from(vec![
      Span::styled(format!("{:<10}", action.label()), label),
      Span::raw(action.href.clone()),
    ]));
  }
  if !record.address.trim().is_empty() {
    lines.push(Line::from(vec![
      Span::styled(format!("{:<10}", "Address"), label),
      Span::raw(record.address.clone()),
    ]));
  }
  if let Some(directions) = sections.directions {
    lines.push(Line::from(vec![
      Span::styled(format!("{:<10}", "Directions"), label),
      Span::raw(directions.to_string()),
    ]));
  }

  if let Some(social) = sections.social {
    lines.push(Line::from(""));
    if let Some(linkedin) = social.linkedin {
      lines.push(Line::from(vec![
        Span::styled(format!("{:<10}", "LinkedIn"), label),
        Span::raw(linkedin.to_string()),
      ]));
    }
    if let Some(instagram) = social.instagram {
      lines.push(Line::from(vec![
        Span::styled(format!("{:<10}", "Instagram"), label),
        Span::raw(instagram.to_string()),
      ]));
    }
  }

  lines.push(Line::from(""));
  lines.push(Line::styled("[d] Download vCard", Style::default().fg(Color::Yellow)));
  lines
}
