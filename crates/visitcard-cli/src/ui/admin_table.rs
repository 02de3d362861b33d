//! Admin table — one page of cards plus the pagination footer.

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};
use visitcard_core::record::ContactRecord;
use visitcard_views::AdminView;

const HEADERS: [&str; 8] = [
  "Name", "Designation", "Company", "Tagline", "Phone", "Email", "Visits", "Created",
];

/// Render the table for `admin` into `area`, highlighting row `cursor`.
pub fn draw(f: &mut Frame, area: Rect, admin: &AdminView, cursor: usize) {
  let title = if admin.is_loading() {
    " Users (loading…) ".to_string()
  } else {
    format!(" Users ({}) ", admin.total_users())
  };
  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let parts = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Min(0), Constraint::Length(1)])
    .split(inner);

  if admin.rows().is_empty() {
    let text = if admin.is_loading() { "Loading..." } else { "No users found." };
    f.render_widget(
      Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
      parts[0],
    );
  } else {
    draw_rows(f, parts[0], admin.rows(), cursor);
  }
  draw_footer(f, parts[1], admin);
}

fn draw_rows(f: &mut Frame, area: Rect, rows: &[ContactRecord], cursor: usize) {
  let header = Row::new(HEADERS.map(|h| {
    Cell::from(h).style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
  }));

  let body = rows.iter().map(|r| {
    Row::new(vec![
      Cell::from(r.name.clone()),
      Cell::from(r.designation().unwrap_or("—").to_string()),
      Cell::from(r.company().unwrap_or("—").to_string()),
      Cell::from(r.short_tagline().unwrap_or_default()),
      Cell::from(r.phone.clone()),
      Cell::from(r.email.clone()),
      Cell::from(r.visit_count.to_string()),
      Cell::from(r.created_on()),
    ])
  });

  let widths = [
    Constraint::Percentage(14),
    Constraint::Percentage(14),
    Constraint::Percentage(12),
    Constraint::Percentage(15),
    Constraint::Percentage(11),
    Constraint::Percentage(18),
    Constraint::Length(6),
    Constraint::Length(12),
  ];

  let mut state = TableState::default();
  state.select(Some(cursor.min(rows.len().saturating_sub(1))));

  f.render_stateful_widget(
    Table::new(body, widths)
      .header(header)
      .row_highlight_style(
        Style::default()
          .bg(Color::Blue)
          .fg(Color::White)
          .add_modifier(Modifier::BOLD),
      ),
    area,
    &mut state,
  );
}

/// Summary on the left, page numbers on the right.
fn draw_footer(f: &mut Frame, area: Rect, admin: &AdminView) {
  let dim = Style::default().fg(Color::DarkGray);
  let mut spans = vec![Span::styled(admin.summary(), dim)];

  let pages = admin.page_numbers();
  if !pages.is_empty() {
    spans.push(Span::raw("   "));
    spans.push(Span::styled(
      "‹ ",
      if admin.can_go_previous() { Style::default() } else { dim },
    ));
    for page in pages {
      let style = if page == admin.current_page() {
        Style::default().fg(Color::Black).bg(Color::Cyan)
      } else {
        Style::default()
      };
      spans.push(Span::styled(format!(" {page} "), style));
    }
    spans.push(Span::styled(
      " ›",
      if admin.can_go_next() { Style::default() } else { dim },
    ));
  }

  f.render_widget(Paragraph::new(Line::from(spans)), area);
}
