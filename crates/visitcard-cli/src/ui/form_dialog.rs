//! Create / update dialog overlay.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, Paragraph},
};

use super::modal::centered;
use crate::editor::{FormEditor, Slot};

pub fn draw(f: &mut Frame, area: Rect, editor: &FormEditor) {
  let dialog = &editor.dialog;
  let slots = FormEditor::slots();
  let focused = editor.focused();
  let missing = dialog.missing_required();

  let mut lines: Vec<Line> = slots
    .iter()
    .map(|&slot| {
      let is_focused = slot == focused;
      let required = matches!(slot, Slot::Text(field) if field.is_required());
      let blank = matches!(slot, Slot::Text(field) if missing.contains(&field));

      let label_style = if is_focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
      } else {
        Style::default().fg(Color::Cyan)
      };
      let marker = if required { "*" } else { " " };
      let mut value = editor.value(slot).to_string();
      if is_focused {
        value.push('_');
      }

      let mut spans = vec![
        Span::styled(format!("{:<15}{marker} ", slot.label()), label_style),
        Span::raw(value),
      ];
      if editor.value(slot).is_empty() {
        spans.push(Span::styled(slot.placeholder(), Style::default().fg(Color::DarkGray)));
      }
      if blank && !is_focused {
        spans.push(Span::styled("  required", Style::default().fg(Color::Red)));
      }
      Line::from(spans)
    })
    .collect();

  lines.push(Line::from(""));
  let submit = if dialog.is_submitting() {
    Span::styled("Saving…", Style::default().fg(Color::DarkGray))
  } else if dialog.can_submit() {
    Span::styled(
      format!("[Ctrl-S] {}", dialog.mode().submit_label()),
      Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    )
  } else {
    Span::styled(
      format!("[Ctrl-S] {} (fill required fields)", dialog.mode().submit_label()),
      Style::default().fg(Color::DarkGray),
    )
  };
  lines.push(Line::from(vec![submit, Span::raw("   [Esc] Cancel")]));

  let height = lines.len() as u16 + 2;
  let rect = centered(area, 78, height);
  f.render_widget(Clear, rect);
  let block = Block::default()
    .title(format!(" {} ", dialog.mode().title()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));
  f.render_widget(Paragraph::new(lines).block(block), rect);
}
