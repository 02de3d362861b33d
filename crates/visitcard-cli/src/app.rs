//! Application state machine and event dispatcher.
//!
//! Backend calls run as spawned tasks and report back through a channel as
//! [`AppEvent`]s; the event loop drains that channel before every frame. The
//! view models decide whether a late answer still matters.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use visitcard_core::{
  Result,
  backend::{CardBackend, MutationReply, RecordPage},
  record::{ContactRecord, RecordId},
};
use visitcard_views::{
  AdminView, FormMode, FormOutcome, ListFallback, Notice, ProfileView,
  admin::PageTicket, profile::{LoadTicket, spawn_visit},
};

use crate::{download, editor::FormEditor};

// ─── Screen ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
  /// The paginated admin table.
  Admin,
  /// A single card as a visitor sees it.
  Profile,
}

/// Which dialog a submission came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormTarget {
  Create,
  Update,
}

/// Results delivered by background tasks.
#[derive(Debug)]
pub enum AppEvent {
  Page(PageTicket, Result<RecordPage>),
  Profile(LoadTicket, Result<Option<ContactRecord>>),
  /// Tagged with the submitting dialog's mode, so a result never lands on a
  /// dialog opened for another record in the meantime.
  Submitted(FormMode, Result<MutationReply>),
  Deleted(RecordId, Result<()>),
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App<B> {
  pub screen:      Screen,
  pub admin:       AdminView,
  pub profile:     ProfileView,
  /// Row under the cursor on the current page.
  pub cursor:      usize,
  /// Reused for every create; resets itself after a successful one.
  pub create_form: FormEditor,
  /// Dialog for the last row edited.
  pub update_form: Option<FormEditor>,
  pub active_form: Option<FormTarget>,
  /// Whether Esc on the card goes back to the table.
  pub from_admin:  bool,
  /// One-line status message shown in the status bar.
  pub status_msg:  String,
  backend:         Arc<B>,
  tx:              UnboundedSender<AppEvent>,
  rx:              UnboundedReceiver<AppEvent>,
}

impl<B: CardBackend + 'static> App<B> {
  pub fn new(backend: Arc<B>, fallback: ListFallback) -> Self {
    let (tx, rx) = unbounded_channel();
    Self {
      screen: Screen::Admin,
      admin: AdminView::new(fallback),
      profile: ProfileView::new(),
      cursor: 0,
      create_form: FormEditor::new(visitcard_views::FormDialog::create()),
      update_form: None,
      active_form: None,
      from_admin: false,
      status_msg: String::new(),
      backend,
      tx,
      rx,
    }
  }

  pub fn start_admin(&mut self) {
    self.screen = Screen::Admin;
    self.fetch_page(1);
  }

  pub fn start_profile(&mut self, id: RecordId) {
    self.screen = Screen::Profile;
    self.from_admin = false;
    self.open_profile(id);
  }

  // ── Effects ───────────────────────────────────────────────────────────────

  fn fetch_page(&mut self, page: u32) {
    let ticket = self.admin.begin_fetch(page);
    let backend = Arc::clone(&self.backend);
    let tx = self.tx.clone();
    tokio::spawn(async move {
      let result = backend.list_page(AdminView::request_for(ticket)).await;
      let _ = tx.send(AppEvent::Page(ticket, result));
    });
  }

  fn open_profile(&mut self, id: RecordId) {
    let Some(ticket) = self.profile.begin(id.clone()) else {
      return;
    };
    spawn_visit(Arc::clone(&self.backend), id.clone());
    let backend = Arc::clone(&self.backend);
    let tx = self.tx.clone();
    tokio::spawn(async move {
      let result = backend.get_record(&id).await;
      let _ = tx.send(AppEvent::Profile(ticket, result));
    });
  }

  fn submit_form(&mut self) {
    let Some(target) = self.active_form else {
      return;
    };
    let Some(editor) = self.form_mut(target) else {
      return;
    };
    if let Err(e) = editor.dialog.validate() {
      self.status_msg = e.to_string();
      return;
    }
    if let Err(e) = editor.load_files() {
      tracing::warn!(error = %e, "could not read image for upload");
      editor.dialog.report_failure(format!("Could not read image file: {e}"));
      return;
    }
    let Some(submission) = editor.dialog.begin_submit() else {
      return;
    };
    let mode = editor.dialog.mode().clone();

    let backend = Arc::clone(&self.backend);
    let tx = self.tx.clone();
    tokio::spawn(async move {
      let result = match &mode {
        FormMode::Create => backend.create(submission).await,
        FormMode::Update(id) => backend.update(id, submission).await,
      };
      let _ = tx.send(AppEvent::Submitted(mode, result));
    });
  }

  fn delete_confirmed(&mut self) {
    let Some(id) = self.admin.confirm_delete() else {
      return;
    };
    let backend = Arc::clone(&self.backend);
    let tx = self.tx.clone();
    tokio::spawn(async move {
      let result = backend.delete(&id).await;
      let _ = tx.send(AppEvent::Deleted(id, result));
    });
  }

  fn download(&mut self) {
    let Some(file) = self.profile.contact_file() else {
      return;
    };
    self.status_msg = match file
      .map_err(anyhow::Error::from)
      .and_then(|file| download::save(file, std::path::Path::new(".")))
    {
      Ok(path) => format!("Saved {}", path.display()),
      Err(e) => format!("Error: {e:#}"),
    };
  }

  // ── Background results ────────────────────────────────────────────────────

  /// Apply every result that has arrived since the last frame.
  pub fn drain_events(&mut self) {
    while let Ok(event) = self.rx.try_recv() {
      self.apply(event);
    }
  }

  pub fn apply(&mut self, event: AppEvent) {
    match event {
      AppEvent::Page(ticket, result) => {
        if self.admin.finish_fetch(ticket, result) {
          self.cursor = self.cursor.min(self.admin.rows().len().saturating_sub(1));
        }
      }
      AppEvent::Profile(ticket, result) => {
        self.profile.finish(ticket, result);
      }
      AppEvent::Submitted(mode, result) => {
        let Some(editor) = self.form_for_mode(&mode) else {
          // The dialog was replaced while its request was in flight.
          tracing::debug!(?mode, ok = result.is_ok(), "submit result for a closed dialog");
          if result.is_ok() {
            self.fetch_page(self.admin.page_after_form(&mode));
          }
          return;
        };
        if let FormOutcome::Completed(mode) = editor.dialog.finish_submit(result) {
          let target = match mode {
            FormMode::Create => {
              editor.clear_paths();
              FormTarget::Create
            }
            FormMode::Update(_) => FormTarget::Update,
          };
          if self.active_form == Some(target) {
            self.active_form = None;
          }
          self.fetch_page(self.admin.page_after_form(&mode));
        }
      }
      AppEvent::Deleted(id, result) => {
        if let Some(page) = self.admin.finish_delete(&id, result) {
          self.fetch_page(page);
        }
      }
    }
  }

  #[cfg(test)]
  pub async fn next_event(&mut self) -> Option<AppEvent> { self.rx.recv().await }

  // ── Queries ───────────────────────────────────────────────────────────────

  pub fn selected(&self) -> Option<&ContactRecord> { self.admin.rows().get(self.cursor) }

  pub fn form(&self, target: FormTarget) -> Option<&FormEditor> {
    match target {
      FormTarget::Create => Some(&self.create_form),
      FormTarget::Update => self.update_form.as_ref(),
    }
  }

  fn form_mut(&mut self, target: FormTarget) -> Option<&mut FormEditor> {
    match target {
      FormTarget::Create => Some(&mut self.create_form),
      FormTarget::Update => self.update_form.as_mut(),
    }
  }

  /// The dialog that owns submissions made in `mode`, if it is still around.
  fn form_for_mode(&mut self, mode: &FormMode) -> Option<&mut FormEditor> {
    match mode {
      FormMode::Create => Some(&mut self.create_form),
      FormMode::Update(_) => self
        .update_form
        .as_mut()
        .filter(|editor| editor.dialog.mode() == mode),
    }
  }

  pub fn active_editor(&self) -> Option<&FormEditor> {
    self.active_form.and_then(|t| self.form(t))
  }

  /// The notice to show, admin table first.
  pub fn notice(&self) -> Option<&Notice> {
    self
      .admin
      .notice()
      .or_else(|| self.create_form.dialog.notice())
      .or_else(|| self.update_form.as_ref().and_then(|e| e.dialog.notice()))
  }

  fn dismiss_notices(&mut self) {
    self.admin.dismiss_notice();
    self.create_form.dialog.dismiss_notice();
    if let Some(editor) = self.update_form.as_mut() {
      editor.dialog.dismiss_notice();
    }
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub fn handle_key(&mut self, key: KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
      return true;
    }
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return false;
    }

    // Modal layers, topmost first.
    if self.notice().is_some() {
      self.dismiss_notices();
      return true;
    }
    if self.admin.pending_delete().is_some() {
      match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => self.delete_confirmed(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => self.admin.cancel_delete(),
        _ => {}
      }
      return true;
    }
    if self.admin.qr_preview().is_some() {
      if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('v') | KeyCode::Char('q')) {
        self.admin.close_qr();
      }
      return true;
    }
    if self.active_form.is_some() {
      self.handle_form_key(key);
      return true;
    }

    match self.screen {
      Screen::Admin => self.handle_admin_key(key),
      Screen::Profile => self.handle_profile_key(key),
    }
  }

  fn handle_form_key(&mut self, key: KeyEvent) {
    let Some(target) = self.active_form else {
      return;
    };
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s') {
      self.submit_form();
      return;
    }
    let Some(editor) = self.form_mut(target) else {
      return;
    };
    match key.code {
      KeyCode::Esc => {
        editor.dialog.close();
        self.active_form = None;
      }
      KeyCode::F(2) => self.submit_form(),
      KeyCode::Tab | KeyCode::Down | KeyCode::Enter => editor.next(),
      KeyCode::BackTab | KeyCode::Up => editor.previous(),
      KeyCode::Backspace => editor.pop(),
      KeyCode::Char(c) => editor.push(c),
      _ => {}
    }
  }

  fn handle_admin_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Char('q') => return false,

      // Rows
      KeyCode::Down | KeyCode::Char('j') => {
        if self.cursor + 1 < self.admin.rows().len() {
          self.cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.cursor = self.cursor.saturating_sub(1);
      }

      // Pages
      KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(']') => {
        if let Some(page) = self.admin.next_page() {
          self.cursor = 0;
          self.fetch_page(page);
        }
      }
      KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('[') => {
        if let Some(page) = self.admin.previous_page() {
          self.cursor = 0;
          self.fetch_page(page);
        }
      }
      KeyCode::Char(d @ '1'..='9') => {
        let page = d.to_digit(10).unwrap_or(1);
        if self.admin.page_numbers().contains(&page) {
          self.cursor = 0;
          self.fetch_page(page);
        }
      }
      KeyCode::Char('r') => self.fetch_page(self.admin.current_page()),

      // Actions
      KeyCode::Char('n') => {
        self.create_form.dialog.open();
        self.active_form = Some(FormTarget::Create);
      }
      KeyCode::Char('e') => {
        if let Some(record) = self.selected().cloned() {
          let editor = match self.update_form.take() {
            Some(mut editor)
              if editor.dialog.mode() == &FormMode::Update(record.id.clone()) =>
            {
              editor.dialog.bind(&record);
              editor
            }
            _ => FormEditor::for_update(&record),
          };
          self.update_form = Some(editor);
          if let Some(editor) = self.update_form.as_mut() {
            editor.dialog.open();
          }
          self.active_form = Some(FormTarget::Update);
        }
      }
      KeyCode::Char('d') | KeyCode::Delete => {
        if let Some(id) = self.selected().map(|r| r.id.clone()) {
          self.admin.request_delete(&id);
        }
      }
      KeyCode::Char('v') => {
        if let Some(id) = self.selected().map(|r| r.id.clone()) {
          self.admin.open_qr(&id);
        }
      }
      KeyCode::Enter | KeyCode::Char('o') => {
        if let Some(id) = self.selected().map(|r| r.id.clone()) {
          self.screen = Screen::Profile;
          self.from_admin = true;
          self.open_profile(id);
        }
      }
      _ => {}
    }
    true
  }

  fn handle_profile_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Char('q') => return false,
      KeyCode::Char('d') => self.download(),
      KeyCode::Esc | KeyCode::Left | KeyCode::Char('h') if self.from_admin => {
        self.screen = Screen::Admin;
        self.status_msg.clear();
      }
      _ => {}
    }
    true
  }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
