//! Admin table: a paginated list of records with create, update, delete and
//! QR-preview actions.
//!
//! The backend is authoritative for page contents and totals. Every page
//! fetch carries a ticket and only the most recent ticket may change state, so
//! a slow response for an old page can't overwrite the page the user asked
//! for last.

use visitcard_core::{
  Result,
  backend::{CardBackend, PageRequest, RecordPage},
  record::{ContactRecord, RecordId},
};

use crate::{fallback::sample_records, form::FormMode, notice::Notice};

pub const DELETED: &str = "User deleted successfully!";
pub const DELETE_FAILED: &str = "Failed to delete user";
pub const LIST_FAILED: &str = "Failed to load users";
pub const QR_CAPTION: &str = "Scan this QR code to view contact details";

// ─── Policy ───────────────────────────────────────────────────────────────────

/// What the table shows when listing fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListFallback {
  /// Demo mode: show the built-in sample records as a single page.
  #[default]
  SampleData,
  /// Keep the current rows and surface a failure notice.
  ShowError,
}

// ─── Tickets and dialogs ──────────────────────────────────────────────────────

/// Identifies one page fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTicket {
  seq:  u64,
  page: u32,
}

impl PageTicket {
  pub fn page(&self) -> u32 { self.page }
}

/// A delete waiting for the user to confirm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
  pub id:     RecordId,
  pub name:   String,
  pub prompt: String,
}

/// The QR modal's contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrPreview<'a> {
  pub title:   &'a str,
  pub name:    &'a str,
  pub url:     Option<&'a str>,
  pub caption: &'static str,
}

// ─── View ─────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct AdminView {
  rows:           Vec<ContactRecord>,
  current_page:   u32,
  total_pages:    u32,
  total_users:    u64,
  loading:        bool,
  issued:         u64,
  fallback:       ListFallback,
  pending_delete: Option<PendingDelete>,
  qr_selection:   Option<(ContactRecord, String)>,
  notice:         Option<Notice>,
}

impl Default for AdminView {
  fn default() -> Self { Self::new(ListFallback::default()) }
}

impl AdminView {
  pub fn new(fallback: ListFallback) -> Self {
    Self {
      rows: Vec::new(),
      current_page: 1,
      total_pages: 1,
      total_users: 0,
      loading: false,
      issued: 0,
      fallback,
      pending_delete: None,
      qr_selection: None,
      notice: None,
    }
  }

  pub fn rows(&self) -> &[ContactRecord] { &self.rows }

  pub fn current_page(&self) -> u32 { self.current_page }

  pub fn total_pages(&self) -> u32 { self.total_pages }

  pub fn total_users(&self) -> u64 { self.total_users }

  pub fn is_loading(&self) -> bool { self.loading }

  pub fn fallback(&self) -> ListFallback { self.fallback }

  pub fn notice(&self) -> Option<&Notice> { self.notice.as_ref() }

  pub fn dismiss_notice(&mut self) { self.notice = None; }

  /// `Total {n} users • Page {p} of {t}`
  pub fn summary(&self) -> String {
    format!(
      "Total {} users • Page {} of {}",
      self.total_users, self.current_page, self.total_pages
    )
  }

  // ── Paging ────────────────────────────────────────────────────────────────

  /// Start fetching `page`; any earlier outstanding fetch becomes stale.
  pub fn begin_fetch(&mut self, page: u32) -> PageTicket {
    self.issued += 1;
    self.loading = true;
    PageTicket {
      seq:  self.issued,
      page: page.max(1),
    }
  }

  pub fn request_for(ticket: PageTicket) -> PageRequest {
    PageRequest::new(ticket.page)
  }

  /// Apply a page fetch. Returns `false` when the ticket was stale.
  pub fn finish_fetch(
    &mut self,
    ticket: PageTicket,
    result: Result<RecordPage>,
  ) -> bool {
    if ticket.seq != self.issued {
      tracing::debug!(page = ticket.page, "dropping stale page response");
      return false;
    }
    self.loading = false;

    match result {
      Ok(page) => {
        self.rows = page.data;
        self.total_users = page.total_users;
        self.total_pages = page.total_pages;
        self.current_page = ticket.page;
      }
      Err(e) => {
        tracing::warn!(page = ticket.page, error = %e, "error fetching users");
        match self.fallback {
          ListFallback::SampleData => {
            self.rows = sample_records();
            self.total_users = self.rows.len() as u64;
            self.total_pages = 1;
            self.current_page = 1;
          }
          ListFallback::ShowError => {
            self.notice = Some(Notice::failure(LIST_FAILED));
          }
        }
      }
    }
    true
  }

  /// Fetch `page` and apply it.
  pub async fn load_page<B: CardBackend>(&mut self, backend: &B, page: u32) {
    let ticket = self.begin_fetch(page);
    let result = backend.list_page(Self::request_for(ticket)).await;
    self.finish_fetch(ticket, result);
  }

  pub fn can_go_previous(&self) -> bool { self.current_page > 1 }

  pub fn can_go_next(&self) -> bool { self.current_page < self.total_pages }

  pub fn previous_page(&self) -> Option<u32> {
    self.can_go_previous().then(|| self.current_page - 1)
  }

  pub fn next_page(&self) -> Option<u32> {
    self.can_go_next().then(|| self.current_page + 1)
  }

  /// Page buttons `1..=total_pages`; empty when there is only one page.
  pub fn page_numbers(&self) -> Vec<u32> {
    if self.total_pages > 1 {
      (1..=self.total_pages).collect()
    } else {
      Vec::new()
    }
  }

  // ── Delete ────────────────────────────────────────────────────────────────

  /// Ask for confirmation before deleting `id`. Returns `false` if no such
  /// row is listed.
  pub fn request_delete(&mut self, id: &RecordId) -> bool {
    let Some(row) = self.rows.iter().find(|r| &r.id == id) else {
      return false;
    };
    self.pending_delete = Some(PendingDelete {
      id:     row.id.clone(),
      name:   row.name.clone(),
      prompt: format!("Are you sure you want to delete {}?", row.name),
    });
    true
  }

  pub fn pending_delete(&self) -> Option<&PendingDelete> {
    self.pending_delete.as_ref()
  }

  pub fn cancel_delete(&mut self) { self.pending_delete = None; }

  /// The user confirmed; hand back the id to delete.
  pub fn confirm_delete(&mut self) -> Option<RecordId> {
    self.pending_delete.take().map(|p| p.id)
  }

  /// Apply a delete result. On success returns the page to re-fetch; on
  /// failure the rows are left exactly as they were.
  pub fn finish_delete(&mut self, id: &RecordId, result: Result<()>) -> Option<u32> {
    match result {
      Ok(()) => {
        tracing::info!(%id, "user deleted");
        self.notice = Some(Notice::success(DELETED));
        Some(self.current_page)
      }
      Err(e) => {
        tracing::warn!(%id, error = %e, "error deleting user");
        self.notice = Some(Notice::failure(DELETE_FAILED));
        None
      }
    }
  }

  /// Delete the confirmed record, then refresh the current page on success.
  /// Does nothing unless a delete was requested and is still pending.
  pub async fn delete_confirmed<B: CardBackend>(&mut self, backend: &B) {
    let Some(id) = self.confirm_delete() else {
      return;
    };
    let result = backend.delete(&id).await;
    if let Some(page) = self.finish_delete(&id, result) {
      self.load_page(backend, page).await;
    }
  }

  // ── QR preview ────────────────────────────────────────────────────────────

  pub fn open_qr(&mut self, id: &RecordId) -> bool {
    let Some(row) = self.rows.iter().find(|r| &r.id == id) else {
      return false;
    };
    let title = format!("QR Code - {}", row.name);
    self.qr_selection = Some((row.clone(), title));
    true
  }

  pub fn close_qr(&mut self) { self.qr_selection = None; }

  pub fn qr_preview(&self) -> Option<QrPreview<'_>> {
    self.qr_selection.as_ref().map(|(record, title)| QrPreview {
      title: title.as_str(),
      name: &record.name,
      url: record.qr_code_url(),
      caption: QR_CAPTION,
    })
  }

  // ── Form completion ───────────────────────────────────────────────────────

  /// Which page to re-fetch after the form dialog reports success.
  pub fn page_after_form(&self, mode: &FormMode) -> u32 {
    match mode {
      FormMode::Create => 1,
      FormMode::Update(_) => self.current_page,
    }
  }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
