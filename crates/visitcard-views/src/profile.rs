//! Public profile page: one record, looked up by id, rendered as a card.
//!
//! Opening a profile fetches the record and, independently, fires a
//! "record a visit" request. The visit request runs as a detached task whose
//! outcome is only logged; it never gates the loading state.

use std::sync::Arc;

use tokio::task::JoinHandle;
use visitcard_core::{
  Error, Result,
  backend::CardBackend,
  record::{ContactRecord, RecordId},
};
use visitcard_vcard::ContactFile;

/// Shown when the backend answered but reported failure.
pub const FETCH_FAILED: &str = "Failed to fetch user data";
/// Shown when the request itself failed.
pub const LOAD_FAILED: &str = "Error loading user data";
pub const LOADING_TEXT: &str = "Loading profile...";
pub const NOT_FOUND_TEXT: &str = "User profile not found";

// ─── State ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ProfileState {
  /// No identifier yet.
  Idle,
  Loading,
  /// Generic, user-facing message; raw backend text is never shown.
  Error(String),
  NotFound,
  Populated(Box<ContactRecord>),
}

/// Hands the result of a fetch back to the load that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug)]
pub struct ProfileView {
  id:     Option<RecordId>,
  state:  ProfileState,
  issued: u64,
}

impl Default for ProfileView {
  fn default() -> Self { Self::new() }
}

impl ProfileView {
  pub fn new() -> Self {
    Self {
      id:     None,
      state:  ProfileState::Idle,
      issued: 0,
    }
  }

  pub fn id(&self) -> Option<&RecordId> { self.id.as_ref() }

  pub fn state(&self) -> &ProfileState { &self.state }

  pub fn is_loading(&self) -> bool { self.state == ProfileState::Loading }

  pub fn record(&self) -> Option<&ContactRecord> {
    match &self.state {
      ProfileState::Populated(r) => Some(r),
      _ => None,
    }
  }

  // ── Loading ───────────────────────────────────────────────────────────────

  /// Enter `Loading` for `id`. Returns `None` (and issues nothing) when the
  /// identifier is empty.
  pub fn begin(&mut self, id: RecordId) -> Option<LoadTicket> {
    if id.is_empty() {
      return None;
    }
    self.issued += 1;
    self.id = Some(id);
    self.state = ProfileState::Loading;
    Some(LoadTicket(self.issued))
  }

  /// Apply a fetch result. Returns `false` if the ticket was superseded and
  /// the result was discarded.
  pub fn finish(
    &mut self,
    ticket: LoadTicket,
    result: Result<Option<ContactRecord>>,
  ) -> bool {
    if ticket.0 != self.issued {
      tracing::debug!(ticket = ticket.0, latest = self.issued, "dropping stale profile fetch");
      return false;
    }
    self.state = match result {
      Ok(Some(record)) => ProfileState::Populated(Box::new(record)),
      Ok(None) | Err(Error::NotFound(_)) => ProfileState::NotFound,
      Err(e) if e.is_rejection() => {
        tracing::warn!(error = %e, "backend refused profile fetch");
        ProfileState::Error(FETCH_FAILED.to_string())
      }
      Err(e) => {
        tracing::error!(error = %e, "error fetching user data");
        ProfileState::Error(LOAD_FAILED.to_string())
      }
    };
    true
  }

  /// Fetch `id` and fire the visit request alongside it.
  ///
  /// Returns the detached visit task so callers *may* observe it; dropping
  /// the handle does not cancel it.
  pub async fn open<B>(
    &mut self,
    backend: &Arc<B>,
    id: RecordId,
  ) -> Option<JoinHandle<()>>
  where
    B: CardBackend + 'static,
  {
    let ticket = self.begin(id.clone())?;
    let visit = spawn_visit(Arc::clone(backend), id.clone());
    let result = backend.get_record(&id).await;
    self.finish(ticket, result);
    Some(visit)
  }

  // ── Rendering helpers ─────────────────────────────────────────────────────

  /// Which optional card sections to show; `None` unless populated.
  pub fn sections(&self) -> Option<ProfileSections<'_>> {
    self.record().map(ProfileSections::of)
  }

  /// Build the contact file for download. Only available when populated.
  pub fn contact_file(&self) -> Option<visitcard_vcard::Result<ContactFile>> {
    self.record().map(visitcard_vcard::contact_file)
  }
}

/// Fire-and-forget visit notification. Failures are logged, never retried.
pub fn spawn_visit<B>(backend: Arc<B>, id: RecordId) -> JoinHandle<()>
where
  B: CardBackend + 'static,
{
  tokio::spawn(async move {
    match backend.record_visit(&id).await {
      Ok(()) => tracing::debug!(%id, "visit recorded"),
      Err(e) => tracing::warn!(%id, error = %e, "error incrementing visit count"),
    }
  })
}

// ─── Sections ─────────────────────────────────────────────────────────────────

/// Presence of each conditional block on the card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSections<'a> {
  pub company_logo:  Option<&'a str>,
  pub profile_image: Option<&'a str>,
  pub tagline:       Option<&'a str>,
  pub directions:    Option<&'a str>,
  pub social:        Option<SocialLinks<'a>>,
  pub actions:       Vec<ContactAction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SocialLinks<'a> {
  pub linkedin:  Option<&'a str>,
  pub instagram: Option<&'a str>,
}

impl<'a> ProfileSections<'a> {
  pub fn of(record: &'a ContactRecord) -> Self {
    let social = record.has_social_links().then(|| SocialLinks {
      linkedin:  record.linkedin(),
      instagram: record.instagram(),
    });
    Self {
      company_logo: record.company_logo.as_ref().map(|logo| logo.url.as_str()),
      profile_image: record.profile_image_url(),
      tagline: record.tagline(),
      directions: record.directions(),
      social,
      actions: ContactAction::for_record(record),
    }
  }
}

// ─── Contact actions ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactActionKind {
  Call,
  Email,
  Text,
  WhatsApp,
}

/// A quick-action link on the card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactAction {
  pub kind: ContactActionKind,
  pub href: String,
}

impl ContactAction {
  pub fn for_record(record: &ContactRecord) -> Vec<Self> {
    let mut actions = Vec::new();
    let phone = record.phone.trim();
    let email = record.email.trim();
    if !phone.is_empty() {
      actions.push(Self { kind: ContactActionKind::Call, href: format!("tel:{phone}") });
    }
    if !email.is_empty() {
      actions.push(Self { kind: ContactActionKind::Email, href: format!("mailto:{email}") });
    }
    if !phone.is_empty() {
      actions.push(Self { kind: ContactActionKind::Text, href: format!("sms:{phone}") });
      actions.push(Self {
        kind: ContactActionKind::WhatsApp,
        href: format!("https://wa.me/{phone}"),
      });
    }
    actions
  }

  pub fn label(&self) -> &'static str {
    match self.kind {
      ContactActionKind::Call     => "Call",
      ContactActionKind::Email    => "Email",
      ContactActionKind::Text     => "Message",
      ContactActionKind::WhatsApp => "WhatsApp",
    }
  }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
