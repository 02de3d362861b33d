//! Create / update dialog.

use visitcard_core::{
  Error, Result,
  backend::{CardBackend, MutationReply, Submission},
  fields::{Field, FileUpload, RecordFields},
  record::{ContactRecord, RecordId},
};

use crate::notice::Notice;

pub const CREATED: &str = "User created successfully!";
pub const UPDATED: &str = "User updated successfully!";
pub const REQUEST_FAILED: &str = "Request failed";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
  Create,
  Update(RecordId),
}

impl FormMode {
  pub fn title(&self) -> &'static str {
    match self {
      Self::Create => "Create New User",
      Self::Update(_) => "Update User",
    }
  }

  pub fn submit_label(&self) -> &'static str {
    match self {
      Self::Create => "Create User",
      Self::Update(_) => "Update User",
    }
  }
}

/// What the caller should do after a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
  /// The backend accepted the change; re-fetch the table.
  Completed(FormMode),
  /// The backend or network failed; the dialog is still open.
  Failed,
  /// Nothing was sent: already submitting, or a required field is blank.
  Ignored,
}

#[derive(Debug)]
pub struct FormDialog {
  mode:          FormMode,
  fields:        RecordFields,
  profile_image: Option<FileUpload>,
  company_logo:  Option<FileUpload>,
  bound:         Option<ContactRecord>,
  open:          bool,
  submitting:    bool,
  notice:        Option<Notice>,
}

impl FormDialog {
  /// An empty dialog for creating a record.
  pub fn create() -> Self {
    Self {
      mode:          FormMode::Create,
      fields:        RecordFields::default(),
      profile_image: None,
      company_logo:  None,
      bound:         None,
      open:          false,
      submitting:    false,
      notice:        None,
    }
  }

  /// A dialog bound to `record`, pre-filled from it.
  pub fn update(record: &ContactRecord) -> Self {
    let mut dialog = Self::create();
    dialog.mode = FormMode::Update(record.id.clone());
    dialog.bind(record);
    dialog
  }

  pub fn mode(&self) -> &FormMode { &self.mode }

  pub fn fields(&self) -> &RecordFields { &self.fields }

  pub fn is_open(&self) -> bool { self.open }

  pub fn is_submitting(&self) -> bool { self.submitting }

  pub fn notice(&self) -> Option<&Notice> { self.notice.as_ref() }

  pub fn dismiss_notice(&mut self) { self.notice = None; }

  pub fn profile_image(&self) -> Option<&FileUpload> { self.profile_image.as_ref() }

  pub fn company_logo(&self) -> Option<&FileUpload> { self.company_logo.as_ref() }

  /// Re-initialize every field from `record` if it differs from the record
  /// last bound. No-op in create mode. Returns whether fields were reset.
  pub fn bind(&mut self, record: &ContactRecord) -> bool {
    if self.mode == FormMode::Create || self.bound.as_ref() == Some(record) {
      return false;
    }
    self.mode = FormMode::Update(record.id.clone());
    self.fields = RecordFields::from_record(record);
    self.bound = Some(record.clone());
    true
  }

  pub fn open(&mut self) { self.open = true; }

  /// Cancel: hide the dialog, keeping whatever was typed.
  pub fn close(&mut self) { self.open = false; }

  pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
    self.fields.set(field, value);
  }

  pub fn set_profile_image(&mut self, upload: Option<FileUpload>) {
    self.profile_image = upload;
  }

  pub fn set_company_logo(&mut self, upload: Option<FileUpload>) {
    self.company_logo = upload;
  }

  pub fn missing_required(&self) -> Vec<Field> { self.fields.missing_required() }

  /// `Err(MissingField)` naming the first blank required field, in form order.
  pub fn validate(&self) -> Result<()> {
    match self.missing_required().first() {
      Some(&field) => Err(Error::MissingField(field)),
      None => Ok(()),
    }
  }

  /// Raise a failure notice for a problem found before anything was sent,
  /// such as an unreadable image file.
  pub fn report_failure(&mut self, message: impl Into<String>) {
    self.notice = Some(Notice::failure(message));
  }

  /// Whether the submit trigger is enabled.
  pub fn can_submit(&self) -> bool { !self.submitting && self.fields.is_complete() }

  // ── Submission ────────────────────────────────────────────────────────────

  /// Lock the dialog and package the request. `None` while another submit is
  /// in flight or a required field is blank.
  pub fn begin_submit(&mut self) -> Option<Submission> {
    if !self.can_submit() {
      return None;
    }
    self.submitting = true;
    Some(Submission {
      fields:        self.fields.clone(),
      profile_image: self.profile_image.clone(),
      company_logo:  self.company_logo.clone(),
    })
  }

  pub fn finish_submit(&mut self, result: Result<MutationReply>) -> FormOutcome {
    self.submitting = false;
    match result {
      Ok(reply) => {
        tracing::info!(mode = ?self.mode, message = ?reply.message, "form submitted");
        self.notice = Some(Notice::success(match self.mode {
          FormMode::Create => CREATED,
          FormMode::Update(_) => UPDATED,
        }));
        self.open = false;
        if self.mode == FormMode::Create {
          self.fields = RecordFields::default();
          self.profile_image = None;
          self.company_logo = None;
        }
        FormOutcome::Completed(self.mode.clone())
      }
      Err(e) => {
        tracing::warn!(mode = ?self.mode, error = %e, "form submission failed");
        let message = e.backend_message().unwrap_or(REQUEST_FAILED).to_string();
        self.notice = Some(Notice::failure(message));
        FormOutcome::Failed
      }
    }
  }

  /// Submit to the backend: create, or update the bound id.
  pub async fn submit<B: CardBackend>(&mut self, backend: &B) -> FormOutcome {
    let Some(submission) = self.begin_submit() else {
      return FormOutcome::Ignored;
    };
    let result = match &self.mode {
      FormMode::Create => backend.create(submission).await,
      FormMode::Update(id) => backend.update(id, submission).await,
    };
    self.finish_submit(result)
  }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    admin::AdminView,
    fallback::sample_records,
    testing::{Fail, MemoryBackend, numbered},
  };

  fn fill(dialog: &mut FormDialog) {
    for field in Field::all().filter(|f| f.is_required()) {
      dialog.set_field(field, format!("new {field}"));
    }
  }

  #[test]
  fn update_prefills_and_defaults_missing_to_empty() {
    let john = sample_records().remove(2);
    let dialog = FormDialog::update(&john);
    assert_eq!(dialog.mode(), &FormMode::Update(john.id.clone()));
    assert_eq!(dialog.fields().name, "John Does");
    assert_eq!(dialog.fields().linkedin, "https://linkedin.com/in/johndoe");
    assert_eq!(dialog.fields().youtube, "");
    assert_eq!(dialog.fields().directions, "");
  }

  #[test]
  fn rebinding_a_changed_record_resets_fields() {
    let records = sample_records();
    let mut dialog = FormDialog::update(&records[0]);
    dialog.set_field(Field::Name, "edited");

    assert!(!dialog.bind(&records[0]), "same record keeps edits");
    assert_eq!(dialog.fields().name, "edited");

    let mut changed = records[0].clone();
    changed.tagline = Some("fresh".into());
    assert!(dialog.bind(&changed));
    assert_eq!(dialog.fields().name, "Yash");
    assert_eq!(dialog.fields().tagline, "fresh");
  }

  #[test]
  fn create_dialog_ignores_bind() {
    let mut dialog = FormDialog::create();
    assert!(!dialog.bind(&sample_records()[0]));
    assert_eq!(dialog.fields(), &RecordFields::default());
  }

  #[tokio::test]
  async fn blank_required_field_blocks_submit() {
    let backend = MemoryBackend::default();
    let mut dialog = FormDialog::create();
    fill(&mut dialog);
    dialog.set_field(Field::Address, "  ");

    assert!(!dialog.can_submit());
    assert_eq!(dialog.missing_required(), vec![Field::Address]);
    assert_eq!(dialog.submit(&backend).await, FormOutcome::Ignored);
    assert!(backend.submissions.lock().unwrap().is_empty());
  }

  #[test]
  fn validate_names_first_blank_required_field() {
    let mut dialog = FormDialog::create();
    assert!(matches!(dialog.validate(), Err(Error::MissingField(Field::Name))));

    fill(&mut dialog);
    dialog.set_field(Field::Phone, "  ");
    assert!(matches!(dialog.validate(), Err(Error::MissingField(Field::Phone))));

    dialog.set_field(Field::Phone, "9096842842");
    assert!(dialog.validate().is_ok());
  }

  #[test]
  fn reported_failure_keeps_dialog_open() {
    let mut dialog = FormDialog::create();
    dialog.open();
    dialog.report_failure("Could not read image file");
    assert!(dialog.is_open());
    let notice = dialog.notice().unwrap();
    assert!(notice.is_failure());
    assert_eq!(notice.message, "Could not read image file");
  }

  #[test]
  fn second_submit_while_in_flight_is_ignored() {
    let mut dialog = FormDialog::create();
    fill(&mut dialog);
    assert!(dialog.begin_submit().is_some());
    assert!(dialog.is_submitting());
    assert!(dialog.begin_submit().is_none());

    dialog.finish_submit(Err(Error::Transport(Box::new(std::io::Error::other("x")))));
    assert!(dialog.begin_submit().is_some());
  }

  #[tokio::test]
  async fn successful_create_resets_and_refetches_page_one() {
    let backend = MemoryBackend::with_records(numbered(15));
    let mut admin = AdminView::default();
    admin.load_page(&backend, 2).await;

    let mut dialog = FormDialog::create();
    dialog.open();
    fill(&mut dialog);
    dialog.set_profile_image(Some(FileUpload::new("me.png", "image/png", b"png".to_vec())));

    let outcome = dialog.submit(&backend).await;
    let FormOutcome::Completed(mode) = outcome else {
      panic!("expected completion, got {outcome:?}")
    };
    admin.load_page(&backend, admin.page_after_form(&mode)).await;

    assert_eq!(*backend.pages_asked.lock().unwrap(), vec![2, 1]);
    assert_eq!(admin.current_page(), 1);
    assert_eq!(admin.rows()[0].name, "new name");
    assert!(!dialog.is_open());
    assert_eq!(dialog.fields(), &RecordFields::default());
    assert!(dialog.profile_image().is_none());
    assert_eq!(dialog.notice(), Some(&Notice::success(CREATED)));

    let submissions = backend.submissions.lock().unwrap();
    assert_eq!(submissions[0].0, None);
    assert!(submissions[0].1.profile_image.is_some());
    assert!(submissions[0].1.company_logo.is_none());
  }

  #[tokio::test]
  async fn successful_update_refetches_current_page_and_keeps_fields() {
    let backend = MemoryBackend::with_records(numbered(15));
    let mut admin = AdminView::default();
    admin.load_page(&backend, 2).await;
    let target = admin.rows()[0].clone();

    let mut dialog = FormDialog::update(&target);
    dialog.open();
    dialog.set_field(Field::Designation, "Lead");
    dialog.set_field(Field::Company, "Acme");
    dialog.set_field(Field::Tagline, "Hi");
    dialog.set_field(Field::Youtube, "https://youtube.com/x");
    dialog.set_field(Field::Whatsapp, "9000000000");

    let outcome = dialog.submit(&backend).await;
    assert_eq!(outcome, FormOutcome::Completed(FormMode::Update(target.id.clone())));
    admin.load_page(&backend, admin.page_after_form(dialog.mode())).await;

    assert_eq!(*backend.pages_asked.lock().unwrap(), vec![2, 2]);
    assert_eq!(admin.rows()[0].designation.as_deref(), Some("Lead"));
    assert_eq!(dialog.fields().company, "Acme");
    assert_eq!(dialog.notice(), Some(&Notice::success(UPDATED)));

    let submissions = backend.submissions.lock().unwrap();
    assert_eq!(submissions[0].0, Some(target.id));
    assert!(submissions[0].1.profile_image.is_none(), "omitted image keeps existing");
  }

  #[tokio::test]
  async fn failure_keeps_dialog_open_with_values() {
    let backend = MemoryBackend::default();
    MemoryBackend::fail(&backend.fail_mutate, Fail::Transport);
    let mut dialog = FormDialog::create();
    dialog.open();
    fill(&mut dialog);
    let before = dialog.fields().clone();

    assert_eq!(dialog.submit(&backend).await, FormOutcome::Failed);
    assert!(dialog.is_open());
    assert!(!dialog.is_submitting());
    assert_eq!(dialog.fields(), &before);
    assert_eq!(dialog.notice(), Some(&Notice::failure(REQUEST_FAILED)));
  }

  #[test]
  fn failure_notice_uses_backend_message() {
    let mut dialog = FormDialog::create();
    fill(&mut dialog);
    dialog.begin_submit();
    let outcome = dialog.finish_submit(Err(Error::Rejected {
      status:  409,
      message: "Email already exists".into(),
    }));
    assert_eq!(outcome, FormOutcome::Failed);
    assert_eq!(dialog.notice(), Some(&Notice::failure("Email already exists")));
  }
}
