//! The `CardBackend` trait and the request / response shapes it speaks.
//!
//! The trait is implemented by `visitcard-client` over HTTP and by in-memory
//! doubles in tests. The view models depend on this abstraction, never on a
//! concrete transport.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::{
  Result,
  fields::{FileUpload, RecordFields},
  record::{ContactRecord, RecordId},
};

/// The admin table always asks for this many records per page.
pub const PAGE_SIZE: u32 = 10;

// ─── Requests ────────────────────────────────────────────────────────────────

/// A 1-indexed page of the record collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
  pub page:  u32,
  pub limit: u32,
}

impl PageRequest {
  /// Page `page` at the fixed admin page size. Page 0 is clamped to 1.
  pub fn new(page: u32) -> Self {
    Self {
      page:  page.max(1),
      limit: PAGE_SIZE,
    }
  }
}

/// A create or update request: the text fields plus at most two images.
///
/// An absent image part means "leave the stored image alone" on update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
  pub fields:        RecordFields,
  pub profile_image: Option<FileUpload>,
  pub company_logo:  Option<FileUpload>,
}

// ─── Responses ───────────────────────────────────────────────────────────────

/// Body of `GET users/get/{id}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecordEnvelope {
  #[serde(default)]
  pub success: bool,
  #[serde(default)]
  pub data:    Option<ContactRecord>,
  #[serde(default)]
  pub message: Option<String>,
}

/// Body of `GET users/all`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPage {
  #[serde(default)]
  pub data:        Vec<ContactRecord>,
  #[serde(default)]
  pub total_users: u64,
  #[serde(default)]
  pub total_pages: u32,
}

/// Body of a create / update response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct MutationReply {
  #[serde(default, alias = "ok")]
  pub success: Option<bool>,
  #[serde(default)]
  pub message: Option<String>,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the visiting-card backend.
///
/// All methods return `Send` futures so callers can spawn them on a
/// multi-threaded tokio runtime.
pub trait CardBackend: Send + Sync {
  /// Fetch one record. `Ok(None)` means the backend answered successfully
  /// with no payload; a `success: false` answer is [`Error::Rejected`].
  ///
  /// [`Error::Rejected`]: crate::Error::Rejected
  fn get_record<'a>(
    &'a self,
    id: &'a RecordId,
  ) -> impl Future<Output = Result<Option<ContactRecord>>> + Send + 'a;

  /// Tell the backend a profile was viewed. Callers treat this as
  /// best-effort.
  fn record_visit<'a>(
    &'a self,
    id: &'a RecordId,
  ) -> impl Future<Output = Result<()>> + Send + 'a;

  /// Fetch one page of the collection.
  fn list_page(
    &self,
    request: PageRequest,
  ) -> impl Future<Output = Result<RecordPage>> + Send + '_;

  /// Create a record; the backend assigns identity, images and counters.
  fn create(
    &self,
    submission: Submission,
  ) -> impl Future<Output = Result<MutationReply>> + Send + '_;

  /// Replace the editable fields of `id`, and any images supplied.
  fn update<'a>(
    &'a self,
    id: &'a RecordId,
    submission: Submission,
  ) -> impl Future<Output = Result<MutationReply>> + Send + 'a;

  /// Delete `id`. Irreversible from the client's side.
  fn delete<'a>(
    &'a self,
    id: &'a RecordId,
  ) -> impl Future<Output = Result<()>> + Send + 'a;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn page_zero_is_clamped() {
    assert_eq!(PageRequest::new(0), PageRequest { page: 1, limit: 10 });
    assert_eq!(PageRequest::new(3).limit, PAGE_SIZE);
  }

  #[test]
  fn mutation_reply_accepts_ok_alias() {
    let r: MutationReply = serde_json::from_str(r#"{"ok":true}"#).unwrap();
    assert_eq!(r.success, Some(true));
    let r: MutationReply =
      serde_json::from_str(r#"{"success":false,"message":"Email taken"}"#).unwrap();
    assert_eq!(r.success, Some(false));
    assert_eq!(r.message.as_deref(), Some("Email taken"));
  }

  #[test]
  fn record_page_reads_camel_case_totals() {
    let p: RecordPage =
      serde_json::from_str(r#"{"data":[],"totalUsers":42,"totalPages":5}"#).unwrap();
    assert_eq!(p.total_users, 42);
    assert_eq!(p.total_pages, 5);
  }

  #[test]
  fn envelope_without_data_is_none() {
    let e: RecordEnvelope =
      serde_json::from_str(r#"{"success":true,"data":null}"#).unwrap();
    assert!(e.success);
    assert!(e.data.is_none());
  }
}
