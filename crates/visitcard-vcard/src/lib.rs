//! Contact-file generation for visitcard.
//!
//! Turns a [`ContactRecord`] into a downloadable vCard 3.0 file. Pure
//! synchronous; no HTTP dependencies.
//!
//! # Quick start
//!
//! ```no_run
//! # fn demo(record: &visitcard_core::record::ContactRecord) {
//! let file = visitcard_vcard::contact_file(record).unwrap();
//! println!("{} ({} bytes)", file.file_name, file.content.len());
//! # }
//! ```

pub mod error;
mod serialize;

use bytes::Bytes;
pub use error::{Error, Result};
use visitcard_core::record::ContactRecord;

/// Company segment used in the file name when the record has none.
pub const COMPANY_PLACEHOLDER: &str = "Company";

pub const VCARD_MIME: &str = "text/vcard";

pub const VCARD_EXTENSION: &str = "vcf";

// ─── Public types ─────────────────────────────────────────────────────────────

/// A generated contact file, ready to hand to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactFile {
  /// Suggested download name, e.g. `John_Does_Tech_Corp.vcf`.
  pub file_name: String,
  pub mime:      &'static str,
  pub content:   Bytes,
}

// ─── Public API ───────────────────────────────────────────────────────────────

/// Build the downloadable contact file for `record`.
pub fn contact_file(record: &ContactRecord) -> Result<ContactFile> {
  let body = serialize::serialize_v3(record)?;
  Ok(ContactFile {
    file_name: suggested_file_name(record),
    mime:      VCARD_MIME,
    content:   Bytes::from(body),
  })
}

/// `{Name}_{Company}.vcf` with whitespace runs collapsed to `_`; the company
/// segment falls back to [`COMPANY_PLACEHOLDER`].
pub fn suggested_file_name(record: &ContactRecord) -> String {
  let name = underscore_whitespace(&record.name);
  let company = record
    .company()
    .map(underscore_whitespace)
    .unwrap_or_else(|| COMPANY_PLACEHOLDER.to_string());
  format!("{name}_{company}.{VCARD_EXTENSION}")
}

fn underscore_whitespace(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  let mut in_space = false;
  for c in s.chars() {
    if c.is_whitespace() {
      if !in_space {
        out.push('_');
      }
      in_space = true;
    } else {
      out.push(c);
      in_space = false;
    }
  }
  out
}

// ─── Tests ────────────────────────────────────────────────────────────────────


// ─── Shared test helpers ──────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod test_helpers {
  use chrono::{TimeZone, Utc};
  use visitcard_core::record::{ContactRecord, ImageRef, RecordId};

  /// The "John Does" sample card.
  pub(crate) fn john() -> ContactRecord {
    ContactRecord {
      id:            RecordId::new("684aefe36a00cc30f3dc019e"),
      name:          "John Does".to_string(),
      designation:   Some("Software Engineer".to_string()),
      company:       Some("Tech Corp".to_string()),
      tagline:       Some("Innovating the future".to_string()),
      phone:         "9876543210".to_string(),
      email:         "john.doe@example.com".to_string(),
      address:       "123 Main Street".to_string(),
      linkedin:      Some("https://linkedin.com/in/johndoe".to_string()),
      instagram:     Some("https://instagram.com/johndoe".to_string()),
      youtube:       None,
      whatsapp:      None,
      directions:    None,
      profile_image: None,
      company_logo:  None,
      qr_code:       Some(ImageRef { url: "https://img.example/qr.png".to_string() }),
      visit_count:   0,
      created_at:    Utc.with_ymd_and_hms(2025, 6, 12, 15, 18, 59).unwrap(),
    }
  }
}
