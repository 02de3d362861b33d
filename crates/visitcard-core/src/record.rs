//! The contact record — the only domain entity.
//!
//! Records are owned by the backend. The client reads them, renders them, and
//! sends edits as a [`RecordFields`](crate::fields::RecordFields) payload; it
//! never constructs image references or counters itself.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─── Identity ────────────────────────────────────────────────────────────────

/// Opaque backend-assigned identifier. Stable for the life of the record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
  pub fn new(id: impl Into<String>) -> Self { Self(id.into()) }

  pub fn as_str(&self) -> &str { &self.0 }

  pub fn is_empty(&self) -> bool { self.0.trim().is_empty() }
}

impl fmt::Display for RecordId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for RecordId {
  fn from(s: &str) -> Self { Self::new(s) }
}

impl From<String> for RecordId {
  fn from(s: String) -> Self { Self(s) }
}

// ─── Images ──────────────────────────────────────────────────────────────────

/// A backend-hosted image. Content is addressed by the owning record's id, so
/// re-uploading for the same record replaces rather than duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
  pub url: String,
}

impl ImageRef {
  /// The URL, if it is non-blank.
  pub fn href(&self) -> Option<&str> { non_blank_str(&self.url) }
}

// ─── Record ──────────────────────────────────────────────────────────────────

/// A single visiting-card profile as the backend returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
  #[serde(rename = "_id")]
  pub id:            RecordId,
  pub name:          String,
  #[serde(default)]
  pub designation:   Option<String>,
  #[serde(default)]
  pub company:       Option<String>,
  #[serde(default)]
  pub tagline:       Option<String>,
  #[serde(default)]
  pub phone:         String,
  #[serde(default)]
  pub email:         String,
  #[serde(default)]
  pub address:       String,
  #[serde(default)]
  pub linkedin:      Option<String>,
  #[serde(default)]
  pub instagram:     Option<String>,
  #[serde(default)]
  pub youtube:       Option<String>,
  #[serde(default)]
  pub whatsapp:      Option<String>,
  #[serde(default)]
  pub directions:    Option<String>,
  #[serde(default)]
  pub profile_image: Option<ImageRef>,
  #[serde(default)]
  pub company_logo:  Option<ImageRef>,
  #[serde(default)]
  pub qr_code:       Option<ImageRef>,
  #[serde(default)]
  pub visit_count:   u64,
  pub created_at:    DateTime<Utc>,
}

impl ContactRecord {
  pub fn designation(&self) -> Option<&str> { non_blank(&self.designation) }

  pub fn company(&self) -> Option<&str> { non_blank(&self.company) }

  pub fn tagline(&self) -> Option<&str> { non_blank(&self.tagline) }

  pub fn linkedin(&self) -> Option<&str> { non_blank(&self.linkedin) }

  pub fn instagram(&self) -> Option<&str> { non_blank(&self.instagram) }

  pub fn directions(&self) -> Option<&str> { non_blank(&self.directions) }

  pub fn profile_image_url(&self) -> Option<&str> {
    self.profile_image.as_ref().and_then(ImageRef::href)
  }

  pub fn company_logo_url(&self) -> Option<&str> {
    self.company_logo.as_ref().and_then(ImageRef::href)
  }

  pub fn qr_code_url(&self) -> Option<&str> {
    self.qr_code.as_ref().and_then(ImageRef::href)
  }

  /// Whether the social-links block has anything to show.
  pub fn has_social_links(&self) -> bool {
    self.linkedin().is_some() || self.instagram().is_some()
  }

  /// The single link used for a contact file's `URL` property.
  pub fn social_link(&self) -> Option<&str> {
    self.linkedin().or_else(|| self.instagram())
  }

  /// Tagline as the admin table shows it: at most 20 characters, then `...`.
  pub fn short_tagline(&self) -> Option<String> {
    let tagline = self.tagline()?;
    if tagline.chars().count() > 20 {
      Some(format!("{}...", tagline.chars().take(20).collect::<String>()))
    } else {
      Some(tagline.to_string())
    }
  }

  /// Creation date formatted like `Jun 12, 2025`.
  pub fn created_on(&self) -> String {
    self.created_at.format("%b %-d, %Y").to_string()
  }
}

// ─── Presence ────────────────────────────────────────────────────────────────

/// An optional text field counts as present only when non-blank.
pub fn non_blank(value: &Option<String>) -> Option<&str> {
  value.as_deref().and_then(non_blank_str)
}

fn non_blank_str(s: &str) -> Option<&str> {
  if s.trim().is_empty() { None } else { Some(s) }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  const JOHN: &str = r#"{
    "_id": "684aefe36a00cc30f3dc019e",
    "name": "John Does",
    "designation": "Software Engineer",
    "company": "Tech Corp",
    "tagline": "Innovating the future",
    "phone": "9876543210",
    "email": "john.doe@example.com",
    "address": "123 Main Street",
    "linkedin": "https://linkedin.com/in/johndoe",
    "instagram": "  ",
    "profileImage": { "url": "https://img.example/p.png" },
    "qrCode": { "url": "https://img.example/qr.png" },
    "createdAt": "2025-06-12T15:18:59.920Z"
  }"#;

  #[test]
  fn deserializes_backend_shape() {
    let r: ContactRecord = serde_json::from_str(JOHN).unwrap();
    assert_eq!(r.id.as_str(), "684aefe36a00cc30f3dc019e");
    assert_eq!(r.company(), Some("Tech Corp"));
    assert_eq!(r.profile_image_url(), Some("https://img.example/p.png"));
    assert!(r.company_logo.is_none());
    assert_eq!(r.visit_count, 0);
  }

  #[test]
  fn blank_optional_fields_are_absent() {
    let r: ContactRecord = serde_json::from_str(JOHN).unwrap();
    assert_eq!(r.instagram(), None);
    assert_eq!(non_blank(&r.youtube), None);
    assert!(r.has_social_links());
    assert_eq!(r.social_link(), Some("https://linkedin.com/in/johndoe"));
  }

  #[test]
  fn social_links_absent_when_all_whitespace() {
    let mut r: ContactRecord = serde_json::from_str(JOHN).unwrap();
    r.linkedin = Some("   ".into());
    r.instagram = Some(String::new());
    assert!(!r.has_social_links());
    assert_eq!(r.social_link(), None);

    r.instagram = Some("https://instagram.com/johndoe".into());
    assert!(r.has_social_links());
  }

  #[test]
  fn short_tagline_truncates_past_twenty_chars() {
    let mut r: ContactRecord = serde_json::from_str(JOHN).unwrap();
    assert_eq!(r.short_tagline().as_deref(), Some("Innovating the futur..."));
    r.tagline = Some("testing is key".into());
    assert_eq!(r.short_tagline().as_deref(), Some("testing is key"));
    r.tagline = None;
    assert_eq!(r.short_tagline(), None);
  }

  #[test]
  fn created_on_formats_short_month() {
    let r: ContactRecord = serde_json::from_str(JOHN).unwrap();
    assert_eq!(r.created_on(), "Jun 12, 2025");
  }

  #[test]
  fn round_trips_camel_case_keys() {
    let r: ContactRecord = serde_json::from_str(JOHN).unwrap();
    let json = serde_json::to_value(&r).unwrap();
    assert_eq!(json["_id"], "684aefe36a00cc30f3dc019e");
    assert_eq!(json["visitCount"], 0);
    assert!(json.get("profileImage").is_some());
  }
}
