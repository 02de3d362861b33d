//! The editable field set and file uploads sent on create / update.

use std::path::Path;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, IntoEnumIterator};

use crate::{Result, record::ContactRecord};

// ─── Field ───────────────────────────────────────────────────────────────────

/// One editable text field, in form order.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum Field {
  Name,
  Designation,
  Company,
  Tagline,
  Phone,
  Email,
  Whatsapp,
  Linkedin,
  Instagram,
  Youtube,
  Directions,
  Address,
}

/// What kind of input a field expects; mirrors HTML input types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
  Text,
  Tel,
  Email,
  Url,
  Multiline,
}

impl Field {
  pub fn label(self) -> &'static str {
    match self {
      Self::Name        => "Full Name",
      Self::Designation => "Designation",
      Self::Company     => "Company",
      Self::Tagline     => "Tagline",
      Self::Phone       => "Phone",
      Self::Email       => "Email",
      Self::Whatsapp    => "WhatsApp Number",
      Self::Linkedin    => "LinkedIn URL",
      Self::Instagram   => "Instagram URL",
      Self::Youtube     => "YouTube URL",
      Self::Directions  => "GoogleMap URL",
      Self::Address     => "Address",
    }
  }

  pub fn input_kind(self) -> InputKind {
    match self {
      Self::Phone | Self::Whatsapp => InputKind::Tel,
      Self::Email => InputKind::Email,
      Self::Linkedin | Self::Instagram | Self::Youtube | Self::Directions => {
        InputKind::Url
      }
      Self::Address => InputKind::Multiline,
      _ => InputKind::Text,
    }
  }

  /// Everything is required except the two social links and directions.
  pub fn is_required(self) -> bool {
    !matches!(self, Self::Linkedin | Self::Instagram | Self::Directions)
  }

  pub fn all() -> impl Iterator<Item = Field> { Self::iter() }
}

// ─── RecordFields ────────────────────────────────────────────────────────────

/// The `userData` payload: every editable text field as a plain string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFields {
  pub name:        String,
  pub designation: String,
  pub company:     String,
  pub tagline:     String,
  pub phone:       String,
  pub email:       String,
  pub address:     String,
  pub linkedin:    String,
  pub instagram:   String,
  pub youtube:     String,
  pub whatsapp:    String,
  pub directions:  String,
}

impl RecordFields {
  /// Pre-fill from an existing record; absent fields become empty strings.
  pub fn from_record(record: &ContactRecord) -> Self {
    let opt = |v: &Option<String>| v.clone().unwrap_or_default();
    Self {
      name:        record.name.clone(),
      designation: opt(&record.designation),
      company:     opt(&record.company),
      tagline:     opt(&record.tagline),
      phone:       record.phone.clone(),
      email:       record.email.clone(),
      address:     record.address.clone(),
      linkedin:    opt(&record.linkedin),
      instagram:   opt(&record.instagram),
      youtube:     opt(&record.youtube),
      whatsapp:    opt(&record.whatsapp),
      directions:  opt(&record.directions),
    }
  }

  pub fn get(&self, field: Field) -> &str {
    match field {
      Field::Name        => &self.name,
      Field::Designation => &self.designation,
      Field::Company     => &self.company,
      Field::Tagline     => &self.tagline,
      Field::Phone       => &self.phone,
      Field::Email       => &self.email,
      Field::Whatsapp    => &self.whatsapp,
      Field::Linkedin    => &self.linkedin,
      Field::Instagram   => &self.instagram,
      Field::Youtube     => &self.youtube,
      Field::Directions  => &self.directions,
      Field::Address     => &self.address,
    }
  }

  pub fn get_mut(&mut self, field: Field) -> &mut String {
    match field {
      Field::Name        => &mut self.name,
      Field::Designation => &mut self.designation,
      Field::Company     => &mut self.company,
      Field::Tagline     => &mut self.tagline,
      Field::Phone       => &mut self.phone,
      Field::Email       => &mut self.email,
      Field::Whatsapp    => &mut self.whatsapp,
      Field::Linkedin    => &mut self.linkedin,
      Field::Instagram   => &mut self.instagram,
      Field::Youtube     => &mut self.youtube,
      Field::Directions  => &mut self.directions,
      Field::Address     => &mut self.address,
    }
  }

  pub fn set(&mut self, field: Field, value: impl Into<String>) {
    *self.get_mut(field) = value.into();
  }

  /// Required fields that are still blank, in form order.
  pub fn missing_required(&self) -> Vec<Field> {
    Field::all()
      .filter(|f| f.is_required() && self.get(*f).trim().is_empty())
      .collect()
  }

  pub fn is_complete(&self) -> bool { self.missing_required().is_empty() }
}

// ─── FileUpload ──────────────────────────────────────────────────────────────

/// An image file selected for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
  pub file_name: String,
  pub mime:      String,
  pub bytes:     Bytes,
}

impl FileUpload {
  pub fn new(
    file_name: impl Into<String>,
    mime: impl Into<String>,
    bytes: impl Into<Bytes>,
  ) -> Self {
    Self {
      file_name: file_name.into(),
      mime:      mime.into(),
      bytes:     bytes.into(),
    }
  }

  /// Read an image from disk, guessing its MIME type from the extension.
  pub fn from_path(path: &Path) -> Result<Self> {
    let bytes = std::fs::read(path)?;
    let file_name = path
      .file_name()
      .map(|n| n.to_string_lossy().into_owned())
      .unwrap_or_else(|| "upload".to_string());
    let ext = path
      .extension()
      .map(|e| e.to_string_lossy().to_ascii_lowercase())
      .unwrap_or_default();
    Ok(Self::new(file_name, image_mime(&ext), bytes))
  }
}

fn image_mime(ext: &str) -> &'static str {
  match ext {
    "png"          => "image/png",
    "jpg" | "jpeg" => "image/jpeg",
    "gif"          => "image/gif",
    "webp"         => "image/webp",
    "svg"          => "image/svg+xml",
    "bmp"          => "image/bmp",
    _              => "application/octet-stream",
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  fn complete() -> RecordFields {
    let mut f = RecordFields::default();
    for field in Field::all() {
      f.set(field, format!("{field} value"));
    }
    f
  }

  #[test]
  fn optional_fields_are_exactly_socials_and_directions() {
    let optional: Vec<Field> = Field::all().filter(|f| !f.is_required()).collect();
    assert_eq!(optional, vec![Field::Linkedin, Field::Instagram, Field::Directions]);
  }

  #[test]
  fn blank_required_field_is_reported() {
    let mut f = complete();
    assert!(f.is_complete());
    f.set(Field::Email, "   ");
    f.set(Field::Linkedin, "");
    assert_eq!(f.missing_required(), vec![Field::Email]);
  }

  #[test]
  fn serializes_as_flat_user_data() {
    let mut f = RecordFields::default();
    f.set(Field::Name, "Yash");
    let json = serde_json::to_value(&f).unwrap();
    assert_eq!(json["name"], "Yash");
    assert_eq!(json["directions"], "");
    assert_eq!(json.as_object().unwrap().len(), 12);
  }

  #[test]
  fn field_display_is_wire_name() {
    assert_eq!(Field::Whatsapp.to_string(), "whatsapp");
    assert_eq!(Field::Address.as_ref(), "address");
    assert_eq!(Field::Address.input_kind(), InputKind::Multiline);
  }

  #[test]
  fn upload_from_path_guesses_mime() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logo.PNG");
    std::fs::write(&path, b"\x89PNG").unwrap();

    let upload = FileUpload::from_path(&path).unwrap();
    assert_eq!(upload.file_name, "logo.PNG");
    assert_eq!(upload.mime, "image/png");
    assert_eq!(upload.bytes.as_ref(), b"\x89PNG");
  }
}
