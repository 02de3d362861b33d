//! Keyboard state for the create / update dialog.
//!
//! Wraps a [`FormDialog`] with a focus cursor over the text fields and two
//! extra inputs holding image file paths.

use std::path::Path;

use visitcard_core::{
  fields::{Field, FileUpload, InputKind},
  record::ContactRecord,
};
use visitcard_views::FormDialog;

/// One focusable row in the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
  Text(Field),
  ProfileImage,
  CompanyLogo,
}

impl Slot {
  pub fn label(self) -> &'static str {
    match self {
      Slot::Text(f) => f.label(),
      Slot::ProfileImage => "Profile Image",
      Slot::CompanyLogo => "Company Logo",
    }
  }

  /// Greyed-out hint shown while the slot is empty.
  pub fn placeholder(self) -> &'static str {
    match self {
      Slot::Text(f) => match f.input_kind() {
        InputKind::Tel => "digits only",
        InputKind::Email => "name@example.com",
        InputKind::Url => "https://…",
        InputKind::Multiline => "street, city",
        InputKind::Text => "",
      },
      Slot::ProfileImage | Slot::CompanyLogo => "path to an image file",
    }
  }
}

pub struct FormEditor {
  pub dialog:        FormDialog,
  pub focus:         usize,
  pub profile_image: String,
  pub company_logo:  String,
}

impl FormEditor {
  pub fn new(dialog: FormDialog) -> Self {
    Self {
      dialog,
      focus: 0,
      profile_image: String::new(),
      company_logo: String::new(),
    }
  }

  pub fn for_update(record: &ContactRecord) -> Self { Self::new(FormDialog::update(record)) }

  pub fn slots() -> Vec<Slot> {
    Field::all()
      .map(Slot::Text)
      .chain([Slot::ProfileImage, Slot::CompanyLogo])
      .collect()
  }

  pub fn focused(&self) -> Slot {
    let slots = Self::slots();
    slots[self.focus.min(slots.len() - 1)]
  }

  pub fn value(&self, slot: Slot) -> &str {
    match slot {
      Slot::Text(f) => self.dialog.fields().get(f),
      Slot::ProfileImage => &self.profile_image,
      Slot::CompanyLogo => &self.company_logo,
    }
  }

  pub fn next(&mut self) { self.focus = (self.focus + 1) % Self::slots().len(); }

  pub fn previous(&mut self) {
    let len = Self::slots().len();
    self.focus = (self.focus + len - 1) % len;
  }

  pub fn push(&mut self, c: char) {
    match self.focused() {
      Slot::Text(f) => {
        let mut value = self.dialog.fields().get(f).to_string();
        value.push(c);
        self.dialog.set_field(f, value);
      }
      Slot::ProfileImage => self.profile_image.push(c),
      Slot::CompanyLogo => self.company_logo.push(c),
    }
  }

  pub fn pop(&mut self) {
    match self.focused() {
      Slot::Text(f) => {
        let mut value = self.dialog.fields().get(f).to_string();
        value.pop();
        self.dialog.set_field(f, value);
      }
      Slot::ProfileImage => {
        self.profile_image.pop();
      }
      Slot::CompanyLogo => {
        self.company_logo.pop();
      }
    }
  }

  /// Load the typed image paths into the dialog. Blank paths select nothing.
  pub fn load_files(&mut self) -> visitcard_core::Result<()> {
    let profile = load(&self.profile_image)?;
    let logo = load(&self.company_logo)?;
    self.dialog.set_profile_image(profile);
    self.dialog.set_company_logo(logo);
    Ok(())
  }

  /// Clear the path inputs once a create has gone through.
  pub fn clear_paths(&mut self) {
    self.profile_image.clear();
    self.company_logo.clear();
    self.focus = 0;
  }
}

fn load(path: &str) -> visitcard_core::Result<Option<FileUpload>> {
  let path = path.trim();
  if path.is_empty() {
    return Ok(None);
  }
  FileUpload::from_path(Path::new(path)).map(Some)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn typing_edits_focused_field() {
    let mut e = FormEditor::new(FormDialog::create());
    for c in "Ann".chars() {
      e.push(c);
    }
    e.pop();
    assert_eq!(e.dialog.fields().name, "An");

    e.next();
    e.push('x');
    assert_eq!(e.dialog.fields().designation, "x");
  }

  #[test]
  fn focus_wraps_through_file_slots() {
    let mut e = FormEditor::new(FormDialog::create());
    e.previous();
    assert_eq!(e.focused(), Slot::CompanyLogo);
    e.previous();
    assert_eq!(e.focused(), Slot::ProfileImage);
    e.next();
    e.next();
    assert_eq!(e.focused(), Slot::Text(Field::Name));
  }

  #[test]
  fn placeholder_follows_input_kind() {
    assert_eq!(Slot::Text(Field::Whatsapp).placeholder(), "digits only");
    assert_eq!(Slot::Text(Field::Linkedin).placeholder(), "https://…");
    assert_eq!(Slot::Text(Field::Name).placeholder(), "");
    assert_eq!(Slot::CompanyLogo.placeholder(), "path to an image file");
  }

  #[test]
  fn missing_image_path_is_an_error() {
    let mut e = FormEditor::new(FormDialog::create());
    e.profile_image = "/definitely/not/here.png".into();
    assert!(e.load_files().is_err());
    e.profile_image.clear();
    assert!(e.load_files().is_ok());
    assert!(e.dialog.profile_image().is_none());
  }
}
