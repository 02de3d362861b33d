//! vCard 3.0 serializer for a single contact record.
//!
//! Produces CRLF line endings and folds at 75 octets per RFC 6350 §3.2.

use visitcard_core::record::ContactRecord;

use crate::error::{Error, Result};

// ─── Line folding ─────────────────────────────────────────────────────────────

/// Emit `s` as one logical line, folding at 75 octets with CRLF + SP continuation.
pub(crate) fn fold_line(s: &str) -> String {
  if s.len() <= 75 {
    return format!("{}\r\n", s);
  }

  let mut result = String::new();
  let total = s.len();
  let mut pos = 0usize;
  let mut first = true;

  while pos < total {
    let limit = if first { 75 } else { 74 };
    let end   = if pos + limit >= total {
      total
    } else {
      let mut e = pos + limit;
      while e > pos && !s.is_char_boundary(e) {
        e -= 1;
      }
      if e == pos { pos + 1 } else { e }
    };

    if !first {
      result.push(' ');
    }
    result.push_str(&s[pos..end]);
    result.push_str("\r\n");
    pos   = end;
    first = false;
  }

  result
}

// ─── Value escaping ───────────────────────────────────────────────────────────

/// Escape a full property value: `\`, `,`, `;`, `\n`.
fn escape_value(s: &str) -> String {
  s.replace('\\', "\\\\")
   .replace(',', "\\,")
   .replace(';', "\\;")
   .replace("\r\n", "\\n")
   .replace('\n', "\\n")
}

/// Escape a semicolon-delimited component (N / ADR): `\`, `;`, `\n`.
fn escape_component(s: &str) -> String {
  s.replace('\\', "\\\\")
   .replace(';', "\\;")
   .replace("\r\n", "\\n")
   .replace('\n', "\\n")
}

/// Split a display name into `(family, given)` for the structured `N` line.
/// The last word is taken as the family name.
fn split_name(full: &str) -> (String, String) {
  let words: Vec<&str> = full.split_whitespace().collect();
  match words.split_last() {
    Some((family, [])) => (family.to_string(), String::new()),
    Some((family, given)) => (family.to_string(), given.join(" ")),
    None => (String::new(), String::new()),
  }
}

// ─── Serializer ───────────────────────────────────────────────────────────────

/// Serialize `record` as a vCard 3.0 string.
pub fn serialize_v3(record: &ContactRecord) -> Result<String> {
  let full = record.name.trim();
  if full.is_empty() {
    return Err(Error::MissingName(record.id.to_string()));
  }

  let mut out = String::new();
  out.push_str("BEGIN:VCARD\r\n");
  out.push_str("VERSION:3.0\r\n");
  out.push_str(&fold_line(&format!("FN:{}", escape_value(full))));

  let (family, given) = split_name(full);
  out.push_str(&fold_line(&format!(
    "N:{};{};;;",
    escape_component(&family),
    escape_component(&given)
  )));

  if let Some(company) = record.company() {
    out.push_str(&fold_line(&format!("ORG:{}", escape_value(company))));
  }
  if let Some(title) = record.designation() {
    out.push_str(&fold_line(&format!("TITLE:{}", escape_value(title))));
  }
  if !record.phone.trim().is_empty() {
    out.push_str(&fold_line(&format!("TEL;TYPE=CELL:{}", record.phone.trim())));
  }
  if !record.email.trim().is_empty() {
    out.push_str(&fold_line(&format!("EMAIL;TYPE=INTERNET:{}", record.email.trim())));
  }
  if !record.address.trim().is_empty() {
    // Whole address in the street component, kept on one line.
    let street = record.address.split_whitespace().collect::<Vec<_>>().join(" ");
    out.push_str(&fold_line(&format!("ADR:;;{};;;;", escape_component(&street))));
  }
  if let Some(url) = record.social_link() {
    out.push_str(&fold_line(&format!("URL:{}", url.trim())));
  }
  if let Some(note) = record.tagline() {
    out.push_str(&fold_line(&format!("NOTE:{}", escape_value(note))));
  }

  out.push_str("END:VCARD\r\n");
  Ok(out)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_helpers::john;

  #[test]
  fn envelope_contains_required_lines() {
    let out = serialize_v3(&john()).unwrap();
    assert!(out.starts_with("BEGIN:VCARD\r\nVERSION:3.0\r\n"), "got:\n{out}");
    assert!(out.ends_with("END:VCARD\r\n"), "got:\n{out}");
  }

  #[test]
  fn name_emits_fn_and_n() {
    let out = serialize_v3(&john()).unwrap();
    assert!(out.contains("FN:John Does\r\n"), "missing FN in:\n{out}");
    assert!(out.contains("N:Does;John;;;\r\n"), "missing N in:\n{out}");
  }

  #[test]
  fn single_word_name_is_family_only() {
    let mut r = john();
    r.name = "Yash".into();
    let out = serialize_v3(&r).unwrap();
    assert!(out.contains("N:Yash;;;;\r\n"), "got:\n{out}");
  }

  #[test]
  fn org_title_tel_email() {
    let out = serialize_v3(&john()).unwrap();
    assert!(out.contains("ORG:Tech Corp\r\n"), "got:\n{out}");
    assert!(out.contains("TITLE:Software Engineer\r\n"), "got:\n{out}");
    assert!(out.contains("TEL;TYPE=CELL:9876543210\r\n"), "got:\n{out}");
    assert!(out.contains("EMAIL;TYPE=INTERNET:john.doe@example.com\r\n"), "got:\n{out}");
  }

  #[test]
  fn address_is_single_line_street_component() {
    let mut r = john();
    r.address = "123 Main Street\nSuite 4; Floor 2".into();
    let out = serialize_v3(&r).unwrap();
    assert!(
      out.contains("ADR:;;123 Main Street Suite 4\\; Floor 2;;;;\r\n"),
      "got:\n{out}"
    );
  }

  #[test]
  fn absent_optionals_are_omitted() {
    let mut r = john();
    r.company = None;
    r.designation = Some("  ".into());
    r.tagline = None;
    r.linkedin = None;
    r.instagram = None;
    let out = serialize_v3(&r).unwrap();
    assert!(!out.contains("ORG:"), "unexpected ORG in:\n{out}");
    assert!(!out.contains("TITLE:"), "unexpected TITLE in:\n{out}");
    assert!(!out.contains("NOTE:"), "unexpected NOTE in:\n{out}");
    assert!(!out.contains("URL:"), "unexpected URL in:\n{out}");
  }

  #[test]
  fn url_falls_back_to_instagram() {
    let mut r = john();
    r.linkedin = Some(" ".into());
    let out = serialize_v3(&r).unwrap();
    assert!(out.contains("URL:https://instagram.com/johndoe\r\n"), "got:\n{out}");
  }

  #[test]
  fn note_carries_escaped_tagline() {
    let mut r = john();
    r.tagline = Some("Fast, cheap; good".into());
    let out = serialize_v3(&r).unwrap();
    assert!(out.contains("NOTE:Fast\\, cheap\\; good\r\n"), "got:\n{out}");
  }

  #[test]
  fn long_note_is_folded() {
    let mut r = john();
    r.tagline = Some("A".repeat(200));
    let out = serialize_v3(&r).unwrap();
    for physical_line in out.split("\r\n").filter(|l| !l.is_empty()) {
      assert!(
        physical_line.len() <= 75,
        "physical line too long ({} bytes): {:?}",
        physical_line.len(), physical_line
      );
    }
  }

  #[test]
  fn blank_name_is_an_error() {
    let mut r = john();
    r.name = "   ".into();
    assert!(matches!(serialize_v3(&r), Err(Error::MissingName(_))));
  }
}
