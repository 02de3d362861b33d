//! Writing generated contact files to disk.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use visitcard_vcard::ContactFile;

/// Write `file` into `dir` under its suggested name. The in-memory payload is
/// consumed and dropped as soon as it has been written.
pub fn save(file: ContactFile, dir: &Path) -> Result<PathBuf> {
  let ContactFile { file_name, content, .. } = file;
  std::fs::create_dir_all(dir)
    .with_context(|| format!("creating {}", dir.display()))?;
  let path = dir.join(file_name);
  std::fs::write(&path, &content)
    .with_context(|| format!("writing {}", path.display()))?;
  drop(content);
  tracing::info!(path = %path.display(), "contact file saved");
  Ok(path)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn writes_under_suggested_name() {
    let dir = tempfile::tempdir().unwrap();
    let file = ContactFile {
      file_name: "John_Does_Tech_Corp.vcf".into(),
      mime:      visitcard_vcard::VCARD_MIME,
      content:   "BEGIN:VCARD\r\nEND:VCARD\r\n".into(),
    };

    let path = save(file, dir.path()).unwrap();
    assert_eq!(path, dir.path().join("John_Does_Tech_Corp.vcf"));
    assert_eq!(
      std::fs::read_to_string(&path).unwrap(),
      "BEGIN:VCARD\r\nEND:VCARD\r\n"
    );
  }

  #[test]
  fn creates_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("cards/today");
    let file = ContactFile {
      file_name: "A_Company.vcf".into(),
      mime:      visitcard_vcard::VCARD_MIME,
      content:   "x".into(),
    };
    assert!(save(file, &nested).unwrap().exists());
  }
}
