//! One-shot messages shown to the user after an action.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
  Success,
  Failure,
}

/// A blocking notice, the equivalent of an alert box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
  pub kind:    NoticeKind,
  pub message: String,
}

impl Notice {
  pub fn success(message: impl Into<String>) -> Self {
    Self {
      kind:    NoticeKind::Success,
      message: message.into(),
    }
  }

  pub fn failure(message: impl Into<String>) -> Self {
    Self {
      kind:    NoticeKind::Failure,
      message: message.into(),
    }
  }

  pub fn is_failure(&self) -> bool { self.kind == NoticeKind::Failure }
}
