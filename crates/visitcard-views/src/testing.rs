//! In-memory `CardBackend` double with failure injection and call counters.

use std::sync::{
  Mutex,
  atomic::{AtomicUsize, Ordering},
};

use chrono::Utc;
use tokio::sync::Semaphore;
use uuid::Uuid;
use visitcard_core::{
  Error, Result,
  backend::{CardBackend, MutationReply, PageRequest, RecordPage, Submission},
  fields::RecordFields,
  record::{ContactRecord, ImageRef, RecordId},
};

/// How an injected failure presents itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Fail {
  Transport,
  Rejected,
}

impl Fail {
  fn into_error(self) -> Error {
    match self {
      Fail::Transport => Error::Transport(Box::new(std::io::Error::other(
        "connection refused",
      ))),
      Fail::Rejected => Error::Rejected {
        status:  500,
        message: "internal: stack trace here".into(),
      },
    }
  }
}

#[derive(Default)]
pub(crate) struct MemoryBackend {
  pub records:      Mutex<Vec<ContactRecord>>,
  pub fail_get:     Mutex<Option<Fail>>,
  pub fail_visit:   Mutex<Option<Fail>>,
  pub fail_list:    Mutex<Option<Fail>>,
  pub fail_mutate:  Mutex<Option<Fail>>,
  pub fail_delete:  Mutex<Option<Fail>>,
  /// When set, `record_visit` waits for a permit before answering.
  pub visit_gate:   Option<Semaphore>,
  pub visits:       AtomicUsize,
  pub gets:         AtomicUsize,
  pub deletes:      AtomicUsize,
  pub pages_asked:  Mutex<Vec<u32>>,
  pub submissions:  Mutex<Vec<(Option<RecordId>, Submission)>>,
}

impl MemoryBackend {
  pub(crate) fn with_records(records: Vec<ContactRecord>) -> Self {
    Self {
      records: Mutex::new(records),
      ..Default::default()
    }
  }

  pub(crate) fn gated() -> Self {
    Self {
      visit_gate: Some(Semaphore::new(0)),
      ..Default::default()
    }
  }

  pub(crate) fn fail(slot: &Mutex<Option<Fail>>, how: Fail) {
    *slot.lock().unwrap() = Some(how);
  }

  fn check(slot: &Mutex<Option<Fail>>) -> Result<()> {
    match *slot.lock().unwrap() {
      Some(f) => Err(f.into_error()),
      None => Ok(()),
    }
  }
}

/// Build a backend-shaped record from submitted fields.
pub(crate) fn record_from(id: RecordId, fields: &RecordFields) -> ContactRecord {
  let opt = |s: &str| (!s.is_empty()).then(|| s.to_string());
  ContactRecord {
    qr_code: Some(ImageRef {
      url: format!("https://img.example/qr_{id}.png"),
    }),
    id,
    name: fields.name.clone(),
    designation: opt(&fields.designation),
    company: opt(&fields.company),
    tagline: opt(&fields.tagline),
    phone: fields.phone.clone(),
    email: fields.email.clone(),
    address: fields.address.clone(),
    linkedin: opt(&fields.linkedin),
    instagram: opt(&fields.instagram),
    youtube: opt(&fields.youtube),
    whatsapp: opt(&fields.whatsapp),
    directions: opt(&fields.directions),
    profile_image: None,
    company_logo: None,
    visit_count: 0,
    created_at: Utc::now(),
  }
}

/// `n` distinct records named `User 1` .. `User n`.
pub(crate) fn numbered(n: usize) -> Vec<ContactRecord> {
  (1..=n)
    .map(|i| {
      let mut fields = RecordFields::default();
      fields.name = format!("User {i}");
      fields.phone = format!("90000000{i:02}");
      fields.email = format!("user{i}@example.com");
      fields.address = "1 Test Lane".into();
      record_from(RecordId::new(format!("id-{i}")), &fields)
    })
    .collect()
}

impl CardBackend for MemoryBackend {
  async fn get_record(&self, id: &RecordId) -> Result<Option<ContactRecord>> {
    self.gets.fetch_add(1, Ordering::SeqCst);
    Self::check(&self.fail_get)?;
    Ok(self.records.lock().unwrap().iter().find(|r| &r.id == id).cloned())
  }

  async fn record_visit(&self, id: &RecordId) -> Result<()> {
    if let Some(gate) = &self.visit_gate {
      gate.acquire().await.map_err(|e| Error::Transport(Box::new(e)))?.forget();
    }
    self.visits.fetch_add(1, Ordering::SeqCst);
    Self::check(&self.fail_visit)?;
    if let Some(r) = self.records.lock().unwrap().iter_mut().find(|r| &r.id == id) {
      r.visit_count += 1;
    }
    Ok(())
  }

  async fn list_page(&self, request: PageRequest) -> Result<RecordPage> {
    self.pages_asked.lock().unwrap().push(request.page);
    Self::check(&self.fail_list)?;
    let records = self.records.lock().unwrap();
    let limit = request.limit as usize;
    let start = (request.page as usize - 1) * limit;
    Ok(RecordPage {
      data:        records.iter().skip(start).take(limit).cloned().collect(),
      total_users: records.len() as u64,
      total_pages: records.len().div_ceil(limit) as u32,
    })
  }

  async fn create(&self, submission: Submission) -> Result<MutationReply> {
    Self::check(&self.fail_mutate)?;
    let id = RecordId::new(Uuid::new_v4().simple().to_string());
    let record = record_from(id, &submission.fields);
    self.records.lock().unwrap().insert(0, record);
    self.submissions.lock().unwrap().push((None, submission));
    Ok(MutationReply {
      success: Some(true),
      message: Some("User created".into()),
    })
  }

  async fn update(
    &self,
    id: &RecordId,
    submission: Submission,
  ) -> Result<MutationReply> {
    Self::check(&self.fail_mutate)?;
    {
      let mut records = self.records.lock().unwrap();
      let Some(slot) = records.iter_mut().find(|r| &r.id == id) else {
        return Err(Error::NotFound(id.clone()));
      };
      let mut updated = record_from(id.clone(), &submission.fields);
      updated.created_at = slot.created_at;
      updated.visit_count = slot.visit_count;
      *slot = updated;
    }
    self.submissions.lock().unwrap().push((Some(id.clone()), submission));
    Ok(MutationReply {
      success: Some(true),
      message: None,
    })
  }

  async fn delete(&self, id: &RecordId) -> Result<()> {
    self.deletes.fetch_add(1, Ordering::SeqCst);
    Self::check(&self.fail_delete)?;
    self.records.lock().unwrap().retain(|r| &r.id != id);
    Ok(())
  }
}
