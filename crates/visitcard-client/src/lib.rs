//! Async HTTP implementation of [`CardBackend`] over the visiting-card REST API.
//!
//! | Operation | Request |
//! |-----------|---------|
//! | get one   | `GET users/get/{id}` |
//! | visit     | `POST users/{id}/visit` |
//! | list      | `GET users/all?page={n}&limit={k}` |
//! | create    | `POST users/create` (multipart) |
//! | update    | `PUT users/update/{id}` (multipart) |
//! | delete    | `DELETE users/delete/{id}` |

use std::time::Duration;

use reqwest::{
  Client, Response,
  multipart::{Form, Part},
};
use serde::de::DeserializeOwned;
use visitcard_core::{
  Error, Result,
  backend::{
    CardBackend, MutationReply, PageRequest, RecordEnvelope, RecordPage,
    Submission,
  },
  fields::FileUpload,
  record::{ContactRecord, RecordId},
};

/// Environment variable holding the backend base URL.
pub const BASE_URL_ENV: &str = "VISITCARD_BACKEND_URL";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for the backend.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// HTTP client for the visiting-card backend.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct HttpBackend {
  client:   Client,
  base_url: String,
}

impl HttpBackend {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let base = config.base_url.trim();
    if !(base.starts_with("http://") || base.starts_with("https://")) {
      return Err(Error::InvalidBaseUrl(config.base_url));
    }
    let client = Client::builder()
      .timeout(REQUEST_TIMEOUT)
      .build()
      .map_err(transport)?;
    Ok(Self {
      client,
      base_url: format!("{}/", base.trim_end_matches('/')),
    })
  }

  pub fn base_url(&self) -> &str { &self.base_url }

  fn url(&self, path: &str) -> String { format!("{}{}", self.base_url, path) }

  async fn mutate(
    &self,
    request: reqwest::RequestBuilder,
    submission: Submission,
  ) -> Result<MutationReply> {
    let form = multipart_form(submission)?;
    let resp = request.multipart(form).send().await.map_err(transport)?;
    let status = resp.status();
    let body = resp.text().await.map_err(transport)?;
    let reply: MutationReply = if body.trim().is_empty() {
      MutationReply::default()
    } else {
      serde_json::from_str(&body).map_err(|e| Error::Decode(e.to_string()))?
    };

    if !status.is_success() || reply.success == Some(false) {
      return Err(Error::Rejected {
        status:  status.as_u16(),
        message: reply.message.unwrap_or_default(),
      });
    }
    Ok(reply)
  }
}

// ─── CardBackend ──────────────────────────────────────────────────────────────

impl CardBackend for HttpBackend {
  async fn get_record(&self, id: &RecordId) -> Result<Option<ContactRecord>> {
    let url = self.url(&format!("users/get/{id}"));
    tracing::debug!(%url, "fetching record");
    let resp = self.client.get(&url).send().await.map_err(transport)?;
    let status = resp.status().as_u16();
    let envelope: RecordEnvelope = decode(resp).await?;

    if !envelope.success {
      return Err(Error::Rejected {
        status,
        message: envelope.message.unwrap_or_default(),
      });
    }
    Ok(envelope.data)
  }

  async fn record_visit(&self, id: &RecordId) -> Result<()> {
    let url = self.url(&format!("users/{id}/visit"));
    tracing::debug!(%url, "recording visit");
    let resp = self.client.post(&url).send().await.map_err(transport)?;
    ensure_success(resp).await.map(|_| ())
  }

  async fn list_page(&self, request: PageRequest) -> Result<RecordPage> {
    let url = self.url("users/all");
    tracing::debug!(%url, page = request.page, limit = request.limit, "listing records");
    let resp = self
      .client
      .get(&url)
      .query(&[("page", request.page), ("limit", request.limit)])
      .send()
      .await
      .map_err(transport)?;
    let resp = ensure_success(resp).await?;
    decode(resp).await
  }

  async fn create(&self, submission: Submission) -> Result<MutationReply> {
    let url = self.url("users/create");
    tracing::debug!(%url, "creating record");
    self.mutate(self.client.post(&url), submission).await
  }

  async fn update(
    &self,
    id: &RecordId,
    submission: Submission,
  ) -> Result<MutationReply> {
    let url = self.url(&format!("users/update/{id}"));
    tracing::debug!(%url, "updating record");
    self.mutate(self.client.put(&url), submission).await
  }

  async fn delete(&self, id: &RecordId) -> Result<()> {
    let url = self.url(&format!("users/delete/{id}"));
    tracing::debug!(%url, "deleting record");
    let resp = self.client.delete(&url).send().await.map_err(transport)?;
    ensure_success(resp).await.map(|_| ())
  }
}

// ─── Helpers ──────────────────────────────────────────────────────────────────

fn transport(e: reqwest::Error) -> Error { Error::Transport(Box::new(e)) }

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T> {
  let body = resp.text().await.map_err(transport)?;
  serde_json::from_str(&body).map_err(|e| Error::Decode(e.to_string()))
}

/// Turn a non-2xx response into [`Error::Rejected`], keeping any `message`.
async fn ensure_success(resp: Response) -> Result<Response> {
  let status = resp.status();
  if status.is_success() {
    return Ok(resp);
  }
  let message = resp
    .text()
    .await
    .ok()
    .and_then(|body| serde_json::from_str::<MutationReply>(&body).ok())
    .and_then(|reply| reply.message)
    .unwrap_or_default();
  Err(Error::Rejected {
    status: status.as_u16(),
    message,
  })
}

/// `userData` as JSON, plus the image parts that were actually selected.
fn multipart_form(submission: Submission) -> Result<Form> {
  let Submission {
    fields,
    profile_image,
    company_logo,
  } = submission;

  let mut form = Form::new().text("userData", serde_json::to_string(&fields)?);
  if let Some(upload) = profile_image {
    form = form.part("profileImage", file_part(upload)?);
  }
  if let Some(upload) = company_logo {
    form = form.part("companyLogo", file_part(upload)?);
  }
  Ok(form)
}

fn file_part(upload: FileUpload) -> Result<Part> {
  Part::bytes(upload.bytes.to_vec())
    .file_name(upload.file_name)
    .mime_str(&upload.mime)
    .map_err(transport)
}
