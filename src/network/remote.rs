use std::future::Future;

use crate::common::{NewEntry, SubmitReceipt};
use crate::error::GuestbookError;

use super::envelope::{ListOutcome, decode_list, decode_submit};

/// The remote endpoint that stores and serves guestbook messages.
pub trait Remote: Send + Sync + 'static {
    /// POST the entry as JSON and wait for the endpoint's verdict.
    fn post_message(
        &self,
        entry: &NewEntry,
    ) -> impl Future<Output = Result<SubmitReceipt, GuestbookError>> + Send;

    /// GET with the entry in the query string; the response body is ignored.
    fn send_beacon(&self, entry: &NewEntry) -> impl Future<Output = Result<(), GuestbookError>> + Send;

    fn fetch_messages(
        &self,
        password: Option<&str>,
    ) -> impl Future<Output = Result<ListOutcome, GuestbookError>> + Send;
}

/// [`Remote`] over HTTP.
pub struct HttpRemote {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpRemote {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, GuestbookError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("guestbook/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn read_body(response: reqwest::Response) -> Result<String, GuestbookError> {
        let status = response.status();
        if !status.is_success() {
            return Err(GuestbookError::HttpStatus(status.as_u16()));
        }
        Ok(response.text().await?)
    }
}

impl Remote for HttpRemote {
    async fn post_message(&self, entry: &NewEntry) -> Result<SubmitReceipt, GuestbookError> {
        log::debug!("POST {} as {}", self.endpoint, entry.name);
        let response = self.http.post(&self.endpoint).json(entry).send().await?;
        let body = Self::read_body(response).await?;
        decode_submit(&body)
    }

    async fn send_beacon(&self, entry: &NewEntry) -> Result<(), GuestbookError> {
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("name", entry.name.as_str()), ("message", entry.message.as_str())])
            .send()
            .await?;
        log::debug!("Beacon answered with {}", response.status());
        Ok(())
    }

    async fn fetch_messages(&self, password: Option<&str>) -> Result<ListOutcome, GuestbookError> {
        let mut request = self.http.get(&self.endpoint);
        if let Some(password) = password {
            request = request.query(&[("password", password)]);
        }
        let response = request.send().await?;
        let body = Self::read_body(response).await?;
        decode_list(&body)
    }
}
