use crate::error::{Error, Result};
use crate::normalize::normalize_action;
use crate::schema::{LaunchResponseSchema, PollResponseSchema, ReportResponseSchema};
use crate::transport::{LaunchRequest, LaunchResponse, PollResponse, ScanTransport};
use async_trait::async_trait;
use scantrace_types::{Report, ScanId, ScanStatus};
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP implementation of [`ScanTransport`] against the job service.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(Error::Api {
            status: status.as_u16(),
            message: scantrace_types::truncate(&message, 200),
        })
    }
}

#[async_trait]
impl ScanTransport for HttpTransport {
    async fn launch(&self, request: &LaunchRequest) -> Result<LaunchResponse> {
        let url = format!("{}/scans/launch", self.base_url);
        let response = self
            .request(self.client.post(&url).json(request))
            .send()
            .await?;
        let body: LaunchResponseSchema = Self::check(response).await?.json().await?;

        Ok(LaunchResponse {
            scan_id: ScanId::new(body.scan_id),
            project_id: body.project_id,
        })
    }

    async fn poll(&self, scan_id: &ScanId, after: i64) -> Result<PollResponse> {
        let url = format!("{}/scans/{}/poll", self.base_url, scan_id);
        let response = self
            .request(self.client.get(&url).query(&[("after", after)]))
            .send()
            .await?;
        let body: PollResponseSchema = Self::check(response).await?.json().await?;

        Ok(PollResponse {
            status: ScanStatus::parse(&body.status),
            error: body.error,
            actions: body.actions.into_iter().map(normalize_action).collect(),
            report: body.report,
        })
    }

    async fn fetch_report(&self, scan_id: &ScanId) -> Result<Option<Report>> {
        let url = format!("{}/scans/{}/report", self.base_url, scan_id);
        let response = self.request(self.client.get(&url)).send().await?;
        let body: ReportResponseSchema = Self::check(response).await?.json().await?;
        Ok(body.report)
    }
}
