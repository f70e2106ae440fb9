use std::fmt;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use flood_admin_types::api::{BannerList, DataEnvelope, NewEventBanner, ReviewRequest, UsersEnvelope};
use flood_admin_types::{EventBanner, Feedback, FloodReport, RecordId, ReviewStatus, User};

use crate::config::ApiConfig;
use crate::error::ApiError;

/// Result of probing the API root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiHealth {
    Online(u16),
    Offline,
}

impl fmt::Display for ApiHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Online(code) => write!(f, "OK ({})", code),
            Self::Offline => f.write_str("Offline"),
        }
    }
}

/// Typed access to the admin REST API.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let http = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::InvalidConfig(format!("HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    // -- Users --

    /// GET /auth/users
    pub async fn users(&self) -> Result<Vec<User>, ApiError> {
        let envelope: UsersEnvelope = self.get_json("/auth/users", &[]).await?;
        Ok(envelope.into_items())
    }

    /// GET /auth/users/:id
    pub async fn user(&self, id: &RecordId) -> Result<User, ApiError> {
        self.get_json(&format!("/auth/users/{}", id), &[]).await
    }

    // -- Event banners --

    /// GET /EventBanners
    pub async fn event_banners(&self) -> Result<Vec<EventBanner>, ApiError> {
        let list: BannerList = self.get_json("/EventBanners", &[]).await?;
        Ok(list.unwrap_or_default())
    }

    /// GET /EventBanners/:id
    pub async fn event_banner(&self, id: &RecordId) -> Result<EventBanner, ApiError> {
        self.get_json(&format!("/EventBanners/{}", id), &[]).await
    }

    /// POST /EventBanners, returning the stored banner.
    pub async fn create_event_banner(&self, banner: &NewEventBanner) -> Result<EventBanner, ApiError> {
        let url = self.config.endpoint("/EventBanners");
        let body = self.send(self.http.post(&url).json(banner), &url).await?;
        decode(&url, &body)
    }

    /// PUT /EventBanners/:id
    pub async fn update_event_banner(
        &self,
        id: &RecordId,
        banner: &NewEventBanner,
    ) -> Result<(), ApiError> {
        self.write(Method::PUT, &format!("/EventBanners/{}", id), Some(banner))
            .await
    }

    /// DELETE /EventBanners/:id
    pub async fn delete_event_banner(&self, id: &RecordId) -> Result<(), ApiError> {
        self.write::<()>(Method::DELETE, &format!("/EventBanners/{}", id), None)
            .await
    }

    // -- Feedback --

    /// GET /feedback/admin/all?status=
    ///
    /// `None` lists every status.
    pub async fn feedbacks(&self, status: Option<ReviewStatus>) -> Result<Vec<Feedback>, ApiError> {
        let query = [("status", status_param(status))];
        let envelope: DataEnvelope<Feedback> =
            self.get_json("/feedback/admin/all", &query).await?;
        Ok(envelope.into_items())
    }

    /// PUT /feedback/admin/all/:id
    pub async fn review_feedback(
        &self,
        id: &RecordId,
        status: ReviewStatus,
        note: Option<&str>,
    ) -> Result<(), ApiError> {
        let body = ReviewRequest::new(status, note);
        self.write(Method::PUT, &format!("/feedback/admin/all/{}", id), Some(&body))
            .await
    }

    // -- Flood reports --

    /// GET /floodReports/admin/all?status=&page=&pageSize=
    ///
    /// Pages are 1-based; `None` asks for the first page.
    pub async fn flood_reports(
        &self,
        status: Option<ReviewStatus>,
        page: Option<u32>,
    ) -> Result<Vec<FloodReport>, ApiError> {
        let query = [
            ("status", status_param(status)),
            ("page", page.unwrap_or(1).max(1).to_string()),
            ("pageSize", self.config.page_size.to_string()),
        ];
        let envelope: DataEnvelope<FloodReport> =
            self.get_json("/floodReports/admin/all", &query).await?;
        Ok(envelope.into_items())
    }

    /// PUT /floodReports/admin/:id/review
    pub async fn review_flood_report(
        &self,
        id: &RecordId,
        status: ReviewStatus,
        note: Option<&str>,
    ) -> Result<(), ApiError> {
        let body = ReviewRequest::new(status, note);
        self.write(Method::PUT, &format!("/floodReports/admin/{}/review", id), Some(&body))
            .await
    }

    // -- Health --

    /// GET on the API root. Any transport error or non-2xx answer is
    /// reported as offline.
    pub async fn health(&self) -> ApiHealth {
        match self.http.get(&self.config.base_url).send().await {
            Ok(resp) if resp.status().is_success() => ApiHealth::Online(resp.status().as_u16()),
            Ok(resp) => {
                debug!("Health probe answered {}", resp.status());
                ApiHealth::Offline
            }
            Err(e) => {
                debug!("Health probe failed: {}", e);
                ApiHealth::Offline
            }
        }
    }

    // -- Plumbing --

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.config.endpoint(path);
        let body = self.send(self.http.get(&url).query(query), &url).await?;
        decode(&url, &body)
    }

    /// Body-less outcome: only the status matters.
    async fn write<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<(), ApiError> {
        let url = self.config.endpoint(path);
        let mut req = self.http.request(method.clone(), &url);
        if let Some(body) = body {
            req = req.json(body);
        }
        self.send(req, &url).await.inspect_err(|e| {
            warn!("{} {} failed: {}", method, url, e);
        })?;
        Ok(())
    }

    /// Send a request and return the body of a 2xx response.
    async fn send(&self, req: RequestBuilder, url: &str) -> Result<String, ApiError> {
        debug!(url, "Sending request");
        let resp = req.send().await.map_err(|source| ApiError::Network {
            url: url.to_string(),
            source,
        })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                url: url.to_string(),
                status,
                body,
            });
        }

        resp.text().await.map_err(|source| ApiError::Network {
            url: url.to_string(),
            source,
        })
    }
}

fn decode<T: DeserializeOwned>(url: &str, body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|source| ApiError::Parse {
        url: url.to_string(),
        source,
    })
}

/// The API expects `status=` (empty) for "all statuses".
fn status_param(status: Option<ReviewStatus>) -> String {
    status.map(|s| s.as_str().to_string()).unwrap_or_default()
}
