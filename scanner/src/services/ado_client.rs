//! Directory REST client
//!
//! Entitlements live on the licensing host; fields and projects on the core
//! host. All requests use basic auth with an empty user name and the PAT.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use shared::config::AdoConnection;
use shared::{process_debug, process_warn, ApiFailure, ProcessId};

use crate::error::{ScannerError, ScannerResult};
use crate::traits::OrgDirectory;
use crate::types::{EntitlementListing, EntitlementPage, Project, ValueList, WorkItemField};

pub const ENTITLEMENTS_API_VERSION: &str = "7.1-preview.2";
pub const CORE_API_VERSION: &str = "7.0";

/// Page size requested from the entitlements listing
pub const ENTITLEMENTS_PAGE_SIZE: u32 = 30000;

pub struct RealAdoClient {
    client: Client,
    licensing_org_url: String,
    core_org_url: String,
    pat: String,
}

impl RealAdoClient {
    pub fn new(connection: &AdoConnection) -> ScannerResult<Self> {
        let client = Client::builder()
            .timeout(connection.timeout)
            .build()
            .map_err(|e| ScannerError::HttpClientError { message: e.to_string() })?;

        Ok(Self {
            client,
            licensing_org_url: connection.licensing_org_url(),
            core_org_url: connection.core_org_url(),
            pat: connection.pat.clone(),
        })
    }

    fn get(&self, url: &str) -> RequestBuilder {
        self.client.get(url).basic_auth("", Some(&self.pat))
    }

    /// Send a GET and decode a 200 response; anything else is a failure
    async fn fetch<T: DeserializeOwned + Send>(&self, request: RequestBuilder) -> Result<T, ApiFailure> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiFailure::NetworkError(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ApiFailure::from_status(status.as_u16(), response.url().path()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiFailure::InvalidResponse(format!("Failed to parse response: {}", e)))
    }

    async fn list_core<T: DeserializeOwned + Default + Send>(&self, resource: &str) -> ScannerResult<Vec<T>> {
        let url = format!("{}/_apis/{}", self.core_org_url, resource);
        process_debug!(ProcessId::current(), "📡 GET {}", url);

        let request = self.get(&url).query(&[("api-version", CORE_API_VERSION)]);
        let list: ValueList<T> = self
            .fetch(request)
            .await
            .map_err(|reason| ScannerError::remote(resource, reason))?;
        Ok(list.value)
    }
}

#[async_trait]
impl OrgDirectory for RealAdoClient {
    async fn list_entitlements(&self) -> ScannerResult<EntitlementListing> {
        let url = format!("{}/_apis/userentitlements", self.licensing_org_url);
        let top = ENTITLEMENTS_PAGE_SIZE.to_string();
        let mut listing = EntitlementListing::default();
        let mut continuation: Option<String> = None;

        loop {
            let mut request = self
                .get(&url)
                .query(&[("top", top.as_str()), ("api-version", ENTITLEMENTS_API_VERSION)]);
            if let Some(token) = &continuation {
                request = request.query(&[("continuationToken", token.as_str())]);
            }

            let page: EntitlementPage = self
                .fetch(request)
                .await
                .map_err(|reason| ScannerError::remote("userentitlements", reason))?;
            process_debug!(
                ProcessId::current(),
                "📄 Entitlement page: {} items, totalCount {:?}",
                page.items.len(),
                page.total_count
            );

            if listing.total_count.is_none() {
                listing.total_count = page.total_count;
            }
            let received = page.items.len();
            listing.items.extend(page.items);

            match page.continuation_token.filter(|token| !token.is_empty()) {
                Some(token) if received > 0 && continuation.as_deref() != Some(token.as_str()) => {
                    continuation = Some(token);
                }
                Some(_) => {
                    process_warn!(
                        ProcessId::current(),
                        "⚠️ Continuation token did not advance, stopping after {} entitlements",
                        listing.items.len()
                    );
                    break;
                }
                None => break,
            }
        }

        Ok(listing)
    }

    async fn list_fields(&self) -> ScannerResult<Vec<WorkItemField>> {
        self.list_core("wit/fields").await
    }

    async fn list_projects(&self) -> ScannerResult<Vec<Project>> {
        self.list_core("projects").await
    }
}
