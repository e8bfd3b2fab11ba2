//! Licensing REST API client
//!
//! Moves a user entitlement to the free tier with a JSON-patch request and
//! reads back the license the service now reports.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use shared::config::AdoConnection;
use shared::{process_debug, ApiFailure, ProcessId, DOWNGRADE_LICENSE_DISPLAY, DOWNGRADE_LICENSE_TYPE};

use crate::error::{DemoterError, DemoterResult};
use crate::traits::{DemotionConfirmation, LicensingApi};

pub const ENTITLEMENTS_API_VERSION: &str = "7.1-preview.3";
const JSON_PATCH: &str = "application/json-patch+json";

pub struct RealLicensingApi {
    client: Client,
    org_url: String,
    pat: String,
}

impl RealLicensingApi {
    pub fn new(connection: &AdoConnection) -> DemoterResult<Self> {
        let client = Client::builder()
            .timeout(connection.timeout)
            .build()
            .map_err(|e| DemoterError::HttpClientError { message: e.to_string() })?;

        Ok(Self {
            client,
            org_url: connection.licensing_org_url(),
            pat: connection.pat.clone(),
        })
    }

    fn entitlement_url(&self, entitlement_id: &str) -> String {
        format!(
            "{}/_apis/userentitlements/{}?api-version={}",
            self.org_url, entitlement_id, ENTITLEMENTS_API_VERSION
        )
    }
}

fn downgrade_patch() -> serde_json::Value {
    serde_json::json!([
        {
            "from": "",
            "op": "replace",
            "path": "/accessLevel",
            "value": {
                "accountLicenseType": DOWNGRADE_LICENSE_TYPE,
                "licensingSource": "account"
            }
        }
    ])
}

/// Pull the confirmed license out of an update response body
///
/// A PATCH answers with an `operationResults` array, while the older shape
/// carries a single `operationResult` or the entitlement itself. Each result
/// has its own success flag.
fn confirmed_license(body: &serde_json::Value) -> Result<String, ApiFailure> {
    let operations: Vec<&serde_json::Value> = match body.get("operationResults").and_then(|v| v.as_array()) {
        Some(results) => results.iter().collect(),
        None => body.get("operationResult").into_iter().collect(),
    };

    let top_level_failed = body.get("isSuccess").and_then(|flag| flag.as_bool()) == Some(false);
    let failed: Vec<&serde_json::Value> = operations
        .iter()
        .copied()
        .filter(|op| op.get("isSuccess").and_then(|flag| flag.as_bool()) == Some(false))
        .collect();

    if top_level_failed || !failed.is_empty() {
        let message = failed
            .iter()
            .chain(operations.iter())
            .filter_map(|op| op.get("errors"))
            .find(|errors| errors.as_array().map_or(!errors.is_null(), |list| !list.is_empty()))
            .map(|errors| errors.to_string())
            .unwrap_or_else(|| "update reported failure".to_string());
        return Err(ApiFailure::Rejected(message));
    }

    body.get("userEntitlement")
        .or_else(|| operations.first().and_then(|op| op.get("result")))
        .and_then(|entitlement| entitlement.get("accessLevel"))
        .and_then(|level| level.get("licenseDisplayName"))
        .and_then(|name| name.as_str())
        .map(str::to_string)
        .ok_or_else(|| ApiFailure::InvalidResponse("no license in update response".to_string()))
}

#[async_trait]
impl LicensingApi for RealLicensingApi {
    async fn demote(&self, entitlement_id: &str) -> Result<DemotionConfirmation, ApiFailure> {
        let url = self.entitlement_url(entitlement_id);
        process_debug!(ProcessId::current(), "📡 PATCH {}", url);

        let body = serde_json::to_vec(&downgrade_patch()).map_err(|e| ApiFailure::InvalidResponse(e.to_string()))?;
        let response = self
            .client
            .patch(&url)
            .basic_auth("", Some(&self.pat))
            .header(reqwest::header::CONTENT_TYPE, JSON_PATCH)
            .body(body)
            .send()
            .await
            .map_err(|e| ApiFailure::NetworkError(e.to_string()))?;

        let status = response.status();
        match status {
            // No body to read; the downgrade tier is assumed
            StatusCode::NO_CONTENT => Ok(DemotionConfirmation {
                new_license: DOWNGRADE_LICENSE_DISPLAY.to_string(),
            }),
            StatusCode::OK => {
                let body: serde_json::Value = response
                    .json()
                    .await
                    .map_err(|e| ApiFailure::InvalidResponse(format!("Failed to parse response: {}", e)))?;
                let new_license = confirmed_license(&body)?;
                Ok(DemotionConfirmation { new_license })
            }
            _ => Err(ApiFailure::from_status(status.as_u16(), entitlement_id)),
        }
    }
}
