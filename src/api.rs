//! Stateless client for the remote InstallmentPlus API. Every call maps
//! transport, status, and decode failures onto `ApiError`; business meaning
//! (for example 404 on the list endpoint being an empty account) is left to
//! the caller.

use gloo_net::http::Request;
use serde_json::Value;
use thiserror::Error;
use web_sys::{File, FormData};

use crate::model::InstallmentRecord;

pub const API_BASE_URL: &str = "https://installmentplus.runasp.net";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("not found")]
    NotFound,
    #[error("server returned HTTP {0}")]
    Status(u16),
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("{0}")]
    Request(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound)
    }
}

/// New-installment form payload. Count and amount stay as the entered text;
/// the API receives them as form fields, not numbers.
pub struct NewInstallment {
    pub client_name: String,
    pub phone_number: String,
    pub address: String,
    pub advice_name: String,
    pub installment_count: String,
    pub total_amount: String,
    pub image: Option<File>,
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            base_url: API_BASE_URL.to_string(),
        }
    }

    /// Exchanges credentials for the operator's id. A well-formed response
    /// without a `personID` yields `Ok(None)`; the caller decides how loudly
    /// to surface that.
    pub async fn login(&self, username: &str, password: &str) -> Result<Option<i64>, ApiError> {
        let url = format!("{}/api/Evaluation App/Login", self.base_url);
        let response = Request::post(&url)
            .json(&serde_json::json!({
                "username": username,
                "password": password,
            }))
            .map_err(|e| ApiError::Request(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(ApiError::Status(response.status()));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(person_id_from(&body))
    }

    pub async fn installment_requests(
        &self,
        person_id: i64,
    ) -> Result<Vec<InstallmentRecord>, ApiError> {
        let url = format!(
            "{}/api/Evaluation App/GetInstallmentRequests?personID={}",
            self.base_url, person_id
        );
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if response.status() == 404 {
            return Err(ApiError::NotFound);
        }
        if !response.ok() {
            return Err(ApiError::Status(response.status()));
        }

        response
            .json::<Vec<InstallmentRecord>>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Records a payment against an installment. The amount travels as the
    /// entered text in the query string; the response body is unused.
    pub async fn add_payment(&self, installment_id: i64, amount: &str) -> Result<(), ApiError> {
        let url = format!(
            "{}/api/Evaluation App/AddInstallmentPayment?installmentID={}&PaidAmount={}",
            self.base_url, installment_id, amount
        );
        let response = Request::post(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(ApiError::Status(response.status()));
        }
        Ok(())
    }

    /// Submits a new installment request as multipart form data owned by the
    /// given person. The browser supplies the multipart boundary.
    pub async fn save_installment_request(
        &self,
        person_id: i64,
        form: &NewInstallment,
    ) -> Result<(), ApiError> {
        let js = |_| ApiError::Request("could not assemble the form payload".to_string());

        let data = FormData::new().map_err(js)?;
        data.append_with_str("PersonID", &person_id.to_string())
            .map_err(js)?;
        data.append_with_str("ClientName", &form.client_name).map_err(js)?;
        data.append_with_str("PhoneNumber", &form.phone_number).map_err(js)?;
        data.append_with_str("Address", &form.address).map_err(js)?;
        data.append_with_str("AdviceName", &form.advice_name).map_err(js)?;
        data.append_with_str("InstallmentCount", &form.installment_count)
            .map_err(js)?;
        data.append_with_str("TotalAmount", &form.total_amount).map_err(js)?;
        if let Some(file) = &form.image {
            data.append_with_blob("ImageUrl", file).map_err(js)?;
        }

        let url = format!("{}/api/Evaluation App/SaveInstallmentRequest", self.base_url);
        let response = Request::post(&url)
            .body(data)
            .map_err(|e| ApiError::Request(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(ApiError::Status(response.status()));
        }
        Ok(())
    }
}

/// The login endpoint has returned the id both as a number and as a numeric
/// string; accept either.
fn person_id_from(body: &Value) -> Option<i64> {
    let value = body.get("personID")?;
    value
        .as_i64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_distinguished_from_other_statuses() {
        assert!(ApiError::NotFound.is_not_found());
        assert!(!ApiError::Status(500).is_not_found());
        assert!(!ApiError::Network("offline".to_string()).is_not_found());
    }

    #[test]
    fn person_id_accepts_number_and_numeric_string() {
        assert_eq!(person_id_from(&serde_json::json!({"personID": 42})), Some(42));
        assert_eq!(person_id_from(&serde_json::json!({"personID": "42"})), Some(42));
        assert_eq!(person_id_from(&serde_json::json!({"personID": null})), None);
        assert_eq!(person_id_from(&serde_json::json!({"personID": "n/a"})), None);
        assert_eq!(person_id_from(&serde_json::json!({})), None);
    }
}
