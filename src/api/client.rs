use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use ureq::Agent;

use crate::api::types::{
    AdmittedPatient, ChargeRequest, FinalizedBill, PaymentOutcome, PaymentRequest, Service,
    SoaResponse,
};
use crate::config::ServerSettings;
use crate::error::{BillingError, Result};

/// One normalized server validation error. The billing server reports
/// failures as bare strings, `{message}`, `{error}`, arrays, or Laravel-style
/// `{errors: {field: [msgs]}}` maps; everything collapses to this shape at
/// the client boundary so core logic only ever sees flat messages.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: Option<String>,
    pub message: String,
}

pub struct BillingClient {
    agent: Agent,
    base_url: String,
}

impl BillingClient {
    pub fn new(settings: &ServerSettings) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(settings.timeout_secs)))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn admitted_patients(&self) -> Result<Vec<AdmittedPatient>> {
        self.get_json("admitted-patients")
    }

    pub fn services(&self) -> Result<Vec<Service>> {
        self.get_json("services")
    }

    pub fn bill_summary(&self, patient_id: u64) -> Result<FinalizedBill> {
        self.get_json(&format!("bill-summary/{patient_id}"))
    }

    pub fn soa(&self, patient_id: u64) -> Result<SoaResponse> {
        self.get_json(&format!("soa?patient_id={patient_id}"))
    }

    /// Submit staged charges; the server creates/updates the bill. The
    /// response body is not relied upon — callers re-fetch the bill summary.
    pub fn post_charge(&self, request: &ChargeRequest) -> Result<()> {
        let url = format!("{}/charge", self.base_url);
        debug!(%url, "POST");
        let mut response = self
            .agent
            .post(&url)
            .send_json(request)
            .map_err(|e| BillingError::Http(e.to_string()))?;
        Self::check_status(response.status(), response.body_mut())?;
        Ok(())
    }

    pub fn process_payment(&self, request: &PaymentRequest) -> Result<PaymentOutcome> {
        self.post_json("payments/process", request)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path);
        debug!(%url, "GET");
        let mut response = self
            .agent
            .get(&url)
            .call()
            .map_err(|e| BillingError::Http(e.to_string()))?;
        Self::read_response(&url, response.status(), response.body_mut())
    }

    fn post_json<T: DeserializeOwned>(&self, path: &str, body: &impl Serialize) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path);
        debug!(%url, "POST");
        let mut response = self
            .agent
            .post(&url)
            .send_json(body)
            .map_err(|e| BillingError::Http(e.to_string()))?;
        Self::read_response(&url, response.status(), response.body_mut())
    }

    /// Read the body, turning any non-2xx status into a normalized
    /// `Server` error.
    fn check_status(status: ureq::http::StatusCode, body: &mut ureq::Body) -> Result<String> {
        let text = body
            .read_to_string()
            .map_err(|e| BillingError::Http(e.to_string()))?;

        if !status.is_success() {
            let errors = normalize_server_error(&text, status.as_u16());
            return Err(BillingError::Server(flatten_errors(&errors)));
        }

        Ok(text)
    }

    fn read_response<T: DeserializeOwned>(
        url: &str,
        status: ureq::http::StatusCode,
        body: &mut ureq::Body,
    ) -> Result<T> {
        let text = Self::check_status(status, body)?;
        serde_json::from_str(&text)
            .map_err(|e| BillingError::BadResponse(format!("{url}: {e}")))
    }
}

/// Normalize a non-2xx response body into `FieldError`s.
pub fn normalize_server_error(body: &str, status: u16) -> Vec<FieldError> {
    let fallback = || {
        let trimmed = body.trim();
        let message = if trimmed.is_empty() {
            format!("HTTP {status}")
        } else {
            trimmed.to_string()
        };
        vec![FieldError {
            field: None,
            message,
        }]
    };

    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return fallback();
    };

    match value {
        Value::String(s) => vec![FieldError {
            field: None,
            message: s,
        }],
        Value::Array(items) => items
            .iter()
            .map(|v| FieldError {
                field: None,
                message: value_message(v),
            })
            .collect(),
        Value::Object(map) => {
            if let Some(Value::Object(errors)) = map.get("errors") {
                let mut out = Vec::new();
                for (field, messages) in errors {
                    out.push(FieldError {
                        field: Some(field.clone()),
                        message: value_message(messages),
                    });
                }
                if !out.is_empty() {
                    return out;
                }
            }
            for key in ["message", "error"] {
                if let Some(Value::String(s)) = map.get(key) {
                    return vec![FieldError {
                        field: None,
                        message: s.clone(),
                    }];
                }
            }
            fallback()
        }
        _ => fallback(),
    }
}

/// Render a JSON error value as display text; arrays join with ", ".
fn value_message(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(value_message)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

pub fn flatten_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
