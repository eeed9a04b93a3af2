//! Validate Upload Use Case
//!
//! Structural check of an uploaded client document.

use serde_json::Value;
use thiserror::Error;

use crate::application::dto::UploadSummaryDto;

/// Fields an uploaded client document must contain.
pub const REQUIRED_UPLOAD_FIELDS: [&str; 4] = ["client_name", "industry", "processes", "assessments"];

/// Upload validation error. Always a client-input problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    /// Body is not JSON.
    #[error("Invalid JSON format")]
    InvalidJson,

    /// Body is JSON but not an object.
    #[error("Client data must be a JSON object")]
    NotAnObject,

    /// A required field is absent.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

/// Validate an uploaded client document and summarize it.
pub fn validate_client_upload(body: &[u8]) -> Result<UploadSummaryDto, UploadError> {
    let value: Value = serde_json::from_slice(body).map_err(|_| UploadError::InvalidJson)?;
    let document = value.as_object().ok_or(UploadError::NotAnObject)?;

    if let Some(missing) = REQUIRED_UPLOAD_FIELDS
        .iter()
        .find(|field| !document.contains_key(**field))
    {
        return Err(UploadError::MissingField(*missing));
    }

    let count = |field: &str| document.get(field).and_then(Value::as_array).map_or(0, Vec::len);
    let client_name = match document.get("client_name") {
        Some(Value::String(name)) => name.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    };

    Ok(UploadSummaryDto {
        status: "success".to_string(),
        message: "Client data uploaded successfully".to_string(),
        client_name,
        processes_count: count("processes"),
        assessments_count: count("assessments"),
    })
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test]
    fn summarizes_valid_document() {
        let body = br#"{
            "client_name": "Acme",
            "industry": "Manufacturing",
            "processes": [{"id": "P1"}, {"id": "P2"}],
            "assessments": [{"process_id": "P1", "risk_id": "D1.1"}]
        }"#;

        let summary = validate_client_upload(body).unwrap();

        assert_eq!(summary.client_name, "Acme");
        assert_eq!(summary.processes_count, 2);
        assert_eq!(summary.assessments_count, 1);
    }

    #[test_case(b"not json", UploadError::InvalidJson ; "garbage")]
    #[test_case(b"[1, 2]", UploadError::NotAnObject ; "array")]
    #[test_case(br#"{"client_name": "A", "processes": [], "assessments": []}"#, UploadError::MissingField("industry") ; "missing industry")]
    #[test_case(br#"{"client_name": "A", "industry": "B", "processes": []}"#, UploadError::MissingField("assessments") ; "missing assessments")]
    fn rejects_invalid_document(body: &[u8], expected: UploadError) {
        assert_eq!(validate_client_upload(body).unwrap_err(), expected);
    }
}
