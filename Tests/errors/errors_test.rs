#[cfg(test)]
mod error_tests {
    use api_shell::errors::{
        CallbackError, ErrorDetail, ErrorResponse, ServiceError, ServiceResult,
    };
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use serde_json;

    fn not_found() -> ServiceError {
        ServiceError::NotFound {
            resource: "DummySchema",
            id: Some("abc".to_string()),
            reason: "no record with that id".to_string(),
        }
    }

    fn already_exists() -> ServiceError {
        ServiceError::AlreadyExists {
            resource: "DummySchema",
            id: "abc".to_string(),
            reason: "id 'abc' is already taken".to_string(),
        }
    }

    // Test error display messages
    #[test]
    fn test_error_display_messages() {
        assert_eq!(
            not_found().to_string(),
            "DummySchema with ID abc not found. no record with that id"
        );
        assert_eq!(
            already_exists().to_string(),
            "Record [DummySchema] already exists with id 'abc'. id 'abc' is already taken"
        );

        let error = ServiceError::MalformedInput {
            resource: "DummySchema",
            reason: "missing field `desc`".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Malformed json could not be interpreted as [DummySchema]: missing field `desc`"
        );

        let error = ServiceError::PayloadTooLarge {
            resource: "DummySchema",
            reason: "length limit exceeded".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Payload for [DummySchema] is too large: length limit exceeded"
        );

        let error = ServiceError::Unhandled("connection reset".to_string());
        assert_eq!(error.to_string(), "Unhandled error: connection reset");
    }

    #[test]
    fn test_not_found_without_id() {
        let error = ServiceError::NotFound {
            resource: "DummySchema",
            id: None,
            reason: String::new(),
        };
        assert_eq!(error.to_string(), "DummySchema not found.");
    }

    // Test HTTP status codes
    #[test]
    fn test_status_codes() {
        assert_eq!(
            ServiceError::MalformedInput {
                resource: "DummySchema",
                reason: "bad".to_string()
            }
            .status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::InvalidQuery("not json".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::PayloadTooLarge {
                resource: "DummySchema",
                reason: "length limit exceeded".to_string()
            }
            .status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(not_found().status_code(), StatusCode::NOT_FOUND);
        assert_eq!(already_exists().status_code(), StatusCode::CONFLICT);
        assert_eq!(
            ServiceError::Unhandled("boom".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ServiceError::ConfigurationError("dirty without create".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ServiceError::ExternalServiceError {
                service: "example.com".to_string(),
                reason: "timeout".to_string(),
            }
            .status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    // Test error details
    #[test]
    fn test_domain_error_details() {
        let details = not_found().to_details().unwrap();
        assert_eq!(details["resource"], "DummySchema");
        assert_eq!(details["id"], "abc");

        let details = already_exists().to_details().unwrap();
        assert_eq!(details["id"], "abc");
    }

    #[test]
    fn test_errors_without_details() {
        assert!(ServiceError::Unhandled("boom".to_string()).to_details().is_none());
        assert!(ServiceError::InvalidQuery("x".to_string()).to_details().is_none());
    }

    // Test Axum response integration
    #[tokio::test]
    async fn test_into_response_body() {
        let response = not_found().into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error_response: ErrorResponse = serde_json::from_slice(&body).unwrap();

        assert_eq!(error_response.error.code, "NOT_FOUND");
        assert_eq!(
            error_response.error.message,
            "DummySchema with ID abc not found. no record with that id"
        );
    }

    #[test]
    fn test_error_response_serialization_skips_empty_details() {
        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: "INTERNAL_SERVER_ERROR".to_string(),
                message: "Unhandled error: boom".to_string(),
                details: None,
            },
        };

        let json = serde_json::to_string(&error_response).unwrap();
        assert!(json.contains("INTERNAL_SERVER_ERROR"));
        assert!(!json.contains("details"));
    }

    // Test error code uniqueness
    #[test]
    fn test_error_code_uniqueness() {
        use std::collections::HashSet;

        let error_codes: Vec<&str> = vec![
            ServiceError::MalformedInput {
                resource: "x",
                reason: String::new(),
            }
            .error_code(),
            ServiceError::InvalidQuery(String::new()).error_code(),
            ServiceError::PayloadTooLarge {
                resource: "x",
                reason: String::new(),
            }
            .error_code(),
            not_found().error_code(),
            already_exists().error_code(),
            ServiceError::Unhandled(String::new()).error_code(),
            ServiceError::ConfigurationError(String::new()).error_code(),
            ServiceError::ExternalServiceError {
                service: String::new(),
                reason: String::new(),
            }
            .error_code(),
        ];

        let unique_codes: HashSet<&str> = error_codes.iter().copied().collect();
        assert_eq!(
            error_codes.len(),
            unique_codes.len(),
            "Error codes must be unique"
        );
    }

    #[test]
    fn test_service_result_err() {
        let result: ServiceResult<i32> = Err(ServiceError::Unhandled("boom".to_string()));
        assert_eq!(result.unwrap_err().to_string(), "Unhandled error: boom");
    }

    #[test]
    fn test_callback_error_conversions() {
        let err = serde_json::from_str::<bool>("\"yes\"").unwrap_err();
        let callback_error: CallbackError = err.into();
        assert!(matches!(callback_error, CallbackError::Validation(_)));
    }

    // Test that all errors implement Error trait
    #[test]
    fn test_error_trait_implementation() {
        let error: Box<dyn std::error::Error> = Box::new(not_found());
        assert!(!error.to_string().is_empty());
    }
}
