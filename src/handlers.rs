use axum::{
    Extension,
    extract::Json,
    response::{Html, Json as ResponseJson},
};
use tracing::{debug, error, info};

use crate::diagnosis::{GatewayClient, GatewayError, parse_diagnosis, prompt};
use crate::error::{AppError, AppResult};
use crate::i18n;
use crate::models::{DiagnosisRequest, DiagnosisResponse, HealthResponse, UiConfigResponse};

/// Health check handler
/// Returns the service status and health information
pub async fn health_check() -> AppResult<ResponseJson<HealthResponse>> {
    debug!("Health check endpoint called");

    let response = HealthResponse::ok();

    info!("Health check successful");
    Ok(ResponseJson(response))
}

/// Serves the embedded bilingual form page
pub async fn index_page() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

/// Districts, crop categories, and the translation table for the form page
pub async fn ui_config() -> ResponseJson<UiConfigResponse> {
    debug!("UI config endpoint called");
    ResponseJson(UiConfigResponse::current())
}

/// Diagnose handler: validates the submission, builds the expert prompt,
/// forwards it to the AI gateway with the server-held credential, and relays
/// the parsed diagnosis. Error text is localized to the request language.
pub async fn diagnose_handler(
    Extension(gateway): Extension<GatewayClient>,
    Json(payload): Json<DiagnosisRequest>,
) -> AppResult<ResponseJson<DiagnosisResponse>> {
    let lang = payload.language;
    info!(
        "Diagnose endpoint called (language: {}, district: {:?}, image: {})",
        lang.as_str(),
        payload.district,
        payload.has_image()
    );

    // Validate the request before any network call
    if !payload.has_input() {
        return Err(AppError::ValidationError(
            i18n::translate("missingInput", lang).to_string(),
        ));
    }
    let image = payload.image().map_err(AppError::ValidationError)?;

    let system = prompt::system_prompt(lang);
    let user = prompt::user_prompt(&payload);

    let reply = gateway
        .complete(&system, &user, image)
        .await
        .map_err(|e| match e {
            GatewayError::MissingCredential => AppError::InternalServerError(e.to_string()),
            GatewayError::RateLimited => {
                AppError::RateLimited(i18n::translate("rateLimited", lang).to_string())
            }
            GatewayError::QuotaExceeded => {
                AppError::QuotaExceeded(i18n::translate("quotaExceeded", lang).to_string())
            }
            GatewayError::Upstream(_) | GatewayError::EmptyResponse => {
                error!("AI gateway call failed: {}", e);
                AppError::UpstreamError(i18n::translate("errorOccurred", lang).to_string())
            }
        })?;

    let diagnosis = parse_diagnosis(&reply).map_err(|e| {
        error!("Failed to parse diagnosis JSON: {}", e);
        AppError::InternalServerError(i18n::translate("errorOccurred", lang).to_string())
    })?;

    info!(
        "Successfully produced diagnosis (problem type: {})",
        diagnosis.problem_type
    );
    Ok(ResponseJson(DiagnosisResponse { diagnosis }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::Language;
    use axum::{Router, http::StatusCode, routing::post};

    fn gateway_for(url: &str, api_key: Option<&str>) -> GatewayClient {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            log_level: "info".to_string(),
            gateway_url: url.to_string(),
            model: "google/gemini-2.5-flash".to_string(),
            api_key: api_key.map(|k| k.to_string()),
        };
        GatewayClient::new(&config).unwrap()
    }

    fn keyless_gateway() -> GatewayClient {
        gateway_for("http://127.0.0.1:1/never-called", None)
    }

    /// Binds a one-route loopback server standing in for the AI gateway and
    /// returns its URL.
    async fn spawn_stub_gateway(status: StatusCode, body: &'static str) -> String {
        let app = Router::new().route("/", post(move || async move { (status, body) }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/", addr)
    }

    const STUB_FENCED_REPLY: &str = r#"{"choices":[{"message":{"content":"```json\n{\"problemType\": \"Pest Attack\", \"riskLevel\": \"Medium\", \"possibleCause\": \"Mealybug infestation.\", \"recommendedAction\": \"Spray neem oil weekly.\", \"preventiveMeasures\": \"Keep the field weed-free.\"}\n```"}}]}"#;

    const STUB_PROSE_REPLY: &str =
        r#"{"choices":[{"message":{"content":"The crop looks sick to me."}}]}"#;

    #[tokio::test]
    async fn test_health_check() {
        let result = health_check().await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_ui_config_lists_all_districts() {
        let ResponseJson(config) = ui_config().await;
        assert_eq!(config.districts.len(), 14);
        assert!(config.districts.contains(&"Wayanad"));
        assert_eq!(config.crop_categories.len(), 8);
    }

    #[tokio::test]
    async fn test_diagnose_rejects_empty_submission() {
        let request: DiagnosisRequest = serde_json::from_str("{}").unwrap();

        let result = diagnose_handler(Extension(keyless_gateway()), Json(request)).await;
        match result {
            Err(AppError::ValidationError(msg)) => {
                assert_eq!(msg, i18n::translate("missingInput", Language::En));
            }
            other => panic!("expected validation error, got {:?}", other.err()),
        }
    }

    #[tokio::test]
    async fn test_diagnose_validation_message_is_localized() {
        let request: DiagnosisRequest = serde_json::from_str(r#"{"language":"ml"}"#).unwrap();

        let result = diagnose_handler(Extension(keyless_gateway()), Json(request)).await;
        match result {
            Err(AppError::ValidationError(msg)) => {
                assert_eq!(msg, i18n::translate("missingInput", Language::Ml));
            }
            other => panic!("expected validation error, got {:?}", other.err()),
        }
    }

    #[tokio::test]
    async fn test_diagnose_without_credential_fails_cleanly() {
        let request: DiagnosisRequest =
            serde_json::from_str(r#"{"description":"wilting pepper vines"}"#).unwrap();

        let result = diagnose_handler(Extension(keyless_gateway()), Json(request)).await;
        assert!(matches!(result, Err(AppError::InternalServerError(_))));
    }

    #[tokio::test]
    async fn test_diagnose_rejects_image_without_mime_type() {
        let request: DiagnosisRequest =
            serde_json::from_str(r#"{"imageBase64":"aGVsbG8="}"#).unwrap();

        let result = diagnose_handler(Extension(keyless_gateway()), Json(request)).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_upstream_429_maps_to_localized_rate_limit_error() {
        let url = spawn_stub_gateway(StatusCode::TOO_MANY_REQUESTS, "slow down").await;
        let request: DiagnosisRequest =
            serde_json::from_str(r#"{"description":"leaf spots","language":"ml"}"#).unwrap();

        let result =
            diagnose_handler(Extension(gateway_for(&url, Some("test-key"))), Json(request)).await;
        match result {
            Err(AppError::RateLimited(msg)) => {
                assert_eq!(msg, i18n::translate("rateLimited", Language::Ml));
            }
            other => panic!("expected rate limit error, got {:?}", other.err()),
        }
    }

    #[tokio::test]
    async fn test_upstream_402_maps_to_localized_quota_error() {
        let url = spawn_stub_gateway(StatusCode::PAYMENT_REQUIRED, "out of credits").await;
        let request: DiagnosisRequest =
            serde_json::from_str(r#"{"description":"leaf spots"}"#).unwrap();

        let result =
            diagnose_handler(Extension(gateway_for(&url, Some("test-key"))), Json(request)).await;
        match result {
            Err(AppError::QuotaExceeded(msg)) => {
                assert_eq!(msg, i18n::translate("quotaExceeded", Language::En));
            }
            other => panic!("expected quota error, got {:?}", other.err()),
        }
    }

    #[tokio::test]
    async fn test_other_upstream_failure_maps_to_generic_localized_error() {
        let url = spawn_stub_gateway(StatusCode::INTERNAL_SERVER_ERROR, "boom").await;
        let request: DiagnosisRequest =
            serde_json::from_str(r#"{"description":"leaf spots","language":"ml"}"#).unwrap();

        let result =
            diagnose_handler(Extension(gateway_for(&url, Some("test-key"))), Json(request)).await;
        match result {
            Err(AppError::UpstreamError(msg)) => {
                assert_eq!(msg, i18n::translate("errorOccurred", Language::Ml));
            }
            other => panic!("expected upstream error, got {:?}", other.err()),
        }
    }

    #[tokio::test]
    async fn test_fenced_gateway_reply_is_relayed_as_diagnosis() {
        let url = spawn_stub_gateway(StatusCode::OK, STUB_FENCED_REPLY).await;
        let request: DiagnosisRequest =
            serde_json::from_str(r#"{"description":"white patches on pepper vines"}"#).unwrap();

        let result =
            diagnose_handler(Extension(gateway_for(&url, Some("test-key"))), Json(request)).await;
        let ResponseJson(response) = result.expect("diagnosis should succeed");
        assert_eq!(response.diagnosis.problem_type, "Pest Attack");
        assert_eq!(response.diagnosis.risk_level.as_deref(), Some("Medium"));
        assert_eq!(response.diagnosis.possible_cause, "Mealybug infestation.");
    }

    #[tokio::test]
    async fn test_prose_gateway_reply_maps_to_generic_error() {
        let url = spawn_stub_gateway(StatusCode::OK, STUB_PROSE_REPLY).await;
        let request: DiagnosisRequest =
            serde_json::from_str(r#"{"description":"leaf spots"}"#).unwrap();

        let result =
            diagnose_handler(Extension(gateway_for(&url, Some("test-key"))), Json(request)).await;
        match result {
            Err(AppError::InternalServerError(msg)) => {
                assert_eq!(msg, i18n::translate("errorOccurred", Language::En));
            }
            other => panic!("expected internal error, got {:?}", other.err()),
        }
    }
}
