use crate::infra::{AppState, AssetTemplateStore};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use docgen::documents::{
    render_document, render_pdf, DocumentContext, TemplateError, TemplateSource, TemplateStore,
};
use docgen::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct RenderState {
    pub(crate) store: Arc<AssetTemplateStore>,
    pub(crate) default_source: TemplateSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum OutputFormat {
    #[default]
    Preview,
    Pdf,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RenderRequest {
    /// Template bodies supplied with the request (the `stored` source).
    #[serde(default)]
    pub(crate) templates: Vec<String>,
    /// Keys into the asset template store (the `asset` source).
    #[serde(default)]
    pub(crate) template_keys: Vec<String>,
    #[serde(default)]
    pub(crate) context: DocumentContext,
    #[serde(default)]
    pub(crate) output: OutputFormat,
    /// Overrides the configured default template source.
    #[serde(default)]
    pub(crate) source: Option<TemplateSource>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RenderResponse {
    pub(crate) output: OutputFormat,
    pub(crate) html: String,
    pub(crate) styles: String,
}

pub(crate) fn router(state: RenderState) -> axum::Router {
    axum::Router::new()
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/documents/render",
            axum::routing::post(render_endpoint),
        )
        .layer(Extension(state))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn render_endpoint(
    Extension(state): Extension<RenderState>,
    Json(payload): Json<RenderRequest>,
) -> Result<Json<RenderResponse>, AppError> {
    let RenderRequest {
        templates,
        template_keys,
        context,
        output,
        source,
    } = payload;

    let source = source.unwrap_or(state.default_source);
    let fragments = gather_templates(&state, source, templates, template_keys)?;

    let response = match output {
        OutputFormat::Preview => {
            let rendered = render_document(&fragments, &context);
            RenderResponse {
                output,
                html: rendered.html,
                styles: rendered.styles,
            }
        }
        OutputFormat::Pdf => RenderResponse {
            output,
            html: render_pdf(&fragments, &context),
            styles: String::new(),
        },
    };

    Ok(Json(response))
}

fn gather_templates(
    state: &RenderState,
    source: TemplateSource,
    templates: Vec<String>,
    template_keys: Vec<String>,
) -> Result<Vec<String>, AppError> {
    let fragments = match source {
        TemplateSource::Stored => templates,
        TemplateSource::Asset => {
            let keys = if template_keys.is_empty() {
                vec!["invoice".to_string()]
            } else {
                template_keys
            };
            keys.iter()
                .map(|key| state.store.fetch(key))
                .collect::<Result<Vec<_>, TemplateError>>()?
        }
    };

    if fragments.iter().all(|fragment| fragment.trim().is_empty()) {
        return Err(TemplateError::Empty.into());
    }

    Ok(fragments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::sample_context;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    fn render_state() -> RenderState {
        RenderState {
            store: Arc::new(AssetTemplateStore::default()),
            default_source: TemplateSource::Asset,
        }
    }

    fn request(output: OutputFormat) -> RenderRequest {
        RenderRequest {
            templates: Vec::new(),
            template_keys: Vec::new(),
            context: sample_context(),
            output,
            source: None,
        }
    }

    #[tokio::test]
    async fn render_endpoint_returns_styled_preview_for_builtin_template() {
        let Json(body) = render_endpoint(
            Extension(render_state()),
            Json(request(OutputFormat::Preview)),
        )
        .await
        .expect("preview renders");

        assert_eq!(body.output, OutputFormat::Preview);
        assert!(body.html.contains("INV-1009"));
        assert!(!body.html.contains("{{"));
        assert!(!body.html.contains("<style>"));
        assert!(body.styles.contains("color:#000 !important"));
    }

    #[tokio::test]
    async fn render_endpoint_produces_pdf_shell() {
        let Json(body) = render_endpoint(
            Extension(render_state()),
            Json(request(OutputFormat::Pdf)),
        )
        .await
        .expect("pdf renders");

        assert!(body.html.starts_with("<!DOCTYPE html>"));
        assert!(body.html.contains("page-break-before"));
        assert!(body.styles.is_empty());
    }

    #[tokio::test]
    async fn render_endpoint_rejects_unknown_template_key() {
        let mut payload = request(OutputFormat::Preview);
        payload.template_keys = vec!["does-not-exist".to_string()];

        let result = render_endpoint(Extension(render_state()), Json(payload)).await;
        assert!(matches!(
            result,
            Err(AppError::Template(TemplateError::NotFound(_)))
        ));
    }

    #[tokio::test]
    async fn render_endpoint_accepts_stored_template_bodies() {
        let mut payload = request(OutputFormat::Preview);
        payload.source = Some(TemplateSource::Stored);
        payload.templates = vec!["<body>Hello {{tenantName}}</body>".to_string()];

        let Json(body) = render_endpoint(Extension(render_state()), Json(payload))
            .await
            .expect("stored template renders");

        assert!(body.html.contains("Hello Jordan Reyes"));
    }

    #[tokio::test]
    async fn render_endpoint_rejects_empty_stored_payload() {
        let mut payload = request(OutputFormat::Preview);
        payload.source = Some(TemplateSource::Stored);
        payload.templates = vec![String::new()];

        let result = render_endpoint(Extension(render_state()), Json(payload)).await;
        assert!(matches!(
            result,
            Err(AppError::Template(TemplateError::Empty))
        ));
    }

    #[tokio::test]
    async fn router_serves_render_requests_end_to_end() {
        let router = router(render_state());
        let payload = serde_json::to_vec(&json!({
            "templateKeys": ["invoice"],
            "context": { "invoice": { "invoiceId": "INV-42", "totalAmount": 900.0 } }
        }))
        .expect("payload encodes");

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/documents/render")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload))
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let payload: serde_json::Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(payload.get("output"), Some(&json!("preview")));
        let html = payload
            .get("html")
            .and_then(serde_json::Value::as_str)
            .expect("html field");
        assert!(html.contains("INV-42"));
        assert!(!html.contains("{{"));
    }

    #[tokio::test]
    async fn router_maps_template_lookup_failures_to_bad_request() {
        let router = router(render_state());
        let payload = serde_json::to_vec(&json!({ "templateKeys": ["does-not-exist"] }))
            .expect("payload encodes");

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/documents/render")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload))
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
