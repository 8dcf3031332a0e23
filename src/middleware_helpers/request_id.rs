use crate::tracing::RequestId;
use axum::{
    extract::Request,
    http::{header::HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};

/// Header name for the request ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Tags every request and response with an `x-request-id`, reusing the
/// caller's id when it is a valid header value.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let incoming = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.trim().is_empty())
        .map(RequestId::new);

    let (request_id, header_value) = match incoming
        .and_then(|id| HeaderValue::from_str(id.as_str()).ok().map(|value| (id, value)))
    {
        Some(pair) => pair,
        None => {
            let id = RequestId::default();
            // uuid strings are always valid header values
            let value = HeaderValue::from_str(id.as_str()).unwrap_or(HeaderValue::from_static(""));
            (id, value)
        }
    };

    request.headers_mut().insert(
        HeaderName::from_static(REQUEST_ID_HEADER),
        header_value.clone(),
    );
    request.extensions_mut().insert(request_id.clone());

    // The trace layer's span picks the id up from the request extensions
    let mut response =
        crate::tracing::scope_request_id(request_id, async move { next.run(request).await })
            .await;

    response
        .headers_mut()
        .insert(HeaderName::from_static(REQUEST_ID_HEADER), header_value);

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        extract::Extension,
        http::{Request as HttpRequest, StatusCode},
        routing::get,
        Router,
    };
    use std::{
        fmt,
        sync::{Arc, Mutex},
    };
    use tower::ServiceExt;
    use tracing::{
        field::{Field, Visit},
        instrument::WithSubscriber,
        span,
    };
    use tracing_subscriber::{
        layer::{Context, SubscriberExt},
        Layer,
    };

    type RecordedSpans = Arc<Mutex<Vec<(String, Option<String>)>>>;

    /// Records the name and `request_id` field of every span opened.
    struct SpanRecorder(RecordedSpans);

    struct RequestIdField(Option<String>);

    impl Visit for RequestIdField {
        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            if field.name() == "request_id" {
                self.0 = Some(format!("{:?}", value));
            }
        }
    }

    impl<S: tracing::Subscriber> Layer<S> for SpanRecorder {
        fn on_new_span(&self, attrs: &span::Attributes<'_>, _id: &span::Id, _ctx: Context<'_, S>) {
            let mut field = RequestIdField(None);
            attrs.record(&mut field);
            self.0
                .lock()
                .unwrap()
                .push((attrs.metadata().name().to_string(), field.0));
        }
    }

    async fn extension_handler(
        Extension(request_id): Extension<RequestId>,
    ) -> (StatusCode, String) {
        (
            StatusCode::OK,
            format!("request-id:{}", request_id.as_str()),
        )
    }

    fn app() -> Router {
        Router::new()
            .route("/", get(extension_handler))
            .layer(axum::middleware::from_fn(request_id_middleware))
    }

    #[tokio::test]
    async fn middleware_adds_request_id_header_and_extension() {
        let response = app()
            .oneshot(HttpRequest::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let header = response.headers().get(REQUEST_ID_HEADER).cloned();
        assert!(header.is_some());

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body_str = String::from_utf8(body.to_vec()).unwrap();
        assert!(body_str.starts_with("request-id:"));
    }

    #[tokio::test]
    async fn middleware_preserves_caller_request_id() {
        let response = app()
            .oneshot(
                HttpRequest::builder()
                    .uri("/")
                    .header(REQUEST_ID_HEADER, "from-dashboard-7")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get(REQUEST_ID_HEADER).unwrap(),
            "from-dashboard-7"
        );
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"request-id:from-dashboard-7");
    }

    #[tokio::test]
    async fn each_request_opens_a_single_span_tagged_with_its_id() {
        let spans: RecordedSpans = Arc::default();
        let subscriber = tracing_subscriber::registry().with(SpanRecorder(spans.clone()));

        let traced = Router::new()
            .route("/", get(extension_handler))
            .layer(crate::tracing::configure_http_tracing())
            .layer(axum::middleware::from_fn(request_id_middleware));

        let response = traced
            .oneshot(
                HttpRequest::builder()
                    .uri("/")
                    .header(REQUEST_ID_HEADER, "span-check-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .with_subscriber(subscriber)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let spans = spans.lock().unwrap();
        let tagged: Vec<_> = spans
            .iter()
            .filter(|(_, request_id)| request_id.is_some())
            .collect();
        assert_eq!(tagged.len(), 1, "spans opened: {:?}", *spans);
        assert_eq!(tagged[0].0, "http.request");
        assert_eq!(tagged[0].1.as_deref(), Some("span-check-1"));
    }
}
