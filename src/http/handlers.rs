//! Request handlers for the webhook endpoint.
//!
//! # Responsibilities
//! - Enforce the POST-only contract on the root path
//! - Read the full payload and trace headers and body
//! - Acknowledge receipt with an empty 200

use axum::extract::Request;
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

/// Accept one webhook delivery.
///
/// Anything other than POST is turned away with a client error before
/// the body is touched. For POST the whole payload is read and traced
/// together with the request headers, then acknowledged.
pub async fn receive_webhook(request: Request) -> Response {
    if request.method() != Method::POST {
        tracing::info!(
            method = %request.method(),
            "received unsupported request method"
        );
        return (StatusCode::BAD_REQUEST, "only POST requests supported.").into_response();
    }

    let (parts, body) = request.into_parts();

    // No read cap: the whole payload is traced, however large.
    let payload = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::error!(error = %err, "failed to read request body");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let receipt_id = Uuid::new_v4();
    tracing::info!(
        receipt_id = %receipt_id,
        bytes = payload.len(),
        "received webhook"
    );
    for line in header_lines(&parts.headers) {
        tracing::info!("request headers: {}", line);
    }
    tracing::info!("request body: {}", String::from_utf8_lossy(&payload));

    StatusCode::OK.into_response()
}

/// Fallback for paths the receiver does not expose.
pub async fn unknown_path() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// Render one `Name: [v1 v2]` line per header, values grouped under
/// their name in arrival order.
fn header_lines(headers: &HeaderMap) -> Vec<String> {
    headers
        .keys()
        .map(|name| {
            let values = headers
                .get_all(name)
                .iter()
                .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
                .collect::<Vec<_>>()
                .join(" ");
            format!("{}: [{}]", canonical_header_name(name.as_str()), values)
        })
        .collect()
}

/// `HeaderMap` stores names lowercased; restore the traditional
/// Word-Case form so the trace reads like the sender wrote it.
fn canonical_header_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = true;
    for ch in name.chars() {
        if upper_next {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        upper_next = ch == '-';
    }
    out
}
