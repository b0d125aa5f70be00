use crate::error::{ApiError, Error};
use async_trait::async_trait;
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next};
use serde_json::Value;
use task_local_extensions::Extensions;

/// Reqwest middleware which translates non-success responses returned from Beanstream APIs
/// into [`Error::ApiError`](crate::error::Error)s.
pub struct ErrorHandlingMiddleware;

#[async_trait]
impl Middleware for ErrorHandlingMiddleware {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        // Capture the response
        let response = next.run(req, extensions).await?;

        // Build an ApiError if the response is not a success
        if !response.status().is_success() {
            tracing::debug!("Failed HTTP request. Status code: {}", response.status());

            let api_error = api_error_from_response(response).await;
            return Err(Error::ApiError(api_error).into());
        }

        Ok(response)
    }
}

/// Body of an error response from Beanstream APIs.
///
/// Every field is read on its own, so a malformed one does not discard the others.
#[derive(Debug, Default)]
struct ErrorEnvelope {
    code: i64,
    category: i64,
    message: Option<String>,
}

impl ErrorEnvelope {
    fn from_json(body: &Value) -> Self {
        Self {
            code: body["code"].as_i64().unwrap_or(0),
            category: body["category"].as_i64().unwrap_or(0),
            message: body["message"].as_str().map(str::to_string),
        }
    }
}

async fn api_error_from_response(response: Response) -> ApiError {
    let status = response.status();

    // Parse the response body as JSON, falling back to the defaults
    let envelope = match response.bytes().await {
        Ok(bytes) => match serde_json::from_slice::<Value>(&bytes) {
            Ok(body) => ErrorEnvelope::from_json(&body),
            Err(e) => {
                if !bytes.is_empty() {
                    tracing::debug!("Error response body is not valid JSON: {}", e);
                }
                ErrorEnvelope::default()
            }
        },
        Err(e) => {
            tracing::debug!("Failed to read error response body: {}", e);
            ErrorEnvelope::default()
        }
    };

    let message = envelope
        .message
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| status.to_string());

    ApiError::new(envelope.code, envelope.category, message, status.as_u16())
}
