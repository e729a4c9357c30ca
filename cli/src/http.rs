//! ureq executor for the core's plain-data HTTP requests.

use anyhow::Context;
use lostpets_core::{HttpMethod, HttpRequest, HttpResponse};
use tracing::debug;

/// Execute an `HttpRequest` and return the raw `HttpResponse`.
///
/// ureq's status-code-as-error behavior is disabled so 4xx/5xx responses come
/// back as data; status interpretation belongs to the core clients. Only
/// transport-level failures (DNS, refused connection, ...) error here.
pub fn execute(req: HttpRequest) -> anyhow::Result<HttpResponse> {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    debug!(method = ?req.method, path = %req.path, "request");

    let path = req.path.clone();
    let mut response = match (req.method, req.body) {
        (HttpMethod::Get, _) => {
            let mut builder = agent.get(&req.path);
            for (name, value) in &req.headers {
                builder = builder.header(name, value);
            }
            builder.call()
        }
        (HttpMethod::Post, Some(body)) => {
            let mut builder = agent.post(&req.path);
            for (name, value) in &req.headers {
                builder = builder.header(name, value);
            }
            builder.send(&body[..])
        }
        (HttpMethod::Post, None) => agent.post(&req.path).send_empty(),
    }
    .with_context(|| format!("request to {path} failed"))?;

    let status = response.status().as_u16();
    debug!(status, path = %path, "response");

    let headers = response
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();
    let body = response.body_mut().read_to_vec().unwrap_or_default();

    Ok(HttpResponse {
        status,
        headers,
        body,
    })
}
