use anyhow::{Context, Result, ensure};
use crux_http::{
    HttpError,
    protocol::{HttpRequest, HttpResponse, HttpResult},
};
use log::debug;
use panel_sync_core::BASE_URL;
use reqwest::{Client, Method};
use std::time::Duration;

/// Create the HTTP client used for all device requests
pub fn device_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .context("failed to create device HTTP client")
}

/// Map a core URL onto the device
///
/// The core addresses endpoints below the `https://relative` placeholder;
/// only the path and query are kept and appended to `device_url`.
///
/// # Examples
/// ```
/// use panel_sync::http_client::resolve_url;
///
/// let url = resolve_url("http://192.168.4.1", "https://relative/status").unwrap();
/// assert_eq!(url, "http://192.168.4.1/status");
/// ```
pub fn resolve_url(device_url: &str, core_url: &str) -> Result<String> {
    let path = core_url.strip_prefix(BASE_URL);
    ensure!(
        path.is_some_and(|p| p.starts_with('/')),
        "failed to resolve request url: {core_url} is not below {BASE_URL}"
    );

    Ok(format!(
        "{}{}",
        device_url.trim_end_matches('/'),
        path.unwrap_or_default()
    ))
}

/// Perform a request issued by the core and translate the outcome for it
///
/// Non-2xx answers are passed back as responses; the core decides how to
/// report them. Only transport failures become `HttpError`s.
pub async fn execute(client: &Client, device_url: &str, request: &HttpRequest) -> HttpResult {
    let url = match resolve_url(device_url, &request.url) {
        Ok(url) => url,
        Err(e) => return HttpResult::Err(HttpError::Url(e.to_string())),
    };
    let method = match Method::from_bytes(request.method.as_bytes()) {
        Ok(method) => method,
        Err(e) => return HttpResult::Err(HttpError::Io(format!("invalid method: {e}"))),
    };

    debug!("{method} {url}");

    let mut builder = client.request(method, &url);
    for header in &request.headers {
        builder = builder.header(header.name.as_str(), header.value.as_str());
    }
    if !request.body.is_empty() {
        builder = builder.body(request.body.clone());
    }

    let response = match builder.send().await {
        Ok(response) => response,
        Err(e) => return HttpResult::Err(map_reqwest_error(&e)),
    };
    let status = response.status().as_u16();

    match response.bytes().await {
        Ok(body) => HttpResult::Ok(HttpResponse::status(status).body(body.to_vec()).build()),
        Err(e) => HttpResult::Err(map_reqwest_error(&e)),
    }
}

fn map_reqwest_error(error: &reqwest::Error) -> HttpError {
    if error.is_timeout() {
        HttpError::Timeout
    } else {
        HttpError::Io(format!("{error:#}"))
    }
}
