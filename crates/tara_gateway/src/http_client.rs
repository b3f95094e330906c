//! Execution of built requests on an injected `reqwest` client.
//!
//! Connection pooling, TLS and proxying are the client's concern; this
//! module only translates a [`Request`] into a `reqwest` call and maps
//! transport faults. Cancellation propagates naturally: dropping the future
//! aborts the in-flight call, and every call runs under a timeout.

use std::{str::FromStr, time::Duration};

use error_stack::{report, ResultExt};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::{
    consts,
    errors::{CustomResult, HttpClientError},
    request::{Headers, Method, Request, RequestContent},
};

#[tracing::instrument(skip_all)]
pub async fn send_request(
    client: &reqwest::Client,
    request: Request,
    option_timeout_secs: Option<u64>,
) -> CustomResult<reqwest::Response, HttpClientError> {
    tracing::info!(method = ?request.method, url = %request.url, headers = ?request.headers, body = ?request.body);

    let url =
        url::Url::parse(&request.url).change_context(HttpClientError::UrlParsingFailed)?;

    let headers = construct_header_map(request.headers)?;

    let request_builder = match request.method {
        Method::Get => client.get(url),
        Method::Post => {
            let client = client.post(url);
            match request.body {
                Some(RequestContent::Json(payload)) => client.json(&payload),
                None => client,
            }
        }
        Method::Put => client.put(url),
        Method::Delete => client.delete(url),
    }
    .headers(headers)
    .timeout(Duration::from_secs(
        option_timeout_secs.unwrap_or(consts::REQUEST_TIMEOUT_SECS),
    ));

    request_builder
        .send()
        .await
        .map_err(|error| match error {
            error if error.is_timeout() => report!(HttpClientError::RequestTimeoutReceived),
            _ => report!(HttpClientError::RequestNotSent(error.to_string())),
        })
        .attach_printable("Unable to send request to the gateway")
}

fn construct_header_map(headers: Headers) -> CustomResult<HeaderMap, HttpClientError> {
    headers.into_iter().try_fold(
        HeaderMap::new(),
        |mut header_map, (header_name, header_value)| {
            let header_name = HeaderName::from_str(&header_name)
                .change_context(HttpClientError::HeaderMapConstructionFailed)?;
            let header_value = HeaderValue::from_str(&header_value.into_inner())
                .change_context(HttpClientError::HeaderMapConstructionFailed)?;
            header_map.append(header_name, header_value);
            Ok(header_map)
        },
    )
}
