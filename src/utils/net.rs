use std::time::Duration;

use log::debug;
use reqwest::Method;
use url::Url;

use crate::error::{IiError, IiResult};

pub async fn http_get(
    url: &str,
    query: &[(&str, String)],
    timeout_secs: u64,
) -> IiResult<Vec<u8>> {
    let client = reqwest::Client::new();

    let request_builder = client
        .request(Method::GET, url)
        .timeout(Duration::from_secs(timeout_secs))
        .query(query);

    debug!("[GET] {url} {query:?}");
    let response = request_builder.send().await?;

    let status = response.status();
    if status.is_success() {
        Ok(response.bytes().await?.to_vec())
    } else {
        let request = response.url().to_string();
        let body = response.bytes().await.unwrap_or_default();
        debug!("[HTTP Status Error] [{request}] {status}");

        Err(IiError::HttpStatusError {
            status: status.as_u16(),
            request,
            message: error_message_from_body(&body),
        })
    }
}

/// Appends each segment to the path of `base_url`, percent-encoding it as a whole segment.
pub fn join_url(base_url: &str, segments: &[&str]) -> Result<String, url::ParseError> {
    let mut url = Url::parse(base_url)?;

    url.path_segments_mut()
        .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
        .pop_if_empty()
        .extend(segments.iter().filter(|s| !s.is_empty()));

    Ok(url.to_string())
}

fn error_message_from_body(body: &[u8]) -> Option<String> {
    let json: serde_json::Value = serde_json::from_slice(body).ok()?;

    json["error"]
        .as_str()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
