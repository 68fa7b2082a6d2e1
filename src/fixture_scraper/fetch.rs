//! Document retrieval: pooled HTTP client, direct fetches with retry
//! logic, and the ordered CORS-relay fallback chain.

use reqwest::{Client, RequestBuilder};
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

use crate::constants::{self, headers, retry};
use crate::error::AppError;

/// Creates a properly configured HTTP client with connection pooling and
/// timeout handling. One client is shared across a whole run; reqwest
/// pools connections per host underneath.
pub fn create_http_client_with_timeout(timeout_seconds: u64) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .pool_max_idle_per_host(constants::HTTP_POOL_MAX_IDLE_PER_HOST)
        .build()
}

/// Builds a GET request carrying the browser-like header set. Several of
/// the upstream sources serve error pages to clients without them.
fn browser_get(client: &Client, url: &str) -> RequestBuilder {
    client
        .get(url)
        .header(reqwest::header::USER_AGENT, headers::USER_AGENT)
        .header(reqwest::header::ACCEPT, headers::ACCEPT)
        .header(reqwest::header::ACCEPT_LANGUAGE, headers::ACCEPT_LANGUAGE)
        .header(reqwest::header::REFERER, headers::REFERER)
}

/// Relay URL for one proxy prefix: `prefix + encodeURIComponent(target)`.
pub fn build_relay_url(prefix: &str, target_url: &str) -> String {
    format!("{prefix}{}", urlencoding::encode(target_url))
}

/// Fetches a document directly, retrying transient failures with
/// exponential backoff and honoring Retry-After. Non-success statuses map
/// to specific error variants; an empty body is an error in its own right
/// because every adapter needs markup to work with.
#[instrument(skip(client))]
pub async fn fetch_document(client: &Client, url: &str) -> Result<String, AppError> {
    info!("Fetching document from URL: {url}");

    let mut attempt = 0u32;
    let mut backoff = Duration::from_millis(retry::BASE_DELAY_MS);
    let response = loop {
        match browser_get(client, url).send().await {
            Ok(resp) => {
                let status = resp.status();
                if (status.as_u16() == 429 || status.is_server_error())
                    && attempt < retry::MAX_ATTEMPTS
                {
                    // Respect Retry-After if provided
                    let retry_after = resp
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|h| h.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .map(Duration::from_secs);
                    let wait = retry_after.unwrap_or(backoff);
                    warn!(
                        "Transient {} from {}. Retrying in {:?} (attempt {}/{})",
                        status,
                        url,
                        wait,
                        attempt + 1,
                        retry::MAX_ATTEMPTS
                    );
                    tokio::time::sleep(wait).await;
                    attempt += 1;
                    backoff = backoff.saturating_mul(2);
                    continue;
                }
                break resp;
            }
            Err(e) => {
                if (e.is_timeout() || e.is_connect()) && attempt < retry::MAX_ATTEMPTS {
                    warn!(
                        "Request error {} for {}. Retrying in {:?} (attempt {}/{})",
                        e,
                        url,
                        backoff,
                        attempt + 1,
                        retry::MAX_ATTEMPTS
                    );
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                    backoff = backoff.saturating_mul(2);
                    continue;
                }
                error!("Request failed for URL {}: {}", url, e);
                return if e.is_timeout() {
                    Err(AppError::network_timeout(url))
                } else if e.is_connect() {
                    Err(AppError::network_connection(url, e.to_string()))
                } else {
                    Err(AppError::Fetch(e))
                };
            }
        }
    };

    let status = response.status();
    debug!("Response status: {status}");

    if !status.is_success() {
        let status_code = status.as_u16();
        let reason = status.canonical_reason().unwrap_or("Unknown error");

        error!("HTTP {} - {} (URL: {})", status_code, reason, url);

        return Err(match status_code {
            404 => AppError::source_not_found(url),
            429 => AppError::source_rate_limit(reason, url),
            400..=499 => AppError::source_client_error(status_code, reason, url),
            _ => AppError::source_server_error(status_code, reason, url),
        });
    }

    let body = match response.text().await {
        Ok(text) => text,
        Err(e) => {
            error!("Failed to read response body from URL {}: {}", url, e);
            return Err(AppError::Fetch(e));
        }
    };

    debug!("Response length: {} bytes", body.len());

    if body.trim().is_empty() {
        return Err(AppError::empty_document(url));
    }

    Ok(body)
}

/// Fetches a cross-origin-blocked document by iterating the relay chain in
/// order. Each relay gets one attempt; the first to return a success
/// status with a non-empty body wins and the rest are never tried. When
/// every relay fails the caller gets a single [`AppError::ProxyExhausted`]
/// describing the whole chain.
#[instrument(skip(client, relay_prefixes))]
pub async fn fetch_via_relays(
    client: &Client,
    url: &str,
    relay_prefixes: &[String],
) -> Result<String, AppError> {
    if relay_prefixes.is_empty() {
        return fetch_document(client, url).await;
    }

    for (index, prefix) in relay_prefixes.iter().enumerate() {
        let relay_url = build_relay_url(prefix, url);
        debug!(
            "Trying relay {}/{}: {}",
            index + 1,
            relay_prefixes.len(),
            relay_url
        );

        match browser_get(client, &relay_url).send().await {
            Ok(resp) if resp.status().is_success() => match resp.text().await {
                Ok(body) if !body.trim().is_empty() => {
                    info!("Relay {} delivered {} bytes for {}", prefix, body.len(), url);
                    return Ok(body);
                }
                Ok(_) => {
                    warn!("Relay {} returned an empty body for {}", prefix, url);
                }
                Err(e) => {
                    warn!("Relay {} body read failed for {}: {}", prefix, url, e);
                }
            },
            Ok(resp) => {
                warn!(
                    "Relay {} returned HTTP {} for {}",
                    prefix,
                    resp.status(),
                    url
                );
            }
            Err(e) => {
                warn!("Relay {} request failed for {}: {}", prefix, url, e);
            }
        }
    }

    error!(
        "All {} relays exhausted for URL: {}",
        relay_prefixes.len(),
        url
    );
    Err(AppError::proxy_exhausted(url, relay_prefixes.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_relay_url_encodes_target() {
        let relay = build_relay_url(
            "https://api.allorigins.win/raw?url=",
            "https://example.com/fixtures?page=1",
        );
        assert_eq!(
            relay,
            "https://api.allorigins.win/raw?url=https%3A%2F%2Fexample.com%2Ffixtures%3Fpage%3D1"
        );
    }

    #[test]
    fn test_create_http_client() {
        let client = create_http_client_with_timeout(5);
        assert!(client.is_ok());
    }
}
