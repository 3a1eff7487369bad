// ProfileLookup - platform/http.rs
//
// Blocking HTTP transport for GraphQL requests (reqwest).
//
// One `HttpTransport` is shared by every lookup worker thread; the
// underlying `reqwest::blocking::Client` pools connections and is safe to
// use concurrently. No retry, no custom timeout: the client defaults apply.

use crate::core::query::{GraphQlRequest, GraphQlTransport, RawResponse};
use crate::util::constants::{APP_NAME, APP_VERSION, GRAPHQL_PATH};
use crate::util::error::QueryError;

/// Build the GraphQL endpoint URL from a server base URL.
///
/// Trailing slashes on the base are ignored, so `http://host/` and
/// `http://host` both yield `http://host/graphql`.
pub fn graphql_endpoint(server_url: &str) -> String {
    format!("{}{GRAPHQL_PATH}", server_url.trim_end_matches('/'))
}

/// `GraphQlTransport` backed by a pooled blocking reqwest client.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpTransport {
    /// Create a transport posting to `<server_url>/graphql`.
    pub fn new(server_url: &str) -> Result<Self, QueryError> {
        let endpoint = graphql_endpoint(server_url);
        let client = reqwest::blocking::Client::builder()
            .user_agent(format!("{APP_NAME}/{APP_VERSION}"))
            .build()
            .map_err(|source| QueryError::Transport {
                url: endpoint.clone(),
                source,
            })?;

        tracing::debug!(endpoint = %endpoint, "HTTP transport ready");
        Ok(Self { client, endpoint })
    }
}

impl GraphQlTransport for HttpTransport {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn post(&self, request: &GraphQlRequest<'_>) -> Result<RawResponse, QueryError> {
        let transport_err = |source| QueryError::Transport {
            url: self.endpoint.clone(),
            source,
        };

        // `.json()` sets Content-Type: application/json.
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .map_err(transport_err)?;

        let status = response.status().as_u16();
        let body = response.text().map_err(transport_err)?;

        tracing::trace!(endpoint = %self.endpoint, status, bytes = body.len(), "HTTP response");
        Ok(RawResponse { status, body })
    }
}
