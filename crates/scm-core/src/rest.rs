//! JSON client for the SCM REST API

use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{RestError, RestFailure, RestResult};

/// Thin wrapper over `reqwest` that resolves paths against the configured
/// REST base and converts non-2xx answers into [`RestError::Status`]
#[derive(Debug, Clone)]
pub struct RestClient {
    client: Client,
    config: ClientConfig,
}

impl RestClient {
    pub fn new(config: ClientConfig) -> RestResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// GET a JSON document
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> RestResult<T> {
        let request = self.request(Method::GET, path)?;
        let body = self.execute(request, path).await?;
        decode(&body)
    }

    /// POST without a body and decode the JSON answer
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> RestResult<T> {
        let request = self.request(Method::POST, path)?;
        let body = self.execute(request, path).await?;
        decode(&body)
    }

    /// POST a JSON body and decode the JSON answer
    pub async fn post_json<B, T>(&self, path: &str, payload: &B) -> RestResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, path)?.json(payload);
        let body = self.execute(request, path).await?;
        decode(&body)
    }

    /// POST a JSON body, ignoring whatever the server answers on success
    pub async fn post_json_no_content<B>(&self, path: &str, payload: &B) -> RestResult<()>
    where
        B: Serialize + ?Sized,
    {
        let request = self.request(Method::POST, path)?.json(payload);
        self.execute(request, path).await?;
        Ok(())
    }

    fn request(&self, method: Method, path: &str) -> RestResult<RequestBuilder> {
        let url = self.config.endpoint(path)?;
        let mut request = self
            .client
            .request(method, url)
            .header("Accept", "application/json");

        if let Some(token) = &self.config.api_token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        Ok(request)
    }

    async fn execute(&self, request: RequestBuilder, path: &str) -> RestResult<String> {
        debug!("REST request: {}", path);

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!("REST request {} failed with status {}", path, status);
            return Err(RestError::Status {
                status,
                failure: RestFailure::from_response(status, &body),
            });
        }

        Ok(response.text().await?)
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> RestResult<T> {
    serde_json::from_str(body).map_err(|e| RestError::Decode {
        message: e.to_string(),
        body: body.to_string(),
    })
}
