use std::fmt;

use crate::{error::Error, result::Result};
use async_trait::async_trait;
use reqwest::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    Client as ReqwestClient, Method as ReqwestMethod,
};
use serde_json::Value;

/// HTTP methods used by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
}

impl From<Method> for ReqwestMethod {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => ReqwestMethod::GET,
            Method::Post => ReqwestMethod::POST,
            Method::Put => ReqwestMethod::PUT,
            Method::Delete => ReqwestMethod::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// An HTTP request described as plain data.
///
/// `Debug` masks the `Authorization` header value.
#[derive(Clone, PartialEq)]
pub struct Request {
    /// Request method.
    pub method: Method,
    /// Absolute URL without the query string.
    pub url: String,
    /// Header name/value pairs.
    pub headers: Vec<(String, String)>,
    /// Query name/value pairs, in order.
    pub query: Vec<(String, String)>,
    /// JSON body, if any.
    pub body: Option<Value>,
}

impl Request {
    /// Starts a request with no headers, query or body.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Returns the value of the header `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: Vec<(&str, &str)> = self
            .headers
            .iter()
            .map(|(k, v)| {
                if k.eq_ignore_ascii_case(AUTHORIZATION.as_str()) {
                    (k.as_str(), "<redacted>")
                } else {
                    (k.as_str(), v.as_str())
                }
            })
            .collect();
        f.debug_struct("Request")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("headers", &headers)
            .field("query", &self.query)
            .field("body", &self.body)
            .finish()
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Numeric status code.
    pub status: u16,
    /// Raw body text.
    pub body: String,
}

impl Response {
    /// Creates a response.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes one HTTP round trip.
///
/// [`ReqwestTransport`] talks to the network; anything else can be plugged
/// in through [`Client::with_transport`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `request` and returns the status and body, whatever the status.
    ///
    /// # Errors
    ///
    /// Fails only when no response could be obtained.
    async fn execute(&self, request: Request) -> Result<Response>;
}

/// [`Transport`] backed by a `reqwest` client.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http: ReqwestClient,
}

impl ReqwestTransport {
    /// Wraps an existing `reqwest` client.
    pub fn new(http: ReqwestClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: Request) -> Result<Response> {
        let mut builder = self
            .http
            .request(request.method.into(), request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(Response { status, body })
    }
}

/// Sends authorized JSON requests and checks their status.
pub struct Client {
    transport: Box<dyn Transport>,
    headers: Vec<(String, String)>,
}

impl Client {
    /// Creates a client that talks to the network with `reqwest`.
    pub fn new(token: &str) -> Client {
        Self::with_transport(token, ReqwestTransport::default())
    }

    /// Creates a client on top of any [`Transport`].
    pub fn with_transport(token: &str, transport: impl Transport + 'static) -> Client {
        let headers = vec![
            (CONTENT_TYPE.to_string(), "application/json".to_string()),
            (AUTHORIZATION.to_string(), format!("Bearer {token}")),
        ];
        Client {
            transport: Box::new(transport),
            headers,
        }
    }

    /// Adds the fixed headers, sends `request` and decodes the JSON reply.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] with the status and raw body for any non-2xx
    /// status, and [`Error::Mapping`] if the body is not JSON.
    pub async fn send(&self, mut request: Request) -> Result<Value> {
        request.headers.extend(self.headers.iter().cloned());
        log::info!("{} {} dispatched", request.method, request.url);

        let response = self.transport.execute(request).await?;
        log::debug!("response status: {}", response.status);

        if !response.is_success() {
            log::error!("{}", response.body);
            return Err(Error::Api {
                status: response.status,
                body: response.body,
            });
        }
        serde_json::from_str(&response.body).map_err(|e| Error::mapping(e.to_string()))
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client").finish_non_exhaustive()
    }
}
