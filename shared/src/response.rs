use lambda_http::{http::StatusCode, Body, Error, Response};
use serde_json::Value;

/// Headers every response carries
pub const RESPONSE_HEADERS: [(&str, &str); 2] = [
    ("Content-Type", "application/json"),
    ("Access-Control-Allow-Origin", "*"),
];

/// Status plus JSON body; headers are fixed
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }

    pub fn ok(body: Value) -> Self {
        Self::new(StatusCode::OK, body)
    }

    pub fn created(body: Value) -> Self {
        Self::new(StatusCode::CREATED, body)
    }

    pub fn into_http(self) -> Result<Response<Body>, Error> {
        let mut builder = Response::builder().status(self.status);
        for (name, value) in RESPONSE_HEADERS {
            builder = builder.header(name, value);
        }
        Ok(builder
            .body(self.body.to_string().into())
            .map_err(Box::new)?)
    }
}
