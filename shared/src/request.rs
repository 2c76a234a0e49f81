use std::collections::HashMap;

use lambda_http::{http::Method, request::RequestContext, Request, RequestExt};

/// Gateway event reduced to what the users handler reads
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Resource template, e.g. `/users/{userid}`
    pub resource: String,
    pub path_parameters: HashMap<String, String>,
    pub query_parameters: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl ApiRequest {
    pub fn new(method: Method, resource: impl Into<String>) -> Self {
        Self {
            method,
            resource: resource.into(),
            path_parameters: HashMap::new(),
            query_parameters: HashMap::new(),
            body: Vec::new(),
        }
    }

    pub fn with_path_parameter(mut self, name: &str, value: impl Into<String>) -> Self {
        self.path_parameters.insert(name.to_string(), value.into());
        self
    }

    pub fn with_query_parameter(mut self, name: &str, value: impl Into<String>) -> Self {
        self.query_parameters.insert(name.to_string(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Normalize a Lambda HTTP event.
    ///
    /// The template comes from the REST API context (`resource`) or the HTTP API
    /// route key. Without either (local invokes), it is inferred from the path.
    pub fn from_lambda(event: &Request) -> Self {
        let method = event.method().clone();
        let path = event.uri().path();

        let mut path_parameters: HashMap<String, String> = event
            .path_parameters_ref()
            .map(|params| {
                params
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect()
            })
            .unwrap_or_default();

        let query_parameters = event
            .query_string_parameters_ref()
            .map(|params| {
                params
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect()
            })
            .unwrap_or_default();

        let resource = match gateway_resource(event) {
            Some(resource) => resource,
            None => {
                let (resource, userid) = infer_resource(path);
                if let Some(userid) = userid {
                    path_parameters
                        .entry("userid".to_string())
                        .or_insert(userid);
                }
                resource
            }
        };

        Self {
            method,
            resource,
            path_parameters,
            query_parameters,
            body: event.body().to_vec(),
        }
    }

    /// Empty string when the gateway passed no `userid`
    pub fn userid(&self) -> &str {
        self.path_parameters
            .get("userid")
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn query(&self, name: &str) -> Option<&str> {
        self.query_parameters.get(name).map(String::as_str)
    }

    pub fn has_body(&self) -> bool {
        !self.body.is_empty()
    }
}

fn gateway_resource(event: &Request) -> Option<String> {
    match event.request_context_ref()? {
        RequestContext::ApiGatewayV1(ctx) => ctx.resource_path.clone(),
        // HTTP API route keys read "GET /users/{userid}"
        RequestContext::ApiGatewayV2(ctx) => ctx
            .route_key
            .as_deref()
            .and_then(|key| key.split_once(' '))
            .map(|(_, resource)| resource.to_string()),
        _ => None,
    }
}

/// Map a literal path onto the users templates; unknown paths pass through
fn infer_resource(path: &str) -> (String, Option<String>) {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    match segments.as_slice() {
        ["users"] => ("/users".to_string(), None),
        ["users", "count"] => ("/users/count".to_string(), None),
        ["users", userid] => ("/users/{userid}".to_string(), Some(userid.to_string())),
        _ => (path.to_string(), None),
    }
}
