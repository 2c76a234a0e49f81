use std::sync::Arc;

use chrono::Utc;
use lambda_http::http::StatusCode;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::request::ApiRequest;
use crate::response::ApiResponse;
use crate::route::{route_key, Route};
use crate::store::{UserStore, PAGE_SIZE};
use crate::types::{ScanCursor, UserInput};

/// Routes one gateway request to at most one store call
#[derive(Clone)]
pub struct UsersHandler {
    store: Arc<dyn UserStore>,
}

impl UsersHandler {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, req: ApiRequest) -> ApiResponse {
        let key = route_key(&req.method, &req.resource);
        let Some(route) = Route::resolve(&key) else {
            tracing::warn!("Unsupported route: {}", key);
            return unsupported_route();
        };
        tracing::info!("Handling {} as {:?}", key, route);

        let result = match route {
            Route::CountUsers => self.count_users().await,
            Route::ListUsers => self.list_users(&req).await,
            Route::GetUser => self.get_user(req.userid()).await,
            Route::DeleteUser => self.delete_user(req.userid()).await,
            Route::CreateUser => self.create_user(&req).await,
            Route::UpdateUser => self.update_user(&req).await,
        };

        result.unwrap_or_else(ApiError::into_response)
    }

    async fn count_users(&self) -> Result<ApiResponse, ApiError> {
        let count = self.store.count().await?;
        Ok(ApiResponse::ok(json!({ "CountTestVip": count })))
    }

    async fn list_users(&self, req: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let start = match req.query("nextToken").filter(|t| !t.is_empty()) {
            Some(token) => {
                let cursor = ScanCursor::parse(token);
                if cursor.is_none() {
                    tracing::debug!("Ignoring malformed nextToken: {}", token);
                }
                cursor
            }
            None => None,
        };

        let page = self.store.scan(PAGE_SIZE, start).await?;

        let mut body = json!({ "items": page.items });
        if let Some(next) = page.next {
            body["nextToken"] = Value::String(next.to_token());
        }
        Ok(ApiResponse::ok(body))
    }

    async fn get_user(&self, userid: &str) -> Result<ApiResponse, ApiError> {
        if userid.is_empty() {
            return Ok(ApiResponse::ok(json!({})));
        }
        let body = match self.store.get(userid).await? {
            Some(record) => json!(record),
            None => json!({}),
        };
        Ok(ApiResponse::ok(body))
    }

    async fn delete_user(&self, userid: &str) -> Result<ApiResponse, ApiError> {
        if !userid.is_empty() {
            self.store.delete(userid).await?;
        }
        Ok(ApiResponse::ok(
            json!({ "message": "User deleted successfully" }),
        ))
    }

    async fn create_user(&self, req: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let record = parse_input(req)?.into_created(Utc::now());
        self.store.put(&record).await?;
        Ok(ApiResponse::created(json!(record)))
    }

    async fn update_user(&self, req: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let input = parse_input(req)?;
        let userid = req.userid();
        if userid.is_empty() {
            return Err(ApiError::MissingUserId);
        }
        let record = input.into_replacement(userid, Utc::now());
        self.store.put(&record).await?;
        Ok(ApiResponse::ok(json!(record)))
    }
}

fn parse_input(req: &ApiRequest) -> Result<UserInput, ApiError> {
    if !req.has_body() {
        return Err(ApiError::MissingBody);
    }
    let value: Value = serde_json::from_slice(&req.body).map_err(ApiError::InvalidJson)?;
    serde_json::from_value(value).map_err(ApiError::InvalidBody)
}

fn unsupported_route() -> ApiResponse {
    ApiResponse::new(
        StatusCode::BAD_REQUEST,
        json!({ "Message": "Unsupported route" }),
    )
}
