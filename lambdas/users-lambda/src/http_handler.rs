use lambda_http::{Body, Error, Request, Response};
use std::sync::Arc;
use users_api_shared::request::ApiRequest;
use users_api_shared::AppState;

/// Main Lambda handler - normalizes the gateway event and hands it to the users handler
pub(crate) async fn function_handler(
    event: Request,
    state: Arc<AppState>,
) -> Result<Response<Body>, Error> {
    let req = ApiRequest::from_lambda(&event);
    tracing::info!(
        "Users Lambda invoked - Method: {} Resource: {}",
        req.method,
        req.resource
    );

    let resp = state.handler.handle(req).await;
    tracing::info!("Responding {}", resp.status);
    resp.into_http()
}
