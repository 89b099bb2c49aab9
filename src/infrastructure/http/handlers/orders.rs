//! Order checkout handlers

use crate::application::services::checkout_service::CheckoutService;
use crate::infrastructure::http::models::{CheckoutHttpRequest, CheckoutHttpResponse, RequestContext};
use crate::middleware::rate_limit::RateLimitMiddleware;
use crate::shared::logging::LoggingUtils;
use std::sync::Arc;
use validator::Validate;
use warp::Reply;

/// Handle `POST /orders`: run the full checkout orchestration for the
/// session's cart with the chosen payment method
pub async fn handle_create_order(
    body: CheckoutHttpRequest,
    client_ip: String,
    service: Arc<CheckoutService>,
    rate_limit: Arc<RateLimitMiddleware>,
) -> Result<impl Reply, warp::reject::Rejection> {
    if rate_limit.check(&client_ip).is_err() {
        LoggingUtils::log_rate_limit(&client_ip, "orders.create");
        return Ok(warp::reply::with_status(
            warp::reply::json(&CheckoutHttpResponse::from_error("Rate limit exceeded".to_string())),
            warp::http::StatusCode::TOO_MANY_REQUESTS,
        ));
    }

    let context = RequestContext::new(client_ip, "orders.create".to_string());
    if let Err(e) = body.validate() {
        return Ok(warp::reply::with_status(
            warp::reply::json(&CheckoutHttpResponse::from_error(format!("Request validation failed: {}", e))),
            warp::http::StatusCode::BAD_REQUEST,
        ));
    }

    let result = service
        .checkout(
            &body.session_id,
            &body.payment_method,
            body.customer_info.to_domain(),
            body.shipping_address,
            body.billing_address,
        )
        .await;

    match result {
        Ok(summary) => Ok(warp::reply::with_status(
            warp::reply::json(&CheckoutHttpResponse::from_summary(summary)),
            warp::http::StatusCode::OK,
        )),
        Err(e) => {
            LoggingUtils::log_error(&context.request_id, &context.endpoint, &e, 0);
            Ok(warp::reply::with_status(
                warp::reply::json(&CheckoutHttpResponse::from_error(e.public_message())),
                e.http_status_code(),
            ))
        }
    }
}

/// Handle `GET /orders/<order_id>`: the stored order record with its last
/// outcome
pub async fn handle_get_order(
    order_id: String,
    service: Arc<CheckoutService>,
) -> Result<impl Reply, warp::reject::Rejection> {
    match service.order_status(&order_id).await {
        Ok(Some(record)) => Ok(warp::reply::with_status(
            warp::reply::json(&record),
            warp::http::StatusCode::OK,
        )),
        Ok(None) => Ok(warp::reply::with_status(
            warp::reply::json(&serde_json::json!({ "error": "order not found" })),
            warp::http::StatusCode::NOT_FOUND,
        )),
        Err(e) => Ok(warp::reply::with_status(
            warp::reply::json(&serde_json::json!({ "error": e.public_message() })),
            e.http_status_code(),
        )),
    }
}
