//! Payments HTTP handlers

use crate::application::services::checkout_service::{parse_amount, CheckoutService};
use crate::application::services::method_service::{MethodRegistry, MethodSelector};
use crate::infrastructure::http::models::{
    InitializePaymentRequest, InstallmentsQuery, InstallmentsResponse, RequestContext,
};
use crate::middleware::rate_limit::RateLimitMiddleware;
use crate::shared::logging::LoggingUtils;
use rust_decimal::Decimal;
use std::sync::Arc;
use validator::Validate;
use warp::Reply;

/// Handle `POST /payments/initialize`: validate, dispatch to the chosen
/// provider, and return the normalized outcome. A failed payment is still
/// a 200 response; the outcome tag carries the result.
pub async fn handle_initialize_payment(
    body: InitializePaymentRequest,
    client_ip: String,
    service: Arc<CheckoutService>,
    rate_limit: Arc<RateLimitMiddleware>,
) -> Result<impl Reply, warp::reject::Rejection> {
    if rate_limit.check(&client_ip).is_err() {
        LoggingUtils::log_rate_limit(&client_ip, "payments.initialize");
        return Ok(warp::reply::with_status(
            warp::reply::json(&serde_json::json!({ "error": "Rate limit exceeded" })),
            warp::http::StatusCode::TOO_MANY_REQUESTS,
        ));
    }

    let context = RequestContext::new(client_ip, "payments.initialize".to_string());
    if let Err(e) = body.validate() {
        return Ok(warp::reply::with_status(
            warp::reply::json(&serde_json::json!({ "error": format!("Request validation failed: {}", e) })),
            warp::http::StatusCode::BAD_REQUEST,
        ));
    }

    let method_id = body.payment_method.clone();
    let order = body.into_order_request();
    match service.initiate(&method_id, order).await {
        Ok(outcome) => Ok(warp::reply::with_status(
            warp::reply::json(&outcome),
            warp::http::StatusCode::OK,
        )),
        Err(e) => {
            LoggingUtils::log_error(&context.request_id, &context.endpoint, &e, 0);
            Ok(warp::reply::with_status(
                warp::reply::json(&serde_json::json!({ "error": e.public_message() })),
                e.http_status_code(),
            ))
        }
    }
}

/// Handle `GET /payments/installments/<method_id>`: BNPL installment
/// choices for an amount; empty options for non-BNPL methods
pub async fn handle_installments(
    method_id: String,
    query: InstallmentsQuery,
    registry: Arc<MethodRegistry>,
) -> Result<impl Reply, warp::reject::Rejection> {
    let amount = parse_amount(query.amount.as_deref()).unwrap_or(Decimal::ZERO);
    let selector = MethodSelector::new(&registry);
    let response = InstallmentsResponse {
        options: selector.installment_options(&method_id, amount),
        method_id,
    };
    Ok(warp::reply::json(&response))
}
