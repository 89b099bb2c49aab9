//! Payment method listing handlers

use crate::application::services::checkout_service::parse_amount;
use crate::application::services::method_service::{MethodRegistry, MethodSelector};
use crate::config::AppConfig;
use crate::infrastructure::http::models::{MethodsQuery, MethodsResponse};
use std::sync::Arc;
use warp::Reply;

/// Handle `GET /payment_methods`: methods eligible for the given amount
/// and currency, flat and grouped by category
pub async fn handle_list_methods(
    query: MethodsQuery,
    registry: Arc<MethodRegistry>,
    config: AppConfig,
) -> Result<impl Reply, warp::reject::Rejection> {
    let currency = query
        .currency
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| config.storefront.currency.clone());
    let amount = parse_amount(query.amount.as_deref());

    let selector = MethodSelector::new(&registry);
    let response = MethodsResponse {
        payment_methods: selector.available_methods(amount, &currency),
        groups: selector.methods_by_category(amount, &currency),
    };
    Ok(warp::reply::json(&response))
}
