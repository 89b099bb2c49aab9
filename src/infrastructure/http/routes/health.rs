//! Health routes module

use std::sync::Arc;
use warp::Filter;

use crate::application::services::method_service::MethodRegistry;
use crate::infrastructure::http::handlers::handle_health_request;
use crate::infrastructure::http::utils::with_registry;

pub struct HealthRoutes;

impl HealthRoutes {
    pub fn create_health_route(
        registry: Arc<MethodRegistry>,
        storage_ok: bool,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        warp::path("health")
            .and(warp::path::end())
            .and(warp::get())
            .and(with_registry(registry))
            .and(warp::any().map(move || storage_ok))
            .and_then(handle_health_request)
    }
}
