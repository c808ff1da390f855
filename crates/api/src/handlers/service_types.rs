use axum::Json;
use shopdesk_core::models::service_type::{ServiceType, ServiceTypeInfo};

/// Lists the bookable services with their fixed durations.
pub async fn list_service_types() -> Json<Vec<ServiceTypeInfo>> {
    Json(ServiceType::CATALOG.into_iter().map(ServiceTypeInfo::from).collect())
}
