//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use whisker_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Whisker API",
        version = "0.1.0",
        description = "Cat photo detection and registration. Uploads are classified; confirmed cats are archived, recorded in the registry and their owners notified by email."
    ),
    paths(
        handlers::upload::detect_cat,
        handlers::register::register_chat,
        handlers::chats::list_chats,
        handlers::health::health_check,
    ),
    components(schemas(
        models::DetectionResult,
        models::ChatRecord,
        error::ErrorResponse,
        handlers::health::HealthCheckResponse,
    )),
    tags(
        (name = "detection", description = "Cat detection"),
        (name = "registry", description = "Registered cats"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_document_lists_every_route() {
        let doc = get_openapi_spec();
        for path in ["/upload", "/register", "/chats", "/health"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
