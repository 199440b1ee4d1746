use poem_openapi::{payload::Json, OpenApi};

use crate::types::dto::common::OkResponse;

pub struct HealthApi;

#[OpenApi(prefix_path = "/health")]
impl HealthApi {
    /// Liveness check
    #[oai(path = "/", method = "get")]
    async fn health(&self) -> Json<OkResponse> {
        Json(OkResponse::new("ok"))
    }
}
