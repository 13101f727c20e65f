use axum::Json;

use crate::ack_response::AckResponse;

pub struct HealthController {}

impl HealthController {
    pub async fn get() -> Json<AckResponse> {
        Json(AckResponse::success("Service is up.."))
    }
}
