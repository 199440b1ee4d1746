use poem_openapi::Object;

/// Generic acknowledgement payload
#[derive(Object, Debug)]
pub struct OkResponse {
    pub message: String,
}

impl OkResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Single counter payload for the admin dashboards
#[derive(Object, Debug)]
pub struct CountResponse {
    pub count: u64,
}
