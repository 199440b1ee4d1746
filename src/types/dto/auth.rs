use poem_openapi::Object;

#[derive(Object, Debug)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Object, Debug)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Object, Debug)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    /// Seconds until the token expires
    pub expires_in: i64,
}

#[derive(Object, Debug)]
pub struct WhoAmIResponse {
    pub user_id: i64,
    pub username: String,
    pub role: String,
    pub expires_at: i64,
}
