use super::{
    client::ApiClient,
    records::Employee,
    types::{ApiError, LoginRequest, LoginResponse, Role, UserResponse},
};

impl ApiClient {
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.post_json("/auth/login", request).await
    }

    pub async fn get_user(&self, id: &str) -> Result<UserResponse, ApiError> {
        self.get_json(&format!("/users/{}", id), &[]).await
    }

    /// `/users` filtered by role; used to pick carers for planner visits.
    pub async fn list_users_by_role(&self, role: Role) -> Result<Vec<Employee>, ApiError> {
        let params = vec![("role".to_string(), role.as_str().to_string())];
        self.get_json("/users", &params).await
    }
}
