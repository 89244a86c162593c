use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

use leptos::*;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, thiserror::Error)]
#[error("{error}")]
pub struct ApiError {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl From<ApiError> for String {
    fn from(error: ApiError) -> Self {
        error.error
    }
}

impl IntoView for ApiError {
    fn into_view(self) -> View {
        self.error.into_view()
    }
}

impl ApiError {
    fn with_code(msg: impl Into<String>, code: &str) -> Self {
        Self {
            error: msg.into(),
            code: code.to_string(),
            details: None,
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "VALIDATION_ERROR")
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "UNKNOWN")
    }

    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "REQUEST_FAILED")
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "UNAUTHORIZED")
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "NOT_FOUND")
    }

    /// Builds the client error for a non-2xx response body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let fallback_code = match status {
            400 | 422 => "VALIDATION_ERROR",
            401 => "UNAUTHORIZED",
            404 => "NOT_FOUND",
            _ => "REQUEST_FAILED",
        };
        match serde_json::from_str::<ServerErrorBody>(body) {
            Ok(parsed) => {
                let message = parsed
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| format!("Request failed with status {}", status));
                let details = if parsed.error_messages.is_empty() {
                    None
                } else {
                    let errors: Vec<String> = parsed
                        .error_messages
                        .iter()
                        .map(|item| match item.path.as_deref() {
                            Some(path) if !path.is_empty() => {
                                format!("{}: {}", path, item.message)
                            }
                            _ => item.message.clone(),
                        })
                        .collect();
                    Some(json!({ "errors": errors }))
                };
                Self {
                    error: message,
                    code: parsed.code.unwrap_or_else(|| fallback_code.to_string()),
                    details,
                }
            }
            Err(_) => Self::with_code(
                format!("Request failed with status {}", status),
                fallback_code,
            ),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.code == "UNAUTHORIZED"
    }
}

/// Error body produced by the HR API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServerErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    error_messages: Vec<ServerFieldError>,
}

#[derive(Debug, Clone, Deserialize)]
struct ServerFieldError {
    #[serde(default)]
    path: Option<String>,
    message: String,
}

/// `{ "data": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMeta {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub total_page: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListPage<T> {
    pub result: Vec<T>,
    #[serde(default)]
    pub meta: ListMeta,
}

impl<T> Default for ListPage<T> {
    fn default() -> Self {
        Self {
            result: Vec::new(),
            meta: ListMeta::default(),
        }
    }
}

impl<T> ListPage<T> {
    /// At least one page, even for an empty result.
    pub fn total_pages(&self) -> u32 {
        self.meta.total_page.max(1)
    }
}

pub const DEFAULT_PAGE_LIMIT: u32 = 10;
pub const PAGE_LIMIT_OPTIONS: [u32; 3] = [10, 20, 50];

/// Parameters of a paginated list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    pub search_term: String,
    pub filters: BTreeMap<String, String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
            search_term: String::new(),
            filters: BTreeMap::new(),
        }
    }
}

impl ListQuery {
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }

    pub fn with_limit(&self, limit: u32) -> Self {
        Self {
            page: 1,
            limit: limit.max(1),
            ..self.clone()
        }
    }

    pub fn with_search(&self, term: &str) -> Self {
        Self {
            page: 1,
            search_term: term.trim().to_string(),
            ..self.clone()
        }
    }

    /// Blank values remove the filter.
    pub fn with_filter(&self, key: &str, value: &str) -> Self {
        let mut next = self.clone();
        next.page = 1;
        if value.trim().is_empty() {
            next.filters.remove(key);
        } else {
            next.filters.insert(key.to_string(), value.trim().to_string());
        }
        next
    }

    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];
        if !self.search_term.is_empty() {
            params.push(("searchTerm".to_string(), self.search_term.clone()));
        }
        for (key, value) in &self.filters {
            params.push((key.clone(), value.clone()));
        }
        params
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    #[default]
    Active,
    Inactive,
}

impl RecordStatus {
    pub fn from_checked(checked: bool) -> Self {
        if checked {
            RecordStatus::Active
        } else {
            RecordStatus::Inactive
        }
    }

    pub fn is_active(self) -> bool {
        self == RecordStatus::Active
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RecordStatus::Active => "active",
            RecordStatus::Inactive => "inactive",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RecordStatus::Active => "Active",
            RecordStatus::Inactive => "Inactive",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Hr,
    Manager,
    Carer,
    #[serde(other)]
    Staff,
}

impl Role {
    pub fn is_back_office(self) -> bool {
        matches!(self, Role::Admin | Role::Hr | Role::Manager)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Hr => "hr",
            Role::Manager => "manager",
            Role::Carer => "carer",
            Role::Staff => "staff",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::Hr => "HR",
            Role::Manager => "Manager",
            Role::Carer => "Carer",
            Role::Staff => "Staff",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub department_id: Option<String>,
    #[serde(default)]
    pub designation_id: Option<String>,
}

impl UserResponse {
    pub fn initials(&self) -> String {
        initials_of(&self.name)
    }
}

/// First letter of the first and last word, upper-cased.
pub fn initials_of(name: &str) -> String {
    let words: Vec<&str> = name.split_whitespace().collect();
    let pick = |word: Option<&&str>| {
        word.and_then(|w| w.chars().next())
            .map(|c| c.to_uppercase().collect::<String>())
            .unwrap_or_default()
    };
    match words.len() {
        0 => String::new(),
        1 => pick(words.first()),
        _ => format!("{}{}", pick(words.first()), pick(words.last())),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub user: UserResponse,
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use leptos::IntoView;

    #[test]
    fn api_error_helpers_set_expected_codes() {
        assert_eq!(ApiError::validation("bad").code, "VALIDATION_ERROR");
        assert_eq!(ApiError::unknown("x").code, "UNKNOWN");
        assert_eq!(ApiError::request_failed("x").code, "REQUEST_FAILED");
        assert!(ApiError::unauthorized("x").is_unauthorized());
    }

    #[test]
    fn api_error_display_and_string_conversion_match_error_text() {
        let error = ApiError::unknown("boom");
        assert_eq!(format!("{}", error), "boom");
        let raw: String = ApiError::validation("bad input").into();
        assert_eq!(raw, "bad input");
    }

    #[test]
    fn api_error_can_be_converted_to_view() {
        let _: View = ApiError::request_failed("request failed").into_view();
    }

    #[test]
    fn from_response_collects_field_messages() {
        let body = r#"{
            "success": false,
            "message": "Validation Error",
            "errorMessages": [
                { "path": "name", "message": "Name is required" },
                { "path": "", "message": "Bad payload" }
            ]
        }"#;
        let error = ApiError::from_response(400, body);
        assert_eq!(error.error, "Validation Error");
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert_eq!(
            error.details,
            Some(json!({ "errors": ["name: Name is required", "Bad payload"] }))
        );
    }

    #[test]
    fn from_response_handles_unparseable_bodies() {
        let error = ApiError::from_response(502, "<html>bad gateway</html>");
        assert_eq!(error.code, "REQUEST_FAILED");
        assert!(error.error.contains("502"));
        assert!(ApiError::from_response(401, "").is_unauthorized());
    }
}
