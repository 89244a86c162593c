use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use leptos::*;
use serde::Deserialize;

use crate::{
    api::{ApiClient, ApiError, LoginRequest, Role, UserResponse, ACCESS_TOKEN_KEY, CURRENT_USER_KEY},
    utils::{browser, storage},
};

pub type SessionContext = (ReadSignal<SessionState>, WriteSignal<SessionState>);

#[derive(Debug, Clone, PartialEq)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub initials: String,
}

impl From<UserResponse> for SessionUser {
    fn from(user: UserResponse) -> Self {
        let initials = user.initials();
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            initials,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub user: Option<SessionUser>,
    pub is_authenticated: bool,
    pub loading: bool,
}

impl SessionState {
    pub fn signed_in(user: SessionUser) -> Self {
        Self {
            user: Some(user),
            is_authenticated: true,
            loading: false,
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }
}

/// The part of the access token payload the app reads.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenClaims {
    #[serde(alias = "id", alias = "sub")]
    pub user_id: String,
    #[serde(default)]
    pub exp: Option<i64>,
}

impl TokenClaims {
    pub fn is_expired(&self, now_secs: i64) -> bool {
        self.exp.map(|exp| exp <= now_secs).unwrap_or(false)
    }
}

pub fn decode_claims(token: &str) -> Option<TokenClaims> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    serde_json::from_slice(&bytes).ok()
}

fn now_secs() -> i64 {
    chrono::Utc::now().timestamp()
}

fn stored_user() -> Option<SessionUser> {
    storage::get_item(CURRENT_USER_KEY)
        .and_then(|raw| serde_json::from_str::<UserResponse>(&raw).ok())
        .map(SessionUser::from)
}

fn persist(token: &str, user: &UserResponse) -> Result<(), ApiError> {
    storage::set_item(ACCESS_TOKEN_KEY, token).map_err(ApiError::unknown)?;
    let user_json = serde_json::to_string(user)
        .map_err(|e| ApiError::unknown(format!("Failed to store user: {}", e)))?;
    storage::set_item(CURRENT_USER_KEY, &user_json).map_err(ApiError::unknown)
}

/// Rebuilds the session from the stored token, if it is still valid.
pub async fn restore_session(api: &ApiClient, now: i64) -> Option<SessionUser> {
    let token = storage::get_item(ACCESS_TOKEN_KEY)?;
    let claims = match decode_claims(&token) {
        Some(claims) if !claims.is_expired(now) => claims,
        _ => {
            log::info!("stored access token is missing claims or expired");
            ApiClient::clear_auth_session();
            return None;
        }
    };
    match api.get_user(&claims.user_id).await {
        Ok(user) => Some(user.into()),
        Err(err) if err.is_unauthorized() => None,
        Err(err) => {
            log::warn!("could not refresh user {}: {}", claims.user_id, err);
            stored_user()
        }
    }
}

fn create_session_context() -> SessionContext {
    let (state, set_state) = create_signal(SessionState {
        loading: true,
        ..SessionState::default()
    });

    #[cfg(target_arch = "wasm32")]
    {
        let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
        spawn_local(async move {
            let restored = restore_session(&api, now_secs()).await;
            set_state.set(match restored {
                Some(user) => SessionState::signed_in(user),
                None => SessionState::anonymous(),
            });
        });
    }
    #[cfg(not(target_arch = "wasm32"))]
    set_state.set(match stored_user() {
        Some(user) if token_is_live(now_secs()) => SessionState::signed_in(user),
        _ => SessionState::anonymous(),
    });

    (state, set_state)
}

#[cfg(not(target_arch = "wasm32"))]
fn token_is_live(now: i64) -> bool {
    storage::get_item(ACCESS_TOKEN_KEY)
        .and_then(|token| decode_claims(&token))
        .map(|claims| !claims.is_expired(now))
        .unwrap_or(false)
}

#[component]
pub fn SessionProvider(children: Children) -> impl IntoView {
    let ctx = create_session_context();
    provide_context::<SessionContext>(ctx);
    view! { <>{children()}</> }
}

pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().unwrap_or_else(|| create_signal(SessionState::default()))
}

pub async fn login_request(
    request: LoginRequest,
    api: &ApiClient,
    set_state: WriteSignal<SessionState>,
) -> Result<SessionUser, ApiError> {
    set_state.update(|state| state.loading = true);
    let result = async {
        let response = api.login(&request).await?;
        persist(&response.access_token, &response.user)?;
        Ok::<_, ApiError>(SessionUser::from(response.user))
    }
    .await;

    match result {
        Ok(user) => {
            log::info!("signed in as {}", user.email);
            set_state.set(SessionState::signed_in(user.clone()));
            Ok(user)
        }
        Err(err) => {
            set_state.update(|state| state.loading = false);
            Err(err)
        }
    }
}

pub fn logout(set_state: WriteSignal<SessionState>) {
    ApiClient::clear_auth_session();
    set_state.set(SessionState::anonymous());
    browser::navigate_to(crate::router::LOGIN_PATH);
}

pub fn use_login_action() -> Action<LoginRequest, Result<SessionUser, ApiError>> {
    let (_session, set_session) = use_session();
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);

    create_action(move |request: &LoginRequest| {
        let payload = request.clone();
        let api = api.clone();
        async move { login_request(payload, &api, set_session).await }
    })
}

pub fn use_logout() -> Callback<()> {
    let (_session, set_session) = use_session();
    Callback::new(move |_| logout(set_session))
}

#[cfg(test)]
mod tests {
    use super::*;
    use leptos::create_runtime;

    pub(crate) fn token_with(payload: &str) -> String {
        format!("eyJhbGciOiJIUzI1NiJ9.{}.sig", URL_SAFE_NO_PAD.encode(payload))
    }

    #[test]
    fn use_session_returns_default_without_context() {
        let runtime = create_runtime();
        let (state, _set_state) = use_session();
        let snapshot = state.get();
        assert!(!snapshot.is_authenticated);
        assert!(snapshot.user.is_none());
        runtime.dispose();
    }

    #[test]
    fn decode_claims_reads_user_id_and_expiry() {
        let token = token_with(r#"{"userId":"u1","role":"hr","exp":1700000000}"#);
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.user_id, "u1");
        assert!(claims.is_expired(1700000000));
        assert!(!claims.is_expired(1699999999));
    }

    #[test]
    fn decode_claims_rejects_garbage() {
        assert!(decode_claims("not-a-token").is_none());
        assert!(decode_claims("a.!!!.c").is_none());
    }

    #[test]
    fn claims_without_exp_never_expire() {
        let token = token_with(r#"{"id":"u9"}"#);
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.user_id, "u9");
        assert!(!claims.is_expired(i64::MAX));
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::tests::token_with;
    use super::*;
    use crate::api::test_support::mock::*;
    use serde_json::json;

    fn user_json() -> serde_json::Value {
        json!({ "id": "u1", "name": "Grace Hopper", "email": "grace@example.com", "role": "admin" })
    }

    #[tokio::test]
    async fn login_persists_session_and_logout_clears_it() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/v1/auth/login");
            then.status(200).json_body(json!({
                "data": { "accessToken": "header.payload.sig", "user": user_json() }
            }));
        });

        let runtime = create_runtime();
        let (state, set_state) = create_signal(SessionState::default());
        let api = ApiClient::new_with_base_url(server.url("/api/v1"));

        let user = login_request(
            LoginRequest {
                email: "grace@example.com".into(),
                password: "secret".into(),
            },
            &api,
            set_state,
        )
        .await
        .unwrap();

        assert_eq!(user.initials, "GH");
        assert!(state.get().is_authenticated);
        assert_eq!(
            storage::get_item(ACCESS_TOKEN_KEY).as_deref(),
            Some("header.payload.sig")
        );

        logout(set_state);
        assert!(!state.get().is_authenticated);
        assert!(storage::get_item(ACCESS_TOKEN_KEY).is_none());
        runtime.dispose();
    }

    #[tokio::test]
    async fn failed_login_keeps_session_anonymous() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/v1/auth/login");
            then.status(401).json_body(json!({ "message": "Invalid credentials" }));
        });

        let runtime = create_runtime();
        let (state, set_state) = create_signal(SessionState::default());
        let api = ApiClient::new_with_base_url(server.url("/api/v1"));
        let err = login_request(
            LoginRequest {
                email: "x@example.com".into(),
                password: "bad".into(),
            },
            &api,
            set_state,
        )
        .await
        .unwrap_err();

        assert_eq!(err.error, "Invalid credentials");
        let snapshot = state.get();
        assert!(!snapshot.is_authenticated);
        assert!(!snapshot.loading);
        runtime.dispose();
    }

    #[tokio::test]
    async fn restore_session_fetches_the_token_owner() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/v1/users/u1");
            then.status(200).json_body(json!({ "data": user_json() }));
        });
        storage::set_item(ACCESS_TOKEN_KEY, &token_with(r#"{"userId":"u1","exp":2000}"#)).unwrap();

        let api = ApiClient::new_with_base_url(server.url("/api/v1"));
        let user = restore_session(&api, 1000).await.unwrap();
        assert_eq!(user.role, Role::Admin);
        assert_eq!(server.hits(GET, "/api/v1/users/u1"), 1);
        storage::remove_item(ACCESS_TOKEN_KEY);
    }

    #[tokio::test]
    async fn restore_session_drops_expired_tokens_without_calling_the_api() {
        let server = MockServer::start_async().await;
        storage::set_item(ACCESS_TOKEN_KEY, &token_with(r#"{"userId":"u1","exp":10}"#)).unwrap();

        let api = ApiClient::new_with_base_url(server.url("/api/v1"));
        assert!(restore_session(&api, 1000).await.is_none());
        assert!(server.requests().is_empty());
        assert!(storage::get_item(ACCESS_TOKEN_KEY).is_none());
    }
}
