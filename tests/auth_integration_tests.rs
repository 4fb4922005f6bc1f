use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{Method, Request, StatusCode, Uri, header, request::Parts},
};
use chrono::Utc;
use community_portal::{
    AppConfig, AppState,
    auth::{AuthUser, Claims},
    config::Env,
    error::Result,
    models::{NewUser, User},
    repository::Repository,
};
use jsonwebtoken::{EncodingKey, Header, encode};
use std::{sync::Arc, time::SystemTime};
use uuid::Uuid;

// --- Mock Repository for Auth Logic ---

#[derive(Default)]
struct MockAuthRepo {
    user_to_return: Option<User>,
}

#[async_trait]
impl Repository for MockAuthRepo {
    async fn get_user(&self, id: Uuid) -> Option<User> {
        self.user_to_return.clone().filter(|u| u.id == id)
    }
    async fn find_user_by_email(&self, _email: &str) -> Result<Option<User>> {
        Ok(None)
    }
    async fn create_user(&self, _user: NewUser) -> Result<User> {
        Ok(User::default())
    }
    async fn count_users(&self) -> Result<i64> {
        Ok(0)
    }
}

// --- Helper Functions ---

const TEST_JWT_SECRET: &str = "test-secret-value-1234567890";
const TEST_USER_ID: Uuid = Uuid::from_u128(1);

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

fn create_token_with_secret(user_id: Uuid, exp: u64, secret: &str) -> String {
    let claims = Claims {
        sub: user_id,
        iat: now_secs() as usize,
        exp: exp as usize,
    };

    let key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), &claims, &key).unwrap()
}

fn create_token(user_id: Uuid, exp_offset: u64) -> String {
    create_token_with_secret(user_id, now_secs() + exp_offset, TEST_JWT_SECRET)
}

fn test_user(id: Uuid, role: &str, verified: bool) -> User {
    User {
        id,
        name: "Test User".to_string(),
        email: "test@example.com".to_string(),
        role: role.to_string(),
        email_verified_at: verified.then(Utc::now),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn create_app_state(env: Env, repo: MockAuthRepo) -> AppState {
    let mut config = AppConfig::default();
    config.env = env;
    config.jwt_secret = TEST_JWT_SECRET.to_string();

    AppState {
        repo: Arc::new(repo),
        config,
    }
}

fn get_request_parts(method: Method, uri: Uri) -> Parts {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap();
    let (parts, _) = request.into_parts();
    parts
}

fn with_bearer(parts: &mut Parts, token: &str) {
    parts.headers.insert(
        header::AUTHORIZATION,
        header::HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    );
}

// --- Tests ---

#[tokio::test]
async fn test_auth_success_with_valid_jwt() {
    let token = create_token(TEST_USER_ID, 3600);
    let mock_repo = MockAuthRepo {
        user_to_return: Some(test_user(TEST_USER_ID, "member", true)),
    };
    let app_state = create_app_state(Env::Production, mock_repo);

    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());
    with_bearer(&mut parts, &token);

    let user = AuthUser::from_request_parts(&mut parts, &app_state)
        .await
        .expect("valid token should authenticate");
    assert_eq!(user.id, TEST_USER_ID);
    assert_eq!(user.role, "member");
    assert!(user.verified);
    assert_eq!(user.user.email, "test@example.com");
}

#[tokio::test]
async fn test_auth_reports_unverified_user() {
    let token = create_token(TEST_USER_ID, 3600);
    let mock_repo = MockAuthRepo {
        user_to_return: Some(test_user(TEST_USER_ID, "member", false)),
    };
    let app_state = create_app_state(Env::Production, mock_repo);

    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());
    with_bearer(&mut parts, &token);

    let user = AuthUser::from_request_parts(&mut parts, &app_state)
        .await
        .unwrap();
    assert!(!user.verified);
}

#[tokio::test]
async fn test_auth_failure_with_missing_header() {
    let app_state = create_app_state(Env::Production, MockAuthRepo::default());
    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());

    let auth_user = AuthUser::from_request_parts(&mut parts, &app_state).await;

    assert_eq!(auth_user.unwrap_err(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auth_failure_without_bearer_prefix() {
    let token = create_token(TEST_USER_ID, 3600);
    let mock_repo = MockAuthRepo {
        user_to_return: Some(test_user(TEST_USER_ID, "member", true)),
    };
    let app_state = create_app_state(Env::Production, mock_repo);

    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());
    parts.headers.insert(
        header::AUTHORIZATION,
        header::HeaderValue::from_str(&token).unwrap(),
    );

    let auth_user = AuthUser::from_request_parts(&mut parts, &app_state).await;

    assert_eq!(auth_user.unwrap_err(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auth_failure_with_expired_jwt() {
    // Well past the default validation leeway.
    let token = create_token_with_secret(TEST_USER_ID, now_secs() - 3600, TEST_JWT_SECRET);
    let mock_repo = MockAuthRepo {
        user_to_return: Some(test_user(TEST_USER_ID, "member", true)),
    };
    let app_state = create_app_state(Env::Production, mock_repo);

    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());
    with_bearer(&mut parts, &token);

    let auth_user = AuthUser::from_request_parts(&mut parts, &app_state).await;

    assert_eq!(auth_user.unwrap_err(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auth_failure_with_foreign_signature() {
    let token = create_token_with_secret(TEST_USER_ID, now_secs() + 3600, "some-other-secret");
    let mock_repo = MockAuthRepo {
        user_to_return: Some(test_user(TEST_USER_ID, "member", true)),
    };
    let app_state = create_app_state(Env::Production, mock_repo);

    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());
    with_bearer(&mut parts, &token);

    let auth_user = AuthUser::from_request_parts(&mut parts, &app_state).await;

    assert_eq!(auth_user.unwrap_err(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auth_failure_when_user_no_longer_exists() {
    let token = create_token(TEST_USER_ID, 3600);
    let app_state = create_app_state(Env::Production, MockAuthRepo::default());

    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());
    with_bearer(&mut parts, &token);

    let auth_user = AuthUser::from_request_parts(&mut parts, &app_state).await;

    assert_eq!(auth_user.unwrap_err(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_local_bypass_success() {
    let mock_user_id = Uuid::new_v4();
    let mock_repo = MockAuthRepo {
        user_to_return: Some(test_user(mock_user_id, "admin", true)),
    };
    let app_state = create_app_state(Env::Local, mock_repo);

    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());
    parts.headers.insert(
        header::HeaderName::from_static("x-user-id"),
        header::HeaderValue::from_str(&mock_user_id.to_string()).unwrap(),
    );

    let user = AuthUser::from_request_parts(&mut parts, &app_state)
        .await
        .unwrap();
    assert_eq!(user.id, mock_user_id);
    assert_eq!(user.role, "admin");
}

#[tokio::test]
async fn test_local_bypass_disabled_in_prod() {
    let mock_user_id = Uuid::new_v4();
    let mock_repo = MockAuthRepo {
        user_to_return: Some(test_user(mock_user_id, "admin", true)),
    };
    let app_state = create_app_state(Env::Production, mock_repo);

    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());
    parts.headers.insert(
        header::HeaderName::from_static("x-user-id"),
        header::HeaderValue::from_str(&mock_user_id.to_string()).unwrap(),
    );

    let auth_user = AuthUser::from_request_parts(&mut parts, &app_state).await;

    assert_eq!(auth_user.unwrap_err(), StatusCode::UNAUTHORIZED);
}
