//! Authentication gate integration tests
//!
//! Token transport (bearer header and cookie), token rejection, and the
//! session endpoints.

use axum::http::{Method, StatusCode};
use serde_json::json;
use uuid::Uuid;

use venturesroom_auth::{AuthConfig, Role, TokenIssuer};

use crate::common::{token_of, user_id_of, Credentials, TestApp, PASSWORD};

mod test_token_transport {
    use super::*;

    #[tokio::test]
    async fn test_me_with_bearer_token() {
        let app = TestApp::new().await.unwrap();
        let token = app.client("ada@client.test").await;

        let response = app.get("/auth/me", &token).await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["success"], true);
        assert_eq!(response.body["user"]["email"], "ada@client.test");
        assert_eq!(response.body["user"]["role"], "client");
        assert!(response.body["user"].get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_me_with_session_cookie() {
        let app = TestApp::new().await.unwrap();
        let token = app.client("cookie@client.test").await;

        let response = app
            .request(Method::GET, "/auth/me", Credentials::Cookie(&token), None)
            .await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["user"]["email"], "cookie@client.test");
    }

    #[tokio::test]
    async fn test_register_sets_session_cookie() {
        let app = TestApp::new().await.unwrap();

        let response = app.register("set@client.test", "client", json!({})).await;

        assert_eq!(response.status, StatusCode::CREATED);
        let cookie = response.set_cookie().expect("Set-Cookie header");
        assert!(cookie.starts_with(&format!("token={}", token_of(&response))));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
    }

    #[tokio::test]
    async fn test_logout_expires_cookie() {
        let app = TestApp::new().await.unwrap();

        let response = app
            .request(Method::POST, "/auth/logout", Credentials::Anonymous, None)
            .await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["success"], true);
        let cookie = response.set_cookie().expect("Set-Cookie header");
        assert!(cookie.starts_with("token=;"));
        assert!(cookie.contains("Max-Age=0"));
    }
}

mod test_token_rejection {
    use super::*;

    #[tokio::test]
    async fn test_missing_token() {
        let app = TestApp::new().await.unwrap();

        let response = app
            .request(Method::GET, "/auth/me", Credentials::Anonymous, None)
            .await;

        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.code(), "MISSING_TOKEN");
        assert_eq!(response.body["success"], false);
    }

    #[tokio::test]
    async fn test_garbage_token() {
        let app = TestApp::new().await.unwrap();

        let response = app.get("/auth/me", "not-a-jwt").await;

        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.code(), "INVALID_TOKEN");
    }

    #[tokio::test]
    async fn test_token_signed_with_another_secret() {
        let app = TestApp::new().await.unwrap();
        let registered = app.register("forged@client.test", "client", json!({})).await;
        let id = user_id_of(&registered);

        let forger = TokenIssuer::new(&AuthConfig::new("some-other-secret"));
        let forged = forger
            .issue(id, "forged@client.test", Role::Client)
            .unwrap();

        let response = app.get("/auth/me", &forged).await;

        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.code(), "INVALID_TOKEN");
    }

    #[tokio::test]
    async fn test_token_for_deleted_account() {
        let app = TestApp::new().await.unwrap();
        let issuer = TokenIssuer::new(&AuthConfig::from(&app.config));
        let token = issuer
            .issue(Uuid::new_v4(), "ghost@client.test", Role::Client)
            .unwrap();

        let response = app.get("/auth/me", &token).await;

        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.code(), "USER_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_token_claiming_another_role() {
        let app = TestApp::new().await.unwrap();
        let registered = app.register("climber@client.test", "client", json!({})).await;
        let id = user_id_of(&registered);

        // Correctly signed, but the stored role is client
        let issuer = TokenIssuer::new(&AuthConfig::from(&app.config));
        let token = issuer
            .issue(id, "climber@client.test", Role::Admin)
            .unwrap();

        let response = app.get("/admin/users", &token).await;

        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.code(), "INVALID_TOKEN");
    }
}

mod test_login {
    use super::*;

    #[tokio::test]
    async fn test_login_unknown_email() {
        let app = TestApp::new().await.unwrap();

        let response = app.login("nobody@client.test", PASSWORD).await;

        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.code(), "INVALID_CREDENTIALS");
        assert_eq!(response.body["error"], "Invalid email or password");
    }

    #[tokio::test]
    async fn test_unknown_email_and_wrong_password_look_identical() {
        let app = TestApp::new().await.unwrap();
        app.client("known@client.test").await;

        let known = app.login("known@client.test", "wrong-password").await;
        let unknown = app.login("unknown@client.test", "wrong-password").await;

        assert_eq!(known.status, unknown.status);
        assert_eq!(known.body, unknown.body);
        assert!(known.set_cookie().is_none());
        assert!(unknown.set_cookie().is_none());
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let app = TestApp::new().await.unwrap();
        app.client("grace@client.test").await;

        let response = app.login("grace@client.test", "wrong-password").await;

        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.code(), "INVALID_CREDENTIALS");
    }

    #[tokio::test]
    async fn test_login_is_case_insensitive_on_email() {
        let app = TestApp::new().await.unwrap();
        app.client("linus@client.test").await;

        let response = app.login("  Linus@Client.TEST ", PASSWORD).await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["user"]["email"], "linus@client.test");
        assert!(response.set_cookie().is_some());
    }

    #[tokio::test]
    async fn test_wrong_password_for_pending_account_is_not_revealed() {
        let app = TestApp::new().await.unwrap();
        app.register("quiet@startup.test", "startup", json!({}))
            .await;

        let response = app.login("quiet@startup.test", "wrong-password").await;

        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.code(), "INVALID_CREDENTIALS");
    }
}
