//! Admin user-management integration tests

use axum::http::{Method, StatusCode};
use serde_json::json;
use uuid::Uuid;

use crate::common::{user_id_of, Credentials, TestApp, ADMIN_EMAIL};

mod test_admin_gate {
    use super::*;

    #[tokio::test]
    async fn test_anonymous_is_unauthenticated() {
        let app = TestApp::new().await.unwrap();

        for uri in ["/admin/users", "/admin/users/pending", "/admin/stats"] {
            let response = app
                .request(Method::GET, uri, Credentials::Anonymous, None)
                .await;
            assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_non_admins_are_forbidden() {
        let app = TestApp::new().await.unwrap();
        let client = app.client("curious@client.test").await;
        let startup = app.approved("curious@startup.test", "startup").await;

        for token in [client.as_str(), startup.token.as_str()] {
            let response = app.get("/admin/users", token).await;
            assert_eq!(response.status, StatusCode::FORBIDDEN);
            assert_eq!(response.code(), "FORBIDDEN");

            let approve = app
                .post(&format!("/admin/users/{}/approve", startup.id), token, json!({}))
                .await;
            assert_eq!(approve.status, StatusCode::FORBIDDEN);
        }

        let commissions = app.get("/admin/commissions", &client).await;
        assert_eq!(commissions.status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_seeded_admin_can_sign_in() {
        let app = TestApp::new().await.unwrap();
        let token = app.admin_token().await;

        let me = app.get("/auth/me", &token).await;

        assert_eq!(me.status, StatusCode::OK);
        assert_eq!(me.body["user"]["email"], ADMIN_EMAIL);
        assert_eq!(me.body["user"]["role"], "admin");
    }
}

mod test_user_management {
    use super::*;

    #[tokio::test]
    async fn test_list_pending_and_filter_users() {
        let app = TestApp::new().await.unwrap();
        app.client("c1@client.test").await;
        app.register("s1@startup.test", "startup", json!({})).await;
        app.register("h1@structure.test", "structure", json!({})).await;
        let admin = app.admin_token().await;

        let pending = app.get("/admin/users/pending", &admin).await;
        assert_eq!(pending.status, StatusCode::OK);
        let pending_emails: Vec<&str> = pending.body["users"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|user| user["email"].as_str())
            .collect();
        assert_eq!(pending_emails.len(), 2);
        assert!(pending_emails.contains(&"s1@startup.test"));
        assert!(pending_emails.contains(&"h1@structure.test"));

        let startups = app.get("/admin/users?role=startup", &admin).await;
        assert_eq!(startups.body["users"].as_array().map(Vec::len), Some(1));

        let approved = app.get("/admin/users?approved=true", &admin).await;
        // Seeded admin and the client
        assert_eq!(approved.body["users"].as_array().map(Vec::len), Some(2));

        let paged = app.get("/admin/users?limit=1&offset=0", &admin).await;
        assert_eq!(paged.body["users"].as_array().map(Vec::len), Some(1));

        let bogus = app.get("/admin/users?role=wizard", &admin).await;
        assert_eq!(bogus.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_user() {
        let app = TestApp::new().await.unwrap();
        let registered = app.register("look@client.test", "client", json!({})).await;
        let id = user_id_of(&registered);
        let admin = app.admin_token().await;

        let found = app.get(&format!("/admin/users/{id}"), &admin).await;
        assert_eq!(found.status, StatusCode::OK);
        assert_eq!(found.body["user"]["email"], "look@client.test");

        let missing = app
            .get(&format!("/admin/users/{}", Uuid::new_v4()), &admin)
            .await;
        assert_eq!(missing.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_stats() {
        let app = TestApp::new().await.unwrap();
        app.client("c@client.test").await;
        app.approved("s@startup.test", "startup").await;
        app.register("h@structure.test", "structure", json!({})).await;
        let admin = app.admin_token().await;

        let response = app.get("/admin/stats", &admin).await;

        assert_eq!(response.status, StatusCode::OK);
        let stats = &response.body["stats"];
        assert_eq!(stats["total"], 4);
        assert_eq!(stats["clients"], 1);
        assert_eq!(stats["startups"], 1);
        assert_eq!(stats["structures"], 1);
        assert_eq!(stats["admins"], 1);
        assert_eq!(stats["pending"], 1);
    }
}

mod test_approval_transitions {
    use super::*;

    #[tokio::test]
    async fn test_approving_twice_conflicts() {
        let app = TestApp::new().await.unwrap();
        let startup = app.approved("again@startup.test", "startup").await;
        let admin = app.admin_token().await;

        let response = app
            .post(&format!("/admin/users/{}/approve", startup.id), &admin, json!({}))
            .await;

        assert_eq!(response.status, StatusCode::CONFLICT);
        assert_eq!(response.code(), "CONFLICT");
    }

    #[tokio::test]
    async fn test_revoking_unapproved_conflicts() {
        let app = TestApp::new().await.unwrap();
        let registered = app.register("never@structure.test", "structure", json!({})).await;
        let id = user_id_of(&registered);
        let admin = app.admin_token().await;

        let response = app
            .post(&format!("/admin/users/{id}/revoke"), &admin, json!({}))
            .await;

        assert_eq!(response.status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_clients_cannot_be_revoked() {
        let app = TestApp::new().await.unwrap();
        let registered = app.register("always@client.test", "client", json!({})).await;
        let id = user_id_of(&registered);
        let admin = app.admin_token().await;

        let response = app
            .post(&format!("/admin/users/{id}/revoke"), &admin, json!({}))
            .await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_approving_unknown_user() {
        let app = TestApp::new().await.unwrap();
        let admin = app.admin_token().await;

        let response = app
            .post(
                &format!("/admin/users/{}/approve", Uuid::new_v4()),
                &admin,
                json!({}),
            )
            .await;

        assert_eq!(response.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_structure_approval_reaches_profile() {
        let app = TestApp::new().await.unwrap();
        let structure = app.approved("hub@structure.test", "structure").await;

        let directory = app
            .request(Method::GET, "/structures", Credentials::Anonymous, None)
            .await;
        assert_eq!(directory.body.as_array().map(Vec::len), Some(1));

        let profile = app.get("/structures/me", &structure.token).await;
        assert_eq!(profile.body["is_approved"], true);
    }
}
