//! Registration, approval workflow, and self-service integration tests

use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::common::{token_of, user_id_of, Credentials, TestApp, PASSWORD};

mod test_registration {
    use super::*;

    #[tokio::test]
    async fn test_client_registration_is_approved() {
        let app = TestApp::new().await.unwrap();

        let response = app
            .register("Client@Example.com", "client", json!({ "full_name": "  Ada   Lovelace " }))
            .await;

        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(response.body["success"], true);
        assert_eq!(response.body["message"], "User registered successfully");
        assert_eq!(response.body["user"]["email"], "client@example.com");
        assert_eq!(response.body["user"]["full_name"], "Ada Lovelace");
        assert_eq!(response.body["user"]["is_approved"], true);
        assert!(response.body["token"].is_string());
    }

    #[tokio::test]
    async fn test_role_defaults_to_client() {
        let app = TestApp::new().await.unwrap();

        let response = app
            .request(
                Method::POST,
                "/auth/register",
                Credentials::Anonymous,
                Some(json!({ "email": "plain@example.com", "password": PASSWORD })),
            )
            .await;

        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(response.body["user"]["role"], "client");
    }

    #[tokio::test]
    async fn test_startup_registration_creates_pending_profile() {
        let app = TestApp::new().await.unwrap();

        let response = app
            .register(
                "founder@acme.test",
                "startup",
                json!({ "company_name": "Acme", "sector": "fintech" }),
            )
            .await;

        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(response.body["user"]["is_approved"], false);
        assert_eq!(
            response.body["message"],
            "Registration successful. Your account is pending approval."
        );

        // The registration token may read its own pending profile
        let token = token_of(&response);
        let profile = app.get("/startups/me", &token).await;
        assert_eq!(profile.status, StatusCode::OK);
        assert_eq!(profile.body["name"], "Acme");
        assert_eq!(profile.body["sector"], "fintech");
        assert_eq!(profile.body["is_approved"], false);

        // Pending startups stay out of the public directory
        let directory = app
            .request(Method::GET, "/startups", Credentials::Anonymous, None)
            .await;
        assert_eq!(directory.status, StatusCode::OK);
        assert_eq!(directory.body, json!([]));
    }

    #[tokio::test]
    async fn test_structure_profile_name_falls_back_to_full_name() {
        let app = TestApp::new().await.unwrap();

        let response = app
            .register(
                "hub@incubator.test",
                "structure",
                json!({ "full_name": "Station Hub", "structure_type": "incubator" }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);

        let profile = app.get("/structures/me", &token_of(&response)).await;
        assert_eq!(profile.status, StatusCode::OK);
        assert_eq!(profile.body["name"], "Station Hub");
        assert_eq!(profile.body["structure_type"], "incubator");
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let app = TestApp::new().await.unwrap();
        app.client("twice@example.com").await;

        let response = app.register("TWICE@example.com", "startup", json!({})).await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.code(), "DUPLICATE_EMAIL");
    }

    #[tokio::test]
    async fn test_admin_role_cannot_self_register() {
        let app = TestApp::new().await.unwrap();

        let response = app.register("sneaky@example.com", "admin", json!({})).await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.code(), "VALIDATION_ERROR");
        assert_eq!(response.body["details"][0]["field"], "role");
    }

    #[tokio::test]
    async fn test_registration_payload_validation() {
        let app = TestApp::new().await.unwrap();

        let short = app
            .request(
                Method::POST,
                "/auth/register",
                Credentials::Anonymous,
                Some(json!({ "email": "short@example.com", "password": "12345" })),
            )
            .await;
        assert_eq!(short.status, StatusCode::BAD_REQUEST);

        let bad_email = app
            .request(
                Method::POST,
                "/auth/register",
                Credentials::Anonymous,
                Some(json!({ "email": "not-an-email", "password": PASSWORD })),
            )
            .await;
        assert_eq!(bad_email.status, StatusCode::BAD_REQUEST);
    }
}

mod test_approval_workflow {
    use super::*;

    #[tokio::test]
    async fn test_startup_pending_then_approved() {
        let app = TestApp::new().await.unwrap();
        let registered = app
            .register("pending@startup.test", "startup", json!({ "company_name": "Pending" }))
            .await;
        let id = user_id_of(&registered);

        let blocked = app.login("pending@startup.test", PASSWORD).await;
        assert_eq!(blocked.status, StatusCode::FORBIDDEN);
        assert_eq!(blocked.code(), "PENDING_APPROVAL");

        let admin = app.admin_token().await;
        let approval = app
            .post(&format!("/admin/users/{id}/approve"), &admin, json!({}))
            .await;
        assert_eq!(approval.status, StatusCode::OK);
        assert_eq!(approval.body["user"]["is_approved"], true);

        let login = app.login("pending@startup.test", PASSWORD).await;
        assert_eq!(login.status, StatusCode::OK);
        assert_eq!(login.body["message"], "Login successful");

        // The profile follows the account and joins the directory
        let directory = app
            .request(Method::GET, "/startups", Credentials::Anonymous, None)
            .await;
        assert_eq!(directory.body.as_array().map(Vec::len), Some(1));
        assert_eq!(directory.body[0]["name"], "Pending");
        assert_eq!(directory.body[0]["is_approved"], true);
    }

    #[tokio::test]
    async fn test_revoked_startup_loses_access_with_live_token() {
        let app = TestApp::new().await.unwrap();
        let startup = app.approved("revoked@startup.test", "startup").await;

        let before = app
            .post(
                "/products",
                &startup.token,
                json!({ "name": "Widget", "price_cents": 1000 }),
            )
            .await;
        assert_eq!(before.status, StatusCode::CREATED);

        let admin = app.admin_token().await;
        let revoke = app
            .post(&format!("/admin/users/{}/revoke", startup.id), &admin, json!({}))
            .await;
        assert_eq!(revoke.status, StatusCode::OK);
        assert_eq!(revoke.body["user"]["is_approved"], false);

        // The token is still well-formed, but approval is read fresh
        let after = app
            .post(
                "/products",
                &startup.token,
                json!({ "name": "Gadget", "price_cents": 1000 }),
            )
            .await;
        assert_eq!(after.status, StatusCode::FORBIDDEN);
        assert_eq!(after.code(), "PENDING_APPROVAL");

        let login = app.login("revoked@startup.test", PASSWORD).await;
        assert_eq!(login.status, StatusCode::FORBIDDEN);

        // Its catalogue disappears from public view
        let catalogue = app
            .request(Method::GET, "/products", Credentials::Anonymous, None)
            .await;
        assert_eq!(catalogue.body, json!([]));
    }
}

mod test_revoked_startup_orders {
    use super::*;

    #[tokio::test]
    async fn test_revoked_startup_cannot_read_orders() {
        let app = TestApp::new().await.unwrap();
        let startup = app.approved("sold@startup.test", "startup").await;
        let product = app
            .post(
                "/products",
                &startup.token,
                json!({ "name": "Widget", "price_cents": 100 }),
            )
            .await;
        let client = app.client("buyer@client.test").await;
        let order = app
            .post(
                "/orders",
                &client,
                json!({ "product_id": product.body["id"], "quantity": 1 }),
            )
            .await;
        assert_eq!(order.status, StatusCode::CREATED);
        let order_uri = format!("/orders/{}", order.body["id"].as_str().unwrap());

        assert_eq!(app.get("/orders", &startup.token).await.status, StatusCode::OK);

        let admin = app.admin_token().await;
        let revoke = app
            .post(&format!("/admin/users/{}/revoke", startup.id), &admin, json!({}))
            .await;
        assert_eq!(revoke.status, StatusCode::OK);

        let list = app.get("/orders", &startup.token).await;
        assert_eq!(list.status, StatusCode::FORBIDDEN);
        assert_eq!(list.code(), "PENDING_APPROVAL");

        let single = app.get(&order_uri, &startup.token).await;
        assert_eq!(single.status, StatusCode::FORBIDDEN);
        assert_eq!(single.code(), "PENDING_APPROVAL");

        // The buyer is unaffected
        assert_eq!(app.get(&order_uri, &client).await.status, StatusCode::OK);
    }
}

mod test_role_gates {
    use super::*;

    #[tokio::test]
    async fn test_client_on_startup_route_is_forbidden() {
        let app = TestApp::new().await.unwrap();
        let token = app.client("shopper@client.test").await;

        let response = app.get("/startups/me", &token).await;

        assert_eq!(response.status, StatusCode::FORBIDDEN);
        assert_eq!(response.code(), "FORBIDDEN");
        assert_eq!(response.body["error"], "Insufficient permissions");
    }

    #[tokio::test]
    async fn test_startup_cannot_place_orders() {
        let app = TestApp::new().await.unwrap();
        let startup = app.approved("seller@startup.test", "startup").await;

        let response = app
            .post(
                "/orders",
                &startup.token,
                json!({ "product_id": uuid::Uuid::new_v4(), "quantity": 1 }),
            )
            .await;

        assert_eq!(response.status, StatusCode::FORBIDDEN);
        assert_eq!(response.code(), "FORBIDDEN");
    }
}

mod test_self_service {
    use super::*;

    #[tokio::test]
    async fn test_update_own_full_name() {
        let app = TestApp::new().await.unwrap();
        let token = app.client("rename@client.test").await;

        let response = app
            .patch("/users/me", &token, json!({ "full_name": " Grace  Hopper " }))
            .await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["user"]["full_name"], "Grace Hopper");

        let me = app.get("/auth/me", &token).await;
        assert_eq!(me.body["user"]["full_name"], "Grace Hopper");
    }

    #[tokio::test]
    async fn test_update_own_startup_profile() {
        let app = TestApp::new().await.unwrap();
        let startup = app.approved("profile@startup.test", "startup").await;

        let response = app
            .patch(
                "/startups/me",
                &startup.token,
                json!({ "sector": "climate", "stage": "seed" }),
            )
            .await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["sector"], "climate");
        assert_eq!(response.body["stage"], "seed");

        let filtered = app
            .request(
                Method::GET,
                "/startups?sector=climate",
                Credentials::Anonymous,
                None,
            )
            .await;
        assert_eq!(filtered.body.as_array().map(Vec::len), Some(1));

        let other = app
            .request(
                Method::GET,
                "/startups?sector=biotech",
                Credentials::Anonymous,
                None,
            )
            .await;
        assert_eq!(other.body, json!([]));
    }
}
