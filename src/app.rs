use std::net::SocketAddr;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{accounts, state::AppState};

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .nest(
            "/api/v1",
            Router::new()
                .merge(accounts::router())
                .route("/health", get(|| async { "ok" })),
        )
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!("http_request", %method, uri = %uri, status = tracing::field::Empty)
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     _latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        if status.is_server_error() {
                            tracing::error!(%status, "response");
                        } else {
                            tracing::info!(%status, "response");
                        }
                    },
                ),
        )
}

pub async fn serve(app: Router, host: &str, port: u16) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{host}:{port}").parse()?;

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use time::OffsetDateTime;
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::{
        accounts::{
            repo::testing::InMemoryAccountStore,
            repo_types::{AccountRow, AccountStatus},
        },
        auth::{credentials::testing::PlainCredentials, jwt::JwtKeys},
        config::AppConfig,
    };

    struct TestApp {
        app: Router,
        keys: JwtKeys,
        store: Arc<InMemoryAccountStore>,
    }

    fn test_app() -> TestApp {
        let config = AppConfig::for_tests();
        let keys = JwtKeys::from(&config.jwt);
        let store = Arc::new(InMemoryAccountStore::default());
        let state = AppState::from_parts(
            keys.clone(),
            store.clone(),
            Arc::new(PlainCredentials { keys: keys.clone() }),
        );
        TestApp {
            app: build_app(state),
            keys,
            store,
        }
    }

    impl TestApp {
        async fn call(
            &self,
            method: Method,
            uri: &str,
            token: Option<&str>,
            body: Option<Value>,
        ) -> (StatusCode, Value) {
            let mut req = Request::builder().method(method).uri(uri);
            if let Some(t) = token {
                req = req.header(header::AUTHORIZATION, format!("Bearer {t}"));
            }
            let req = match body {
                Some(b) => req
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(b.to_string()))
                    .unwrap(),
                None => req.body(Body::empty()).unwrap(),
            };
            let res = self.app.clone().oneshot(req).await.unwrap();
            let status = res.status();
            let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
                .await
                .unwrap();
            let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
            (status, value)
        }

        async fn signup(&self, email: &str) -> (Uuid, String) {
            let (status, body) = self
                .call(Method::POST, "/api/v1/signup", None, Some(signup_body(email)))
                .await;
            assert_eq!(status, StatusCode::CREATED, "{body}");
            let id = body["data"]["id"].as_str().unwrap().parse().unwrap();
            (id, body["token"].as_str().unwrap().to_owned())
        }

        fn admin_token(&self) -> String {
            let now = OffsetDateTime::now_utc();
            let id = Uuid::new_v4();
            self.store.seed(AccountRow {
                id,
                email: "root@x.com".into(),
                first_name: "Root".into(),
                last_name: "Admin".into(),
                address: "HQ".into(),
                password_hash: "plain$adminpass".into(),
                status: AccountStatus::Active,
                is_admin: true,
                created_on: now,
                modified_on: now,
            });
            self.keys.sign(id, "root@x.com", true).unwrap()
        }
    }

    fn signup_body(email: &str) -> Value {
        json!({
            "email": email,
            "password": "pw123456",
            "firstName": "A",
            "lastName": "B",
            "address": "Addr"
        })
    }

    #[tokio::test]
    async fn health_is_ok() {
        let t = test_app();
        let res = t
            .app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn signup_returns_record_and_token_without_password() {
        let t = test_app();
        let (status, body) = t
            .call(Method::POST, "/api/v1/signup", None, Some(signup_body("a@x.com")))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(body["token"].is_string());
        let data = &body["data"];
        assert_eq!(data["status"], "pending");
        assert_eq!(data["isAdmin"], false);
        assert_eq!(data["email"], "a@x.com");
        assert_eq!(data["firstName"], "A");
        assert!(data.get("password").is_none());
        assert!(data.get("passwordHash").is_none());
        assert!(data["createdOn"].is_string());
    }

    #[tokio::test]
    async fn duplicate_signup_is_409() {
        let t = test_app();
        t.signup("a@x.com").await;
        let (status, body) = t
            .call(Method::POST, "/api/v1/signup", None, Some(signup_body("a@x.com")))
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "User already exist");
    }

    #[tokio::test]
    async fn signup_with_invalid_payload_is_400() {
        let t = test_app();
        let (status, body) = t
            .call(
                Method::POST,
                "/api/v1/signup",
                None,
                Some(json!({ "email": "a@x.com", "password": "pw123456" })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "firstName is required");
    }

    #[tokio::test]
    async fn malformed_json_is_400() {
        let t = test_app();
        let req = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/signup")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let res = t.app.clone().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn login_flow() {
        let t = test_app();
        let (id, _) = t.signup("a@x.com").await;

        let (status, body) = t
            .call(
                Method::POST,
                "/api/v1/login",
                None,
                Some(json!({ "email": "a@x.com", "password": "pw123456" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["message"], "Logged in successfully");
        let token = body["data"][0]["token"].as_str().unwrap();
        assert_eq!(t.keys.verify(token).unwrap().sub, id);

        let (status, body) = t
            .call(
                Method::POST,
                "/api/v1/login",
                None,
                Some(json!({ "email": "a@x.com", "password": "wrongpass" })),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Email/Password incorrect");
        assert!(body.get("token").is_none());

        let (status, _) = t
            .call(
                Method::POST,
                "/api/v1/login",
                None,
                Some(json!({ "email": "ghost@x.com", "password": "pw123456" })),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn protected_routes_need_bearer_token() {
        let t = test_app();
        let (status, body) = t.call(Method::GET, "/api/v1/users", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Missing Authorization header");

        let (status, _) = t
            .call(Method::GET, "/api/v1/users", Some("garbage"), None)
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn list_is_admin_only() {
        let t = test_app();
        let (_, user_token) = t.signup("a@x.com").await;
        t.signup("b@x.com").await;

        let (status, body) = t
            .call(Method::GET, "/api/v1/users", Some(&user_token), None)
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "Unauthorized!, Admin only route");

        let admin = t.admin_token();
        let (status, body) = t.call(Method::GET, "/api/v1/users", Some(&admin), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["rowCount"], 3);
        let rows = body["data"][0]["rows"].as_array().unwrap();
        assert!(rows.iter().all(|r| r.get("passwordHash").is_none()));
    }

    #[tokio::test]
    async fn get_one_respects_ownership() {
        let t = test_app();
        let (a_id, a_token) = t.signup("a@x.com").await;
        let (b_id, _) = t.signup("b@x.com").await;

        let (status, body) = t
            .call(Method::GET, &format!("/api/v1/users/{a_id}"), Some(&a_token), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["rows"][0]["email"], "a@x.com");

        let (status, _) = t
            .call(Method::GET, &format!("/api/v1/users/{b_id}"), Some(&a_token), None)
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let admin = t.admin_token();
        let (status, _) = t
            .call(Method::GET, &format!("/api/v1/users/{b_id}"), Some(&admin), None)
            .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = t
            .call(
                Method::GET,
                &format!("/api/v1/users/{}", Uuid::new_v4()),
                Some(&admin),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = t
            .call(Method::GET, "/api/v1/users/not-a-uuid", Some(&admin), None)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn patch_updates_own_profile() {
        let t = test_app();
        let (id, token) = t.signup("a@x.com").await;
        let (status, body) = t
            .call(
                Method::PATCH,
                "/api/v1/users",
                Some(&token),
                Some(json!({ "firstName": "Ada", "lastName": "Lovelace", "address": "London" })),
            )
            .await;
        assert_eq!(status, StatusCode::ACCEPTED);
        let row = &body["data"][0]["rows"][0];
        assert_eq!(row["id"], id.to_string());
        assert_eq!(row["firstName"], "Ada");
        assert!(row["modifiedOn"].is_string());
    }

    #[tokio::test]
    async fn delete_is_admin_only_and_reports_missing() {
        let t = test_app();
        let (id, token) = t.signup("a@x.com").await;
        let uri = format!("/api/v1/users/{id}");

        let (status, _) = t.call(Method::DELETE, &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let admin = t.admin_token();
        let (status, body) = t.call(Method::DELETE, &uri, Some(&admin), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["rows"][0]["email"], "a@x.com");
        assert!(body["data"][0]["rows"][0].get("passwordHash").is_none());

        let (status, body) = t.call(Method::DELETE, &uri, Some(&admin), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Not Found");
    }
}
