use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    adapters::{
        controllers::{
            auth_controller::AuthController, file_controller::FileController,
            folder_controller::FolderController, health_controller::HealthController,
            share_controller::ShareController,
        },
        middleware::require_session,
        state::AppState,
    },
    domain::config::limits::MIB,
};

pub fn build_router(app_state: AppState, cors: CorsLayer) -> Router {
    // Room for the multipart envelope on top of a maximum-size file.
    let upload_body_limit = (app_state.files.limits().max_upload_size + MIB) as usize;

    // Routes that require a session cookie
    let protected_routes = Router::new()
        .route("/api/auth/me", get(AuthController::me))
        .route(
            "/api/folders",
            get(FolderController::list_folders).post(FolderController::create_folder),
        )
        .route(
            "/api/folders/{folder_id}",
            get(FolderController::get_folder)
                .put(FolderController::rename_folder)
                .delete(FolderController::delete_folder),
        )
        .route(
            "/api/files/upload",
            post(FileController::upload_file).layer(DefaultBodyLimit::max(upload_body_limit)),
        )
        .route("/api/files", get(FileController::list_files))
        .route(
            "/api/files/{file_id}",
            get(FileController::get_file).delete(FileController::delete_file),
        )
        .route("/api/storage/stats", get(FileController::storage_stats))
        .route(
            "/api/share/folder/{folder_id}",
            post(ShareController::create_share_link),
        )
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            require_session,
        ));

    // Public routes
    let public_routes = Router::new()
        .route("/api/health", get(HealthController::health_check))
        .route("/api/auth/signup", post(AuthController::signup))
        .route("/api/auth/login", post(AuthController::login))
        .route("/api/auth/logout", post(AuthController::logout))
        .route(
            "/api/share/{share_id}",
            get(ShareController::get_shared_folder),
        );

    Router::new()
        .merge(protected_routes)
        .merge(public_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Request, Response, StatusCode},
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::{
        adapters::repositories::MemorySessionRepository,
        application::{
            services::{CredentialService, FileService, FolderService, ShareService},
            testing::{FakeStorage, InMemoryStore},
        },
        domain::config::StorageLimits,
    };

    const BOUNDARY: &str = "test-boundary";

    fn app() -> Router {
        let store = Arc::new(InMemoryStore::default());
        let storage = Arc::new(FakeStorage::default());
        let state = AppState {
            credentials: Arc::new(CredentialService::new(
                store.clone(),
                Arc::new(MemorySessionRepository::new()),
                "router-secret",
            )),
            folders: Arc::new(FolderService::new(
                store.clone(),
                store.clone(),
                storage.clone(),
            )),
            files: Arc::new(FileService::new(
                store.clone(),
                store.clone(),
                storage,
                StorageLimits::default(),
            )),
            shares: Arc::new(ShareService::new(
                store.clone(),
                store.clone(),
                store,
                "http://frontend.test",
            )),
        };
        build_router(state, CorsLayer::new())
    }

    fn json_request(method: &str, uri: &str, cookie: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn upload_request(cookie: &str, filename: &str, content: &[u8]) -> Request<Body> {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: text/plain\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/api/files/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .header(header::COOKIE, cookie)
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_json(response: Response<Body>) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    /// Signs up and logs in, returning the `token=...` pair for the Cookie header.
    async fn login(app: &Router, email: &str) -> String {
        let signup = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/auth/signup",
                None,
                json!({"name": "Ada", "email": email, "password": "pw-123456"}),
            ))
            .await
            .unwrap();
        assert_eq!(signup.status(), StatusCode::CREATED);

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/auth/login",
                None,
                json!({"email": email, "password": "pw-123456"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(set_cookie.contains("HttpOnly"));
        assert!(set_cookie.contains("SameSite=None"));
        set_cookie.split(';').next().unwrap().to_string()
    }

    #[tokio::test]
    async fn health_is_public() {
        let response = app()
            .oneshot(get_request("/api/health", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn protected_routes_need_a_session() {
        let app = app();
        for uri in ["/api/auth/me", "/api/folders", "/api/files", "/api/storage/stats"] {
            let response = app.clone().oneshot(get_request(uri, None)).await.unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
            let body = body_json(response).await;
            assert_eq!(body["success"], false);
        }

        let forged = app
            .oneshot(get_request("/api/auth/me", Some("token=not-a-jwt")))
            .await
            .unwrap();
        assert_eq!(forged.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn login_me_logout_flow() {
        let app = app();
        let cookie = login(&app, "ada@example.com").await;

        let me = app
            .clone()
            .oneshot(get_request("/api/auth/me", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(me.status(), StatusCode::OK);
        let body = body_json(me).await;
        assert_eq!(body["user"]["email"], "ada@example.com");
        assert!(body["user"].get("password_hash").is_none());

        let logout = app
            .clone()
            .oneshot(json_request("POST", "/api/auth/logout", Some(&cookie), json!({})))
            .await
            .unwrap();
        assert_eq!(logout.status(), StatusCode::OK);

        let replay = app
            .oneshot(get_request("/api/auth/me", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(replay.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn duplicate_signup_is_conflict() {
        let app = app();
        login(&app, "ada@example.com").await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/auth/signup",
                None,
                json!({"name": "Other", "email": "ada@example.com", "password": "x"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn upload_then_stats_and_share() {
        let app = app();
        let cookie = login(&app, "ada@example.com").await;

        let folder = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/folders",
                Some(&cookie),
                json!({"name": "Docs"}),
            ))
            .await
            .unwrap();
        assert_eq!(folder.status(), StatusCode::CREATED);
        let folder_id = body_json(folder).await["folder"]["id"]
            .as_str()
            .unwrap()
            .to_string();

        let upload = app
            .clone()
            .oneshot(upload_request(&cookie, "notes.txt", b"hello world"))
            .await
            .unwrap();
        assert_eq!(upload.status(), StatusCode::CREATED);
        let body = body_json(upload).await;
        assert_eq!(body["file"]["name"], "notes.txt");
        assert_eq!(body["file"]["size"], 11);
        assert_eq!(body["file"]["resourceType"], "raw");

        let stats = app
            .clone()
            .oneshot(get_request("/api/storage/stats", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(body_json(stats).await["storage"]["used"], 11);

        let share = app
            .clone()
            .oneshot(json_request(
                "POST",
                &format!("/api/share/folder/{folder_id}"),
                Some(&cookie),
                json!({"duration": "7d"}),
            ))
            .await
            .unwrap();
        assert_eq!(share.status(), StatusCode::CREATED);
        let share_body = body_json(share).await;
        let share_id = share_body["shareLink"]["id"].as_str().unwrap().to_string();
        assert_eq!(
            share_body["shareLink"]["url"],
            format!("http://frontend.test/share/{share_id}")
        );

        let resolved = app
            .oneshot(get_request(&format!("/api/share/{share_id}"), None))
            .await
            .unwrap();
        assert_eq!(resolved.status(), StatusCode::OK);
        assert_eq!(body_json(resolved).await["folder"]["name"], "Docs");
    }

    #[tokio::test]
    async fn upload_without_file_field_is_rejected() {
        let app = app();
        let cookie = login(&app, "ada@example.com").await;

        let body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"folderId\"\r\n\r\nroot\r\n--{BOUNDARY}--\r\n"
        );
        let request = Request::builder()
            .method("POST")
            .uri("/api/files/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .header(header::COOKIE, &cookie)
            .body(Body::from(body))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "No file uploaded");
    }

    async fn assert_envelope(response: Response<Body>, status: StatusCode, error: &str) {
        assert_eq!(response.status(), status);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let body = body_json(response).await;
        assert_eq!(body, json!({"success": false, "error": error}));
    }

    #[tokio::test]
    async fn malformed_requests_get_the_error_envelope() {
        let app = app();
        let cookie = login(&app, "ada@example.com").await;

        let bad_path = app
            .clone()
            .oneshot(get_request("/api/folders/not-a-uuid", Some(&cookie)))
            .await
            .unwrap();
        assert_envelope(bad_path, StatusCode::BAD_REQUEST, "Invalid id").await;

        let bad_parent = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/folders",
                Some(&cookie),
                json!({"name": "X", "parentId": "42"}),
            ))
            .await
            .unwrap();
        assert_envelope(bad_parent, StatusCode::BAD_REQUEST, "Invalid folder id").await;

        let null_name = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/auth/signup",
                None,
                json!({"name": null, "email": "bob@example.com", "password": "pw"}),
            ))
            .await
            .unwrap();
        assert_envelope(null_name, StatusCode::BAD_REQUEST, "All fields are required").await;

        let no_body = Request::builder()
            .method("POST")
            .uri(format!("/api/share/folder/{}", uuid::Uuid::new_v4()))
            .header(header::COOKIE, &cookie)
            .body(Body::empty())
            .unwrap();
        let no_body = app.clone().oneshot(no_body).await.unwrap();
        assert_envelope(no_body, StatusCode::BAD_REQUEST, "Invalid request body").await;

        let broken_json = Request::builder()
            .method("POST")
            .uri("/api/auth/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"email\":"))
            .unwrap();
        let broken_json = app.oneshot(broken_json).await.unwrap();
        assert_envelope(broken_json, StatusCode::BAD_REQUEST, "Invalid request body").await;
    }

    #[tokio::test]
    async fn unknown_or_malformed_share_ids_are_not_found() {
        let app = app();
        for id in [uuid::Uuid::new_v4().to_string(), "12".to_string()] {
            let response = app
                .clone()
                .oneshot(get_request(&format!("/api/share/{id}"), None))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
            assert_eq!(body_json(response).await["error"], "Share link not found");
        }
    }
}
