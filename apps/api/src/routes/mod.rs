pub mod dashboard;
pub mod health;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::analytics::handlers as analytics;
use crate::auth::handlers as auth;
use crate::generation::handlers as generation;
use crate::profile::handlers as profile;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth
        .route("/api/v1/auth/login", post(auth::handle_login))
        .route("/api/v1/auth/register", post(auth::handle_register))
        .route("/api/v1/auth/session", get(auth::handle_session))
        .route("/api/v1/auth/logout", post(auth::handle_logout))
        .route("/api/v1/dashboard", get(dashboard::handle_dashboard))
        // Profile
        .route(
            "/api/v1/profile",
            get(profile::handle_get_profile).put(profile::handle_update_profile),
        )
        .route("/api/v1/profile/skills", post(profile::handle_add_skill))
        .route(
            "/api/v1/profile/skills/:skill",
            delete(profile::handle_remove_skill),
        )
        .route(
            "/api/v1/profile/entries/:section",
            post(profile::handle_add_entry),
        )
        .route(
            "/api/v1/profile/entries/:section/:id",
            put(profile::handle_update_entry).delete(profile::handle_remove_entry),
        )
        // Job analyses
        .route(
            "/api/v1/job-analyses",
            post(generation::handle_analyze).get(generation::handle_list_analyses),
        )
        .route(
            "/api/v1/job-analyses/:id",
            get(generation::handle_get_analysis),
        )
        // Templates
        .route("/api/v1/templates", get(generation::handle_list_templates))
        .route(
            "/api/v1/templates/:id/customization",
            get(generation::handle_get_customization).put(generation::handle_save_customization),
        )
        .route(
            "/api/v1/templates/:id/preview",
            post(generation::handle_apply_customization),
        )
        // Resumes
        .route(
            "/api/v1/resumes",
            post(generation::handle_generate).get(generation::handle_list_resumes),
        )
        .route(
            "/api/v1/resumes/:id",
            delete(generation::handle_delete_resume),
        )
        .route(
            "/api/v1/resumes/:id/downloads",
            post(analytics::handle_track_download),
        )
        .route(
            "/api/v1/resumes/:id/views",
            post(analytics::handle_track_view),
        )
        // Analytics
        .route("/api/v1/analytics", get(analytics::handle_get_analytics))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::store::seed::demo_store;

    fn app() -> Router {
        build_router(AppState::fake(demo_store()))
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn login(app: &Router) -> String {
        let (status, body) = send(
            app,
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({"email": "demo@autocv.com", "password": "demo123"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let (status, body) = send(&app(), Method::GET, "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_protected_route_requires_token() {
        let (status, body) = send(&app(), Method::GET, "/api/v1/profile", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_wrong_password_is_401() {
        let (status, body) = send(
            &app(),
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({"email": "demo@autocv.com", "password": "wrong"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["message"], "Invalid email or password");
    }

    #[tokio::test]
    async fn test_analyze_generate_track_flow() {
        let app = app();
        let token = login(&app).await;

        let (status, analysis) = send(
            &app,
            Method::POST,
            "/api/v1/job-analyses",
            Some(&token),
            Some(json!({
                "job_description": "5+ years experience in React and Node.js, strong leadership and communication skills"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(analysis["extracted_keywords"]["match_strength"], "medium");

        let (status, resume) = send(
            &app,
            Method::POST,
            "/api/v1/resumes",
            Some(&token),
            Some(json!({"job_analysis_id": analysis["id"], "template_id": 1})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(resume["content"]["skills"].as_array().unwrap().len(), 12);
        let resume_id = resume["id"].as_u64().unwrap();

        let (status, analytics) = send(
            &app,
            Method::POST,
            &format!("/api/v1/resumes/{resume_id}/downloads"),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(analytics["downloads"], 1);

        let (status, resumes) = send(
            &app,
            Method::GET,
            "/api/v1/resumes?sort=newest",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(resumes[0]["id"].as_u64(), Some(resume_id));
    }

    #[tokio::test]
    async fn test_profile_entry_routes() {
        let app = app();
        let token = login(&app).await;

        let (status, entry) = send(
            &app,
            Method::POST,
            "/api/v1/profile/entries/certifications",
            Some(&token),
            Some(json!({"name": "CKA", "issuer": "CNCF"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let entry_id = entry["id"].as_u64().unwrap();

        let (status, _) = send(
            &app,
            Method::DELETE,
            &format!("/api/v1/profile/entries/certifications/{entry_id}"),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(
            &app,
            Method::DELETE,
            &format!("/api/v1/profile/entries/certifications/{entry_id}"),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_customization_round_trip() {
        let app = app();
        let token = login(&app).await;

        let (_, templates) = send(&app, Method::GET, "/api/v1/templates", Some(&token), None).await;
        let template = &templates[1];
        let customization = json!({
            "color_scheme": template["color_schemes"][1],
            "font": template["font_options"][1],
        });

        let (status, _) = send(
            &app,
            Method::PUT,
            "/api/v1/templates/2/customization",
            Some(&token),
            Some(customization.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, saved) = send(
            &app,
            Method::GET,
            "/api/v1/templates/2/customization",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(saved, customization);
    }

    #[tokio::test]
    async fn test_customization_is_not_shared_between_users() {
        let app = app();
        let demo_token = login(&app).await;

        let (_, templates) =
            send(&app, Method::GET, "/api/v1/templates", Some(&demo_token), None).await;
        let template = &templates[0];
        let saved = json!({
            "color_scheme": template["color_schemes"][2],
            "font": template["font_options"][1],
        });
        let (status, _) = send(
            &app,
            Method::PUT,
            "/api/v1/templates/1/customization",
            Some(&demo_token),
            Some(saved.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, registered) = send(
            &app,
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(json!({
                "email": "second@autocv.com",
                "password": "pw",
                "first_name": "Second",
                "last_name": "User",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let other_token = registered["token"].as_str().unwrap().to_string();

        let (status, seen) = send(
            &app,
            Method::GET,
            "/api/v1/templates/1/customization",
            Some(&other_token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_ne!(seen, saved);
        assert_eq!(seen["color_scheme"], template["color_schemes"][0]);

        let (_, own) = send(
            &app,
            Method::GET,
            "/api/v1/templates/1/customization",
            Some(&demo_token),
            None,
        )
        .await;
        assert_eq!(own, saved);
    }

    #[tokio::test]
    async fn test_profile_update_assigns_entry_ids() {
        let app = app();
        let token = login(&app).await;

        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/v1/profile",
            Some(&token),
            Some(json!({
                "experience": [{"title": "A"}, {"title": "B"}],
                "skills": ["", "Rust", "Rust"],
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let profile = &body["profile"];
        let first = profile["experience"][0]["id"].as_u64().unwrap();
        let second = profile["experience"][1]["id"].as_u64().unwrap();
        assert!(first != 0 && second != 0 && first != second);
        assert_eq!(profile["skills"], json!(["Rust"]));
    }

    #[tokio::test]
    async fn test_logout_revokes_token() {
        let app = app();
        let token = login(&app).await;

        let (status, _) = send(&app, Method::POST, "/api/v1/auth/logout", Some(&token), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, Method::GET, "/api/v1/auth/session", Some(&token), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
