pub mod health;

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::drafts::handlers as drafts;
use crate::generation::handlers as generation;
use crate::library::handlers as library;
use crate::scoring::handlers as scoring;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis
        .route("/api/v1/resumes/analyze", post(scoring::handle_analyze))
        // Drafts
        .route(
            "/api/v1/drafts/:user_id",
            get(drafts::handle_get_draft)
                .put(drafts::handle_replace_draft)
                .delete(drafts::handle_clear_draft),
        )
        .route(
            "/api/v1/drafts/:user_id/personal-info",
            patch(drafts::handle_update_personal_info),
        )
        .route(
            "/api/v1/drafts/:user_id/experiences",
            put(drafts::handle_update_experiences),
        )
        .route(
            "/api/v1/drafts/:user_id/education",
            put(drafts::handle_update_education),
        )
        .route(
            "/api/v1/drafts/:user_id/skills",
            put(drafts::handle_update_skills),
        )
        .route(
            "/api/v1/drafts/:user_id/certifications",
            put(drafts::handle_update_certifications),
        )
        .route(
            "/api/v1/drafts/:user_id/hobbies",
            put(drafts::handle_update_hobbies),
        )
        .route(
            "/api/v1/drafts/:user_id/generate/summary",
            post(drafts::handle_generate_summary),
        )
        .route(
            "/api/v1/drafts/:user_id/generate/skills",
            post(drafts::handle_generate_skills),
        )
        .route(
            "/api/v1/drafts/:user_id/generate/experiences/:index",
            post(drafts::handle_generate_experience),
        )
        // Generation
        .route("/api/v1/generate", post(generation::handle_generate))
        .route(
            "/api/v1/generate/package",
            post(generation::handle_generate_package),
        )
        // Library
        .route(
            "/api/v1/library",
            get(library::handle_list_resumes).post(library::handle_save_resume),
        )
        .route("/api/v1/library/:id", delete(library::handle_delete_resume))
        .route(
            "/api/v1/library/:id/export",
            post(library::handle_export_resume),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::generation::generator::FallbackGenerator;
    use crate::state::test_support::test_state;

    fn app() -> Router {
        build_router(test_state(FallbackGenerator::new(None)))
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["service"], "iresume-api");
    }

    #[tokio::test]
    async fn test_analyze_route() {
        let request = json_request(
            "POST",
            "/api/v1/resumes/analyze",
            json!({ "resume_data": {}, "resume_content": "" }),
        );
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["score"]["structure"], 65);
        assert_eq!(body["scorer_backend"], "heuristic");
    }

    #[tokio::test]
    async fn test_analyze_rejects_malformed_form() {
        let request = json_request(
            "POST",
            "/api/v1/resumes/analyze",
            json!({ "resume_data": { "experiences": "none" } }),
        );
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_json(response).await["error"]["code"], "ANALYSIS_FAILED");
    }

    #[tokio::test]
    async fn test_draft_lifecycle() {
        let app = app();
        let uri = format!("/api/v1/drafts/{}", Uuid::new_v4());

        let response = app
            .clone()
            .oneshot(json_request(
                "PATCH",
                &format!("{uri}/personal-info"),
                json!({ "name": "Ravi", "jobTitle": "Engineer" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("{uri}/skills"),
                json!(["Rust", "SQL"]),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(Request::get(&uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let draft = body_json(response).await;
        assert_eq!(draft["personalInfo"]["name"], "Ravi");
        assert_eq!(draft["personalInfo"]["jobTitle"], "Engineer");
        assert_eq!(draft["skills"], json!(["Rust", "SQL"]));

        let response = app
            .clone()
            .oneshot(Request::delete(&uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .oneshot(Request::get(&uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(body_json(response).await["skills"], json!([""]));
    }

    #[tokio::test]
    async fn test_empty_experience_list_is_rejected() {
        let uri = format!("/api/v1/drafts/{}/experiences", Uuid::new_v4());
        let response = app()
            .oneshot(json_request("PUT", &uri, json!([])))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_replace_with_empty_form_is_rejected() {
        let router = app();
        let uri = format!("/api/v1/drafts/{}", Uuid::new_v4());
        let response = router
            .clone()
            .oneshot(json_request("PUT", &uri, json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "VALIDATION_ERROR");

        let response = router
            .oneshot(Request::get(&uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let draft = body_json(response).await;
        assert_eq!(draft["experiences"].as_array().map(Vec::len), Some(1));
        assert_eq!(draft["education"].as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn test_anonymous_generation_serves_demo() {
        let request = json_request(
            "POST",
            "/api/v1/generate",
            json!({
                "resume_data": { "personalInfo": { "name": "Mina Park" } },
                "content_type": "resume"
            }),
        );
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["source"], "demo");
        assert!(body["content"].as_str().unwrap().starts_with("# Mina Park\n"));
    }

    #[tokio::test]
    async fn test_anonymous_package_serves_demo() {
        let request = json_request(
            "POST",
            "/api/v1/generate/package",
            json!({ "resume_data": {} }),
        );
        let response = app().oneshot(request).await.unwrap();
        let body = body_json(response).await;
        assert_eq!(body["source"], "demo");
        assert!(body["cover_letter_content"]
            .as_str()
            .unwrap()
            .contains("Dear Hiring Manager,"));
    }

    #[tokio::test]
    async fn test_summary_assist_applies_demo_summary() {
        let uri = format!("/api/v1/drafts/{}/generate/summary", Uuid::new_v4());
        let response = app()
            .oneshot(Request::post(&uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["updated"], true);
        assert_eq!(body["source"], "demo");
        assert!(body["draft"]["personalInfo"]["summary"]
            .as_str()
            .unwrap()
            .starts_with("A dedicated professional"));
    }

    #[tokio::test]
    async fn test_skills_assist_requires_experience() {
        let uri = format!("/api/v1/drafts/{}/generate/skills", Uuid::new_v4());
        let response = app()
            .oneshot(Request::post(&uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
