use std::env;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    routing::{get, post},
    Router,
};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

async fn test_app() -> Router {
    env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
    env::set_var("DATABASE_URL", "sqlite::memory:");
    env::set_var("JWT_SECRET", "test_secret_key");
    env::set_var("PUBLIC_RPS", "100");
    env::set_var("MAX_SESSION_QUESTIONS", "20");
    env::set_var("FOLLOW_UP_SEED", "42");

    // Several tests share the process-wide config.
    let _ = interview_backend::config::init_config();

    let pool = interview_backend::database::pool::create_pool()
        .await
        .expect("pool");
    sqlx::migrate!("./migrations").run(&pool).await.expect("migrations");

    let app_state = interview_backend::AppState::new(pool);

    Router::new()
        .route(
            "/api/interview/start",
            post(interview_backend::routes::interview::start_interview),
        )
        .route(
            "/api/interview/submit-answer",
            post(interview_backend::routes::interview::submit_answer),
        )
        .route(
            "/api/interview/session/:id",
            get(interview_backend::routes::interview::get_session),
        )
        .route(
            "/api/interview/end-session",
            post(interview_backend::routes::interview::end_session),
        )
        .route(
            "/api/candidate/analyze-resume",
            post(interview_backend::routes::candidate_routes::analyze_resume),
        )
        .layer(axum::middleware::from_fn(
            interview_backend::middleware::auth::require_bearer_auth,
        ))
        .with_state(app_state)
}

fn bearer_token() -> String {
    let claims = interview_backend::middleware::auth::Claims {
        sub: "integration-test".to_string(),
        exp: 4102444800, // 2100-01-01
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret("test_secret_key".as_bytes()),
    )
    .expect("encode token");
    format!("Bearer {}", token)
}

fn post_json(uri: &str, body: &JsonValue) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", bearer_token())
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_authed(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header("authorization", bearer_token())
        .body(Body::empty())
        .unwrap()
}

async fn json_body(resp: axum::response::Response) -> JsonValue {
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn interview_flow_end_to_end() {
    let app = test_app().await;

    let start_body = json!({
        "job_role": "backend",
        "resume_text": "Senior Developer at Acme Corp (2018 - 2022)\nSkills: Python, React, MySQL, Docker",
        "question_count": 4
    });
    let resp = app
        .clone()
        .oneshot(post_json("/api/interview/start", &start_body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    let session_id = body["session_id"].as_str().expect("session id").to_string();
    assert_eq!(body["total_questions"], 4);
    assert_eq!(body["first_question"]["index"], 0);
    assert_eq!(body["first_question"]["type"], "technical");
    assert!(body["first_question"].get("expected_keywords").is_none());

    // Answer all four questions; the last response flips `completed`.
    for i in 0..4 {
        let submit_body = json!({
            "session_id": session_id,
            "answer": "I have used django and flask with pandas and numpy, plus decorators and generators, across several production projects.",
            "voice_id": if i == 0 { json!("voice-1") } else { JsonValue::Null }
        });
        let resp = app
            .clone()
            .oneshot(post_json("/api/interview/submit-answer", &submit_body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(body["question_index"], i);
        let score = body["evaluation"]["score"].as_i64().unwrap();
        assert!((0..=100).contains(&score));
        if i == 0 {
            // Voice synthesis is unconfigured; the reply degrades to null audio.
            assert!(body["interviewer"]["text"].is_string());
            assert!(body["interviewer"]["audio_url"].is_null());
        }
        assert_eq!(body["completed"], i == 3);
        if i < 3 {
            assert_eq!(body["next_question"]["index"], i + 1);
        } else {
            assert!(body["next_question"].is_null());
        }
    }

    // A fifth answer is a client error.
    let extra = json!({"session_id": session_id, "answer": "one more"});
    let resp = app
        .clone()
        .oneshot(post_json("/api/interview/submit-answer", &extra))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = json_body(resp).await;
    assert_eq!(body["success"], false);

    let resp = app
        .clone()
        .oneshot(post_json(
            "/api/interview/end-session",
            &json!({"session_id": session_id}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let summary = json_body(resp).await;
    let final_score = summary["final_score"].as_f64().unwrap();
    assert!((0.0..=100.0).contains(&final_score));
    assert!(summary["recommendation"].is_string());

    // Reloading the persisted session returns the same aggregate.
    let resp = app
        .clone()
        .oneshot(get_authed(&format!("/api/interview/session/{}", session_id)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let stored = json_body(resp).await;
    assert_eq!(stored["status"], "completed");
    assert_eq!(stored["final_score"].as_f64().unwrap(), final_score);
    assert_eq!(stored["correct_answers"], summary["correct_answers"]);
    assert_eq!(stored["scores"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn requests_without_a_token_are_rejected() {
    let app = test_app().await;
    let req = Request::builder()
        .method("POST")
        .uri("/api/interview/start")
        .header("content-type", "application/json")
        .body(Body::from(json!({"job_role": "backend"}).to_string()))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_session_returns_not_found() {
    let app = test_app().await;
    let resp = app
        .clone()
        .oneshot(get_authed("/api/interview/session/ivw_0_missing"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = app
        .oneshot(post_json(
            "/api/interview/end-session",
            &json!({"session_id": "ivw_0_missing"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn analyze_resume_returns_extracted_profile() {
    let app = test_app().await;
    let body = json!({
        "resume_text": "Skills: Python, React\nB.Sc in computer science from state university"
    });
    let resp = app
        .oneshot(post_json("/api/candidate/analyze-resume", &body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let profile = json_body(resp).await;
    let skills: Vec<&str> = profile["skills"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert!(skills.contains(&"python"));
    assert!(skills.contains(&"react"));
    assert_eq!(profile["education"][0]["university"], "state university");
}
