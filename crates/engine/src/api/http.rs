//! HTTP routes.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use uuid::Uuid;

use bosscoax_domain::{DomainError, Scenario, SessionId};
use bosscoax_shared::{
    ChatRequest, ChatResponse, CreateSessionRequest, ErrorResponse, ScenarioView,
    SelectOptionRequest, SessionView,
};

use crate::app::App;
use crate::use_cases::{GameError, ScenarioChoice};

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/api/chat", post(chat))
        .route("/api/scenarios", get(list_scenarios))
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/{id}", get(get_session).delete(end_session))
        .route("/api/sessions/{id}/select", post(select_option))
        .route("/api/sessions/{id}/reset", post(reset_session))
}

async fn health() -> &'static str {
    "OK"
}

// =============================================================================
// Stateless chat
// =============================================================================

async fn chat(
    State(app): State<Arc<App>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(request) = payload?;
    let reply = app
        .use_cases
        .chat
        .execute(request.into_context())
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(Json(ChatResponse::from(reply)))
}

// =============================================================================
// Scenarios
// =============================================================================

async fn list_scenarios() -> Json<Vec<ScenarioView>> {
    Json(Scenario::catalog().iter().map(ScenarioView::from).collect())
}

// =============================================================================
// Sessions
// =============================================================================

async fn create_session(
    State(app): State<Arc<App>>,
    payload: Result<Json<CreateSessionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SessionView>), ApiError> {
    let Json(request) = payload?;
    let choice = match (request.scenario_id, request.scenario) {
        (Some(id), _) => ScenarioChoice::BuiltIn(id),
        (None, Some(description)) => ScenarioChoice::Custom(description),
        (None, None) => {
            return Err(ApiError::BadRequest(
                "Either scenarioId or scenario is required".to_string(),
            ))
        }
    };

    let session = app.use_cases.game.start.execute(choice).await?;
    Ok((StatusCode::CREATED, Json(SessionView::from(&session))))
}

async fn get_session(
    State(app): State<Arc<App>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<SessionView>, ApiError> {
    let Path(id) = path?;
    let session = app
        .use_cases
        .game
        .get
        .execute(SessionId::from_uuid(id))
        .await?;
    Ok(Json(SessionView::from(&session)))
}

async fn select_option(
    State(app): State<Arc<App>>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<SelectOptionRequest>, JsonRejection>,
) -> Result<Json<SessionView>, ApiError> {
    let Path(id) = path?;
    let Json(request) = payload?;
    let session = app
        .use_cases
        .game
        .select
        .execute(SessionId::from_uuid(id), request.option_index)
        .await?;
    Ok(Json(SessionView::from(&session)))
}

async fn reset_session(
    State(app): State<Arc<App>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<SessionView>, ApiError> {
    let Path(id) = path?;
    let session = app
        .use_cases
        .game
        .reset
        .execute(SessionId::from_uuid(id))
        .await?;
    Ok(Json(SessionView::from(&session)))
}

async fn end_session(
    State(app): State<Arc<App>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = path?;
    app.use_cases
        .game
        .end
        .execute(SessionId::from_uuid(id))?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug)]
pub enum ApiError {
    NotFound,
    BadRequest(String),
    Conflict(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Not found".to_string()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to generate response".to_string(),
                )
            }
        };
        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<GameError> for ApiError {
    fn from(e: GameError) -> Self {
        match e {
            GameError::SessionNotFound(_) | GameError::Domain(DomainError::NotFound { .. }) => {
                ApiError::NotFound
            }
            GameError::TurnInProgress => ApiError::Conflict(e.to_string()),
            GameError::UnknownScenario(_)
            | GameError::Session(_)
            | GameError::Domain(DomainError::Validation(_)) => ApiError::BadRequest(e.to_string()),
            GameError::Internal(detail) => ApiError::Internal(detail),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use chrono::{TimeZone, Utc};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::ports::{LlmError, LlmResponse, MockLlmPort};
    use crate::stores::DEFAULT_SESSION_IDLE_TTL;

    const OPENING: &str = r#"{"bossMessage": "忽略", "options": [
        {"text": "A", "score": 10}, {"text": "B", "score": 15},
        {"text": "C", "score": -5}, {"text": "D", "score": -8},
        {"text": "E", "score": -12}, {"text": "F", "score": -15}
    ]}"#;

    fn app_with(replies: Vec<Result<&'static str, LlmError>>) -> Arc<App> {
        let mut llm = MockLlmPort::new();
        let mut replies = replies.into_iter();
        llm.expect_generate().returning(move |_| {
            replies
                .next()
                .unwrap_or(Err(LlmError::MissingCredential))
                .map(LlmResponse::text)
        });
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 1, 8, 10, 0, 0).unwrap());
        Arc::new(App::new(
            Arc::new(llm),
            Arc::new(clock),
            DEFAULT_SESSION_IDLE_TTL,
        ))
    }

    async fn send(app: &Arc<App>, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = routes()
            .with_state(app.clone())
            .oneshot(request)
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    fn chat_body() -> Value {
        json!({
            "messages": [
                {"role": "system", "content": "场景：你在会议上睡着了。"},
                {"role": "assistant", "content": "昨晚干什么去了？"},
                {"role": "user", "content": "加班写方案"}
            ],
            "scenario": "你在会议上睡着了。",
            "currentScore": 20,
            "round": 2
        })
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let app = app_with(vec![]);
        let response = routes()
            .with_state(app)
            .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"OK");
    }

    #[tokio::test]
    async fn chat_returns_generated_reply() {
        let app = app_with(vec![Ok(OPENING)]);

        let (status, body) = send(&app, Method::POST, "/api/chat", Some(chat_body())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["bossMessage"], "忽略");
        assert_eq!(body["options"].as_array().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn chat_with_unparsable_content_returns_fallback() {
        let app = app_with(vec![Ok("老板：哼！")]);

        let (status, body) = send(&app, Method::POST, "/api/chat", Some(chat_body())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["bossMessage"], "我需要看到你的诚意和改进措施！");
        assert_eq!(body["options"][0]["score"], 15);
    }

    #[tokio::test]
    async fn chat_transport_failure_is_500() {
        let app = app_with(vec![Err(LlmError::Timeout)]);

        let (status, body) = send(&app, Method::POST, "/api/chat", Some(chat_body())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Failed to generate response"}));
    }

    #[tokio::test]
    async fn chat_with_bad_body_is_400() {
        let app = app_with(vec![]);

        let (status, body) =
            send(&app, Method::POST, "/api/chat", Some(json!({"messages": "nope"}))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn scenarios_list_catalog() {
        let app = app_with(vec![]);

        let (status, body) = send(&app, Method::GET, "/api/scenarios", None).await;

        assert_eq!(status, StatusCode::OK);
        let scenarios = body.as_array().unwrap();
        assert_eq!(scenarios.len(), 4);
        assert_eq!(scenarios[0]["id"], 1);
    }

    #[tokio::test]
    async fn session_lifecycle() {
        let app = app_with(vec![Ok(OPENING), Err(LlmError::MissingCredential)]);

        let (status, created) =
            send(&app, Method::POST, "/api/sessions", Some(json!({"scenarioId": 2}))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["phase"], "playing");
        assert_eq!(created["options"][1]["text"], "B");
        let id = created["id"].as_str().unwrap().to_string();

        let (status, played) = send(
            &app,
            Method::POST,
            &format!("/api/sessions/{id}/select"),
            Some(json!({"optionIndex": 1})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(played["score"], 15);
        assert_eq!(played["round"], 2);
        assert_eq!(played["messages"][2]["text"], "我需要看到你的诚意和具体的改进措施！");

        let (status, fetched) =
            send(&app, Method::GET, &format!("/api/sessions/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, played);

        let (status, reset) =
            send(&app, Method::POST, &format!("/api/sessions/{id}/reset"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(reset["score"], 0);
        assert_eq!(reset["round"], 1);
        assert_eq!(reset["messages"].as_array().unwrap().len(), 1);

        let (status, _) = send(&app, Method::DELETE, &format!("/api/sessions/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(&app, Method::GET, &format!("/api/sessions/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn custom_scenario_session() {
        let app = app_with(vec![Ok(OPENING)]);

        let (status, created) = send(
            &app,
            Method::POST,
            "/api/sessions",
            Some(json!({"scenario": "你把老板的车停到了别人的车位上。"})),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["scenario"]["title"], "自定义场景");
        assert_eq!(created["messages"][0]["text"], "我们需要谈谈。");
    }

    #[tokio::test]
    async fn create_session_requires_a_scenario() {
        let app = app_with(vec![]);

        let (status, _) = send(&app, Method::POST, "/api/sessions", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) =
            send(&app, Method::POST, "/api/sessions", Some(json!({"scenarioId": 42}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn overlong_custom_scenario_is_400() {
        let app = app_with(vec![]);
        let description = "老板".repeat(200);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/sessions",
            Some(json!({"scenario": description})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
        assert!(app.sessions.is_empty());
    }

    #[tokio::test]
    async fn malformed_session_id_is_json_400() {
        let app = app_with(vec![]);

        for (method, uri, body) in [
            (Method::GET, "/api/sessions/not-a-uuid", None),
            (Method::DELETE, "/api/sessions/not-a-uuid", None),
            (Method::POST, "/api/sessions/not-a-uuid/reset", None),
            (
                Method::POST,
                "/api/sessions/not-a-uuid/select",
                Some(json!({"optionIndex": 0})),
            ),
        ] {
            let (status, body) = send(&app, method, uri, body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert!(body["error"].is_string(), "{uri}: {body}");
        }
    }

    #[tokio::test]
    async fn select_errors_map_to_status_codes() {
        let app = app_with(vec![Ok(OPENING)]);
        let (_, created) =
            send(&app, Method::POST, "/api/sessions", Some(json!({"scenarioId": 1}))).await;
        let id = created["id"].as_str().unwrap().to_string();
        let uri = format!("/api/sessions/{id}/select");

        let (status, _) = send(&app, Method::POST, &uri, Some(json!({"optionIndex": 9}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let session_id = SessionId::from_uuid(Uuid::parse_str(&id).unwrap());
        let held = app.sessions.try_lock(session_id).unwrap().unwrap();
        let (status, body) = send(&app, Method::POST, &uri, Some(json!({"optionIndex": 0}))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body["error"].is_string());
        drop(held);

        let unknown = format!("/api/sessions/{}/select", Uuid::new_v4());
        let (status, _) = send(&app, Method::POST, &unknown, Some(json!({"optionIndex": 0}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
