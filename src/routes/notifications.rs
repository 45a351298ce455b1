use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::Serialize;

use crate::db::Notification;
use crate::error::{AppError, AppResult};
use crate::services::notifications::{EngagementEvent, NotificationService};
use crate::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/engagements", post(record_engagement))
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    pub id: String,
    pub recipient_user_id: String,
    pub kind: String,
    pub actor_profile_id: String,
    pub post_id: String,
    pub created_at: String,
    pub read_at: Option<String>,
}

impl From<Notification> for NotificationResponse {
    fn from(n: Notification) -> Self {
        NotificationResponse {
            id: n.id,
            recipient_user_id: n.recipient_user_id,
            kind: n.kind,
            actor_profile_id: n.actor_profile_id,
            post_id: n.post_id,
            created_at: n.created_at,
            read_at: n.read_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EngagementResponse {
    pub created: bool,
    pub notification: Option<NotificationResponse>,
}

// ============================================================================
// Handlers
// ============================================================================

/// Record a like/repost and create a notification unless the cooldown suppresses it.
async fn record_engagement(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<EngagementEvent>, JsonRejection>,
) -> AppResult<(StatusCode, Json<EngagementResponse>)> {
    let Json(event) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let created = NotificationService::new(&state)
        .record_engagement(event)
        .await?;

    let status = if created.is_some() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((
        status,
        Json(EngagementResponse {
            created: created.is_some(),
            notification: created.map(NotificationResponse::from),
        }),
    ))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::routes::api_router;
    use crate::services::notifications::tests::test_state;

    fn post_json(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/notifications/engagements")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(resp: axum::response::Response) -> serde_json::Value {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn second_like_within_window_is_suppressed() {
        let app = api_router().with_state(test_state().await);
        let body = serde_json::json!({
            "recipientUserId": "u1",
            "kind": "like",
            "actorProfileId": "p1",
            "postId": "post_1",
            "cooldownMinutes": 15
        });

        let first = app.clone().oneshot(post_json(body.clone())).await.unwrap();
        assert_eq!(first.status(), StatusCode::CREATED);
        let first = json_body(first).await;
        assert_eq!(first["created"], true);
        assert_eq!(first["notification"]["recipientUserId"], "u1");
        assert_eq!(first["notification"]["kind"], "like");

        let second = app.oneshot(post_json(body)).await.unwrap();
        assert_eq!(second.status(), StatusCode::OK);
        let second = json_body(second).await;
        assert_eq!(second["created"], false);
        assert!(second["notification"].is_null());
    }

    #[tokio::test]
    async fn missing_fields_are_unprocessable() {
        let app = api_router().with_state(test_state().await);
        let resp = app
            .oneshot(post_json(serde_json::json!({ "recipientUserId": "u1", "kind": "like" })))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json_body(resp).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let app = api_router().with_state(test_state().await);
        let req = Request::builder()
            .method("POST")
            .uri("/api/notifications/engagements")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(resp).await["error"]["code"], "BAD_REQUEST");
    }
}
