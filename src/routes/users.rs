use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::pagination::Page;
use crate::routes::notifications::NotificationResponse;
use crate::services::notifications::NotificationService;
use crate::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/:user_id/notifications", get(list_notifications))
}

#[derive(Debug, Deserialize)]
pub struct ListNotificationsQuery {
    pub cursor: Option<String>,
    pub limit: Option<i64>,
}

/// List a user's notifications, newest first, one cursor page at a time.
async fn list_notifications(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(query): Query<ListNotificationsQuery>,
) -> AppResult<Json<Page<NotificationResponse>>> {
    let page = NotificationService::new(&state)
        .list_for_recipient(&user_id, query.cursor.as_deref(), query.limit)
        .await?;

    Ok(Json(Page {
        items: page.items.into_iter().map(NotificationResponse::from).collect(),
        next_cursor: page.next_cursor,
    }))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::{Duration, TimeZone, Utc};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::db::CooldownCandidate;
    use crate::routes::api_router;
    use crate::services::notifications::tests::test_state;
    use crate::services::notifications::{EngagementEvent, NotificationService};

    async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn walks_pages_with_next_cursor() {
        let state = test_state().await;
        let svc = NotificationService::new(&state);
        let t0 = Utc.with_ymd_and_hms(2024, 1, 9, 10, 0, 0).unwrap();
        for i in 0..3 {
            let event = EngagementEvent {
                candidate: CooldownCandidate {
                    recipient_user_id: "u1".to_string(),
                    kind: "like".to_string(),
                    actor_profile_id: format!("p{}", i),
                    post_id: "post_1".to_string(),
                },
                cooldown_minutes: None,
            };
            svc.record_engagement_at(event, t0 + Duration::minutes(i))
                .await
                .unwrap();
        }

        let app = api_router().with_state(state);

        let (status, first) = get_json(app.clone(), "/api/users/u1/notifications?limit=2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first["items"].as_array().unwrap().len(), 2);
        assert_eq!(first["items"][0]["actorProfileId"], "p2");
        assert_eq!(first["items"][0]["createdAt"], "2024-01-09T10:02:00.000Z");
        let next = first["nextCursor"].as_str().unwrap().to_string();
        assert!(next.starts_with("2024-01-09T10:01:00.000Z|"));

        let uri = format!(
            "/api/users/u1/notifications?limit=2&cursor={}",
            next.replace('|', "%7C").replace(':', "%3A")
        );
        let (_, second) = get_json(app, &uri).await;
        assert_eq!(second["items"].as_array().unwrap().len(), 1);
        assert_eq!(second["items"][0]["actorProfileId"], "p0");
        assert!(second["nextCursor"].is_null());
    }

    #[tokio::test]
    async fn unknown_user_gets_empty_page() {
        let app = api_router().with_state(test_state().await);
        let (status, body) = get_json(app, "/api/users/nobody/notifications?cursor=bogus").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({ "items": [], "nextCursor": null }));
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let app = api_router().with_state(test_state().await);
        let (status, body) = get_json(app, "/api/nope").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}
