//! API route handlers for the gateway.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use newsbot_core::{NewsBotError, ScheduledBroadcast, View};
use newsbot_scheduler::SubmitOutcome;
use newsbot_scheduler::compose::ComposeForm;
use serde::Deserialize;
use std::sync::Arc;

use super::server::AppState;

fn error_json(e: &NewsBotError) -> Json<serde_json::Value> {
    Json(serde_json::json!({"ok": false, "error": e.to_string()}))
}

fn compose_json(form: &ComposeForm, confirmation: bool) -> serde_json::Value {
    serde_json::json!({
        "text": form.text(),
        "group": form.group_id(),
        "datetime": form.datetime(),
        "chars": form.char_count(),
        "ready": form.is_ready(),
        "confirmation": confirmation,
    })
}

/// Health check endpoint.
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "newsbot-gateway",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// System information endpoint.
pub async fn system_info(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let uptime = state.start_time.elapsed();
    let dashboard = state.dashboard.lock().await;
    let delivery = dashboard.delivery();
    Json(serde_json::json!({
        "name": state.config.bot_name,
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_secs": uptime.as_secs(),
        "delivery": {
            "channel": delivery.name(),
            "configured": delivery.is_configured(),
            "status": delivery.status_line(),
        },
        "gateway": {
            "host": state.config.gateway.host,
            "port": state.config.gateway.port,
        }
    }))
}

// ---- View ----

/// Currently selected view.
pub async fn get_view(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let view = state.dashboard.lock().await.view();
    let views: Vec<_> = View::ALL
        .iter()
        .map(|v| serde_json::json!({"id": v.id(), "label": v.label()}))
        .collect();
    Json(serde_json::json!({"ok": true, "view": view, "views": views}))
}

#[derive(Debug, Deserialize)]
pub struct SelectView {
    pub view: String,
}

/// Switch the active view.
pub async fn set_view(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SelectView>,
) -> Json<serde_json::Value> {
    let view = match body.view.parse::<View>() {
        Ok(v) => v,
        Err(e) => return error_json(&e),
    };
    state.dashboard.lock().await.select(view);
    Json(serde_json::json!({"ok": true, "view": view}))
}

// ---- Groups ----

/// List all subscriber groups with their share of the audience.
pub async fn list_groups(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let dashboard = state.dashboard.lock().await;
    let registry = dashboard.registry();
    let total = registry.total_subscribers();
    let groups: Vec<_> = registry
        .list()
        .iter()
        .map(|g| {
            serde_json::json!({
                "id": g.id,
                "name": g.name,
                "count": g.count,
                "color": g.color,
                "share_pct": g.share_of(total).round(),
            })
        })
        .collect();
    Json(serde_json::json!({"ok": true, "groups": groups, "count": groups.len()}))
}

/// Look up one group.
pub async fn get_group(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Json<serde_json::Value> {
    let dashboard = state.dashboard.lock().await;
    match dashboard.registry().find_by_id(&id) {
        Some(group) => Json(serde_json::json!({"ok": true, "group": group})),
        None => error_json(&NewsBotError::NotFound(format!("group '{id}'"))),
    }
}

// ---- Broadcasts ----

/// Every broadcast, newest first.
pub async fn list_broadcasts(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let dashboard = state.dashboard.lock().await;
    let items = dashboard.store().list_all();
    Json(serde_json::json!({"ok": true, "broadcasts": items, "count": items.len()}))
}

#[derive(Debug, Default, Deserialize)]
pub struct PendingQuery {
    pub limit: Option<usize>,
}

/// Pending broadcasts only, optionally capped.
pub async fn list_pending_broadcasts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PendingQuery>,
) -> Json<serde_json::Value> {
    let dashboard = state.dashboard.lock().await;
    let items: Vec<&ScheduledBroadcast> = dashboard.store().list_pending(query.limit);
    Json(serde_json::json!({"ok": true, "broadcasts": items, "count": items.len()}))
}

/// Delete a pending broadcast. Sent ones are refused.
pub async fn delete_broadcast(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Json<serde_json::Value> {
    match state.dashboard.lock().await.delete(&id) {
        Ok(removed) => Json(serde_json::json!({"ok": true, "removed": removed.is_some()})),
        Err(e) => error_json(&e),
    }
}

// ---- Compose ----

/// Current compose draft.
pub async fn get_compose(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let dashboard = state.dashboard.lock().await;
    let form = compose_json(dashboard.form(), dashboard.confirmation_visible());
    Json(serde_json::json!({"ok": true, "form": form}))
}

/// Partial update of the draft — only fields present in the body change.
#[derive(Debug, Default, Deserialize)]
pub struct ComposeUpdate {
    pub text: Option<String>,
    pub group: Option<String>,
    pub datetime: Option<String>,
}

pub async fn update_compose(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ComposeUpdate>,
) -> Json<serde_json::Value> {
    let mut dashboard = state.dashboard.lock().await;
    let form = dashboard.form_mut();
    if let Some(text) = &body.text {
        form.set_text(text);
    }
    if let Some(group) = &body.group {
        form.set_group(group);
    }
    if let Some(datetime) = &body.datetime {
        form.set_datetime(datetime);
    }
    let form = compose_json(dashboard.form(), dashboard.confirmation_visible());
    Json(serde_json::json!({"ok": true, "form": form}))
}

/// Schedule the current draft.
pub async fn submit_compose(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let mut dashboard = state.dashboard.lock().await;
    match dashboard.submit() {
        Ok(SubmitOutcome::Scheduled(item)) => {
            Json(serde_json::json!({"ok": true, "scheduled": true, "broadcast": item}))
        }
        Ok(SubmitOutcome::Declined) => Json(serde_json::json!({"ok": true, "scheduled": false})),
        Err(e) => error_json(&e),
    }
}

/// Clear text and date-time.
pub async fn clear_compose(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let mut dashboard = state.dashboard.lock().await;
    dashboard.clear_form();
    let form = compose_json(dashboard.form(), dashboard.confirmation_visible());
    Json(serde_json::json!({"ok": true, "form": form}))
}

// ---- Stats ----

/// Overview metric cards.
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let dashboard = state.dashboard.lock().await;
    Json(serde_json::json!({"ok": true, "stats": dashboard.stats()}))
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsbot_core::NewsBotConfig;

    fn test_state() -> State<Arc<AppState>> {
        State(Arc::new(AppState::new(NewsBotConfig::default())))
    }

    fn compose(text: Option<&str>, group: Option<&str>, datetime: Option<&str>) -> Json<ComposeUpdate> {
        Json(ComposeUpdate {
            text: text.map(String::from),
            group: group.map(String::from),
            datetime: datetime.map(String::from),
        })
    }

    // ---- Health & Info ----

    #[tokio::test]
    async fn test_health_check() {
        let json = health_check().await.0;
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_system_info() {
        let json = system_info(test_state()).await.0;
        assert_eq!(json["name"], "NewsBot");
        assert_eq!(json["delivery"]["channel"], "telegram");
        assert_eq!(json["delivery"]["configured"], false);
        assert_eq!(json["delivery"]["status"], "Токен не задан");
        assert!(json["uptime_secs"].is_number());
    }

    // ---- View ----

    #[tokio::test]
    async fn test_view_selection() {
        let state = test_state();
        let json = get_view(State(state.0.clone())).await.0;
        assert_eq!(json["view"], "dashboard");
        assert_eq!(json["views"].as_array().unwrap().len(), 4);

        let body = Json(SelectView { view: "schedule".into() });
        let json = set_view(State(state.0.clone()), body).await.0;
        assert_eq!(json["ok"], true);
        let json = get_view(state).await.0;
        assert_eq!(json["view"], "schedule");
    }

    #[tokio::test]
    async fn test_unknown_view_rejected() {
        let state = test_state();
        let body = Json(SelectView { view: "settings".into() });
        let json = set_view(State(state.0.clone()), body).await.0;
        assert_eq!(json["ok"], false);
        assert_eq!(get_view(state).await.0["view"], "dashboard");
    }

    // ---- Groups ----

    #[tokio::test]
    async fn test_list_groups() {
        let json = list_groups(test_state()).await.0;
        let groups = json["groups"].as_array().unwrap();
        assert_eq!(groups.len(), 4);
        assert_eq!(groups[0]["id"], "all");
        assert_eq!(groups[0]["share_pct"], 100.0);
        assert_eq!(groups[2]["share_pct"], 25.0);
    }

    #[tokio::test]
    async fn test_get_group() {
        let json = get_group(test_state(), Path("vip".into())).await.0;
        assert_eq!(json["group"]["name"], "VIP клиенты");

        let json = get_group(test_state(), Path("nope".into())).await.0;
        assert_eq!(json["ok"], false);
    }

    // ---- Broadcasts ----

    #[tokio::test]
    async fn test_list_broadcasts_seeded() {
        let json = list_broadcasts(test_state()).await.0;
        assert_eq!(json["count"], 3);
        assert_eq!(json["broadcasts"][2]["status"], "sent");
    }

    #[tokio::test]
    async fn test_pending_never_returns_sent() {
        let json = list_pending_broadcasts(test_state(), Query(PendingQuery::default())).await.0;
        assert_eq!(json["count"], 2);
        let items = json["broadcasts"].as_array().unwrap();
        assert!(items.iter().all(|b| b["status"] == "pending"));

        let json = list_pending_broadcasts(test_state(), Query(PendingQuery { limit: Some(1) })).await.0;
        assert_eq!(json["count"], 1);
        assert_eq!(json["broadcasts"][0]["id"], "1");
    }

    #[tokio::test]
    async fn test_delete_broadcast() {
        let state = test_state();
        let json = delete_broadcast(State(state.0.clone()), Path("2".into())).await.0;
        assert_eq!(json["ok"], true);
        assert_eq!(json["removed"], true);

        let json = delete_broadcast(State(state.0.clone()), Path("2".into())).await.0;
        assert_eq!(json["ok"], true);
        assert_eq!(json["removed"], false);

        let json = delete_broadcast(State(state.0.clone()), Path("3".into())).await.0;
        assert_eq!(json["ok"], false);

        assert_eq!(list_broadcasts(state).await.0["count"], 2);
    }

    // ---- Compose ----

    #[tokio::test(start_paused = true)]
    async fn test_compose_and_submit() {
        let state = test_state();
        let json = update_compose(
            State(state.0.clone()),
            compose(Some("Hello"), Some("vip"), Some("2026-03-01 09:00")),
        )
        .await
        .0;
        assert_eq!(json["form"]["ready"], true);
        assert_eq!(json["form"]["chars"], 5);

        let json = submit_compose(State(state.0.clone())).await.0;
        assert_eq!(json["scheduled"], true);
        assert_eq!(json["broadcast"]["group"], "VIP клиенты");
        assert_eq!(json["broadcast"]["status"], "pending");

        let json = list_broadcasts(State(state.0.clone())).await.0;
        assert_eq!(json["count"], 4);
        assert_eq!(json["broadcasts"][0]["text"], "Hello");

        let json = get_compose(state).await.0;
        assert_eq!(json["form"]["text"], "");
        assert_eq!(json["form"]["group"], "vip");
        assert_eq!(json["form"]["confirmation"], true);
    }

    #[tokio::test]
    async fn test_submit_blank_is_declined() {
        let state = test_state();
        update_compose(State(state.0.clone()), compose(Some(""), None, Some("2026-03-01 09:00"))).await;
        let json = submit_compose(State(state.0.clone())).await.0;
        assert_eq!(json["ok"], true);
        assert_eq!(json["scheduled"], false);
        assert_eq!(list_broadcasts(state).await.0["count"], 3);
    }

    #[tokio::test]
    async fn test_submit_unknown_group_reports_error() {
        let state = test_state();
        update_compose(
            State(state.0.clone()),
            compose(Some("Hi"), Some("ghosts"), Some("2026-03-01 09:00")),
        )
        .await;
        let json = submit_compose(State(state.0.clone())).await.0;
        assert_eq!(json["ok"], false);
        assert!(json["error"].as_str().unwrap().contains("ghosts"));
        assert_eq!(list_broadcasts(state).await.0["count"], 3);
    }

    #[tokio::test]
    async fn test_clear_compose() {
        let state = test_state();
        update_compose(State(state.0.clone()), compose(Some("Hi"), Some("new"), Some("x"))).await;
        let json = clear_compose(state).await.0;
        assert_eq!(json["form"]["text"], "");
        assert_eq!(json["form"]["datetime"], "");
        assert_eq!(json["form"]["group"], "new");
    }

    // ---- Stats ----

    #[tokio::test]
    async fn test_stats_track_pending() {
        let state = test_state();
        let json = get_stats(State(state.0.clone())).await.0;
        assert_eq!(json["stats"][0]["value"], "1 248");
        assert_eq!(json["stats"][3]["value"], "2");

        delete_broadcast(State(state.0.clone()), Path("1".into())).await;
        let json = get_stats(state).await.0;
        assert_eq!(json["stats"][3]["value"], "1");
    }
}
