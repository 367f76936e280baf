//! Server-rendered dashboard page: sidebar plus one of the four views.
//! Plain HTML forms, no client-side scripting.

use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use newsbot_core::{NewsBotError, ScheduledBroadcast, View};
use newsbot_scheduler::Dashboard;
use serde::Deserialize;
use std::fmt::Write as _;
use std::sync::Arc;

use super::server::AppState;

const STYLE: &str = r#"
body{margin:0;display:flex;min-height:100vh;background:#f8f8f7;font-family:sans-serif;color:#111827}
aside{width:14rem;background:#fff;border-right:1px solid #f3f4f6;padding:2rem 1rem;display:flex;flex-direction:column;gap:.25rem}
aside a{display:block;padding:.6rem .75rem;border-radius:.75rem;color:#6b7280;text-decoration:none;font-size:.875rem}
aside a.active{background:#eef2ff;color:#4338ca}
.brand{font-weight:600;margin-bottom:.25rem}.sub{font-size:.75rem;color:#9ca3af;margin-bottom:2rem}
.bot{margin-top:auto;padding:.5rem .75rem;border-radius:.75rem;background:#fffbeb;border:1px solid #fef3c7;font-size:.75rem;color:#b45309}
main{flex:1;padding:2rem;max-width:56rem}
.muted{color:#9ca3af;font-size:.875rem}.card{background:#fff;border:1px solid #f3f4f6;border-radius:1rem;padding:1.25rem;margin-bottom:1rem}
.grid{display:grid;grid-template-columns:1fr 1fr;gap:1rem}.value{font-size:1.875rem;font-weight:600}
.row{display:flex;align-items:center;gap:1rem;padding:.75rem 0;border-bottom:1px solid #f9fafb}
.dot{width:.5rem;height:.5rem;border-radius:9999px;display:inline-block}
.badge{font-size:.75rem;padding:.25rem .6rem;border-radius:.5rem}.pending{background:#eef2ff;color:#4f46e5}.sent{background:#ecfdf5;color:#059669}
.ok{background:#ecfdf5;color:#059669;padding:.75rem 1rem;border-radius:.75rem}.err{background:#fef2f2;color:#b91c1c;padding:.75rem 1rem;border-radius:.75rem}
.bar{width:8rem;background:#f3f4f6;border-radius:9999px;height:.375rem}.bar div{height:.375rem;border-radius:9999px}
"#;

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render the whole page for the dashboard's current view.
pub fn render_page(dashboard: &Dashboard, bot_name: &str, error: Option<&str>) -> String {
    let view = dashboard.view();
    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html><html lang=\"ru\"><head><meta charset=\"utf-8\"><title>{} — {}</title><style>{STYLE}</style></head><body>",
        escape_html(bot_name),
        view.label()
    );

    html.push_str(&render_sidebar(dashboard, bot_name));
    html.push_str("<main>");
    if let Some(msg) = error {
        let _ = write!(html, "<p class=\"err\">{}</p>", escape_html(msg));
    }
    html.push_str(&match view {
        View::Dashboard => render_overview(dashboard),
        View::Compose => render_compose(dashboard),
        View::Schedule => render_schedule(dashboard),
        View::Subscribers => render_groups(dashboard),
    });
    html.push_str("</main></body></html>");
    html
}

fn render_sidebar(dashboard: &Dashboard, bot_name: &str) -> String {
    let mut html = String::from("<aside>");
    let _ = write!(
        html,
        "<div class=\"brand\">{}</div><div class=\"sub\">Панель управления</div>",
        escape_html(bot_name)
    );
    for view in View::ALL {
        let class = if view == dashboard.view() { " class=\"active\"" } else { "" };
        let _ = write!(html, "<a href=\"/view/{}\"{class}>{}</a>", view.id(), view.label());
    }
    let _ = write!(
        html,
        "<div class=\"bot\"><div>Telegram Bot</div><div>{}</div></div></aside>",
        escape_html(&dashboard.delivery().status_line())
    );
    html
}

fn broadcast_line(item: &ScheduledBroadcast) -> String {
    format!(
        "<div style=\"flex:1;min-width:0\"><div>{}</div><div class=\"muted\">{} · {}</div></div>",
        escape_html(&item.text),
        escape_html(&item.group),
        escape_html(&item.datetime)
    )
}

fn render_overview(dashboard: &Dashboard) -> String {
    let mut html = String::from("<h1>Обзор</h1><p class=\"muted\">Состояние вашей рассылки</p><div class=\"grid\">");
    for stat in dashboard.stats() {
        let _ = write!(
            html,
            "<div class=\"card\"><div class=\"muted\">{}</div><div class=\"value\">{}</div><div class=\"muted\">{}</div></div>",
            stat.label, stat.value, stat.delta
        );
    }
    html.push_str("</div><div class=\"card\"><h2>Ближайшие рассылки</h2>");
    let upcoming = dashboard.upcoming();
    if upcoming.is_empty() {
        html.push_str("<p class=\"muted\">Нет запланированных рассылок</p>");
    }
    for item in upcoming {
        let _ = write!(html, "<div class=\"row\">{}</div>", broadcast_line(item));
    }
    html.push_str("</div>");
    html
}

fn render_compose(dashboard: &Dashboard) -> String {
    let form = dashboard.form();
    let mut html = String::from(
        "<h1>Создать рассылку</h1><p class=\"muted\">Напишите сообщение и выберите аудиторию</p>\
         <form class=\"card\" method=\"post\" action=\"/ui/compose\"><p class=\"muted\">Группа получателей</p><div class=\"grid\">",
    );
    for group in dashboard.registry().list() {
        let checked = if group.id == form.group_id() { " checked" } else { "" };
        let _ = write!(
            html,
            "<label><input type=\"radio\" name=\"group\" value=\"{}\"{checked}> \
             <span class=\"dot\" style=\"background:{}\"></span> {} <span class=\"muted\">{}</span></label>",
            escape_html(&group.id),
            escape_html(&group.color),
            escape_html(&group.name),
            group.count
        );
    }
    let _ = write!(
        html,
        "</div><p class=\"muted\">Текст сообщения</p>\
         <textarea name=\"text\" rows=\"5\" style=\"width:100%\" placeholder=\"Введите текст рассылки...\">{}</textarea>\
         <p class=\"muted\" style=\"text-align:right\">{} символов</p>\
         <p class=\"muted\">Дата и время отправки</p>\
         <input type=\"datetime-local\" name=\"datetime\" value=\"{}\">\
         <p><button type=\"submit\" name=\"action\" value=\"submit\">Запланировать</button> \
         <button type=\"submit\" name=\"action\" value=\"clear\">Очистить</button></p>",
        escape_html(form.text()),
        form.char_count(),
        escape_html(form.datetime())
    );
    if dashboard.confirmation_visible() {
        html.push_str("<p class=\"ok\">Рассылка запланирована</p>");
    }
    html.push_str("</form>");
    html
}

fn render_schedule(dashboard: &Dashboard) -> String {
    let mut html = String::from(
        "<h1>Расписание</h1><p class=\"muted\">Все запланированные и отправленные сообщения</p><div class=\"card\">",
    );
    let items = dashboard.store().list_all();
    if items.is_empty() {
        html.push_str("<p class=\"muted\" style=\"text-align:center\">Нет сообщений</p>");
    }
    for item in items {
        let status = item.status;
        let _ = write!(
            html,
            "<div class=\"row\"><span class=\"dot {status}\"></span>{}<span class=\"badge {status}\">{}</span>",
            broadcast_line(item),
            status.label()
        );
        if item.is_pending() {
            let _ = write!(
                html,
                "<form method=\"post\" action=\"/ui/broadcasts/{}/delete\"><button type=\"submit\" title=\"Удалить\">✕</button></form>",
                escape_html(&item.id)
            );
        }
        html.push_str("</div>");
    }
    html.push_str("</div>");
    html
}

fn render_groups(dashboard: &Dashboard) -> String {
    let registry = dashboard.registry();
    let total = registry.total_subscribers();
    let mut html = String::from("<h1>Группы подписчиков</h1><p class=\"muted\">Сегменты для целевых рассылок</p>");
    for group in registry.list() {
        let share = group.share_of(total);
        let _ = write!(
            html,
            "<div class=\"card row\"><div style=\"flex:1\"><div>{}</div><div class=\"muted\">{} подписчиков</div></div>\
             <div class=\"bar\"><div style=\"width:{share:.1}%;background:{}\"></div></div><span>{}%</span></div>",
            escape_html(&group.name),
            group.count,
            escape_html(&group.color),
            share.round()
        );
    }
    html.push_str("<p class=\"muted\">Группы формируются автоматически при подключении Telegram-бота</p>");
    html
}

// ---- Handlers ----

/// Page for the currently selected view.
pub async fn index_page(State(state): State<Arc<AppState>>) -> Html<String> {
    let dashboard = state.dashboard.lock().await;
    Html(render_page(&dashboard, &state.config.bot_name, None))
}

/// Select a view and render it.
pub async fn view_page(
    State(state): State<Arc<AppState>>,
    Path(view): Path<String>,
) -> Response {
    let mut dashboard = state.dashboard.lock().await;
    match view.parse::<View>() {
        Ok(view) => {
            dashboard.select(view);
            Html(render_page(&dashboard, &state.config.bot_name, None)).into_response()
        }
        Err(e) => (
            StatusCode::NOT_FOUND,
            Html(render_page(&dashboard, &state.config.bot_name, Some(&e.to_string()))),
        )
            .into_response(),
    }
}

/// Fields posted by the compose form.
#[derive(Debug, Default, Deserialize)]
pub struct ComposeInput {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub datetime: String,
    #[serde(default)]
    pub action: String,
}

/// Submit or clear the compose form, then go back to it.
pub async fn compose_action(
    State(state): State<Arc<AppState>>,
    Form(input): Form<ComposeInput>,
) -> Response {
    let mut dashboard = state.dashboard.lock().await;
    let form = dashboard.form_mut();
    form.set_text(&input.text);
    form.set_datetime(&input.datetime);
    if let Some(group) = &input.group {
        form.set_group(group);
    }

    if input.action == "clear" {
        dashboard.clear_form();
        return Redirect::to("/view/compose").into_response();
    }

    match dashboard.submit() {
        Ok(_) => Redirect::to("/view/compose").into_response(),
        Err(e) => {
            tracing::warn!("⚠️ Compose rejected: {e}");
            dashboard.select(View::Compose);
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(render_page(&dashboard, &state.config.bot_name, Some(&e.to_string()))),
            )
                .into_response()
        }
    }
}

/// Delete a pending broadcast from the schedule view.
pub async fn delete_action(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    let mut dashboard = state.dashboard.lock().await;
    match dashboard.delete(&id) {
        Ok(_) => Redirect::to("/view/schedule").into_response(),
        Err(e @ NewsBotError::AlreadySent(_)) => {
            dashboard.select(View::Schedule);
            (
                StatusCode::CONFLICT,
                Html(render_page(&dashboard, &state.config.bot_name, Some(&e.to_string()))),
            )
                .into_response()
        }
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}
