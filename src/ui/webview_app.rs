//! Studio window built on `wry` + `tao`.
//!
//! Architecture:
//! - The studio page is served from the `sw://` custom protocol.
//! - The generated site renders in a sandboxed `srcdoc` iframe inside it.
//! - IPC from JS → Rust via `window.ipc.postMessage()`; Rust → JS by
//!   evaluating calls on `window.__sw`.
//! - Generation requests run on a tokio runtime. Their result comes back to
//!   the UI thread as a [`UserEvent`], where the session settles it.

use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::{json, Value};
use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoop, EventLoopBuilder, EventLoopProxy};
use tao::window::{Fullscreen, Window, WindowBuilder};
use wry::WebViewBuilder;

use crate::app::App;
use crate::database::Database;
use crate::managers::history_manager::{format_timestamp, truncate_prompt, HistoryManagerTrait, PROMPT_PREVIEW_LEN};
use crate::managers::session_manager::SessionManagerTrait;
use crate::services::generation_client::generate_with_timeout;
use crate::services::preview_renderer::{FullscreenHost, FullscreenToggle, LINK_GUARD_SCRIPT, SANDBOX_POLICY};
use crate::types::artifact::CodeField;
use crate::types::errors::{GenerationError, PreviewError};
use crate::types::generation::GeneratedCode;
use crate::types::history::HistoryRecord;
use crate::types::session::{Notification, NotificationKind};

#[derive(Debug)]
enum UserEvent {
    EvalScript(String),
    GenerationFinished(Result<GeneratedCode, GenerationError>),
    ToggleFullscreen,
}

struct StudioState {
    app: App,
    fullscreen: FullscreenToggle,
}

/// What the IPC handler needs besides the state.
struct IpcContext {
    runtime: tokio::runtime::Handle,
    proxy: EventLoopProxy<UserEvent>,
}

const STUDIO_CSS: &str = include_str!("../../resources/ui/studio.css");
const STUDIO_JS: &str = include_str!("../../resources/ui/studio.js");

fn studio_html(project_name: &str) -> String {
    let body = format!(
        r#"<header><h1>Sitewright</h1><span class="title">Describe your website and we will build it</span></header>
<main>
<div class="sidebar">
<form id="form" class="card form">
<label for="prompt">Website description</label>
<textarea id="prompt" placeholder="A portfolio site for a landscape photographer..."></textarea>
<button id="generate" class="primary" type="submit">Generate</button>
</form>
<div class="card history">
<input id="history-search" type="text" placeholder="Search history..." />
<ul id="history-list"></ul>
</div>
</div>
<div class="workspace">
<div id="preview-card" class="card">
<div class="toolbar"><span class="title">{title}</span>
<button id="save" disabled>Save to history</button>
<button id="download">Download</button>
<button id="fullscreen">Fullscreen</button></div>
<iframe id="preview" sandbox="{sandbox}" title="Website preview"></iframe>
</div>
<div class="card">
<div class="toolbar tabs"><button data-tab="html" class="active">HTML</button><button data-tab="css">CSS</button><button data-tab="js">JS</button><span class="title"></span><button id="copy">Copy</button></div>
<textarea id="code" class="code" spellcheck="false"></textarea>
</div>
</div>
</main>
<div id="toasts"></div>"#,
        title = escape_attr(project_name),
        sandbox = SANDBOX_POLICY,
    );

    let mut html = String::with_capacity(body.len() + STUDIO_CSS.len() + STUDIO_JS.len() + LINK_GUARD_SCRIPT.len() + 256);
    html.push_str("<!DOCTYPE html><html><head><meta charset=\"UTF-8\"><title>Sitewright</title><style>");
    html.push_str(STUDIO_CSS);
    html.push_str("</style></head><body>");
    html.push_str(&body);
    html.push_str("<script>window.__sw_guard=");
    html.push_str(LINK_GUARD_SCRIPT);
    html.push_str(";</script><script>");
    html.push_str(STUDIO_JS);
    html.push_str("</script></body></html>");
    html
}

fn escape_attr(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

// ─── Native fullscreen ───

struct TaoFullscreen<'a> {
    window: &'a Window,
}

impl FullscreenHost for TaoFullscreen<'_> {
    fn enter(&mut self) -> Result<(), PreviewError> {
        if self.window.current_monitor().is_none() {
            return Err(PreviewError::Fullscreen("no monitor for window".into()));
        }
        self.window.set_fullscreen(Some(Fullscreen::Borderless(None)));
        Ok(())
    }

    fn exit(&mut self) -> Result<(), PreviewError> {
        self.window.set_fullscreen(None);
        Ok(())
    }

    fn is_active(&self) -> bool {
        self.window.fullscreen().is_some()
    }
}

// ─── Scripts sent to the page ───

fn call(function: &str, arg: &Value) -> String {
    format!("if(window.__sw)__sw.{}({});", function, arg)
}

fn toast_script(note: &Notification) -> String {
    call("toast", &json!(note))
}

fn error_toast(description: impl Into<String>) -> String {
    toast_script(&Notification::new(NotificationKind::Error, "Error", description))
}

fn render_script(app: &App) -> String {
    call(
        "render",
        &json!({
            "prompt": app.session.prompt(),
            "artifact": app.session.artifact(),
            "document": app.preview_document(),
            "source_id": app.session.source_id(),
        }),
    )
}

fn history_script(records: &[HistoryRecord]) -> String {
    let items: Vec<Value> = records
        .iter()
        .map(|r| {
            json!({
                "id": r.id,
                "prompt": r.prompt,
                "label": truncate_prompt(&r.prompt, PROMPT_PREVIEW_LEN),
                "time": format_timestamp(r.timestamp),
            })
        })
        .collect();
    call("history", &Value::Array(items))
}

fn filtered_history(app: &App, query: &str) -> Vec<HistoryRecord> {
    if query.trim().is_empty() {
        app.history.list()
    } else {
        app.history.search(query)
    }
}

fn fullscreen_script(toggle: &FullscreenToggle) -> String {
    call(
        "fullscreen",
        &json!({"active": toggle.is_fullscreen(), "emulated": toggle.is_emulated()}),
    )
}

// ─── IPC handler ───

fn handle_ipc(state: &mut StudioState, ctx: &IpcContext, message: &str) -> Option<UserEvent> {
    let msg: Value = serde_json::from_str(message).ok()?;
    let cmd = msg.get("cmd")?.as_str()?;
    let arg = |name: &str| msg.get(name).and_then(|v| v.as_str()).unwrap_or("").to_string();
    let app = &mut state.app;

    match cmd {
        "ui_ready" => {
            let mut js = history_script(&app.history.list());
            if app.session.source_id().is_some() || !app.session.artifact().is_empty() {
                js.push_str(&render_script(app));
            }
            js.push_str(&fullscreen_script(&state.fullscreen));
            Some(UserEvent::EvalScript(js))
        }

        "generate" => {
            let prompt = arg("prompt");
            if let Err(e) = app.session.begin(&prompt) {
                return Some(UserEvent::EvalScript(error_toast(e.to_string())));
            }

            let generator = app.generator.clone();
            let timeout = app.generation_timeout();
            let proxy = ctx.proxy.clone();
            ctx.runtime.spawn(async move {
                let result = generate_with_timeout(generator.as_ref(), &prompt, timeout).await;
                if proxy.send_event(UserEvent::GenerationFinished(result)).is_err() {
                    tracing::warn!("event loop closed before generation finished");
                }
            });
            Some(UserEvent::EvalScript(call("busy", &json!(true))))
        }

        "edit" => {
            let field: CodeField = match arg("field").parse() {
                Ok(f) => f,
                Err(e) => {
                    tracing::warn!(error = %e, "ignoring edit");
                    return None;
                }
            };
            app.session.edit_field(field, arg("value"));
            Some(UserEvent::EvalScript(call("preview", &json!(app.preview_document()))))
        }

        "save_edits" => {
            let App { history, session, .. } = app;
            let js = match session.save_edits(&mut *history) {
                Ok(Some(_)) => {
                    let mut js = toast_script(&Notification::new(
                        NotificationKind::Success,
                        "Saved",
                        "Your edits were saved to history",
                    ));
                    js.push_str(&history_script(&history.list()));
                    js
                }
                Ok(None) => toast_script(&Notification::new(
                    NotificationKind::Warning,
                    "Nothing to save",
                    "This website is no longer in history",
                )),
                Err(e) => error_toast(e.to_string()),
            };
            Some(UserEvent::EvalScript(js))
        }

        "history_list" => {
            let records = filtered_history(app, &arg("query"));
            Some(UserEvent::EvalScript(history_script(&records)))
        }

        "history_load" => {
            let id = arg("id");
            let Some(record) = app.history.get_by_id(&id) else {
                return Some(UserEvent::EvalScript(error_toast("That history entry no longer exists")));
            };
            let js = match app.session.load_from_history(&record) {
                Ok(note) => {
                    let mut js = render_script(app);
                    js.push_str(&toast_script(&note));
                    js
                }
                Err(e) => error_toast(e.to_string()),
            };
            Some(UserEvent::EvalScript(js))
        }

        "history_delete" => {
            let id = arg("id");
            let mut js = match app.history.delete(&id) {
                Ok(_) => toast_script(&Notification::new(
                    NotificationKind::Success,
                    "Deleted",
                    "Item removed from history",
                )),
                Err(e) => error_toast(e.to_string()),
            };
            js.push_str(&history_script(&filtered_history(app, &arg("query"))));
            Some(UserEvent::EvalScript(js))
        }

        "download" => {
            let mut js = call("downloading", &json!(true));
            match app.export_current() {
                Ok(path) => {
                    tracing::info!(path = %path.display(), "website exported");
                    js.push_str(&toast_script(&Notification::new(
                        NotificationKind::Success,
                        "Downloaded!",
                        format!("Your website has been saved to {}", path.display()),
                    )));
                }
                Err(e) => {
                    tracing::error!(error = %e, "export failed");
                    js.push_str(&error_toast("Failed to create download. Please try again."));
                }
            }
            js.push_str(&call("downloading", &json!(false)));
            Some(UserEvent::EvalScript(js))
        }

        "toggle_fullscreen" => Some(UserEvent::ToggleFullscreen),

        _ => None,
    }
}

fn lock_state(state: &Mutex<StudioState>) -> Option<MutexGuard<'_, StudioState>> {
    match state.lock() {
        Ok(guard) => Some(guard),
        Err(e) => {
            tracing::error!(error = %e, "studio state poisoned");
            None
        }
    }
}

// ─── Main entry point ───

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let db_path = Database::default_path();
    let app = App::open_default()?;
    let page = studio_html(app.project_name());
    let state = Arc::new(Mutex::new(StudioState { app, fullscreen: FullscreenToggle::new() }));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()?;

    let event_loop: EventLoop<UserEvent> = EventLoopBuilder::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let window = WindowBuilder::new()
        .with_title("Sitewright")
        .with_inner_size(tao::dpi::LogicalSize::new(1280.0, 800.0))
        .build(&event_loop)?;

    let ipc_state = state.clone();
    let ipc_ctx = IpcContext { runtime: runtime.handle().clone(), proxy: proxy.clone() };

    let builder = WebViewBuilder::new()
        .with_custom_protocol("sw".into(), move |_wv_id, _request| {
            wry::http::Response::builder()
                .header("Content-Type", "text/html; charset=utf-8")
                .body(page.clone().into_bytes().into())
                .unwrap_or_else(|_| wry::http::Response::new(Vec::new().into()))
        })
        .with_url("sw://localhost/")
        .with_ipc_handler(move |msg: wry::http::Request<String>| {
            let body = msg.body().as_str();
            tracing::debug!(body = %body.chars().take(200).collect::<String>(), "ipc");
            let Some(mut s) = lock_state(&ipc_state) else { return };
            if let Some(event) = handle_ipc(&mut s, &ipc_ctx, body) {
                if ipc_ctx.proxy.send_event(event).is_err() {
                    tracing::warn!("event loop closed");
                }
            }
        })
        .with_devtools(cfg!(debug_assertions));

    #[cfg(target_os = "linux")]
    let webview = {
        use tao::platform::unix::WindowExtUnix;
        use wry::WebViewBuilderExtUnix;
        let vbox = window.default_vbox().ok_or("failed to get GTK vbox")?;
        builder.build_gtk(vbox)?
    };

    #[cfg(not(target_os = "linux"))]
    let webview = builder.build(&window)?;

    tracing::info!(db = %db_path.display(), "studio window ready");

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;
        // Owned by the loop so spawned generations keep running.
        let _runtime = &runtime;

        let eval = |js: &str| {
            if let Err(e) = webview.evaluate_script(js) {
                tracing::warn!(error = %e, "script evaluation failed");
            }
        };

        match event {
            Event::WindowEvent { event: WindowEvent::CloseRequested, .. } => {
                *control_flow = ControlFlow::Exit;
            }

            Event::WindowEvent { event: WindowEvent::Resized(_), .. } => {
                let Some(mut s) = lock_state(&state) else { return };
                let was = s.fullscreen.is_fullscreen();
                if s.fullscreen.sync(&TaoFullscreen { window: &window }) != was {
                    eval(&fullscreen_script(&s.fullscreen));
                }
            }

            Event::UserEvent(user_event) => match user_event {
                UserEvent::EvalScript(js) => eval(&js),

                UserEvent::GenerationFinished(result) => {
                    let Some(mut s) = lock_state(&state) else { return };
                    let app = &mut s.app;
                    let mut js = call("busy", &json!(false));
                    match app.session.finish(&mut app.history, result) {
                        Ok(outcome) => {
                            js.push_str(&render_script(app));
                            for note in &outcome.notifications {
                                js.push_str(&toast_script(note));
                            }
                            js.push_str(&history_script(&app.history.list()));
                        }
                        Err(e) => {
                            tracing::error!(error = %e, "generation result dropped");
                        }
                    }
                    eval(&js);
                }

                UserEvent::ToggleFullscreen => {
                    let Some(mut s) = lock_state(&state) else { return };
                    s.fullscreen.toggle(&mut TaoFullscreen { window: &window });
                    eval(&fullscreen_script(&s.fullscreen));
                }
            },

            _ => {}
        }
    })
}
