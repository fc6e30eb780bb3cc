//! RPC method handler for the Sitewright JSON-RPC protocol.
//!
//! Kept apart from `rpc_server.rs` so it can be unit-tested independently.
//! `handle_method` dispatches one call to the history store, the session,
//! the preview and export services, or the settings engine.

use std::sync::{Mutex, MutexGuard};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde_json::{json, Value};
use tokio::runtime::Runtime;

use crate::app::App;
use crate::managers::history_manager::HistoryManagerTrait;
use crate::managers::session_manager::SessionManagerTrait;
use crate::services::export_service;
use crate::services::generation_client::generate_with_timeout;
use crate::services::preview_renderer;
use crate::services::settings_engine::SettingsEngineTrait;
use crate::types::artifact::{Artifact, CodeField};
use crate::types::history::HistoryUpdate;

/// Encode bytes to base64 string.
pub fn base64_encode(data: &[u8]) -> String {
    BASE64.encode(data)
}

/// Decode base64 string to bytes.
pub fn base64_decode(input: &str) -> Result<Vec<u8>, String> {
    BASE64.decode(input).map_err(|e| format!("base64 decode error: {}", e))
}

fn lock(app: &Mutex<App>) -> Result<MutexGuard<'_, App>, String> {
    app.lock().map_err(|e| e.to_string())
}

fn str_param<'a>(params: &'a Value, name: &str) -> Result<&'a str, String> {
    params
        .get(name)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("missing {}", name))
}

fn opt_str(params: &Value, name: &str) -> Option<String> {
    params.get(name).and_then(|v| v.as_str()).map(str::to_string)
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<Value, String> {
    serde_json::to_value(value).map_err(|e| e.to_string())
}

/// Artifact from `html`/`css`/`js` params, or the session's artifact when none is given.
fn artifact_param(app: &App, params: &Value) -> Artifact {
    let html = opt_str(params, "html");
    let css = opt_str(params, "css");
    let js = opt_str(params, "js");
    if html.is_none() && css.is_none() && js.is_none() {
        return app.session.artifact().clone();
    }
    Artifact {
        html: html.unwrap_or_default(),
        css: css.unwrap_or_default(),
        js: js.unwrap_or_default(),
    }
}

/// Dispatch a JSON-RPC method call.
///
/// `rt` drives the one async call, `generation.submit`. The App lock is
/// released while the request is in flight.
pub fn handle_method(app: &Mutex<App>, rt: &Runtime, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        // ─── Generation session ───
        "generation.submit" => {
            let prompt = str_param(params, "prompt")?;
            let (generator, timeout) = {
                let mut a = lock(app)?;
                a.session.begin(prompt).map_err(|e| e.to_string())?;
                (a.generator.clone(), a.generation_timeout())
            };

            let result = rt.block_on(generate_with_timeout(generator.as_ref(), prompt, timeout));

            let mut guard = lock(app)?;
            let a = &mut *guard;
            let outcome = a.session.finish(&mut a.history, result).map_err(|e| e.to_string())?;
            to_json(&outcome)
        }
        "generation.state" => {
            let a = lock(app)?;
            Ok(json!({
                "state": to_json(&a.session.state())?,
                "prompt": a.session.prompt(),
                "artifact": to_json(a.session.artifact())?,
                "source_id": a.session.source_id(),
                "last_failure": a.session.last_failure(),
            }))
        }
        "session.load_history" => {
            let id = str_param(params, "id")?;
            let mut guard = lock(app)?;
            let a = &mut *guard;
            let record = a
                .history
                .get_by_id(id)
                .ok_or_else(|| format!("history record not found: {}", id))?;
            let notification = a.session.load_from_history(&record).map_err(|e| e.to_string())?;
            Ok(json!({"record": to_json(&record)?, "notification": to_json(&notification)?}))
        }
        "session.edit" => {
            let field: CodeField = str_param(params, "field")?.parse()?;
            let value = str_param(params, "value")?;
            let mut a = lock(app)?;
            a.session.edit_field(field, value.to_string());
            Ok(json!({"ok": true}))
        }
        "session.save_edits" => {
            let mut guard = lock(app)?;
            let a = &mut *guard;
            let record = a.session.save_edits(&mut a.history).map_err(|e| e.to_string())?;
            to_json(&record)
        }

        // ─── History ───
        "history.list" => {
            let a = lock(app)?;
            to_json(&a.history.list())
        }
        "history.get" => {
            let id = str_param(params, "id")?;
            let a = lock(app)?;
            to_json(&a.history.get_by_id(id))
        }
        "history.search" => {
            let query = str_param(params, "query")?;
            let a = lock(app)?;
            to_json(&a.history.search(query))
        }
        "history.update" => {
            let id = str_param(params, "id")?;
            let update = HistoryUpdate {
                prompt: opt_str(params, "prompt"),
                html: opt_str(params, "html"),
                css: opt_str(params, "css"),
                js: opt_str(params, "js"),
            };
            let mut a = lock(app)?;
            let record = a.history.update(id, update).map_err(|e| e.to_string())?;
            to_json(&record)
        }
        "history.delete" => {
            let id = str_param(params, "id")?;
            let mut a = lock(app)?;
            let removed = a.history.delete(id).map_err(|e| e.to_string())?;
            Ok(json!({"removed": removed}))
        }
        "history.clear" => {
            let mut a = lock(app)?;
            a.history.clear().map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        // ─── Preview / export ───
        "preview.compose" => {
            let a = lock(app)?;
            let artifact = artifact_param(&a, params);
            let title = opt_str(params, "title").unwrap_or_else(|| a.project_name().to_string());
            Ok(json!({
                "document": preview_renderer::compose(&artifact, &title),
                "sandbox": preview_renderer::SANDBOX_POLICY,
            }))
        }
        "export.archive" => {
            let a = lock(app)?;
            let artifact = artifact_param(&a, params);
            let project = opt_str(params, "project_name").unwrap_or_else(|| a.project_name().to_string());
            let bytes = export_service::to_archive(&artifact, &project).map_err(|e| e.to_string())?;
            Ok(json!({
                "file_name": export_service::archive_file_name(&project),
                "data": base64_encode(&bytes),
            }))
        }
        "export.write" => {
            let a = lock(app)?;
            let path = a.export_current().map_err(|e| e.to_string())?;
            Ok(json!({"path": path.to_string_lossy()}))
        }

        // ─── Settings ───
        "settings.get" => {
            let a = lock(app)?;
            to_json(a.settings_engine.get_settings())
        }
        "settings.set" => {
            let key = str_param(params, "key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            let mut a = lock(app)?;
            a.settings_engine.set_value(key, value).map_err(|e| e.to_string())?;
            if key.starts_with("generation.") {
                a.reload_generator().map_err(|e| e.to_string())?;
            }
            Ok(json!({"ok": true}))
        }
        "settings.reset" => {
            let mut a = lock(app)?;
            a.settings_engine.reset().map_err(|e| e.to_string())?;
            a.reload_generator().map_err(|e| e.to_string())?;
            to_json(a.settings_engine.get_settings())
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
