//! Sitewright studio window.
//!
//! Uses `wry` for cross-platform WebView rendering:
//! - Windows: WebView2
//! - Linux: WebKitGTK
//! - macOS: WKWebView
//!
//! The studio UI is HTML/CSS/JS from `resources/ui/`. The generated site is
//! previewed in a sandboxed iframe inside it.

pub mod webview_app;
