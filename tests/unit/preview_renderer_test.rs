//! Unit tests for preview composition and the fullscreen toggle.

use sitewright::services::preview_renderer::{
    compose, FullscreenHost, FullscreenToggle, LINK_GUARD_SCRIPT, SANDBOX_POLICY,
};
use sitewright::types::artifact::Artifact;
use sitewright::types::errors::PreviewError;

fn section<'a>(doc: &'a str, open: &str, close: &str) -> &'a str {
    let start = doc.find(open).unwrap() + open.len();
    let end = doc[start..].find(close).unwrap() + start;
    &doc[start..end]
}

#[test]
fn test_compose_places_each_part_once() {
    let artifact = Artifact::new(
        "<main><h1>Hello</h1></main>",
        "h1 { color: navy; }",
        "document.title = 'x';",
    );
    let doc = compose(&artifact, "T");

    assert!(doc.starts_with("<!DOCTYPE html>"));
    assert_eq!(doc.matches("<title>T</title>").count(), 1);
    assert_eq!(doc.matches("h1 { color: navy; }").count(), 1);
    assert_eq!(doc.matches("document.title = 'x';").count(), 1);

    let head = section(&doc, "<head>", "</head>");
    assert!(head.contains("<style>h1 { color: navy; }</style>"));
    assert!(head.contains("charset=\"UTF-8\""));
    assert!(head.contains("width=device-width"));

    let body = section(&doc, "<body>", "</body>");
    assert!(body.contains("<main><h1>Hello</h1></main>"));
    assert!(body.trim_end().ends_with("<script>document.title = 'x';</script>"));
}

#[test]
fn test_compose_escapes_title_but_not_code() {
    let artifact = Artifact::new("<b>bold & bright</b>", "", "if (a < b) {}");
    let doc = compose(&artifact, "Tom & Jerry </title>");

    assert!(doc.contains("<title>Tom &amp; Jerry &lt;/title&gt;</title>"));
    assert!(doc.contains("<b>bold & bright</b>"));
    assert!(doc.contains("if (a < b) {}"));
}

#[test]
fn test_compose_empty_artifact_is_valid_shell() {
    let doc = compose(&Artifact::default(), "website-project");
    assert!(doc.contains("<style></style>"));
    assert!(doc.contains("<script></script>"));
    assert!(doc.trim_end().ends_with("</html>"));
}

#[test]
fn test_sandbox_allows_scripts_without_top_navigation() {
    assert!(SANDBOX_POLICY.contains("allow-scripts"));
    assert!(SANDBOX_POLICY.contains("allow-same-origin"));
    assert!(!SANDBOX_POLICY.contains("allow-top-navigation"));
}

#[test]
fn test_link_guard_blocks_clicks_and_swallows_access_errors() {
    assert!(LINK_GUARD_SCRIPT.starts_with("function(frame)"));
    assert!(LINK_GUARD_SCRIPT.contains("preventDefault"));
    assert!(LINK_GUARD_SCRIPT.contains("try{"));
    assert!(LINK_GUARD_SCRIPT.contains("catch(err)"));
}

// === FullscreenToggle ===

#[derive(Default)]
struct FakeHost {
    active: bool,
    refuse: bool,
}

impl FullscreenHost for FakeHost {
    fn enter(&mut self) -> Result<(), PreviewError> {
        if self.refuse {
            return Err(PreviewError::Fullscreen("not allowed".into()));
        }
        self.active = true;
        Ok(())
    }

    fn exit(&mut self) -> Result<(), PreviewError> {
        self.active = false;
        Ok(())
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

#[test]
fn test_toggle_enters_and_exits_native() {
    let mut host = FakeHost::default();
    let mut toggle = FullscreenToggle::new();

    assert!(toggle.toggle(&mut host));
    assert!(host.active);
    assert!(!toggle.is_emulated());

    assert!(!toggle.toggle(&mut host));
    assert!(!host.active);
}

#[test]
fn test_external_exit_is_picked_up_by_sync() {
    let mut host = FakeHost::default();
    let mut toggle = FullscreenToggle::new();
    toggle.toggle(&mut host);

    host.active = false;
    assert!(!toggle.sync(&host));
    assert!(!toggle.is_fullscreen());

    assert!(toggle.toggle(&mut host));
}

#[test]
fn test_refused_host_falls_back_to_emulation() {
    let mut host = FakeHost { refuse: true, ..Default::default() };
    let mut toggle = FullscreenToggle::new();

    assert!(toggle.toggle(&mut host));
    assert!(toggle.is_emulated());
    assert!(!host.active);

    assert!(!toggle.toggle(&mut host));
    assert!(!toggle.is_emulated());
}

#[test]
fn test_sync_keeps_emulated_state() {
    let mut host = FakeHost { refuse: true, ..Default::default() };
    let mut toggle = FullscreenToggle::new();
    toggle.toggle(&mut host);

    assert!(toggle.sync(&host));
}
