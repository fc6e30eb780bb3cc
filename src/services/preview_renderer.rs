//! Live preview composition and fullscreen tracking.
//!
//! `compose` folds an [`Artifact`] into one standalone HTML document. The
//! host shows it in an iframe sandboxed with [`SANDBOX_POLICY`] and runs
//! [`LINK_GUARD_SCRIPT`] after each load so links cannot navigate the host
//! page. Code is never sanitized.

use crate::types::artifact::Artifact;
use crate::types::errors::PreviewError;

/// iframe sandbox: scripts run and see a same-origin document, but
/// top-level navigation is not granted.
pub const SANDBOX_POLICY: &str = "allow-scripts allow-same-origin";

/// Host-side script taking the iframe element as `frame`. Access to the
/// document throws when the frame is cross-origin; that case is swallowed.
pub const LINK_GUARD_SCRIPT: &str = r#"function(frame){try{var d=frame.contentDocument||(frame.contentWindow&&frame.contentWindow.document);if(!d)return;var links=d.getElementsByTagName('a');for(var i=0;i<links.length;i++){links[i].addEventListener('click',function(e){e.preventDefault();});}}catch(err){console.log('Could not access preview content');}}"#;

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Composes the preview document: `css` in the head's style block, `html`
/// as body content, `js` in a script block closing the body.
pub fn compose(artifact: &Artifact, title: &str) -> String {
    let title = escape_text(title);
    let mut doc = String::with_capacity(
        artifact.html.len() + artifact.css.len() + artifact.js.len() + title.len() + 256,
    );
    doc.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    doc.push_str("<meta charset=\"UTF-8\">\n");
    doc.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    doc.push_str("<title>");
    doc.push_str(&title);
    doc.push_str("</title>\n<style>");
    doc.push_str(&artifact.css);
    doc.push_str("</style>\n</head>\n<body>\n");
    doc.push_str(&artifact.html);
    doc.push_str("\n<script>");
    doc.push_str(&artifact.js);
    doc.push_str("</script>\n</body>\n</html>\n");
    doc
}

/// The environment's native fullscreen capability.
pub trait FullscreenHost {
    fn enter(&mut self) -> Result<(), PreviewError>;
    fn exit(&mut self) -> Result<(), PreviewError>;
    fn is_active(&self) -> bool;
}

/// Fullscreen toggle state that follows the host.
///
/// When the host refuses, the toggle falls back to an emulated fullscreen
/// that the UI renders itself.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FullscreenToggle {
    host_active: bool,
    emulated: bool,
}

impl FullscreenToggle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_fullscreen(&self) -> bool {
        self.host_active || self.emulated
    }

    pub fn is_emulated(&self) -> bool {
        self.emulated
    }

    /// Flips fullscreen and returns the new state.
    pub fn toggle(&mut self, host: &mut dyn FullscreenHost) -> bool {
        if self.emulated {
            self.emulated = false;
            return self.is_fullscreen();
        }

        let result = if host.is_active() { host.exit() } else { host.enter() };
        match result {
            Ok(()) => self.host_active = host.is_active(),
            Err(e) => {
                tracing::warn!(error = %e, "native fullscreen failed, emulating");
                self.emulated = !self.host_active;
            }
        }
        self.is_fullscreen()
    }

    /// Re-reads the host after it reports a change, e.g. Escape pressed.
    pub fn sync(&mut self, host: &dyn FullscreenHost) -> bool {
        self.host_active = host.is_active();
        self.is_fullscreen()
    }
}
