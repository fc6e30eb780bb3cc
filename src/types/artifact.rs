use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The three source files of one generated website.
///
/// Fields are independent; any of them may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    pub html: String,
    pub css: String,
    pub js: String,
}

impl Artifact {
    pub fn new(html: impl Into<String>, css: impl Into<String>, js: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            css: css.into(),
            js: js.into(),
        }
    }

    /// Demo website shown when generation fails, so the user never lands on an empty preview.
    pub fn fallback() -> Self {
        Self {
            html: "<div class=\"container\">\n  <h1>Hello World</h1>\n  <p>This is a sample website</p>\n  <button id=\"btn\">Click me</button>\n</div>".to_string(),
            css: "body {\n  font-family: Arial, sans-serif;\n  margin: 0;\n  padding: 20px;\n  background-color: #f5f5f5;\n}\n\n.container {\n  max-width: 800px;\n  margin: 0 auto;\n  background: white;\n  padding: 20px;\n  border-radius: 8px;\n  box-shadow: 0 2px 10px rgba(0,0,0,0.1);\n}".to_string(),
            js: "document.getElementById(\"btn\").addEventListener(\"click\", function() {\n  alert(\"Button clicked!\");\n});".to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.html.is_empty() && self.css.is_empty() && self.js.is_empty()
    }

    pub fn field(&self, field: CodeField) -> &str {
        match field {
            CodeField::Html => &self.html,
            CodeField::Css => &self.css,
            CodeField::Js => &self.js,
        }
    }

    pub fn set_field(&mut self, field: CodeField, value: String) {
        match field {
            CodeField::Html => self.html = value,
            CodeField::Css => self.css = value,
            CodeField::Js => self.js = value,
        }
    }
}

/// One of the three editable code views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeField {
    Html,
    Css,
    Js,
}

impl CodeField {
    pub fn as_str(&self) -> &'static str {
        match self {
            CodeField::Html => "html",
            CodeField::Css => "css",
            CodeField::Js => "js",
        }
    }
}

impl fmt::Display for CodeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CodeField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "html" => Ok(CodeField::Html),
            "css" => Ok(CodeField::Css),
            "js" => Ok(CodeField::Js),
            other => Err(format!("unknown code field: {}", other)),
        }
    }
}
