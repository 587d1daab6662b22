//! HTML widget resource rendered by the host next to `topmovers` results.
//!
//! The script and stylesheet come from an external build step and are read
//! once at startup; their content is opaque here.

use std::fs;
use std::io;
use std::path::Path;

use rmcp::model::{AnnotateAble, Meta, RawResource, Resource, ResourceContents};
use serde_json::json;

pub const WIDGET_URI: &str = "ui://widget/topmovers.html";
pub const WIDGET_NAME: &str = "topmovers-widget";
pub const WIDGET_MIME_TYPE: &str = "text/html+skybridge";

const WIDGET_JS_FILE: &str = "widget.js";
const WIDGET_CSS_FILE: &str = "widget.css";
const WIDGET_DESCRIPTION: &str = "Displays an interactive widget showing top stock market gainers, \
losers, and most actively traded stocks from Alpha Vantage.";

/// Built widget script and stylesheet; either may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetAssets {
    js: Option<String>,
    css: Option<String>,
}

impl WidgetAssets {
    pub fn new(js: Option<String>, css: Option<String>) -> Self {
        Self { js, css }
    }

    /// Reads `widget.js` and `widget.css` from `dir`, warning about any that
    /// cannot be read.
    pub fn load(dir: &Path) -> Self {
        let js = read_asset(dir, WIDGET_JS_FILE);
        let css = read_asset(dir, WIDGET_CSS_FILE);
        Self { js, css }
    }

    pub fn render_html(&self) -> String {
        let mut html = String::from(r#"<div id="topmovers-root"></div>"#);
        if let Some(css) = self.css.as_deref().filter(|css| !css.is_empty()) {
            html.push_str("\n<style>");
            html.push_str(css);
            html.push_str("</style>");
        }
        if let Some(js) = self.js.as_deref() {
            html.push_str("\n<script type=\"module\">");
            html.push_str(js);
            html.push_str("</script>");
        }
        html
    }

    pub fn resource() -> Resource {
        let mut raw = RawResource::new(WIDGET_URI, WIDGET_NAME);
        raw.description = Some(String::from(WIDGET_DESCRIPTION));
        raw.mime_type = Some(String::from(WIDGET_MIME_TYPE));
        raw.no_annotation()
    }

    pub fn contents(&self) -> ResourceContents {
        ResourceContents::TextResourceContents {
            uri: String::from(WIDGET_URI),
            mime_type: Some(String::from(WIDGET_MIME_TYPE)),
            text: self.render_html(),
            meta: Some(widget_meta()),
        }
    }
}

fn widget_meta() -> Meta {
    let value = json!({
        "openai/widgetPrefersBorder": true,
        "openai/widgetDomain": "https://alphavantage.co",
        "openai/widgetCSP": {
            "connect_domains": ["https://www.alphavantage.co"],
            "resource_domains": [],
        },
        "openai/widgetDescription": WIDGET_DESCRIPTION,
    });
    match value {
        serde_json::Value::Object(map) => Meta(map),
        _ => Meta(serde_json::Map::new()),
    }
}

fn read_asset(dir: &Path, file: &str) -> Option<String> {
    let path = dir.join(file);
    match fs::read_to_string(&path) {
        Ok(content) => {
            tracing::debug!(path = %path.display(), bytes = content.len(), "loaded widget asset");
            Some(content)
        }
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "widget asset not found; build the widget first");
            None
        }
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "widget asset unreadable");
            None
        }
    }
}
