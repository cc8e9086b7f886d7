//! Template rendering for release notes, headers and footers

use std::borrow::Cow;
use std::collections::BTreeMap;

use chrono::Utc;
use serde::Serialize;
use shipnotes_core::error::ChangelogError;
use shipnotes_core::Result;
use tera::{Context, Tera};
use tracing::debug;

/// Values available to templates
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReleaseContext {
    /// Project name from configuration
    pub project_name: String,
    /// Tag of the release being built
    pub tag: String,
    /// Previous release tag, empty for a first release
    pub previous_tag: String,
    /// Tag without a leading `v`
    pub version: String,
    /// Build date, `YYYY-MM-DD` in UTC
    pub date: String,
    /// Environment variables
    pub env: BTreeMap<String, String>,
}

impl ReleaseContext {
    /// Create a context for a tag, dated today
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        let version = tag.strip_prefix('v').unwrap_or(&tag).to_string();
        Self {
            project_name: String::new(),
            tag,
            previous_tag: String::new(),
            version,
            date: Utc::now().format("%Y-%m-%d").to_string(),
            env: BTreeMap::new(),
        }
    }

    /// Set the project name
    pub fn with_project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = name.into();
        self
    }

    /// Set the previous tag
    pub fn with_previous_tag(mut self, previous: Option<&str>) -> Self {
        self.previous_tag = previous.unwrap_or_default().to_string();
        self
    }

    /// Add environment variables
    pub fn with_env<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env
            .extend(vars.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }
}

/// Trait for template renderers
pub trait TemplateRenderer: Send + Sync {
    /// Expand `text` against the release context
    fn render(&self, text: &str, context: &ReleaseContext) -> Result<String>;
}

/// Renderer backed by Tera
#[derive(Debug, Clone, Copy, Default)]
pub struct TeraRenderer;

impl TeraRenderer {
    /// Create a new renderer
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for TeraRenderer {
    fn render(&self, text: &str, context: &ReleaseContext) -> Result<String> {
        if !has_template_syntax(text) {
            return Ok(text.to_string());
        }

        let text = escape_unclosed_comments(text);
        let context = Context::from_serialize(context).map_err(template_error)?;
        let rendered = Tera::one_off(&text, &context, false).map_err(template_error)?;
        debug!(input_len = text.len(), output_len = rendered.len(), "rendered template");
        Ok(rendered)
    }
}

fn has_template_syntax(text: &str) -> bool {
    text.contains("{{") || text.contains("{%") || has_comment(text)
}

fn has_comment(text: &str) -> bool {
    text.find("{#")
        .is_some_and(|start| text[start + 2..].contains("#}"))
}

/// Make `{#` literal when no `#}` follows it, so markdown heading ids such
/// as `## Notes {#notes}` survive rendering. `{# ... #}` stays a comment.
fn escape_unclosed_comments(text: &str) -> Cow<'_, str> {
    if !text.contains("{#") {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("{#") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("#}") {
            Some(end) => {
                out.push_str(&rest[start..start + 2 + end + 2]);
                rest = &after[end + 2..];
            }
            None => {
                out.push_str("{% raw %}{#{% endraw %}");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// Flatten a tera error and its causes into one message
fn template_error(err: tera::Error) -> ChangelogError {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(&err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = std::error::Error::source(cause);
    }
    ChangelogError::Template(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shipnotes_core::ShipnotesError;

    #[test]
    fn test_plain_text_is_unchanged() {
        let rendered = TeraRenderer::new()
            .render("c0ff33 coffeee\n", &ReleaseContext::new("v0.0.1"))
            .unwrap();
        assert_eq!(rendered, "c0ff33 coffeee\n");
    }

    #[test]
    fn test_substitutes_tag() {
        let rendered = TeraRenderer::new()
            .render("c0ff33 coffeee {{ tag }}", &ReleaseContext::new("v0.0.1"))
            .unwrap();
        assert_eq!(rendered, "c0ff33 coffeee v0.0.1");
    }

    #[test]
    fn test_context_fields() {
        let context = ReleaseContext::new("v1.2.3")
            .with_project_name("demo")
            .with_previous_tag(Some("v1.2.2"))
            .with_env([("GREETING", "hi")]);
        let rendered = TeraRenderer::new()
            .render(
                "{{ project_name }} {{ version }} since {{ previous_tag }} {{ env.GREETING }}",
                &context,
            )
            .unwrap();
        assert_eq!(rendered, "demo 1.2.3 since v1.2.2 hi");
    }

    #[test]
    fn test_malformed_template_is_error() {
        let err = TeraRenderer::new()
            .render("header {{ tag ", &ReleaseContext::new("v0.0.1"))
            .unwrap_err();
        assert!(matches!(
            err,
            ShipnotesError::Changelog(ChangelogError::Template(_))
        ));
        assert!(err.to_string().starts_with("template error:"));
    }

    #[test]
    fn test_heading_ids_are_literal() {
        let renderer = TeraRenderer::new();
        let context = ReleaseContext::new("v0.0.1");

        let plain = renderer.render("## Notes {#notes}\n", &context).unwrap();
        assert_eq!(plain, "## Notes {#notes}\n");

        let templated = renderer
            .render("## {{ tag }} {#release}", &context)
            .unwrap();
        assert_eq!(templated, "## v0.0.1 {#release}");
    }

    #[test]
    fn test_comments_are_dropped() {
        let rendered = TeraRenderer::new()
            .render("a{# hidden #}b {{ tag }}", &ReleaseContext::new("v1"))
            .unwrap();
        assert_eq!(rendered, "ab v1");
    }

    #[test]
    fn test_escape_leaves_closed_comments() {
        assert_eq!(escape_unclosed_comments("x {# y #} z"), "x {# y #} z");
        assert_eq!(
            escape_unclosed_comments("{#a} {# b #}"),
            "{% raw %}{#{% endraw %}a} {# b #}"
        );
    }

    #[test]
    fn test_unknown_variable_is_error() {
        let result = TeraRenderer::new().render("{{ nope }}", &ReleaseContext::new("v0.0.1"));
        assert!(result.is_err());
    }
}
