//! Documentation viewer page.
//!
//! [`DocViewer`] renders a complete HTML page that loads Swagger UI from a
//! CDN and initializes it with the embedded OpenAPI document. The page is
//! self-contained: the spec JSON is inlined, so the server behind it needs
//! no routing.

use crate::error::DocsResult;
use crate::openapi::OpenApi;

/// Swagger UI release loaded from the CDN.
const SWAGGER_UI_VERSION: &str = "5.18.2";

/// Viewer page configuration and HTML generation.
#[derive(Debug, Clone)]
pub struct DocViewer {
    spec: OpenApi,
    title: String,
    swagger_version: String,
}

impl DocViewer {
    /// Create a viewer for a document. The page title is derived from the
    /// document's title.
    #[must_use]
    pub fn new(spec: &OpenApi) -> Self {
        let title = format!("{} - Swagger UI", spec.info.title);
        Self {
            spec: spec.clone(),
            title,
            swagger_version: SWAGGER_UI_VERSION.to_string(),
        }
    }

    /// Override the page title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Use a different Swagger UI release.
    #[must_use]
    pub fn swagger_version(mut self, version: impl Into<String>) -> Self {
        self.swagger_version = version.into();
        self
    }

    /// Render the viewer page.
    ///
    /// # Errors
    ///
    /// Returns `DocsError` if the embedded spec fails to serialize.
    pub fn html(&self) -> DocsResult<String> {
        let spec_json = serde_json::to_string(&self.spec)?;

        Ok(format!(
            r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@{version}/swagger-ui.css" />
    <style>
        html {{
            box-sizing: border-box;
            overflow-y: scroll;
        }}
        *,
        *:before,
        *:after {{
            box-sizing: inherit;
        }}
        body {{
            margin: 0;
            background: #fafafa;
        }}
    </style>
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@{version}/swagger-ui-bundle.js"></script>
    <script src="https://unpkg.com/swagger-ui-dist@{version}/swagger-ui-standalone-preset.js"></script>
    <script>
        window.onload = function() {{
            const spec = {spec_json};

            window.ui = SwaggerUIBundle({{
                spec: spec,
                dom_id: '#swagger-ui',
                deepLinking: true,
                presets: [
                    SwaggerUIBundle.presets.apis,
                    SwaggerUIStandalonePreset
                ],
                layout: "StandaloneLayout"
            }});
        }};
    </script>
</body>
</html>"##,
            title = html_escape(&self.title),
            version = self.swagger_version,
            spec_json = spec_json,
        ))
    }

    /// Render the page as bytes for use in HTTP responses.
    ///
    /// # Errors
    ///
    /// Returns `DocsError` if the embedded spec fails to serialize.
    pub fn html_bytes(&self) -> DocsResult<bytes::Bytes> {
        Ok(bytes::Bytes::from(self.html()?))
    }
}

/// Simple HTML escape for the title.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewer_html() {
        let viewer = DocViewer::new(&OpenApi::new("Student API", "0.0.1"));
        let html = viewer.html().unwrap();

        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("swagger-ui"));
        assert!(html.contains("Student API - Swagger UI"));
        assert!(html.contains("\"0.0.1\""));
    }

    #[test]
    fn test_viewer_customization() {
        let viewer = DocViewer::new(&OpenApi::new("Student API", "0.0.1"))
            .title("Custom Title")
            .swagger_version("5.0.0");
        let html = viewer.html().unwrap();

        assert!(html.contains("<title>Custom Title</title>"));
        assert!(html.contains("swagger-ui-dist@5.0.0"));
    }

    #[test]
    fn test_title_is_escaped() {
        let viewer =
            DocViewer::new(&OpenApi::new("Student API", "0.0.1")).title("<script>");
        let html = viewer.html().unwrap();
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
        assert_eq!(html_escape("\"quote\""), "&quot;quote&quot;");
    }
}
