//! Server-rendered HTML pages
//!
//! Pages are plain `format!` templates around a shared layout. Every value
//! that came from storage or a request goes through `escape_html`.

use axum::http::StatusCode;

pub mod movies;

pub use movies::{create_page, delete_page, details_page, edit_page, index_page};

const STYLE: &str = r#"
        * {
            margin: 0;
            padding: 0;
            box-sizing: border-box;
        }
        body {
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            background-color: #1a1a1a;
            color: #e0e0e0;
            line-height: 1.6;
        }
        header {
            background-color: #2a2a2a;
            border-bottom: 1px solid #3a3a3a;
            padding: 20px;
            margin-bottom: 30px;
        }
        .header-content {
            display: flex;
            justify-content: space-between;
            align-items: center;
            max-width: 1100px;
            margin: 0 auto;
        }
        h1 {
            font-size: 26px;
            color: #4a9eff;
        }
        h1 a {
            color: inherit;
            text-decoration: none;
        }
        h2 {
            color: #4a9eff;
            margin-bottom: 15px;
        }
        main {
            max-width: 1100px;
            margin: 0 auto;
            padding: 0 20px 40px;
        }
        a {
            color: #4a9eff;
        }
        table {
            width: 100%;
            border-collapse: collapse;
            margin: 15px 0;
        }
        th, td {
            text-align: left;
            padding: 8px 10px;
            border-bottom: 1px solid #3a3a3a;
        }
        th {
            color: #888;
            font-weight: 600;
        }
        dl {
            display: grid;
            grid-template-columns: 160px 1fr;
            gap: 6px 20px;
            margin: 15px 0;
        }
        dt {
            color: #888;
        }
        form.filters {
            display: flex;
            gap: 10px;
            flex-wrap: wrap;
            align-items: center;
        }
        .field {
            margin-bottom: 15px;
        }
        .field label {
            display: block;
            color: #888;
            margin-bottom: 4px;
        }
        input, select {
            background: #2a2a2a;
            color: #e0e0e0;
            border: 1px solid #3a3a3a;
            border-radius: 4px;
            padding: 6px 8px;
        }
        .button {
            display: inline-block;
            padding: 8px 18px;
            background: #4a9eff;
            color: white;
            border: none;
            border-radius: 4px;
            text-decoration: none;
            font-weight: 600;
            cursor: pointer;
        }
        .button.danger {
            background: #ef4444;
        }
        .error {
            color: #ef4444;
            font-size: 14px;
        }
        footer {
            max-width: 1100px;
            margin: 0 auto;
            padding: 20px;
            color: #666;
            font-size: 12px;
            font-family: 'Courier New', monospace;
        }
"#;

/// Escape text for use in HTML content and double-quoted attributes
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Wrap page content in the shared header, styles and build footer
///
/// `title` is escaped here; `body` must already be safe HTML.
pub fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - MvcMovie</title>
    <style>{style}</style>
</head>
<body>
    <header>
        <div class="header-content">
            <h1><a href="/movies">MvcMovie</a></h1>
        </div>
    </header>
    <main>
{body}
    </main>
    <footer>mvcm-catalog v{version} [{git_hash}] built {build_timestamp} ({build_profile})</footer>
</body>
</html>
"#,
        title = escape_html(title),
        style = STYLE,
        body = body,
        version = env!("CARGO_PKG_VERSION"),
        git_hash = env!("GIT_HASH"),
        build_timestamp = env!("BUILD_TIMESTAMP"),
        build_profile = env!("BUILD_PROFILE"),
    )
}

/// Error page for a failed request
pub fn error_page(status: StatusCode, message: &str) -> String {
    let reason = status.canonical_reason().unwrap_or("Error");
    let body = format!(
        r#"        <h2>{code} {reason}</h2>
        <p>{message}</p>
        <p><a href="/movies">Back to List</a></p>"#,
        code = status.as_u16(),
        reason = reason,
        message = escape_html(message),
    );
    layout(reason, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
        assert_eq!(escape_html("Plain"), "Plain");
    }

    #[test]
    fn test_layout_escapes_title() {
        let page = layout("<script>", "<p>body</p>");
        assert!(page.contains("<title>&lt;script&gt; - MvcMovie</title>"));
        assert!(page.contains("<p>body</p>"));
    }

    #[test]
    fn test_error_page_shows_status() {
        let page = error_page(StatusCode::NOT_FOUND, "Movie not found");
        assert!(page.contains("404 Not Found"));
        assert!(page.contains("Movie not found"));
    }
}
