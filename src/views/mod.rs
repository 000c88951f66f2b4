//! Server-side HTML rendering.
//!
//! Pages are assembled from small string builders. Every value that came
//! from a user goes through [`escape`] before it is written.

mod notes;
mod tags;

use axum::http::StatusCode;

pub use notes::{note_list_page, note_page};
pub use tags::tags_page;

/// Escapes text for use in HTML element content and quoted attributes.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Wraps a page body in the shared document shell and navigation.
fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n</head>\n<body>\n\
         <nav><a href=\"/\">Notes</a> | <a href=\"/tags/\">Tags</a></nav>\n\
         <main>\n{body}</main>\n</body>\n</html>\n",
        title = escape(title),
    )
}

/// Renders the page shown for a failed request.
#[must_use]
pub fn error_page(status: StatusCode, message: &str) -> String {
    let heading = status.canonical_reason().unwrap_or("Error");
    layout(
        heading,
        &format!(
            "<h1>{} {}</h1>\n<p>{}</p>\n",
            status.as_u16(),
            escape(heading),
            escape(message)
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_neutralises_markup() {
        assert_eq!(
            escape(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn error_page_shows_status() {
        let page = error_page(StatusCode::NOT_FOUND, "note not found: 3");
        assert!(page.contains("404 Not Found"));
        assert!(page.contains("note not found: 3"));
    }
}
