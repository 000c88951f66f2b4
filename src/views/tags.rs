//! Tag management page.

use super::{escape, layout};
use crate::domain::Tag;

/// Renders every tag with rename and delete controls, plus a create form.
#[must_use]
pub fn tags_page(tags: &[Tag]) -> String {
    let mut body = String::from("<h1>Tags</h1>\n");
    body.push_str(
        "<form method=\"post\" action=\"/createTag/\">\
         <input type=\"text\" name=\"name\" placeholder=\"New tag\">\
         <button type=\"submit\">Create</button></form>\n",
    );

    if tags.is_empty() {
        body.push_str("<p>No tags.</p>\n");
    } else {
        body.push_str("<ul class=\"tags\">\n");
        for tag in tags {
            body.push_str(&format!(
                "<li><form method=\"post\" action=\"/tag/{id}/\">\
                 <input type=\"text\" name=\"name\" value=\"{name}\">\
                 <button type=\"submit\">Rename</button></form> \
                 <a href=\"/deleteTag/{id}/\">delete</a></li>\n",
                id = tag.id,
                name = escape(&tag.name),
            ));
        }
        body.push_str("</ul>\n");
    }

    layout("Tags", &body)
}
