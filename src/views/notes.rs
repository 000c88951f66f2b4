//! Note list and single-note pages.

use super::{escape, layout};
use crate::domain::{NoteDetail, NoteListing, Tag};

/// Renders the filtered note list with the search and sort controls.
#[must_use]
pub fn note_list_page(listing: &NoteListing) -> String {
    let prefs = &listing.preferences;
    let mut body = String::from("<h1>Notes</h1>\n");

    body.push_str(
        "<form method=\"post\" action=\"/createNote/\"><button type=\"submit\">New note</button></form>\n",
    );

    body.push_str(&format!(
        "<form method=\"post\" action=\"/setSearchText/\">\
         <input type=\"text\" name=\"text\" value=\"{}\" placeholder=\"Search content\">\
         <button type=\"submit\">Search</button></form>\n",
        escape(&prefs.search_text)
    ));

    body.push_str(&format!(
        "<form method=\"post\" action=\"/setSortParams/\">\
         <label><input type=\"checkbox\" name=\"sort_by_name\" value=\"on\"{}> Sort by name</label> \
         <label><input type=\"checkbox\" name=\"sort_by_time\" value=\"on\"{}> Sort by time</label> \
         <button type=\"submit\">Apply</button></form>\n",
        checked(prefs.sort_by_name),
        checked(prefs.sort_by_time),
    ));

    if !listing.tags.is_empty() {
        body.push_str("<form method=\"post\" action=\"/addSearchTag/\">");
        body.push_str(&tag_select(&listing.tags));
        body.push_str("<button type=\"submit\">Filter by tag</button></form>\n");
    }

    if !listing.search_tags.is_empty() {
        body.push_str("<ul class=\"search-tags\">\n");
        for tag in &listing.search_tags {
            body.push_str(&format!(
                "<li>{} <a href=\"/deleteSearchTag/{}/\">remove</a></li>\n",
                escape(&tag.name),
                tag.id
            ));
        }
        body.push_str("</ul>\n");
    }

    if listing.notes.is_empty() {
        body.push_str("<p>No notes.</p>\n");
    } else {
        body.push_str("<ul class=\"notes\">\n");
        for note in &listing.notes {
            body.push_str(&format!(
                "<li><a href=\"/note/{id}/\">{name}</a> <small>{modified}</small> \
                 <a href=\"/deleteNote/{id}/\">delete</a></li>\n",
                id = note.id,
                name = escape(&note.name),
                modified = note.last_modified.format("%Y-%m-%d %H:%M:%S"),
            ));
        }
        body.push_str("</ul>\n");
    }

    layout("Notes", &body)
}

/// Renders one note with its edit form and tag controls.
///
/// `detail` is `None` when the id did not resolve; the page then renders
/// without note data.
#[must_use]
pub fn note_page(detail: Option<&NoteDetail>, all_tags: &[Tag]) -> String {
    let Some(detail) = detail else {
        return layout("Note", "<h1>Note</h1>\n<p>No such note.</p>\n");
    };
    let note = &detail.note;
    let mut body = format!(
        "<h1>{name}</h1>\n<p><small>Last modified {modified}</small></p>\n\
         <form method=\"post\" action=\"/note/{id}/\">\
         <input type=\"text\" name=\"name\" value=\"{name}\">\n\
         <textarea name=\"content\" rows=\"12\" cols=\"60\">{content}</textarea>\n\
         <button type=\"submit\">Save</button></form>\n",
        id = note.id,
        name = escape(&note.name),
        content = escape(&note.content),
        modified = note.last_modified.format("%Y-%m-%d %H:%M:%S"),
    );

    body.push_str("<h2>Tags</h2>\n<ul class=\"note-tags\">\n");
    for tag in &detail.tags {
        body.push_str(&format!(
            "<li>{} <a href=\"/note/{}/deleteTag/{}/\">remove</a></li>\n",
            escape(&tag.name),
            note.id,
            tag.id
        ));
    }
    body.push_str("</ul>\n");

    if !all_tags.is_empty() {
        body.push_str(&format!(
            "<form method=\"post\" action=\"/note/{}/addTag\">",
            note.id
        ));
        body.push_str(&tag_select(all_tags));
        body.push_str("<button type=\"submit\">Add tag</button></form>\n");
    }

    body.push_str(&format!(
        "<p><a href=\"/deleteNote/{}/\">Delete note</a></p>\n",
        note.id
    ));

    layout(&note.name, &body)
}

fn tag_select(tags: &[Tag]) -> String {
    let mut select = String::from("<select name=\"tag_id\">");
    for tag in tags {
        select.push_str(&format!(
            "<option value=\"{}\">{}</option>",
            tag.id,
            escape(&tag.name)
        ));
    }
    select.push_str("</select>");
    select
}

const fn checked(flag: bool) -> &'static str {
    if flag { " checked" } else { "" }
}
