//! View model for the post list.
//!
//! DESIGN
//! ======
//! Every render recomputes the full list from the stored sequence; there is
//! no diffing and no element reuse. `render` is the browser-independent half
//! of that: it decides what appears and in which order. The `dom` module
//! (hydrate only) turns the result into elements, and `to_markup` turns it
//! into escaped HTML text for comparisons outside a browser.

#[cfg(test)]
#[path = "view_test.rs"]
mod view_test;

use crate::consts::{
    COMMENT_BUTTON_LABEL, COMMENT_FORM_CLASS, COMMENT_LIST_CLASS, COMMENT_PLACEHOLDER, INDEX_ATTR,
    POST_CLASS,
};
use crate::post::Post;

/// One rendered post. `index` is its position in the stored sequence and is
/// what the comment form submits back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostView {
    pub index: usize,
    pub title: String,
    pub content: String,
    pub comments: Vec<String>,
}

/// Build the view of `posts`, in sequence order.
#[must_use]
pub fn render(posts: &[Post]) -> Vec<PostView> {
    posts
        .iter()
        .enumerate()
        .map(|(index, post)| PostView {
            index,
            title: post.title.clone(),
            content: post.content.clone(),
            comments: post.comments.clone(),
        })
        .collect()
}

/// Serialize views to the same element structure the DOM renderer builds.
/// All user text is escaped.
#[must_use]
pub fn to_markup(views: &[PostView]) -> String {
    let mut out = String::new();
    for view in views {
        write_post(&mut out, view);
    }
    out
}

fn write_post(out: &mut String, view: &PostView) {
    out.push_str(&format!("<div class=\"{POST_CLASS}\">"));
    out.push_str("<h3>");
    push_escaped(out, &view.title);
    out.push_str("</h3><p>");
    push_escaped(out, &view.content);
    out.push_str("</p>");
    out.push_str(&format!("<ul class=\"{COMMENT_LIST_CLASS}\">"));
    for comment in &view.comments {
        out.push_str("<li>");
        push_escaped(out, comment);
        out.push_str("</li>");
    }
    out.push_str("</ul>");
    out.push_str(&format!("<form class=\"{COMMENT_FORM_CLASS}\" {INDEX_ATTR}=\"{}\">", view.index));
    out.push_str(&format!(
        "<textarea placeholder=\"{COMMENT_PLACEHOLDER}\" required></textarea>\
         <button type=\"submit\">{COMMENT_BUTTON_LABEL}</button></form></div>"
    ));
}

/// Append `text` with the five HTML-significant characters escaped.
fn push_escaped(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}
