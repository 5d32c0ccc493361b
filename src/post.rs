//! Post model as persisted in storage and rendered on the page.
//!
//! A post is created once from the new-post form and afterwards only grows by
//! appended comments. Stored entries are read leniently: a missing, `null` or
//! oddly typed field becomes blank text instead of failing, so one bad entry
//! never costs the rest of the list. Fields this widget does not know about
//! are carried through a load/save cycle untouched.

#[cfg(test)]
#[path = "post_test.rs"]
mod post_test;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Creation timestamp in epoch milliseconds; doubles as the post identifier.
pub type PostId = i64;

/// A blog post with its comments in append order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: PostId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub content: String,
    #[serde(default, deserialize_with = "lenient_comments")]
    pub comments: Vec<String>,
    /// Unrecognized fields from storage, written back as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Post {
    /// New post with no comments.
    #[must_use]
    pub fn new(id: PostId, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self { id, title: title.into(), content: content.into(), comments: Vec::new(), extra: Map::new() }
    }

    /// Decode one stored array entry. Anything that is not a JSON object
    /// becomes a blank post so the entry keeps its position.
    #[must_use]
    pub fn from_json(value: Value) -> Self {
        match serde_json::from_value(value) {
            Ok(post) => post,
            Err(err) => {
                log::warn!("stored post entry is not an object, showing it blank: {err}");
                Self::default()
            }
        }
    }

    /// Append a comment after the existing ones.
    pub fn add_comment(&mut self, comment: impl Into<String>) {
        self.comments.push(comment.into());
    }
}

/// Pick the id for a post created at `now_ms`.
///
/// Ids are timestamps, but two posts created within the same millisecond (or
/// after the clock steps backwards) must not share one, so the id never drops
/// below one past the newest existing post.
#[must_use]
pub fn next_post_id(now_ms: PostId, newest: Option<&Post>) -> PostId {
    match newest {
        Some(post) if post.id >= now_ms => post.id.saturating_add(1),
        _ => now_ms,
    }
}

/// Display text of a scalar; `null`, arrays and objects show as blank.
fn text_of(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(text_of(&Value::deserialize(deserializer)?))
}

#[allow(clippy::cast_possible_truncation)]
fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PostId, D::Error> {
    let id = match Value::deserialize(deserializer)? {
        Value::Number(number) => number.as_i64().or_else(|| number.as_f64().map(|ms| ms as PostId)).unwrap_or(0),
        Value::String(text) => text.trim().parse().unwrap_or(0),
        _ => 0,
    };
    Ok(id)
}

fn lenient_comments<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items.iter().map(text_of).collect()),
        _ => Ok(Vec::new()),
    }
}
