//! Submission handling for the blog widget.
//!
//! `Blog` holds everything the two form handlers need except the DOM: the
//! injected post store and a clock for post ids. The browser `widget` reads
//! form values, calls in here, and acts on the returned [`Outcome`]
//! (clear the form, re-render, or do nothing). Keeping the DOM out makes every
//! handler path testable natively.
//!
//! Each submission is a full load → mutate → save round trip. Comment targets
//! are positional indices taken from the rendered form, so a list reordered
//! between render and submit would misattribute the comment; the widget only
//! ever prepends and re-renders immediately, which keeps rendered indices current.

#[cfg(test)]
#[path = "blog_test.rs"]
mod blog_test;

use crate::post::{Post, PostId, next_post_id};
use crate::store::{KeyValueStorage, PostStore, StoreError};
use crate::view::{self, PostView};

/// Source of the current time in epoch milliseconds.
pub type Clock = fn() -> PostId;

/// What a handler did, for the host to act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A post was prepended. The host clears the new-post form and re-renders.
    PostCreated(Post),
    /// A comment was appended to the post at `index`. The host re-renders.
    CommentAdded { index: usize, comment: String },
    /// Nothing changed. The form keeps its contents and no feedback is shown.
    Ignored(IgnoreReason),
}

impl Outcome {
    /// Whether stored data changed and the list must be rebuilt.
    #[must_use]
    pub fn needs_render(&self) -> bool {
        !matches!(self, Self::Ignored(_))
    }
}

/// Why a submission was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    EmptyTitle,
    EmptyContent,
    EmptyComment,
    /// The form's index attribute is not a non-negative integer.
    InvalidIndex,
    /// No post exists at the submitted index any more.
    StaleIndex,
}

/// Post/comment operations over an injected store.
pub struct Blog<S> {
    store: PostStore<S>,
    clock: Clock,
}

impl<S: KeyValueStorage> Blog<S> {
    /// Blog using the wall clock for post ids.
    pub fn new(store: PostStore<S>) -> Self {
        Self::with_clock(store, now_ms)
    }

    pub fn with_clock(store: PostStore<S>, clock: Clock) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &PostStore<S> {
        &self.store
    }

    /// Current stored posts, newest first.
    pub fn posts(&self) -> Vec<Post> {
        self.store.load()
    }

    /// View of the current stored posts.
    pub fn render(&self) -> Vec<PostView> {
        view::render(&self.store.load())
    }

    /// Handle a new-post submission.
    ///
    /// Both fields are trimmed; if either ends up empty nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns the store's error when the updated list cannot be saved.
    pub fn submit_post(&self, title: &str, content: &str) -> Result<Outcome, StoreError> {
        let title = title.trim();
        let content = content.trim();
        if title.is_empty() {
            return Ok(Outcome::Ignored(IgnoreReason::EmptyTitle));
        }
        if content.is_empty() {
            return Ok(Outcome::Ignored(IgnoreReason::EmptyContent));
        }

        let mut posts = self.store.load();
        let id = next_post_id((self.clock)(), posts.first());
        let post = Post::new(id, title, content);
        posts.insert(0, post.clone());
        self.store.save(&posts)?;

        log::debug!("created post {id} ({} total)", posts.len());
        Ok(Outcome::PostCreated(post))
    }

    /// Handle a comment submission from the form rendered for position `index_attr`.
    ///
    /// `index_attr` is the raw value of the form's index attribute.
    ///
    /// # Errors
    ///
    /// Returns the store's error when the updated list cannot be saved.
    pub fn submit_comment(&self, index_attr: &str, text: &str) -> Result<Outcome, StoreError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Outcome::Ignored(IgnoreReason::EmptyComment));
        }
        let Ok(index) = index_attr.trim().parse::<usize>() else {
            log::debug!("ignoring comment with invalid index {index_attr:?}");
            return Ok(Outcome::Ignored(IgnoreReason::InvalidIndex));
        };

        let mut posts = self.store.load();
        let Some(post) = posts.get_mut(index) else {
            log::debug!("ignoring comment for stale index {index} ({} posts)", posts.len());
            return Ok(Outcome::Ignored(IgnoreReason::StaleIndex));
        };
        post.add_comment(text);
        self.store.save(&posts)?;

        log::debug!("added comment to post at index {index}");
        Ok(Outcome::CommentAdded { index, comment: text.to_owned() })
    }
}

/// Wall-clock time in epoch milliseconds.
#[cfg(feature = "hydrate")]
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub fn now_ms() -> PostId {
    js_sys::Date::now() as PostId
}

/// Wall-clock time in epoch milliseconds.
#[cfg(not(feature = "hydrate"))]
#[must_use]
pub fn now_ms() -> PostId {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |elapsed| PostId::try_from(elapsed.as_millis()).unwrap_or(PostId::MAX))
}
