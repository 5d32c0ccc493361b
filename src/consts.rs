//! Shared constants for the blog widget: storage key and the host-page DOM contract.

// ── Storage ─────────────────────────────────────────────────────

/// `localStorage` key holding the JSON-serialized post array.
pub const STORAGE_KEY: &str = "posts";

// ── Host page element ids ───────────────────────────────────────

/// Container the post list is rendered into. Also hosts the delegated comment listener.
pub const POST_LIST_ID: &str = "post-list";

/// Form used to publish a new post.
pub const NEW_POST_FORM_ID: &str = "new-post-form";

/// Title field inside the new-post form.
pub const POST_TITLE_ID: &str = "post-title";

/// Content field inside the new-post form.
pub const POST_CONTENT_ID: &str = "post-content";

// ── Rendered markup ─────────────────────────────────────────────

pub const POST_CLASS: &str = "post";
pub const COMMENT_LIST_CLASS: &str = "comment-list";
pub const COMMENT_FORM_CLASS: &str = "comment-form";

/// Attribute on each comment form carrying the post's positional index.
pub const INDEX_ATTR: &str = "data-index";

pub const COMMENT_PLACEHOLDER: &str = "Write a comment...";
pub const COMMENT_BUTTON_LABEL: &str = "Post comment";
