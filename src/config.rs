//! Widget configuration: which host-page elements to bind and which storage key to use.
//!
//! Defaults match the stock host page. Embedders with different ids override
//! them through the builder methods before calling `mount`.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::consts::{NEW_POST_FORM_ID, POST_CONTENT_ID, POST_LIST_ID, POST_TITLE_ID, STORAGE_KEY};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    pub storage_key: String,
    pub post_list_id: String,
    pub new_post_form_id: String,
    pub title_input_id: String,
    pub content_input_id: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_owned(),
            post_list_id: POST_LIST_ID.to_owned(),
            new_post_form_id: NEW_POST_FORM_ID.to_owned(),
            title_input_id: POST_TITLE_ID.to_owned(),
            content_input_id: POST_CONTENT_ID.to_owned(),
        }
    }
}

impl WidgetConfig {
    #[must_use]
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    #[must_use]
    pub fn with_post_list_id(mut self, id: impl Into<String>) -> Self {
        self.post_list_id = id.into();
        self
    }

    /// Override the new-post form id and its title/content field ids together.
    #[must_use]
    pub fn with_new_post_form(
        mut self,
        form_id: impl Into<String>,
        title_input_id: impl Into<String>,
        content_input_id: impl Into<String>,
    ) -> Self {
        self.new_post_form_id = form_id.into();
        self.title_input_id = title_input_id.into();
        self.content_input_id = content_input_id.into();
        self
    }
}
