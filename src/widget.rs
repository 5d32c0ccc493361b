//! Browser wiring: binds the host page's elements to a [`Blog`] and keeps the
//! post list rendered.
//!
//! SYSTEM CONTEXT
//! ==============
//! The host page supplies the post-list container and the new-post form (see
//! [`WidgetConfig`]). On page ready the widget renders once from storage, then
//! attaches two submit listeners:
//!
//! - one on the new-post form;
//! - one delegated listener on the post-list container, catching submits
//!   bubbling up from every comment form. Comment forms are recreated on every
//!   render, so binding per form would need rebinding after each rebuild.
//!
//! Every accepted submission re-renders the whole list.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, HtmlInputElement, HtmlTextAreaElement};

use crate::blog::{Blog, Outcome};
use crate::config::WidgetConfig;
use crate::consts::{COMMENT_FORM_CLASS, INDEX_ATTR};
use crate::dom;
use crate::store::{LocalStorage, PostStore, StoreError};

/// Failures while binding the widget to the page.
#[derive(Debug, thiserror::Error)]
pub enum WidgetError {
    #[error("no browser window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("element #{0} not found")]
    MissingElement(String),
    #[error("element #{id} is not {expected}")]
    WrongElement { id: String, expected: &'static str },
    #[error("DOM operation failed: {0}")]
    Dom(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<WidgetError> for JsValue {
    fn from(err: WidgetError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Convert a thrown JS value into a [`WidgetError`].
pub(crate) fn dom_err(err: JsValue) -> WidgetError {
    WidgetError::Dom(format!("{err:?}"))
}

/// A single-line or multi-line text field of the new-post form.
enum TextField {
    Input(HtmlInputElement),
    TextArea(HtmlTextAreaElement),
}

impl TextField {
    fn lookup(document: &Document, id: &str) -> Result<Self, WidgetError> {
        let element = element_by_id(document, id)?;
        match element.dyn_into::<HtmlInputElement>() {
            Ok(input) => Ok(Self::Input(input)),
            Err(element) => element.dyn_into::<HtmlTextAreaElement>().map(Self::TextArea).map_err(|_| {
                WidgetError::WrongElement { id: id.to_owned(), expected: "an <input> or <textarea>" }
            }),
        }
    }

    fn value(&self) -> String {
        match self {
            Self::Input(input) => input.value(),
            Self::TextArea(area) => area.value(),
        }
    }

    fn clear(&self) {
        match self {
            Self::Input(input) => input.set_value(""),
            Self::TextArea(area) => area.set_value(""),
        }
    }
}

/// The mounted widget: handler state shared by both listeners.
///
/// The title and content fields are looked up by id on every submit, so a
/// host page may replace them after mounting.
struct Widget {
    blog: Blog<LocalStorage>,
    document: Document,
    container: Element,
    title_input_id: String,
    content_input_id: String,
}

impl Widget {
    fn bind(document: &Document, config: &WidgetConfig) -> Result<Self, WidgetError> {
        let store = PostStore::new(LocalStorage::from_window()?, config.storage_key.clone());
        let container = element_by_id(document, &config.post_list_id)?;
        TextField::lookup(document, &config.title_input_id)?;
        TextField::lookup(document, &config.content_input_id)?;
        Ok(Self {
            blog: Blog::new(store),
            document: document.clone(),
            container,
            title_input_id: config.title_input_id.clone(),
            content_input_id: config.content_input_id.clone(),
        })
    }

    fn render(&self) -> Result<(), WidgetError> {
        dom::render_into(&self.document, &self.container, &self.blog.render())
    }

    fn on_new_post(&self, event: &Event) {
        event.prevent_default();
        let fields = (
            TextField::lookup(&self.document, &self.title_input_id),
            TextField::lookup(&self.document, &self.content_input_id),
        );
        let (title, content) = match fields {
            (Ok(title), Ok(content)) => (title, content),
            (Err(err), _) | (_, Err(err)) => {
                log::error!("new-post form is incomplete: {err}");
                return;
            }
        };
        match self.blog.submit_post(&title.value(), &content.value()) {
            Ok(Outcome::PostCreated(post)) => {
                log::info!("published post {}", post.id);
                title.clear();
                content.clear();
                self.rerender();
            }
            Ok(outcome) => log::debug!("new post not accepted: {outcome:?}"),
            Err(err) => log::error!("failed to save new post: {err}"),
        }
    }

    fn on_comment_submit(&self, event: &Event) {
        let Some(form) = event.target().and_then(|target| target.dyn_ref::<Element>().cloned()) else {
            return;
        };
        if !form.class_list().contains(COMMENT_FORM_CLASS) {
            return;
        }
        event.prevent_default();

        let index_attr = form.get_attribute(INDEX_ATTR).unwrap_or_default();
        let text = comment_text(&form);
        match self.blog.submit_comment(&index_attr, &text) {
            Ok(outcome) if outcome.needs_render() => self.rerender(),
            Ok(outcome) => log::debug!("comment not accepted: {outcome:?}"),
            Err(err) => log::error!("failed to save comment: {err}"),
        }
    }

    fn rerender(&self) {
        if let Err(err) = self.render() {
            log::error!("failed to render posts: {err}");
        }
    }
}

/// Text of the `<textarea>` inside a comment form, empty if there is none.
fn comment_text(form: &Element) -> String {
    match form.query_selector("textarea") {
        Ok(Some(element)) => element.dyn_into::<HtmlTextAreaElement>().map_or_else(|_| String::new(), |area| area.value()),
        Ok(None) | Err(_) => String::new(),
    }
}

fn element_by_id(document: &Document, id: &str) -> Result<Element, WidgetError> {
    document.get_element_by_id(id).ok_or_else(|| WidgetError::MissingElement(id.to_owned()))
}

/// Render from storage and attach both submit listeners.
///
/// The listeners live for the rest of the page's lifetime.
///
/// # Errors
///
/// Returns [`WidgetError`] if storage is unavailable or a configured element is
/// missing or of the wrong kind.
pub fn mount(config: &WidgetConfig) -> Result<(), WidgetError> {
    let document = web_sys::window().ok_or(WidgetError::NoWindow)?.document().ok_or(WidgetError::NoDocument)?;
    let widget = Rc::new(Widget::bind(&document, config)?);
    widget.render()?;

    let form = element_by_id(&document, &config.new_post_form_id)?;
    let handler = Rc::clone(&widget);
    let on_new_post = Closure::<dyn FnMut(Event)>::new(move |event: Event| handler.on_new_post(&event));
    form.add_event_listener_with_callback("submit", on_new_post.as_ref().unchecked_ref()).map_err(dom_err)?;
    on_new_post.forget();

    let handler = Rc::clone(&widget);
    let on_comment = Closure::<dyn FnMut(Event)>::new(move |event: Event| handler.on_comment_submit(&event));
    widget
        .container
        .add_event_listener_with_callback("submit", on_comment.as_ref().unchecked_ref())
        .map_err(dom_err)?;
    on_comment.forget();

    log::info!("blog widget mounted on #{} ({} posts)", config.post_list_id, widget.blog.posts().len());
    Ok(())
}

/// Mount with `config` now if the document has been parsed, otherwise on `DOMContentLoaded`.
///
/// # Errors
///
/// Returns [`WidgetError`] from an immediate mount, or if the ready listener
/// cannot be attached. A deferred mount failure is logged.
pub fn mount_when_ready(config: WidgetConfig) -> Result<(), WidgetError> {
    let document = web_sys::window().ok_or(WidgetError::NoWindow)?.document().ok_or(WidgetError::NoDocument)?;
    if document.ready_state() != "loading" {
        return mount(&config);
    }

    let on_ready = Closure::<dyn FnMut()>::new(move || {
        if let Err(err) = mount(&config) {
            log::error!("failed to mount blog widget: {err}");
        }
    });
    document
        .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())
        .map_err(dom_err)?;
    on_ready.forget();
    Ok(())
}

/// Whether `document` carries the post-list container named by `config`.
#[must_use]
pub fn has_host_page(document: &Document, config: &WidgetConfig) -> bool {
    document.get_element_by_id(&config.post_list_id).is_some()
}

/// WASM entry point: install the panic hook and console logger, then mount
/// with the default configuration.
///
/// A fully parsed page without the post-list container (such as a test
/// harness page) is left alone.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        log::debug!("console logger already installed");
    }
    let config = WidgetConfig::default();
    if let Some(document) = web_sys::window().and_then(|window| window.document()) {
        if document.ready_state() != "loading" && !has_host_page(&document, &config) {
            log::debug!("no #{} on this page; blog widget not mounted", config.post_list_id);
            return;
        }
    }
    if let Err(err) = mount_when_ready(config) {
        log::error!("failed to mount blog widget: {err}");
    }
}
