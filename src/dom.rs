//! DOM materialization of the post list.
//!
//! Rebuilds the container from scratch on every call. All user text goes
//! through `textContent`, never `innerHTML`, so titles, bodies and comments
//! cannot inject markup.

use web_sys::{Document, Element};

use crate::consts::{
    COMMENT_BUTTON_LABEL, COMMENT_FORM_CLASS, COMMENT_LIST_CLASS, COMMENT_PLACEHOLDER, INDEX_ATTR,
    POST_CLASS,
};
use crate::view::PostView;
use crate::widget::{WidgetError, dom_err};

/// Replace the children of `container` with one block per view.
///
/// # Errors
///
/// Returns [`WidgetError::Dom`] if the browser rejects element creation or insertion.
pub fn render_into(document: &Document, container: &Element, views: &[PostView]) -> Result<(), WidgetError> {
    container.set_text_content(None);
    for view in views {
        let post = build_post(document, view)?;
        container.append_child(&post).map_err(dom_err)?;
    }
    Ok(())
}

fn build_post(document: &Document, view: &PostView) -> Result<Element, WidgetError> {
    let post = create(document, "div")?;
    post.set_class_name(POST_CLASS);

    let title = create(document, "h3")?;
    title.set_text_content(Some(&view.title));
    post.append_child(&title).map_err(dom_err)?;

    let content = create(document, "p")?;
    content.set_text_content(Some(&view.content));
    post.append_child(&content).map_err(dom_err)?;

    let comments = create(document, "ul")?;
    comments.set_class_name(COMMENT_LIST_CLASS);
    for comment in &view.comments {
        let item = create(document, "li")?;
        item.set_text_content(Some(comment));
        comments.append_child(&item).map_err(dom_err)?;
    }
    post.append_child(&comments).map_err(dom_err)?;

    post.append_child(&build_comment_form(document, view.index)?.into()).map_err(dom_err)?;
    Ok(post)
}

fn build_comment_form(document: &Document, index: usize) -> Result<Element, WidgetError> {
    let form = create(document, "form")?;
    form.set_class_name(COMMENT_FORM_CLASS);
    form.set_attribute(INDEX_ATTR, &index.to_string()).map_err(dom_err)?;

    let textarea = create(document, "textarea")?;
    textarea.set_attribute("placeholder", COMMENT_PLACEHOLDER).map_err(dom_err)?;
    textarea.set_attribute("required", "").map_err(dom_err)?;
    form.append_child(&textarea).map_err(dom_err)?;

    let button = create(document, "button")?;
    button.set_attribute("type", "submit").map_err(dom_err)?;
    button.set_text_content(Some(COMMENT_BUTTON_LABEL));
    form.append_child(&button).map_err(dom_err)?;

    Ok(form)
}

fn create(document: &Document, tag: &str) -> Result<Element, WidgetError> {
    document.create_element(tag).map_err(dom_err)
}
