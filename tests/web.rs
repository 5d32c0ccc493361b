//! In-browser tests for the `localStorage` backend, DOM rendering and the
//! mounted widget. Run with `wasm-pack test --headless --firefox -- --features hydrate`.
#![cfg(all(target_arch = "wasm32", feature = "hydrate"))]

use blog_widget::blog::Blog;
use blog_widget::config::WidgetConfig;
use blog_widget::dom::render_into;
use blog_widget::post::Post;
use blog_widget::store::{KeyValueStorage, LocalStorage, PostStore};
use blog_widget::view::render;
use blog_widget::widget::{has_host_page, mount};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, Element, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn local_store(key: &str) -> PostStore<LocalStorage> {
    let store = PostStore::new(LocalStorage::from_window().unwrap(), key);
    store.backend().set_item(key, "").unwrap();
    store
}

/// Fresh host-page fixture with ids suffixed by `tag` so tests do not collide.
fn host_page(tag: &str) -> (WidgetConfig, Element) {
    let doc = document();
    let root = doc.create_element("div").unwrap();
    root.set_inner_html(&format!(
        "<form id=\"new-post-form-{tag}\">\
           <input id=\"post-title-{tag}\">\
           <textarea id=\"post-content-{tag}\"></textarea>\
           <button type=\"submit\">Publish</button>\
         </form>\
         <div id=\"post-list-{tag}\"></div>"
    ));
    doc.body().unwrap().append_child(&root).unwrap();
    let config = WidgetConfig::default()
        .with_storage_key(format!("posts-{tag}"))
        .with_post_list_id(format!("post-list-{tag}"))
        .with_new_post_form(format!("new-post-form-{tag}"), format!("post-title-{tag}"), format!("post-content-{tag}"));
    (config, root)
}

fn submit(form: &Element) {
    let form: HtmlFormElement = form.clone().dyn_into().unwrap();
    form.request_submit().unwrap();
}

#[wasm_bindgen_test]
fn local_storage_round_trip() {
    let store = local_store("posts-web-round-trip");
    let posts = vec![Post::new(2, "b", "body b"), Post::new(1, "a", "body a")];
    store.save(&posts).unwrap();
    assert_eq!(store.load(), posts);
}

#[wasm_bindgen_test]
fn local_storage_corrupt_value_loads_empty() {
    let store = local_store("posts-web-corrupt");
    store.backend().set_item("posts-web-corrupt", "{oops").unwrap();
    assert!(store.load().is_empty());
}

#[wasm_bindgen_test]
fn render_into_builds_post_blocks() {
    let doc = document();
    let container = doc.create_element("div").unwrap();
    let mut post = Post::new(1, "<i>T</i>", "C");
    post.add_comment("hi");

    render_into(&doc, &container, &render(&[post])).unwrap();

    let html = container.inner_html();
    assert!(html.contains("<h3>&lt;i&gt;T&lt;/i&gt;</h3>"));
    assert!(html.contains("<li>hi</li>"));
    assert!(html.contains("data-index=\"0\""));
    assert_eq!(container.query_selector_all(".post").unwrap().length(), 1);
}

#[wasm_bindgen_test]
fn render_into_replaces_previous_content() {
    let doc = document();
    let container = doc.create_element("div").unwrap();
    let views = render(&[Post::new(1, "a", "b"), Post::new(0, "c", "d")]);

    render_into(&doc, &container, &views).unwrap();
    let first = container.inner_html();
    render_into(&doc, &container, &views).unwrap();

    assert_eq!(container.inner_html(), first);
    assert_eq!(container.query_selector_all(".post").unwrap().length(), 2);
}

#[wasm_bindgen_test]
fn mounted_widget_publishes_and_comments() {
    let (config, root) = host_page("flow");
    local_store(&config.storage_key);
    mount(&config).unwrap();
    let doc = document();

    let title: HtmlInputElement = doc.get_element_by_id(&config.title_input_id).unwrap().dyn_into().unwrap();
    let content: HtmlTextAreaElement = doc.get_element_by_id(&config.content_input_id).unwrap().dyn_into().unwrap();
    title.set_value(" Hello ");
    content.set_value("World");
    submit(&doc.get_element_by_id(&config.new_post_form_id).unwrap());

    assert_eq!(title.value(), "");
    assert_eq!(content.value(), "");
    let list = doc.get_element_by_id(&config.post_list_id).unwrap();
    assert!(list.inner_html().contains("<h3>Hello</h3>"));

    let comment_form = list.query_selector(".comment-form").unwrap().unwrap();
    let area: HtmlTextAreaElement = comment_form.query_selector("textarea").unwrap().unwrap().dyn_into().unwrap();
    area.set_value("hi");
    submit(&comment_form);

    let blog = Blog::new(PostStore::new(LocalStorage::from_window().unwrap(), config.storage_key.clone()));
    let posts = blog.posts();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].comments, vec!["hi".to_owned()]);
    assert!(list.inner_html().contains("<li>hi</li>"));

    root.remove();
}

#[wasm_bindgen_test]
fn mounted_widget_ignores_blank_post() {
    let (config, root) = host_page("blank");
    local_store(&config.storage_key);
    mount(&config).unwrap();
    let doc = document();

    let content: HtmlTextAreaElement = doc.get_element_by_id(&config.content_input_id).unwrap().dyn_into().unwrap();
    content.set_value("body without title");
    submit(&doc.get_element_by_id(&config.new_post_form_id).unwrap());

    assert_eq!(content.value(), "body without title");
    let store = PostStore::new(LocalStorage::from_window().unwrap(), config.storage_key.clone());
    assert!(store.load().is_empty());

    root.remove();
}

#[wasm_bindgen_test]
fn mount_reports_missing_container() {
    let config = WidgetConfig::default().with_post_list_id("definitely-not-on-the-page");
    let err = mount(&config).unwrap_err();
    assert!(err.to_string().contains("not found"));
}

#[wasm_bindgen_test]
fn mounted_widget_reads_replaced_title_input() {
    let (config, root) = host_page("swap");
    local_store(&config.storage_key);
    mount(&config).unwrap();
    let doc = document();

    let old_title = doc.get_element_by_id(&config.title_input_id).unwrap();
    let new_title: HtmlInputElement = doc.create_element("input").unwrap().dyn_into().unwrap();
    old_title.replace_with_with_node_1(&new_title).unwrap();
    new_title.set_id(&config.title_input_id);
    new_title.set_value("Swapped");
    let content: HtmlTextAreaElement = doc.get_element_by_id(&config.content_input_id).unwrap().dyn_into().unwrap();
    content.set_value("body");
    submit(&doc.get_element_by_id(&config.new_post_form_id).unwrap());

    assert_eq!(new_title.value(), "");
    let store = PostStore::new(LocalStorage::from_window().unwrap(), config.storage_key.clone());
    let posts = store.load();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].title, "Swapped");

    root.remove();
}

#[wasm_bindgen_test]
fn host_page_detection_follows_container_id() {
    let (config, root) = host_page("detect");
    let doc = document();
    assert!(has_host_page(&doc, &config));
    assert!(!has_host_page(&doc, &WidgetConfig::default().with_post_list_id("absent-list")));
    root.remove();
}
