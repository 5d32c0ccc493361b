//! Browser-resident blog widget.
//!
//! Users publish text posts and append text comments to them. The whole post
//! list persists as one JSON array in `window.localStorage`; there is no
//! server. Each submission reloads the list, mutates it, saves it, and
//! rebuilds the rendered list from scratch.
//!
//! The crate compiles to WebAssembly with the `hydrate` feature, which adds
//! the `localStorage` backend, DOM rendering and the page wiring. Without it,
//! the store, model, view and submission logic build natively for tests.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`post`] | Post record and id allocation |
//! | [`store`] | Key-value backends and the JSON post store |
//! | [`view`] | View model of the post list and its HTML text form |
//! | [`blog`] | New-post and comment submission handling |
//! | [`config`] | Host-page element ids and storage key |
//! | [`consts`] | Default ids, class names and labels |
//! | `dom` | DOM rendering (`hydrate` only) |
//! | `widget` | Listener wiring and the WASM entry point (`hydrate` only) |

pub mod blog;
pub mod config;
pub mod consts;
pub mod post;
pub mod store;
pub mod view;

#[cfg(feature = "hydrate")]
pub mod dom;
#[cfg(feature = "hydrate")]
pub mod widget;
