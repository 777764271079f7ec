//! Curly - Template Compiler
//!
//! Compiles text containing `{{ variable }}`, `{{{ encoded }}}` and
//! `{{#each items }} ... {{/each}}` tags into a [`Template`], which can be
//! rendered any number of times against a [`Store`] of data.
//!
//! ```
//! use curly::{Engine, Store};
//! use serde_json::json;
//!
//! let engine = Engine::default();
//! let template = engine.compile("<b>{{{ user.name }}}</b>{{#if user.admin }} (admin){{/if}}");
//! let store = Store::new().with_must("user", json!({ "name": "<Taylor>", "admin": true }));
//!
//! assert_eq!(template.render(&store).unwrap(), "<b>&lt;Taylor&gt;</b> (admin)");
//! ```
mod compile;
mod engine;
mod format;
mod log;
mod options;
mod region;
mod render;
mod store;

pub use compile::{Kind, Reference, Section, Template};
pub use engine::Engine;
pub use log::{Error, Pointer, Visual, DATA_SHAPE_MISMATCH, INVALID_DATA, INVALID_OPTIONS};
pub use options::{Options, Tags};
pub use region::Region;
pub use render::render;
pub use store::Store;
