#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

//! Scoped action creators.
//!
//! Takes a set of action creators keyed by camelCase names and produces an
//! [`Actions`] host that carries, for every creator, a wrapped callable plus
//! an UPPER_SNAKE type constant. Creators named `request*` receive generated
//! `*RequestSucceeded` / `*RequestFailed` companions, and every label can be
//! scoped under a namespace (`@namespace/LABEL`).
//!
//! ```
//! use scoped_actions::{action::argument, Action, Actions};
//! use serde_json::json;
//!
//! let actions = Actions::builder()
//!     .creator("setValue", |args| Ok(Action::new().with_field("value", argument(args, 0))))
//!     .shortcut("requestValue")
//!     .namespace("application")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(actions.constant("SET_VALUE").as_deref(), Some("@application/SET_VALUE"));
//! let action = actions.call("valueRequestSucceeded", &[json!("ok")]).unwrap();
//! assert_eq!(
//!     action.into_value(),
//!     json!({"type": "@application/VALUE_REQUEST_SUCCEEDED", "response": "ok"})
//! );
//! ```

/// Action records and creator callables.
pub mod action;
/// Host object binding scoped creators to their type constants.
pub mod actions;
/// Generation of success/failure companions for request creators.
pub mod async_pairs;
/// TOML configuration for building hosts.
pub mod config;
/// Ordered input mapping of creator entries.
pub mod creators;
/// Error types.
pub mod error;
/// Identifier conversions.
pub mod naming;
/// Shortcut resolution, label probing and namespacing.
pub mod scope;

pub use action::{Action, ActionCreator, ActionCreatorEntry, TYPE_FIELD};
pub use actions::{Actions, ActionsBuilder, ScopedActionCreator};
pub use async_pairs::{add_missing_async_creators, AsyncPair};
pub use config::ActionsConfig;
pub use creators::ActionCreators;
pub use error::ActionsError;
pub use naming::{to_constant_name, uncapitalize};
pub use scope::Namespace;
