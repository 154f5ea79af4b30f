//! Terminal client for the task API.
//!
//! The [`store`] owns what is displayed, the [`api`] gateway is the only code
//! that talks to the server, and [`dispatch`] connects the two: components
//! emit intents, the dispatcher runs the request, and the event loop feeds
//! the outcome back into the store.

pub mod api;
pub mod app;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod form;
pub mod store;
pub mod ui;

pub use api::{HttpTaskApi, TaskApi};
pub use app::App;
pub use dispatch::{Dispatcher, Intent, Message};
pub use error::FetchError;
pub use store::{ClientState, ResponseOrdering, TaskStore};
