//! TripPlanner - presentation layer for a multi-agent travel planner
//!
//! The planning itself happens in a separate backend that runs a workflow of
//! agents and pauses at checkpoints for human approval. This crate sits in
//! front of it:
//!
//! - a proxy server that relays the plan routes to the backend and answers
//!   with a uniform 502 envelope when the backend cannot be reached
//! - a plan page controller that submits trip descriptions and approvals
//! - a pure renderer from plan responses to an explicit view model
//! - a terminal UI and one-shot CLI commands built on the two above
//!
//! # Modules
//!
//! - [`api`] - plan API client trait and HTTP implementation
//! - [`domain`] - typed plan state, checkpoints and view results
//! - [`proxy`] - axum proxy server
//! - [`page`] - plan page controller
//! - [`view`] - plan result renderer
//! - [`tui`] - interactive terminal front-end
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod page;
pub mod proxy;
pub mod tui;
pub mod view;

// Re-export commonly used types
pub use api::{ApiError, HttpPlanApi, PlanApi, RawResponse, create_client};
pub use config::Config;
pub use domain::{Checkpoint, InterruptPayload, PlanState, PlanStatus, StatePayload, ViewResult};
pub use page::{PendingRequest, PlanPage};
pub use proxy::{ProxyState, router};
pub use view::{PlanView, render, render_result};
