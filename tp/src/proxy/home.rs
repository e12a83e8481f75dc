//! Home page
//!
//! Compiled into the binary from `templates/home.hbs` and rendered with
//! handlebars.

use eyre::{Context, Result};
use handlebars::Handlebars;
use serde::Serialize;
use tracing::debug;

/// Embedded home page template
pub const HOME_TEMPLATE: &str = include_str!("../../templates/home.hbs");

const TEMPLATE_NAME: &str = "home";

#[derive(Debug, Serialize)]
struct Endpoint {
    method: &'static str,
    path: &'static str,
    summary: &'static str,
}

#[derive(Debug, Serialize)]
struct HomeContext<'a> {
    title: &'static str,
    description: &'static str,
    subtitle: &'static str,
    backend_url: &'a str,
    endpoints: Vec<Endpoint>,
}

/// Renders the landing page
pub struct HomePage {
    hbs: Handlebars<'static>,
}

impl std::fmt::Debug for HomePage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HomePage").finish_non_exhaustive()
    }
}

impl HomePage {
    pub fn new() -> Result<Self> {
        debug!("HomePage::new: called");
        let mut hbs = Handlebars::new();
        hbs.set_strict_mode(true);
        hbs.register_template_string(TEMPLATE_NAME, HOME_TEMPLATE)
            .context("Failed to register home page template")?;
        Ok(Self { hbs })
    }

    pub fn render(&self, backend_url: &str) -> Result<String> {
        debug!(%backend_url, "HomePage::render: called");
        let context = HomeContext {
            title: "AI Travel Planning & Booking",
            description: "Multi-agent trip planning with human-in-the-loop",
            subtitle: "Plan your trip with multi-agent workflow and human-in-the-loop approvals.",
            backend_url,
            endpoints: vec![
                Endpoint {
                    method: "POST",
                    path: "/api/plan",
                    summary: "create a plan from a trip description",
                },
                Endpoint {
                    method: "POST",
                    path: "/api/plan/{threadId}/approve",
                    summary: "approve the pending checkpoint and continue",
                },
                Endpoint {
                    method: "GET",
                    path: "/api/plan/{threadId}",
                    summary: "current state of a plan",
                },
                Endpoint {
                    method: "GET",
                    path: "/health",
                    summary: "proxy liveness",
                },
            ],
        };
        self.hbs
            .render(TEMPLATE_NAME, &context)
            .context("Failed to render home page")
    }
}
