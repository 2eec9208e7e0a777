//! The dashboard's pages.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::views::{View, ViewContext};

/// Every page the dashboard can mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    /// Job listing; the landing page.
    Index,
    /// A single crawl job, by `id`.
    Job,
    /// Site listing.
    SitesList,
    /// A single site, by `id`.
    SiteDetail,
    NotFound,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Index,
        Page::Job,
        Page::SitesList,
        Page::SiteDetail,
        Page::NotFound,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Page::Index => "index",
            Page::Job => "job",
            Page::SitesList => "sites_list",
            Page::SiteDetail => "site_detail",
            Page::NotFound => "not_found",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl View for Page {
    fn name(&self) -> &str {
        self.as_str()
    }

    fn render(&self, ctx: &ViewContext<'_>) -> String {
        let id = escape(ctx.params.get("id").unwrap_or_default());
        match self {
            Page::Index => r#"<section class="index"><h1>Jobs</h1></section>"#.to_string(),
            Page::Job => format!(
                r#"<section class="job" data-job-id="{id}"><h1>Job {id}</h1></section>"#
            ),
            Page::SitesList => r#"<section class="sites"><h1>Sites</h1></section>"#.to_string(),
            Page::SiteDetail => format!(
                r#"<section class="site" data-site-id="{id}"><h1>Site {id}</h1></section>"#
            ),
            Page::NotFound => format!(
                r#"<section class="not-found"><h1>Not found</h1><p>{}</p></section>"#,
                escape(&ctx.location.path())
            ),
        }
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
