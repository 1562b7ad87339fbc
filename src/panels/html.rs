//! Browser rendering of the dashboard

use askama::Template;
use time::OffsetDateTime;
use time::macros::format_description;
use crate::panels::{Body, Panel, Tone};

/// The page reloads itself this often; panels refresh on their own pollers.
pub const REFRESH_SECS: u64 = 2;

/// Whole page: header clock, the panels, footer. Text is escaped by the template.
#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardPage<'a> {
    refresh_secs: u64,
    clock: String,
    date: String,
    year: i32,
    panels: &'a [Panel],
}

pub fn render_page(panels: &[Panel], now: OffsetDateTime) -> askama::Result<String> {
    let page = DashboardPage {
        refresh_secs: REFRESH_SECS,
        clock: now
            .format(format_description!("[hour]:[minute]:[second]"))
            .unwrap_or_default(),
        date: now
            .format(format_description!("[weekday repr:short], [month repr:short] [day padding:none]"))
            .unwrap_or_default(),
        year: now.year(),
        panels,
    };
    page.render()
}

impl Tone {
    pub fn css_class(&self) -> &'static str {
        match self {
            Tone::Good => "good",
            Tone::Bad => "bad",
            Tone::Accent => "accent",
            Tone::Warn => "warn",
            Tone::Plain => "",
        }
    }
}
