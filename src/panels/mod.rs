//! Dashboard panels.
//!
//! Each builder turns one poller's state into a [`Panel`], a renderer-neutral view.
//! [`html`] draws panels for the browser, [`text`] for the terminal.

use time::OffsetDateTime;
use crate::http::models::{ConfigResponse, ConfigSnapshot, HealthSnapshot, LogSnapshot, NetworkSnapshot};
use crate::poll::PollState;

pub mod format;
pub mod html;
pub mod text;

pub use format::{format_uptime, time_ago};

/// Colour hint for a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Good,
    Bad,
    Accent,
    Warn,
    Plain,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub title: &'static str,
    /// Right side of the header: age, line count, version
    pub badges: Vec<String>,
    pub body: Body,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Before the first fetch finished
    Loading(&'static str),
    Status(StatusBody),
    Log(LogBody),
    Tags(Vec<TagGroup>),
    Alert(String),
}

/// Big up/down indicator plus a few labelled facts
#[derive(Debug, Clone, PartialEq)]
pub struct StatusBody {
    pub tone: Tone,
    pub headline: String,
    pub caption: String,
    pub facts: Vec<Fact>,
    pub alert: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Fact {
    pub label: &'static str,
    pub value: String,
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogBody {
    /// `(line number, text)`, oldest first
    pub lines: Vec<(usize, String)>,
    /// Shown instead of lines when there are none
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TagGroup {
    pub label: &'static str,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub icon: Option<&'static str>,
    pub text: String,
    pub marker: Option<&'static str>,
    pub tone: Tone,
}

impl Tag {
    fn plain(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            icon: None,
            text: text.into(),
            marker: None,
            tone,
        }
    }
}

fn fact(label: &'static str, value: impl Into<String>, tone: Tone) -> Fact {
    Fact {
        label,
        value: value.into(),
        tone,
    }
}

fn up_down(up: bool) -> Tone {
    if up { Tone::Good } else { Tone::Bad }
}

pub fn health_panel(state: &PollState<HealthSnapshot>, unit: &str, now: OffsetDateTime) -> Panel {
    let badges = vec![time_ago(state.last_update(), now)];
    if state.loading() {
        return Panel {
            title: "Gateway Health",
            badges,
            body: Body::Loading("Checking service..."),
        };
    }

    let data = state.data();
    let active = data.is_some_and(HealthSnapshot::is_active);
    let raw = data
        .map(|h| h.raw.as_str())
        .filter(|raw| !raw.is_empty())
        .unwrap_or(format::UNKNOWN);
    let uptime = format_uptime(data.and_then(|h| h.uptime.as_deref()), now);

    Panel {
        title: "Gateway Health",
        badges,
        body: Body::Status(StatusBody {
            tone: up_down(active),
            headline: if active { "ONLINE" } else { "OFFLINE" }.to_string(),
            caption: unit.to_string(),
            facts: vec![
                fact("Status", raw, up_down(active)),
                fact("Uptime", uptime, Tone::Plain),
            ],
            alert: data.and_then(|h| h.error.clone()),
        }),
    }
}

pub fn network_panel(
    state: &PollState<NetworkSnapshot>,
    default_port: u16,
    bind: &str,
    now: OffsetDateTime,
) -> Panel {
    let badges = vec![time_ago(state.last_update(), now)];
    if state.loading() {
        return Panel {
            title: "Network Activity",
            badges,
            body: Body::Loading("Scanning port..."),
        };
    }

    let data = state.data();
    let listening = data.is_some_and(NetworkSnapshot::listening);
    let port = data.map(NetworkSnapshot::port).unwrap_or(default_port);
    let protocol = data.and_then(NetworkSnapshot::protocol).unwrap_or("TCP");
    let connections = data.map(NetworkSnapshot::connections).unwrap_or(0);

    Panel {
        title: "Network Activity",
        badges,
        body: Body::Status(StatusBody {
            tone: up_down(listening),
            headline: if listening { "LISTENING" } else { "CLOSED" }.to_string(),
            caption: format!("Port {} • {}", port, protocol),
            facts: vec![
                fact("Connections", connections.to_string(), Tone::Accent),
                fact("Bind", bind, Tone::Plain),
            ],
            alert: None,
        }),
    }
}

pub fn log_panel(state: &PollState<LogSnapshot>, now: OffsetDateTime) -> Panel {
    let total = state.data().map(|l| l.total_lines).unwrap_or(0);
    let badges = vec![format!("{} lines", total), time_ago(state.last_update(), now)];
    if state.loading() {
        return Panel {
            title: "Live Daemon Log",
            badges,
            body: Body::Loading("Loading logs..."),
        };
    }

    let body = match state.data() {
        Some(log) if !log.lines.is_empty() => {
            let first = log.total_lines.saturating_sub(log.lines.len()) + 1;
            LogBody {
                lines: log
                    .lines
                    .iter()
                    .enumerate()
                    .map(|(i, line)| (first + i, line.clone()))
                    .collect(),
                note: None,
            }
        }
        data => LogBody {
            lines: Vec::new(),
            note: Some(match data.and_then(|l| l.error.as_deref()) {
                Some(error) => format!("⚠ {}", error),
                None => "No log entries found".to_string(),
            }),
        },
    };

    Panel {
        title: "Live Daemon Log",
        badges,
        body: Body::Log(body),
    }
}

pub fn config_panel(state: &PollState<ConfigResponse>) -> Panel {
    let loaded = match state.data() {
        Some(ConfigResponse::Loaded(snapshot)) => Some(snapshot),
        _ => None,
    };
    let badges = loaded
        .and_then(ConfigSnapshot::last_touched_version)
        .map(|v| vec![format!("v{}", v)])
        .unwrap_or_default();

    let body = if state.loading() {
        Body::Loading("Reading config...")
    } else if let Some(ConfigResponse::Failed { error }) = state.data() {
        Body::Alert(format!("⚠ {}", error))
    } else {
        Body::Tags(config_tags(loaded))
    };

    Panel {
        title: "Active Configuration",
        badges,
        body,
    }
}

fn config_tags(config: Option<&ConfigSnapshot>) -> Vec<TagGroup> {
    let primary = config
        .map(|c| c.models.primary.as_str())
        .filter(|p| !p.is_empty())
        .unwrap_or(format::UNKNOWN);
    let mut groups = vec![TagGroup {
        label: "Primary Model",
        tags: vec![Tag {
            icon: Some("🧠"),
            text: primary.to_string(),
            marker: None,
            tone: Tone::Accent,
        }],
    }];

    let channels = config
        .map(|c| {
            c.channels
                .iter()
                .map(|(name, channel)| Tag {
                    icon: Some(if name == "telegram" { "✈" } else { "◉" }),
                    text: capitalize(name),
                    marker: channel.enabled.then_some("ON"),
                    tone: if channel.enabled { Tone::Good } else { Tone::Plain },
                })
                .collect()
        })
        .unwrap_or_default();
    groups.push(TagGroup {
        label: "Channels",
        tags: channels,
    });

    let gateway = config.map(|c| &c.gateway);
    groups.push(TagGroup {
        label: "Gateway",
        tags: vec![
            Tag::plain(
                format!(":{}", display(gateway.and_then(|g| g.port.as_ref()))),
                Tone::Accent,
            ),
            Tag::plain(display(gateway.and_then(|g| g.mode.as_ref())), Tone::Warn),
            Tag::plain(display(gateway.and_then(|g| g.bind.as_ref())), Tone::Plain),
        ],
    });

    if let Some(config) = config.filter(|c| !c.plugins.is_empty()) {
        groups.push(TagGroup {
            label: "Plugins",
            tags: config
                .plugins
                .iter()
                .map(|(name, enabled)| Tag {
                    icon: None,
                    text: capitalize(name),
                    marker: Some(if *enabled { "ON" } else { "OFF" }),
                    tone: if *enabled { Tone::Good } else { Tone::Plain },
                })
                .collect(),
        });
    }
    groups
}

/// Strings bare, any other JSON value in its JSON form, missing as empty
fn display(value: Option<&serde_json::Value>) -> String {
    match value {
        None => String::new(),
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
