//! Terminal rendering of the dashboard

use std::fmt::Write;
use crate::panels::{Body, Panel, Tone};

/// Clear screen and home the cursor
pub const CLEAR: &str = "\x1b[2J\x1b[H";

pub fn render_panels(panels: &[Panel]) -> String {
    let mut out = String::new();
    for panel in panels {
        render_panel(&mut out, panel);
        out.push('\n');
    }
    out
}

pub fn render_panel(out: &mut String, panel: &Panel) {
    let _ = writeln!(out, "┌─ {} ─ {}", panel.title.to_uppercase(), panel.badges.join(" · "));
    match &panel.body {
        Body::Loading(text) => {
            let _ = writeln!(out, "│  {}", text);
        }
        Body::Status(status) => {
            let _ = writeln!(out, "│  {} {}   {}", dot(status.tone), status.headline, status.caption);
            for fact in &status.facts {
                let _ = writeln!(out, "│  {:<12} {}", fact.label, fact.value);
            }
            if let Some(alert) = &status.alert {
                let _ = writeln!(out, "│  ⚠ {}", alert);
            }
        }
        Body::Log(log) => {
            if let Some(note) = &log.note {
                let _ = writeln!(out, "│  {}", note);
            }
            for (number, line) in &log.lines {
                let _ = writeln!(out, "│ {:>4}  {}", number, line);
            }
        }
        Body::Tags(groups) => {
            for group in groups {
                let tags = group
                    .tags
                    .iter()
                    .map(|tag| {
                        let mut text = String::new();
                        if let Some(icon) = tag.icon {
                            text.push_str(icon);
                            text.push(' ');
                        }
                        text.push_str(&tag.text);
                        if let Some(marker) = tag.marker {
                            text.push(' ');
                            text.push_str(marker);
                        }
                        format!("[{}]", text)
                    })
                    .collect::<Vec<_>>()
                    .join(" ");
                let _ = writeln!(out, "│  {:<14} {}", group.label, tags);
            }
        }
        Body::Alert(text) => {
            let _ = writeln!(out, "│  {}", text);
        }
    }
    out.push_str("└────────────────────────────────────────\n");
}

fn dot(tone: Tone) -> &'static str {
    match tone {
        Tone::Good => "●",
        Tone::Bad => "○",
        _ => "◌",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panels::{Fact, StatusBody};

    #[test]
    fn test_status_panel_text() {
        let panel = Panel {
            title: "Network Activity",
            badges: vec!["just now".to_string()],
            body: Body::Status(StatusBody {
                tone: Tone::Good,
                headline: "LISTENING".to_string(),
                caption: "Port 18789 • WebSocket".to_string(),
                facts: vec![Fact {
                    label: "Connections",
                    value: "2".to_string(),
                    tone: Tone::Accent,
                }],
                alert: None,
            }),
        };
        let text = render_panels(&[panel]);
        assert!(text.starts_with("┌─ NETWORK ACTIVITY ─ just now\n"));
        assert!(text.contains("│  ● LISTENING   Port 18789 • WebSocket\n"));
        assert!(text.contains("│  Connections  2\n"));
    }

    #[test]
    fn test_loading_panel_text() {
        let panel = Panel {
            title: "Live Daemon Log",
            badges: vec!["0 lines".to_string(), "—".to_string()],
            body: Body::Loading("Loading logs..."),
        };
        let mut out = String::new();
        render_panel(&mut out, &panel);
        assert!(out.contains("0 lines · —"));
        assert!(out.contains("│  Loading logs...\n"));
    }
}
