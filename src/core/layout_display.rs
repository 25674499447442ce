// src/core/layout_display.rs

use crate::core::plot::{PanelOrigin, WindowPlan};
use crate::models::AppConfig;
use std::fmt::Write;

/// Renders the constructed windows, panels, and sources as an ASCII tree.
/// Used by the interactive shell's `layout` command and by startup output.
pub fn render(cfg: &AppConfig, plan: &WindowPlan) -> String {
    let mut out = String::new();

    for (w, window) in plan.windows.iter().enumerate() {
        let _ = writeln!(out, "window {}", w + 1);
        if window.panels.is_empty() {
            let _ = writeln!(out, "└─ (no panels)");
            continue;
        }
        for (p, panel) in window.panels.iter().enumerate() {
            let connector = if p == window.panels.len() - 1 {
                "└─"
            } else {
                "├─"
            };
            let kind = match panel.origin {
                PanelOrigin::Default => "default",
                PanelOrigin::Explicit => "explicit",
            };
            let channels: Vec<String> = panel
                .channels
                .iter()
                .map(|&r| {
                    let source = cfg
                        .sources
                        .get(r.source)
                        .map_or("?", |s| s.name.as_str());
                    let channel = cfg.channel(r).map_or("?", |c| c.name.as_str());
                    format!("{}:{}", source, channel)
                })
                .collect();
            let _ = writeln!(
                out,
                "{} panel {} ({}): {}",
                connector,
                p + 1,
                kind,
                channels.join(", ")
            );
        }
    }

    if !cfg.sources.is_empty() {
        let _ = writeln!(out, "sources");
        for (i, source) in cfg.sources.iter().enumerate() {
            let connector = if i == cfg.sources.len() - 1 {
                "└─"
            } else {
                "├─"
            };
            let _ = writeln!(
                out,
                "{} {}: {} ({} channel(s), {} point(s))",
                connector,
                i + 1,
                source.name,
                source.channel_count(),
                source.abscissa.len()
            );
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::loader::testing::make_source;
    use crate::core::plot::{PlotBuilder, WindowPlan};

    #[test]
    fn render_lists_panels_and_sources() {
        let mut cfg = AppConfig::default();
        cfg.sources.push(make_source("a.dat", 2));

        let mut plan = WindowPlan::new();
        plan.bind_default(&cfg, 0).unwrap();

        let text = render(&cfg, &plan);
        assert!(text.contains("window 1"));
        assert!(text.contains("panel 1 (default): a.dat:ch0, a.dat:ch1"));
        assert!(text.contains("1: a.dat (2 channel(s), 2 point(s))"));
    }

    #[test]
    fn render_marks_empty_windows() {
        let cfg = AppConfig::default();
        let mut plan = WindowPlan::new();
        plan.ensure_window().unwrap();

        let text = render(&cfg, &plan);
        assert!(text.contains("(no panels)"));
    }
}
