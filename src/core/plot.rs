// src/core/plot.rs

use crate::models::{AppConfig, ChannelRef};
use thiserror::Error;

/// Version triple of the window-plan toolkit layer, reported by
/// `--toolkit-version`.
pub const TOOLKIT_VERSION: (u32, u32, u32) = (2, 4, 1);

#[derive(Error, Debug)]
pub enum BindError {
    #[error("--{option}: empty channel selection")]
    EmptySelection { option: &'static str },
    #[error("--{option}: channel {index} is out of range ({total} channel(s) selectable)")]
    OutOfRange {
        option: &'static str,
        index: usize,
        total: usize,
    },
    #[error("--{option}: no source has been loaded yet")]
    NoSource { option: &'static str },
    #[error("window construction failed: {0}")]
    Window(String),
}

/// The window-construction seam. The engine decides *what* gets bound and in
/// which order; implementations decide what a binding physically becomes.
pub trait PlotBuilder {
    /// Binds every channel of `source` to one default plot.
    fn bind_default(&mut self, cfg: &AppConfig, source: usize) -> Result<(), BindError>;

    /// Binds an explicit, already-resolved channel selection to one plot.
    fn bind_channels(&mut self, cfg: &AppConfig, channels: &[ChannelRef]) -> Result<(), BindError>;

    /// Guarantees at least one window exists, creating an empty one if the
    /// second pass bound nothing.
    fn ensure_window(&mut self) -> Result<(), BindError>;

    fn window_count(&self) -> usize;
}

/// Resolves session-scoped plot indices: global channel numbering across
/// every loaded source.
pub fn resolve_session_channels(
    cfg: &AppConfig,
    option: &'static str,
    indices: &[usize],
) -> Result<Vec<ChannelRef>, BindError> {
    if indices.is_empty() {
        return Err(BindError::EmptySelection { option });
    }
    indices
        .iter()
        .map(|&index| {
            cfg.resolve_channel(index).ok_or(BindError::OutOfRange {
                option,
                index,
                total: cfg.total_channels(),
            })
        })
        .collect()
}

/// Resolves file-scoped plot indices: relative to the most recently loaded
/// source, offset by the running channel total of every source before it.
pub fn resolve_file_channels(
    cfg: &AppConfig,
    option: &'static str,
    indices: &[usize],
) -> Result<Vec<ChannelRef>, BindError> {
    if indices.is_empty() {
        return Err(BindError::EmptySelection { option });
    }
    let last = cfg
        .sources
        .len()
        .checked_sub(1)
        .ok_or(BindError::NoSource { option })?;
    let count = cfg.sources.get(last).map_or(0, |s| s.channel_count());
    let base = cfg.channel_base(last);

    indices
        .iter()
        .map(|&index| {
            if index < count {
                cfg.resolve_channel(base + index).ok_or(BindError::OutOfRange {
                    option,
                    index,
                    total: count,
                })
            } else {
                Err(BindError::OutOfRange {
                    option,
                    index,
                    total: count,
                })
            }
        })
        .collect()
}

// --- THE IN-MEMORY WINDOW MODEL ---

/// How a panel came to exist: the automatic one-plot-per-source convention,
/// or an explicit channel selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelOrigin {
    Default,
    Explicit,
}

#[derive(Debug, Clone)]
pub struct Panel {
    pub channels: Vec<ChannelRef>,
    pub origin: PanelOrigin,
}

#[derive(Debug, Clone, Default)]
pub struct WindowModel {
    pub panels: Vec<Panel>,
}

/// The concrete `PlotBuilder` for the application: an ordered set of windows
/// holding panels, exactly what a rendering layer would be handed.
#[derive(Debug, Clone, Default)]
pub struct WindowPlan {
    pub windows: Vec<WindowModel>,
}

impl WindowPlan {
    pub fn new() -> Self {
        Self::default()
    }

    fn main_window(&mut self) -> &mut WindowModel {
        if self.windows.is_empty() {
            self.windows.push(WindowModel::default());
        }
        // The line above guarantees one exists.
        self.windows.first_mut().unwrap_or_else(|| unreachable!())
    }
}

impl PlotBuilder for WindowPlan {
    fn bind_default(&mut self, cfg: &AppConfig, source: usize) -> Result<(), BindError> {
        let entry = cfg
            .sources
            .get(source)
            .ok_or_else(|| BindError::Window(format!("unknown source index {}", source)))?;
        let channels = (0..entry.channel_count())
            .map(|channel| ChannelRef { source, channel })
            .collect();
        self.main_window().panels.push(Panel {
            channels,
            origin: PanelOrigin::Default,
        });
        Ok(())
    }

    fn bind_channels(&mut self, _cfg: &AppConfig, channels: &[ChannelRef]) -> Result<(), BindError> {
        self.main_window().panels.push(Panel {
            channels: channels.to_vec(),
            origin: PanelOrigin::Explicit,
        });
        Ok(())
    }

    fn ensure_window(&mut self) -> Result<(), BindError> {
        self.main_window();
        Ok(())
    }

    fn window_count(&self) -> usize {
        self.windows.len()
    }
}
