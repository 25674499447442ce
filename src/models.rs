// src/models.rs

use crate::constants;

// --- PRIMITIVE VALUE TYPES ---

/// A four-channel color, each component in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Builds a color from 8-bit components, as decoded from `#rrggbb[aa]`.
    pub fn from_bytes(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: f32::from(r) / 255.0,
            g: f32::from(g) / 255.0,
            b: f32::from(b) / 255.0,
            a: f32::from(a) / 255.0,
        }
    }
}

/// A yes/no/auto switch. `Auto` defers the decision to whoever consumes the
/// value, each consumer supplying its own fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriState {
    Yes,
    No,
    #[default]
    Auto,
}

impl TriState {
    /// Resolves the switch to a boolean, using `auto_default` for `Auto`.
    pub fn enabled(self, auto_default: bool) -> bool {
        match self {
            Self::Yes => true,
            Self::No => false,
            Self::Auto => auto_default,
        }
    }
}

/// A window geometry request: size, position, and/or a maximize flag.
/// At least one of the three is always present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Geometry {
    pub size: Option<(u32, u32)>,
    pub position: Option<(i32, i32)>,
    pub maximized: bool,
}

// --- SOURCES AND CHANNELS ---

/// One data column within a source, selectable for plotting.
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    pub name: String,
    pub samples: Vec<f64>,
}

/// One loaded data file or stream. Sources keep their position in the load
/// order for the lifetime of the process; a failed load aborts instead of
/// leaving a hole.
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    pub name: String,
    pub abscissa: Vec<f64>,
    pub channels: Vec<Channel>,
}

impl Source {
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }
}

/// A resolved channel address: which source, and which channel within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelRef {
    pub source: usize,
    pub channel: usize,
}

// --- APPLICATION CONFIGURATION ---

/// The four color roles the rendering layer draws with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScheme {
    pub background: Rgba,
    pub grid_line: Rgba,
    pub trace: Rgba,
    pub cursor: Rgba,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            background: Rgba::new(0.0, 0.0, 0.0, 1.0),
            grid_line: Rgba::new(0.5, 0.5, 0.5, 1.0),
            trace: Rgba::new(0.0, 1.0, 0.0, 1.0),
            cursor: Rgba::new(1.0, 1.0, 0.0, 1.0),
        }
    }
}

/// The mutable target of the second pass. Only second-pass handlers write
/// here; window construction reads it afterwards.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: Option<String>,
    pub colors: ColorScheme,
    pub point_size: i32,
    pub line_width: i32,
    pub legend: TriState,
    pub auto_plot: TriState,
    pub geometry: Option<Geometry>,
    pub shell: bool,
    pub quiet: bool,
    pub sources: Vec<Source>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: None,
            colors: ColorScheme::default(),
            point_size: 3,
            line_width: constants::LINE_WIDTH_MIN,
            legend: TriState::Auto,
            auto_plot: TriState::Auto,
            geometry: None,
            shell: false,
            quiet: false,
            sources: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Whether a source left unplotted should receive a default full-channel
    /// plot. `Auto` means yes.
    pub fn auto_plot_enabled(&self) -> bool {
        self.auto_plot.enabled(true)
    }

    /// Total number of channels across all loaded sources. Session-wide plot
    /// options index into this global numbering.
    pub fn total_channels(&self) -> usize {
        self.sources.iter().map(Source::channel_count).sum()
    }

    /// Running channel total of all sources loaded before `source_idx`.
    /// File-scoped plot indices are offset by this base.
    pub fn channel_base(&self, source_idx: usize) -> usize {
        self.sources
            .iter()
            .take(source_idx)
            .map(Source::channel_count)
            .sum()
    }

    /// Maps a global channel index onto a concrete source and local channel.
    pub fn resolve_channel(&self, global: usize) -> Option<ChannelRef> {
        let mut base = 0;
        for (source, entry) in self.sources.iter().enumerate() {
            let count = entry.channel_count();
            if global < base + count {
                return Some(ChannelRef {
                    source,
                    channel: global - base,
                });
            }
            base += count;
        }
        None
    }

    /// Looks a resolved channel reference back up.
    pub fn channel(&self, r: ChannelRef) -> Option<&Channel> {
        self.sources.get(r.source)?.channels.get(r.channel)
    }
}
