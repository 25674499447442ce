// src/core/binder.rs

use crate::core::plot::{BindError, PlotBuilder};
use crate::models::AppConfig;

/// Single-slot state machine tracking the most recently loaded source that
/// has no plot yet.
///
/// Every load first resolves the previous slot, then takes it; explicit plot
/// options consume the slot without a default bind; whatever is still
/// pending when the second pass ends gets resolved one last time. The net
/// guarantee: every loaded source ends up with exactly one plot, the user's
/// or the default, and none is default-plotted twice.
#[derive(Debug, Default)]
pub struct DeferredBinder {
    pending: Option<usize>,
}

impl DeferredBinder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Option<usize> {
        self.pending
    }

    /// Marks a freshly appended source as the pending one. The caller must
    /// have called `resolve` first; the slot holds at most one source.
    pub fn set_pending(&mut self, source: usize) {
        debug_assert!(self.pending.is_none());
        self.pending = Some(source);
    }

    /// An explicit plot option takes over: empty the slot with no default
    /// bind. Returns what was pending, if anything.
    pub fn consume(&mut self) -> Option<usize> {
        self.pending.take()
    }

    /// Default-binds the pending source, if there is one and default
    /// graphing is currently enabled, and empties the slot either way.
    pub fn resolve(
        &mut self,
        cfg: &AppConfig,
        builder: &mut dyn PlotBuilder,
    ) -> Result<(), BindError> {
        if let Some(source) = self.pending.take() {
            if cfg.auto_plot_enabled() {
                builder.bind_default(cfg, source)?;
            } else {
                log::debug!("default graphing is off; source {} stays unplotted", source);
            }
        }
        Ok(())
    }
}
