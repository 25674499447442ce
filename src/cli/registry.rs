// src/cli/registry.rs

use crate::cli::EngineError;
use crate::cli::first_pass;
use crate::cli::info::InfoKind;
use crate::cli::second_pass::{self, SecondPass};
use crate::cli::session::FirstPassSession;

/// Whether an option is a bare flag or carries one argument
/// (`--name=value` or `--name value`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Flag,
    WithValue,
}

/// A first-pass handler: either checks its argument (feeding failures to
/// the session's error sink) or requests an informational exit. Never
/// mutates application configuration.
pub type Pass1Fn =
    fn(&mut FirstPassSession, &'static OptionDef, Option<&str>) -> Option<InfoKind>;

/// A second-pass handler: applies the option's real effect, in token order.
pub type Pass2Fn =
    fn(&mut SecondPass<'_>, &'static OptionDef, Option<&str>) -> Result<(), EngineError>;

/// Defines one long option and its per-pass handlers. Every descriptor has
/// at least one non-empty handler.
#[derive(Debug)]
pub struct OptionDef {
    pub name: &'static str,
    pub arity: Arity,
    pub pass1: Option<Pass1Fn>,
    pub pass2: Option<Pass2Fn>,
}

/// The single source of truth for the option surface. This declarative
/// table keeps dispatch O(1)-ish and free of side effects to construct; to
/// add an option, add a row.
pub static OPTION_REGISTRY: &[OptionDef] = &[
    OptionDef {
        name: "about",
        arity: Arity::Flag,
        pass1: Some(first_pass::info_about),
        pass2: None,
    },
    OptionDef {
        name: "auto-plot",
        arity: Arity::WithValue,
        pass1: Some(first_pass::check_tri_state),
        pass2: Some(second_pass::set_auto_plot),
    },
    OptionDef {
        name: "background-color",
        arity: Arity::WithValue,
        pass1: Some(first_pass::check_color),
        pass2: Some(second_pass::set_background_color),
    },
    OptionDef {
        name: "codec-version",
        arity: Arity::Flag,
        pass1: Some(first_pass::info_codec_version),
        pass2: None,
    },
    OptionDef {
        name: "cursor-color",
        arity: Arity::WithValue,
        pass1: Some(first_pass::check_color),
        pass2: Some(second_pass::set_cursor_color),
    },
    OptionDef {
        name: "force-pipe",
        arity: Arity::Flag,
        pass1: Some(first_pass::pipe_force),
        pass2: None,
    },
    OptionDef {
        name: "geometry",
        arity: Arity::WithValue,
        pass1: Some(first_pass::check_geometry),
        pass2: Some(second_pass::set_geometry),
    },
    OptionDef {
        name: "grid-line-color",
        arity: Arity::WithValue,
        pass1: Some(first_pass::check_color),
        pass2: Some(second_pass::set_grid_line_color),
    },
    OptionDef {
        name: "help",
        arity: Arity::Flag,
        pass1: Some(first_pass::info_help),
        pass2: None,
    },
    OptionDef {
        name: "legend",
        arity: Arity::WithValue,
        pass1: Some(first_pass::check_tri_state),
        pass2: Some(second_pass::set_legend),
    },
    OptionDef {
        name: "line-width",
        arity: Arity::WithValue,
        pass1: Some(first_pass::check_line_width),
        pass2: Some(second_pass::set_line_width),
    },
    OptionDef {
        name: "load",
        arity: Arity::WithValue,
        pass1: None,
        pass2: Some(second_pass::load_file_option),
    },
    OptionDef {
        name: "no-pipe",
        arity: Arity::Flag,
        pass1: Some(first_pass::pipe_forbid),
        pass2: None,
    },
    OptionDef {
        name: "pipe",
        arity: Arity::Flag,
        pass1: Some(first_pass::pipe_request),
        pass2: None,
    },
    OptionDef {
        name: "pipe-here",
        arity: Arity::Flag,
        pass1: Some(first_pass::pipe_here),
        pass2: Some(second_pass::read_pipe_here),
    },
    OptionDef {
        name: "plot",
        arity: Arity::WithValue,
        pass1: Some(first_pass::check_channel_list),
        pass2: Some(second_pass::plot_session),
    },
    OptionDef {
        name: "plot-last",
        arity: Arity::WithValue,
        pass1: Some(first_pass::check_channel_list),
        pass2: Some(second_pass::plot_last),
    },
    OptionDef {
        name: "point-size",
        arity: Arity::WithValue,
        pass1: Some(first_pass::check_point_size),
        pass2: Some(second_pass::set_point_size),
    },
    OptionDef {
        name: "quiet",
        arity: Arity::Flag,
        pass1: Some(first_pass::note_quiet),
        pass2: Some(second_pass::set_quiet),
    },
    OptionDef {
        name: "shell",
        arity: Arity::Flag,
        pass1: None,
        pass2: Some(second_pass::set_shell),
    },
    OptionDef {
        name: "title",
        arity: Arity::WithValue,
        pass1: None,
        pass2: Some(second_pass::set_title),
    },
    OptionDef {
        name: "toolkit-version",
        arity: Arity::Flag,
        pass1: Some(first_pass::info_toolkit_version),
        pass2: None,
    },
    OptionDef {
        name: "trace-color",
        arity: Arity::WithValue,
        pass1: Some(first_pass::check_color),
        pass2: Some(second_pass::set_trace_color),
    },
    OptionDef {
        name: "version",
        arity: Arity::Flag,
        pass1: Some(first_pass::info_version),
        pass2: None,
    },
];

/// Finds a descriptor by exact long-option name.
pub fn find_option(name: &str) -> Option<&'static OptionDef> {
    OPTION_REGISTRY.iter().find(|def| def.name == name)
}
