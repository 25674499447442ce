// src/cli/first_pass.rs

use crate::cli::info::InfoKind;
use crate::cli::registry::OptionDef;
use crate::cli::session::FirstPassSession;
use crate::cli::tokens::Arg;
use crate::constants;
use crate::core::validators;

/// The first walk over the token stream: checks everything, commits
/// nothing. Informational options short-circuit the rest of the stream;
/// every other failure lands in the session's error sink so the combined
/// report covers the whole command line.
pub fn run(args: &[Arg<'_>], session: &mut FirstPassSession) -> Option<InfoKind> {
    for arg in args {
        if session.errors.is_full() {
            break;
        }
        match arg {
            Arg::File(name) => {
                if *name == constants::STDIN_MARKER {
                    session.stdin_named = true;
                }
            }
            Arg::Opt { def, value } => {
                if let Some(handler) = def.pass1
                    && let Some(info) = handler(session, *def, *value)
                {
                    return Some(info);
                }
            }
        }
    }
    None
}

// --- INFORMATIONAL HANDLERS ---
// These produce output and end the process (exit 0); the enum travels up
// to the driver, which does the printing.

pub(crate) fn info_help(
    _session: &mut FirstPassSession,
    _def: &'static OptionDef,
    _value: Option<&str>,
) -> Option<InfoKind> {
    Some(InfoKind::Help)
}

pub(crate) fn info_version(
    _session: &mut FirstPassSession,
    _def: &'static OptionDef,
    _value: Option<&str>,
) -> Option<InfoKind> {
    Some(InfoKind::Version)
}

pub(crate) fn info_about(
    _session: &mut FirstPassSession,
    _def: &'static OptionDef,
    _value: Option<&str>,
) -> Option<InfoKind> {
    Some(InfoKind::About)
}

pub(crate) fn info_codec_version(
    _session: &mut FirstPassSession,
    _def: &'static OptionDef,
    _value: Option<&str>,
) -> Option<InfoKind> {
    Some(InfoKind::CodecVersion)
}

pub(crate) fn info_toolkit_version(
    _session: &mut FirstPassSession,
    _def: &'static OptionDef,
    _value: Option<&str>,
) -> Option<InfoKind> {
    Some(InfoKind::ToolkitVersion)
}

// --- CHECKING HANDLERS ---
// Validate the attached argument and feed failures to the sink. The lexer
// guarantees WithValue options arrive with a value; a missing one was
// already recorded there.

pub(crate) fn check_color(
    session: &mut FirstPassSession,
    def: &'static OptionDef,
    value: Option<&str>,
) -> Option<InfoKind> {
    if let Some(value) = value
        && let Err(e) = validators::parse_color(def.name, value)
    {
        session.errors.record(e.to_string());
    }
    None
}

pub(crate) fn check_point_size(
    session: &mut FirstPassSession,
    def: &'static OptionDef,
    value: Option<&str>,
) -> Option<InfoKind> {
    if let Some(value) = value
        && let Err(e) = validators::parse_bounded_int(
            def.name,
            value,
            constants::POINT_SIZE_MIN,
            constants::POINT_SIZE_MAX,
        )
    {
        session.errors.record(e.to_string());
    }
    None
}

pub(crate) fn check_line_width(
    session: &mut FirstPassSession,
    def: &'static OptionDef,
    value: Option<&str>,
) -> Option<InfoKind> {
    if let Some(value) = value
        && let Err(e) = validators::parse_bounded_int(
            def.name,
            value,
            constants::LINE_WIDTH_MIN,
            constants::LINE_WIDTH_MAX,
        )
    {
        session.errors.record(e.to_string());
    }
    None
}

pub(crate) fn check_tri_state(
    session: &mut FirstPassSession,
    def: &'static OptionDef,
    value: Option<&str>,
) -> Option<InfoKind> {
    if let Some(value) = value
        && let Err(e) = validators::parse_tri_state(def.name, value)
    {
        session.errors.record(e.to_string());
    }
    None
}

pub(crate) fn check_geometry(
    session: &mut FirstPassSession,
    def: &'static OptionDef,
    value: Option<&str>,
) -> Option<InfoKind> {
    if let Some(value) = value
        && let Err(e) = validators::parse_geometry(def.name, value)
    {
        session.errors.record(e.to_string());
    }
    None
}

pub(crate) fn check_channel_list(
    session: &mut FirstPassSession,
    def: &'static OptionDef,
    value: Option<&str>,
) -> Option<InfoKind> {
    if let Some(value) = value
        && let Err(e) = validators::parse_channel_list(def.name, value)
    {
        session.errors.record(e.to_string());
    }
    None
}

// --- PIPE POLICY AND FLAGS ---

pub(crate) fn pipe_request(
    session: &mut FirstPassSession,
    _def: &'static OptionDef,
    _value: Option<&str>,
) -> Option<InfoKind> {
    session.pipe.request();
    None
}

pub(crate) fn pipe_force(
    session: &mut FirstPassSession,
    _def: &'static OptionDef,
    _value: Option<&str>,
) -> Option<InfoKind> {
    session.pipe.pin(true);
    None
}

pub(crate) fn pipe_forbid(
    session: &mut FirstPassSession,
    _def: &'static OptionDef,
    _value: Option<&str>,
) -> Option<InfoKind> {
    session.pipe.pin(false);
    None
}

pub(crate) fn pipe_here(
    session: &mut FirstPassSession,
    _def: &'static OptionDef,
    _value: Option<&str>,
) -> Option<InfoKind> {
    session.pipe_at_position = true;
    None
}

pub(crate) fn note_quiet(
    session: &mut FirstPassSession,
    _def: &'static OptionDef,
    _value: Option<&str>,
) -> Option<InfoKind> {
    session.quiet = true;
    None
}
