// src/cli/second_pass.rs

use crate::cli::EngineError;
use crate::cli::registry::OptionDef;
use crate::cli::session::SecondPassSession;
use crate::cli::tokens::Arg;
use crate::constants;
use crate::core::loader::SourceLoader;
use crate::core::plot::{self, PlotBuilder};
use crate::core::validators;
use crate::models::{AppConfig, Source};

/// Everything the second pass works against: the configuration it mutates,
/// its session half, the two collaborators, and the pipe policy resolved
/// after pass 1.
pub struct SecondPass<'a> {
    pub cfg: &'a mut AppConfig,
    pub session: &'a mut SecondPassSession,
    pub loader: &'a mut dyn SourceLoader,
    pub builder: &'a mut dyn PlotBuilder,
    pub pipe_enabled: bool,
    /// `--pipe-here` was seen: suppress the implicit before-first-file
    /// stdin insertion and read the pipe at that token instead.
    pub positional_pipe: bool,
}

/// The second walk over the identical token stream. Effects apply strictly
/// left to right: later scalar options win, loads append in encounter
/// order, and the deferred binder resolves around every load. Ends with one
/// final resolution for whatever is still pending.
pub fn run(args: &[Arg<'_>], ctx: &mut SecondPass<'_>) -> Result<(), EngineError> {
    for arg in args {
        match arg {
            Arg::File(name) => load_path(ctx, name)?,
            Arg::Opt { def, value } => {
                if let Some(handler) = def.pass2 {
                    handler(ctx, *def, *value)?;
                }
            }
        }
    }

    resolve_pending(ctx)
}

// --- THE LOAD PATH ---
// Bare filenames and `--load` are the same operation, including stdin
// marker recognition and the at-most-once rule for the pipe.

fn load_path(ctx: &mut SecondPass<'_>, name: &str) -> Result<(), EngineError> {
    if name == constants::STDIN_MARKER {
        return load_stdin(ctx);
    }

    // Implicit stdin insertion, ahead of the first real load, unless the
    // user picked an explicit position with --pipe-here.
    if ctx.pipe_enabled && !ctx.session.stdin_consumed && !ctx.positional_pipe {
        load_stdin(ctx)?;
    }

    // The previous pending source resolves before this load begins.
    resolve_pending(ctx)?;
    let source = ctx.loader.load_file(name)?;
    append_source(ctx, source)
}

fn load_stdin(ctx: &mut SecondPass<'_>) -> Result<(), EngineError> {
    if !ctx.pipe_enabled {
        log::debug!("piping is disabled; skipping the stdin source");
        return Ok(());
    }
    if ctx.session.stdin_consumed {
        log::debug!("standard input was already consumed; skipping");
        return Ok(());
    }

    resolve_pending(ctx)?;
    let source = ctx.loader.load_stdin()?;
    ctx.session.stdin_consumed = true;
    append_source(ctx, source)
}

fn resolve_pending(ctx: &mut SecondPass<'_>) -> Result<(), EngineError> {
    let SecondPass {
        cfg,
        session,
        builder,
        ..
    } = ctx;
    session.binder.resolve(cfg, *builder)?;
    Ok(())
}

fn append_source(ctx: &mut SecondPass<'_>, source: Source) -> Result<(), EngineError> {
    log::debug!(
        "loaded '{}' with {} channel(s)",
        source.name,
        source.channel_count()
    );
    ctx.cfg.sources.push(source);
    ctx.session.binder.set_pending(ctx.cfg.sources.len() - 1);
    Ok(())
}

// --- EFFECT HANDLERS ---
// Pass 1 already validated every argument; a failure here is reported the
// same way but is not an expected path.

fn revalidate(e: anyhow::Error) -> EngineError {
    EngineError::Validation(e.to_string())
}

pub(crate) fn set_background_color(
    ctx: &mut SecondPass<'_>,
    def: &'static OptionDef,
    value: Option<&str>,
) -> Result<(), EngineError> {
    let Some(value) = value else { return Ok(()) };
    ctx.cfg.colors.background = validators::parse_color(def.name, value).map_err(revalidate)?;
    Ok(())
}

pub(crate) fn set_grid_line_color(
    ctx: &mut SecondPass<'_>,
    def: &'static OptionDef,
    value: Option<&str>,
) -> Result<(), EngineError> {
    let Some(value) = value else { return Ok(()) };
    ctx.cfg.colors.grid_line = validators::parse_color(def.name, value).map_err(revalidate)?;
    Ok(())
}

pub(crate) fn set_trace_color(
    ctx: &mut SecondPass<'_>,
    def: &'static OptionDef,
    value: Option<&str>,
) -> Result<(), EngineError> {
    let Some(value) = value else { return Ok(()) };
    ctx.cfg.colors.trace = validators::parse_color(def.name, value).map_err(revalidate)?;
    Ok(())
}

pub(crate) fn set_cursor_color(
    ctx: &mut SecondPass<'_>,
    def: &'static OptionDef,
    value: Option<&str>,
) -> Result<(), EngineError> {
    let Some(value) = value else { return Ok(()) };
    ctx.cfg.colors.cursor = validators::parse_color(def.name, value).map_err(revalidate)?;
    Ok(())
}

pub(crate) fn set_point_size(
    ctx: &mut SecondPass<'_>,
    def: &'static OptionDef,
    value: Option<&str>,
) -> Result<(), EngineError> {
    let Some(value) = value else { return Ok(()) };
    let size = validators::parse_bounded_int(
        def.name,
        value,
        constants::POINT_SIZE_MIN,
        constants::POINT_SIZE_MAX,
    )
    .map_err(revalidate)?;
    if size.to_string() != value.trim() {
        log::debug!("--{}: '{}' clamped to {}", def.name, value, size);
    }
    ctx.cfg.point_size = size;
    Ok(())
}

pub(crate) fn set_line_width(
    ctx: &mut SecondPass<'_>,
    def: &'static OptionDef,
    value: Option<&str>,
) -> Result<(), EngineError> {
    let Some(value) = value else { return Ok(()) };
    let width = validators::parse_bounded_int(
        def.name,
        value,
        constants::LINE_WIDTH_MIN,
        constants::LINE_WIDTH_MAX,
    )
    .map_err(revalidate)?;
    if width.to_string() != value.trim() {
        log::debug!("--{}: '{}' clamped to {}", def.name, value, width);
    }
    ctx.cfg.line_width = width;
    Ok(())
}

pub(crate) fn set_legend(
    ctx: &mut SecondPass<'_>,
    def: &'static OptionDef,
    value: Option<&str>,
) -> Result<(), EngineError> {
    let Some(value) = value else { return Ok(()) };
    ctx.cfg.legend = validators::parse_tri_state(def.name, value).map_err(revalidate)?;
    Ok(())
}

pub(crate) fn set_auto_plot(
    ctx: &mut SecondPass<'_>,
    def: &'static OptionDef,
    value: Option<&str>,
) -> Result<(), EngineError> {
    let Some(value) = value else { return Ok(()) };
    ctx.cfg.auto_plot = validators::parse_tri_state(def.name, value).map_err(revalidate)?;
    Ok(())
}

pub(crate) fn set_geometry(
    ctx: &mut SecondPass<'_>,
    def: &'static OptionDef,
    value: Option<&str>,
) -> Result<(), EngineError> {
    let Some(value) = value else { return Ok(()) };
    ctx.cfg.geometry = Some(validators::parse_geometry(def.name, value).map_err(revalidate)?);
    Ok(())
}

pub(crate) fn set_title(
    ctx: &mut SecondPass<'_>,
    _def: &'static OptionDef,
    value: Option<&str>,
) -> Result<(), EngineError> {
    if let Some(value) = value {
        ctx.cfg.title = Some(value.to_string());
    }
    Ok(())
}

pub(crate) fn set_shell(
    ctx: &mut SecondPass<'_>,
    _def: &'static OptionDef,
    _value: Option<&str>,
) -> Result<(), EngineError> {
    ctx.cfg.shell = true;
    Ok(())
}

pub(crate) fn set_quiet(
    ctx: &mut SecondPass<'_>,
    _def: &'static OptionDef,
    _value: Option<&str>,
) -> Result<(), EngineError> {
    ctx.cfg.quiet = true;
    Ok(())
}

pub(crate) fn load_file_option(
    ctx: &mut SecondPass<'_>,
    _def: &'static OptionDef,
    value: Option<&str>,
) -> Result<(), EngineError> {
    match value {
        Some(name) => load_path(ctx, name),
        None => Ok(()),
    }
}

pub(crate) fn read_pipe_here(
    ctx: &mut SecondPass<'_>,
    _def: &'static OptionDef,
    _value: Option<&str>,
) -> Result<(), EngineError> {
    load_stdin(ctx)
}

pub(crate) fn plot_session(
    ctx: &mut SecondPass<'_>,
    def: &'static OptionDef,
    value: Option<&str>,
) -> Result<(), EngineError> {
    let Some(value) = value else { return Ok(()) };
    let indices = validators::parse_channel_list(def.name, value).map_err(revalidate)?;

    let SecondPass {
        cfg,
        session,
        builder,
        ..
    } = ctx;
    let refs = plot::resolve_session_channels(cfg, def.name, &indices)?;
    builder.bind_channels(cfg, &refs)?;
    session.binder.consume();
    Ok(())
}

pub(crate) fn plot_last(
    ctx: &mut SecondPass<'_>,
    def: &'static OptionDef,
    value: Option<&str>,
) -> Result<(), EngineError> {
    let Some(value) = value else { return Ok(()) };
    let indices = validators::parse_channel_list(def.name, value).map_err(revalidate)?;

    let SecondPass {
        cfg,
        session,
        builder,
        ..
    } = ctx;
    let refs = plot::resolve_file_channels(cfg, def.name, &indices)?;
    builder.bind_channels(cfg, &refs)?;
    session.binder.consume();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::session::ErrorSink;
    use crate::cli::tokens;
    use crate::core::loader::testing::StubLoader;
    use crate::core::plot::testing::{BindEvent, RecordingBuilder};
    use crate::models::{ChannelRef, Rgba, TriState};

    struct Run {
        cfg: AppConfig,
        session: SecondPassSession,
        loader: StubLoader,
        builder: RecordingBuilder,
        result: Result<(), EngineError>,
    }

    fn exec_with(raw: &[&str], files: &[(&str, usize)], pipe: bool, positional: bool) -> Run {
        let tokens: Vec<String> = raw.iter().map(|t| t.to_string()).collect();
        let mut sink = ErrorSink::default();
        let args = tokens::lex(&tokens, &mut sink);
        assert!(sink.is_empty(), "unexpected lex errors: {}", sink.into_report());

        let mut cfg = AppConfig::default();
        let mut session = SecondPassSession::new();
        let mut loader = StubLoader::with_files(files);
        let mut builder = RecordingBuilder::default();
        let result = {
            let mut ctx = SecondPass {
                cfg: &mut cfg,
                session: &mut session,
                loader: &mut loader,
                builder: &mut builder,
                pipe_enabled: pipe,
                positional_pipe: positional,
            };
            run(&args, &mut ctx)
        };
        Run {
            cfg,
            session,
            loader,
            builder,
            result,
        }
    }

    fn exec(raw: &[&str], files: &[(&str, usize)]) -> Run {
        let run = exec_with(raw, files, false, false);
        run.result.as_ref().unwrap();
        run
    }

    #[test]
    fn later_scalar_options_win() {
        let run = exec(
            &[
                "--point-size=4",
                "--title=first",
                "--point-size=7",
                "--title=second",
            ],
            &[],
        );
        assert_eq!(run.cfg.point_size, 7);
        assert_eq!(run.cfg.title.as_deref(), Some("second"));
    }

    #[test]
    fn out_of_range_sizes_clamp_silently() {
        let run = exec(&["--point-size=9999", "--line-width=0"], &[]);
        assert_eq!(run.cfg.point_size, 101);
        assert_eq!(run.cfg.line_width, 1);
    }

    #[test]
    fn scalar_effects_land_in_the_config() {
        let run = exec(
            &[
                "--background-color=white",
                "--trace-color=#ff0000",
                "--legend=no",
                "--geometry=800x600+1+2",
                "--shell",
                "--quiet",
            ],
            &[],
        );
        assert_eq!(run.cfg.colors.background, Rgba::new(1.0, 1.0, 1.0, 1.0));
        assert_eq!(run.cfg.colors.trace, Rgba::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(run.cfg.legend, TriState::No);
        let g = run.cfg.geometry.unwrap();
        assert_eq!(g.size, Some((800, 600)));
        assert_eq!(g.position, Some((1, 2)));
        assert!(run.cfg.shell);
        assert!(run.cfg.quiet);
    }

    #[test]
    fn n_files_get_n_default_plots_in_load_order() {
        let run = exec(&["a.dat", "b.dat"], &[("a.dat", 2), ("b.dat", 3)]);
        assert_eq!(run.loader.loads, vec!["a.dat", "b.dat"]);
        assert_eq!(
            run.builder.events,
            vec![BindEvent::Default(0), BindEvent::Default(1)]
        );
        assert_eq!(run.cfg.sources.len(), 2);
        assert_eq!(run.session.binder.pending(), None);
    }

    #[test]
    fn explicit_plot_consumes_the_pending_source_exactly_once() {
        let run = exec(
            &["a.dat", "--plot=0", "b.dat"],
            &[("a.dat", 2), ("b.dat", 3)],
        );
        assert_eq!(
            run.builder.events,
            vec![
                BindEvent::Channels(vec![ChannelRef { source: 0, channel: 0 }]),
                BindEvent::Default(1),
            ]
        );
    }

    #[test]
    fn session_plot_spans_sources_with_global_numbering() {
        let run = exec(
            &["a.dat", "b.dat", "--plot=1,2"],
            &[("a.dat", 2), ("b.dat", 3)],
        );
        // a.dat resolved when b.dat loaded; the explicit plot then consumed
        // b.dat's pending slot.
        assert_eq!(
            run.builder.events,
            vec![
                BindEvent::Default(0),
                BindEvent::Channels(vec![
                    ChannelRef { source: 0, channel: 1 },
                    ChannelRef { source: 1, channel: 0 },
                ]),
            ]
        );
    }

    #[test]
    fn file_scoped_plot_offsets_by_prior_channel_totals() {
        let run = exec(
            &["a.dat", "b.dat", "--plot-last=2"],
            &[("a.dat", 2), ("b.dat", 3)],
        );
        assert_eq!(
            run.builder.events,
            vec![
                BindEvent::Default(0),
                BindEvent::Channels(vec![ChannelRef { source: 1, channel: 2 }]),
            ]
        );
    }

    #[test]
    fn file_scoped_plot_boundary_failures() {
        let run = exec_with(
            &["a.dat", "b.dat", "--plot-last=3"],
            &[("a.dat", 2), ("b.dat", 3)],
            false,
            false,
        );
        assert!(matches!(run.result, Err(EngineError::Bind(_))));

        let run = exec_with(&["--plot-last=0"], &[], false, false);
        assert!(matches!(run.result, Err(EngineError::Bind(_))));
    }

    #[test]
    fn session_plot_out_of_range_fails() {
        let run = exec_with(&["a.dat", "--plot=2"], &[("a.dat", 2)], false, false);
        assert!(matches!(run.result, Err(EngineError::Bind(_))));
    }

    #[test]
    fn a_failed_load_stops_everything() {
        let run = exec_with(&["missing.dat", "a.dat"], &[("a.dat", 2)], false, false);
        assert!(matches!(run.result, Err(EngineError::Load(_))));
        assert_eq!(run.loader.loads, vec!["missing.dat"]);
    }

    #[test]
    fn load_option_and_bare_filename_are_equivalent() {
        let run = exec(&["--load=a.dat"], &[("a.dat", 2)]);
        assert_eq!(run.cfg.sources.len(), 1);
        assert_eq!(run.builder.events, vec![BindEvent::Default(0)]);
    }

    #[test]
    fn auto_plot_off_leaves_sources_unplotted() {
        let run = exec(&["--auto-plot=no", "a.dat", "b.dat"], &[("a.dat", 2), ("b.dat", 3)]);
        assert!(run.builder.events.is_empty());
        assert_eq!(run.cfg.sources.len(), 2);
    }

    #[test]
    fn auto_plot_is_order_sensitive_like_any_scalar() {
        // At b.dat's load the switch is off, so a.dat is dropped; by the end
        // of the stream it is back on, so b.dat gets its default plot.
        let run = exec(
            &["a.dat", "--auto-plot=no", "b.dat", "--auto-plot=yes"],
            &[("a.dat", 2), ("b.dat", 3)],
        );
        assert_eq!(run.builder.events, vec![BindEvent::Default(1)]);
    }

    #[test]
    fn implicit_stdin_loads_ahead_of_the_first_file() {
        let run = exec_with(&["a.dat"], &[("a.dat", 2)], true, false);
        run.result.as_ref().unwrap();
        assert_eq!(run.loader.loads, vec!["<stdin>", "a.dat"]);
        assert_eq!(
            run.builder.events,
            vec![BindEvent::Default(0), BindEvent::Default(1)]
        );
        assert!(run.session.stdin_consumed);
    }

    #[test]
    fn stdin_is_loaded_at_most_once() {
        let run = exec_with(&["-", "-", "a.dat"], &[("a.dat", 2)], true, false);
        run.result.as_ref().unwrap();
        assert_eq!(run.loader.loads, vec!["<stdin>", "a.dat"]);
        assert_eq!(run.cfg.sources.len(), 2);
    }

    #[test]
    fn stdin_marker_is_skipped_when_piping_is_disabled() {
        let run = exec_with(&["-"], &[], false, false);
        run.result.as_ref().unwrap();
        assert!(run.loader.loads.is_empty());
        assert!(run.cfg.sources.is_empty());
        assert!(run.builder.events.is_empty());
        assert!(!run.session.stdin_consumed);
    }

    #[test]
    fn pipe_here_moves_the_stdin_load_to_its_position() {
        let run = exec_with(
            &["a.dat", "--pipe-here", "b.dat"],
            &[("a.dat", 2), ("b.dat", 3)],
            true,
            true,
        );
        run.result.as_ref().unwrap();
        assert_eq!(run.loader.loads, vec!["a.dat", "<stdin>", "b.dat"]);
        assert_eq!(run.cfg.sources.len(), 3);
    }
}
