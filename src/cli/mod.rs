// src/cli/mod.rs

pub mod first_pass;
pub mod info;
pub mod registry;
pub mod second_pass;
pub mod session;
pub mod tokens;

use crate::constants;
use crate::core::loader::{LoadError, SourceLoader};
use crate::core::plot::{BindError, PlotBuilder};
use crate::models::AppConfig;
use crate::system::stdin_probe;
use colored::Colorize;
use self::info::InfoKind;
use self::second_pass::SecondPass;
use self::session::{FirstPassSession, SecondPassSession};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// The combined first-pass report: one line per bad option argument.
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Bind(#[from] BindError),
}

/// What the engine hands back to the driver: either an informational exit
/// or a fully interpreted launch.
#[derive(Debug)]
pub enum Interpretation {
    Info(InfoKind),
    Launch(Launch),
}

#[derive(Debug)]
pub struct Launch {
    pub config: AppConfig,
    /// Standard input was read as a data source; the shell must re-attach
    /// to the controlling terminal before taking interactive input.
    pub stdin_consumed: bool,
}

/// Interprets the command line against the real stdin probe.
pub fn interpret(
    tokens: &[String],
    loader: &mut dyn SourceLoader,
    builder: &mut dyn PlotBuilder,
) -> Result<Interpretation, EngineError> {
    interpret_with_probe(tokens, loader, builder, &mut || {
        stdin_probe::stdin_ready(Duration::from_millis(constants::STDIN_POLL_TIMEOUT_MS))
    })
}

/// The whole engine, with the readiness probe injected so the passes stay
/// testable without a real pipe.
///
/// Walks the token stream twice: the first pass checks everything and
/// commits nothing, the second applies every effect in order. In between,
/// the pipe policy is finalized; the probe runs only when the user left it
/// undetermined.
pub fn interpret_with_probe(
    tokens: &[String],
    loader: &mut dyn SourceLoader,
    builder: &mut dyn PlotBuilder,
    probe: &mut dyn FnMut() -> bool,
) -> Result<Interpretation, EngineError> {
    let mut session = FirstPassSession::new();
    let args = tokens::lex(tokens, &mut session.errors);

    if let Some(kind) = first_pass::run(&args, &mut session) {
        return Ok(Interpretation::Info(kind));
    }
    if !session.errors.is_empty() {
        return Err(EngineError::Validation(session.errors.into_report()));
    }

    let pipe_enabled = session.pipe.resolve(probe);
    log::debug!("pipe policy resolved: {}", pipe_enabled);
    if session.stdin_named && !pipe_enabled && !session.quiet {
        eprintln!(
            "{}: '-' was given but no piped data is available; it will be skipped",
            "Warning".yellow()
        );
    }

    let mut cfg = AppConfig::default();
    let mut pass2 = SecondPassSession::new();
    {
        let mut ctx = SecondPass {
            cfg: &mut cfg,
            session: &mut pass2,
            loader: &mut *loader,
            builder: &mut *builder,
            pipe_enabled,
            positional_pipe: session.pipe_at_position,
        };
        second_pass::run(&args, &mut ctx)?;
    }

    // Window construction needs at least one window to hang the UI on,
    // even when nothing was loaded.
    builder.ensure_window()?;

    Ok(Interpretation::Launch(Launch {
        config: cfg,
        stdin_consumed: pass2.stdin_consumed,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::loader::testing::StubLoader;
    use crate::core::plot::{PlotBuilder, WindowPlan};

    fn interpret_for_test(
        raw: &[&str],
        files: &[(&str, usize)],
        ready: bool,
    ) -> (Result<Interpretation, EngineError>, WindowPlan, usize) {
        let tokens: Vec<String> = raw.iter().map(|t| t.to_string()).collect();
        let mut loader = StubLoader::with_files(files);
        let mut plan = WindowPlan::new();
        let mut probes = 0;
        let result = interpret_with_probe(&tokens, &mut loader, &mut plan, &mut || {
            probes += 1;
            ready
        });
        (result, plan, probes)
    }

    #[test]
    fn combined_report_and_no_second_pass_effects() {
        let (result, plan, _) = interpret_for_test(
            &["--grid-line-color=notacolor", "--point-size=9999", "--legend=maybe"],
            &[],
            false,
        );
        match result {
            Err(EngineError::Validation(report)) => {
                assert!(report.contains("grid-line-color"));
                assert!(report.contains("legend"));
                // The clamped option is not an error.
                assert!(!report.contains("point-size"));
            }
            other => panic!("expected a validation report, got {:?}", other),
        }
        assert_eq!(plan.window_count(), 0);
    }

    #[test]
    fn info_short_circuits_even_after_errors() {
        let (result, _, _) =
            interpret_for_test(&["--legend=maybe", "--version"], &[], false);
        assert!(matches!(
            result,
            Ok(Interpretation::Info(InfoKind::Version))
        ));
    }

    #[test]
    fn undetermined_policy_consults_the_probe_once() {
        let (result, _, probes) = interpret_for_test(&["a.dat"], &[("a.dat", 2)], false);
        assert!(result.is_ok());
        assert_eq!(probes, 1);

        let (_, _, probes) = interpret_for_test(&["--no-pipe", "a.dat"], &[("a.dat", 2)], false);
        assert_eq!(probes, 0);

        let (_, _, probes) = interpret_for_test(&["--pipe", "a.dat"], &[("a.dat", 2)], false);
        assert_eq!(probes, 0);
    }

    #[test]
    fn lone_stdin_marker_without_pipe_data_yields_nothing() {
        let (result, plan, probes) = interpret_for_test(&["-"], &[], false);
        let launch = match result {
            Ok(Interpretation::Launch(launch)) => launch,
            other => panic!("expected a launch, got {:?}", other),
        };
        assert_eq!(probes, 1);
        assert!(launch.config.sources.is_empty());
        assert!(!launch.stdin_consumed);
        // Still exactly one (empty) window.
        assert_eq!(plan.window_count(), 1);
        assert!(plan.windows.first().unwrap().panels.is_empty());
    }

    #[test]
    fn piped_data_becomes_the_first_source() {
        let (result, plan, _) = interpret_for_test(&["a.dat"], &[("a.dat", 2)], true);
        let launch = match result {
            Ok(Interpretation::Launch(launch)) => launch,
            other => panic!("expected a launch, got {:?}", other),
        };
        assert!(launch.stdin_consumed);
        assert_eq!(launch.config.sources.len(), 2);
        assert_eq!(launch.config.sources[0].name, "<stdin>");
        assert_eq!(plan.window_count(), 1);
        assert_eq!(plan.windows.first().unwrap().panels.len(), 2);
    }

    #[test]
    fn two_files_two_default_plots_one_window() {
        let (result, plan, _) =
            interpret_for_test(&["a.dat", "b.dat"], &[("a.dat", 2), ("b.dat", 3)], false);
        let launch = match result {
            Ok(Interpretation::Launch(launch)) => launch,
            other => panic!("expected a launch, got {:?}", other),
        };
        assert_eq!(launch.config.sources.len(), 2);
        let window = plan.windows.first().unwrap();
        assert_eq!(window.panels.len(), 2);
        assert_eq!(window.panels[0].channels.len(), 2);
        assert_eq!(window.panels[1].channels.len(), 3);
    }

    #[test]
    fn load_failures_surface_as_engine_errors() {
        let (result, _, _) = interpret_for_test(&["missing.dat"], &[], false);
        assert!(matches!(result, Err(EngineError::Load(_))));
    }
}
