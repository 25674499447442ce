// src/bin/traceview.rs

use colored::Colorize;
use std::env;
use traceview::cli::{self, EngineError, Interpretation, Launch, info};
use traceview::core::layout_display;
use traceview::core::loader::TableLoader;
use traceview::core::plot::{PlotBuilder, WindowPlan};
use traceview::system::shell;

/// The main entry point. It sets up logging, runs the interpretation
/// engine, and performs centralized error handling: the engine never exits
/// the process itself, so every termination path goes through here.
fn main() {
    env_logger::init();
    let tokens: Vec<String> = env::args().skip(1).collect();
    std::process::exit(run(&tokens));
}

fn run(tokens: &[String]) -> i32 {
    let mut loader = TableLoader::new();
    let mut plan = WindowPlan::new();

    match cli::interpret(tokens, &mut loader, &mut plan) {
        Ok(Interpretation::Info(kind)) => {
            info::print(kind);
            0
        }
        Ok(Interpretation::Launch(launch)) => start_application(launch, plan),
        Err(EngineError::Validation(report)) => {
            eprintln!("{}:\n{}", "Invalid command line".red().bold(), report);
            1
        }
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            1
        }
    }
}

/// The handoff to window construction and, last of all, the shell.
fn start_application(launch: Launch, plan: WindowPlan) -> i32 {
    let cfg = launch.config;

    if !cfg.quiet {
        println!(
            "{} {}: {} source(s), {} window(s)",
            "traceview".green().bold(),
            env!("CARGO_PKG_VERSION"),
            cfg.sources.len(),
            plan.window_count()
        );
        if let Some(title) = &cfg.title {
            println!("title: {}", title);
        }
        print!("{}", layout_display::render(&cfg, &plan));
    }

    if cfg.shell {
        // The shell reads interactively; a stdin that was drained as data
        // must be pointed back at the terminal first.
        if launch.stdin_consumed {
            if let Err(e) = shell::reattach_stdin_to_tty() {
                eprintln!("{}: {}", "Error".red().bold(), e);
                return 1;
            }
        }
        if let Err(e) = shell::run(&cfg, &plan) {
            eprintln!("{}: {}", "Error".red().bold(), e);
            return 1;
        }
    }

    0
}
