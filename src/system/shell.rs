// src/system/shell.rs

use crate::core::layout_display;
use crate::core::plot::WindowPlan;
use crate::models::AppConfig;
use anyhow::Result;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("no controlling terminal is available: {0}")]
    NoTty(std::io::Error),
    #[error("could not redirect standard input to the terminal: {0}")]
    Redirect(std::io::Error),
    #[error("interactive input is not supported on this platform")]
    Unsupported,
}

/// Re-attaches the standard input descriptor to the controlling terminal.
///
/// Required before constructing the shell when stdin was consumed as a data
/// source: the descriptor is at end-of-pipe and the shell would otherwise
/// read nothing. Fails when the process has no controlling terminal.
#[cfg(unix)]
pub fn reattach_stdin_to_tty() -> Result<(), ResourceError> {
    use std::os::fd::AsRawFd;

    let tty = std::fs::File::open("/dev/tty").map_err(ResourceError::NoTty)?;
    let rc = unsafe { libc::dup2(tty.as_raw_fd(), libc::STDIN_FILENO) };
    if rc < 0 {
        return Err(ResourceError::Redirect(std::io::Error::last_os_error()));
    }
    log::debug!("stdin re-attached to /dev/tty");
    Ok(())
}

#[cfg(not(unix))]
pub fn reattach_stdin_to_tty() -> Result<(), ResourceError> {
    Err(ResourceError::Unsupported)
}

/// Runs the interactive shell over the finished plan. Constructed last,
/// after every window exists. Returns when the user quits or stdin closes.
pub fn run(cfg: &AppConfig, plan: &WindowPlan) -> Result<()> {
    println!(
        "{} (type 'help' for commands)",
        "traceview shell".green().bold()
    );

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("{} ", "traceview>".cyan().bold());
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            // End of input.
            println!();
            break;
        }

        match line.trim() {
            "" => {}
            "help" | "?" => print_help(),
            "sources" => print_sources(cfg),
            "layout" => print!("{}", layout_display::render(cfg, plan)),
            "quit" | "exit" | "q" => break,
            other => println!("unknown command '{}'; try 'help'", other),
        }
    }

    Ok(())
}

fn print_help() {
    println!("  sources   list the loaded sources and their channels");
    println!("  layout    show the window and panel layout");
    println!("  help      show this text");
    println!("  quit      leave the shell");
}

fn print_sources(cfg: &AppConfig) {
    if cfg.sources.is_empty() {
        println!("no sources loaded");
        return;
    }
    for (i, source) in cfg.sources.iter().enumerate() {
        let names: Vec<&str> = source.channels.iter().map(|c| c.name.as_str()).collect();
        println!(
            "{}: {} [{}]",
            i + 1,
            source.name.yellow(),
            names.join(", ")
        );
    }
}
