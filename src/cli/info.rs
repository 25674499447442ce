// src/cli/info.rs

use crate::core::loader;
use crate::core::plot;

/// The informational exits: not errors, just output the user asked for.
/// The first pass returns one of these and the driver prints it, so the
/// engine stays free of process-exit side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoKind {
    Help,
    Version,
    About,
    CodecVersion,
    ToolkitVersion,
}

/// Prints the requested text to stdout.
pub fn print(kind: InfoKind) {
    match kind {
        InfoKind::Help => print_help(),
        InfoKind::Version => println!("traceview {}", env!("CARGO_PKG_VERSION")),
        InfoKind::About => print_about(),
        InfoKind::CodecVersion => println!("table codec {}", loader::CODEC_VERSION),
        InfoKind::ToolkitVersion => {
            let (major, minor, micro) = plot::TOOLKIT_VERSION;
            println!("plan toolkit {}.{}.{}", major, minor, micro);
        }
    }
}

fn print_help() {
    println!(
        "traceview {}, a multi-channel trace plotter",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    traceview [OPTIONS] [FILE]...   ('-' reads standard input)");
    println!();
    println!("OPTIONS:");
    println!("    --help                    Print this text");
    println!("    --version                 Print the version");
    println!("    --about                   Describe the program");
    println!("    --codec-version           Print the trace decoder version");
    println!("    --toolkit-version         Print the plan toolkit version");
    println!();
    println!("    --load=FILE               Load FILE (same as naming it bare)");
    println!("    --plot=N[,N...]           Plot the given session-wide channel indices");
    println!("    --plot-last=N[,N...]      Plot channels of the most recently loaded file");
    println!("    --auto-plot=yes|no|auto   Give unplotted files a default plot (default: auto)");
    println!();
    println!("    --pipe                    Treat piped input as an implicit first file");
    println!("    --force-pipe              Always read piped input");
    println!("    --no-pipe                 Never read piped input");
    println!("    --pipe-here               Read piped input at this position instead");
    println!();
    println!("    --background-color=C      C is a color name or #rrggbb[aa]");
    println!("    --grid-line-color=C");
    println!("    --trace-color=C");
    println!("    --cursor-color=C");
    println!("    --point-size=N            Clamped to [0, 101]");
    println!("    --line-width=N            Clamped to [1, 32]");
    println!("    --legend=yes|no|auto");
    println!("    --geometry=[WxH][+X+Y][!] '!' (or 'max') maximizes");
    println!("    --title=TEXT");
    println!();
    println!("    --shell                   Open the interactive shell after startup");
    println!("    --quiet                   Suppress the startup banner and layout");
}

fn print_about() {
    println!("traceview plots multi-channel trace files, one panel per source by");
    println!("default, with explicit channel selections via --plot and --plot-last.");
    println!("Piped input is detected automatically and loaded as the first source.");
}
