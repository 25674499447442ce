// src/cli/tokens.rs

use crate::cli::registry::{self, Arity, OptionDef};
use crate::cli::session::ErrorSink;

/// One classified command-line token. Both passes walk the same lexed
/// stream, so positions and attachments are decided exactly once.
#[derive(Debug)]
pub enum Arg<'a> {
    Opt {
        def: &'static OptionDef,
        value: Option<&'a str>,
    },
    File(&'a str),
}

/// Classifies the raw token list against the option registry.
///
/// `--name=value` carries its argument inline; for a `WithValue` option
/// without one, the following token is consumed as the argument. Anything
/// not starting with `--` is a filename, except that a multi-character
/// `-x` token is an error (short options do not exist) and a lone `-` is
/// the stdin marker, kept as a filename.
///
/// Unknown options and arity mistakes are recorded in the sink and dropped
/// from the stream; the first pass aborts on a non-empty sink, so the
/// second pass never walks a stream that had them.
pub fn lex<'a>(tokens: &'a [String], errors: &mut ErrorSink) -> Vec<Arg<'a>> {
    let mut out = Vec::new();
    let mut iter = tokens.iter().map(String::as_str).peekable();

    while let Some(token) = iter.next() {
        if let Some(body) = token.strip_prefix("--") {
            let (name, inline) = match body.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (body, None),
            };

            let Some(def) = registry::find_option(name) else {
                errors.record(format!("unknown option '--{}'", name));
                continue;
            };

            match def.arity {
                Arity::Flag => {
                    if inline.is_some() {
                        errors.record(format!("--{}: does not take an argument", name));
                        continue;
                    }
                    out.push(Arg::Opt { def, value: None });
                }
                Arity::WithValue => {
                    let value = inline.or_else(|| iter.next());
                    match value {
                        Some(value) => out.push(Arg::Opt {
                            def,
                            value: Some(value),
                        }),
                        None => {
                            errors.record(format!("--{}: requires an argument", name));
                        }
                    }
                }
            }
        } else if token.len() > 1 && token.starts_with('-') {
            errors.record(format!("unknown option '{}'", token));
        } else {
            out.push(Arg::File(token));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_ok(tokens: &[&str]) -> (Vec<String>, ErrorSink) {
        (tokens.iter().map(|t| t.to_string()).collect(), ErrorSink::default())
    }

    #[test]
    fn classifies_options_files_and_the_stdin_marker() {
        let (tokens, mut sink) = lex_ok(&["--shell", "a.dat", "-", "--point-size=4"]);
        let args = lex(&tokens, &mut sink);
        assert!(sink.is_empty());
        assert_eq!(args.len(), 4);
        assert!(matches!(args[0], Arg::Opt { def, value: None } if def.name == "shell"));
        assert!(matches!(args[1], Arg::File("a.dat")));
        assert!(matches!(args[2], Arg::File("-")));
        assert!(matches!(args[3], Arg::Opt { def, value: Some("4") } if def.name == "point-size"));
    }

    #[test]
    fn value_may_follow_as_its_own_token() {
        let (tokens, mut sink) = lex_ok(&["--load", "a.dat", "--geometry", "-10-20"]);
        let args = lex(&tokens, &mut sink);
        assert!(sink.is_empty());
        assert!(matches!(args[0], Arg::Opt { def, value: Some("a.dat") } if def.name == "load"));
        // A value is consumed even when it starts with a dash.
        assert!(matches!(args[1], Arg::Opt { def, value: Some("-10-20") } if def.name == "geometry"));
    }

    #[test]
    fn unknown_and_malformed_options_are_recorded() {
        let (tokens, mut sink) = lex_ok(&["--no-such", "-x", "--shell=yes", "--plot"]);
        let args = lex(&tokens, &mut sink);
        assert!(args.is_empty());
        let report = sink.into_report();
        assert!(report.contains("unknown option '--no-such'"));
        assert!(report.contains("unknown option '-x'"));
        assert!(report.contains("--shell: does not take an argument"));
        assert!(report.contains("--plot: requires an argument"));
    }
}
