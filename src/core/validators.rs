// src/core/validators.rs

use crate::models::{Geometry, Rgba, TriState};
use anyhow::{Result, anyhow};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref HEX_COLOR_RE: Regex =
        Regex::new(r"^#([0-9a-fA-F]{6})([0-9a-fA-F]{2})?$").unwrap();
}

lazy_static! {
    static ref GEOMETRY_RE: Regex =
        Regex::new(r"^(?:(\d+)x(\d+))?(?:([+-]\d+)([+-]\d+))?(!)?$").unwrap();
}

/// Parses a color argument: a known color name, or `#rrggbb` / `#rrggbbaa`.
/// The failure message names the option and the offending string; callers
/// decide disposition.
pub fn parse_color(option: &str, value: &str) -> Result<Rgba> {
    match value.to_lowercase().as_str() {
        "black" => return Ok(Rgba::new(0.0, 0.0, 0.0, 1.0)),
        "white" => return Ok(Rgba::new(1.0, 1.0, 1.0, 1.0)),
        "red" => return Ok(Rgba::new(1.0, 0.0, 0.0, 1.0)),
        "green" => return Ok(Rgba::new(0.0, 1.0, 0.0, 1.0)),
        "blue" => return Ok(Rgba::new(0.0, 0.0, 1.0, 1.0)),
        "yellow" => return Ok(Rgba::new(1.0, 1.0, 0.0, 1.0)),
        "cyan" => return Ok(Rgba::new(0.0, 1.0, 1.0, 1.0)),
        "magenta" => return Ok(Rgba::new(1.0, 0.0, 1.0, 1.0)),
        "gray" | "grey" => return Ok(Rgba::new(0.5, 0.5, 0.5, 1.0)),
        "orange" => return Ok(Rgba::new(1.0, 0.65, 0.0, 1.0)),
        _ => {}
    }

    let caps = HEX_COLOR_RE.captures(value).ok_or_else(|| {
        anyhow!("--{}: '{}' is not a color name or #rrggbb[aa] spec", option, value)
    })?;

    let rgb = caps.get(1).map_or("", |m| m.as_str());
    let decoded = hex::decode(rgb)
        .map_err(|_| anyhow!("--{}: '{}' has invalid hex digits", option, value))?;
    let (r, g, b) = match decoded.as_slice() {
        [r, g, b] => (*r, *g, *b),
        _ => return Err(anyhow!("--{}: '{}' is not a color spec", option, value)),
    };

    let a = match caps.get(2) {
        Some(m) => {
            let byte = hex::decode(m.as_str())
                .map_err(|_| anyhow!("--{}: '{}' has invalid hex digits", option, value))?;
            byte.first().copied().unwrap_or(0xff)
        }
        None => 0xff,
    };

    Ok(Rgba::from_bytes(r, g, b, a))
}

/// Parses a base-10 integer and clamps it into `[min, max]`. Out-of-range
/// values are not an error; non-numeric input is.
pub fn parse_bounded_int(option: &str, value: &str, min: i32, max: i32) -> Result<i32> {
    let raw: i64 = value
        .trim()
        .parse()
        .map_err(|_| anyhow!("--{}: '{}' is not an integer", option, value))?;
    let clamped = raw.clamp(i64::from(min), i64::from(max));
    Ok(i32::try_from(clamped).unwrap_or(min))
}

/// Parses a yes/no/auto switch. Matches case-insensitively on the first
/// letter; anything else fails.
pub fn parse_tri_state(option: &str, value: &str) -> Result<TriState> {
    let first = value.trim().chars().next().map(|c| c.to_ascii_lowercase());
    match first {
        Some('y') => Ok(TriState::Yes),
        Some('n') => Ok(TriState::No),
        Some('a') => Ok(TriState::Auto),
        _ => Err(anyhow!("--{}: '{}' is not yes, no, or auto", option, value)),
    }
}

/// Parses a geometry spec: `[WxH][+X+Y][!]`, or the literal `max`. The `!`
/// suffix (or `max`) requests a maximized window. No clamping; malformed
/// specs are a hard failure.
pub fn parse_geometry(option: &str, value: &str) -> Result<Geometry> {
    if value.eq_ignore_ascii_case("max") {
        return Ok(Geometry {
            maximized: true,
            ..Geometry::default()
        });
    }

    let bad = || anyhow!("--{}: '{}' is not a geometry spec", option, value);
    let caps = GEOMETRY_RE.captures(value).ok_or_else(bad)?;

    let size = match (caps.get(1), caps.get(2)) {
        (Some(w), Some(h)) => {
            let w: u32 = w.as_str().parse().map_err(|_| bad())?;
            let h: u32 = h.as_str().parse().map_err(|_| bad())?;
            if w == 0 || h == 0 {
                return Err(anyhow!("--{}: '{}' has a zero dimension", option, value));
            }
            Some((w, h))
        }
        _ => None,
    };

    let position = match (caps.get(3), caps.get(4)) {
        (Some(x), Some(y)) => {
            let x: i32 = x.as_str().parse().map_err(|_| bad())?;
            let y: i32 = y.as_str().parse().map_err(|_| bad())?;
            Some((x, y))
        }
        _ => None,
    };

    let maximized = caps.get(5).is_some();

    if size.is_none() && position.is_none() && !maximized {
        return Err(bad());
    }

    Ok(Geometry {
        size,
        position,
        maximized,
    })
}

/// Parses a comma-separated list of channel indices. Syntax only; whether
/// the indices exist is a second-pass question.
pub fn parse_channel_list(option: &str, value: &str) -> Result<Vec<usize>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("--{}: empty channel list", option));
    }
    trimmed
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<usize>()
                .map_err(|_| anyhow!("--{}: '{}' is not a channel index", option, part.trim()))
        })
        .collect()
}
