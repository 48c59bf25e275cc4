//! Points file: 16 whitespace-separated reals, curve 1 then curve 2, each as
//! four `x y` control points.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use biarc::api::CubicBezier;

/// Parse the 16 numbers of a points file.
pub fn parse_points(text: &str) -> Result<(CubicBezier, CubicBezier)> {
    let values = text
        .split_whitespace()
        .enumerate()
        .map(|(i, tok)| {
            tok.parse::<f64>()
                .with_context(|| format!("value {} ({tok:?}) is not a number", i + 1))
        })
        .collect::<Result<Vec<f64>>>()?;
    if values.len() != 16 {
        bail!("expected 16 numbers (two curves of four points), found {}", values.len());
    }
    let c1 = CubicBezier::from_flat(&values[..8]).context("curve 1")?;
    let c2 = CubicBezier::from_flat(&values[8..]).context("curve 2")?;
    Ok((c1, c2))
}

pub fn read_points_file<P: AsRef<Path>>(path: P) -> Result<(CubicBezier, CubicBezier)> {
    let path = path.as_ref();
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_points(&text).with_context(|| format!("parsing {}", path.display()))
}

/// One control point per line, curve 1 first.
pub fn format_points(c1: &CubicBezier, c2: &CubicBezier) -> String {
    let mut out = String::new();
    for q in c1.p.iter().chain(c2.p.iter()) {
        out.push_str(&format!("{} {}\n", q.x, q.y));
    }
    out
}

pub fn write_points_file<P: AsRef<Path>>(path: P, c1: &CubicBezier, c2: &CubicBezier) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    fs::write(path, format_points(c1, c2)).with_context(|| format!("writing {}", path.display()))
}
