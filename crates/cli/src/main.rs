use anyhow::{Context, Result};
use biarc::api::{
    directed_hausdorff, draw_pair, hausdorff, min_distance, CurveCfg, Hierarchy, ReplayToken,
    SearchCfg,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;
use tracing_subscriber::EnvFilter;

mod output;
mod points;
mod provenance;

use output::{EstimateJson, TreeJson};
use points::{read_points_file, write_points_file};
use provenance::{describe, write_sidecar, Payload};

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Certified distance queries between cubic Bézier curves")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

/// Shared inputs of the query subcommands.
#[derive(Args, Debug)]
struct QueryArgs {
    /// Points file: 16 numbers, curve 1 then curve 2
    #[arg(long)]
    points: PathBuf,
    /// Subdivision power
    #[arg(long, default_value_t = 5)]
    power: u32,
    /// Also write the JSON result here (plus a provenance sidecar)
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Which {
    #[value(name = "1")]
    First,
    #[value(name = "2")]
    Second,
}

#[derive(Subcommand)]
enum Action {
    /// Minimum distance between the two curves
    Mindist {
        #[command(flatten)]
        query: QueryArgs,
        /// Samples per curve for the sampled upper bound
        #[arg(long)]
        samples: Option<usize>,
    },
    /// Hausdorff distance between the two curves
    Hausdorff {
        #[command(flatten)]
        query: QueryArgs,
        /// Only measure how far curve 1 strays from curve 2
        #[arg(long)]
        directed: bool,
        /// Stop once the bounds are this close
        #[arg(long)]
        tol: Option<f64>,
        /// Give up after this many pops without a better upper bound
        #[arg(long)]
        max_stale: Option<usize>,
    },
    /// Dump one curve's hierarchy (boxes, leaf shapes, errors)
    Tree {
        #[command(flatten)]
        query: QueryArgs,
        #[arg(long, value_enum, default_value = "1")]
        curve: Which,
    },
    /// Write a random points file
    Random {
        #[arg(long)]
        out: PathBuf,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 0)]
        index: u64,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    SubscriberBuilder::default()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Mindist { query, samples } => mindist(query, samples),
        Action::Hausdorff {
            query,
            directed,
            tol,
            max_stale,
        } => hausdorff_cmd(query, directed, tol, max_stale),
        Action::Tree { query, curve } => tree(query, curve),
        Action::Random { out, seed, index } => random(out, seed, index),
        Action::Report => report(),
    }
}

/// Print `value` as JSON; with `out`, also write it there with a sidecar.
fn emit<T: Serialize>(value: &T, out: Option<&Path>, payload: Payload) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    println!("{text}");
    if let Some(out) = out {
        if let Some(parent) = out.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
        }
        std::fs::write(out, &text).with_context(|| format!("writing {}", out.display()))?;
        let prov = write_sidecar(out, payload)?;
        tracing::info!(out = %out.display(), provenance = %prov.display(), "wrote result");
    }
    Ok(())
}

fn mindist(query: QueryArgs, samples: Option<usize>) -> Result<()> {
    let (c1, c2) = read_points_file(&query.points)?;
    let mut cfg = SearchCfg::default();
    if let Some(n) = samples {
        cfg.samples = n;
    }
    let h1 = Hierarchy::build(&c1, query.power)?;
    let h2 = Hierarchy::build(&c2, query.power)?;
    let est = min_distance(&h1, &h2, &cfg);
    tracing::info!(
        power = query.power,
        value = est.value,
        error = est.error,
        pops = est.pops,
        "mindist"
    );
    let payload = Payload::new(
        "mindist",
        json!({
            "points": query.points.display().to_string(),
            "power": query.power,
            "samples": cfg.samples,
        }),
    );
    emit(
        &EstimateJson::new("mindist", query.power, &est),
        query.out.as_deref(),
        payload,
    )
}

fn hausdorff_cmd(
    query: QueryArgs,
    directed: bool,
    tol: Option<f64>,
    max_stale: Option<usize>,
) -> Result<()> {
    let (c1, c2) = read_points_file(&query.points)?;
    let mut cfg = SearchCfg::default();
    if let Some(tol) = tol {
        cfg.hausdorff_tol = tol;
    }
    if let Some(n) = max_stale {
        cfg.max_stale_pops = n;
    }
    let (name, est) = if directed {
        ("directed_hausdorff", directed_hausdorff(&c1, &c2, query.power, &cfg)?)
    } else {
        ("hausdorff", hausdorff(&c1, &c2, query.power, &cfg)?)
    };
    tracing::info!(
        power = query.power,
        value = est.value,
        error = est.error,
        pops = est.pops,
        converged = est.converged,
        "{name}"
    );
    let payload = Payload::new(
        name,
        json!({
            "points": query.points.display().to_string(),
            "power": query.power,
            "tol": cfg.hausdorff_tol,
            "max_stale": cfg.max_stale_pops,
        }),
    );
    emit(
        &EstimateJson::new(name, query.power, &est),
        query.out.as_deref(),
        payload,
    )
}

fn tree(query: QueryArgs, curve: Which) -> Result<()> {
    let (c1, c2) = read_points_file(&query.points)?;
    let c = match curve {
        Which::First => c1,
        Which::Second => c2,
    };
    let h = Hierarchy::build(&c, query.power)?;
    tracing::info!(power = query.power, nodes = h.nodes().len(), "tree");
    let payload = Payload::new(
        "tree",
        json!({
            "points": query.points.display().to_string(),
            "power": query.power,
            "curve": format!("{curve:?}"),
        }),
    );
    emit(&TreeJson::from(&h), query.out.as_deref(), payload)
}

fn random(out: PathBuf, seed: u64, index: u64) -> Result<()> {
    let (c1, c2) = draw_pair(CurveCfg::default(), ReplayToken { seed, index });
    write_points_file(&out, &c1, &c2)?;
    let prov = write_sidecar(
        &out,
        Payload::new("random", json!({ "seed": seed, "index": index })),
    )?;
    tracing::info!(out = %out.display(), provenance = %prov.display(), seed, index, "random");
    Ok(())
}

fn report() -> Result<()> {
    let obj = describe(&Payload::new("report", json!({})));
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
