// File: crates/demo/src/main.rs
// Summary: Demo loads metric datapoints (JSON or CSV), runs the chart pipeline, and writes rows as JSON.

mod logging;

use anyhow::{Context, Result};
use chart_data::{chain_totals, datapoints_from_json, ChartPipeline, Datapoint, PipelineConfig, RawBreakdown};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

fn main() -> Result<()> {
    logging::init_logging()?;

    // Usage: impact-charts-demo <input.(json|csv)> [config.json]
    let mut args = std::env::args().skip(1);
    let raw = args
        .next()
        .context("usage: impact-charts-demo <input.(json|csv)> [config.json]")?;
    let path = resolve_path(&raw)?;
    info!(input = %path.display(), "loading datapoints");

    let config = match args.next() {
        Some(cfg) => PipelineConfig::from_path(&cfg).with_context(|| format!("loading config '{cfg}'"))?,
        None => PipelineConfig::from_env().context("reading CHART_* environment")?,
    };
    let pipeline = ChartPipeline::new(config)?;

    let points = load_datapoints(&path)
        .with_context(|| format!("failed to load '{}'", path.display()))?;
    info!(count = points.len(), "loaded datapoints");
    if points.is_empty() {
        anyhow::bail!("no datapoints loaded; check headers/fields.");
    }

    for total in chain_totals(&points).iter().take(5) {
        info!(chain = %total.chain, total = total.total, points = total.points, "chain breakdown");
    }

    let rows = pipeline.run(&points);
    if rows.len() < points.len() && pipeline.config().period.is_none() {
        warn!(dropped = points.len() - rows.len(), "some datapoints were not charted");
    }
    info!(rows = rows.len(), series = ?pipeline.series_names(), "assembled chart");

    let out = out_name_for(&path);
    let json = serde_json::to_string_pretty(&rows)?;
    std::fs::write(&out, json).with_context(|| format!("writing {}", out.display()))?;
    println!("Wrote {}", out.display());
    Ok(())
}

fn resolve_path(raw: &str) -> Result<PathBuf> {
    let p = Path::new(raw);
    if p.exists() {
        return Ok(p.to_path_buf());
    }
    anyhow::bail!("file not found: {}", p.display());
}

/// Produce output file name like target/out/chart_<stem>.json
fn out_name_for(input: &Path) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("datapoints");
    let mut out = PathBuf::from("target/out");
    std::fs::create_dir_all(&out).ok();
    out.push(format!("chart_{stem}.json"));
    out
}

fn load_datapoints(path: &Path) -> Result<Vec<Datapoint>> {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "csv" => load_csv(path),
        _ => {
            let text = std::fs::read_to_string(path)?;
            Ok(datapoints_from_json(&text)?)
        }
    }
}

/// Load a datapoint CSV, locating columns by header name.
fn load_csv(path: &Path) -> Result<Vec<Datapoint>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect::<Vec<_>>();
    info!(?headers, "csv headers");

    let idx = |names: &[&str]| -> Option<usize> {
        headers.iter().position(|h| names.iter().any(|want| h == want))
    };
    let i_date = idx(&["date", "timestamp", "time", "outputtimestamp"]);
    let i_value = idx(&["value", "amount"]);
    let i_breakdown = idx(&["breakdown", "chainbreakdown"]);
    let i_proof = idx(&["proof", "outputproof"]);

    let (Some(i_date), Some(i_value)) = (i_date, i_value) else {
        anyhow::bail!("csv needs a date and a value column");
    };

    let mut out = Vec::new();
    for (line, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let field = |i: Option<usize>| i.and_then(|ix| rec.get(ix)).map(str::trim).filter(|s| !s.is_empty());
        let Some(value) = field(Some(i_value)).and_then(|s| s.parse::<f64>().ok()) else {
            warn!(line = line + 2, "skipping row without a numeric value");
            continue;
        };
        let Some(date) = field(Some(i_date)) else {
            warn!(line = line + 2, "skipping row without a date");
            continue;
        };
        let mut point = Datapoint::new(date, value);
        if let Some(bd) = field(i_breakdown) {
            point = point.with_breakdown(RawBreakdown::Encoded(bd.to_string()));
        }
        if let Some(proof) = field(i_proof) {
            point = point.with_proof(proof);
        }
        out.push(point);
    }
    Ok(out)
}
