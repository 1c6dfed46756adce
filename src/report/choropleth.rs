//! Interactive choropleth document
//!
//! Writes a self-contained HTML page that hands a serialized choropleth
//! trace to the plotly runtime loaded from its CDN. Only the epidemic
//! schema carries the ISO codes this needs.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use serde::Serialize;

use crate::pipeline::{Dataset, Record};

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.32.0.min.js";

#[derive(Serialize)]
struct ChoroplethTrace<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    locations: Vec<&'a str>,
    z: Vec<f64>,
    text: Vec<&'a str>,
    colorscale: &'static str,
}

/// Render the latest value of one measure per ISO code as a world map.
pub fn write_choropleth(
    path: &Path,
    title: &str,
    dataset: &Dataset,
    measure: usize,
) -> Result<()> {
    // Latest reading per ISO code; BTreeMap keeps the trace ordering stable.
    let mut latest: BTreeMap<&str, &Record> = BTreeMap::new();
    for record in &dataset.records {
        let Some(iso) = record.iso.as_deref() else {
            continue;
        };
        match latest.get(iso) {
            Some(existing) if existing.date >= record.date => {}
            _ => {
                latest.insert(iso, record);
            }
        }
    }
    ensure!(!latest.is_empty(), "no records carry an ISO code");

    let trace = ChoroplethTrace {
        kind: "choropleth",
        locations: latest.keys().copied().collect(),
        z: latest.values().map(|r| r.measures[measure]).collect(),
        text: latest.values().map(|r| r.key.as_str()).collect(),
        colorscale: "Reds",
    };

    let data = serde_json::to_string(&[trace]).context("failed to serialize choropleth trace")?;
    let layout = serde_json::to_string(&serde_json::json!({ "title": title }))
        .context("failed to serialize choropleth layout")?;

    let html = format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>{title}</title>
  <script src="{PLOTLY_CDN}"></script>
</head>
<body>
  <div id="map" style="width:100%;height:100vh;"></div>
  <script>
    Plotly.newPlot("map", {data}, {layout});
  </script>
</body>
</html>
"#
    );

    std::fs::write(path, html)
        .with_context(|| format!("failed to write choropleth to {}", path.display()))?;
    Ok(())
}
