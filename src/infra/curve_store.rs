// ============================================================
// Layer 6 — Curve Store
// ============================================================
// Writes each word's probability-vs-distance curve twice, as a
// CSV with the raw numbers and as a chart:
//
//   plots/the.csv
//     distance,model,test_data
//     3,0.012031,0.008100
//     4,0.010544,0.009900
//
//   plots/the.svg
//     title "the", x "distance (# words)", y "Probability",
//     "Model" and "Test data" series, x from min - 1 to max
//
// Charts are SVG so text is written as text elements and no
// system font has to be found at render time.
//
// Reference: plotters crate documentation (ChartBuilder, SVGBackend)

use anyhow::{Context, Result};
use plotters::prelude::*;
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use crate::domain::distance_curve::DistanceCurve;

const MODEL_COLOR:     RGBColor = RGBColor(0, 0, 139);
const TEST_DATA_COLOR: RGBColor = RGBColor(0, 128, 0);

pub struct CurveStore {
    dir: PathBuf,
}

impl CurveStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create plots directory '{}'", dir.display()))?;
        Ok(Self { dir })
    }

    /// Write `<dir>/<word>.csv`, replacing any previous curve for the word.
    pub fn write(&self, curve: &DistanceCurve) -> Result<PathBuf> {
        let path  = self.dir.join(format!("{}.csv", curve.word));
        let mut f = fs::File::create(&path)
            .with_context(|| format!("Cannot create '{}'", path.display()))?;

        writeln!(f, "distance,model,test_data")?;
        for p in &curve.points {
            writeln!(f, "{},{:.6},{:.6}", p.distance, p.model, p.test_data)?;
        }

        tracing::debug!("Wrote curve for '{}' to '{}'", curve.word, path.display());
        Ok(path)
    }

    /// Draw `<dir>/<word>.svg` with the model and test-data series.
    pub fn plot(&self, curve: &DistanceCurve) -> Result<PathBuf> {
        if curve.points.is_empty() {
            anyhow::bail!("Curve for '{}' has no points to plot", curve.word);
        }

        let path = self.dir.join(format!("{}.svg", curve.word));
        draw_curve(&path, curve)
            .map_err(|e| anyhow::anyhow!("Cannot draw '{}': {e:?}", path.display()))?;

        tracing::debug!("Plotted curve for '{}' to '{}'", curve.word, path.display());
        Ok(path)
    }
}

fn draw_curve(path: &Path, curve: &DistanceCurve) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let model: Vec<(f64, f64)> = curve.points.iter().map(|p| (p.distance as f64, p.model)).collect();
    let test:  Vec<(f64, f64)> = curve.points.iter().map(|p| (p.distance as f64, p.test_data)).collect();

    let x_min = model.iter().map(|p| p.0).fold(f64::INFINITY, f64::min) - 1.0;
    let x_max = model.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
    let y_top = model.iter().chain(&test).map(|p| p.1).fold(0.0, f64::max);
    let y_max = if y_top > 0.0 { y_top * 1.1 } else { 1.0 };

    let root = SVGBackend::new(path, (640, 480)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&curve.word, ("sans-serif", 24))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, 0.0..y_max)?;

    chart
        .configure_mesh()
        .x_desc("distance (# words)")
        .y_desc("Probability")
        .draw()?;

    chart
        .draw_series(LineSeries::new(model.iter().copied(), MODEL_COLOR.stroke_width(2)))?
        .label("Model")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], MODEL_COLOR.stroke_width(2)));
    chart.draw_series(model.iter().map(|&p| Circle::new(p, 3, MODEL_COLOR.filled())))?;

    chart
        .draw_series(LineSeries::new(test.iter().copied(), TEST_DATA_COLOR.stroke_width(2)))?
        .label("Test data")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], TEST_DATA_COLOR.stroke_width(2)));
    chart.draw_series(test.iter().map(|&p| TriangleMarker::new(p, 5, TEST_DATA_COLOR.filled())))?;

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
