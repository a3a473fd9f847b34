use crate::error::{GaError, Result};
use crate::trace::GenerationRecord;
use plotters::prelude::*;
use std::fmt::Display;
use std::path::Path;

fn plot_error<E: Display>(e: E) -> GaError {
    GaError::Plot(e.to_string())
}

/// Draws the best-ever cost per generation as an SVG line chart.
pub fn draw_convergence(records: &[GenerationRecord], output_path: &Path) -> Result<()> {
    let (first, last) = match (records.first(), records.last()) {
        (Some(first), Some(last)) => (first.generation, last.generation),
        _ => return Err(GaError::Plot("no generations to plot".to_string())),
    };

    let min_cost = records.iter().map(|r| r.best_fitness).min().unwrap_or(0);
    let max_cost = records.iter().map(|r| r.best_fitness).max().unwrap_or(0);

    // Create a drawing area for the chart.
    let root = SVGBackend::new(output_path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error)?;

    // A flat curve still needs a non-empty axis range.
    let mut chart = ChartBuilder::on(&root)
        .caption("Best cost per generation", ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(first..last.max(first + 1), min_cost..max_cost.max(min_cost + 1))
        .map_err(plot_error)?;

    chart
        .configure_mesh()
        .x_desc("Generation")
        .y_desc("Weighted distance")
        .x_labels(10)
        .draw()
        .map_err(plot_error)?;

    chart
        .draw_series(LineSeries::new(
            records.iter().map(|r| (r.generation, r.best_fitness)),
            &RED,
        ))
        .map_err(plot_error)?
        .label("best-ever cost")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .draw()
        .map_err(plot_error)?;

    root.present().map_err(plot_error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(generation: usize, best_fitness: u64) -> GenerationRecord {
        GenerationRecord {
            generation,
            best_fitness,
            chromosome: "1 0".to_string(),
            improved: 0,
            diversity: 0,
            discarded: 0,
        }
    }

    #[test]
    fn writes_svg_file() {
        let path = std::env::temp_dir().join(format!(
            "pmedian_convergence_{}.svg",
            std::process::id()
        ));
        let records = vec![record(1, 90), record(2, 75), record(3, 75)];

        draw_convergence(&records, &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<svg"));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn refuses_empty_history() {
        let path = std::env::temp_dir().join("pmedian_never_written.svg");
        assert!(matches!(
            draw_convergence(&[], &path),
            Err(GaError::Plot(_))
        ));
    }
}
