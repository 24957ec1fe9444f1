//! Job runner: builds experiments from config, samples patterns, and writes
//! result files.

use std::path::Path;

use anyhow::{Context, Result};
use ndarray::Array1;
use serde::Serialize;

use fringe_core::experiment::{SlitExperiment, TheoryConstants};
use fringe_core::types::{FringePrediction, ScreenPattern, SlitMode};

use crate::config::JobConfig;

/// Build the experiment from a parsed job configuration, converting bench
/// units (nm, µm) to SI metres. Plausibility warnings go to stderr.
pub fn build_experiment(job: &JobConfig) -> Result<SlitExperiment> {
    let exp = &job.experiment;
    let experiment = SlitExperiment::new(
        exp.wavelength_nm * 1e-9,
        exp.slit_width_um * 1e-6,
        exp.slit_separation_um * 1e-6,
        exp.screen_distance_m,
    )?;

    for warning in experiment.warnings() {
        eprintln!("Warning: {}", warning);
    }
    Ok(experiment)
}

/// Sample the configured screen window.
pub fn sample_pattern(experiment: &SlitExperiment, job: &JobConfig) -> Result<ScreenPattern> {
    let width = job.screen.width_mm * 1e-3;
    let pattern = experiment.simulate(width, job.screen.points, job.screen.mode)?;
    println!(
        "  mode={}: {} samples over {:.2} mm",
        pattern.mode,
        pattern.intensity.len(),
        job.screen.width_mm
    );
    Ok(pattern)
}

/// Print the fringe prediction as a console report.
pub fn print_prediction(prediction: &FringePrediction, constants: TheoryConstants) {
    let params = &prediction.params;
    let n = (prediction.maxima.len() - 1) / 2;

    println!("Analytic fringe prediction");
    println!("  wavelength:        {:.1} nm", params.wavelength * 1e9);
    println!("  slit width:        {:.2} µm", params.slit_width * 1e6);
    println!(
        "  slit separation:   {:.2} µm",
        params.slit_separation * 1e6
    );
    println!("  screen distance:   {:.3} m", params.screen_distance);
    println!();
    println!(
        "  fringe spacing:    {:.4} mm",
        prediction.fringe_spacing * 1e3
    );
    println!(
        "  central max width: {:.4} mm",
        prediction.central_max_width * 1e3
    );
    println!("  visible fringes:   {}", constants.visible_fringe_count);
    println!();
    println!("  order   maximum (mm)   minimum (mm)");
    for m in 0..=n {
        let maximum = prediction.maxima[n + m] * 1e3;
        if m < n {
            let minimum = prediction.minima[n + m] * 1e3;
            println!("  {:>5}   {:>12.4}   {:>12.4}", m, maximum, minimum);
        } else {
            println!("  {:>5}   {:>12.4}", m, maximum);
        }
    }
}

/// Write a sampled pattern to a CSV file with a metadata header.
pub fn write_pattern_csv(pattern: &ScreenPattern, path: &Path, job: &JobConfig) -> Result<()> {
    use std::io::Write;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = std::fs::File::create(path)?;

    // Metadata header
    writeln!(file, "# Fringe — Slit Diffraction Pattern")?;
    writeln!(file, "# Version: {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(file, "# mode: {}", pattern.mode)?;
    writeln!(
        file,
        "# wavelength_nm: {}, slit_width_um: {}, slit_separation_um: {}",
        job.experiment.wavelength_nm,
        job.experiment.slit_width_um,
        job.experiment.slit_separation_um
    )?;
    writeln!(file, "# screen_distance_m: {}", job.experiment.screen_distance_m)?;
    writeln!(file, "#")?;
    writeln!(file, "position_m,intensity")?;

    for (&position, &value) in pattern.positions.iter().zip(pattern.intensity.iter()) {
        writeln!(file, "{:.6e},{:.6e}", position, value)?;
    }

    println!("Pattern written to: {}", path.display());
    Ok(())
}

#[derive(Serialize)]
struct PatternRecord {
    mode: SlitMode,
    positions_m: Vec<f64>,
    intensity: Vec<f64>,
}

/// Write a sampled pattern to a JSON file.
pub fn write_pattern_json(pattern: &ScreenPattern, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let record = PatternRecord {
        mode: pattern.mode,
        positions_m: pattern.positions.to_vec(),
        intensity: pattern.intensity.to_vec(),
    };
    let json = serde_json::to_string_pretty(&record)
        .map_err(|e| anyhow::anyhow!("JSON serialisation error: {}", e))?;
    std::fs::write(path, json)?;

    println!("Pattern (JSON) written to: {}", path.display());
    Ok(())
}

/// Write a fringe prediction to a JSON file.
pub fn write_prediction_json(prediction: &FringePrediction, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(prediction)
        .map_err(|e| anyhow::anyhow!("JSON serialisation error: {}", e))?;
    std::fs::write(path, json)?;

    println!("Prediction (JSON) written to: {}", path.display());
    Ok(())
}

/// A measured (position, intensity) series read from CSV.
///
/// Intensity is expected to be normalised to [0, 1] the way the sampled
/// patterns are; the comparison does not rescale.
#[derive(Debug, Clone)]
pub struct MeasuredSeries {
    pub positions: Vec<f64>,
    pub intensity: Vec<f64>,
}

/// Read a two-column (position_m, intensity) CSV file.
///
/// `#` comment lines and one leading textual header row are tolerated.
pub fn read_measured_csv(path: &Path) -> Result<MeasuredSeries> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading measured data from {}", path.display()))?;
    parse_measured(&content).with_context(|| format!("parsing {}", path.display()))
}

fn parse_measured(content: &str) -> Result<MeasuredSeries> {
    let mut positions = Vec::new();
    let mut intensity = Vec::new();

    for (index, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut columns = line.split(',');
        let first = columns.next().unwrap_or_default().trim();
        let second = columns
            .next()
            .with_context(|| format!("line {}: expected two comma-separated columns", index + 1))?
            .trim();

        let position: f64 = match first.parse() {
            Ok(value) => value,
            // A leading column-header row is tolerated.
            Err(_) if positions.is_empty() => continue,
            Err(e) => anyhow::bail!("line {}: cannot parse position '{}': {}", index + 1, first, e),
        };
        let value: f64 = second
            .parse()
            .with_context(|| format!("line {}: cannot parse intensity '{}'", index + 1, second))?;

        positions.push(position);
        intensity.push(value);
    }

    if positions.is_empty() {
        anyhow::bail!("no data rows found");
    }
    Ok(MeasuredSeries {
        positions,
        intensity,
    })
}

/// Agreement statistics between a measured series and theory.
#[derive(Debug, Serialize)]
pub struct ComparisonReport {
    pub sample_count: usize,
    pub mse: f64,
    pub correlation: f64,
    pub rating: &'static str,
}

/// Re-evaluate the theory at the measured positions and score the agreement.
///
/// The theory is computed at exactly the caller's positions, never at a
/// regenerated grid, so residuals line up sample for sample.
pub fn compare_measurement(
    experiment: &SlitExperiment,
    measured: &MeasuredSeries,
    mode: SlitMode,
) -> Result<(Array1<f64>, ComparisonReport)> {
    let positions = Array1::from(measured.positions.clone());
    let theory = experiment.intensity_at(&positions, mode)?;

    let mse = mean_squared_error(&measured.intensity, &theory);
    let correlation = pearson_correlation(&measured.intensity, &theory);
    let report = ComparisonReport {
        sample_count: measured.positions.len(),
        mse,
        correlation,
        rating: fit_rating(correlation),
    };
    Ok((theory, report))
}

/// Print the comparison summary to the console.
pub fn print_comparison(report: &ComparisonReport) {
    println!("Comparison against theory");
    println!("  samples:     {}", report.sample_count);
    println!("  MSE:         {:.6e}", report.mse);
    println!("  correlation: {:.4}", report.correlation);
    println!("  agreement:   {}", report.rating);
}

/// Write per-sample residuals to a CSV file with the summary in the header.
pub fn write_residuals_csv(
    measured: &MeasuredSeries,
    theory: &Array1<f64>,
    report: &ComparisonReport,
    path: &Path,
) -> Result<()> {
    use std::io::Write;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = std::fs::File::create(path)?;
    writeln!(file, "# Fringe — Measured vs Theory")?;
    writeln!(file, "# Version: {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(file, "# samples: {}", report.sample_count)?;
    writeln!(file, "# mse: {:.6e}", report.mse)?;
    writeln!(file, "# correlation: {:.6}", report.correlation)?;
    writeln!(file, "# agreement: {}", report.rating)?;
    writeln!(file, "#")?;
    writeln!(file, "position_m,measured,theory,residual")?;

    for ((&position, &m), &t) in measured
        .positions
        .iter()
        .zip(measured.intensity.iter())
        .zip(theory.iter())
    {
        writeln!(file, "{:.6e},{:.6e},{:.6e},{:.6e}", position, m, t, m - t)?;
    }

    println!("Residuals written to: {}", path.display());
    Ok(())
}

/// Write the comparison summary to a JSON file.
pub fn write_comparison_json(report: &ComparisonReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(report)
        .map_err(|e| anyhow::anyhow!("JSON serialisation error: {}", e))?;
    std::fs::write(path, json)?;

    println!("Comparison (JSON) written to: {}", path.display());
    Ok(())
}

fn mean_squared_error(measured: &[f64], theory: &Array1<f64>) -> f64 {
    let n = measured.len() as f64;
    let sum: f64 = measured
        .iter()
        .zip(theory.iter())
        .map(|(&m, &t)| (m - t) * (m - t))
        .sum();
    sum / n
}

/// Pearson correlation coefficient.
///
/// Flat (zero-variance) series have no defined correlation; 0.0 is returned
/// so the rating degrades instead of propagating NaN.
fn pearson_correlation(measured: &[f64], theory: &Array1<f64>) -> f64 {
    let n = measured.len() as f64;
    let mean_m = measured.iter().sum::<f64>() / n;
    let mean_t = theory.iter().sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut var_m = 0.0;
    let mut var_t = 0.0;
    for (&m, &t) in measured.iter().zip(theory.iter()) {
        let dm = m - mean_m;
        let dt = t - mean_t;
        covariance += dm * dt;
        var_m += dm * dm;
        var_t += dt * dt;
    }

    let denominator = (var_m * var_t).sqrt();
    if denominator > 0.0 {
        covariance / denominator
    } else {
        0.0
    }
}

/// Qualitative agreement rating for lab write-ups.
fn fit_rating(correlation: f64) -> &'static str {
    if correlation > 0.95 {
        "excellent"
    } else if correlation > 0.85 {
        "very good"
    } else if correlation > 0.70 {
        "good"
    } else {
        "needs improvement"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_measured_skips_comments_and_header() {
        let content = "\
# bench run 12
position_m,intensity
-1.0e-3,0.25
0.0,1.0

1.0e-3,0.25
";
        let series = parse_measured(content).unwrap();
        assert_eq!(series.positions, vec![-1.0e-3, 0.0, 1.0e-3]);
        assert_eq!(series.intensity, vec![0.25, 1.0, 0.25]);
    }

    #[test]
    fn test_parse_measured_rejects_bad_rows() {
        assert!(parse_measured("").is_err());
        assert!(parse_measured("# only comments\n").is_err());
        assert!(parse_measured("0.0\n").is_err());
        assert!(parse_measured("0.0,1.0\noops,1.0\n").is_err());
        assert!(parse_measured("0.0,not_a_number\n").is_err());
    }

    #[test]
    fn test_mean_squared_error() {
        let measured = vec![0.1, 0.2];
        let theory = Array1::from(vec![0.0, 0.2]);
        let mse = mean_squared_error(&measured, &theory);
        assert!((mse - 0.005).abs() < 1e-15);
    }

    #[test]
    fn test_pearson_correlation_on_linear_data() {
        let measured = vec![0.0, 0.25, 0.5, 0.75, 1.0];
        let theory = Array1::from(measured.clone());
        let r = pearson_correlation(&measured, &theory);
        assert!((r - 1.0).abs() < 1e-12);

        let reversed = Array1::from(vec![1.0, 0.75, 0.5, 0.25, 0.0]);
        let r = pearson_correlation(&measured, &reversed);
        assert!((r + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_correlation_guards_flat_series() {
        let measured = vec![0.5, 0.5, 0.5];
        let theory = Array1::from(vec![0.1, 0.2, 0.3]);
        assert_eq!(pearson_correlation(&measured, &theory), 0.0);
    }

    #[test]
    fn test_fit_rating_thresholds() {
        assert_eq!(fit_rating(0.99), "excellent");
        assert_eq!(fit_rating(0.95), "very good");
        assert_eq!(fit_rating(0.90), "very good");
        assert_eq!(fit_rating(0.75), "good");
        assert_eq!(fit_rating(0.50), "needs improvement");
        assert_eq!(fit_rating(-1.0), "needs improvement");
    }

    #[test]
    fn test_compare_against_own_samples_is_perfect() {
        let experiment = SlitExperiment::default();
        let pattern = experiment.simulate(0.01, 200, SlitMode::Double).unwrap();
        let measured = MeasuredSeries {
            positions: pattern.positions.to_vec(),
            intensity: pattern.intensity.to_vec(),
        };

        let (theory, report) =
            compare_measurement(&experiment, &measured, SlitMode::Double).unwrap();

        assert_eq!(theory.len(), measured.positions.len());
        assert_eq!(report.mse, 0.0);
        assert!(report.correlation > 0.999_999);
        assert_eq!(report.rating, "excellent");
    }
}
