use log::LevelFilter;
use tiepoint_quality::core::init_with_level;
use tiepoint_quality::{
    compute_disparity_range, remove_epipolar_outliers, Correspondence, CorrespondenceSet,
    DisparityBounds, QualityReport, QualityReportParams,
};

/// Synthetic matcher output: a loose grid of tie points with a disparity
/// ramp, mild epipolar noise, and a few gross mismatches sprinkled in.
fn synthetic_matches(n_side: usize) -> CorrespondenceSet {
    let mut matches = Vec::with_capacity(n_side * n_side);
    for j in 0..n_side {
        for i in 0..n_side {
            let x = i as f64 * 50.0;
            let y = j as f64 * 50.0;
            let disparity = -3.0 + 0.01 * x;
            let error = 0.3 * ((i * 7 + j * 13) % 11) as f64 / 11.0 - 0.15;
            matches.push(Correspondence::new(x, y, x + disparity, y - error));
        }
    }
    // Mismatches far outside the inlier population.
    matches.push(Correspondence::new(120.0, 300.0, 400.0, 150.0));
    matches.push(Correspondence::new(700.0, 90.0, 300.0, 600.0));
    CorrespondenceSet::new(matches)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_with_level(LevelFilter::Debug)?;

    let raw = synthetic_matches(20);
    let corrected = remove_epipolar_outliers(&raw, 0.1)?;
    let (disp_min, disp_max) = compute_disparity_range(&corrected, 2.0, 98.0)?;

    let report = QualityReport::build(
        &raw,
        &corrected,
        DisparityBounds {
            min: disp_min,
            max: disp_max,
        },
        &QualityReportParams::default(),
    )?;

    println!(
        "disparity search interval: [{:.3}, {:.3}] pix",
        report.disparity_bounds.min, report.disparity_bounds.max
    );
    println!(
        "corrected epipolar error: mean {:.4}, std {:.4} ({} matches)",
        report.corrected_epipolar_error.stats.mean,
        report.corrected_epipolar_error.stats.std_dev,
        report.corrected_epipolar_error.stats.count
    );
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
