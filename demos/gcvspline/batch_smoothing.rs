//! Batch Smoothing Spline Examples
//!
//! This example demonstrates one-shot fits:
//! - Cubic smoothing with GCV selection
//! - Each selection criterion on the same noisy signal
//! - Derivatives and natural extension outside the knots
//! - Several channels sharing one parameter
//! - Diagnostics and the fit summary

#[cfg(feature = "std")]
use gcvspline::prelude::*;

#[cfg(feature = "std")]
fn main() -> Result<(), SplineError> {
    println!("{}", "=".repeat(80));
    println!("GCV Spline Batch Smoothing - Examples");
    println!("{}", "=".repeat(80));
    println!();

    example_1_basic_smoothing()?;
    example_2_criteria()?;
    example_3_derivatives()?;
    example_4_channels()?;
    example_5_diagnostics()?;

    Ok(())
}

#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
fn noisy_sine(n: usize) -> (Vec<f64>, Vec<f64>) {
    let x: Vec<f64> = (0..n).map(|i| i as f64 * 0.25).collect();
    let y = x
        .iter()
        .enumerate()
        .map(|(i, &t)| {
            let k = i as f64;
            t.sin() + 0.05 * (7.3 * k * k).sin()
        })
        .collect();
    (x, y)
}

#[cfg(feature = "std")]
/// Example 1: Basic Smoothing
/// Cubic spline, smoothing chosen by generalized cross-validation
fn example_1_basic_smoothing() -> Result<(), SplineError> {
    println!("Example 1: Basic Smoothing");
    println!("{}", "-".repeat(80));

    let (x, y) = noisy_sine(41);

    let model = GcvSpline::new()
        .order(2) // cubic
        .criterion(Gcv)
        .return_fitted()
        .adapter(Batch)
        .build()?;

    let fit = model.fit(&x, &y)?;
    println!("{}", fit);

    let mut spline = fit.spline(0)?;
    for t in [1.0, 2.5, 7.75] {
        println!("  s({:.2}) = {:.5}   sin = {:.5}", t, spline.value(t), f64::sin(t));
    }

    println!();
    Ok(())
}

#[cfg(feature = "std")]
/// Example 2: Selection Criteria
/// The same data under each way of choosing p
fn example_2_criteria() -> Result<(), SplineError> {
    println!("Example 2: Selection Criteria");
    println!("{}", "-".repeat(80));

    let (x, y) = noisy_sine(41);
    let criteria = [
        Gcv,
        KnownVariance(0.00125),
        DegreesOfFreedom(8.0),
        FixedP(0.01),
    ];

    println!("{:>22} {:>14} {:>10} {:>14}", "Criterion", "p", "tr(A)", "Outcome");
    for criterion in criteria {
        let fit = GcvSpline::new()
            .criterion(criterion)
            .adapter(Batch)
            .build()?
            .fit(&x, &y)?;
        println!(
            "{:>22} {:>14.4e} {:>10.3} {:>14}",
            criterion.name(),
            fit.smoothing(),
            fit.statistics.trace,
            format!("{:?}", fit.outcome)
        );
    }

    println!();
    Ok(())
}

#[cfg(feature = "std")]
/// Example 3: Derivatives
/// Derivatives inside the data and the linear continuation outside it
fn example_3_derivatives() -> Result<(), SplineError> {
    println!("Example 3: Derivatives and Extension");
    println!("{}", "-".repeat(80));

    let (x, y) = noisy_sine(41);
    let fit = GcvSpline::new().adapter(Batch).build()?.fit(&x, &y)?;
    let spline = fit.spline(0)?;

    // Independent evaluators share the fitted spline
    let mut inside = spline.evaluator();
    let mut outside = spline.evaluator();

    for t in [0.5, 3.0, 6.0] {
        println!(
            "  t={:.1}: s={:+.4} s'={:+.4} (cos={:+.4}) s''={:+.4}",
            t,
            inside.evaluate(t, 0),
            inside.evaluate(t, 1),
            f64::cos(t),
            inside.evaluate(t, 2)
        );
    }
    for t in [11.0, 12.0] {
        println!(
            "  t={:.1}: s={:+.4} s'={:+.4} s''={:+.4}",
            t,
            outside.evaluate(t, 0),
            outside.evaluate(t, 1),
            outside.evaluate(t, 2)
        );
    }

    println!();
    Ok(())
}

#[cfg(feature = "std")]
/// Example 4: Channels
/// Two signals smoothed with one shared parameter
fn example_4_channels() -> Result<(), SplineError> {
    println!("Example 4: Multiple Channels");
    println!("{}", "-".repeat(80));

    let (x, sine) = noisy_sine(41);
    let cosine: Vec<f64> = x.iter().map(|t| t.cos()).collect();

    let fit = GcvSpline::new()
        .channel_weights(vec![1.0, 0.5])
        .adapter(Batch)
        .build()?
        .fit_channels(&x, &[sine, cosine])?;

    println!("  channels: {}, shared p = {:.4e}", fit.channels(), fit.smoothing());
    for (j, mut spline) in fit.into_splines().into_iter().enumerate() {
        println!("  channel {}: s(2.0) = {:.5}", j, spline.value(2.0));
    }

    println!();
    Ok(())
}

#[cfg(feature = "std")]
/// Example 5: Diagnostics
/// Goodness of fit with the hat trace as effective parameters
fn example_5_diagnostics() -> Result<(), SplineError> {
    println!("Example 5: Diagnostics");
    println!("{}", "-".repeat(80));

    let (x, y) = noisy_sine(41);
    let fit = GcvSpline::new()
        .return_residuals()
        .return_diagnostics()
        .adapter(Batch)
        .build()?
        .fit(&x, &y)?;

    if let Some(diagnostics) = &fit.diagnostics {
        println!("{}", diagnostics[0]);
    }

    println!();
    Ok(())
}
