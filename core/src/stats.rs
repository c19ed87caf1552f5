//! Descriptive statistics over columns with missing values
//!
//! Every function skips `None` and returns NaN when there are not enough
//! observations, so undefined results flow through the report as NaN
//! instead of aborting it.

/// Mean of the present values
pub fn mean(values: &[Option<f64>]) -> f64 {
    let (sum, n) = values
        .iter()
        .flatten()
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        f64::NAN
    } else {
        sum / n as f64
    }
}

/// Sample standard deviation (n - 1 denominator) of the present values
pub fn sample_std(values: &[Option<f64>]) -> f64 {
    std_with_ddof(values, 1)
}

/// Population standard deviation (n denominator) of the present values
pub fn population_std(values: &[Option<f64>]) -> f64 {
    std_with_ddof(values, 0)
}

fn std_with_ddof(values: &[Option<f64>], ddof: usize) -> f64 {
    let n = values.iter().flatten().count();
    if n <= ddof {
        return f64::NAN;
    }
    let m = mean(values);
    let ss: f64 = values.iter().flatten().map(|v| (v - m).powi(2)).sum();
    (ss / (n - ddof) as f64).sqrt()
}

/// Pearson correlation over the rows where both values are present
///
/// NaN when fewer than two complete pairs exist or either side is constant.
pub fn pearson(xs: &[Option<f64>], ys: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect();
    if pairs.len() < 2 {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mx = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let my = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (x, y) in &pairs {
        sxy += (x - mx) * (y - my);
        sxx += (x - mx).powi(2);
        syy += (y - my).powi(2);
    }

    let denom = (sxx * syy).sqrt();
    if denom == 0.0 {
        return f64::NAN;
    }
    (sxy / denom).clamp(-1.0, 1.0)
}

/// Round to `decimals` places, ties to even
///
/// Agrees with `{:.N}` formatting, so a rounded value written to a sheet
/// matches the printed one.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}
