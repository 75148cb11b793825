//! TeX fragments shared by the step walkers.

/// Integers as they are, everything else with 4 decimals.
pub fn fmt(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        // -0 prints as 0
        format!("{}", value + 0.0)
    } else {
        format!("{:.4}", value)
    }
}

pub fn matrix_to_tex(m: &[Vec<f64>]) -> String {
    let rows: Vec<String> = m
        .iter()
        .map(|row| row.iter().map(|v| fmt(*v)).collect::<Vec<_>>().join(" & "))
        .collect();
    format!("\\begin{{bmatrix}} {} \\end{{bmatrix}}", rows.join(" \\\\ "))
}

pub fn integral_tex(expr: &str, lower: &str, upper: &str) -> String {
    format!("\\int_{{{}}}^{{{}}} {} \\, dx", lower, upper, expr)
}

pub fn limit_tex(expr: &str, var: &str, point: &str) -> String {
    format!("\\lim_{{{} \\to {}}} {}", var, point, expr)
}

pub fn derivative_tex(expr: &str, var: &str) -> String {
    format!("\\frac{{d}}{{d{}}} \\left[ {} \\right]", var, expr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragments() {
        assert_eq!(
            matrix_to_tex(&[vec![1.0, 2.5], vec![-0.0, 4.0]]),
            "\\begin{bmatrix} 1 & 2.5000 \\\\ 0 & 4 \\end{bmatrix}"
        );
        assert_eq!(integral_tex("x^{2}", "0", "1"), "\\int_{0}^{1} x^{2} \\, dx");
        assert_eq!(limit_tex("f", "x", "0"), "\\lim_{x \\to 0} f");
        assert_eq!(derivative_tex("f", "t"), "\\frac{d}{dt} \\left[ f \\right]");
    }
}
