//! Console rendering of benchmark outcomes.
//!
//! ```text
//! Test Function: Prime Sieve
//!   Single - Total Seconds:  1.2345678
//!   Multi  - Total Seconds:  0.23456789
//! ```

use std::fmt::Write;

use crate::driver::BenchmarkOutcome;

/// Significant digits used for seconds, matching C's `%.8g`.
const SECONDS_PRECISION: usize = 8;

/// Text block for a single benchmark, newline terminated.
pub fn render_outcome(outcome: &BenchmarkOutcome) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(out, "Test Function: {}", outcome.title);
    let _ = writeln!(
        out,
        "  Single - Total Seconds:  {}",
        format_g(outcome.sequential.seconds(), SECONDS_PRECISION)
    );
    let _ = writeln!(
        out,
        "  Multi  - Total Seconds:  {}",
        format_g(outcome.parallel.seconds(), SECONDS_PRECISION)
    );
    if let Some(pool) = &outcome.pool {
        let _ = writeln!(
            out,
            "  Pool   - Total Seconds:  {}",
            format_g(pool.seconds(), SECONDS_PRECISION)
        );
    }
    out
}

pub fn render_text(outcomes: &[BenchmarkOutcome]) -> String {
    outcomes.iter().map(render_outcome).collect()
}

/// Formats `value` like printf's `%.{precision}g`.
pub fn format_g(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let precision = precision.max(1);
    // Scientific formatting rounds to `precision` digits first, which gives
    // the exponent %g decides on.
    let sci = format!("{:.*e}", precision - 1, value);
    let Some((mantissa, exponent)) = sci.split_once('e') else {
        return sci;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= precision as i32 {
        let mantissa = strip_trailing_zeros(mantissa);
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exponent.abs())
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        strip_trailing_zeros(&format!("{value:.decimals$}")).to_string()
    }
}

fn strip_trailing_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::TimingResult;
    use crate::workload::ParameterBlock;

    fn outcome(seq_ns: i64, par_ns: i64, pool: Option<i64>) -> BenchmarkOutcome {
        BenchmarkOutcome {
            title: "Prime Sieve".to_string(),
            parameters: ParameterBlock::new("Prime Sieve", 30, 0, 4),
            cycles: 4,
            sequential: TimingResult {
                elapsed_nanoseconds: seq_ns,
            },
            parallel: TimingResult {
                elapsed_nanoseconds: par_ns,
            },
            pool: pool.map(|ns| TimingResult {
                elapsed_nanoseconds: ns,
            }),
        }
    }

    #[test]
    fn format_g_matches_printf() {
        assert_eq!(format_g(0.0, 8), "0");
        assert_eq!(format_g(1.0, 8), "1");
        assert_eq!(format_g(1.5, 8), "1.5");
        assert_eq!(format_g(0.123456789, 8), "0.12345679");
        assert_eq!(format_g(12.3456789012, 8), "12.345679");
        assert_eq!(format_g(0.0001, 8), "0.0001");
        assert_eq!(format_g(0.00001234, 8), "1.234e-05");
        assert_eq!(format_g(123456789.0, 8), "1.2345679e+08");
        assert_eq!(format_g(12345678.0, 8), "12345678");
        assert_eq!(format_g(99999999.7, 8), "1e+08");
        assert_eq!(format_g(-0.5, 8), "-0.5");
        assert_eq!(format_g(2.5e-9, 8), "2.5e-09");
    }

    #[test]
    fn renders_exact_block() {
        let text = render_outcome(&outcome(1_234_567_891, 250_000_000, None));
        assert_eq!(
            text,
            "Test Function: Prime Sieve\n  Single - Total Seconds:  1.2345679\n  Multi  - Total Seconds:  0.25\n"
        );
    }

    #[test]
    fn pool_line_only_when_measured() {
        let text = render_outcome(&outcome(1_000, 2_000, Some(3_000)));
        assert!(text.ends_with("  Pool   - Total Seconds:  3e-06\n"));
        assert_eq!(render_text(&[outcome(1, 1, None), outcome(1, 1, None)]).lines().count(), 6);
    }

    #[test]
    fn negative_durations_are_printed_verbatim() {
        let text = render_outcome(&outcome(-1_500, 0, None));
        assert!(text.contains("Single - Total Seconds:  -1.5e-06"));
        assert!(text.contains("Multi  - Total Seconds:  0\n"));
    }
}
