//! Number formatting for results shown to people.

use std::fmt::Write;

/// Append `n` to `buf` in its shortest round-tripping form.
///
/// Integral values print without a fractional part, and the special values
/// print as `NaN`, `+Inf` and `-Inf`.
#[inline]
pub fn write_num(buf: &mut String, n: f64) {
    if n.is_nan() {
        buf.push_str("NaN");
    } else if n.is_infinite() {
        buf.push_str(if n > 0.0 { "+Inf" } else { "-Inf" });
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        let _ = write!(buf, "{}", n as i64);
    } else {
        let mut buffer = ryu::Buffer::new();
        buf.push_str(buffer.format_finite(n));
    }
}

/// Format a number into a fresh `String`.
pub fn fmt_num(n: f64) -> String {
    let mut s = String::new();
    write_num(&mut s, n);
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(9.0), "9");
        assert_eq!(fmt_num(-4.0), "-4");
        assert_eq!(fmt_num(0.5), "0.5");
        assert_eq!(fmt_num(f64::NAN), "NaN");
        assert_eq!(fmt_num(f64::INFINITY), "+Inf");
        assert_eq!(fmt_num(f64::NEG_INFINITY), "-Inf");
        assert_eq!(fmt_num(1e20), "1e20");
    }
}
