//! Dimension formatting and parsing in the layout's display unit.
//!
//! All stored values are inches; these helpers only affect presentation.

use crate::layout::Units;

pub const INCHES_PER_FOOT: f64 = 12.0;
pub const INCHES_PER_METER: f64 = 39.3701;

/// Format a length in inches, e.g. `5'-6"` or `2.54m`.
pub fn format_dimension(inches: f64, units: Units) -> String {
    match units {
        Units::FeetInches => {
            let total = inches.abs();
            let mut feet = (total / INCHES_PER_FOOT).floor() as i64;
            let mut rest = (total % INCHES_PER_FOOT).round() as i64;
            if rest == 12 {
                feet += 1;
                rest = 0;
            }
            let sign = if inches < 0.0 && (feet > 0 || rest > 0) { "-" } else { "" };

            if feet == 0 {
                format!("{}{}\"", sign, rest)
            } else if rest == 0 {
                format!("{}{}'", sign, feet)
            } else {
                format!("{}{}'-{}\"", sign, feet, rest)
            }
        }
        Units::Meters => format!("{:.2}m", inches / INCHES_PER_METER),
    }
}

/// Parse user input back to inches.
///
/// Feet-inches accepts `5'-6"`, `5' 6"`, `5'6"`, `5'`, `6"`, `6` and `5.5'`.
/// Meters accepts `2.5m` and `2.5`. Anything else that reads as a plain number
/// is taken as inches (feet-inches) or meters (metric).
pub fn parse_dimension(value: &str, units: Units) -> Option<f64> {
    let clean = value.trim();
    let (sign, body) = match clean.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, clean),
    };

    let structured = match units {
        Units::FeetInches => parse_feet_inches(body),
        Units::Meters => {
            let number = body.strip_suffix('m').unwrap_or(body);
            is_decimal(number)
                .then(|| number.parse::<f64>().ok())
                .flatten()
                .map(|m| m * INCHES_PER_METER)
        }
    };
    if let Some(inches) = structured {
        return Some(sign * inches);
    }

    let number = clean.parse::<f64>().ok().filter(|n| n.is_finite())?;
    Some(match units {
        Units::FeetInches => number,
        Units::Meters => number * INCHES_PER_METER,
    })
}

fn parse_feet_inches(body: &str) -> Option<f64> {
    if let Some((feet, rest)) = body.split_once('\'') {
        if is_integer(feet) {
            let feet: f64 = feet.parse().ok()?;
            if rest.is_empty() {
                return Some(feet * INCHES_PER_FOOT);
            }
            let inches = rest.trim_start_matches(|c: char| c.is_whitespace() || c == '-');
            let inches = inches.strip_suffix('"').unwrap_or(inches);
            if is_integer(inches) {
                let inches: f64 = inches.parse().ok()?;
                return Some(feet * INCHES_PER_FOOT + inches);
            }
            return None;
        }
        if is_decimal(feet) && rest.is_empty() {
            let feet: f64 = feet.parse().ok()?;
            return Some(feet * INCHES_PER_FOOT);
        }
        return None;
    }

    let inches = body.strip_suffix('"').unwrap_or(body);
    if is_integer(inches) {
        return inches.parse().ok();
    }
    None
}

fn is_integer(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Digits, optionally followed by a single `.` and more digits.
fn is_decimal(s: &str) -> bool {
    match s.split_once('.') {
        Some((whole, frac)) => is_integer(whole) && frac.bytes().all(|b| b.is_ascii_digit()),
        None => is_integer(s),
    }
}

/// Convert inches to feet (feet-inches) or meters (metric).
pub fn to_display_unit(inches: f64, units: Units) -> f64 {
    match units {
        Units::FeetInches => inches / INCHES_PER_FOOT,
        Units::Meters => inches / INCHES_PER_METER,
    }
}

/// Convert feet (feet-inches) or meters (metric) to inches.
pub fn from_display_unit(value: f64, units: Units) -> f64 {
    match units {
        Units::FeetInches => value * INCHES_PER_FOOT,
        Units::Meters => value * INCHES_PER_METER,
    }
}

/// Human label for a grid spacing, e.g. `1 ft` or `50 cm`.
pub fn grid_size_label(grid_size: f64, units: Units) -> String {
    const EPS: f64 = 1e-6;
    match units {
        Units::FeetInches => {
            for (inches, label) in [(12.0, "1 ft"), (6.0, "6 in"), (3.0, "3 in"), (1.0, "1 in")] {
                if (grid_size - inches).abs() < EPS {
                    return label.to_string();
                }
            }
            format_dimension(grid_size, units)
        }
        Units::Meters => {
            let meters = grid_size / INCHES_PER_METER;
            for (m, label) in [(1.0, "1 m"), (0.5, "50 cm"), (0.1, "10 cm")] {
                if (meters - m).abs() < EPS {
                    return label.to_string();
                }
            }
            format!("{:.0} cm", meters * 100.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_feet_inches() {
        assert_eq!(format_dimension(66.0, Units::FeetInches), "5'-6\"");
        assert_eq!(format_dimension(0.0, Units::FeetInches), "0\"");
        assert_eq!(format_dimension(6.0, Units::FeetInches), "6\"");
        assert_eq!(format_dimension(120.0, Units::FeetInches), "10'");
        assert_eq!(format_dimension(-30.0, Units::FeetInches), "-2'-6\"");
        assert_eq!(format_dimension(23.7, Units::FeetInches), "2'");
    }

    #[test]
    fn test_format_meters() {
        assert_eq!(format_dimension(100.0, Units::Meters), "2.54m");
        assert_eq!(format_dimension(0.0, Units::Meters), "0.00m");
    }

    #[test]
    fn test_parse_feet_inches() {
        assert_eq!(parse_dimension("5'-6\"", Units::FeetInches), Some(66.0));
        assert_eq!(parse_dimension("5' 6\"", Units::FeetInches), Some(66.0));
        assert_eq!(parse_dimension("5'6", Units::FeetInches), Some(66.0));
        assert_eq!(parse_dimension("5'", Units::FeetInches), Some(60.0));
        assert_eq!(parse_dimension("6\"", Units::FeetInches), Some(6.0));
        assert_eq!(parse_dimension(" 6 ", Units::FeetInches), Some(6.0));
        assert_eq!(parse_dimension("5.5'", Units::FeetInches), Some(66.0));
        assert_eq!(parse_dimension("-2'-6\"", Units::FeetInches), Some(-30.0));
        assert_eq!(parse_dimension("7.25", Units::FeetInches), Some(7.25));
        assert_eq!(parse_dimension("abc", Units::FeetInches), None);
        assert_eq!(parse_dimension("5'x", Units::FeetInches), None);
    }

    #[test]
    fn test_parse_meters() {
        let inches = parse_dimension("2.5m", Units::Meters).unwrap();
        assert!((inches - 2.5 * INCHES_PER_METER).abs() < 1e-9);
        let inches = parse_dimension("1", Units::Meters).unwrap();
        assert!((inches - INCHES_PER_METER).abs() < 1e-9);
        assert_eq!(parse_dimension("m", Units::Meters), None);
    }

    #[test]
    fn test_format_then_parse() {
        let shown = format_dimension(66.0, Units::FeetInches);
        assert_eq!(parse_dimension(&shown, Units::FeetInches), Some(66.0));
    }

    #[test]
    fn test_display_unit_conversion() {
        assert_eq!(to_display_unit(18.0, Units::FeetInches), 1.5);
        assert_eq!(from_display_unit(1.5, Units::FeetInches), 18.0);
        assert!((from_display_unit(to_display_unit(40.0, Units::Meters), Units::Meters) - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_grid_size_label() {
        assert_eq!(grid_size_label(12.0, Units::FeetInches), "1 ft");
        assert_eq!(grid_size_label(6.0, Units::FeetInches), "6 in");
        assert_eq!(grid_size_label(24.0, Units::FeetInches), "2'");
        assert_eq!(grid_size_label(INCHES_PER_METER, Units::Meters), "1 m");
        assert_eq!(grid_size_label(INCHES_PER_METER * 0.5, Units::Meters), "50 cm");
        assert_eq!(grid_size_label(INCHES_PER_METER * 0.25, Units::Meters), "25 cm");
    }
}
