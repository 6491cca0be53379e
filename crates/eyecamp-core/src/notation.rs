//! Ophthalmic notation.
//!
//! Pure string functions for refraction shorthand (`+1.00DS/-0.50DCx180`)
//! and visual acuity (`6/9`, `N6/40`). The encoder never interprets the
//! magnitudes it is given; range and step checks live in [`check_magnitude`]
//! and [`check_axis`] and are applied by form validation.

use thiserror::Error;

use crate::error::NotationError;
use crate::models::{RefractionMeasurement, RefractionStage};

/// Shown in place of an empty refraction preview.
pub const PLACEHOLDER: &str = "+1.00DS/-0.50DCx180";

/// Placeholder for the near addition, which is usually smaller.
pub const ADD_PLACEHOLDER: &str = "+0.75DS/-0.50DCx180";

/// Sphere and cylinder are entered in quarter-diopter steps.
pub const MAGNITUDE_STEP: f64 = 0.25;

pub const AXIS_MIN: u16 = 0;
pub const AXIS_MAX: u16 = 180;

/// Render one eye's refraction in standard prescription shorthand.
///
/// Returns an empty string when sphere, cylinder and axis are all empty.
/// The axis is only written after a cylinder.
pub fn encode(
    sphere_positive: bool,
    sphere: &str,
    cylinder_positive: bool,
    cylinder: &str,
    axis: &str,
) -> String {
    if sphere.is_empty() && cylinder.is_empty() && axis.is_empty() {
        return String::new();
    }

    let mut out = String::new();

    if !sphere.is_empty() {
        out.push(sign(sphere_positive));
        out.push_str(sphere);
        out.push_str("DS");
    }

    if !cylinder.is_empty() {
        out.push('/');
        out.push(sign(cylinder_positive));
        out.push_str(cylinder);
        out.push_str("DC");
        if !axis.is_empty() {
            out.push('x');
            out.push_str(axis);
        }
    }

    out
}

fn sign(positive: bool) -> char {
    if positive { '+' } else { '-' }
}

/// The live preview for a refraction field: its notation, or an example
/// string when nothing has been entered yet.
pub fn preview(measurement: &RefractionMeasurement, stage: RefractionStage) -> String {
    let encoded = measurement.notation();
    if !encoded.is_empty() {
        return encoded;
    }
    match stage {
        RefractionStage::AddGiven => ADD_PLACEHOLDER.to_string(),
        RefractionStage::Dry | RefractionStage::Acceptance => PLACEHOLDER.to_string(),
    }
}

/// Parse shorthand produced by [`encode`] back into a measurement.
///
/// Accepts `[±<sphere>DS][/±<cylinder>DC[x<axis>]]`. Signs of absent terms
/// take the measurement defaults. The note is always empty.
pub fn parse(text: &str) -> Result<RefractionMeasurement, NotationError> {
    let mut m = RefractionMeasurement::default();
    let bytes = text.as_bytes();
    let mut pos = 0;

    if bytes.is_empty() {
        return Ok(m);
    }

    if bytes[0] != b'/' {
        m.sphere_positive = read_sign(bytes, &mut pos)?;
        m.sphere = read_while(text, &mut pos, |b| b.is_ascii_digit() || b == b'.');
        if m.sphere.is_empty() {
            return Err(NotationError::MissingMagnitude(pos));
        }
        expect_unit(bytes, &mut pos, "DS")?;
    }

    if pos < bytes.len() && bytes[pos] == b'/' {
        pos += 1;
        m.cylinder_positive = read_sign(bytes, &mut pos)?;
        m.cylinder = read_while(text, &mut pos, |b| b.is_ascii_digit() || b == b'.');
        if m.cylinder.is_empty() {
            return Err(NotationError::MissingMagnitude(pos));
        }
        expect_unit(bytes, &mut pos, "DC")?;

        if pos < bytes.len() && bytes[pos] == b'x' {
            pos += 1;
            m.axis = read_while(text, &mut pos, |b| b.is_ascii_digit());
            if m.axis.is_empty() {
                return Err(NotationError::MissingAxis(pos));
            }
        }
    }

    if pos != bytes.len() {
        return Err(NotationError::Trailing(pos));
    }

    Ok(m)
}

fn read_sign(bytes: &[u8], pos: &mut usize) -> Result<bool, NotationError> {
    match bytes.get(*pos) {
        Some(b'+') => {
            *pos += 1;
            Ok(true)
        }
        Some(b'-') => {
            *pos += 1;
            Ok(false)
        }
        _ => Err(NotationError::MissingSign(*pos)),
    }
}

fn read_while(text: &str, pos: &mut usize, accept: impl Fn(u8) -> bool) -> String {
    let start = *pos;
    let bytes = text.as_bytes();
    while *pos < bytes.len() && accept(bytes[*pos]) {
        *pos += 1;
    }
    text[start..*pos].to_string()
}

fn expect_unit(bytes: &[u8], pos: &mut usize, unit: &'static str) -> Result<(), NotationError> {
    if bytes[*pos..].starts_with(unit.as_bytes()) {
        *pos += unit.len();
        Ok(())
    } else {
        Err(NotationError::MissingUnit {
            expected: unit,
            position: *pos,
        })
    }
}

/// Why an entered magnitude or axis falls outside what the exam accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValueIssue {
    #[error("is not a number")]
    NotANumber,

    #[error("must not be negative")]
    Negative,

    #[error("must be in steps of 0.25")]
    OffStep,

    #[error("must be a whole number from 0 to 180")]
    AxisOutOfRange,
}

/// Check a sphere or cylinder magnitude. Empty text is accepted.
pub fn check_magnitude(text: &str) -> Result<(), ValueIssue> {
    if text.is_empty() {
        return Ok(());
    }
    let value: f64 = text.trim().parse().map_err(|_| ValueIssue::NotANumber)?;
    if !value.is_finite() {
        return Err(ValueIssue::NotANumber);
    }
    if value < 0.0 {
        return Err(ValueIssue::Negative);
    }
    let remainder = value % MAGNITUDE_STEP;
    // Allow floating point tolerance
    if remainder < 1e-9 || (MAGNITUDE_STEP - remainder) < 1e-9 {
        Ok(())
    } else {
        Err(ValueIssue::OffStep)
    }
}

/// Check a cylinder axis in degrees. Empty text is accepted.
pub fn check_axis(text: &str) -> Result<(), ValueIssue> {
    if text.is_empty() {
        return Ok(());
    }
    let degrees: u16 = text
        .trim()
        .parse()
        .map_err(|_| ValueIssue::AxisOutOfRange)?;
    if (AXIS_MIN..=AXIS_MAX).contains(&degrees) {
        Ok(())
    } else {
        Err(ValueIssue::AxisOutOfRange)
    }
}

/// A recognized visual acuity entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Acuity {
    /// Snellen fraction, metric (`6/9`) or imperial (`20/40`).
    Distance {
        numerator: String,
        denominator: String,
    },
    /// Near N-value, optionally with the reading distance in centimetres.
    Near {
        n_value: String,
        distance_cm: Option<String>,
    },
}

impl Acuity {
    pub fn parse(text: &str) -> Option<Acuity> {
        let text = text.trim();
        if let Some(rest) = text.strip_prefix(['N', 'n']) {
            let (n_value, distance) = match rest.split_once('/') {
                Some((n, d)) => (n, Some(d.strip_suffix("cm").unwrap_or(d))),
                None => (rest, None),
            };
            if !is_number(n_value) || distance.is_some_and(|d| !is_number(d)) {
                return None;
            }
            return Some(Acuity::Near {
                n_value: n_value.to_string(),
                distance_cm: distance.map(str::to_string),
            });
        }

        let (numerator, denominator) = text.split_once('/')?;
        if !is_number(numerator) || !is_number(denominator) {
            return None;
        }
        Some(Acuity::Distance {
            numerator: numerator.to_string(),
            denominator: denominator.to_string(),
        })
    }
}

fn is_number(s: &str) -> bool {
    !s.is_empty() && s.parse::<f64>().is_ok_and(|v| v.is_finite() && v >= 0.0)
}

/// Join a Snellen numerator and denominator, e.g. `6` and `9` into `6/9`.
pub fn distance_acuity(numerator: &str, denominator: &str) -> String {
    if numerator.is_empty() && denominator.is_empty() {
        return String::new();
    }
    format!("{numerator}/{denominator}")
}

/// Join an N-value and reading distance, e.g. `6` and `40` into `N6/40`.
pub fn near_acuity(n_value: &str, distance_cm: &str) -> String {
    match (n_value.is_empty(), distance_cm.is_empty()) {
        (true, true) => String::new(),
        (_, true) => format!("N{n_value}"),
        _ => format!("N{n_value}/{distance_cm}"),
    }
}
