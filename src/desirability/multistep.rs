//! Multistep desirability curve
//!
//! Piecewise-linear interpolation over a user-supplied list of `(x, y)`
//! coordinates. Inputs below the first x clamp to the first y, inputs above
//! the last x clamp to the last y, and everything in between interpolates
//! linearly along the enclosing segment.
//!
//! The coordinates travel as an iterable coefficient: a list of two-element
//! `[x, y]` lists. They are validated on every computation, so a strategy
//! reconfigured with bad coordinates fails at compute time with a
//! computation error rather than at assignment time.

use crate::error::{Result, ScoreKitError};
use crate::parameters::{ParameterError, ParameterSpec, Schema, Value};
use crate::strategy::{ArgValues, ParameterizedStrategy};
use crate::uncertain::{Scalar, UFloat};

use super::{check_shift, float_coefficient, Desirability};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Point {
    x: f64,
    y: f64,
}

fn coordinate_number(value: &Value) -> Option<f64> {
    match value {
        Value::Float(v) => Some(*v),
        Value::Int(v) => Some(*v as f64),
        _ => None,
    }
}

// Parses, validates and sorts the raw coordinate list. Exact duplicate
// points collapse to one; distinct points sharing an x are an error.
fn parse_coordinates(raw: &[Value]) -> Result<Vec<Point>> {
    if raw.is_empty() {
        return Err(ScoreKitError::Computation(
            "coordinates list cannot be empty".to_string(),
        ));
    }

    let mut points = Vec::with_capacity(raw.len());
    for entry in raw {
        let pair = entry.as_list().unwrap_or(&[]);
        let point = match pair {
            [x, y] => coordinate_number(x)
                .zip(coordinate_number(y))
                .map(|(x, y)| Point { x, y }),
            _ => None,
        };
        let point = point.ok_or_else(|| {
            ScoreKitError::Computation(format!(
                "coordinate entry is not a numeric [x, y] pair: {entry}"
            ))
        })?;
        if !point.x.is_finite() || !point.y.is_finite() {
            return Err(ScoreKitError::Computation(format!(
                "coordinates must be finite numbers, got ({}, {})",
                point.x, point.y
            )));
        }
        points.push(point);
    }

    points.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));
    points.dedup();

    for pair in points.windows(2) {
        if pair[0].x == pair[1].x {
            return Err(ScoreKitError::Computation(
                "duplicate x-coordinates found".to_string(),
            ));
        }
    }
    if points.len() < 2 {
        return Err(ScoreKitError::Computation(
            "at least two different coordinates are required".to_string(),
        ));
    }
    for point in &points {
        if !(0.0..=1.0).contains(&point.y) {
            return Err(ScoreKitError::Computation(format!(
                "y-coordinate must be between 0 and 1, got ({}, {})",
                point.x, point.y
            )));
        }
    }
    Ok(points)
}

/// The multistep formula, generic over plain and uncertain inputs.
pub fn multistep<S: Scalar>(x: S, coordinates: &[Value], shift: f64) -> Result<S> {
    check_shift(shift)?;
    let points = parse_coordinates(coordinates)?;

    let nominal = x.nominal();
    let first = points[0];
    let last = points[points.len() - 1];

    let result = if nominal <= first.x {
        S::from_f64(first.y)
    } else if nominal >= last.x {
        S::from_f64(last.y)
    } else {
        let segment = points
            .windows(2)
            .find(|pair| pair[0].x <= nominal && nominal <= pair[1].x)
            .ok_or_else(|| {
                ScoreKitError::Computation(format!("unable to interpolate for x={nominal}"))
            })?;
        let (p1, p2) = (segment[0], segment[1]);
        (x - p1.x) / (p2.x - p1.x) * (p2.y - p1.y) + p1.y
    };
    Ok(result * (1.0 - shift) + shift)
}

fn multistep_utility(args: &ArgValues) -> Result<Value> {
    let value = multistep(
        args.float("x")?,
        args.list("coordinates")?,
        args.float("shift")?,
    )?;
    Ok(Value::Float(value))
}

/// Piecewise-linear curve with coefficients `coordinates` and `shift`.
#[derive(Debug, Clone)]
pub struct MultiStep {
    strategy: ParameterizedStrategy,
}

impl MultiStep {
    pub fn new() -> std::result::Result<Self, ParameterError> {
        let schema = Schema::from([
            ("x".to_string(), ParameterSpec::new("float")),
            ("coordinates".to_string(), ParameterSpec::new("iterable")),
            (
                "shift".to_string(),
                ParameterSpec::new("float")
                    .with_default(0.0)
                    .with_min(0.0)
                    .with_max(1.0),
            ),
        ]);
        let strategy = ParameterizedStrategy::new(
            &schema,
            &["coordinates", "shift"],
            &["x"],
            multistep_utility,
        )?;
        Ok(Self { strategy })
    }
}

impl Desirability for MultiStep {
    fn strategy(&self) -> &ParameterizedStrategy {
        &self.strategy
    }

    fn strategy_mut(&mut self) -> &mut ParameterizedStrategy {
        &mut self.strategy
    }

    fn compute_ufloat(&self, x: UFloat) -> Result<UFloat> {
        let coefficients = self.strategy.coefficient_values()?;
        let coordinates = coefficients
            .get("coordinates")
            .and_then(Value::as_list)
            .ok_or_else(|| {
                ScoreKitError::Computation("coefficient 'coordinates' is not a list".to_string())
            })?;
        multistep(x, coordinates, float_coefficient(&coefficients, "shift")?)
    }
}
