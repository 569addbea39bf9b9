//! Planar geometry helpers.
//!
//! Headings are in degrees, measured the same way everywhere in the
//! simulation: `x` grows with `cos(heading)` and `y` with `sin(heading)`.

use rover_types::Point;

/// Degrees in a full turn.
pub const FULL_TURN_DEGREES: f64 = 360.0;

/// Offset `origin` by `distance` along `bearing_degrees`.
pub fn offset_polar(origin: Point, distance: f64, bearing_degrees: f64) -> Point {
    let (sin, cos) = bearing_degrees.to_radians().sin_cos();
    Point::new(origin.x + distance * cos, origin.y + distance * sin)
}

/// Move `step` units from `from` straight toward `toward`.
///
/// When both points coincide the bearing is `atan2(0, 0) = 0`, so the step
/// goes along the positive X axis.
pub fn step_toward(from: Point, toward: Point, step: f64) -> Point {
    let theta = (toward.y - from.y).atan2(toward.x - from.x);
    let (sin, cos) = theta.sin_cos();
    Point::new(from.x + step * cos, from.y + step * sin)
}

/// Normalize an angle in degrees into `[0, 360)`.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(FULL_TURN_DEGREES);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if wrapped >= FULL_TURN_DEGREES {
        0.0
    } else {
        wrapped
    }
}

/// Round a value to two decimal places.
pub fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round both coordinates of a point to two decimal places.
pub fn round_point(point: Point) -> Point {
    Point::new(round_hundredths(point.x), round_hundredths(point.y))
}
