use super::types::Vector2;
use std::f64::consts::PI;

pub fn distance(a: Vector2, b: Vector2) -> f64 {
  ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

pub fn within(a: Vector2, b: Vector2, radius: f64) -> bool {
  distance(a, b) < radius
}

pub fn offset(origin: Vector2, angle: f64, length: f64) -> Vector2 {
  Vector2 {
    x: origin.x + angle.cos() * length,
    y: origin.y + angle.sin() * length,
  }
}

/// Wraps an angle into `(-PI, PI]`.
pub fn normalize_angle(angle: f64) -> f64 {
  if !angle.is_finite() {
    return angle;
  }
  let tau = PI * 2.0;
  let mut wrapped = angle % tau;
  if wrapped > PI {
    wrapped -= tau;
  } else if wrapped <= -PI {
    wrapped += tau;
  }
  wrapped
}

/// Signed shortest rotation from `from` to `to`, in `[-PI, PI]`.
pub fn shortest_angle_delta(from: f64, to: f64) -> f64 {
  normalize_angle(to - from)
}

#[cfg(test)]
pub fn angular_distance(a: f64, b: f64) -> f64 {
  shortest_angle_delta(a, b).abs()
}

pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
  value.min(max).max(min)
}
