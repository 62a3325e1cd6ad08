//! Free functions for computing with a chord plus included angle ("bulge").

use crate::units::{Angle, Length};

use super::point::Point;

/// The exact geometric center of the arc from `p1` to `p2` with included angle
/// `bulge`. `None` if `bulge == 0` (a straight segment has no center).
pub fn arc_center(p1: Point, p2: Point, bulge: Angle) -> Option<Point> {
    if bulge.is_zero() {
        return None;
    }
    let x0 = p1.x.to_mm();
    let y0 = p1.y.to_mm();
    let x1 = p2.x.to_mm();
    let y1 = p2.y.to_mm();
    let angle = bulge.mapped_to_180().to_rad();
    let angle_sgn = if angle >= 0.0 { 1.0 } else { -1.0 };
    let d = ((x1 - x0).powi(2) + (y1 - y0).powi(2)).sqrt();
    if d == 0.0 {
        return None;
    }
    let r = d / (2.0 * (angle / 2.0).sin());
    let h = (r * r - d * d / 4.0).max(0.0).sqrt();
    let u = (x1 - x0) / d;
    let v = (y1 - y0) / d;
    let cx = (x0 + x1) / 2.0 - h * v * angle_sgn;
    let cy = (y0 + y1) / 2.0 + h * u * angle_sgn;
    Some(Point::new(
        Length::from_mm(cx).ok()?,
        Length::from_mm(cy).ok()?,
    ))
}

/// Signed radius of the arc from `p1` to `p2` with included angle `bulge`;
/// zero when `bulge == 0`.
pub fn arc_radius(p1: Point, p2: Point, bulge: Angle) -> Length {
    if bulge.is_zero() {
        return Length::ZERO;
    }
    let x0 = p1.x.to_mm();
    let y0 = p1.y.to_mm();
    let x1 = p2.x.to_mm();
    let y1 = p2.y.to_mm();
    let angle = bulge.mapped_to_180().to_rad();
    let d = ((x1 - x0).powi(2) + (y1 - y0).powi(2)).sqrt();
    let r = d / (2.0 * (angle / 2.0).sin());
    Length::from_mm(r).unwrap_or(Length::ZERO)
}

/// The CCW arc angle in `[0deg, 360deg)` swept from `p1` to `p2` around `center`.
pub fn arc_angle(p1: Point, p2: Point, center: Point) -> Angle {
    let d1 = p1 - center;
    let d2 = p2 - center;
    if d1 == Point::ORIGIN || d2 == Point::ORIGIN {
        return Angle::deg0();
    }
    let angle1 = d1.y.to_mm().atan2(d1.x.to_mm());
    let angle2 = d2.y.to_mm().atan2(d2.x.to_mm());
    Angle::from_deg((angle2 - angle1).to_degrees())
        .unwrap_or(Angle::deg0())
        .mapped_to_0_360()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arc_center_is_none_for_straight_segment() {
        let p1 = Point::new(Length::from_nanometers(0), Length::from_nanometers(0));
        let p2 = Point::new(Length::from_nanometers(1_000_000), Length::from_nanometers(0));
        assert_eq!(arc_center(p1, p2, Angle::deg0()), None);
    }

    #[test]
    fn arc_center_equidistant_from_both_endpoints() {
        let p1 = Point::new(Length::from_nanometers(0), Length::from_nanometers(0));
        let p2 = Point::new(Length::from_nanometers(10_000_000), Length::from_nanometers(0));
        for bulge_deg in [30.0, 90.0, 180.0, 330.0] {
            let bulge = Angle::from_deg(bulge_deg).unwrap();
            let center = arc_center(p1, p2, bulge).expect("nonzero bulge has a center");
            let d1 = p1.distance_to(center);
            let d2 = p2.distance_to(center);
            assert!((d1 - d2).abs() <= 1.0, "bulge {bulge_deg}: {d1} vs {d2}");
        }
    }
}
