//! Ordered vertex sequences with mixed straight/arc segments, and their derived
//! outline constructors (obround, rounded rect, octagon, ...).

use serde::{Deserialize, Serialize};

use crate::units::{Angle, Length, PositiveLength, UnsignedLength};

use super::arc::arc_center;
use super::point::Point;
use super::vertex::Vertex;

/// Which axis a [`Path`] (or a single [`Point`]) is mirrored across.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorAxis {
    /// Flips X: a vertical mirror line.
    Horizontal,
    /// Flips Y: a horizontal mirror line.
    Vertical,
}

/// An ordered sequence of vertices, optionally closed, optionally curved.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Path {
    vertices: Vec<Vertex>,
}

impl Path {
    pub fn new(vertices: Vec<Vertex>) -> Self {
        Path { vertices }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Closed iff there are at least 2 vertices and the first and last positions
    /// are equal (the bulge of the last vertex is still meaningless).
    pub fn is_closed(&self) -> bool {
        match (self.vertices.first(), self.vertices.last()) {
            (Some(first), Some(last)) if self.vertices.len() >= 2 => first.position == last.position,
            _ => false,
        }
    }

    /// Curved iff any non-last vertex has a non-zero bulge.
    pub fn is_curved(&self) -> bool {
        let n = self.vertices.len();
        self.vertices[..n.saturating_sub(1)]
            .iter()
            .any(|v| !v.bulge.is_zero())
    }

    pub fn is_zero_length(&self) -> bool {
        self.vertices.windows(2).all(|w| w[0].position == w[1].position)
    }

    pub fn total_straight_length(&self) -> UnsignedLength {
        let mut length = 0i64;
        if self.vertices.len() >= 2 {
            let mut last = self.vertices[0].position;
            for v in &self.vertices[1..] {
                length += (v.position - last).vector_length().nanometers();
                last = v.position;
            }
        }
        UnsignedLength::new_unchecked(Length::from_nanometers(length))
    }

    /// Shoelace area of the straight-segment hull (absolute value).
    pub fn area_of_straight_segments(&self) -> f64 {
        let n = if self.is_closed() {
            self.vertices.len() - 1
        } else {
            self.vertices.len()
        };
        if n == 0 {
            return 0.0;
        }
        let mut area = 0.0;
        let mut j = n - 1;
        for i in 0..n {
            let pj = self.vertices[j].position;
            let pi = self.vertices[i].position;
            area += (pj.x.to_mm() + pi.x.to_mm()) * (pj.y.to_mm() - pi.y.to_mm());
            j = i;
        }
        (area / 2.0).abs()
    }

    /// Nearest point to `p` lying on one of the path's straight segments
    /// (arcs are not taken into account).
    pub fn nearest_point_between_vertices(&self, p: Point) -> Point {
        if self.vertices.is_empty() {
            return Point::ORIGIN;
        }
        let mut nearest = self.vertices[0].position;
        for w in self.vertices.windows(2) {
            let candidate = nearest_point_on_segment(p, w[0].position, w[1].position);
            if candidate.distance_to(p) < nearest.distance_to(p) {
                nearest = candidate;
            }
        }
        nearest
    }

    pub fn cleaned(&self) -> Path {
        let mut p = self.clone();
        p.clean();
        p
    }

    pub fn to_closed_path(&self) -> Path {
        let mut p = self.clone();
        p.close();
        p
    }

    pub fn to_open_path(&self) -> Path {
        let mut p = self.clone();
        p.open();
        p
    }

    /// Converts this (potentially open) path into closed outline sub-paths, one
    /// per segment: straight segments become obrounds, curved segments become
    /// `arc_obround` shapes. A single-vertex path yields one disk of diameter
    /// `width`.
    pub fn to_outline_strokes(&self, width: PositiveLength) -> Vec<Path> {
        let mut paths = Vec::with_capacity(self.vertices.len());
        if self.vertices.len() == 1 {
            paths.push(Path::circle(width).translated(self.vertices[0].position));
        } else {
            for w in self.vertices.windows(2) {
                let (v0, v1) = (w[0], w[1]);
                if v0.bulge.is_zero() {
                    paths.push(Path::obround_between(v0.position, v1.position, width));
                } else {
                    paths.push(Path::arc_obround(v0.position, v1.position, v0.bulge, width));
                }
            }
        }
        paths
    }

    pub fn translate(&mut self, offset: Point) -> &mut Self {
        for v in &mut self.vertices {
            v.position = v.position + offset;
        }
        self
    }

    pub fn translated(&self, offset: Point) -> Path {
        let mut p = self.clone();
        p.translate(offset);
        p
    }

    pub fn map_to_grid(&mut self, grid: PositiveLength) -> &mut Self {
        for v in &mut self.vertices {
            v.position = v.position.mapped_to_grid(grid.get());
        }
        self
    }

    pub fn mapped_to_grid(&self, grid: PositiveLength) -> Path {
        let mut p = self.clone();
        p.map_to_grid(grid);
        p
    }

    pub fn rotate(&mut self, angle: Angle, center: Point) -> &mut Self {
        for v in &mut self.vertices {
            v.position = v.position.rotated(angle, center);
        }
        self
    }

    pub fn rotated(&self, angle: Angle, center: Point) -> Path {
        let mut p = self.clone();
        p.rotate(angle, center);
        p
    }

    /// Mirrors every vertex position and flips the sign of every bulge (mirroring
    /// reverses orientation).
    pub fn mirror(&mut self, axis: MirrorAxis, center: Point) -> &mut Self {
        for v in &mut self.vertices {
            v.position = match axis {
                MirrorAxis::Horizontal => v.position.mirrored_horizontal(center),
                MirrorAxis::Vertical => v.position.mirrored_vertical(center),
            };
            v.bulge = v.bulge.inverted();
        }
        self
    }

    pub fn mirrored(&self, axis: MirrorAxis, center: Point) -> Path {
        let mut p = self.clone();
        p.mirror(axis, center);
        p
    }

    /// Reverses vertex order, shifting bulges by one position and negating them.
    pub fn reverse(&mut self) -> &mut Self {
        let n = self.vertices.len();
        let mut out = Vec::with_capacity(n);
        for i in (0..n).rev() {
            let bulge = if i == 0 {
                Angle::deg0()
            } else {
                self.vertices[i - 1].bulge.inverted()
            };
            out.push(Vertex::new(self.vertices[i].position, bulge));
        }
        self.vertices = out;
        self
    }

    pub fn reversed(&self) -> Path {
        let mut p = self.clone();
        p.reverse();
        p
    }

    /// Replaces every arc segment with a poly-line approximation whose sagitta
    /// (max deviation from the true arc) is within `tolerance`. The result is
    /// fully straight (every bulge is zero).
    pub fn flattened_arcs(&self, tolerance: PositiveLength) -> Path {
        let n = self.vertices.len();
        if n == 0 {
            return Path::default();
        }
        let mut out = vec![Vertex::straight(self.vertices[0].position)];
        for i in 0..n - 1 {
            let v0 = self.vertices[i];
            let p2 = self.vertices[i + 1].position;
            if v0.bulge.is_zero() {
                out.push(Vertex::straight(p2));
            } else {
                let arc = flat_arc(v0.position, p2, v0.bulge, tolerance);
                for v in &arc.vertices()[1..] {
                    out.push(Vertex::straight(v.position));
                }
            }
        }
        Path::new(out)
    }

    pub fn add_vertex(&mut self, position: Point, bulge: Angle) -> &mut Self {
        self.vertices.push(Vertex::new(position, bulge));
        self
    }

    pub fn insert_vertex(&mut self, index: usize, position: Point, bulge: Angle) -> &mut Self {
        self.vertices.insert(index, Vertex::new(position, bulge));
        self
    }

    /// Removes consecutive duplicate-position vertices. Returns whether anything
    /// was removed.
    pub fn clean(&mut self) -> bool {
        let mut modified = false;
        let mut i = self.vertices.len();
        while i > 1 {
            i -= 1;
            if self.vertices[i - 1].position == self.vertices[i].position {
                self.vertices.remove(i - 1);
                modified = true;
            }
        }
        modified
    }

    pub fn close(&mut self) -> bool {
        if !self.is_closed() && self.vertices.len() > 1 {
            let first = self.vertices[0].position;
            self.add_vertex(first, Angle::deg0());
            true
        } else {
            false
        }
    }

    pub fn open(&mut self) -> bool {
        if self.vertices.len() > 2 && self.is_closed() {
            self.vertices.pop();
            true
        } else {
            false
        }
    }

    // -- Derived constructors -------------------------------------------------

    pub fn line(p1: Point, p2: Point, bulge: Angle) -> Path {
        Path::new(vec![Vertex::new(p1, bulge), Vertex::straight(p2)])
    }

    pub fn circle(diameter: PositiveLength) -> Path {
        Path::obround(diameter, diameter)
    }

    pub fn obround(width: PositiveLength, height: PositiveLength) -> Path {
        let rx = width.get() / 2;
        let ry = height.get() / 2;
        let mut p = Path::default();
        use std::cmp::Ordering;
        match width.get().cmp(&height.get()) {
            Ordering::Greater => {
                p.add_vertex(Point::new(ry - rx, ry), Angle::deg0());
                p.add_vertex(Point::new(rx - ry, ry), Angle::deg180().inverted());
                p.add_vertex(Point::new(rx - ry, -ry), Angle::deg0());
                p.add_vertex(Point::new(ry - rx, -ry), Angle::deg180().inverted());
                p.add_vertex(Point::new(ry - rx, ry), Angle::deg0());
            }
            Ordering::Less => {
                p.add_vertex(Point::new(rx, ry - rx), Angle::deg0());
                p.add_vertex(Point::new(rx, rx - ry), Angle::deg180().inverted());
                p.add_vertex(Point::new(-rx, rx - ry), Angle::deg0());
                p.add_vertex(Point::new(-rx, ry - rx), Angle::deg180().inverted());
                p.add_vertex(Point::new(rx, ry - rx), Angle::deg0());
            }
            Ordering::Equal => {
                p.add_vertex(Point::new(rx, Length::ZERO), Angle::deg180().inverted());
                p.add_vertex(Point::new(-rx, Length::ZERO), Angle::deg180().inverted());
                p.add_vertex(Point::new(rx, Length::ZERO), Angle::deg0());
            }
        }
        p
    }

    /// A thick line from `p1` to `p2` as a closed obround outline.
    pub fn obround_between(p1: Point, p2: Point, width: PositiveLength) -> Path {
        let diff = p2 - p1;
        let total_width = diff.vector_length() + width.get();
        let mut p = Path::obround(PositiveLength::new_unchecked(total_width), width);
        let angle = Angle::from_deg(diff.y.to_mm().atan2(diff.x.to_mm()).to_degrees()).unwrap_or(Angle::deg0());
        p.rotate(angle, Point::ORIGIN);
        p.translate(Point::new((p1.x + p2.x) / 2, (p1.y + p2.y) / 2));
        p
    }

    /// A thick arc from `p1` to `p2` (included angle `bulge`) as a closed outline.
    /// Degenerates to a circle when `p1 == p2`; falls back to a straight obround
    /// when no arc center exists.
    pub fn arc_obround(p1: Point, p2: Point, bulge: Angle, width: PositiveLength) -> Path {
        if p1 == p2 {
            return Path::circle(width).translated(p1);
        }
        match arc_center(p1, p2, bulge) {
            Some(center) => {
                let d1 = p1 - center;
                let d2 = p2 - center;
                let angle1 = Angle::from_deg(d1.y.to_mm().atan2(d1.x.to_mm()).to_degrees()).unwrap_or(Angle::deg0());
                let angle2 = Angle::from_deg(d2.y.to_mm().atan2(d2.x.to_mm()).to_degrees()).unwrap_or(Angle::deg0());
                let radius = d1.vector_length();
                let half_width = width.get() / 2;
                let inner_radius = radius - half_width;
                let outer_radius = radius + half_width;
                let p1_inner = center + Point::new(inner_radius, Length::ZERO).rotated(angle1, Point::ORIGIN);
                let p1_outer = center + Point::new(outer_radius, Length::ZERO).rotated(angle1, Point::ORIGIN);
                let p2_inner = center + Point::new(inner_radius, Length::ZERO).rotated(angle2, Point::ORIGIN);
                let p2_outer = center + Point::new(outer_radius, Length::ZERO).rotated(angle2, Point::ORIGIN);

                let half_turn = if bulge.microdegrees() < 0 { Angle::deg180() } else { Angle::deg180().inverted() };
                let mut p = Path::default();
                p.add_vertex(p1_inner, bulge);
                p.add_vertex(p2_inner, half_turn);
                p.add_vertex(p2_outer, bulge.inverted());
                p.add_vertex(p1_outer, half_turn);
                p.add_vertex(p1_inner, Angle::deg0());
                p
            }
            None => Path::obround_between(p1, p2, width),
        }
    }

    pub fn rect(p1: Point, p2: Point) -> Path {
        let mut p = Path::default();
        p.add_vertex(Point::new(p1.x, p1.y), Angle::deg0());
        p.add_vertex(Point::new(p2.x, p1.y), Angle::deg0());
        p.add_vertex(Point::new(p2.x, p2.y), Angle::deg0());
        p.add_vertex(Point::new(p1.x, p2.y), Angle::deg0());
        p.add_vertex(Point::new(p1.x, p1.y), Angle::deg0());
        p
    }

    /// A rectangle centered at the origin with optional rounded corners; corner
    /// radius is clamped so it never exceeds `min(width, height) / 2` — on
    /// overflow the result is an obround.
    pub fn centered_rect(width: PositiveLength, height: PositiveLength, corner_radius: UnsignedLength) -> Path {
        let rx = width.get() / 2;
        let ry = height.get() / 2;
        let mut p = Path::default();
        if corner_radius.get().is_zero() {
            p.add_vertex(Point::new(-rx, ry), Angle::deg0());
            p.add_vertex(Point::new(rx, ry), Angle::deg0());
            p.add_vertex(Point::new(rx, -ry), Angle::deg0());
            p.add_vertex(Point::new(-rx, -ry), Angle::deg0());
        } else if corner_radius.get() >= rx.min(ry) {
            return Path::obround(width, height);
        } else {
            let cr = corner_radius.get();
            p.add_vertex(Point::new(-rx + cr, ry), Angle::deg0());
            p.add_vertex(Point::new(rx - cr, ry), Angle::deg90().inverted());
            p.add_vertex(Point::new(rx, ry - cr), Angle::deg0());
            p.add_vertex(Point::new(rx, -ry + cr), Angle::deg90().inverted());
            p.add_vertex(Point::new(rx - cr, -ry), Angle::deg0());
            p.add_vertex(Point::new(-rx + cr, -ry), Angle::deg90().inverted());
            p.add_vertex(Point::new(-rx, -ry + cr), Angle::deg0());
            p.add_vertex(Point::new(-rx, ry - cr), Angle::deg90().inverted());
        }
        p.close();
        p
    }

    /// A rectangle with 45-degree chamfered (optionally rounded) corners.
    pub fn octagon(width: PositiveLength, height: PositiveLength, corner_radius: UnsignedLength) -> Path {
        let rx = width.get() / 2;
        let ry = height.get() / 2;
        let cr = corner_radius.get();
        let min_rx_ry_minus_cr = (rx - cr).min(ry - cr);
        let inner_chamfer =
            Length::from_mm(min_rx_ry_minus_cr.to_mm() * (2.0 - std::f64::consts::SQRT_2)).unwrap_or(Length::ZERO) + cr;
        let mut p = Path::default();
        if cr.is_zero() {
            p.add_vertex(Point::new(rx, ry - inner_chamfer), Angle::deg0());
            p.add_vertex(Point::new(rx - inner_chamfer, ry), Angle::deg0());
            p.add_vertex(Point::new(inner_chamfer - rx, ry), Angle::deg0());
            p.add_vertex(Point::new(-rx, ry - inner_chamfer), Angle::deg0());
            p.add_vertex(Point::new(-rx, inner_chamfer - ry), Angle::deg0());
            p.add_vertex(Point::new(inner_chamfer - rx, -ry), Angle::deg0());
            p.add_vertex(Point::new(rx - inner_chamfer, -ry), Angle::deg0());
            p.add_vertex(Point::new(rx, inner_chamfer - ry), Angle::deg0());
        } else if inner_chamfer >= rx.min(ry) {
            return Path::obround(width, height);
        } else {
            let chamfer_offset = Length::from_mm(cr.to_mm() * (1.0 - 1.0 / std::f64::consts::SQRT_2)).unwrap_or(Length::ZERO);
            let outer_chamfer = inner_chamfer - cr + chamfer_offset;
            p.add_vertex(Point::new(rx, ry - inner_chamfer), Angle::deg45());
            p.add_vertex(Point::new(rx - chamfer_offset, ry - outer_chamfer), Angle::deg0());
            p.add_vertex(Point::new(rx - outer_chamfer, ry - chamfer_offset), Angle::deg45());
            p.add_vertex(Point::new(rx - inner_chamfer, ry), Angle::deg0());
            p.add_vertex(Point::new(inner_chamfer - rx, ry), Angle::deg45());
            p.add_vertex(Point::new(outer_chamfer - rx, ry - chamfer_offset), Angle::deg0());
            p.add_vertex(Point::new(chamfer_offset - rx, ry - outer_chamfer), Angle::deg45());
            p.add_vertex(Point::new(-rx, ry - inner_chamfer), Angle::deg0());
            p.add_vertex(Point::new(-rx, inner_chamfer - ry), Angle::deg45());
            p.add_vertex(Point::new(chamfer_offset - rx, outer_chamfer - ry), Angle::deg0());
            p.add_vertex(Point::new(outer_chamfer - rx, chamfer_offset - ry), Angle::deg45());
            p.add_vertex(Point::new(inner_chamfer - rx, -ry), Angle::deg0());
            p.add_vertex(Point::new(rx - inner_chamfer, -ry), Angle::deg45());
            p.add_vertex(Point::new(rx - outer_chamfer, chamfer_offset - ry), Angle::deg0());
            p.add_vertex(Point::new(rx - chamfer_offset, outer_chamfer - ry), Angle::deg45());
            p.add_vertex(Point::new(rx, inner_chamfer - ry), Angle::deg0());
        }
        p.close();
        p
    }
}

fn nearest_point_on_segment(p: Point, a: Point, b: Point) -> Point {
    let ab = b - a;
    let ab_len_sq = ab.x.nanometers() as f64 * ab.x.nanometers() as f64
        + ab.y.nanometers() as f64 * ab.y.nanometers() as f64;
    if ab_len_sq == 0.0 {
        return a;
    }
    let ap = p - a;
    let t = (ap.x.nanometers() as f64 * ab.x.nanometers() as f64
        + ap.y.nanometers() as f64 * ab.y.nanometers() as f64)
        / ab_len_sq;
    let t = t.clamp(0.0, 1.0);
    Point::new(
        a.x + Length::from_nanometers((ab.x.nanometers() as f64 * t).round() as i64),
        a.y + Length::from_nanometers((ab.y.nanometers() as f64 * t).round() as i64),
    )
}

/// Approximates the arc from `p1` to `p2` (included angle `angle`) by a
/// poly-line whose sagitta stays within `max_tolerance`. Falls back to a
/// straight line if the arc is degenerate or already finer than the tolerance.
fn flat_arc(p1: Point, p2: Point, angle: Angle, max_tolerance: PositiveLength) -> Path {
    if let Some(center) = arc_center(p1, p2, angle) {
        let radius_abs_nm = (p1 - center).vector_length().nanometers() as f64;
        let max_tolerance_nm = max_tolerance.get().nanometers() as f64;
        if radius_abs_nm > max_tolerance_nm / 2.0 {
            let y = (max_tolerance_nm.min(radius_abs_nm / 4.0)).max(0.0);
            let steps_per_rad = (0.5 / (1.0 - y / radius_abs_nm).acos()).min(radius_abs_nm / 2.0);
            let steps = (steps_per_rad * angle.abs().to_rad()).ceil().max(1.0) as i64;

            let mut p = Path::default();
            p.add_vertex(p1, Angle::deg0());
            let angle_delta = angle.microdegrees() as f64 / steps as f64;
            for i in 1..steps {
                let rotated = p1.rotated(Angle::new((angle_delta * i as f64).round() as i64), center);
                p.add_vertex(rotated, Angle::deg0());
            }
            p.add_vertex(p2, Angle::deg0());
            return p;
        }
    }
    Path::line(p1, p2, Angle::deg0())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Length;

    fn nm(v: i64) -> Length {
        Length::from_nanometers(v)
    }

    fn pt(x: i64, y: i64) -> Point {
        Point::new(nm(x), nm(y))
    }

    #[test]
    fn mirror_is_involution() {
        let p = Path::new(vec![
            Vertex::new(pt(0, 0), Angle::deg90()),
            Vertex::new(pt(1000, 0), Angle::deg0()),
            Vertex::straight(pt(1000, 1000)),
        ]);
        let twice = p.mirrored(MirrorAxis::Horizontal, Point::ORIGIN).mirrored(MirrorAxis::Horizontal, Point::ORIGIN);
        assert_eq!(twice, p);
    }

    #[test]
    fn reverse_is_involution() {
        let p = Path::new(vec![
            Vertex::new(pt(0, 0), Angle::deg45()),
            Vertex::new(pt(1000, 0), Angle::deg90()),
            Vertex::straight(pt(1000, 1000)),
        ]);
        assert_eq!(p.reversed().reversed(), p);
    }

    #[test]
    fn closed_path_detection() {
        let open = Path::new(vec![Vertex::straight(pt(0, 0)), Vertex::straight(pt(1, 0))]);
        assert!(!open.is_closed());
        let closed = open.to_closed_path();
        assert!(closed.is_closed());
    }

    #[test]
    fn flatten_tolerance_bounds_sagitta() {
        let p1 = pt(0, 0);
        let p2 = pt(10_000_000, 0);
        let bulge = Angle::deg90();
        let path = Path::new(vec![Vertex::new(p1, bulge), Vertex::straight(p2)]);
        let tol = PositiveLength::new(nm(1_000)).unwrap();
        let flat = path.flattened_arcs(tol);
        assert!(flat.vertices().iter().all(|v| v.bulge.is_zero()));
        let center = arc_center(p1, p2, bulge).unwrap();
        let radius = (p1 - center).vector_length().to_mm();
        for w in flat.vertices().windows(2) {
            let mid = Point::new((w[0].position.x + w[1].position.x) / 2, (w[0].position.y + w[1].position.y) / 2);
            let sagitta_mm = radius - mid.distance_to(center) / 1_000_000.0;
            assert!(sagitta_mm.abs() * 1_000_000.0 <= tol.get().nanometers() as f64 + 1.0);
        }
    }

    #[test]
    fn arc_obround_degenerate_is_circle() {
        let p = pt(500_000, 500_000);
        let width = PositiveLength::new(nm(500_000)).unwrap();
        let shape = Path::arc_obround(p, p, Angle::deg90(), width);
        assert!(shape.is_closed());
        assert_eq!(shape.vertices()[0].position, shape.vertices().last().unwrap().position);
    }

    #[test]
    fn serialization_round_trip_preserves_vertices() {
        let p = Path::new(vec![
            Vertex::straight(pt(0, 0)),
            Vertex::new(pt(10_000_000, 0), Angle::deg90()),
            Vertex::straight(pt(10_000_000, 10_000_000)),
        ]);
        let json = serde_json::to_string(&p).unwrap();
        let back: Path = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
