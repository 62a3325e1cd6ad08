//! Reduces one net segment's anchors and lines to a canonical, redundancy-free
//! form: duplicate junctions collapsed onto pads/vias, orthogonal crossings
//! split at a new junction, redundant parallel lines thinned out, and
//! colinear through-junctions merged away.
//!
//! The simplifier is a reusable scratchpad: [`NetSegmentSimplifier::simplify`]
//! drains its input and returns a [`SimplifyResult`], leaving the instance
//! empty and ready for the next segment.

use std::collections::{BTreeMap, HashSet};

use pcbkernel_core::{Length, Point, PositiveLength};

/// Priority among anchors that land on the same position: lower sorts first,
/// and step 5 always prefers the first match. Do not reorder these variants —
/// vias and pads must out-rank a junction at the same spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AnchorType {
    Via,
    PinOrPad,
    Junction,
}

/// An opaque copper-layer ordinal. `None` layer ranges (used for schematic
/// net segments, which have no concept of copper layers) are always
/// considered a match regardless of the line's layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerId(pub i32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnchorId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineId(usize);

#[derive(Debug, Clone)]
struct Anchor {
    id: AnchorId,
    kind: AnchorType,
    position: Point,
    layer_range: Option<(LayerId, LayerId)>,
    is_new: bool,
}

/// One line between two anchors, as returned in a [`SimplifyResult`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub id: LineId,
    pub p1: AnchorId,
    pub p2: AnchorId,
    pub layer: Option<LayerId>,
    pub width: PositiveLength,
    pub modified: bool,
}

/// The outcome of one [`NetSegmentSimplifier::simplify`] call.
#[derive(Debug, Clone)]
pub struct SimplifyResult {
    pub lines: Vec<Line>,
    pub new_junctions: Vec<(AnchorId, Point)>,
    pub disconnected_pins_or_pads: Vec<AnchorId>,
    pub modified: bool,
}

/// Accumulates one net segment's anchors and lines, then reduces them to a
/// canonical form. See the module documentation for the guarantee about
/// reuse across segments.
#[derive(Default)]
pub struct NetSegmentSimplifier {
    anchors: Vec<Anchor>,
    lines: BTreeMap<usize, Line>,
}

impl NetSegmentSimplifier {
    pub fn new() -> Self {
        NetSegmentSimplifier { anchors: Vec::new(), lines: BTreeMap::new() }
    }

    /// Registers an anchor and returns its id. `layer_range` is `None` for
    /// schematic net segments, or for a board anchor unconstrained to a
    /// copper layer range (the interval is inclusive of both ends).
    pub fn add_anchor(
        &mut self,
        kind: AnchorType,
        position: Point,
        layer_range: Option<(LayerId, LayerId)>,
    ) -> AnchorId {
        let id = AnchorId(self.anchors.len());
        self.anchors.push(Anchor { id, kind, position, layer_range, is_new: false });
        id
    }

    /// Registers a line between two already-added anchors.
    pub fn add_line(&mut self, p1: AnchorId, p2: AnchorId, layer: Option<LayerId>, width: PositiveLength) -> LineId {
        let raw = self.lines.len();
        let id = LineId(raw);
        self.lines.insert(raw, Line { id, p1, p2, layer, width, modified: false });
        id
    }

    fn anchor(&self, id: AnchorId) -> &Anchor {
        &self.anchors[id.0]
    }

    /// Performs the simplification pipeline described in the module
    /// documentation, then clears this instance so it can accept the next
    /// net segment's anchors and lines.
    ///
    /// New anchor and line ids minted while splitting are not known to the
    /// caller in advance — they only appear in the returned result.
    pub fn simplify(&mut self) -> SimplifyResult {
        let pins_or_pads: HashSet<AnchorId> =
            self.anchors.iter().filter(|a| a.kind == AnchorType::PinOrPad).map(|a| a.id).collect();
        let connected_before = connected_pins_or_pads(&self.lines, &pins_or_pads);

        let mut modified = false;

        // Step 3: crossings get a junction so step 4 can split both lines there.
        self.add_junctions_at_line_intersections();
        // Step 4.
        if self.split_lines_at_anchors() {
            modified = true;
        }
        // Step 5.
        if self.remove_duplicate_junctions() {
            modified = true;
        }
        // Step 6.
        if self.remove_redundant_lines() {
            modified = true;
        }
        // Step 7, repeated until it stops finding anything to merge.
        while self.merge_next_lines() {
            modified = true;
        }

        let connected_after = connected_pins_or_pads(&self.lines, &pins_or_pads);
        let mut disconnected_pins_or_pads: Vec<AnchorId> = connected_before.difference(&connected_after).copied().collect();
        disconnected_pins_or_pads.sort();
        let new_junctions: Vec<(AnchorId, Point)> =
            self.anchors.iter().filter(|a| a.is_new).map(|a| (a.id, a.position)).collect();

        let result = SimplifyResult {
            lines: self.lines.values().cloned().collect(),
            new_junctions,
            disconnected_pins_or_pads,
            modified,
        };

        self.anchors.clear();
        self.lines.clear();
        result
    }

    /// Step 1+3 combined: an anchor at `pos` usable for a line on `layer`,
    /// preferring vias/pads over junctions and, among ties, first-added.
    fn find_anchor(&self, pos: Point, layer: Option<LayerId>) -> Option<&Anchor> {
        let mut candidates: Vec<&Anchor> = self.anchors.iter().filter(|a| a.position == pos).collect();
        candidates.sort_by_key(|a| (a.kind, a.id.0));
        candidates.into_iter().find(|a| is_anchor_on_layer(a, layer))
    }

    fn add_junctions_at_line_intersections(&mut self) {
        let snapshot: Vec<Line> = self.lines.values().cloned().collect();
        for i in 0..snapshot.len() {
            for k in (i + 1)..snapshot.len() {
                let line0 = &snapshot[i];
                let line1 = &snapshot[k];
                if line0.layer != line1.layer {
                    continue;
                }
                let a1 = self.anchor(line0.p1).position;
                let a2 = self.anchor(line0.p2).position;
                let b1 = self.anchor(line1.p1).position;
                let b2 = self.anchor(line1.p2).position;
                if let Some(pos) = orthogonal_intersection(a1, a2, b1, b2) {
                    if self.find_anchor(pos, line0.layer).is_none() {
                        let id = AnchorId(self.anchors.len());
                        self.anchors.push(Anchor {
                            id,
                            kind: AnchorType::Junction,
                            position: pos,
                            layer_range: line0.layer.map(|l| (l, l)),
                            is_new: true,
                        });
                    }
                }
            }
        }
    }

    fn split_lines_at_anchors(&mut self) -> bool {
        let mut lines = self.lines.clone();
        let mut finished: HashSet<usize> = HashSet::new();
        let mut next_free_id = self.lines.len();
        let max_lines = self.lines.len() * 2 + 10;
        let mut modified = false;

        while self.split_next_line(&mut lines, &mut finished, &mut next_free_id).is_some() {
            modified = true;
            if lines.len() >= max_lines {
                tracing::warn!(
                    initial_lines = self.lines.len(),
                    reached_lines = lines.len(),
                    "aborting net segment line splitting: too many new lines"
                );
                return false;
            }
        }

        if modified {
            self.lines = lines;
        }
        modified
    }

    fn split_next_line(
        &self,
        lines: &mut BTreeMap<usize, Line>,
        finished: &mut HashSet<usize>,
        next_free_id: &mut usize,
    ) -> Option<()> {
        let ids: Vec<usize> = lines.keys().copied().collect();
        for id in ids {
            if finished.contains(&id) {
                continue;
            }
            let line = lines.get(&id).unwrap().clone();
            let p1 = self.anchor(line.p1).position;
            let p2 = self.anchor(line.p2).position;
            if p1 == p2 {
                finished.insert(id);
                continue;
            }
            let found = self
                .anchors
                .iter()
                .find(|a| a.position != p1 && a.position != p2 && is_anchor_on_layer(a, line.layer) && is_straight_line(p1, a.position, p2))
                .map(|a| a.id);
            if let Some(anchor_id) = found {
                let new_id = *next_free_id;
                *next_free_id += 1;
                lines.insert(
                    new_id,
                    Line { id: LineId(new_id), p1: anchor_id, p2: line.p2, layer: line.layer, width: line.width, modified: true },
                );
                if let Some(existing) = lines.get_mut(&id) {
                    existing.p2 = anchor_id;
                    existing.modified = true;
                }
                return Some(());
            } else {
                finished.insert(id);
            }
        }
        None
    }

    fn convert_line_anchor(&self, anchor_id: AnchorId, layer: Option<LayerId>) -> AnchorId {
        let anchor = self.anchor(anchor_id);
        if anchor.kind == AnchorType::Junction {
            if let Some(existing) = self.find_anchor(anchor.position, layer) {
                return existing.id;
            }
        }
        anchor_id
    }

    fn remove_duplicate_junctions(&mut self) -> bool {
        let mut modified = false;
        let ids: Vec<usize> = self.lines.keys().copied().collect();
        for id in ids {
            let line = match self.lines.get(&id) {
                Some(l) => l.clone(),
                None => continue,
            };
            let p1 = self.convert_line_anchor(line.p1, line.layer);
            let p2 = self.convert_line_anchor(line.p2, line.layer);
            if p1 == p2 {
                // Both ends now resolve to the same anchor: a zero-length
                // line, which would be invalid anyway.
                self.lines.remove(&id);
                modified = true;
            } else if !unordered_pair_eq((line.p1, line.p2), (p1, p2)) {
                if let Some(l) = self.lines.get_mut(&id) {
                    l.p1 = p1;
                    l.p2 = p2;
                    l.modified = true;
                }
                modified = true;
            }
        }
        modified
    }

    fn remove_redundant_lines(&mut self) -> bool {
        let mut modified = false;
        let ids: Vec<usize> = self.lines.keys().copied().collect();
        for id in ids {
            let line = match self.lines.get(&id) {
                Some(l) => l.clone(),
                None => continue,
            };
            let is_duplicate = self.lines.values().any(|other| {
                other.id != line.id
                    && other.layer == line.layer
                    && other.width >= line.width
                    && unordered_pair_eq((other.p1, other.p2), (line.p1, line.p2))
            });
            if is_duplicate {
                self.lines.remove(&id);
                modified = true;
            }
        }
        modified
    }

    fn is_straight(&self, anchor0: AnchorId, junction: AnchorId, anchor1: AnchorId) -> bool {
        let p0 = self.anchor(anchor0).position;
        let p1 = self.anchor(junction).position;
        let p2 = self.anchor(anchor1).position;
        if p0 == p1 || p0 == p2 || p1 == p2 {
            tracing::warn!("unexpected coincident anchors while merging net segment lines");
            return false;
        }
        is_straight_line(p0, p1, p2)
    }

    fn find_existing_direct_line(&self, layer: Option<LayerId>, a: AnchorId, b: AnchorId) -> Option<LineId> {
        self.lines
            .values()
            .find(|line| line.layer == layer && unordered_pair_eq((line.p1, line.p2), (a, b)))
            .map(|l| l.id)
    }

    fn merge_next_lines(&mut self) -> bool {
        let mut junction_lines: BTreeMap<AnchorId, Vec<LineId>> = BTreeMap::new();
        for line in self.lines.values() {
            for anchor_id in [line.p1, line.p2] {
                if self.anchor(anchor_id).kind == AnchorType::Junction {
                    junction_lines.entry(anchor_id).or_default().push(line.id);
                }
            }
        }

        for (junction, line_ids) in junction_lines {
            if line_ids.len() != 2 {
                continue;
            }
            let (trace0, trace1) = match (self.lines.get(&line_ids[0].0).cloned(), self.lines.get(&line_ids[1].0).cloned()) {
                (Some(a), Some(b)) => (a, b),
                _ => continue,
            };
            let anchor0 = if trace0.p1 == junction { trace0.p2 } else { trace0.p1 };
            let anchor1 = if trace1.p1 == junction { trace1.p2 } else { trace1.p1 };
            if trace0.layer != trace1.layer || trace0.width != trace1.width {
                continue;
            }
            if !self.is_straight(anchor0, junction, anchor1) {
                continue;
            }

            if let Some(existing_id) = self.find_existing_direct_line(trace0.layer, anchor0, anchor1) {
                let existing_width = self.lines.get(&existing_id.0).unwrap().width;
                if existing_width < trace0.width {
                    if let Some(l) = self.lines.get_mut(&existing_id.0) {
                        l.width = trace0.width;
                        l.modified = true;
                    }
                }
                self.lines.remove(&trace0.id.0);
                self.lines.remove(&trace1.id.0);
            } else {
                if let Some(l) = self.lines.get_mut(&trace0.id.0) {
                    l.p1 = anchor0;
                    l.p2 = anchor1;
                    l.modified = true;
                }
                self.lines.remove(&trace1.id.0);
            }
            return true;
        }

        false
    }
}

fn connected_pins_or_pads(lines: &BTreeMap<usize, Line>, pins_or_pads: &HashSet<AnchorId>) -> HashSet<AnchorId> {
    let mut ids = HashSet::new();
    for line in lines.values() {
        ids.insert(line.p1);
        ids.insert(line.p2);
    }
    ids.intersection(pins_or_pads).copied().collect()
}

fn unordered_pair_eq(a: (AnchorId, AnchorId), b: (AnchorId, AnchorId)) -> bool {
    (a.0 == b.0 && a.1 == b.1) || (a.0 == b.1 && a.1 == b.0)
}

fn is_anchor_on_layer(anchor: &Anchor, layer: Option<LayerId>) -> bool {
    match (layer, anchor.layer_range) {
        (None, _) | (_, None) => true,
        (Some(l), Some((start, end))) => l >= start && l <= end,
    }
}

fn intersects_horizontal_vertical(a1: Point, a2: Point, b1: Point, b2: Point) -> bool {
    // `a` must be horizontal, `b` vertical; the overlap check uses strict
    // inequalities so a line ending exactly on the other's axis is not an
    // intersection.
    let ay = a1.y;
    let ax0 = a1.x.min(a2.x);
    let ax1 = a1.x.max(a2.x);
    let bx = b1.x;
    let by0 = b1.y.min(b2.y);
    let by1 = b1.y.max(b2.y);
    ax0 < bx && bx < ax1 && by0 < ay && ay < by1
}

fn orthogonal_intersection(a1: Point, a2: Point, b1: Point, b2: Point) -> Option<Point> {
    if a1.y == a2.y && b1.x == b2.x && intersects_horizontal_vertical(a1, a2, b1, b2) {
        Some(Point::new(b1.x, a1.y))
    } else if a1.x == a2.x && b1.y == b2.y && intersects_horizontal_vertical(b1, b2, a1, a2) {
        Some(Point::new(a1.x, b1.y))
    } else {
        None
    }
}

fn nearest_point_on_line(p: Point, l1: Point, l2: Point) -> Point {
    let a = l2 - l1;
    let b = p - l1;
    let c = p - l2;
    let ax = a.x.nanometers() as f64;
    let ay = a.y.nanometers() as f64;
    let bx = b.x.nanometers() as f64;
    let by = b.y.nanometers() as f64;
    let d = bx * ax + by * ay;
    let e = ax * ax + ay * ay;
    if a.x.is_zero() && a.y.is_zero() {
        l1
    } else if b.x.is_zero() && b.y.is_zero() {
        l1
    } else if d <= 0.0 {
        l1
    } else if (c.x.is_zero() && c.y.is_zero()) || e <= d {
        l2
    } else {
        let fx = round_to_i64(ax * d / e);
        let fy = round_to_i64(ay * d / e);
        Point::new(l1.x + Length::from_nanometers(fx), l1.y + Length::from_nanometers(fy))
    }
}

fn round_to_i64(x: f64) -> i64 {
    if x >= 0.0 {
        (x + 0.5).floor() as i64
    } else {
        (x - 0.5).ceil() as i64
    }
}

/// Exact for axis-aligned triples; otherwise the orthogonal distance from
/// `p1` to the line `p0`–`p2` against `min(length / 100, 50 nm)`.
fn is_straight_line(p0: Point, p1: Point, p2: Point) -> bool {
    if p0.x == p1.x {
        p2.x == p1.x && (p0.y < p1.y) == (p1.y < p2.y)
    } else if p0.y == p1.y {
        p2.y == p1.y && (p0.x < p1.x) == (p1.x < p2.x)
    } else {
        let length = (p2 - p0).vector_length();
        let tolerance = std::cmp::min(length / 100, Length::from_nanometers(50));
        let nearest = nearest_point_on_line(p1, p0, p2);
        (p1 - nearest).vector_length() < tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn width(mm: f64) -> PositiveLength {
        PositiveLength::new(Length::from_mm(mm).unwrap()).unwrap()
    }

    fn pt(x_mm: f64, y_mm: f64) -> Point {
        Point::new(Length::from_mm(x_mm).unwrap(), Length::from_mm(y_mm).unwrap())
    }

    /// Scenario S1-ish: two straight, colinear segments through a redundant
    /// junction merge into one line and the junction disappears.
    #[test]
    fn merges_colinear_segments_through_a_junction() {
        let mut s = NetSegmentSimplifier::new();
        let pad0 = s.add_anchor(AnchorType::PinOrPad, pt(0.0, 0.0), None);
        let junction = s.add_anchor(AnchorType::Junction, pt(1.0, 0.0), None);
        let pad1 = s.add_anchor(AnchorType::PinOrPad, pt(2.0, 0.0), None);
        s.add_line(pad0, junction, None, width(0.2));
        s.add_line(junction, pad1, None, width(0.2));

        let result = s.simplify();

        assert!(result.modified);
        assert_eq!(result.lines.len(), 1);
        let merged = &result.lines[0];
        assert!(unordered_pair_eq((merged.p1, merged.p2), (pad0, pad1)));
        assert!(result.disconnected_pins_or_pads.is_empty());
    }

    /// Lines with different widths through the same junction must not merge.
    #[test]
    fn does_not_merge_segments_of_different_width() {
        let mut s = NetSegmentSimplifier::new();
        let pad0 = s.add_anchor(AnchorType::PinOrPad, pt(0.0, 0.0), None);
        let junction = s.add_anchor(AnchorType::Junction, pt(1.0, 0.0), None);
        let pad1 = s.add_anchor(AnchorType::PinOrPad, pt(2.0, 0.0), None);
        s.add_line(pad0, junction, None, width(0.2));
        s.add_line(junction, pad1, None, width(0.3));

        let result = s.simplify();

        assert_eq!(result.lines.len(), 2);
    }

    /// Scenario: an orthogonal T-crossing gets a new junction and both lines
    /// split there.
    #[test]
    fn splits_orthogonal_crossing_lines() {
        let mut s = NetSegmentSimplifier::new();
        let h0 = s.add_anchor(AnchorType::PinOrPad, pt(-1.0, 0.0), None);
        let h1 = s.add_anchor(AnchorType::PinOrPad, pt(1.0, 0.0), None);
        let v0 = s.add_anchor(AnchorType::PinOrPad, pt(0.0, -1.0), None);
        let v1 = s.add_anchor(AnchorType::PinOrPad, pt(0.0, 1.0), None);
        s.add_line(h0, h1, None, width(0.2));
        s.add_line(v0, v1, None, width(0.2));

        let result = s.simplify();

        assert!(result.modified);
        assert_eq!(result.new_junctions.len(), 1);
        assert_eq!(result.new_junctions[0].1, pt(0.0, 0.0));
        assert_eq!(result.lines.len(), 4);
    }

    /// Two identical lines between the same anchors keep only the thicker.
    #[test]
    fn removes_thinner_redundant_line() {
        let mut s = NetSegmentSimplifier::new();
        let a = s.add_anchor(AnchorType::PinOrPad, pt(0.0, 0.0), None);
        let b = s.add_anchor(AnchorType::PinOrPad, pt(1.0, 0.0), None);
        s.add_line(a, b, None, width(0.1));
        s.add_line(a, b, None, width(0.3));

        let result = s.simplify();

        assert_eq!(result.lines.len(), 1);
        assert_eq!(result.lines[0].width, width(0.3));
    }

    /// A stub line from a pad to a junction coincident with it collapses to
    /// zero length once the junction resolves to the pad itself, dropping the
    /// pad out of the connected set entirely.
    #[test]
    fn reports_pad_disconnected_when_its_only_line_collapses() {
        let mut s = NetSegmentSimplifier::new();
        let pad = s.add_anchor(AnchorType::PinOrPad, pt(0.0, 0.0), None);
        let junction = s.add_anchor(AnchorType::Junction, pt(0.0, 0.0), None);
        s.add_line(pad, junction, None, width(0.2));

        let result = s.simplify();

        assert!(result.modified);
        assert!(result.lines.is_empty());
        assert_eq!(result.disconnected_pins_or_pads, vec![pad]);
    }

    #[test]
    fn is_straight_line_accepts_axis_aligned_midpoint() {
        assert!(is_straight_line(pt(0.0, 0.0), pt(1.0, 0.0), pt(2.0, 0.0)));
        assert!(!is_straight_line(pt(0.0, 0.0), pt(1.0, 0.0), pt(1.0, 1.0)));
    }

    #[test]
    fn is_straight_line_rejects_points_off_axis_beyond_tolerance() {
        // A diagonal of length ~1.414mm (1_414_214 nm); tolerance is
        // min(length/100, 50nm) = 50nm here, well under a 1000nm offset.
        let p0 = pt(0.0, 0.0);
        let p2 = pt(1.0, 1.0);
        let off_axis = Point::new(Length::from_mm(0.5).unwrap() + Length::from_nanometers(1000), Length::from_mm(0.5).unwrap());
        assert!(!is_straight_line(p0, off_axis, p2));
    }
}
