//! Codec impls for the geometric primitives: points, vertices, paths, alignment.

use pcbkernel_core::{Alignment, HAlign, Path, Point, VAlign, Vertex};

use crate::codec::{decode_all, decode_field, FromSExpr, ToSExpr};
use crate::error::SExprError;
use crate::tree::SExpr;

impl ToSExpr for Point {
    fn to_sexpr(&self) -> SExpr {
        let mut list = SExpr::list("position");
        list.push(self.x.to_sexpr());
        list.push(self.y.to_sexpr());
        list
    }
}

impl FromSExpr for Point {
    fn from_sexpr(expr: &SExpr) -> crate::error::SExprResult<Self> {
        let mut values = expr.positional();
        let x_expr = values.next().ok_or_else(|| {
            SExprError::missing_child(expr.location(), "position", "x")
        })?;
        let y_expr = values.next().ok_or_else(|| {
            SExprError::missing_child(expr.location(), "position", "y")
        })?;
        Ok(Point::new(
            pcbkernel_core::Length::from_sexpr(x_expr)?,
            pcbkernel_core::Length::from_sexpr(y_expr)?,
        ))
    }
}

impl ToSExpr for Vertex {
    fn to_sexpr(&self) -> SExpr {
        let mut list = SExpr::list("vertex");
        list.push(self.position.to_sexpr());
        list.push_field("angle", self.bulge.to_sexpr());
        list
    }
}

impl FromSExpr for Vertex {
    fn from_sexpr(expr: &SExpr) -> crate::error::SExprResult<Self> {
        let position: Point = decode_field(expr, "position")?;
        let bulge = match expr.child("angle") {
            Some(_) => decode_field(expr, "angle")?,
            None => pcbkernel_core::Angle::deg0(),
        };
        Ok(Vertex::new(position, bulge))
    }
}

impl ToSExpr for Path {
    fn to_sexpr(&self) -> SExpr {
        let mut list = SExpr::list("path");
        for vertex in self.vertices() {
            list.push_line(vertex.to_sexpr());
        }
        list
    }
}

impl FromSExpr for Path {
    fn from_sexpr(expr: &SExpr) -> crate::error::SExprResult<Self> {
        let vertices = decode_all(expr, "vertex")?;
        Ok(Path::new(vertices))
    }
}

impl ToSExpr for HAlign {
    fn to_sexpr(&self) -> SExpr {
        SExpr::atom(match self {
            HAlign::Left => "left",
            HAlign::Center => "center",
            HAlign::Right => "right",
        })
    }
}

impl FromSExpr for HAlign {
    fn from_sexpr(expr: &SExpr) -> crate::error::SExprResult<Self> {
        match expr.as_atom() {
            Some("left") => Ok(HAlign::Left),
            Some("center") => Ok(HAlign::Center),
            Some("right") => Ok(HAlign::Right),
            other => Err(SExprError::UnknownToken {
                location: expr.location(),
                expected: "left|center|right".to_string(),
                found: other.unwrap_or("<non-atom>").to_string(),
            }),
        }
    }
}

impl ToSExpr for VAlign {
    fn to_sexpr(&self) -> SExpr {
        SExpr::atom(match self {
            VAlign::Top => "top",
            VAlign::Center => "center",
            VAlign::Bottom => "bottom",
        })
    }
}

impl FromSExpr for VAlign {
    fn from_sexpr(expr: &SExpr) -> crate::error::SExprResult<Self> {
        match expr.as_atom() {
            Some("top") => Ok(VAlign::Top),
            Some("center") => Ok(VAlign::Center),
            Some("bottom") => Ok(VAlign::Bottom),
            other => Err(SExprError::UnknownToken {
                location: expr.location(),
                expected: "top|center|bottom".to_string(),
                found: other.unwrap_or("<non-atom>").to_string(),
            }),
        }
    }
}

impl ToSExpr for Alignment {
    fn to_sexpr(&self) -> SExpr {
        let mut list = SExpr::list("align");
        list.push(self.h.to_sexpr());
        list.push(self.v.to_sexpr());
        list
    }
}

impl FromSExpr for Alignment {
    fn from_sexpr(expr: &SExpr) -> crate::error::SExprResult<Self> {
        let mut values = expr.positional();
        let h_expr = values
            .next()
            .ok_or_else(|| SExprError::missing_child(expr.location(), "align", "h"))?;
        let v_expr = values
            .next()
            .ok_or_else(|| SExprError::missing_child(expr.location(), "align", "v"))?;
        Ok(Alignment::new(HAlign::from_sexpr(h_expr)?, VAlign::from_sexpr(v_expr)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcbkernel_core::units::{Angle, Length};
    use crate::tree::{format, parse};

    #[test]
    fn point_round_trips() {
        let p = Point::new(Length::from_mm(1.0).unwrap(), Length::from_mm(-2.5).unwrap());
        let expr = p.to_sexpr();
        assert_eq!(Point::from_sexpr(&expr).unwrap(), p);
    }

    #[test]
    fn path_serializes_each_vertex_as_its_own_tagged_child() {
        let path = Path::new(vec![
            Vertex::straight(Point::ORIGIN),
            Vertex::new(Point::new(Length::from_mm(1.0).unwrap(), Length::ZERO), Angle::deg90()),
            Vertex::straight(Point::new(Length::from_mm(1.0).unwrap(), Length::from_mm(1.0).unwrap())),
        ]);
        let expr = path.to_sexpr();
        let vertex_children: Vec<_> = expr.children_tagged("vertex").collect();
        assert_eq!(vertex_children.len(), 3);
        for child in &vertex_children {
            assert!(child.child("position").is_some());
            assert!(child.child("angle").is_some());
        }
        let printed = format(&expr);
        let reparsed = parse(&printed).unwrap();
        assert_eq!(Path::from_sexpr(&reparsed).unwrap(), path);
    }

    #[test]
    fn alignment_round_trips() {
        let a = Alignment::new(HAlign::Right, VAlign::Top);
        let expr = a.to_sexpr();
        assert_eq!(Alignment::from_sexpr(&expr).unwrap(), a);
    }
}
