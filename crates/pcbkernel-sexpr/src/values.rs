//! Codec impls for the file format's scalar numeric types.
//!
//! Lengths and angles serialize as their canonical decimal strings (millimeters,
//! degrees) rather than raw nanometer/microdegree integers, matching the
//! human-editable on-disk representation the numeric types already format
//! themselves as.

use pcbkernel_core::units::{
    Angle, BoundedUnsignedRatio, Length, LengthUnit, PositiveLength, Ratio, UnsignedLength,
    UnsignedLimitedRatio, UnsignedRatio,
};

use crate::codec::{decode_field, FromSExpr, ToSExpr};
use crate::error::SExprError;
use crate::tree::SExpr;

impl ToSExpr for Length {
    fn to_sexpr(&self) -> SExpr {
        SExpr::atom(self.to_mm_string())
    }
}

impl FromSExpr for Length {
    fn from_sexpr(expr: &SExpr) -> crate::error::SExprResult<Self> {
        let text = expr.as_atom().ok_or_else(|| {
            SExprError::malformed(expr.location(), format!("expected a length, found {expr:?}"))
        })?;
        Length::from_mm_string(text).map_err(|e| SExprError::from_kernel_error(expr.location(), e))
    }
}

impl ToSExpr for Angle {
    fn to_sexpr(&self) -> SExpr {
        SExpr::atom(self.to_deg_string())
    }
}

impl FromSExpr for Angle {
    fn from_sexpr(expr: &SExpr) -> crate::error::SExprResult<Self> {
        let text = expr.as_atom().ok_or_else(|| {
            SExprError::malformed(expr.location(), format!("expected an angle, found {expr:?}"))
        })?;
        Angle::from_deg_string(text).map_err(|e| SExprError::from_kernel_error(expr.location(), e))
    }
}

impl ToSExpr for Ratio {
    fn to_sexpr(&self) -> SExpr {
        SExpr::atom(self.to_normalized_string())
    }
}

impl FromSExpr for Ratio {
    fn from_sexpr(expr: &SExpr) -> crate::error::SExprResult<Self> {
        let text = expr.as_atom().ok_or_else(|| {
            SExprError::malformed(expr.location(), format!("expected a ratio, found {expr:?}"))
        })?;
        Ratio::from_normalized_string(text).map_err(|e| SExprError::from_kernel_error(expr.location(), e))
    }
}

macro_rules! refined_codec {
    ($name:ident, $inner:ty) => {
        impl ToSExpr for $name {
            fn to_sexpr(&self) -> SExpr {
                self.get().to_sexpr()
            }
        }

        impl FromSExpr for $name {
            fn from_sexpr(expr: &SExpr) -> crate::error::SExprResult<Self> {
                let inner = <$inner as FromSExpr>::from_sexpr(expr)?;
                $name::new(inner).map_err(|e| SExprError::from_kernel_error(expr.location(), e))
            }
        }
    };
}

refined_codec!(UnsignedLength, Length);
refined_codec!(PositiveLength, Length);
refined_codec!(UnsignedRatio, Ratio);
refined_codec!(UnsignedLimitedRatio, Ratio);

impl ToSExpr for BoundedUnsignedRatio {
    fn to_sexpr(&self) -> SExpr {
        let mut list = SExpr::list("bounded_ratio");
        list.push_field("ratio", self.ratio().to_sexpr());
        list.push_field("min", self.min().to_sexpr());
        list.push_field("max", self.max().to_sexpr());
        list
    }
}

impl FromSExpr for BoundedUnsignedRatio {
    fn from_sexpr(expr: &SExpr) -> crate::error::SExprResult<Self> {
        let ratio: UnsignedRatio = decode_field(expr, "ratio")?;
        let min: UnsignedLength = decode_field(expr, "min")?;
        let max: UnsignedLength = decode_field(expr, "max")?;
        BoundedUnsignedRatio::new(ratio, min, max).map_err(|e| SExprError::from_kernel_error(expr.location(), e))
    }
}

impl ToSExpr for LengthUnit {
    fn to_sexpr(&self) -> SExpr {
        SExpr::atom(match self {
            LengthUnit::Millimeters => "mm",
            LengthUnit::Micrometers => "um",
            LengthUnit::Inches => "inch",
            LengthUnit::Mils => "mil",
        })
    }
}

impl FromSExpr for LengthUnit {
    fn from_sexpr(expr: &SExpr) -> crate::error::SExprResult<Self> {
        let text = expr.as_atom().ok_or_else(|| {
            SExprError::malformed(expr.location(), format!("expected a length unit, found {expr:?}"))
        })?;
        text.parse().map_err(|e| SExprError::from_kernel_error(expr.location(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::parse;

    #[test]
    fn length_round_trips_as_mm_string() {
        let l = Length::from_mm(1.25).unwrap();
        let expr = l.to_sexpr();
        assert_eq!(expr.as_atom(), Some("1.25"));
        assert_eq!(Length::from_sexpr(&expr).unwrap(), l);
    }

    #[test]
    fn angle_round_trips_as_deg_string() {
        let a = Angle::new(90_000_000);
        let expr = a.to_sexpr();
        assert_eq!(Angle::from_sexpr(&expr).unwrap(), a);
    }

    #[test]
    fn unsigned_length_rejects_negative_mm() {
        let expr = parse("-1.0").unwrap();
        assert!(UnsignedLength::from_sexpr(&expr).is_err());
    }

    #[test]
    fn bounded_ratio_round_trips() {
        let ratio = UnsignedRatio::new(Ratio::percent50()).unwrap();
        let min = UnsignedLength::new(Length::from_nanometers(1_000)).unwrap();
        let max = UnsignedLength::new(Length::from_nanometers(10_000)).unwrap();
        let value = BoundedUnsignedRatio::new(ratio, min, max).unwrap();
        let expr = value.to_sexpr();
        let decoded = BoundedUnsignedRatio::from_sexpr(&expr).unwrap();
        assert_eq!(decoded.ratio(), value.ratio());
    }
}
