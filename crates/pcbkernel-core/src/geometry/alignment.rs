//! Text/content alignment relative to an anchor point.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VAlign {
    Top,
    Center,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Alignment {
    pub h: HAlign,
    pub v: VAlign,
}

impl Alignment {
    pub const fn new(h: HAlign, v: VAlign) -> Self {
        Alignment { h, v }
    }

    pub const fn bottom_left() -> Self {
        Alignment::new(HAlign::Left, VAlign::Bottom)
    }

    pub const fn center() -> Self {
        Alignment::new(HAlign::Center, VAlign::Center)
    }

    pub fn mirrored_h(&self) -> Alignment {
        let h = match self.h {
            HAlign::Left => HAlign::Right,
            HAlign::Center => HAlign::Center,
            HAlign::Right => HAlign::Left,
        };
        Alignment::new(h, self.v)
    }

    pub fn mirrored_v(&self) -> Alignment {
        let v = match self.v {
            VAlign::Top => VAlign::Bottom,
            VAlign::Center => VAlign::Center,
            VAlign::Bottom => VAlign::Top,
        };
        Alignment::new(self.h, v)
    }

    pub fn mirrored(&self) -> Alignment {
        self.mirrored_h().mirrored_v()
    }
}

impl Default for Alignment {
    fn default() -> Self {
        Alignment::bottom_left()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirror_is_involution() {
        let a = Alignment::new(HAlign::Left, VAlign::Top);
        assert_eq!(a.mirrored().mirrored(), a);
    }

    #[test]
    fn mirror_h_flips_left_right_only() {
        let a = Alignment::new(HAlign::Left, VAlign::Top);
        assert_eq!(a.mirrored_h(), Alignment::new(HAlign::Right, VAlign::Top));
    }
}
