//! Window placement relative to the taskbar.

/// Which player's side of the screen the sprite sits on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    /// Left edge, sprite facing right
    #[default]
    OneP,
    /// Right edge, sprite mirrored
    TwoP,
}

impl Side {
    #[inline]
    pub fn is_mirrored(self) -> bool {
        self == Side::TwoP
    }
}

impl std::str::FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1p" | "1" | "left" => Ok(Side::OneP),
            "2p" | "2" | "right" => Ok(Side::TwoP),
            other => Err(format!("unknown side '{}', expected 1p or 2p", other)),
        }
    }
}

/// Offset of the window from its anchor, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Separate offsets for each side, so switching sides keeps both.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SideOffsets {
    pub one_p: Offset,
    pub two_p: Offset,
}

impl Default for SideOffsets {
    fn default() -> Self {
        Self {
            one_p: Offset::new(-450.0, 200.0),
            two_p: Offset::new(500.0, 200.0),
        }
    }
}

impl SideOffsets {
    pub fn get(&self, side: Side) -> Offset {
        match side {
            Side::OneP => self.one_p,
            Side::TwoP => self.two_p,
        }
    }

    pub fn set(&mut self, side: Side, offset: Offset) {
        match side {
            Side::OneP => self.one_p = offset,
            Side::TwoP => self.two_p = offset,
        }
    }
}

/// Usable desktop area (screen minus taskbar), in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorkArea {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl WorkArea {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// A work area anchored at the origin.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }
}

/// Where to put the overlay window and whether to mirror the sprite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub left: f64,
    pub top: f64,
    /// Flip the sprite horizontally
    pub mirrored: bool,
}

impl Placement {
    /// Place a `window_width` × `window_height` window above the taskbar.
    ///
    /// 1P anchors the window's left edge to the work area's left edge, 2P
    /// anchors its right edge to the work area's right edge. Both anchor the
    /// bottom edge to the work area's bottom. The offset is then added.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use taskbar_anim_core::{Offset, Placement, Side, WorkArea};
    ///
    /// let area = WorkArea::from_size(1920.0, 1040.0);
    /// let p = Placement::compute(&area, 300.0, 200.0, Side::TwoP, Offset::new(-10.0, 5.0));
    /// assert_eq!(p.left, 1920.0 - 300.0 - 10.0);
    /// assert_eq!(p.top, 1040.0 - 200.0 + 5.0);
    /// assert!(p.mirrored);
    /// ```
    pub fn compute(area: &WorkArea, window_width: f64, window_height: f64, side: Side, offset: Offset) -> Self {
        let left = match side {
            Side::OneP => area.left + offset.x,
            Side::TwoP => area.right - window_width + offset.x,
        };
        let top = area.bottom - window_height + offset.y;

        Self {
            left,
            top,
            mirrored: side.is_mirrored(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_p_default_offset() {
        let area = WorkArea::new(0.0, 0.0, 1920.0, 1040.0);
        let offset = SideOffsets::default().get(Side::OneP);
        let p = Placement::compute(&area, 256.0, 256.0, Side::OneP, offset);

        assert_eq!(p.left, -450.0);
        assert_eq!(p.top, 1040.0 - 256.0 + 200.0);
        assert!(!p.mirrored);
    }

    #[test]
    fn test_two_p_anchors_right_edge() {
        let area = WorkArea::new(100.0, 0.0, 2020.0, 1000.0);
        let p = Placement::compute(&area, 200.0, 100.0, Side::TwoP, Offset::new(0.0, 0.0));

        assert_eq!(p.left, 1820.0);
        assert_eq!(p.top, 900.0);
        assert!(p.mirrored);
    }

    #[test]
    fn test_side_offsets_independent() {
        let mut offsets = SideOffsets::default();
        offsets.set(Side::TwoP, Offset::new(12.0, -3.0));

        assert_eq!(offsets.get(Side::TwoP), Offset::new(12.0, -3.0));
        assert_eq!(offsets.get(Side::OneP), Offset::new(-450.0, 200.0));
    }

    #[test]
    fn test_parse_side() {
        assert_eq!("1P".parse::<Side>(), Ok(Side::OneP));
        assert_eq!("2p".parse::<Side>(), Ok(Side::TwoP));
        assert!("3p".parse::<Side>().is_err());
    }
}
