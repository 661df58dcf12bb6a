use glam::Vec2;

/// Fraction of the shorter viewport side used as the globe's silhouette radius.
pub const RADIUS_FRACTION: f32 = 0.3;

/// Screen-space layout of the globe for one surface size.
/// Recomputed on every resize; never carries simulation state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportGeometry {
    /// Surface width in pixels (> 0).
    pub width: u32,
    /// Surface height in pixels (> 0).
    pub height: u32,
    /// Globe center in pixels.
    pub center: Vec2,
    /// Silhouette radius in pixels.
    pub radius: f32,
}

impl ViewportGeometry {
    /// Lay out the globe for a `width` x `height` surface.
    /// Returns `None` for a zero-sized surface.
    pub fn from_size(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        let w = width as f32;
        let h = height as f32;
        Some(Self {
            width,
            height,
            center: Vec2::new(w / 2.0, h / 2.0),
            radius: w.min(h) * RADIUS_FRACTION,
        })
    }

    /// Same as [`from_size`](Self::from_size) but for hosts reporting signed or
    /// fractional sizes (CSS pixels, window events). Non-positive or non-finite
    /// dimensions yield `None`.
    pub fn from_dimensions(width: f64, height: f64) -> Option<Self> {
        if !(width.is_finite() && height.is_finite()) || width < 1.0 || height < 1.0 {
            return None;
        }
        Self::from_size(width as u32, height as u32)
    }
}
