pub use kurbo::{Affine, Point, Rect};

/// Grayscale intensity in `[0, 1]`, `1.0` being white.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
pub struct Gray(pub f64);

impl Gray {
    pub const WHITE: Gray = Gray(1.0);
    pub const BLACK: Gray = Gray(0.0);

    /// Clamp into `[0, 1]`. NaN maps to black.
    pub fn clamped(v: f64) -> Self {
        if v.is_nan() {
            return Self::BLACK;
        }
        Self(v.clamp(0.0, 1.0))
    }

    /// 8-bit channel value. Truncates, so only `1.0` reaches 255.
    pub fn to_u8(self) -> u8 {
        (self.0.clamp(0.0, 1.0) * 255.0) as u8
    }

    /// `#rrggbb` with `r == g == b`.
    pub fn to_hex(self) -> String {
        let c = self.to_u8();
        format!("#{c:02x}{c:02x}{c:02x}")
    }
}

/// Linear map from `src` onto `dst` with the y axis flipped.
///
/// `src` is a y-up world rectangle, `dst` a y-down document or pixel rectangle. The top-left
/// corner of `src` (`x0`, `y1`) lands on the top-left corner of `dst`.
pub fn y_flip_affine(src: Rect, dst: Rect) -> Affine {
    let sx = dst.width() / src.width();
    let sy = dst.height() / src.height();
    Affine::new([sx, 0.0, 0.0, -sy, dst.x0 - src.x0 * sx, dst.y0 + src.y1 * sy])
}
