//! Linear gradient mask used by the slide transitions

use serde::{Deserialize, Serialize};

use crate::domain::model::Side;

/// Opacity ramp from `p1` (transparent) to `p2` (opaque), active for
/// `duration` seconds starting at `start`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientMask {
    pub width: u32,
    pub height: u32,
    pub p1: (f64, f64),
    pub p2: (f64, f64),
    pub start: f64,
    pub duration: f64,
}

impl GradientMask {
    /// Mask oriented along the movement axis of `side`
    pub fn for_side(width: u32, height: u32, side: Side, start: f64, duration: f64) -> Self {
        let (w, h) = (width as f64, height as f64);
        let (p1, p2) = if side.is_horizontal() {
            ((0.0, h / 2.0), (w, h / 2.0))
        } else {
            ((w / 2.0, 0.0), (w / 2.0, h))
        };
        Self {
            width,
            height,
            p1,
            p2,
            start,
            duration,
        }
    }

    /// Mask value in [0, 1] at pixel (x, y)
    pub fn value_at(&self, x: f64, y: f64) -> f64 {
        let (dx, dy) = (self.p2.0 - self.p1.0, self.p2.1 - self.p1.1);
        let len2 = dx * dx + dy * dy;
        if len2 == 0.0 {
            return 1.0;
        }
        (((x - self.p1.0) * dx + (y - self.p1.1) * dy) / len2).clamp(0.0, 1.0)
    }

    /// Whether the mask applies at clip time `t`
    pub fn is_active(&self, t: f64) -> bool {
        t >= self.start && t < self.start + self.duration
    }

    /// FFmpeg `geq` alpha expression for the mask window
    pub fn alpha_expr(&self) -> String {
        let (dx, dy) = (self.p2.0 - self.p1.0, self.p2.1 - self.p1.1);
        let len2 = dx * dx + dy * dy;
        let ramp = if len2 == 0.0 {
            "1".to_string()
        } else {
            format!(
                "clip(((X-{x1})*{dx}+(Y-{y1})*{dy})/{len2},0,1)",
                x1 = fmt_num(self.p1.0),
                y1 = fmt_num(self.p1.1),
                dx = fmt_num(dx),
                dy = fmt_num(dy),
                len2 = fmt_num(len2),
            )
        };
        format!(
            "if(between(T,{start},{end}),255*{ramp},255)",
            start = fmt_num(self.start),
            end = fmt_num(self.start + self.duration),
            ramp = ramp,
        )
    }
}

/// Compact decimal rendering for filter expressions
pub(crate) fn fmt_num(value: f64) -> String {
    let rendered = format!("{:.3}", value);
    let trimmed = rendered.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "" | "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_mask_ramps_along_x() {
        let mask = GradientMask::for_side(200, 100, Side::Left, 0.0, 1.0);
        assert_eq!(mask.value_at(0.0, 50.0), 0.0);
        assert_eq!(mask.value_at(100.0, 0.0), 0.5);
        assert_eq!(mask.value_at(200.0, 99.0), 1.0);
        assert_eq!(mask.value_at(-30.0, 50.0), 0.0);
        assert_eq!(mask.value_at(500.0, 50.0), 1.0);
    }

    #[test]
    fn test_vertical_mask_ramps_along_y() {
        let mask = GradientMask::for_side(200, 100, Side::Bottom, 0.0, 1.0);
        assert_eq!(mask.p1, (100.0, 0.0));
        assert_eq!(mask.p2, (100.0, 100.0));
        assert_eq!(mask.value_at(10.0, 25.0), 0.25);
    }

    #[test]
    fn test_mask_window() {
        let mask = GradientMask::for_side(200, 100, Side::Top, 2.0, 1.5);
        assert!(!mask.is_active(1.9));
        assert!(mask.is_active(2.0));
        assert!(mask.is_active(3.4));
        assert!(!mask.is_active(3.5));
    }

    #[test]
    fn test_alpha_expr() {
        let mask = GradientMask::for_side(200, 100, Side::Left, 0.0, 1.0);
        assert_eq!(
            mask.alpha_expr(),
            "if(between(T,0,1),255*clip(((X-0)*200+(Y-50)*0)/40000,0,1),255)"
        );
    }

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(1.0), "1");
        assert_eq!(fmt_num(1.25), "1.25");
        assert_eq!(fmt_num(-0.0), "0");
        assert_eq!(fmt_num(0.3333333), "0.333");
        assert_eq!(fmt_num(-1920.0), "-1920");
    }
}
