//! Position animation for slide transitions

use serde::{Deserialize, Serialize};

use crate::domain::model::Side;
use crate::transitions::mask::fmt_num;
use crate::transitions::MIN_TRANSITION_DURATION;

/// Whether the clip moves onto or off the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideDirection {
    In,
    Out,
}

/// Linear slide between fully off-screen on `side` and centered.
///
/// Offsets are relative to the centered position: `(0, 0)` is centered,
/// `(-width, 0)` is fully off the left edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideMotion {
    pub side: Side,
    pub direction: SlideDirection,
    pub width: u32,
    pub height: u32,
    pub start: f64,
    pub duration: f64,
}

impl SlideMotion {
    /// Fraction of the motion completed at clip time `t`, in [0, 1]
    pub fn progress_at(&self, t: f64) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((t - self.start) / self.duration).clamp(0.0, 1.0)
    }

    /// Fraction of the frame that is off-screen at clip time `t`
    fn travel_at(&self, t: f64) -> f64 {
        let progress = self.progress_at(t);
        match self.direction {
            SlideDirection::In => 1.0 - progress,
            SlideDirection::Out => progress,
        }
    }

    /// `(dx, dy)` offset from the centered position at clip time `t`
    pub fn offset_at(&self, t: f64) -> (f64, f64) {
        let travel = self.travel_at(t);
        let (w, h) = (self.width as f64, self.height as f64);
        let (dx, dy) = match self.side {
            Side::Left => (-w * travel, 0.0),
            Side::Right => (w * travel, 0.0),
            Side::Top => (0.0, -h * travel),
            Side::Bottom => (0.0, h * travel),
        };
        // Normalize -0.0 so centered compares equal to (0, 0)
        (dx + 0.0, dy + 0.0)
    }

    /// FFmpeg overlay `x`/`y` expressions equivalent to `offset_at`
    pub fn overlay_exprs(&self) -> (String, String) {
        let progress = format!(
            "clip((t-{})/{},0,1)",
            fmt_num(self.start),
            fmt_num(self.duration.max(MIN_TRANSITION_DURATION))
        );
        let travel = match self.direction {
            SlideDirection::In => format!("(1-{})", progress),
            SlideDirection::Out => progress,
        };
        let w = self.width;
        let h = self.height;
        match self.side {
            Side::Left => (format!("-{}*{}", w, travel), "0".to_string()),
            Side::Right => (format!("{}*{}", w, travel), "0".to_string()),
            Side::Top => ("0".to_string(), format!("-{}*{}", h, travel)),
            Side::Bottom => ("0".to_string(), format!("{}*{}", h, travel)),
        }
    }
}
