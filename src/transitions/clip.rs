//! Clip handle carried through the transition helpers

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::model::ClipInfo;
use crate::transitions::mask::GradientMask;
use crate::transitions::motion::SlideMotion;

/// Effect attached to a clip, applied by the external encoder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum ClipEffect {
    FadeIn { duration: f64 },
    FadeOut { start: f64, duration: f64 },
    Mask(GradientMask),
    Slide(SlideMotion),
}

/// A source clip plus the effects requested on it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    pub source: PathBuf,
    pub width: u32,
    pub height: u32,
    pub duration: f64,
    pub effects: Vec<ClipEffect>,
}

impl Clip {
    pub fn new(source: impl Into<PathBuf>, width: u32, height: u32, duration: f64) -> Self {
        Self {
            source: source.into(),
            width,
            height,
            duration,
            effects: Vec::new(),
        }
    }

    pub fn from_info(info: &ClipInfo) -> Self {
        Self::new(info.path.clone(), info.width, info.height, info.duration)
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Stack another effect on top of the existing ones
    pub fn with_effect(mut self, effect: ClipEffect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Replace any existing mask
    pub fn with_mask(mut self, mask: GradientMask) -> Self {
        self.effects.retain(|e| !matches!(e, ClipEffect::Mask(_)));
        self.effects.push(ClipEffect::Mask(mask));
        self
    }

    /// Replace any existing position animation
    pub fn with_position(mut self, motion: SlideMotion) -> Self {
        self.effects.retain(|e| !matches!(e, ClipEffect::Slide(_)));
        self.effects.push(ClipEffect::Slide(motion));
        self
    }

    pub fn mask(&self) -> Option<&GradientMask> {
        self.effects.iter().find_map(|e| match e {
            ClipEffect::Mask(mask) => Some(mask),
            _ => None,
        })
    }

    pub fn motion(&self) -> Option<&SlideMotion> {
        self.effects.iter().find_map(|e| match e {
            ClipEffect::Slide(motion) => Some(motion),
            _ => None,
        })
    }

    /// Offset from the centered position at clip time `t`
    pub fn position_at(&self, t: f64) -> (f64, f64) {
        self.motion()
            .map(|motion| motion.offset_at(t))
            .unwrap_or((0.0, 0.0))
    }

    /// Brightness multiplier from the fade effects at clip time `t`
    pub fn opacity_at(&self, t: f64) -> f64 {
        self.effects.iter().fold(1.0, |opacity, effect| match effect {
            ClipEffect::FadeIn { duration } if *duration > 0.0 => {
                opacity * (t / duration).clamp(0.0, 1.0)
            }
            ClipEffect::FadeOut { start, duration } if *duration > 0.0 => {
                opacity * (1.0 - (t - start) / duration).clamp(0.0, 1.0)
            }
            _ => opacity,
        })
    }
}
