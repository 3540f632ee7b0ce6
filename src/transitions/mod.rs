//! Transition helpers
//!
//! Each helper takes a clip and a duration (plus a side for slides) and
//! returns the clip with the matching effects attached. Nothing is decoded
//! or encoded here: `Clip::filter_graph` turns the effects into an FFmpeg
//! filter graph and the render port does the rest.

mod clip;
mod filter;
mod mask;
mod motion;

pub use clip::{Clip, ClipEffect};
pub use filter::OUTPUT_LABEL;
pub use mask::GradientMask;
pub use motion::{SlideDirection, SlideMotion};

use crate::domain::errors::DomainError;
use crate::domain::model::{Side, TransitionKind};

/// Shortest window the filter graph can express; numbers are written with
/// millisecond precision
pub const MIN_TRANSITION_DURATION: f64 = 0.001;

fn check_duration(t: f64) -> Result<(), DomainError> {
    if !t.is_finite() || t < MIN_TRANSITION_DURATION {
        return Err(DomainError::BadArgs(format!(
            "Transition duration must be at least {}s, got {}",
            MIN_TRANSITION_DURATION, t
        )));
    }
    Ok(())
}

/// Effect window: the requested duration bounded by the clip length
fn effect_window(clip: &Clip, t: f64) -> Result<f64, DomainError> {
    check_duration(t)?;
    let window = t.min(clip.duration);
    if window.is_nan() || window < MIN_TRANSITION_DURATION {
        return Err(DomainError::BadArgs(format!(
            "Clip is too short for a transition: {}s",
            clip.duration
        )));
    }
    Ok(window)
}

/// Fade in from black over the first `t` seconds
pub fn fadein_transition(clip: Clip, t: f64) -> Result<Clip, DomainError> {
    let duration = effect_window(&clip, t)?;
    Ok(clip.with_effect(ClipEffect::FadeIn { duration }))
}

/// Fade out to black over the last `t` seconds
pub fn fadeout_transition(clip: Clip, t: f64) -> Result<Clip, DomainError> {
    let duration = effect_window(&clip, t)?;
    let start = clip.duration - duration;
    Ok(clip.with_effect(ClipEffect::FadeOut { start, duration }))
}

fn slide(clip: Clip, t: f64, side: Side, direction: SlideDirection) -> Result<Clip, DomainError> {
    let duration = effect_window(&clip, t)?;
    let start = match direction {
        SlideDirection::In => 0.0,
        SlideDirection::Out => clip.duration - duration,
    };
    let (width, height) = clip.size();
    let mask = GradientMask::for_side(width, height, side, start, duration);
    let motion = SlideMotion {
        side,
        direction,
        width,
        height,
        start,
        duration,
    };
    Ok(clip.with_mask(mask).with_position(motion))
}

/// Slide from fully off-screen on `side` to centered over the first `t` seconds
pub fn slidein_transition(clip: Clip, t: f64, side: Side) -> Result<Clip, DomainError> {
    slide(clip, t, side, SlideDirection::In)
}

/// Slide from centered to fully off-screen on `side` over the last `t` seconds
pub fn slideout_transition(clip: Clip, t: f64, side: Side) -> Result<Clip, DomainError> {
    slide(clip, t, side, SlideDirection::Out)
}

/// Dispatch on the transition kind
pub fn apply_transition(
    clip: Clip,
    kind: TransitionKind,
    t: f64,
    side: Option<Side>,
) -> Result<Clip, DomainError> {
    let require_side = || {
        side.ok_or_else(|| {
            DomainError::BadArgs(format!("{} needs a side (left, right, top, bottom)", kind))
        })
    };
    match kind {
        TransitionKind::FadeIn => fadein_transition(clip, t),
        TransitionKind::FadeOut => fadeout_transition(clip, t),
        TransitionKind::SlideIn => slidein_transition(clip, t, require_side()?),
        TransitionKind::SlideOut => slideout_transition(clip, t, require_side()?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip(duration: f64) -> Clip {
        Clip::new("clip.mp4", 1280, 720, duration)
    }

    #[test]
    fn test_fadein_window_equals_duration() {
        let faded = fadein_transition(clip(10.0), 1.5).unwrap();
        assert_eq!(faded.effects, vec![ClipEffect::FadeIn { duration: 1.5 }]);
        assert_eq!(faded.opacity_at(0.0), 0.0);
        assert_eq!(faded.opacity_at(0.75), 0.5);
        assert_eq!(faded.opacity_at(1.5), 1.0);
    }

    #[test]
    fn test_fade_window_bounded_by_clip_length() {
        let faded = fadein_transition(clip(2.0), 5.0).unwrap();
        assert_eq!(faded.effects, vec![ClipEffect::FadeIn { duration: 2.0 }]);

        let faded = fadeout_transition(clip(2.0), 5.0).unwrap();
        assert_eq!(
            faded.effects,
            vec![ClipEffect::FadeOut {
                start: 0.0,
                duration: 2.0
            }]
        );
    }

    #[test]
    fn test_fadeout_anchored_to_clip_end() {
        let faded = fadeout_transition(clip(10.0), 2.0).unwrap();
        assert_eq!(
            faded.effects,
            vec![ClipEffect::FadeOut {
                start: 8.0,
                duration: 2.0
            }]
        );
        assert_eq!(faded.opacity_at(5.0), 1.0);
        assert_eq!(faded.opacity_at(9.0), 0.5);
        assert_eq!(faded.opacity_at(10.0), 0.0);
    }

    #[test]
    fn test_fades_stack() {
        let both = fadeout_transition(fadein_transition(clip(10.0), 1.0).unwrap(), 1.0).unwrap();
        assert_eq!(both.effects.len(), 2);
        assert_eq!(both.opacity_at(5.0), 1.0);
    }

    #[test]
    fn test_invalid_durations_rejected() {
        assert!(fadein_transition(clip(10.0), 0.0).is_err());
        assert!(fadeout_transition(clip(10.0), -1.0).is_err());
        assert!(slidein_transition(clip(10.0), f64::NAN, Side::Left).is_err());
    }

    #[test]
    fn test_sub_millisecond_windows_rejected() {
        assert!(matches!(
            slidein_transition(Clip::new("in.mp4", 640, 360, 4.0), 0.0004, Side::Left),
            Err(DomainError::BadArgs(_))
        ));
        assert!(fadein_transition(clip(10.0), 0.0004).is_err());
        assert!(fadeout_transition(clip(0.0002), 1.0).is_err());

        let graph = slidein_transition(Clip::new("in.mp4", 640, 360, 4.0), 0.001, Side::Left)
            .unwrap()
            .filter_graph();
        assert!(!graph.contains(")/0,"), "{}", graph);
        assert!(!graph.contains("between(T,0,0)"), "{}", graph);

        let fade = fadein_transition(clip(10.0), MIN_TRANSITION_DURATION)
            .unwrap()
            .filter_graph();
        assert!(fade.contains("fade=t=in:st=0:d=0.001"), "{}", fade);
    }

    #[test]
    fn test_slidein_position_interpolates() {
        let slid = slidein_transition(clip(10.0), 2.0, Side::Left).unwrap();
        assert_eq!(slid.position_at(0.0), (-1280.0, 0.0));
        assert_eq!(slid.position_at(1.0), (-640.0, 0.0));
        assert_eq!(slid.position_at(2.0), (0.0, 0.0));
        assert_eq!(slid.position_at(7.0), (0.0, 0.0));

        let mask = slid.mask().unwrap();
        assert_eq!(mask.p1, (0.0, 360.0));
        assert_eq!(mask.p2, (1280.0, 360.0));
        assert_eq!((mask.start, mask.duration), (0.0, 2.0));
    }

    #[test]
    fn test_slideout_runs_over_clip_tail() {
        let slid = slideout_transition(clip(10.0), 2.0, Side::Top).unwrap();
        let motion = slid.motion().unwrap();
        assert_eq!(motion.start, 8.0);
        assert_eq!(slid.position_at(0.0), (0.0, 0.0));
        assert_eq!(slid.position_at(8.0), (0.0, 0.0));
        assert_eq!(slid.position_at(9.0), (0.0, -360.0));
        assert_eq!(slid.position_at(10.0), (0.0, -720.0));
        assert_eq!(slid.mask().unwrap().p2, (640.0, 720.0));
    }

    #[test]
    fn test_slide_replaces_previous_slide() {
        let once = slidein_transition(clip(10.0), 1.0, Side::Left).unwrap();
        let twice = slidein_transition(once, 1.0, Side::Right).unwrap();
        assert_eq!(twice.effects.len(), 2);
        assert_eq!(twice.motion().unwrap().side, Side::Right);
    }

    #[test]
    fn test_apply_transition_requires_side_for_slides() {
        assert!(apply_transition(clip(5.0), TransitionKind::SlideIn, 1.0, None).is_err());
        assert!(apply_transition(clip(5.0), TransitionKind::FadeIn, 1.0, None).is_ok());
        let slid =
            apply_transition(clip(5.0), TransitionKind::SlideOut, 1.0, Some(Side::Bottom)).unwrap();
        assert_eq!(slid.motion().unwrap().direction, SlideDirection::Out);
    }
}
