//! Compile clip effects into an FFmpeg `filter_complex` graph

use crate::transitions::clip::{Clip, ClipEffect};
use crate::transitions::mask::fmt_num;

/// Output pad label of the compiled graph
pub const OUTPUT_LABEL: &str = "vout";

impl Clip {
    /// Filter graph reading `[0:v]` and producing `[vout]`
    pub fn filter_graph(&self) -> String {
        let mut chain: Vec<String> = Vec::new();

        for effect in &self.effects {
            match effect {
                ClipEffect::FadeIn { duration } => {
                    chain.push(format!("fade=t=in:st=0:d={}", fmt_num(*duration)));
                }
                ClipEffect::FadeOut { start, duration } => {
                    chain.push(format!(
                        "fade=t=out:st={}:d={}",
                        fmt_num(*start),
                        fmt_num(*duration)
                    ));
                }
                ClipEffect::Mask(_) | ClipEffect::Slide(_) => {}
            }
        }

        if let Some(mask) = self.mask() {
            chain.push("format=yuva420p".to_string());
            chain.push(format!(
                "geq=lum='lum(X,Y)':cb='cb(X,Y)':cr='cr(X,Y)':a='{}'",
                mask.alpha_expr()
            ));
        }

        match self.motion() {
            Some(motion) => {
                let (x, y) = motion.overlay_exprs();
                let foreground = if chain.is_empty() {
                    "null".to_string()
                } else {
                    chain.join(",")
                };
                format!(
                    "[0:v]{fg}[fg];color=c=black:s={w}x{h}:d={d}[bg];[bg][fg]overlay=x='{x}':y='{y}':eval=frame:shortest=1,format=yuv420p[{out}]",
                    fg = foreground,
                    w = self.width,
                    h = self.height,
                    d = fmt_num(self.duration),
                    x = x,
                    y = y,
                    out = OUTPUT_LABEL,
                )
            }
            None => {
                chain.push("format=yuv420p".to_string());
                format!("[0:v]{}[{}]", chain.join(","), OUTPUT_LABEL)
            }
        }
    }
}
