//! ReelPick CLI Library
//!
//! Clip selection with cached previews, plus fade and slide transitions
//! compiled to FFmpeg filter graphs.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod error;
pub mod ports;
pub mod transitions;
pub mod utils;

// Re-export commonly used types
pub use adapters::toml_config::AppConfig;
pub use domain::errors::DomainError;
pub use domain::model::{
    ClipInfo, ConcatMode, DownloadRequest, EncodeSettings, PreviewJob, Side, TimeSpec,
    TransitionKind, VideoAspect, VideoParams, VideoSource,
};
pub use domain::session::{
    CellPreview, GridCell, PreviewStatus, SelectionEntry, SelectionGrid, SelectionSession,
    SelectionState,
};
pub use error::{ReelPickError, ReelPickResult};
pub use transitions::{
    apply_transition, fadein_transition, fadeout_transition, slidein_transition,
    slideout_transition, Clip, ClipEffect,
};
