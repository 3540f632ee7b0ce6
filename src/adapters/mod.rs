// Adapters - External system implementations

pub mod exec_ffmpeg;
pub mod fs_local;
pub mod material_local;
pub mod probe_ffprobe;
#[cfg(feature = "libav")]
pub mod probe_libav;
pub mod session_json;
pub mod task_dir;
pub mod toml_config;
pub mod tracing_log;

// Re-export adapters
pub use exec_ffmpeg::FFmpegAdapter;
pub use fs_local::FsLocalAdapter;
pub use material_local::LocalMaterialAdapter;
pub use probe_ffprobe::FFprobeAdapter;
#[cfg(feature = "libav")]
pub use probe_libav::ProbeLibavAdapter;
pub use session_json::JsonSessionStore;
pub use task_dir::TaskDirAdapter;
pub use toml_config::{AppConfig, ProbeBackend};
pub use tracing_log::TracingLogAdapter;
