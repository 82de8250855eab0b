pub mod api;
pub mod core;

pub use crate::core::clock::{ClockError, TimeAnchor, TimeFrameMapper, Timestamp, TimestampExtractor};

pub fn init_logging() {
    #[cfg(target_os = "android")]
    {
        android_logger::init_once(
            android_logger::Config::default()
                .with_max_level(log::LevelFilter::Debug)
                .with_tag("frame_clock"),
        );
    }

    #[cfg(not(target_os = "android"))]
    {
        // RUST_LOG overrides; repeated calls are ignored
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .try_init();
    }
}
