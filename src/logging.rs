use crate::config::Settings;
use log::LevelFilter;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

/// Level override read at startup.
pub const LOG_ENV: &str = "COREAPI_LOG";

// The terminal belongs to the UI, so everything goes to a file.
pub fn init(settings: &Settings) -> Result<(), fern::InitError> {
    let level = std::env::var(LOG_ENV)
        .ok()
        .and_then(|v| LevelFilter::from_str(&v).ok())
        .or_else(|| LevelFilter::from_str(&settings.log_level).ok())
        .unwrap_or(LevelFilter::Info);

    fern::Dispatch::new()
        .format(|out, message, record| {
            let ts = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default();
            out.finish(format_args!(
                "{} {:<5} [{}] {}",
                ts,
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(fern::log_file(settings.log_path())?)
        .apply()?;

    Ok(())
}
