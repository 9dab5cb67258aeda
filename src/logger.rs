//! Operational logging via log4rs: a rolling `app` log (root) plus an
//! `audit` log for write operations (target `shelterlite::audit`, kept out
//! of the app log).

use log::LevelFilter;
use log4rs::append::rolling_file::RollingFileAppender;
use log4rs::append::rolling_file::policy::compound::{
    CompoundPolicy, roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger,
};
use log4rs::config::{Appender, Config, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::path::PathBuf;

const ROLL_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Configure logging globally for the process. If log4rs is already
/// initialized the call is a no-op.
/// - `dir`: base directory for log files; current directory if `None`.
/// - `level`: error|warn|info|debug|trace
/// - `retention`: number of rolled files to keep (default 7)
pub fn configure_logging(
    dir: Option<&std::path::Path>,
    level: Option<&str>,
    retention: Option<usize>,
) {
    let base = dir
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
    let keep = retention.unwrap_or(7) as u32;
    let lvl = match level.unwrap_or("info").to_ascii_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    };
    let enc_pattern = "{d(%Y-%m-%d %H:%M:%S%.3f)} [{l}] {t} - {m}{n}";

    let Ok(app_roller) =
        FixedWindowRoller::builder().build(&format!("{}", base.join("app.{}.log").display()), keep)
    else {
        return;
    };
    let app_policy =
        CompoundPolicy::new(Box::new(SizeTrigger::new(ROLL_SIZE_BYTES)), Box::new(app_roller));
    let Ok(app_appender) = RollingFileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(enc_pattern)))
        .build(base.join("app.log"), Box::new(app_policy))
    else {
        return;
    };

    let Ok(audit_roller) = FixedWindowRoller::builder()
        .build(&format!("{}", base.join("audit.{}.log").display()), keep)
    else {
        return;
    };
    let audit_policy =
        CompoundPolicy::new(Box::new(SizeTrigger::new(ROLL_SIZE_BYTES)), Box::new(audit_roller));
    let Ok(audit_appender) = RollingFileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(enc_pattern)))
        .build(base.join("audit.log"), Box::new(audit_policy))
    else {
        return;
    };

    let config = Config::builder()
        .appender(Appender::builder().build("app", Box::new(app_appender)))
        .appender(Appender::builder().build("audit", Box::new(audit_appender)))
        .logger(
            Logger::builder().appender("audit").additive(false).build("shelterlite::audit", lvl),
        )
        .build(Root::builder().appender("app").build(lvl));
    if let Ok(config) = config {
        let _ = log4rs::init_config(config);
    }
}

/// Configure logging from environment variables if present:
/// - `SHELTERLITE_LOG_DIR`
/// - `SHELTERLITE_LOG_LEVEL`
/// - `SHELTERLITE_LOG_RETENTION`
pub fn configure_from_env() {
    let dir = std::env::var("SHELTERLITE_LOG_DIR").ok().map(std::path::PathBuf::from);
    let level = std::env::var("SHELTERLITE_LOG_LEVEL").ok();
    let retention =
        std::env::var("SHELTERLITE_LOG_RETENTION").ok().and_then(|s| s.parse::<usize>().ok());
    configure_logging(dir.as_deref(), level.as_deref(), retention);
}
