use anyhow::Error;
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::rolling_file::policy::compound::roll::fixed_window::FixedWindowRoller;
use log4rs::append::rolling_file::policy::compound::trigger::size::SizeTrigger;
use log4rs::append::rolling_file::policy::compound::CompoundPolicy;
use log4rs::append::rolling_file::RollingFileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::str::FromStr;

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} {h({l:<5})} [{T}] {t} - {m}{n}";
const LOG_DIR: &str = "logs";
const LOG_FILE_SIZE_LIMIT: u64 = 50 * 1024 * 1024;
const LOG_FILE_COUNT: u32 = 5;

pub fn parse_level(level: &str) -> LevelFilter {
    LevelFilter::from_str(level).unwrap_or(LevelFilter::Info)
}

/// Console output goes to stderr so that reports printed on stdout stay clean.
pub fn log_to_console(level: &String) -> Result<(), Error> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(parse_level(level)))?;
    log4rs::init_config(config)?;
    Ok(())
}

pub fn log_to_file(file_name: &String, level: &String) -> Result<(), Error> {
    let roller = FixedWindowRoller::builder()
        .build(&format!("{}/{}.{{}}.log", LOG_DIR, file_name), LOG_FILE_COUNT)?;
    let policy = CompoundPolicy::new(
        Box::new(SizeTrigger::new(LOG_FILE_SIZE_LIMIT)),
        Box::new(roller),
    );
    let file = RollingFileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build(format!("{}/{}.log", LOG_DIR, file_name), Box::new(policy))?;
    let config = Config::builder()
        .appender(Appender::builder().build("file", Box::new(file)))
        .build(Root::builder().appender("file").build(parse_level(level)))?;
    log4rs::init_config(config)?;
    Ok(())
}

pub fn message(log_type: &String, level: &String) -> String {
    if log_type.is_empty() {
        format!("Logging is disabled (level {})", level)
    } else {
        format!("Logging to {} with level {}", log_type, level)
    }
}

#[test]
fn test_parse_level() {
    assert_eq!(parse_level("debug"), LevelFilter::Debug);
    assert_eq!(parse_level("WARN"), LevelFilter::Warn);
    assert_eq!(parse_level("loud"), LevelFilter::Info);
}
