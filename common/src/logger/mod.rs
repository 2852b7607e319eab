pub mod helper;

/**
 *** The file is to setup logger to either:
 *** - write to file
 *** - output to console
 *** The default option if RUST_LOG is not specified is INFO logging
 **/
use crate::logger::helper::{log_to_console, log_to_file, message};
use lazy_static::lazy_static;
use std::env;
use std::sync::atomic::{AtomicBool, Ordering};

static GLOBAL_INIT_LOGGING: AtomicBool = AtomicBool::new(false);

lazy_static! {
    static ref RUST_LOG: String = env::var("RUST_LOG").unwrap_or(String::from("info")); // If not specified, assume logging level is INFO
    static ref RUST_LOG_TYPE: String = env::var("RUST_LOG_TYPE").unwrap_or(String::from("console")); // If not specified, assume we're logging to console
}

pub fn init_logger(file_name: &String) -> String {
    if GLOBAL_INIT_LOGGING
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
    {
        return "Logging already inited".to_string();
    }

    let res = match RUST_LOG_TYPE.to_lowercase().as_str() {
        /* Logging to file */
        "file" => log_to_file(file_name, &RUST_LOG),
        /* Logging to console */
        "console" => log_to_console(&RUST_LOG),
        /* Not logging to anything */
        _ => return message(&Default::default(), &RUST_LOG),
    };
    match res {
        Ok(()) => message(&RUST_LOG_TYPE, &RUST_LOG),
        Err(err) => format!("Cannot init logger: {}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logger_once() {
        let _first = init_logger(&String::from("Testing"));
        assert_eq!(
            init_logger(&String::from("Testing")),
            "Logging already inited"
        );
    }
}
