use std::any::Any;
use std::future::Future as Future03;
use tokio::task::{JoinError, JoinHandle};

/// Spawns a task whose panic stays inside its `JoinHandle` instead of aborting the process.
pub fn spawn_allow_panic<T: Send + 'static>(
    f: impl Future03<Output = T> + Send + 'static,
) -> JoinHandle<T> {
    tokio::spawn(f)
}

/// Readable description of why a spawned task did not produce its output.
pub fn join_error_message(err: JoinError) -> String {
    if err.is_cancelled() {
        return "task was cancelled".to_string();
    }
    match err.try_into_panic() {
        Ok(payload) => format!("task panicked: {}", panic_payload_message(payload.as_ref())),
        Err(err) => format!("task failed: {}", err),
    }
}

fn panic_payload_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
