use chrono::{FixedOffset, Utc};
use std::process::Command;
fn main() {
    // Missing git (or a tree without history) only drops the hash suffix.
    let git_hash = Command::new("git")
        .args(&["rev-parse", "HEAD"])
        .output()
        .ok()
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|hash| hash.trim().to_string())
        .unwrap_or_default();
    let now = Utc::now();
    let date = match FixedOffset::east_opt(7 * 60 * 60) {
        Some(offset) => now.with_timezone(&offset).format("%Y:%m:%d-%T").to_string(),
        None => now.format("%Y:%m:%d-%T").to_string(),
    };
    println!("cargo:rustc-env=BUILD_VERSION={}-{}", date, git_hash);
}
