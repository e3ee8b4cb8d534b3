use std::env;
use std::process::Command;

const UNKNOWN: &str = "unknown";

fn main() {
    for watched in ["build.rs", ".git/HEAD", ".git/refs"] {
        println!("cargo:rerun-if-changed={watched}");
    }

    let rustc = env::var("RUSTC").unwrap_or_else(|_| "rustc".into());
    let embedded = [
        (
            "HASH",
            command_stdout("git", &["rev-parse", "--short", "HEAD"]).filter(|s| !s.is_empty()),
        ),
        (
            "STATUS",
            command_stdout("git", &["status", "--porcelain"]).map(|changes| {
                if changes.is_empty() { "clean" } else { "dirty" }.to_string()
            }),
        ),
        (
            "TIMESTAMP",
            Some(chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)),
        ),
        ("TARGET", env::var("TARGET").ok()),
        ("PROFILE", env::var("PROFILE").ok()),
        ("RUSTC", command_stdout(&rustc, &["--version"])),
    ];

    for (key, value) in embedded {
        let value = value.unwrap_or_else(|| UNKNOWN.to_string());
        println!("cargo:rustc-env=YEN_TRACKER_BUILD_{key}={value}");
    }
}

/// Trimmed stdout of a successful command.
fn command_stdout(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|text| text.trim().to_string())
}
