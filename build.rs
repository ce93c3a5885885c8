//! Build script for Snip.
//!
//! Embeds the git commit and commit date so the window title can show
//! which build is running. Both fall back to empty strings outside a
//! git checkout (crates.io tarballs, vendored sources).

use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs");

    let commit = git(&["rev-parse", "--short", "HEAD"]);
    let date = git(&["log", "-1", "--format=%cs"]);

    println!("cargo:rustc-env=SNIP_GIT_COMMIT={}", commit);
    println!("cargo:rustc-env=SNIP_BUILD_DATE={}", date);
}

/// Run a git subcommand and return its trimmed stdout, or "" on any failure.
fn git(args: &[&str]) -> String {
    Command::new("git")
        .args(args)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}
