use std::process::Command;

/// Runs git in the crate directory and returns trimmed stdout on success.
fn git_stdout(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|s| s.trim().to_string())
}

fn main() {
    println!("cargo::rerun-if-changed=.git/HEAD");
    println!("cargo::rerun-if-changed=.git/refs/heads");

    let revision = git_stdout(&["rev-parse", "--short=8", "HEAD"])
        .filter(|rev| !rev.is_empty())
        .unwrap_or_else(|| "unknown".to_string());

    let dirty = git_stdout(&["status", "--porcelain"]).is_some_and(|status| !status.is_empty());

    // Shown by `unmerged-commits --version`
    println!(
        "cargo::rustc-env=BUILD_REVISION={}{}",
        revision,
        if dirty { "-dirty" } else { "" }
    );
}
