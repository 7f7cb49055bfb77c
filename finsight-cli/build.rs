use std::path::Path;
use std::process::Command;

fn git_describe(repo_root: &Path) -> Option<String> {
    let out = Command::new("git")
        .arg("-C")
        .arg(repo_root)
        .args(["describe", "--always", "--dirty"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let s = String::from_utf8_lossy(&out.stdout).trim().to_string();
    (!s.is_empty()).then_some(s)
}

fn main() {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let repo_root = Path::new(&manifest_dir).join("..");

    println!("cargo:rerun-if-changed=../.git/HEAD");
    let build = git_describe(&repo_root).unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=FINSIGHT_BUILD_SHA={build}");
}
