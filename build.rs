use std::path::Path;
use std::process::Command;

fn main() {
    let describe = git(&["describe", "--always", "--dirty=-modified"])
        .or_else(|| git(&["rev-parse", "--short", "HEAD"]))
        .unwrap_or_else(|| "unknown".into());

    println!("cargo:rustc-env=WHITEBOARD_GIT_HASH={describe}");

    // A worktree checkout has `.git` as a file; only watch real git dirs.
    let git_dir = Path::new(".git");
    if git_dir.is_dir() {
        for entry in ["HEAD", "index", "refs"] {
            let path = git_dir.join(entry);
            if path.exists() {
                println!("cargo:rerun-if-changed={}", path.display());
            }
        }
    }
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!text.is_empty()).then_some(text)
}
