use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

pub(crate) fn create_test_repo() -> TempDir {
    create_repo(CreateRepoOptions {
        commits: 1,
        add_origin_remote: false,
    })
}

pub(crate) fn create_test_repo_with_remote() -> TempDir {
    create_repo(CreateRepoOptions {
        commits: 2,
        add_origin_remote: true,
    })
}

struct CreateRepoOptions {
    commits: usize,
    add_origin_remote: bool,
}

fn create_repo(opts: CreateRepoOptions) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path();

    git(path, &["init"]);
    // Ensure the repo uses a deterministic default branch name across environments.
    // This sets HEAD to an unborn `main` branch before the first commit.
    git(path, &["symbolic-ref", "HEAD", "refs/heads/main"]);

    git(path, &["config", "user.email", "test@example.com"]);
    git(path, &["config", "user.name", "Test User"]);
    git(path, &["config", "commit.gpgsign", "false"]);

    std::fs::write(path.join("README.md"), "# Test\n").unwrap();
    git(path, &["add", "."]);
    git(path, &["commit", "-m", "Initial commit"]);

    for i in 2..=opts.commits {
        commit_file(path, &format!("file{}.txt", i), &format!("Commit {}", i));
    }

    if opts.add_origin_remote {
        // Remote pointing to itself: every local branch is also a remote head.
        let path_str = path.to_string_lossy().to_string();
        git(path, &["remote", "add", "origin", &path_str]);
    }

    temp_dir
}

/// Write `file` and commit it on the checked-out branch with `message`.
pub(crate) fn commit_file(repo_dir: &Path, file: &str, message: &str) {
    std::fs::write(repo_dir.join(file), format!("{}\n", message)).unwrap();
    git(repo_dir, &["add", file]);
    git(repo_dir, &["commit", "-m", message]);
}

/// Trimmed stdout of a git command that must succeed.
pub(crate) fn git_stdout(repo_dir: &Path, args: &[&str]) -> String {
    let output = git(repo_dir, args);
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

pub(crate) fn git(repo_dir: &Path, args: &[&str]) -> std::process::Output {
    let output = Command::new("git")
        .current_dir(repo_dir)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to execute git {}: {}", args.join(" "), e));

    if !output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!(
            "git {} failed (exit code {:?})\nstdout:\n{}\nstderr:\n{}",
            args.join(" "),
            output.status.code(),
            stdout,
            stderr
        );
    }

    output
}
