use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

const LOG: &str = "\
1450120005\tzsh-1\tcd /tmp
1450120010\tzsh-2\tgo test ./...
1450120020\tzsh-1\tmake
1450120030\tzsh-2\tgo vet && go test
";

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("cmdlog-{prefix}-{}-{nanos}", std::process::id()));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dirs");
    }
    fs::write(path, content).expect("write test file");
}

fn bin() -> String {
    std::env::var("CARGO_BIN_EXE_cmdlog").unwrap_or_else(|_| {
        let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        path.push("target");
        path.push("debug");
        if cfg!(windows) {
            path.push("cmdlog.exe");
        } else {
            path.push("cmdlog");
        }
        path.to_string_lossy().into_owned()
    })
}

/// Command with an isolated home, so no user config or log leaks in
fn command(root: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::new(bin());
    cmd.args(args)
        .env("HOME", root)
        .env("XDG_CONFIG_HOME", root.join("config"))
        .env("CMDLOG_FILE", root.join("log"))
        .env("CMDLOG_FILTERS", root.join("filters"))
        .env_remove("CMDLOG_PWD")
        .env_remove("CMDLOG_REVERSE")
        .env_remove("CMDLOG_SESSION")
        .env_remove("CMDLOG_SINCE")
        .env_remove("CMDLOG_GREP");
    cmd
}

fn run_cmdlog(root: &Path, args: &[&str]) -> (bool, String, String) {
    let output = command(root, args).output().expect("run cmdlog");
    (
        output.status.success(),
        String::from_utf8_lossy(&output.stdout).into_owned(),
        String::from_utf8_lossy(&output.stderr).into_owned(),
    )
}

fn with_log(prefix: &str) -> PathBuf {
    let root = unique_temp_dir(prefix);
    write_file(&root.join("log"), LOG);
    root
}

#[test]
fn report_prints_every_record_in_file_order() {
    let root = with_log("report");
    let (ok, stdout, stderr) = run_cmdlog(&root, &["report", "--timezone", "UTC"]);
    assert!(ok, "stderr: {stderr}");
    assert_eq!(
        stdout,
        "zsh-1 2015-12-14T19:06:45\tcd /tmp\n\
         zsh-2 2015-12-14T19:06:50\tgo test ./...\n\
         zsh-1 2015-12-14T19:07:00\tmake\n\
         zsh-2 2015-12-14T19:07:10\tgo vet && go test\n"
    );
}

#[test]
fn report_session_filter_hides_session_column() {
    let root = with_log("session");
    let (ok, stdout, stderr) =
        run_cmdlog(&root, &["report", "--timezone", "UTC", "--session", "zsh-1"]);
    assert!(ok, "stderr: {stderr}");
    assert_eq!(
        stdout,
        "2015-12-14T19:06:45\tcd /tmp\n2015-12-14T19:07:00\tmake\n"
    );
}

#[test]
fn report_grep_and_since() {
    let root = with_log("grep");
    let (ok, stdout, stderr) = run_cmdlog(
        &root,
        &["report", "--timezone", "UTC", "--grep", "go test", "-d", "1450120020"],
    );
    assert!(ok, "stderr: {stderr}");
    assert_eq!(stdout, "zsh-2 2015-12-14T19:07:10\tgo vet && go test\n");
}

#[test]
fn report_reverse_from_file_and_from_stdin_agree() {
    let root = with_log("reverse");
    let (ok, from_file, stderr) = run_cmdlog(&root, &["report", "--timezone", "UTC", "-r"]);
    assert!(ok, "stderr: {stderr}");
    let commands: Vec<&str> = from_file
        .lines()
        .map(|l| l.rsplit('\t').next().unwrap())
        .collect();
    assert_eq!(commands, vec!["go vet && go test", "make", "go test ./...", "cd /tmp"]);

    let mut child = command(&root, &["-f", "-", "report", "--timezone", "UTC", "-r"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn cmdlog");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(LOG.as_bytes())
        .expect("feed stdin");
    let output = child.wait_with_output().expect("wait cmdlog");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), from_file);
}

#[test]
fn report_pwd_tracks_cd_per_session() {
    let root = with_log("pwd");
    let (ok, stdout, stderr) = run_cmdlog(
        &root,
        &["report", "--timezone", "UTC", "--pwd", "--session", "zsh-1"],
    );
    assert!(ok, "stderr: {stderr}");
    assert_eq!(
        stdout,
        "2015-12-14T19:06:45\t/tmp\tcd /tmp\n2015-12-14T19:07:00\t/tmp\tmake\n"
    );

    let (ok, reversed, stderr) = run_cmdlog(
        &root,
        &["report", "--timezone", "UTC", "--pwd", "-r", "--session", "zsh-1"],
    );
    assert!(ok, "stderr: {stderr}");
    assert_eq!(
        reversed,
        "2015-12-14T19:07:00\t/tmp\tmake\n2015-12-14T19:06:45\t/tmp\tcd /tmp\n"
    );
}

#[test]
fn report_rejects_invalid_grep() {
    let root = with_log("bad-grep");
    let (ok, stdout, stderr) = run_cmdlog(&root, &["report", "--grep", "["]);
    assert!(!ok);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Failed to compile grep pattern"), "stderr: {stderr}");
}

#[test]
fn report_rejects_invalid_since() {
    let root = with_log("bad-since");
    let (ok, _, stderr) = run_cmdlog(&root, &["report", "--since", "jeejee"]);
    assert!(!ok);
    assert!(stderr.contains(r#"Invalid since "jeejee""#), "stderr: {stderr}");
}

#[test]
fn report_missing_log_fails() {
    let root = unique_temp_dir("missing");
    let (ok, _, stderr) = run_cmdlog(&root, &["report"]);
    assert!(!ok);
    assert!(stderr.contains("Could not open file"), "stderr: {stderr}");
}

#[test]
fn log_appends_and_applies_default_filters() {
    let root = unique_temp_dir("log");
    let (ok, _, stderr) = run_cmdlog(&root, &["log", "zsh-9", "echo", "hello"]);
    assert!(ok, "stderr: {stderr}");
    let (ok, _, stderr) = run_cmdlog(&root, &["log", "zsh-9", "ls", "-la"]);
    assert!(ok, "stderr: {stderr}");

    let content = fs::read_to_string(root.join("log")).expect("read log");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 1);
    let fields: Vec<&str> = lines[0].splitn(3, '\t').collect();
    assert!(fields[0].parse::<i64>().is_ok());
    assert_eq!(&fields[1..], &["zsh-9", "echo hello"]);
}

#[test]
fn filters_writes_and_prints_defaults() {
    let root = unique_temp_dir("filters");
    let (ok, stdout, stderr) = run_cmdlog(&root, &["filters"]);
    assert!(ok, "stderr: {stderr}");
    assert_eq!(stdout, "^ *ls? -[thlroa]* *$\n^ *l[shla]* *$\n");
    let saved = fs::read_to_string(root.join("filters")).expect("filter file");
    assert!(saved.starts_with("# cmdlog log line filter file."));
}
