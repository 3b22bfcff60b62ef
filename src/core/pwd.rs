//! Working-directory inference
//!
//! Each session starts in the home directory and its commands are replayed in
//! file order: `cd`, `s` (one level up) and shell-session banners move the
//! current directory, anything else leaves it alone.

use path_clean::clean;
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::core::DisplayRecord;

const SESSION_START: &str = "Started shell session: ";

fn expand_home(arg: &str, home: &Path) -> PathBuf {
    if arg == "~" {
        return home.to_path_buf();
    }
    match arg.strip_prefix("~/") {
        Some(rest) => home.join(rest),
        None => PathBuf::from(arg),
    }
}

/// Directory after running `command` in `previous`
pub(crate) fn next_directory(previous: &Path, command: &str, home: &Path) -> PathBuf {
    let target = if command == "s" {
        Some(PathBuf::from(".."))
    } else if command.starts_with(SESSION_START) {
        command
            .split_whitespace()
            .nth(3)
            .map(|arg| expand_home(arg, home))
    } else if command.starts_with("cd") {
        Some(
            command
                .split_whitespace()
                .nth(1)
                .map_or_else(|| home.to_path_buf(), |arg| expand_home(arg, home)),
        )
    } else {
        None
    };

    match target {
        Some(target) if target.is_absolute() => clean(target),
        Some(target) => clean(previous.join(target)),
        None => clean(previous),
    }
}

/// Fill in `cwd` for every kept record.
///
/// `reversed` says the records are stored in reverse file order, in which
/// case each session is replayed from the highest index down.
pub(crate) fn resolve_directories(records: &mut [DisplayRecord], home: &Path, reversed: bool) {
    let resolved: Vec<(usize, String)> = {
        let records: &[DisplayRecord] = records;
        let mut sessions: HashMap<&str, Vec<usize>> = HashMap::new();
        let mut push = |idx: usize| {
            let record = &records[idx];
            if record.is_kept() {
                sessions.entry(record.session.as_str()).or_default().push(idx);
            }
        };
        if reversed {
            (0..records.len()).rev().for_each(&mut push);
        } else {
            (0..records.len()).for_each(&mut push);
        }

        // Sessions are independent; within one the walk is strictly sequential
        sessions
            .into_par_iter()
            .flat_map_iter(|(_, indices)| {
                let mut cwd = clean(home);
                indices.into_iter().map(move |idx| {
                    cwd = next_directory(&cwd, &records[idx].command, home);
                    (idx, cwd.to_string_lossy().trim().to_string())
                })
            })
            .collect()
    };

    for (idx, cwd) in resolved {
        records[idx].cwd = cwd;
    }
}
