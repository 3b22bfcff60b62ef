//! Exclusion filters: commands matching any of these are never logged

use regex::Regex;
use std::fmt::Write as _;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

use crate::error::FilterError;

pub(crate) const DEFAULT_FILTERS: [&str; 2] = ["^ *ls? -[thlroa]* *$", "^ *l[shla]* *$"];

const FILE_HEADER: &str = "\
# cmdlog log line filter file. One regular expression filter per line.
# Syntax: empty, whitespace and lines starting with # are ignored.
";

#[derive(Debug, Clone)]
pub(crate) struct ExclusionFilters {
    filters: Vec<Regex>,
}

impl Default for ExclusionFilters {
    fn default() -> Self {
        let filters = DEFAULT_FILTERS
            .iter()
            .filter_map(|f| Regex::new(f).ok())
            .collect();
        Self { filters }
    }
}

impl ExclusionFilters {
    #[cfg(test)]
    pub(crate) fn none() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Load filters from `path`. A missing file keeps the defaults; every
    /// invalid expression is reported together with its line number.
    pub(crate) fn load(path: &Path) -> Result<Self, FilterError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no filter file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(FilterError::Io {
                    path: path.display().to_string(),
                    source,
                });
            }
        };

        let mut filters = Vec::new();
        let mut errors = String::new();
        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            match Regex::new(line) {
                Ok(re) => filters.push(re),
                Err(e) => {
                    let _ = writeln!(
                        errors,
                        "{}:{}: Invalid regexp: \"{}\": {}",
                        path.display(),
                        idx + 1,
                        line,
                        e
                    );
                }
            }
        }

        if !errors.is_empty() {
            return Err(FilterError::Invalid(errors));
        }
        debug!(path = %path.display(), count = filters.len(), "loaded exclusion filters");
        Ok(Self { filters })
    }

    /// Write the defaults as an example file, unless one already exists
    pub(crate) fn save_defaults(path: &Path) -> Result<(), FilterError> {
        if path.exists() {
            return Ok(());
        }
        let io_err = |source: std::io::Error| FilterError::Io {
            path: path.display().to_string(),
            source,
        };

        let mut content = String::from(FILE_HEADER);
        for filter in DEFAULT_FILTERS {
            content.push_str(filter);
            content.push('\n');
        }
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, content).map_err(io_err)
    }

    pub(crate) fn excludes(&self, command: &str) -> bool {
        self.filters.iter().any(|re| re.is_match(command))
    }

    pub(crate) fn patterns(&self) -> impl Iterator<Item = &str> {
        self.filters.iter().map(Regex::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_exclude_plain_listings() {
        let filters = ExclusionFilters::default();
        for cmd in ["ls", "l", "ll", "la", "ls -lh", "  ls -ltra  "] {
            assert!(filters.excludes(cmd), "{cmd:?}");
        }
        for cmd in ["ls src", "less file", "ls -lh cmdlog", "cargo build"] {
            assert!(!filters.excludes(cmd), "{cmd:?}");
        }
    }

    #[test]
    fn missing_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let filters = ExclusionFilters::load(&dir.path().join("nope")).unwrap();
        assert_eq!(filters.patterns().collect::<Vec<_>>(), DEFAULT_FILTERS);
    }

    #[test]
    fn load_skips_comments_and_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filters");
        fs::write(&path, "# comment\n\n   \n^git status$\n  # indented comment\n^pwd$\n").unwrap();
        let filters = ExclusionFilters::load(&path).unwrap();
        assert_eq!(filters.patterns().collect::<Vec<_>>(), vec!["^git status$", "^pwd$"]);
        assert!(filters.excludes("pwd"));
        assert!(!filters.excludes("ls"));
    }

    #[test]
    fn invalid_expressions_are_all_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filters");
        fs::write(&path, "^ok$\n[\n(\n").unwrap();
        let err = ExclusionFilters::load(&path).unwrap_err();
        let FilterError::Invalid(msg) = err else {
            panic!("expected invalid filter error");
        };
        assert!(msg.contains(":2: Invalid regexp: \"[\""));
        assert!(msg.contains(":3: Invalid regexp: \"(\""));
    }

    #[test]
    fn save_defaults_round_trips_and_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("filters");
        ExclusionFilters::save_defaults(&path).unwrap();
        let loaded = ExclusionFilters::load(&path).unwrap();
        assert_eq!(loaded.patterns().collect::<Vec<_>>(), DEFAULT_FILTERS);

        fs::write(&path, "^custom$\n").unwrap();
        ExclusionFilters::save_defaults(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "^custom$\n");
    }
}
