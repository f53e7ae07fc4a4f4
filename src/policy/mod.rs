//! Keyword retrieval over the payroll policy file.
//!
//! The policy file holds one rule per line. Lines are ranked by how many
//! query words they share and the best ones are used as model context or
//! shown directly to the user.
//!
//! An index loaded from a file is re-read on every query through
//! [`PolicyIndex::refreshed`], so edits to the file apply without a restart.

use std::borrow::Cow;
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::{EngineError, EngineResult};

/// Number of lines returned when the caller does not choose.
pub const DEFAULT_TOP_N: usize = 6;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\W+").expect("invalid word separator pattern"));

/// Lowercase word tokens longer than two characters.
fn keywords(text: &str) -> HashSet<String> {
    NON_WORD
        .split(&text.to_lowercase())
        .filter(|word| word.chars().count() > 2)
        .map(str::to_string)
        .collect()
}

/// In-memory index of policy lines.
#[derive(Debug, Clone, Default)]
pub struct PolicyIndex {
    lines: Vec<String>,
    source: Option<PathBuf>,
}

impl PolicyIndex {
    /// Loads the policy file at `path`.
    ///
    /// A missing file gives an empty index.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::PolicyRead`] when the file exists but cannot be
    /// read.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let mut index = match fs::read_to_string(path) {
            Ok(text) => {
                let index = Self::from_text(&text);
                debug!(path = %path.display(), lines = index.len(), "Loaded policy file");
                index
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "Policy file not found, using empty index");
                Self::default()
            }
            Err(e) => {
                return Err(EngineError::PolicyRead {
                    path: path.display().to_string(),
                    message: e.to_string(),
                });
            }
        };
        index.source = Some(path.to_path_buf());
        Ok(index)
    }

    /// The file this index was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Returns the index as it stands on disk now.
    ///
    /// An index loaded from a file is read again; one built from text is
    /// returned as is.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::PolicyRead`] when the file exists but cannot be
    /// read.
    pub fn refreshed(&self) -> EngineResult<Cow<'_, Self>> {
        match &self.source {
            Some(path) => Self::load(path).map(Cow::Owned),
            None => Ok(Cow::Borrowed(self)),
        }
    }

    /// Builds an index from policy text. Lines are trimmed and blank lines
    /// dropped.
    pub fn from_text(text: &str) -> Self {
        let lines = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        Self {
            lines,
            source: None,
        }
    }

    /// Number of policy lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True when there are no policy lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns up to `top_n` lines ranked by shared keywords with `query`.
    ///
    /// Lines with equal scores keep their file order. Lines sharing no
    /// keyword can still be returned when fewer than `top_n` lines score.
    pub fn top_lines(&self, query: &str, top_n: usize) -> Vec<&str> {
        let query_words = keywords(query);

        let mut scored: Vec<(usize, &str)> = self
            .lines
            .iter()
            .map(|line| {
                let line_words = keywords(line);
                let score = query_words
                    .iter()
                    .filter(|w| line_words.contains(*w))
                    .count();
                (score, line.as_str())
            })
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        scored.into_iter().take(top_n).map(|(_, line)| line).collect()
    }

    /// Returns the [`top_lines`](Self::top_lines) joined with newlines.
    ///
    /// An empty index gives an empty string.
    ///
    /// # Example
    ///
    /// ```
    /// use weekly_wage::policy::PolicyIndex;
    ///
    /// let index = PolicyIndex::from_text(
    ///     "Half day pays half the daily rate.\nOvertime rate is daily rate divided by 8.\n",
    /// );
    /// assert_eq!(
    ///     index.retrieve("overtime rate?", 1),
    ///     "Overtime rate is daily rate divided by 8."
    /// );
    /// ```
    pub fn retrieve(&self, query: &str, top_n: usize) -> String {
        self.top_lines(query, top_n).join("\n")
    }
}
