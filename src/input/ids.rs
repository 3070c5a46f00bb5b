//! Parsing of whitespace separated id lists.

use std::collections::BTreeSet;
use std::fmt;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, warn};

use super::InputError;

/// Ids read from one source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdList {
    /// Distinct ids, in ascending order.
    pub ids: BTreeSet<u64>,
    /// Number of tokens accepted, duplicates included.
    pub tokens: usize,
    /// The token at which parsing stopped, if the input was not fully valid.
    pub stopped_at: Option<String>,
}

impl IdList {
    /// Returns true if no ids were read.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns the number of distinct ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns how many accepted tokens repeated an earlier id.
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.tokens - self.ids.len()
    }
}

impl fmt::Display for IdList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ids ({} duplicates)",
            self.ids.len(),
            self.duplicate_count()
        )
    }
}

/// Parses whitespace separated unsigned 64-bit ids.
///
/// Parsing stops at the first token that is not a valid id. Ids read before
/// that token are kept and the offending token is recorded in
/// [`IdList::stopped_at`].
#[must_use]
pub fn parse_ids(text: &str) -> IdList {
    let mut list = IdList::default();

    for token in text.split_whitespace() {
        match token.parse::<u64>() {
            Ok(id) => {
                list.ids.insert(id);
                list.tokens += 1;
            }
            Err(_) => {
                list.stopped_at = Some(token.to_string());
                break;
            }
        }
    }

    list
}

/// Loads an id file.
///
/// A missing file yields an empty list.
///
/// # Errors
///
/// Returns [`InputError::Io`] if the file exists but cannot be read.
pub fn load_id_file(path: &Path) -> Result<IdList, InputError> {
    let text = match std::fs::read(path) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "id file not found, treating as empty");
            return Ok(IdList::default());
        }
        Err(e) => return Err(InputError::io(path, e)),
    };

    let list = parse_ids(&text);
    if let Some(token) = &list.stopped_at {
        warn!(
            path = %path.display(),
            token = %token,
            loaded = list.len(),
            "Stopped reading ids at invalid token"
        );
    }
    Ok(list)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_ids_collapses_duplicates() {
        let list = parse_ids("10\n10\n20");
        assert_eq!(list.ids.iter().copied().collect::<Vec<_>>(), vec![10, 20]);
        assert_eq!(list.tokens, 3);
        assert_eq!(list.duplicate_count(), 1);
    }

    #[test]
    fn test_parse_ids_accepts_mixed_whitespace() {
        let list = parse_ids("  1\t2\r\n3   4\n\n");
        assert_eq!(list.len(), 4);
        assert!(list.stopped_at.is_none());
    }

    #[test]
    fn test_parse_ids_empty_input() {
        let list = parse_ids("");
        assert!(list.is_empty());
        assert_eq!(list.tokens, 0);
    }

    #[test]
    fn test_parse_ids_stops_at_invalid_token() {
        let list = parse_ids("5 6 seven 8");
        assert_eq!(list.ids.iter().copied().collect::<Vec<_>>(), vec![5, 6]);
        assert_eq!(list.stopped_at.as_deref(), Some("seven"));
    }

    #[test]
    fn test_parse_ids_rejects_negative_and_overflow() {
        let list = parse_ids("-1");
        assert!(list.is_empty());
        assert_eq!(list.stopped_at.as_deref(), Some("-1"));

        let list = parse_ids("18446744073709551615 18446744073709551616");
        assert_eq!(list.ids.iter().copied().collect::<Vec<_>>(), vec![u64::MAX]);
        assert_eq!(list.stopped_at.as_deref(), Some("18446744073709551616"));
    }

    #[test]
    fn test_parse_ids_zero_is_an_ordinary_id() {
        let list = parse_ids("0 3");
        assert!(list.ids.contains(&0));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_parse_ids_is_order_independent() {
        assert_eq!(parse_ids("3 1 2").ids, parse_ids("2 3 1 1").ids);
    }

    #[test]
    fn test_load_id_file_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let list = load_id_file(&dir.path().join("absent.txt")).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn test_load_id_file_reads_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("addons.txt");
        std::fs::write(&path, "100\n200\n100\n").unwrap();

        let list = load_id_file(&path).unwrap();
        assert_eq!(list.len(), 2);

        let again = load_id_file(&path).unwrap();
        assert_eq!(list, again);
    }

    #[test]
    fn test_load_id_file_directory_is_io_error() {
        let dir = TempDir::new().unwrap();
        let result = load_id_file(dir.path());
        assert!(matches!(result, Err(InputError::Io { .. })));
    }

    #[test]
    fn test_id_list_display() {
        assert_eq!(parse_ids("1 1 2").to_string(), "2 ids (1 duplicates)");
    }
}
