//! Object storage key naming and upload limits.
//!
//! Keys have the form `{unix_millis}_{file_name}` and sort by upload time.
//! Two uploads of the same name within one millisecond get the same key;
//! the unique `file_metadata.storage_key` index decides which one wins.

use crate::error::CoreError;
use crate::types::Timestamp;

/// Default maximum size of a server-side (legacy) upload: 20 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Maximum length of the file-name part of a key.
pub const MAX_FILE_NAME_LEN: usize = 200;

/// Replace characters that are awkward in object keys and URLs.
///
/// Keeps ASCII alphanumerics, `.`, `-` and `_`; everything else becomes `_`.
/// Non-ASCII letters (e.g. Japanese file names) are kept as-is.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name).trim();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') || !c.is_ascii() {
                c
            } else {
                '_'
            }
        })
        .take(MAX_FILE_NAME_LEN)
        .collect();
    let cleaned = cleaned.trim_start_matches('.').to_string();
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned
    }
}

/// Build the storage key for a file uploaded at `now`.
pub fn storage_key(now: Timestamp, file_name: &str) -> String {
    format!("{}_{}", now.timestamp_millis(), sanitize_file_name(file_name))
}

/// Reject keys that were not produced by [`storage_key`].
pub fn validate_storage_key(key: &str) -> Result<(), CoreError> {
    let valid = key
        .split_once('_')
        .is_some_and(|(millis, rest)| {
            !millis.is_empty() && millis.bytes().all(|b| b.is_ascii_digit()) && !rest.is_empty()
        })
        && !key.contains('/')
        && !key.contains("..");
    if valid {
        Ok(())
    } else {
        Err(CoreError::Validation(format!("Invalid storage key '{key}'")))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn key_is_millis_underscore_name() {
        let now = Utc.timestamp_millis_opt(1_760_000_000_123).unwrap();
        assert_eq!(storage_key(now, "photo.jpg"), "1760000000123_photo.jpg");
    }

    #[test]
    fn same_millisecond_same_name_shares_a_key() {
        let now = Utc.timestamp_millis_opt(1_760_000_000_123).unwrap();
        assert_eq!(storage_key(now, "photo.jpg"), storage_key(now, "photo.jpg"));
        assert_ne!(storage_key(now, "photo.jpg"), storage_key(now, "plan.pdf"));
    }

    #[test]
    fn path_components_are_stripped() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\Users\\me\\site plan.pdf"), "site_plan.pdf");
    }

    #[test]
    fn japanese_names_survive() {
        assert_eq!(sanitize_file_name("現場写真.png"), "現場写真.png");
    }

    #[test]
    fn empty_or_dot_names_fall_back() {
        assert_eq!(sanitize_file_name(""), "file");
        assert_eq!(sanitize_file_name("..."), "file");
    }

    #[test]
    fn generated_keys_validate() {
        let now = Utc::now();
        assert!(validate_storage_key(&storage_key(now, "a b.png")).is_ok());
        assert!(validate_storage_key("abc_photo.png").is_err());
        assert!(validate_storage_key("123_../x").is_err());
        assert!(validate_storage_key("123_").is_err());
    }
}
