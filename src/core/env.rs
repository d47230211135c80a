use crate::utils::error::{LauncherError, Result};
use std::ffi::{OsStr, OsString};
use std::path::Path;

#[cfg(windows)]
const SEPARATOR: &str = ";";
#[cfg(not(windows))]
const SEPARATOR: &str = ":";

/// 把 `addition` 接到既有搜尋路徑的尾端。
///
/// 既有值原封不動保留（包含空項目）；未設定或空字串時
/// 只產生 `addition` 本身，不會留下前導的分隔符。
pub fn append_search_path(existing: Option<&OsStr>, addition: &Path) -> Result<OsString> {
    // 新項目本身不能含分隔符，否則會被拆成兩個項目
    std::env::join_paths([addition]).map_err(|e| LauncherError::InvalidConfigValueError {
        field: "framework.source_dir".to_string(),
        value: addition.display().to_string(),
        reason: e.to_string(),
    })?;

    match existing {
        Some(value) if !value.is_empty() => {
            let mut joined = value.to_os_string();
            joined.push(SEPARATOR);
            joined.push(addition);
            Ok(joined)
        }
        _ => Ok(addition.as_os_str().to_os_string()),
    }
}

/// 讀取目前程序的變數值再追加
pub fn search_path_from_env(var: &str, addition: &Path) -> Result<OsString> {
    let existing = std::env::var_os(var);
    append_search_path(existing.as_deref(), addition)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_append_to_unset_value() {
        let joined = append_search_path(None, Path::new("/opt/crfm-helm/src")).unwrap();
        assert_eq!(joined, "/opt/crfm-helm/src");
    }

    #[test]
    fn test_append_to_empty_value() {
        let empty = OsString::new();
        let joined = append_search_path(Some(&empty), Path::new("/opt/helm/src")).unwrap();
        assert_eq!(joined, "/opt/helm/src");
    }

    #[test]
    fn test_append_keeps_existing_entries_first() {
        let existing = OsString::from("/usr/lib/python3:/home/me/lib");
        let joined = append_search_path(Some(&existing), Path::new("/opt/helm/src")).unwrap();
        assert_eq!(joined, "/usr/lib/python3:/home/me/lib:/opt/helm/src");
    }

    #[test]
    fn test_append_preserves_empty_entries() {
        // 空項目代表目前目錄，不可被吃掉
        let existing = OsString::from("/a::/b:");
        let joined = append_search_path(Some(&existing), Path::new("/x/src")).unwrap();
        assert_eq!(joined, "/a::/b::/x/src");
    }

    #[test]
    fn test_append_keeps_non_utf8_value() {
        use std::os::unix::ffi::{OsStrExt, OsStringExt};

        let existing = OsString::from_vec(b"/opt/\xffbin".to_vec());
        let joined = append_search_path(Some(&existing), Path::new("/x/src")).unwrap();
        assert_eq!(joined.as_bytes(), b"/opt/\xffbin:/x/src");
    }

    #[test]
    fn test_path_containing_separator_is_rejected() {
        let result = append_search_path(None, Path::new("/opt/a:b/src"));
        assert!(result.is_err());
    }
}
