//! Copying selected record IDs to the system clipboard for bulk actions.

use anyhow::{Context, Result};
use arboard::Clipboard;

/// Upper bound on clipboard payloads (10MB)
const MAX_CLIPBOARD_SIZE: usize = 10 * 1024 * 1024;

/// Clipboard backend; swapped for a mock in tests
trait ClipboardProvider {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

struct SystemClipboard {
    clipboard: Clipboard,
}

impl SystemClipboard {
    fn new() -> Result<Self> {
        let clipboard = Clipboard::new().context("Failed to initialize clipboard")?;
        Ok(Self { clipboard })
    }
}

impl ClipboardProvider for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.clipboard.set_text(text).context("Failed to set clipboard contents")?;
        Ok(())
    }
}

fn validate_clipboard_text(text: &str) -> Result<()> {
    if text.is_empty() {
        anyhow::bail!("Cannot copy empty text to clipboard");
    }

    if text.len() > MAX_CLIPBOARD_SIZE {
        anyhow::bail!(
            "Text too large for clipboard ({} bytes, max {})",
            text.len(),
            MAX_CLIPBOARD_SIZE
        );
    }

    Ok(())
}

/// Newline-separated ID list, in selection order
pub fn format_ids<S: AsRef<str>>(ids: &[S]) -> String {
    ids.iter().map(AsRef::as_ref).collect::<Vec<_>>().join("\n")
}

fn copy_with_provider(text: &str, provider: &mut dyn ClipboardProvider) -> Result<()> {
    validate_clipboard_text(text)?;
    provider.set_text(text)
}

/// Copy text to the system clipboard.
///
/// # Errors
/// Returns error if the text is empty or larger than 10MB, or the system
/// clipboard is unavailable (headless sessions, locked by another process).
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    // Validate before touching the clipboard so headless runs get the real reason
    validate_clipboard_text(text)?;

    let mut clipboard = SystemClipboard::new()?;
    copy_with_provider(text, &mut clipboard)
}

/// Copy selected IDs, one per line. Returns the number of IDs copied.
pub fn copy_ids<S: AsRef<str>>(ids: &[S]) -> Result<usize> {
    if ids.is_empty() {
        anyhow::bail!("Nothing selected");
    }
    copy_to_clipboard(&format_ids(ids))?;
    Ok(ids.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockClipboard {
        text: Option<String>,
        should_fail: bool,
    }

    impl MockClipboard {
        fn new() -> Self {
            Self { text: None, should_fail: false }
        }

        fn with_failure() -> Self {
            Self { text: None, should_fail: true }
        }
    }

    impl ClipboardProvider for MockClipboard {
        fn set_text(&mut self, text: &str) -> Result<()> {
            if self.should_fail {
                anyhow::bail!("Mock clipboard error");
            }
            self.text = Some(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_format_ids_keeps_selection_order() {
        let ids = vec!["tx-3".to_string(), "tx-1".to_string(), "tx-2".to_string()];
        assert_eq!(format_ids(&ids), "tx-3\ntx-1\ntx-2");
    }

    #[test]
    fn test_format_single_id_has_no_trailing_newline() {
        assert_eq!(format_ids(&["item-9"]), "item-9");
    }

    #[test]
    fn test_copy_ids_with_mock() {
        let mut mock = MockClipboard::new();
        let text = format_ids(&["a", "b"]);

        copy_with_provider(&text, &mut mock).unwrap();

        assert_eq!(mock.text.as_deref(), Some("a\nb"));
    }

    #[test]
    fn test_provider_failure_is_reported() {
        let mut mock = MockClipboard::with_failure();
        let err = copy_with_provider("tx-1", &mut mock).unwrap_err();
        assert!(err.to_string().contains("Mock clipboard error"));
    }

    #[test]
    fn test_empty_text_rejected() {
        let mut mock = MockClipboard::new();
        let err = copy_with_provider("", &mut mock).unwrap_err();
        assert!(err.to_string().contains("empty"));
        assert!(mock.text.is_none());
    }

    #[test]
    fn test_size_limit_boundary() {
        let mut mock = MockClipboard::new();
        let at_limit = "a".repeat(MAX_CLIPBOARD_SIZE);
        assert!(copy_with_provider(&at_limit, &mut mock).is_ok());

        let over_limit = "a".repeat(MAX_CLIPBOARD_SIZE + 1);
        let err = copy_with_provider(&over_limit, &mut mock).unwrap_err();
        assert!(err.to_string().contains("too large"));
        assert!(err.to_string().contains("bytes"));
    }

    #[test]
    fn test_copy_ids_rejects_empty_selection() {
        let ids: Vec<String> = Vec::new();
        let err = copy_ids(&ids).unwrap_err();
        assert!(err.to_string().contains("Nothing selected"));
    }

    #[test]
    fn test_copy_to_clipboard_validates_before_clipboard_access() {
        let err = copy_to_clipboard("").unwrap_err();
        assert!(err.to_string().contains("empty"));
    }
}
