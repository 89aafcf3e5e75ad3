//! Clipboard action for the search UI.

use crate::{MedlookError, Result};

/// Copy plain text to the system clipboard.
///
/// # Errors
/// Returns error if clipboard access fails (no clipboard manager,
/// permission denied).
pub fn copy_text(text: &str) -> Result<()> {
    tracing::info!("Copying to clipboard: {:?}", text);

    let mut clipboard = arboard::Clipboard::new()
        .map_err(|e| MedlookError::Clipboard(format!("Failed to access clipboard: {}", e)))?;

    clipboard
        .set_text(text.to_string())
        .map_err(|e| MedlookError::Clipboard(format!("Failed to set clipboard text: {}", e)))
}

// Note: Clipboard tests are difficult to run in CI environments
// as they require a display/clipboard manager.
