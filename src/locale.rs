//! Device-locale detection utilities.
//!
//! Catalog entries are keyed by bare language codes (`"en"`, `"de"`), so
//! detection normalizes raw environment values like `de_DE.UTF-8` down to the
//! language part. The engine resolves its device locale once at construction:
//! injected value first, then the detected system locale, then the configured
//! fallback locale, so lookup never depends on an undefined platform value.

use std::env;

/// What: Detect the device locale from environment variables.
///
/// Inputs:
/// - None (reads from environment)
///
/// Output:
/// - `Option<String>` containing a bare language code (e.g., "de") or `None`
///   if no usable locale is set
///
/// Details:
/// - Checks `LC_ALL`, `LC_MESSAGES`, and `LANG` in priority order
/// - Normalizes values like "de_DE.UTF-8" to "de"
#[must_use]
pub fn detect_system_locale() -> Option<String> {
    // Check environment variables in priority order
    let locale_vars = ["LC_ALL", "LC_MESSAGES", "LANG"];

    for var_name in &locale_vars {
        if let Ok(locale_str) = env::var(var_name)
            && let Some(parsed) = language_code(&locale_str)
        {
            return Some(parsed);
        }
    }

    None
}

/// What: Extract the language code from a raw locale string.
///
/// Inputs:
/// - `raw`: Locale string like "de_DE.UTF-8", "de-DE", "en_US.utf8", "fr"
///
/// Output:
/// - `Option<String>` with the lowercase language code (e.g., "de") or `None`
///   if the value carries no usable language part
///
/// Details:
/// - Strips encoding (`.UTF-8`) and modifier (`@euro`) suffixes
/// - Accepts both `de_DE` and `de-DE` separators
/// - Rejects the `C`/`POSIX` pseudo-locales and non-alphabetic values
#[must_use]
pub fn language_code(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    // Drop encoding and modifier suffixes (e.g. "de_DE.UTF-8", "de_DE@euro")
    let base = trimmed.split(['.', '@']).next()?;

    // Language part precedes the region separator
    let language = base.split(['_', '-']).next()?.to_lowercase();
    if language.is_empty() || !language.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    // "C" and "POSIX" are pseudo-locales, not languages
    if language == "c" || language == "posix" {
        return None;
    }

    Some(language)
}
