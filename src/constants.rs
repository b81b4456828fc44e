// src/constants.rs
//
// Application-wide constants.

/// Storage key holding the serialized note collection.
pub const DEFAULT_STORAGE_KEY: &str = "notes";

/// Appended to the storage key when unreadable stored text is set aside
/// before the first write over it.
///
/// Used in: `application/note_store.rs`
pub const CORRUPT_BACKUP_SUFFIX: &str = ".corrupt";

/// Directory name under the platform config and data directories.
pub const APP_DIR_NAME: &str = "notegrid";

pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Grid columns when the config does not say otherwise.
pub const DEFAULT_COLUMNS: usize = 3;

// Card height estimate used by the masonry layout, in pixels.
pub const CARD_CHROME_HEIGHT: u32 = 72;
pub const CARD_LINE_HEIGHT: u32 = 21;
pub const CARD_CHARS_PER_LINE: usize = 32;

/// Characters of content shown per card in `list` output.
pub const PREVIEW_CHARS: usize = 60;

/// Delay in milliseconds after spawning the browser before returning.
///
/// The temp directory holding the page is removed when the process exits,
/// so the browser needs a moment to read it first.
///
/// Used in: `infrastructure/renderer.rs`
pub const BROWSER_LAUNCH_DELAY_MS: u64 = 500;

/// Where the entry form sits on the rendered page. Clicks outside this box
/// commit the pending note.
pub const FORM_X: f64 = 0.0;
pub const FORM_Y: f64 = 0.0;
pub const FORM_WIDTH: f64 = 640.0;
pub const FORM_HEIGHT: f64 = 180.0;
