//! File picker for `file` search fields.
//!
//! The picker is a trait so tests can inject canned selections instead of
//! opening system dialogs.
//!
//! # Platform Support
//!
//! - **Native (Windows, macOS, Linux)**: native dialogs via `rfd`.
//! - **Web (WASM)**: not supported (stub implementation).

/// Picks files for a search field and returns their names.
pub trait FilePicker {
    /// `accept` is the field's accept list, e.g. `.png,.jpg` or `image/*`.
    fn pick(&self, accept: Option<&str>, multiple: bool) -> Vec<String>;
}

/// Extensions of an accept list usable as a dialog filter. MIME patterns
/// such as `image/*` are skipped.
pub fn accept_extensions(accept: &str) -> Vec<String> {
    accept
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty() && !entry.contains('/'))
        .map(|entry| entry.trim_start_matches('.').to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
        .collect()
}

/// File picker backed by the system file dialog.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemFilePicker;

#[cfg(not(target_arch = "wasm32"))]
impl FilePicker for SystemFilePicker {
    fn pick(&self, accept: Option<&str>, multiple: bool) -> Vec<String> {
        use rfd::FileDialog;

        let mut dialog = FileDialog::new().set_title("选择文件");
        if let Some(accept) = accept {
            let extensions = accept_extensions(accept);
            if !extensions.is_empty() {
                dialog = dialog.add_filter("文件", &extensions);
            }
        }

        let paths = if multiple {
            dialog.pick_files().unwrap_or_default()
        } else {
            dialog.pick_file().into_iter().collect()
        };
        log::info!("User selected {} file(s)", paths.len());

        paths
            .iter()
            .filter_map(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect()
    }
}

#[cfg(target_arch = "wasm32")]
impl FilePicker for SystemFilePicker {
    fn pick(&self, _accept: Option<&str>, _multiple: bool) -> Vec<String> {
        log::debug!("File picking is not supported on the web build");
        Vec::new()
    }
}
