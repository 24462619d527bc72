/// External ID picker
///
/// The form asks a picker for one identifier string and writes whatever
/// comes back into the field that asked, through the same path as typed
/// input.

use async_trait::async_trait;
use rfd::AsyncFileDialog;
use std::path::{Path, PathBuf};

#[async_trait]
pub trait IdPicker: Send + Sync {
    /// Resolve to an identifier, or `None` if the user backed out
    async fn pick(&self) -> Option<String>;
}

/// Picks a file with the native dialog and uses its stem as the ID
///
/// Pointed at a synced Drive folder, this yields the same IDs the server
/// stores.
#[derive(Debug, Clone, Default)]
pub struct FileDialogPicker {
    start_dir: Option<PathBuf>,
}

impl FileDialogPicker {
    pub fn new(start_dir: Option<PathBuf>) -> Self {
        Self { start_dir }
    }
}

#[async_trait]
impl IdPicker for FileDialogPicker {
    async fn pick(&self) -> Option<String> {
        let mut dialog = AsyncFileDialog::new().set_title("Select Image");
        if let Some(dir) = &self.start_dir {
            dialog = dialog.set_directory(dir);
        }

        let file = dialog.pick_file().await?;
        let id = id_from_path(file.path());
        tracing::debug!(?id, "picked file");
        id
    }
}

/// File stem of `path`, if it has a usable one
fn id_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().trim().to_string())
        .filter(|stem| !stem.is_empty())
}
