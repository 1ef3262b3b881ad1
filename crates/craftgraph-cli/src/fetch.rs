//! Mirroring item icons to a local directory.
//!
//! Files already on disk are left alone. Each download has a fixed timeout,
//! and a failed icon is logged and counted without stopping the rest.

use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use craftgraph_core::assets::IconRef;
use futures::StreamExt as _;
use tracing::{debug, info, warn};

/// Per-request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Downloads in flight at once.
pub const MAX_CONCURRENT_DOWNLOADS: usize = 8;

/// Errors that stop icon mirroring before any download starts.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {source}")]
    Client {
        /// The underlying reqwest error.
        #[from]
        source: reqwest::Error,
    },

    /// The target directory could not be created.
    #[error("failed to create icon directory {path}: {source}")]
    CreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

/// What happened to one icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Written to disk.
    Downloaded,
    /// Already present.
    Skipped,
    /// Request, status, or write failed.
    Failed,
}

/// Counts per outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchSummary {
    /// Icons written.
    pub downloaded: usize,
    /// Icons already present.
    pub skipped: usize,
    /// Icons that could not be fetched.
    pub failed: usize,
}

impl FetchSummary {
    fn record(&mut self, outcome: FetchOutcome) {
        let slot = match outcome {
            FetchOutcome::Downloaded => &mut self.downloaded,
            FetchOutcome::Skipped => &mut self.skipped,
            FetchOutcome::Failed => &mut self.failed,
        };
        *slot = slot.saturating_add(1);
    }
}

/// Build the HTTP client used for icon downloads.
pub fn build_client() -> Result<reqwest::Client, FetchError> {
    Ok(reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?)
}

/// Download every icon in `manifest` into `dir`.
///
/// # Errors
///
/// Returns [`FetchError::CreateDir`] if `dir` cannot be created. Individual
/// download failures are counted in the summary instead.
pub async fn fetch_icons(
    client: &reqwest::Client,
    manifest: Vec<IconRef>,
    dir: &Path,
) -> Result<FetchSummary, FetchError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| FetchError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;

    info!(icons = manifest.len(), dir = %dir.display(), "Fetching icons");

    let outcomes: Vec<FetchOutcome> = futures::stream::iter(manifest)
        .map(|icon| fetch_one(client, icon, dir))
        .buffer_unordered(MAX_CONCURRENT_DOWNLOADS)
        .collect()
        .await;

    let mut summary = FetchSummary::default();
    for outcome in outcomes {
        summary.record(outcome);
    }

    info!(
        downloaded = summary.downloaded,
        skipped = summary.skipped,
        failed = summary.failed,
        "Icon fetch finished"
    );
    Ok(summary)
}

async fn fetch_one(client: &reqwest::Client, icon: IconRef, dir: &Path) -> FetchOutcome {
    if !is_plain_file_name(&icon.file_name) {
        warn!(item = %icon.item, file = %icon.file_name, "Icon name is not a plain file name");
        return FetchOutcome::Failed;
    }

    let path = dir.join(&icon.file_name);
    if tokio::fs::try_exists(&path).await.unwrap_or(false) {
        debug!(file = %icon.file_name, "Icon exists");
        return FetchOutcome::Skipped;
    }

    let response = match client.get(&icon.url).send().await {
        Ok(response) => response,
        Err(e) => {
            warn!(item = %icon.item, url = %icon.url, error = %e, "Icon request failed");
            return FetchOutcome::Failed;
        }
    };

    let status = response.status();
    if !status.is_success() {
        warn!(item = %icon.item, url = %icon.url, %status, "Icon not available");
        return FetchOutcome::Failed;
    }

    let bytes = match response.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(item = %icon.item, error = %e, "Icon body read failed");
            return FetchOutcome::Failed;
        }
    };

    match write_in_place(&path, &bytes).await {
        Ok(()) => {
            debug!(file = %icon.file_name, bytes = bytes.len(), "Icon downloaded");
            FetchOutcome::Downloaded
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Icon write failed");
            FetchOutcome::Failed
        }
    }
}

/// True when `name` is a single normal path component.
fn is_plain_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(part)), None) if part == name
    ) && !name.contains(['/', '\\'])
}

/// Write to `{path}.part`, then rename over `path`.
///
/// An interrupted write never leaves a file at `path`, so the
/// skip-if-present check does not mistake it for a finished icon.
async fn write_in_place(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut partial = path.as_os_str().to_owned();
    partial.push(".part");
    let partial = PathBuf::from(partial);

    if let Err(e) = tokio::fs::write(&partial, bytes).await {
        let _ = tokio::fs::remove_file(&partial).await;
        return Err(e);
    }
    tokio::fs::rename(&partial, path).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use craftgraph_types::ItemId;

    use super::*;

    fn icon(file_name: &str, url: &str) -> IconRef {
        IconRef {
            item: ItemId::from("Desc_OreIron_C"),
            file_name: String::from(file_name),
            url: String::from(url),
        }
    }

    #[tokio::test]
    async fn existing_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ore_64.png"), b"png").unwrap();

        let client = build_client().unwrap();
        // The URL is never requested.
        let summary = fetch_icons(
            &client,
            vec![icon("ore_64.png", "http://invalid.invalid/ore_64.png")],
            dir.path(),
        )
        .await
        .unwrap();

        assert_eq!(
            summary,
            FetchSummary {
                downloaded: 0,
                skipped: 1,
                failed: 0,
            }
        );
    }

    #[tokio::test]
    async fn unreachable_host_counts_as_failure() {
        let dir = tempfile::tempdir().unwrap();
        let client = build_client().unwrap();
        let summary = fetch_icons(
            &client,
            vec![icon("x_64.png", "http://127.0.0.1:9/x_64.png")],
            dir.path(),
        )
        .await
        .unwrap();

        assert_eq!(summary.failed, 1);
        assert!(!dir.path().join("x_64.png").exists());
    }

    #[tokio::test]
    async fn icon_names_with_paths_are_rejected() {
        let root = tempfile::tempdir().unwrap();
        let target = root.path().join("img");
        // Would satisfy the existence check if the name escaped `img/`.
        std::fs::write(root.path().join("escape_64.png"), b"png").unwrap();

        let client = build_client().unwrap();
        let summary = fetch_icons(
            &client,
            vec![
                icon("../escape_64.png", "http://127.0.0.1:9/escape_64.png"),
                icon("/tmp/abs_64.png", "http://127.0.0.1:9/abs_64.png"),
            ],
            &target,
        )
        .await
        .unwrap();

        assert_eq!(
            summary,
            FetchSummary {
                downloaded: 0,
                skipped: 0,
                failed: 2,
            }
        );
    }

    #[test]
    fn plain_file_names() {
        assert!(is_plain_file_name("desc-oreiron-c_64.png"));
        assert!(!is_plain_file_name("../x_64.png"));
        assert!(!is_plain_file_name("a/b_64.png"));
        assert!(!is_plain_file_name("a\\b_64.png"));
        assert!(!is_plain_file_name("/etc/x_64.png"));
        assert!(!is_plain_file_name(".."));
        assert!(!is_plain_file_name(""));
    }

    #[tokio::test]
    async fn write_in_place_leaves_no_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ore_64.png");
        write_in_place(&path, b"png").await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"png");
        assert!(!dir.path().join("ore_64.png.part").exists());
    }

    #[tokio::test]
    async fn failed_write_leaves_nothing_at_target() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("ore_64.png");
        assert!(write_in_place(&path, b"png").await.is_err());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("img").join("items");
        let client = build_client().unwrap();
        let summary = fetch_icons(&client, Vec::new(), &nested).await.unwrap();
        assert_eq!(summary, FetchSummary::default());
        assert!(nested.is_dir());
    }
}
