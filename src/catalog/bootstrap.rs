use reqwest::Client as HttpClient;
use std::path::Path;

use crate::error::{AppError, AppResult};

/// Makes sure a data file exists on disk, downloading it from `url` if it does not
///
/// Returns `true` when a download happened. The file is written next to its
/// final path and renamed into place, so a failed download leaves nothing behind.
pub async fn ensure_asset(
    http_client: &HttpClient,
    path: &Path,
    url: Option<&str>,
) -> AppResult<bool> {
    if tokio::fs::try_exists(path).await? {
        tracing::debug!(path = %path.display(), "Asset present");
        return Ok(false);
    }

    let url = url.ok_or_else(|| {
        AppError::Catalog(format!(
            "{} does not exist and no download URL is configured",
            path.display()
        ))
    })?;

    tracing::info!(path = %path.display(), url = %url, "Downloading missing asset");

    let response = http_client.get(url).send().await?;

    if !response.status().is_success() {
        let status = response.status();
        return Err(AppError::ExternalApi(format!(
            "asset download from {} returned status {}",
            url, status
        )));
    }

    let bytes = response.bytes().await?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    write_atomically(path, &bytes).await?;

    tracing::info!(path = %path.display(), bytes = bytes.len(), "Asset downloaded");

    Ok(true)
}

/// Writes `bytes` to a sibling `.partial` file and renames it over `path`,
/// removing the partial file if either step fails
async fn write_atomically(path: &Path, bytes: &[u8]) -> AppResult<()> {
    let partial = path.with_extension("partial");

    let written = match tokio::fs::write(&partial, bytes).await {
        Ok(()) => tokio::fs::rename(&partial, path).await,
        Err(e) => Err(e),
    };

    if let Err(e) = written {
        if let Err(cleanup) = tokio::fs::remove_file(&partial).await {
            tracing::debug!(path = %partial.display(), error = %cleanup, "Partial file not removed");
        }
        return Err(e.into());
    }

    Ok(())
}
