use futures::StreamExt;
use reqwest::Response;
use std::path::Path;
use tokio::fs::{create_dir_all, File};
use tokio::io::AsyncWriteExt;

/// Size of each write to disk while streaming a response body
pub const DOWNLOAD_CHUNK_SIZE: usize = 8 * 1024;

#[derive(Debug)]
pub(crate) enum StreamError {
    /// The connection failed while the body was being read
    Network(reqwest::Error),
    Io(std::io::Error),
}

/// Create a directory and its parents. Succeeds when the directory already
/// exists, including when another task created it concurrently.
pub async fn ensure_dir(path: &Path) -> std::io::Result<()> {
    create_dir_all(path).await
}

/// Last path segment of the final (post-redirect) response URL.
/// Returns None for an empty segment or one that would escape the target directory.
pub fn filename_from_url(url: &url::Url) -> Option<String> {
    let segment = url.path_segments()?.last()?;
    match segment {
        "" | "." | ".." => None,
        name if name.contains('\\') => None,
        name => Some(name.to_string()),
    }
}

/// Stream a response body to `path` in fixed-size writes.
///
/// The body goes to a `.part` sibling first and is renamed into place once
/// complete, so a failed transfer never leaves a truncated file at `path`.
pub(crate) async fn stream_to_file(response: Response, path: &Path) -> Result<u64, StreamError> {
    let tmp_name = format!(
        "{}.part",
        path.file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("download")
    );
    let tmp_path = path.with_file_name(tmp_name);

    match write_body(response, &tmp_path).await {
        Ok(written) => {
            tokio::fs::rename(&tmp_path, path)
                .await
                .map_err(StreamError::Io)?;
            log::debug!("Wrote {} bytes to {:?}", written, path);
            Ok(written)
        }
        Err(e) => {
            if let Err(cleanup) = tokio::fs::remove_file(&tmp_path).await {
                log::debug!("Could not remove partial file {:?}: {}", tmp_path, cleanup);
            }
            Err(e)
        }
    }
}

async fn write_body(response: Response, tmp_path: &Path) -> Result<u64, StreamError> {
    let mut file = File::create(tmp_path).await.map_err(StreamError::Io)?;
    let mut written: u64 = 0;
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(StreamError::Network)?;
        for piece in chunk.chunks(DOWNLOAD_CHUNK_SIZE) {
            file.write_all(piece).await.map_err(StreamError::Io)?;
            written += piece.len() as u64;
        }
    }

    file.flush().await.map_err(StreamError::Io)?;
    Ok(written)
}
