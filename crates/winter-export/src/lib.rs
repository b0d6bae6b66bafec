//! Static export: serve the page in-process, fetch it once, and write it to
//! disk beside the web root's assets.

use std::io;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use winter_server::build_app;
use winter_server::config::ServerConfig;

pub const INDEX_FILE: &str = "index.html";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to start the page server: {0}")]
    Serve(#[source] io::Error),
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ExportError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub out_dir: PathBuf,
    /// Copy the web root's static files next to `index.html`.
    pub copy_assets: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub index_path: PathBuf,
    pub page_bytes: usize,
    pub assets_copied: usize,
}

/// Render the page through a throwaway server on a loopback ephemeral port and
/// write it to `<out_dir>/index.html`.
pub async fn export_site(
    config: ServerConfig,
    options: &ExportOptions,
) -> Result<ExportReport, ExportError> {
    let web_root = PathBuf::from(&config.web_root);
    let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .map_err(ExportError::Serve)?;
    let addr = listener.local_addr().map_err(ExportError::Serve)?;

    let (app, _state) = build_app(config);
    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    let server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = stop_rx.await;
            })
            .await
    });
    tracing::debug!(%addr, "page server started");

    let url = format!("http://{addr}/");
    let page = fetch_page(&url).await;

    let _ = stop_tx.send(());
    match server.await {
        Ok(Ok(())) => {},
        Ok(Err(e)) => tracing::warn!("page server stopped with error: {e}"),
        Err(e) => tracing::warn!("page server task failed: {e}"),
    }
    let page = page?;

    std::fs::create_dir_all(&options.out_dir).map_err(|e| ExportError::io(&options.out_dir, e))?;
    let assets_copied = if options.copy_assets {
        copy_assets(&web_root, &options.out_dir)?
    } else {
        0
    };

    let index_path = options.out_dir.join(INDEX_FILE);
    std::fs::write(&index_path, &page).map_err(|e| ExportError::io(&index_path, e))?;
    tracing::info!(
        path = %index_path.display(),
        bytes = page.len(),
        assets = assets_copied,
        "Exported page"
    );

    Ok(ExportReport {
        index_path,
        page_bytes: page.len(),
        assets_copied,
    })
}

/// GET `url`, requiring a 2xx status. Returns the raw body.
pub async fn fetch_page(url: &str) -> Result<Vec<u8>, ExportError> {
    let request_failed = |source| ExportError::Request {
        url: url.to_string(),
        source,
    };
    let response = reqwest::get(url).await.map_err(request_failed)?;
    let status = response.status();
    if !status.is_success() {
        return Err(ExportError::Status {
            url: url.to_string(),
            status,
        });
    }
    let body = response.bytes().await.map_err(request_failed)?;
    Ok(body.to_vec())
}

/// Recursively copy `web_root` into `out_dir`. A missing web root copies
/// nothing. When `out_dir` sits inside `web_root` it is left out of the copy.
/// Returns the number of files copied.
pub fn copy_assets(web_root: &Path, out_dir: &Path) -> Result<usize, ExportError> {
    if !web_root.is_dir() {
        tracing::warn!(path = %web_root.display(), "web root not found, no assets copied");
        return Ok(0);
    }
    std::fs::create_dir_all(out_dir).map_err(|e| ExportError::io(out_dir, e))?;
    let skip = out_dir
        .canonicalize()
        .map_err(|e| ExportError::io(out_dir, e))?;
    copy_dir(web_root, out_dir, &skip)
}

fn copy_dir(from: &Path, to: &Path, skip: &Path) -> Result<usize, ExportError> {
    std::fs::create_dir_all(to).map_err(|e| ExportError::io(to, e))?;
    let mut copied = 0;
    for entry in std::fs::read_dir(from).map_err(|e| ExportError::io(from, e))? {
        let entry = entry.map_err(|e| ExportError::io(from, e))?;
        let source = entry.path();
        let target = to.join(entry.file_name());
        let file_type = entry.file_type().map_err(|e| ExportError::io(&source, e))?;
        if file_type.is_dir() {
            if source.canonicalize().is_ok_and(|dir| dir == skip) {
                tracing::debug!(path = %source.display(), "skipping output directory");
                continue;
            }
            copied += copy_dir(&source, &target, skip)?;
        } else if file_type.is_file() {
            std::fs::copy(&source, &target).map_err(|e| ExportError::io(&source, e))?;
            copied += 1;
        }
    }
    Ok(copied)
}
