//! HTML-to-PNG rendering by driving a headless Chromium-family browser over
//! the DevTools protocol.
//!
//! One session, one page: launch, set the document content, capture the full
//! page, close. Every step is awaited in order on a single-threaded runtime,
//! and the whole session is bounded by a timeout.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::error::CdpError;
use chromiumoxide::handler::viewport::Viewport;
use chromiumoxide::page::ScreenshotParams;
use futures::StreamExt;
use tracing::{debug, info};

use crate::error::ToolError;

/// The page rendered when no HTML file is given.
pub const DEFAULT_HTML: &str = include_str!("../assets/roadmap.html");

pub const DEFAULT_OUTPUT: &str = "shopify_roadmap_brave.png";

#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub browser: PathBuf,
    pub html: String,
    pub output: PathBuf,
    /// Viewport size. The capture extends past the height to the full page.
    pub width: u32,
    pub height: u32,
    pub timeout: Duration,
    /// Launch without the browser sandbox (needed when running as root).
    pub no_sandbox: bool,
}

/// Render `req.html` to `req.output`, returning the absolute output path.
pub fn render(req: &RenderRequest) -> Result<PathBuf, ToolError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| ToolError::Io {
            path: req.browser.clone(),
            error,
        })?;

    runtime.block_on(async {
        tokio::time::timeout(req.timeout, render_page(req))
            .await
            .map_err(|_| ToolError::TimedOut {
                program: req.browser.clone(),
                secs: req.timeout.as_secs(),
            })?
    })
}

async fn render_page(req: &RenderRequest) -> Result<PathBuf, ToolError> {
    let output = absolute(&req.output)?;
    let executable = locate_browser(&req.browser)?;
    let profile = tempfile::tempdir().map_err(|error| ToolError::Io {
        path: std::env::temp_dir(),
        error,
    })?;

    let mut builder = BrowserConfig::builder()
        .chrome_executable(&executable)
        .user_data_dir(profile.path())
        .window_size(req.width, req.height)
        .viewport(Viewport {
            width: req.width,
            height: req.height,
            ..Viewport::default()
        });
    if req.no_sandbox {
        builder = builder.no_sandbox();
    }
    let config = builder
        .build()
        .map_err(|message| browser_error(&executable, message))?;

    debug!("Launching {}", executable.display());
    let (mut browser, mut handler) = Browser::launch(config)
        .await
        .map_err(|e| browser_error(&executable, e))?;

    // Unknown protocol events surface as errors; keep draining until the
    // connection closes.
    let events = tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            if let Err(e) = event {
                debug!("Browser event: {e}");
            }
        }
    });

    let captured = capture(&browser, &req.html, &output).await;
    let closed = browser.close().await;
    let _ = browser.wait().await;
    let _ = events.await;

    captured.map_err(|e| browser_error(&executable, e))?;
    closed.map_err(|e| browser_error(&executable, e))?;

    if !tokio::fs::try_exists(&output).await.unwrap_or(false) {
        return Err(ToolError::NoOutput { path: output });
    }
    info!("Screenshot written to {}", output.display());
    Ok(output)
}

async fn capture(browser: &Browser, html: &str, output: &Path) -> Result<(), CdpError> {
    let page = browser.new_page("about:blank").await?;
    page.set_content(html).await?;
    let params = ScreenshotParams::builder()
        .format(CaptureScreenshotFormat::Png)
        .full_page(true)
        .build();
    page.save_screenshot(params, output).await?;
    Ok(())
}

fn browser_error(program: &Path, err: impl ToString) -> ToolError {
    ToolError::Browser {
        program: program.to_path_buf(),
        message: err.to_string(),
    }
}

/// Accept an explicit path only if it exists; look bare names up on `PATH`.
fn locate_browser(browser: &Path) -> Result<PathBuf, ToolError> {
    let missing = || ToolError::MissingBinary {
        program: browser.to_path_buf(),
    };
    if browser.is_absolute() || browser.components().count() > 1 {
        return if browser.is_file() {
            Ok(browser.to_path_buf())
        } else {
            Err(missing())
        };
    }
    which::which(browser).map_err(|_| missing())
}

fn absolute(path: &Path) -> Result<PathBuf, ToolError> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(|error| ToolError::Io {
        path: path.to_path_buf(),
        error,
    })?;
    Ok(cwd.join(path))
}
