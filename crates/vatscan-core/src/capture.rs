//! Multi-page capture: recognize every page of a capture concurrently, wait
//! for all of them, and interpret the joined text once.
//!
//! Recognition itself is done by a [`PageRecognizer`] supplied by the caller.
//! Recognizers are synchronous and may block, so each page runs on tokio's
//! blocking pool.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::{debug, info};

use crate::error::CaptureError;
use crate::invoice::{InterpretationResult, InvoiceInterpreter, InvoiceParser};
use crate::models::config::CaptureConfig;

/// Where the content of a page comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum PageSource {
    /// Already recognized text.
    Text(String),
    /// A file the recognizer reads.
    Path(PathBuf),
}

/// One page of a capture.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturePage {
    /// Position of the page in the capture.
    pub index: usize,
    pub source: PageSource,
}

impl CapturePage {
    pub fn text(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            source: PageSource::Text(text.into()),
        }
    }

    pub fn path(index: usize, path: impl Into<PathBuf>) -> Self {
        Self {
            index,
            source: PageSource::Path(path.into()),
        }
    }

    /// Pages for a list of files, indexed in order.
    pub fn from_paths<P: Into<PathBuf>>(paths: impl IntoIterator<Item = P>) -> Vec<Self> {
        paths
            .into_iter()
            .enumerate()
            .map(|(index, path)| Self::path(index, path))
            .collect()
    }
}

/// Abstraction over the OCR collaborator.
pub trait PageRecognizer: Send + Sync + 'static {
    fn recognize(&self, page: &CapturePage) -> Result<String, CaptureError>;
}

/// Reads pre-recognized text: inline text is returned as is, paths are read
/// as UTF-8 text files.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextFileRecognizer;

impl PageRecognizer for TextFileRecognizer {
    fn recognize(&self, page: &CapturePage) -> Result<String, CaptureError> {
        match &page.source {
            PageSource::Text(text) => Ok(text.clone()),
            PageSource::Path(path) => {
                std::fs::read_to_string(path).map_err(|e| CaptureError::Page {
                    page: page.index,
                    reason: format!("{}: {}", path.display(), e),
                })
            }
        }
    }
}

/// Returns a preset text for every page, for tests.
#[derive(Debug, Clone)]
pub struct MockRecognizer {
    pub text: String,
    /// Page index that fails instead.
    pub fail_on: Option<usize>,
}

impl MockRecognizer {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            fail_on: None,
        }
    }

    pub fn failing_on(mut self, page: usize) -> Self {
        self.fail_on = Some(page);
        self
    }
}

impl PageRecognizer for MockRecognizer {
    fn recognize(&self, page: &CapturePage) -> Result<String, CaptureError> {
        if self.fail_on == Some(page.index) {
            return Err(CaptureError::Page {
                page: page.index,
                reason: "mock failure".to_string(),
            });
        }
        Ok(self.text.clone())
    }
}

/// Recognize all `pages` and join their text in page order.
///
/// Every page is awaited before anything is returned. If any page failed,
/// the error of the lowest-indexed failing page is returned.
pub async fn recognize_capture<R: PageRecognizer>(
    recognizer: Arc<R>,
    mut pages: Vec<CapturePage>,
    config: &CaptureConfig,
) -> Result<String, CaptureError> {
    if pages.is_empty() {
        return Err(CaptureError::Empty);
    }
    pages.sort_by_key(|p| p.index);

    let semaphore = (config.max_concurrent_pages > 0)
        .then(|| Arc::new(Semaphore::new(config.max_concurrent_pages)));

    let page_count = pages.len();
    let mut handles = Vec::with_capacity(page_count);
    for page in pages {
        let permit = match &semaphore {
            Some(semaphore) => Some(
                Arc::clone(semaphore)
                    .acquire_owned()
                    .await
                    .map_err(|e| CaptureError::Join(e.to_string()))?,
            ),
            None => None,
        };
        let recognizer = Arc::clone(&recognizer);
        let index = page.index;
        let handle = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            debug!("Recognizing page {}", page.index);
            recognizer.recognize(&page)
        });
        handles.push((index, handle));
    }

    let mut outcomes = Vec::with_capacity(page_count);
    for (index, handle) in handles {
        outcomes.push((index, handle.await));
    }

    let mut texts = Vec::with_capacity(page_count);
    for (index, outcome) in outcomes {
        let text = outcome.map_err(|e| CaptureError::Join(format!("page {}: {}", index, e)))??;
        if config.skip_blank_pages && text.trim().is_empty() {
            debug!("Skipping blank page {}", index);
            continue;
        }
        texts.push(text);
    }

    info!("Recognized {} of {} page(s)", texts.len(), page_count);

    Ok(texts.join(&config.page_separator))
}

/// Recognize a capture and interpret its text.
pub async fn interpret_capture<R: PageRecognizer>(
    interpreter: &InvoiceInterpreter,
    recognizer: Arc<R>,
    pages: Vec<CapturePage>,
    config: &CaptureConfig,
) -> crate::Result<InterpretationResult> {
    let page_count = pages.len();
    let text = recognize_capture(recognizer, pages, config).await?;

    let mut result = interpreter.parse(&text);
    result.record.metadata.page_count = Some(page_count);
    Ok(result)
}
