//! Two-phase receipt issuing
//!
//! [`ReceiptIssuer::begin_render`] marks the issuer busy, stamps the next folio
//! on the record and queues it. [`ReceiptIssuer::poll`] later lays out and
//! renders one queued receipt and passes the outcome to
//! [`ReceiptIssuer::finish_render`], which clears the busy flag once the queue
//! is drained, whether the render succeeded or not.

use crate::folio::FolioCounter;
use crate::{InvoiceRecord, LayoutEngine, PdfRenderer, ReceiptConfig, Result};
use std::collections::VecDeque;

/// File name for a given folio
pub fn receipt_file_name(folio: u64) -> String {
    format!("comprobante-de-pago-{}.pdf", folio)
}

/// A record waiting to be rendered, folio already assigned
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRender {
    pub folio: u64,
    pub record: InvoiceRecord,
}

/// A finished receipt
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedReceipt {
    pub folio: u64,
    pub file_name: String,
    pub pdf: Vec<u8>,
    pub grand_total: f64,
}

/// Issues receipts with folios taken from `C`
pub struct ReceiptIssuer<C> {
    engine: LayoutEngine,
    renderer: PdfRenderer,
    counter: C,
    queue: VecDeque<PendingRender>,
    busy: bool,
    last_error: Option<String>,
}

impl<C: FolioCounter> ReceiptIssuer<C> {
    pub fn new(config: ReceiptConfig, counter: C) -> Self {
        Self {
            engine: LayoutEngine::new(config),
            renderer: PdfRenderer::new().with_title("Comprobante de pago"),
            counter,
            queue: VecDeque::new(),
            busy: false,
            last_error: None,
        }
    }

    /// Replace the PDF renderer
    pub fn with_renderer(mut self, renderer: PdfRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// True between `begin_render` and `finish_render`
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Number of queued renders
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Message of the most recent failed render
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn engine(&self) -> &LayoutEngine {
        &self.engine
    }

    pub fn counter(&self) -> &C {
        &self.counter
    }

    /// Take the next folio and queue the record for rendering
    ///
    /// The folio is consumed here, so a render that fails later leaves a gap
    /// in the sequence.
    pub fn begin_render(&mut self, mut record: InvoiceRecord) -> Result<u64> {
        self.busy = true;

        let folio = match self.counter.next() {
            Ok(folio) => folio,
            Err(e) => {
                self.busy = !self.queue.is_empty();
                return Err(e);
            }
        };

        record.folio_number = folio;
        tracing::info!(folio, items = record.line_items.len(), "receipt queued");
        self.queue.push_back(PendingRender { folio, record });
        Ok(folio)
    }

    /// Render one queued receipt, if any
    ///
    /// Returns `None` when the queue is empty or the render failed.
    pub fn poll(&mut self) -> Option<RenderedReceipt> {
        let pending = self.queue.pop_front()?;
        let result = self.render(&pending);
        self.finish_render(result)
    }

    /// Clear the busy flag and report the outcome
    pub fn finish_render(&mut self, result: Result<RenderedReceipt>) -> Option<RenderedReceipt> {
        self.busy = !self.queue.is_empty();

        match result {
            Ok(receipt) => {
                tracing::info!(
                    folio = receipt.folio,
                    file = %receipt.file_name,
                    bytes = receipt.pdf.len(),
                    "receipt rendered"
                );
                self.last_error = None;
                Some(receipt)
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to render receipt");
                self.last_error = Some(e.to_string());
                None
            }
        }
    }

    /// Begin and complete a render of `record` in one call
    ///
    /// Receipts queued earlier stay queued.
    pub fn issue(&mut self, record: InvoiceRecord) -> Result<Option<RenderedReceipt>> {
        let folio = self.begin_render(record)?;
        // begin_render pushed the record at the back
        let Some(pending) = self.queue.pop_back() else {
            return Ok(None);
        };
        debug_assert_eq!(pending.folio, folio);
        let result = self.render(&pending);
        Ok(self.finish_render(result))
    }

    fn render(&self, pending: &PendingRender) -> Result<RenderedReceipt> {
        let page = self.engine.config().page;
        let layout = self.engine.layout(&pending.record, page)?;
        let pdf = self.renderer.render(&layout, page)?;

        Ok(RenderedReceipt {
            folio: pending.folio,
            file_name: receipt_file_name(pending.folio),
            pdf,
            grand_total: layout.grand_total,
        })
    }
}
