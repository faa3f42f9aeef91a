//! WASM bindings for rscomprobante
//!
//! This crate provides JavaScript-friendly API for:
//! - Chilean peso formatting and amounts in words
//! - Laying out a receipt as drawing instructions
//! - Issuing receipt PDFs with sequential folios
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import init, { ReceiptFormatter, ReceiptSession } from 'receipt-wasm';
//!
//! await init();
//!
//! ReceiptFormatter.numberToWords(24500); // "VEINTICUATRO MIL QUINIENTOS PESOS"
//!
//! // The host owns persistence of the folio
//! const session = new ReceiptSession(Number(localStorage.getItem('folioNumero')) || 1532);
//! const receipt = session.issue(formValues);
//! if (receipt) {
//!     localStorage.setItem('folioNumero', String(session.nextFolio));
//!     download(receipt.fileName, receipt.pdf);
//! }
//! ```

use receipt::{FolioCounter, InMemoryFolioCounter, ReceiptConfig, ReceiptIssuer};
use wasm_bindgen::prelude::*;

// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Chilean text formatting utilities
#[wasm_bindgen]
pub struct ReceiptFormatter;

#[wasm_bindgen]
impl ReceiptFormatter {
    /// Spell an amount in Spanish words
    ///
    /// @param amount - Amount in pesos (rounded to an integer)
    /// @returns Words (e.g., "CIEN PESOS"), empty for zero
    #[wasm_bindgen(js_name = numberToWords)]
    pub fn number_to_words(amount: f64) -> String {
        chile_text::number_to_words(chile_text::round_amount(amount))
    }

    /// Format an amount as Chilean pesos
    ///
    /// @param amount - Amount in pesos
    /// @returns Formatted text (e.g., "$ 1.234.567")
    #[wasm_bindgen(js_name = formatCurrency)]
    pub fn format_currency(amount: f64) -> String {
        chile_text::format_clp(amount)
    }

    /// Format an ISO date as DD/MM/YYYY
    ///
    /// @param iso - Date as YYYY-MM-DD
    /// @returns Formatted date, empty for empty input
    #[wasm_bindgen(js_name = formatDate)]
    pub fn format_date(iso: &str) -> Result<String, JsValue> {
        chile_text::format_date_cl(iso).map_err(to_js_error)
    }
}

/// Receipt issuing with a folio seeded by the host
#[wasm_bindgen]
pub struct ReceiptSession {
    issuer: ReceiptIssuer<InMemoryFolioCounter>,
}

#[wasm_bindgen]
impl ReceiptSession {
    /// Create a session
    ///
    /// @param nextFolio - Folio for the next receipt (0 for the default)
    #[wasm_bindgen(constructor)]
    pub fn new(next_folio: u32) -> ReceiptSession {
        ReceiptSession {
            issuer: ReceiptIssuer::new(
                ReceiptConfig::default(),
                InMemoryFolioCounter::new(u64::from(next_folio)),
            ),
        }
    }

    /// Create a session with a configuration JSON
    ///
    /// @param json - Issuer and page configuration
    /// @param nextFolio - Folio for the next receipt
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(json: &str, next_folio: u32) -> Result<ReceiptSession, JsValue> {
        let config = ReceiptConfig::from_json(json).map_err(to_js_error)?;
        Ok(ReceiptSession {
            issuer: ReceiptIssuer::new(config, InMemoryFolioCounter::new(u64::from(next_folio))),
        })
    }

    /// Folio the next receipt will carry
    #[wasm_bindgen(getter, js_name = nextFolio)]
    pub fn next_folio(&self) -> f64 {
        self.issuer.counter().peek().map(|f| f as f64).unwrap_or(0.0)
    }

    /// True while a render is in progress
    #[wasm_bindgen(getter)]
    pub fn busy(&self) -> bool {
        self.issuer.is_busy()
    }

    /// Lay out a receipt without consuming a folio
    ///
    /// @param data - Receipt form values
    /// @returns Layout JSON (instructions, grandTotal, totalInWords, endY)
    pub fn layout(&self, data: JsValue) -> Result<String, JsValue> {
        let value: serde_json::Value = serde_wasm_bindgen::from_value(data)?;
        let mut record = receipt::record_from_value(value).map_err(to_js_error)?;
        if record.folio_number == 0 {
            record.folio_number = self.issuer.counter().peek().map_err(to_js_error)?;
        }

        let layout = self
            .issuer
            .engine()
            .layout_default(&record)
            .map_err(to_js_error)?;
        serde_json::to_string(&layout).map_err(to_js_error)
    }

    /// Issue a receipt PDF
    ///
    /// @param data - Receipt form values
    /// @returns `{ folio, fileName, pdf }`, or undefined when rendering failed
    pub fn issue(&mut self, data: JsValue) -> Result<JsValue, JsValue> {
        let value: serde_json::Value = serde_wasm_bindgen::from_value(data)?;
        let record = receipt::record_from_value(value).map_err(to_js_error)?;

        let Some(receipt) = self.issuer.issue(record).map_err(to_js_error)? else {
            let message = self.issuer.last_error().unwrap_or("unknown error");
            web_sys::console::error_1(&JsValue::from_str(&format!(
                "Error generating receipt PDF: {}",
                message
            )));
            return Ok(JsValue::UNDEFINED);
        };

        let result = js_sys::Object::new();
        js_sys::Reflect::set(
            &result,
            &JsValue::from_str("folio"),
            &JsValue::from_f64(receipt.folio as f64),
        )?;
        js_sys::Reflect::set(
            &result,
            &JsValue::from_str("fileName"),
            &JsValue::from_str(&receipt.file_name),
        )?;
        js_sys::Reflect::set(
            &result,
            &JsValue::from_str("pdf"),
            &js_sys::Uint8Array::from(receipt.pdf.as_slice()),
        )?;
        Ok(result.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_receipt_formatter() {
        assert_eq!(
            ReceiptFormatter::number_to_words(24500.0),
            "VEINTICUATRO MIL QUINIENTOS PESOS"
        );
        assert_eq!(ReceiptFormatter::format_currency(1234567.0), "$ 1.234.567");
        assert_eq!(ReceiptFormatter::format_date("2024-03-05").unwrap(), "05/03/2024");
    }

    #[wasm_bindgen_test]
    fn test_session_folio() {
        let session = ReceiptSession::new(0);
        assert_eq!(session.next_folio(), 1532.0);
        assert!(!session.busy());

        let session = ReceiptSession::new(2000);
        assert_eq!(session.next_folio(), 2000.0);
    }
}
