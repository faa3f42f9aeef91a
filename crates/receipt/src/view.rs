//! Read-only display model of a receipt

use crate::layout::non_zero;
use crate::{InvoiceLineItem, InvoiceRecord, Result};
use chile_text::{format_clp, format_date_cl, number_to_words, round_amount};
use serde::Serialize;

/// One display row with its computed total
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRow {
    /// 1-based row number
    pub index: usize,
    pub code: String,
    pub description: String,
    pub quantity: f64,
    /// Blank when zero, as in the printed table
    pub unit_price: String,
    pub discount: String,
    pub line_total: f64,
    pub formatted_total: String,
}

impl InvoiceRow {
    fn new(index: usize, item: &InvoiceLineItem) -> Self {
        let line_total = item.line_total();
        Self {
            index,
            code: item.code.clone(),
            description: item.description.clone(),
            quantity: item.quantity(),
            unit_price: non_zero(item.unit_price(), format_clp),
            discount: non_zero(item.discount(), format_clp),
            line_total,
            formatted_total: format_clp(line_total),
        }
    }
}

/// Display view over a record
#[derive(Debug, Clone, Copy)]
pub struct InvoiceView<'a> {
    record: &'a InvoiceRecord,
}

impl<'a> InvoiceView<'a> {
    pub fn new(record: &'a InvoiceRecord) -> Self {
        Self { record }
    }

    pub fn rows(&self) -> Vec<InvoiceRow> {
        self.record
            .line_items
            .iter()
            .enumerate()
            .map(|(i, item)| InvoiceRow::new(i + 1, item))
            .collect()
    }

    pub fn total(&self) -> f64 {
        self.record.grand_total()
    }

    pub fn formatted_total(&self) -> String {
        format_clp(self.total())
    }

    /// Amount in words, empty unless the total rounds to a positive peso
    pub fn total_in_words(&self) -> String {
        let amount = round_amount(self.total());
        if amount > 0 {
            number_to_words(amount)
        } else {
            String::new()
        }
    }

    pub fn formatted_date(&self) -> Result<String> {
        Ok(format_date_cl(&self.record.document_date)?)
    }

    pub fn folio(&self) -> u64 {
        self.record.folio_number
    }

    pub fn recipient_name(&self) -> &str {
        &self.record.recipient_name
    }

    pub fn recipient_tax_id(&self) -> &str {
        &self.record.recipient_tax_id
    }

    pub fn comment(&self) -> &str {
        &self.record.comment
    }
}
