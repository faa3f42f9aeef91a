//! Issuer and page configuration

use crate::{PageSize, ReceiptError, Result};
use serde::{Deserialize, Serialize};

/// The business printing the receipts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct IssuerConfig {
    /// Name printed in bold at the top left
    pub name: String,

    /// RUT printed inside the folio box
    pub tax_id: String,

    /// Activity, address and contact lines under the name
    pub detail_lines: Vec<String>,

    /// Tax office label under the folio box
    pub office: String,
}

impl Default for IssuerConfig {
    fn default() -> Self {
        Self {
            name: "PRO HOME SPA".to_string(),
            tax_id: "77.132.948-9".to_string(),
            detail_lines: vec![
                "ACTIVIDADES INMOBILIARIAS REALIZADAS A CAMBIO".to_string(),
                "DE UNA RETRIBUCION O POR".to_string(),
                "Avenida Balmaceda 2455 oficina 1209, ANTOFAGASTA".to_string(),
                "Teléfono: 56931319706".to_string(),
                "Email: contacto@pro-home.cl".to_string(),
            ],
            office: "S.I.I. - Antofagasta".to_string(),
        }
    }
}

/// Receipt configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ReceiptConfig {
    pub issuer: IssuerConfig,

    pub page: PageSize,

    /// Page margin on every side, in millimetres
    pub margin_mm: f64,
}

impl Default for ReceiptConfig {
    fn default() -> Self {
        Self {
            issuer: IssuerConfig::default(),
            page: PageSize::LETTER,
            margin_mm: 14.0,
        }
    }
}

impl ReceiptConfig {
    /// Load configuration from JSON; missing keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ReceiptError::Parse(e.to_string()))
    }
}
