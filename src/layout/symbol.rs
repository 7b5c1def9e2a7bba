//! Symbol encoding for QR codes and 1D barcodes.
//!
//! Uses the qrcode crate for QR and the barcoders crate for Code 39 and
//! Code 128. Encoding never fails outward: an unencodable value yields an
//! empty symbol, which draws as nothing.

use barcoders::sym::code39::Code39;
use barcoders::sym::code128::Code128;
use log::warn;
use serde::Serialize;

/// 1D barcode symbology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Symbology {
    Code128,
    Code39,
}

/// Square QR module matrix, row-major, `true` = dark.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct QrMatrix {
    /// Modules per side (0 when encoding failed).
    pub width: usize,
    /// `width * width` modules, row-major
    pub modules: Vec<bool>,
}

impl QrMatrix {
    /// Whether the module at `(x, y)` is dark. Out of range is light.
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.width && self.modules[y * self.width + x]
    }
}

/// Encode a value as a QR symbol. The empty string is a valid payload.
pub fn encode_qr(data: &str) -> QrMatrix {
    use qrcode::{Color, QrCode};

    let code = match QrCode::new(data.as_bytes()) {
        Ok(code) => code,
        Err(e) => {
            warn!("QR encoding failed for {:?}: {}", data, e);
            return QrMatrix::default();
        }
    };

    let width = code.width();
    let modules = code
        .to_colors()
        .into_iter()
        .map(|c| c == Color::Dark)
        .collect();

    QrMatrix { width, modules }
}

/// Encode a value as barcode modules, `true` = bar (black), `false` = space.
///
/// One entry per module; the caller scales modules to pixels.
pub fn encode_bars(symbology: Symbology, data: &str) -> Vec<bool> {
    let encoded = match symbology {
        Symbology::Code39 => Code39::new(&data.to_uppercase()).map(|b| b.encode()),
        // Code128 requires a character set prefix:
        // - Character Set A (Ā): uppercase, control chars, digits
        // - Character Set B (Ɓ): uppercase, lowercase, digits, special chars
        // - Character Set C (Ć): digit pairs only (high density)
        // Set B covers the widest range of printable characters.
        Symbology::Code128 => Code128::new(&format!("\u{0181}{}", data)).map(|b| b.encode()),
    };

    match encoded {
        Ok(modules) => modules.into_iter().map(|m| m == 1).collect(),
        Err(e) => {
            warn!("{:?} encoding failed for {:?}: {:?}", symbology, data, e);
            Vec::new()
        }
    }
}
