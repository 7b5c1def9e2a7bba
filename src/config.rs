//! # Layout Configuration
//!
//! Fixed geometry used when projecting a template onto a pixel surface.
//!
//! ## Reference Geometry
//!
//! | Property | Value |
//! |----------|-------|
//! | Unit scale | 10 px per unit |
//! | QR code | 50 × 50 px |
//! | Barcode | 2 px modules, 50 px bars, no value label |
//! | Logo | 50 × 50 px |
//! | Placeholder | 60 × 60 px |
//!
//! ## Usage
//!
//! ```
//! use talonario::config::LayoutConfig;
//!
//! let config = LayoutConfig::REFERENCE;
//! assert_eq!(config.to_px(5), 50);
//! ```

/// # Layout Configuration
///
/// Every size here is in pixels except `unit_px`, which converts template
/// units (the designer's "mm") into pixels.
///
/// ```text
/// x_px = x_units * unit_px
/// row_top_px = (line - 1) * unit_px
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutConfig {
    /// Preset name
    pub name: &'static str,

    /// Pixels per template unit
    pub unit_px: u32,

    /// Edge length of a rendered QR symbol
    pub qr_size_px: u32,

    /// Width of one barcode module
    pub barcode_module_px: u32,

    /// Height of the barcode bars
    pub barcode_height_px: u32,

    /// Whether barcodes print their value under the bars
    pub barcode_show_value: bool,

    /// Edge length of the logo box
    pub logo_size_px: u32,

    /// Edge length of a placeholder marker
    pub placeholder_size_px: u32,

    /// Image reference used when a logo has no source
    pub fallback_logo: &'static str,
}

impl LayoutConfig {
    /// Geometry of the designer preview.
    pub const REFERENCE: Self = Self {
        name: "reference",
        unit_px: 10,
        qr_size_px: 50,
        barcode_module_px: 2,
        barcode_height_px: 50,
        barcode_show_value: false,
        logo_size_px: 50,
        placeholder_size_px: 60,
        fallback_logo: "/placeholder.svg",
    };

    /// Same geometry with a different unit scale. A scale of 0 is raised to 1.
    pub fn with_unit_px(self, unit_px: u32) -> Self {
        Self {
            unit_px: unit_px.max(1),
            ..self
        }
    }

    /// Convert template units to pixels.
    #[inline]
    pub fn to_px(&self, units: u32) -> u32 {
        units.saturating_mul(self.unit_px)
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::REFERENCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_scale() {
        let config = LayoutConfig::default();
        assert_eq!(config, LayoutConfig::REFERENCE);
        assert_eq!(config.to_px(0), 0);
        assert_eq!(config.to_px(7), 70);
    }

    #[test]
    fn test_with_unit_px() {
        let config = LayoutConfig::REFERENCE.with_unit_px(4);
        assert_eq!(config.to_px(5), 20);
        assert_eq!(config.qr_size_px, 50);

        let zero = LayoutConfig::REFERENCE.with_unit_px(0);
        assert_eq!(zero.unit_px, 1);
    }

    #[test]
    fn test_to_px_saturates() {
        assert_eq!(LayoutConfig::REFERENCE.to_px(u32::MAX), u32::MAX);
    }
}
