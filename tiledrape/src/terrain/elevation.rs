//! RGB-encoded elevation decoding.

use serde::Serialize;

/// Linear decoder from RGB channels to an elevation in meters.
///
/// `height = r * r_scaler + g * g_scaler + b * b_scaler + offset`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ElevationDecoder {
    pub r_scaler: f64,
    pub g_scaler: f64,
    pub b_scaler: f64,
    pub offset: f64,
}

impl ElevationDecoder {
    /// Terrarium encoding used by the AWS open terrain tiles.
    pub fn terrarium() -> Self {
        Self {
            r_scaler: 256.0,
            g_scaler: 1.0,
            b_scaler: 1.0 / 256.0,
            offset: -32768.0,
        }
    }

    /// Mapbox Terrain-RGB encoding.
    pub fn mapbox() -> Self {
        Self {
            r_scaler: 6553.6,
            g_scaler: 25.6,
            b_scaler: 0.1,
            offset: -10000.0,
        }
    }

    #[inline]
    pub fn decode(&self, r: u8, g: u8, b: u8) -> f64 {
        r as f64 * self.r_scaler + g as f64 * self.g_scaler + b as f64 * self.b_scaler + self.offset
    }
}

impl Default for ElevationDecoder {
    fn default() -> Self {
        Self::terrarium()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terrarium_sea_level() {
        // 32768 = 128 * 256
        assert_eq!(ElevationDecoder::terrarium().decode(128, 0, 0), 0.0);
    }

    #[test]
    fn test_terrarium_fractional() {
        let height = ElevationDecoder::terrarium().decode(128, 10, 128);
        assert!((height - 10.5).abs() < 1e-9);
    }

    #[test]
    fn test_mapbox_decoding() {
        // (1 * 65536 + 134 * 256 + 160) * 0.1 - 10000
        let height = ElevationDecoder::mapbox().decode(1, 134, 160);
        assert!((height - 0.0).abs() < 1e-6);
    }
}
