use qrcode::QrCode;
use serde::{Deserialize, Serialize};

use super::error::{QRError, QRResult};

/// Side length of a finder pattern, in modules.
pub const FINDER_SIZE: usize = 7;

// Error correction level
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ECLevel {
    L,
    M,
    Q,
    #[default]
    H,
}

impl From<ECLevel> for qrcode::EcLevel {
    fn from(ecl: ECLevel) -> Self {
        match ecl {
            ECLevel::L => qrcode::EcLevel::L,
            ECLevel::M => qrcode::EcLevel::M,
            ECLevel::Q => qrcode::EcLevel::Q,
            ECLevel::H => qrcode::EcLevel::H,
        }
    }
}

impl ECLevel {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" => Some(Self::L),
            "M" => Some(Self::M),
            "Q" => Some(Self::Q),
            "H" => Some(Self::H),
            _ => None,
        }
    }
}

// Module matrix
//------------------------------------------------------------------------------

/// Square grid of dark (`true`) and light (`false`) modules, without quiet zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleMatrix {
    w: usize,
    grid: Vec<bool>,
}

impl ModuleMatrix {
    /// Encodes `payload` through the `qrcode` encoder.
    pub fn encode(payload: &[u8], ecl: ECLevel) -> QRResult<Self> {
        let code = QrCode::with_error_correction_level(payload, ecl.into())?;
        let w = code.width();
        let grid = code.to_colors().into_iter().map(|c| c == qrcode::Color::Dark).collect();
        log::debug!("Encoded {} bytes at level {ecl:?} into {w}x{w} modules", payload.len());
        Ok(Self { w, grid })
    }

    /// Wraps an existing row-major matrix.
    pub fn from_modules(w: usize, grid: Vec<bool>) -> QRResult<Self> {
        if w == 0 || grid.len() != w * w {
            return Err(QRError::InvalidMatrix(format!(
                "expected {} modules for width {w}, got {}",
                w * w,
                grid.len()
            )));
        }
        Ok(Self { w, grid })
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn get(&self, r: usize, c: usize) -> bool {
        debug_assert!(r < self.w && c < self.w, "Module ({r}, {c}) out of bounds");
        self.grid[r * self.w + c]
    }

    /// True when (r, c) lies in one of the three 7x7 finder pattern footprints.
    pub fn is_finder(&self, r: usize, c: usize) -> bool {
        let far = self.w.saturating_sub(FINDER_SIZE);
        (r < FINDER_SIZE && c < FINDER_SIZE)
            || (r < FINDER_SIZE && c >= far)
            || (r >= far && c < FINDER_SIZE)
    }

    /// Top-left module of each finder pattern: top-left, top-right, bottom-left.
    pub fn finder_anchors(&self) -> [(usize, usize); 3] {
        let far = self.w.saturating_sub(FINDER_SIZE);
        [(0, 0), (0, far), (far, 0)]
    }

    /// Dark modules outside the finder patterns, in row-major order.
    pub fn data_modules(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.w)
            .flat_map(move |r| (0..self.w).map(move |c| (r, c)))
            .filter(move |&(r, c)| self.get(r, c) && !self.is_finder(r, c))
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        let mut res = String::with_capacity(self.w * (self.w + 1) + 1);
        res.push('\n');
        for r in 0..self.w {
            for c in 0..self.w {
                res.push(match (self.get(r, c), self.is_finder(r, c)) {
                    (true, true) => 'f',
                    (false, true) => 'F',
                    (true, false) => 'd',
                    (false, false) => '.',
                });
            }
            res.push('\n');
        }
        res
    }
}

#[cfg(test)]
mod matrix_tests {
    use test_case::test_case;

    use super::{ECLevel, ModuleMatrix, FINDER_SIZE};

    #[test_case("https://example.com", ECLevel::H, 29)]
    #[test_case("OK", ECLevel::H, 21)]
    #[test_case("Hello, world!", ECLevel::L, 21)]
    fn test_encode_width(data: &str, ecl: ECLevel, exp_w: usize) {
        let matrix = ModuleMatrix::encode(data.as_bytes(), ecl).unwrap();
        assert_eq!(matrix.width(), exp_w);
    }

    #[test]
    fn test_encode_finder_corners_dark() {
        let matrix = ModuleMatrix::encode(b"finder", ECLevel::H).unwrap();
        let w = matrix.width();
        for (r, c) in matrix.finder_anchors() {
            assert!(matrix.get(r, c));
            assert!(matrix.get(r + 3, c + 3));
            assert!(!matrix.get(r + 1, c + 1));
        }
        assert!(!matrix.is_finder(w - 1, w - 1));
    }

    #[test]
    fn test_from_modules_rejects_bad_len() {
        assert!(ModuleMatrix::from_modules(21, vec![false; 440]).is_err());
        assert!(ModuleMatrix::from_modules(0, vec![]).is_err());
        assert!(ModuleMatrix::from_modules(21, vec![false; 441]).is_ok());
    }

    #[test]
    fn test_finder_classification() {
        let matrix = ModuleMatrix::from_modules(21, vec![true; 441]).unwrap();
        let finder = (0..21)
            .flat_map(|r| (0..21).map(move |c| (r, c)))
            .filter(|&(r, c)| matrix.is_finder(r, c))
            .count();
        assert_eq!(finder, 3 * FINDER_SIZE * FINDER_SIZE);
        assert!(matrix.is_finder(6, 6));
        assert!(matrix.is_finder(0, 14));
        assert!(matrix.is_finder(14, 0));
        assert!(!matrix.is_finder(7, 7));
        assert!(!matrix.is_finder(14, 14));
        assert_eq!(matrix.finder_anchors(), [(0, 0), (0, 14), (14, 0)]);
        assert_eq!(matrix.data_modules().count(), 441 - 147);
    }

    #[test]
    fn test_undersized_matrix_does_not_panic() {
        let matrix = ModuleMatrix::from_modules(3, vec![true; 9]).unwrap();
        assert_eq!(matrix.finder_anchors(), [(0, 0), (0, 0), (0, 0)]);
        assert_eq!(matrix.data_modules().count(), 0);
    }

    #[test]
    fn test_debug_str() {
        let matrix = ModuleMatrix::encode(b"OK", ECLevel::H).unwrap();
        let s = matrix.to_debug_str();
        assert_eq!(s.lines().filter(|l| !l.is_empty()).count(), 21);
        assert!(s.starts_with("\nfffffff"));
    }

    #[test]
    fn test_ec_level_parse() {
        assert_eq!(ECLevel::parse("h"), Some(ECLevel::H));
        assert_eq!(ECLevel::parse(" Q "), Some(ECLevel::Q));
        assert_eq!(ECLevel::parse("x"), None);
        assert_eq!(ECLevel::default(), ECLevel::H);
    }
}
