use thiserror::Error;

// Error
//------------------------------------------------------------------------------

/// Hard failures of the renderer. Everything recoverable (bad design fields,
/// unknown styles, missing logos) degrades to a default instead of erroring.
#[derive(Debug, Error)]
pub enum QRError {
    // Matrix
    #[error("QR encoding failed: {0}")]
    Encode(#[from] qrcode::types::QrError),
    #[error("Invalid module matrix: {0}")]
    InvalidMatrix(String),

    // Output
    #[error("Image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    // Config & io
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type QRResult<T> = Result<T, QRError>;

#[cfg(test)]
mod error_tests {
    use super::QRError;

    #[test]
    fn test_display() {
        let err = QRError::InvalidMatrix("expected 441 modules, got 3".to_string());
        assert_eq!(err.to_string(), "Invalid module matrix: expected 441 modules, got 3");

        let err: QRError = qrcode::types::QrError::DataTooLong.into();
        assert!(err.to_string().starts_with("QR encoding failed"));
    }
}
