// Unified Error Handling Module
//
// Centralized error types for consistent error management across the crate

use thiserror::Error;

/// Main error type for binding operations
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Window error: {0}")]
    Window(#[from] WindowError),

    #[error("Capture error: {0}")]
    Capture(#[from] CaptureError),

    #[error("Version info error: {0}")]
    Version(#[from] VersionError),

    #[error("Windows API error: {0}")]
    Windows(String),
}

/// Window query errors
#[derive(Debug, Error)]
pub enum WindowError {
    #[error("Window not found: {0}")]
    NotFound(String),

    #[error("Enumeration failed: {0}")]
    EnumerationFailed(String),

    #[error("Text query failed: {0}")]
    TextQueryFailed(String),
}

/// GDI capture errors
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Failed to acquire device context")]
    DeviceContext,

    #[error("Failed to create bitmap ({width}x{height})")]
    BitmapCreation { width: i32, height: i32 },

    #[error("Bit-block transfer failed: {0}")]
    Transfer(String),

    #[error("Pixel readback failed: {0}")]
    PixelReadback(String),

    #[error("Invalid capture dimensions ({width}x{height})")]
    InvalidDimensions { width: i32, height: i32 },
}

/// Version-resource query errors
#[derive(Debug, Error)]
pub enum VersionError {
    #[error("No version resource: {0}")]
    NotFound(String),

    #[error("Version query failed: {0}")]
    QueryFailed(String),
}

/// Result type alias for convenience
pub type ApiResult<T> = Result<T, ApiError>;

/// Convert raw Windows errors into ApiError
#[cfg(windows)]
impl From<windows::core::Error> for ApiError {
    fn from(err: windows::core::Error) -> Self {
        ApiError::Windows(format!("{:?}", err))
    }
}

/// Helper trait for converting Windows results
#[cfg(windows)]
pub trait IntoApiResult<T> {
    fn into_api_result(self) -> ApiResult<T>;
}

#[cfg(windows)]
impl<T> IntoApiResult<T> for windows::core::Result<T> {
    fn into_api_result(self) -> ApiResult<T> {
        self.map_err(|e| ApiError::Windows(format!("{:?}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_wrap_into_api_error() {
        let err: ApiError = WindowError::NotFound("Notepad".to_string()).into();
        assert!(matches!(err, ApiError::Window(_)));

        let err: ApiError = CaptureError::DeviceContext.into();
        assert!(matches!(err, ApiError::Capture(_)));
    }

    #[test]
    fn display_carries_context() {
        let err = CaptureError::BitmapCreation {
            width: 800,
            height: 600,
        };
        assert_eq!(err.to_string(), "Failed to create bitmap (800x600)");

        let err: ApiError = VersionError::NotFound("C:\\x.dll".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Version info error: No version resource: C:\\x.dll"
        );
    }
}
