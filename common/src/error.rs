//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    /// カタログ内で同じ名前が2回以上登場した（ラベルをまたぐ場合も含む）
    #[error("Duplicate food in catalog: {name}")]
    DuplicateFood { name: String },

    #[error("Invalid food entry '{name}': {reason}")]
    InvalidFood { name: String, reason: String },

    #[error("Please enter a food name")]
    EmptyQuery,
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = Error::Io(io_error);
        let display = format!("{}", error);
        assert!(display.contains("IO error"));
        assert!(display.contains("file not found"));
    }

    #[test]
    fn test_error_display_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let error = Error::Json(json_error);
        assert!(format!("{}", error).contains("JSON error"));
    }

    #[test]
    fn test_error_display_duplicate() {
        let error = Error::DuplicateFood { name: "pancake".to_string() };
        assert_eq!(format!("{}", error), "Duplicate food in catalog: pancake");
    }

    #[test]
    fn test_error_display_invalid_food() {
        let error = Error::InvalidFood {
            name: "  ".to_string(),
            reason: "name is empty".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Invalid food entry"));
        assert!(display.contains("name is empty"));
    }

    #[test]
    fn test_error_from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let error: Error = io_error.into();
        assert!(matches!(error, Error::Io(_)));
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
    }
}
