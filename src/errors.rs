use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlMiniError {
    InvalidUrl(String),
    DuplicateKey(String),
    AllocationExhausted(String),
    NotFound(String),
    StoreUnavailable(String),
    Config(String),
}

impl UrlMiniError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            UrlMiniError::InvalidUrl(_) => "E001",
            UrlMiniError::DuplicateKey(_) => "E002",
            UrlMiniError::AllocationExhausted(_) => "E003",
            UrlMiniError::NotFound(_) => "E004",
            UrlMiniError::StoreUnavailable(_) => "E005",
            UrlMiniError::Config(_) => "E006",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            UrlMiniError::InvalidUrl(_) => "Invalid URL",
            UrlMiniError::DuplicateKey(_) => "Duplicate Short ID",
            UrlMiniError::AllocationExhausted(_) => "Short ID Allocation Exhausted",
            UrlMiniError::NotFound(_) => "Resource Not Found",
            UrlMiniError::StoreUnavailable(_) => "Store Unavailable",
            UrlMiniError::Config(_) => "Configuration Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            UrlMiniError::InvalidUrl(msg)
            | UrlMiniError::DuplicateKey(msg)
            | UrlMiniError::AllocationExhausted(msg)
            | UrlMiniError::NotFound(msg)
            | UrlMiniError::StoreUnavailable(msg)
            | UrlMiniError::Config(msg) => msg,
        }
    }

    /// HTTP status the API layer answers with for this error
    pub fn http_status(&self) -> StatusCode {
        match self {
            UrlMiniError::InvalidUrl(_) => StatusCode::BAD_REQUEST,
            UrlMiniError::NotFound(_) => StatusCode::NOT_FOUND,
            UrlMiniError::DuplicateKey(_)
            | UrlMiniError::AllocationExhausted(_)
            | UrlMiniError::StoreUnavailable(_)
            | UrlMiniError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message that is safe to hand to a client.
    ///
    /// Internal failures collapse to a generic text; the detail stays in the logs.
    pub fn client_message(&self) -> &str {
        match self {
            UrlMiniError::InvalidUrl(msg) => msg,
            UrlMiniError::NotFound(_) => "short url not found",
            _ => "internal server error",
        }
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for UrlMiniError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for UrlMiniError {}

// 便捷的构造函数
impl UrlMiniError {
    pub fn invalid_url<T: Into<String>>(msg: T) -> Self {
        UrlMiniError::InvalidUrl(msg.into())
    }

    pub fn duplicate_key<T: Into<String>>(msg: T) -> Self {
        UrlMiniError::DuplicateKey(msg.into())
    }

    pub fn allocation_exhausted<T: Into<String>>(msg: T) -> Self {
        UrlMiniError::AllocationExhausted(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        UrlMiniError::NotFound(msg.into())
    }

    pub fn store_unavailable<T: Into<String>>(msg: T) -> Self {
        UrlMiniError::StoreUnavailable(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        UrlMiniError::Config(msg.into())
    }
}

impl From<sea_orm::DbErr> for UrlMiniError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(detail)) => {
                UrlMiniError::DuplicateKey(detail)
            }
            _ => UrlMiniError::StoreUnavailable(err.to_string()),
        }
    }
}

impl From<std::io::Error> for UrlMiniError {
    fn from(err: std::io::Error) -> Self {
        UrlMiniError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, UrlMiniError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(
            UrlMiniError::invalid_url("bad").http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            UrlMiniError::not_found("abc").http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            UrlMiniError::allocation_exhausted("x").http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            UrlMiniError::store_unavailable("db down").http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_client_message_hides_internal_detail() {
        let err = UrlMiniError::store_unavailable("connection refused at 10.0.0.3:5432");
        assert_eq!(err.client_message(), "internal server error");

        let err = UrlMiniError::not_found("no record for abcdefgh");
        assert_eq!(err.client_message(), "short url not found");

        let err = UrlMiniError::invalid_url("URL must start with http:// or https://");
        assert_eq!(
            err.client_message(),
            "URL must start with http:// or https://"
        );
    }

    #[test]
    fn test_codes_are_distinct() {
        let errors = [
            UrlMiniError::invalid_url(""),
            UrlMiniError::duplicate_key(""),
            UrlMiniError::allocation_exhausted(""),
            UrlMiniError::not_found(""),
            UrlMiniError::store_unavailable(""),
            UrlMiniError::config(""),
        ];
        let mut codes: Vec<_> = errors.iter().map(|e| e.code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_display_uses_simple_format() {
        let err = UrlMiniError::not_found("abcdefgh");
        assert_eq!(err.to_string(), "Resource Not Found: abcdefgh");
    }

    #[test]
    fn test_db_error_maps_to_store_unavailable() {
        let err: UrlMiniError = sea_orm::DbErr::Custom("boom".to_string()).into();
        assert!(matches!(err, UrlMiniError::StoreUnavailable(_)));
    }
}
