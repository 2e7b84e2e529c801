use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlShortError {
    Validation(String),
    AliasInUse(String),
    NotFound(String),
    Expired(String),
    RandomSource(String),
    TokenExhausted(String),
    TokenConflict(String),
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    FileOperation(String),
    Serialization(String),
}

impl UrlShortError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            UrlShortError::Validation(_) => "E001",
            UrlShortError::AliasInUse(_) => "E002",
            UrlShortError::NotFound(_) => "E003",
            UrlShortError::Expired(_) => "E004",
            UrlShortError::RandomSource(_) => "E005",
            UrlShortError::TokenExhausted(_) => "E006",
            UrlShortError::TokenConflict(_) => "E007",
            UrlShortError::DatabaseConfig(_) => "E008",
            UrlShortError::DatabaseConnection(_) => "E009",
            UrlShortError::DatabaseOperation(_) => "E010",
            UrlShortError::FileOperation(_) => "E011",
            UrlShortError::Serialization(_) => "E012",
        }
    }

    /// Human readable error category
    pub fn error_type(&self) -> &'static str {
        match self {
            UrlShortError::Validation(_) => "Validation Error",
            UrlShortError::AliasInUse(_) => "Alias In Use",
            UrlShortError::NotFound(_) => "Not Found",
            UrlShortError::Expired(_) => "Link Expired",
            UrlShortError::RandomSource(_) => "Random Source Error",
            UrlShortError::TokenExhausted(_) => "Token Exhausted",
            UrlShortError::TokenConflict(_) => "Token Conflict",
            UrlShortError::DatabaseConfig(_) => "Database Configuration Error",
            UrlShortError::DatabaseConnection(_) => "Database Connection Error",
            UrlShortError::DatabaseOperation(_) => "Database Operation Error",
            UrlShortError::FileOperation(_) => "File Operation Error",
            UrlShortError::Serialization(_) => "Serialization Error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            UrlShortError::Validation(msg)
            | UrlShortError::AliasInUse(msg)
            | UrlShortError::NotFound(msg)
            | UrlShortError::Expired(msg)
            | UrlShortError::RandomSource(msg)
            | UrlShortError::TokenExhausted(msg)
            | UrlShortError::TokenConflict(msg)
            | UrlShortError::DatabaseConfig(msg)
            | UrlShortError::DatabaseConnection(msg)
            | UrlShortError::DatabaseOperation(msg)
            | UrlShortError::FileOperation(msg)
            | UrlShortError::Serialization(msg) => msg,
        }
    }

    /// HTTP status this error maps to
    ///
    /// Only user-correctable errors and lookup misses get a non-500 status;
    /// everything else is reported as an opaque internal error.
    pub fn http_status(&self) -> u16 {
        match self {
            UrlShortError::Validation(_) | UrlShortError::AliasInUse(_) => 400,
            UrlShortError::NotFound(_) => 404,
            UrlShortError::Expired(_) => 410,
            _ => 500,
        }
    }

    pub fn is_internal(&self) -> bool {
        self.http_status() >= 500
    }

    /// Colored rendering for terminal output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for UrlShortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for UrlShortError {}

impl UrlShortError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        UrlShortError::Validation(msg.into())
    }

    pub fn alias_in_use<T: Into<String>>(msg: T) -> Self {
        UrlShortError::AliasInUse(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        UrlShortError::NotFound(msg.into())
    }

    pub fn expired<T: Into<String>>(msg: T) -> Self {
        UrlShortError::Expired(msg.into())
    }

    pub fn random_source<T: Into<String>>(msg: T) -> Self {
        UrlShortError::RandomSource(msg.into())
    }

    pub fn token_exhausted<T: Into<String>>(msg: T) -> Self {
        UrlShortError::TokenExhausted(msg.into())
    }

    pub fn token_conflict<T: Into<String>>(msg: T) -> Self {
        UrlShortError::TokenConflict(msg.into())
    }

    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        UrlShortError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        UrlShortError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        UrlShortError::DatabaseOperation(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        UrlShortError::FileOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        UrlShortError::Serialization(msg.into())
    }
}

impl From<sea_orm::DbErr> for UrlShortError {
    fn from(err: sea_orm::DbErr) -> Self {
        UrlShortError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for UrlShortError {
    fn from(err: std::io::Error) -> Self {
        UrlShortError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for UrlShortError {
    fn from(err: serde_json::Error) -> Self {
        UrlShortError::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for UrlShortError {
    fn from(err: toml::ser::Error) -> Self {
        UrlShortError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, UrlShortError>;
