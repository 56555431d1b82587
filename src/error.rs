use actix_web::http::StatusCode;
use actix_web::ResponseError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CspError {
    #[error("The passed in option should be an object.")]
    ConfigNotObject,

    #[error("The passed in option should have \"directives\" key as an object.")]
    DirectivesMissing,

    #[error("The directives object should have at least one directive.")]
    DirectivesEmpty,

    #[error("No such directive named {0}.")]
    UnknownDirective(String),

    #[error("\"{value}\" is not an array or empty in {directive}")]
    DirectiveNotArray { directive: String, value: String },

    #[error("\"{value}\" is not a valid value in {directive}.")]
    DirectiveNotValidValue { directive: String, value: String },

    #[error("\"{value}\" does not make sense in {directive}.")]
    DirectiveNotMakeSense { directive: String, value: String },

    #[error("\"{value}\" must be quoted in {directive}. Change it to \"'{value}'\" in your option.")]
    DirectiveMustQuote { directive: String, value: String },

    #[error("Header processing error: {0}")]
    HeaderError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Crypto error: {0}")]
    CryptoError(String),
}

impl CspError {
    pub(crate) fn not_array(directive: &str, value: impl ToString) -> Self {
        Self::DirectiveNotArray {
            directive: directive.to_owned(),
            value: value.to_string(),
        }
    }

    pub(crate) fn not_valid_value(directive: &str, value: impl ToString) -> Self {
        Self::DirectiveNotValidValue {
            directive: directive.to_owned(),
            value: value.to_string(),
        }
    }

    pub(crate) fn not_make_sense(directive: &str, value: impl ToString) -> Self {
        Self::DirectiveNotMakeSense {
            directive: directive.to_owned(),
            value: value.to_string(),
        }
    }

    pub(crate) fn must_quote(directive: &str, value: impl ToString) -> Self {
        Self::DirectiveMustQuote {
            directive: directive.to_owned(),
            value: value.to_string(),
        }
    }

    /// True for the errors raised while validating a policy configuration.
    pub fn is_validation_error(&self) -> bool {
        !matches!(
            self,
            Self::HeaderError(_) | Self::SerializationError(_) | Self::CryptoError(_)
        )
    }
}

impl ResponseError for CspError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}
