//! The DOM exception value: a structured error with a name, a message, and
//! an origin location, returned by value rather than raised through a panic
//! or out-of-band control flow.
//!
//! SPECLINK: https://webidl.spec.whatwg.org/#idl-DOMException

use std::fmt;
use std::panic::Location;

/// A `DOMException` as produced by the insertion pipeline and element-name
/// validation. Only three names (`HierarchyRequestError`, `NotFoundError`,
/// `InvalidCharacterError`) are ever constructed by this core, but the full
/// error-names table is carried so the type is a complete vocabulary for
/// callers implementing their own hooks.
#[derive(Debug, Clone, Copy, thiserror::Error)]
#[error("{name}: {message}")]
pub struct DomException {
    pub name: ErrorName,
    pub message: &'static str,
    pub code: u16,
    pub origin: &'static Location<'static>,
}

impl PartialEq for DomException {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.message == other.message
    }
}
impl Eq for DomException {}

impl DomException {
    #[track_caller]
    pub fn new(name: ErrorName) -> Self {
        let (message, code) = name.message_and_code();
        DomException {
            name,
            message,
            code,
            origin: Location::caller(),
        }
    }
}

// SPECLINK: https://webidl.spec.whatwg.org/#dfn-error-names-table
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub enum ErrorName {
    HierarchyRequestError,
    WrongDocumentError,
    InvalidCharacterError,
    NoModificationAllowedError,
    NotFoundError,
    NotSupportedError,
    InUseAttributeError,
    InvalidStateError,
    SyntaxError,
    InvalidModificationError,
    NamespaceError,
    SecurityError,
    NetworkError,
    AbortError,
    QuotaExceededError,
    TimeoutError,
    InvalidNodeTypeError,
    DataCloneError,
    EncodingError,
    NotReadableError,
    UnknownError,
    ConstraintError,
    DataError,
    TransactionInactiveError,
    ReadOnlyError,
    VersionError,
    OperationError,
    NotAllowedError,
    OptOutError,
}

impl fmt::Display for ErrorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Wire token: spelled exactly as in the WebIDL error-names table.
        write!(f, "{self:?}")
    }
}

impl std::error::Error for ErrorName {}

impl ErrorName {
    fn message_and_code(self) -> (&'static str, u16) {
        match self {
            ErrorName::HierarchyRequestError => (
                "The operation would yield an incorrect node tree.",
                DomException::HIERARCHY_REQUEST_ERR,
            ),
            ErrorName::WrongDocumentError => (
                "The object is in the wrong document.",
                DomException::WRONG_DOCUMENT_ERR,
            ),
            ErrorName::InvalidCharacterError => (
                "The string contains invalid characters.",
                DomException::INVALID_CHARACTER_ERR,
            ),
            ErrorName::NoModificationAllowedError => (
                "The object can not be modified.",
                DomException::NO_MODIFICATION_ALLOWED_ERR,
            ),
            ErrorName::NotFoundError => (
                "The object can not be found here.",
                DomException::NOT_FOUND_ERR,
            ),
            ErrorName::NotSupportedError => (
                "The operation is not supported.",
                DomException::NOT_SUPPORTED_ERR,
            ),
            ErrorName::InUseAttributeError => (
                "The attribute is in use by another element.",
                DomException::INUSE_ATTRIBUTE_ERR,
            ),
            ErrorName::InvalidStateError => (
                "The object is in an invalid state.",
                DomException::INVALID_STATE_ERR,
            ),
            ErrorName::SyntaxError => (
                "The string did not match the expected pattern.",
                DomException::SYNTAX_ERR,
            ),
            ErrorName::InvalidModificationError => (
                "The object can not be modified in this way.",
                DomException::INVALID_MODIFICATION_ERR,
            ),
            ErrorName::NamespaceError => (
                "The operation is not allowed by Namespaces in XML.",
                DomException::NAMESPACE_ERR,
            ),
            ErrorName::SecurityError => ("The operation is insecure.", DomException::SECURITY_ERR),
            ErrorName::NetworkError => ("A network error occurred.", DomException::NETWORK_ERR),
            ErrorName::AbortError => ("The operation was aborted.", DomException::ABORT_ERR),
            ErrorName::QuotaExceededError => ("", DomException::QUOTA_EXCEEDED_ERR),
            ErrorName::TimeoutError => ("", DomException::TIMEOUT_ERR),
            ErrorName::InvalidNodeTypeError => ("", DomException::INVALID_NODE_TYPE_ERR),
            ErrorName::DataCloneError => ("", DomException::DATA_CLONE_ERR),
            ErrorName::EncodingError
            | ErrorName::NotReadableError
            | ErrorName::UnknownError
            | ErrorName::ConstraintError
            | ErrorName::DataError
            | ErrorName::TransactionInactiveError
            | ErrorName::ReadOnlyError
            | ErrorName::VersionError
            | ErrorName::OperationError
            | ErrorName::NotAllowedError
            | ErrorName::OptOutError => ("", 0),
        }
    }
}

impl DomException {
    pub const INDEX_SIZE_ERR: u16 = 1;
    pub const DOMSTRING_SIZE_ERR: u16 = 2;
    pub const HIERARCHY_REQUEST_ERR: u16 = 3;
    pub const WRONG_DOCUMENT_ERR: u16 = 4;
    pub const INVALID_CHARACTER_ERR: u16 = 5;
    pub const NO_DATA_ALLOWED_ERR: u16 = 6;
    pub const NO_MODIFICATION_ALLOWED_ERR: u16 = 7;
    pub const NOT_FOUND_ERR: u16 = 8;
    pub const NOT_SUPPORTED_ERR: u16 = 9;
    pub const INUSE_ATTRIBUTE_ERR: u16 = 10;
    pub const INVALID_STATE_ERR: u16 = 11;
    pub const SYNTAX_ERR: u16 = 12;
    pub const INVALID_MODIFICATION_ERR: u16 = 13;
    pub const NAMESPACE_ERR: u16 = 14;
    pub const INVALID_ACCESS_ERR: u16 = 15;
    pub const VALIDATION_ERR: u16 = 16;
    pub const TYPE_MISMATCH_ERR: u16 = 17;
    pub const SECURITY_ERR: u16 = 18;
    pub const NETWORK_ERR: u16 = 19;
    pub const ABORT_ERR: u16 = 20;
    pub const URL_MISMATCH_ERR: u16 = 21;
    pub const QUOTA_EXCEEDED_ERR: u16 = 22;
    pub const TIMEOUT_ERR: u16 = 23;
    pub const INVALID_NODE_TYPE_ERR: u16 = 24;
    pub const DATA_CLONE_ERR: u16 = 25;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hierarchy_request_error_has_expected_code_and_name() {
        let err = DomException::new(ErrorName::HierarchyRequestError);
        assert_eq!(err.code, DomException::HIERARCHY_REQUEST_ERR);
        assert_eq!(err.name.to_string(), "HierarchyRequestError");
        assert!(!err.message.is_empty());
    }

    #[test]
    fn origin_location_points_at_the_call_site() {
        let err = DomException::new(ErrorName::NotFoundError);
        assert!(err.origin.file().ends_with("error.rs"));
    }
}
