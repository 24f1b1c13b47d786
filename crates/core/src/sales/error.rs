//! Sale operation errors.

use thiserror::Error;

use crate::store::StoreError;

/// Sale operation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaleError {
    /// The ID is empty or does not resolve to a sale.
    #[error("Invalid resource id.")]
    InvalidId {
        /// Status to surface: 404 on read, 400 on update.
        status: u16,
    },

    /// A date field is neither empty nor `YYYY-MM-DD`.
    #[error("Invalid date for {0}, expected YYYY-MM-DD.")]
    InvalidDate(&'static str),

    /// An amount or total is outside the representable range.
    #[error("Amount out of range for {0}.")]
    InvalidAmount(&'static str),

    /// The store rejected the operation.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A sale that was just written could not be read back.
    #[error("sale {0} missing after write")]
    Missing(i64),
}

impl SaleError {
    /// Not found on read.
    #[must_use]
    pub const fn not_found() -> Self {
        Self::InvalidId { status: 404 }
    }

    /// Unknown target on update.
    #[must_use]
    pub const fn invalid_target() -> Self {
        Self::InvalidId { status: 400 }
    }

    /// HTTP status for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidId { status } => *status,
            Self::InvalidDate(_) | Self::InvalidAmount(_) => 400,
            Self::Store(err) => err.status,
            Self::Missing(_) => 500,
        }
    }

    /// Machine-readable error code.
    #[must_use]
    pub fn error_code(&self) -> &str {
        match self {
            Self::InvalidId { .. } => "rest_sale_invalid_id",
            Self::InvalidDate(_) => "rest_sale_invalid_date",
            Self::InvalidAmount(_) => "rest_sale_invalid_amount",
            Self::Store(err) => &err.code,
            Self::Missing(_) => "rest_sale_missing",
        }
    }

    /// Human-readable message; store errors pass their own message through.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Store(err) => err.message.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(SaleError::not_found(), 404, "rest_sale_invalid_id")]
    #[case(SaleError::invalid_target(), 400, "rest_sale_invalid_id")]
    #[case(SaleError::InvalidDate("issue_date"), 400, "rest_sale_invalid_date")]
    #[case(SaleError::InvalidAmount("sub_total"), 400, "rest_sale_invalid_amount")]
    #[case(SaleError::Missing(3), 500, "rest_sale_missing")]
    fn test_status_and_code(#[case] err: SaleError, #[case] status: u16, #[case] code: &str) {
        assert_eq!(err.status_code(), status);
        assert_eq!(err.error_code(), code);
    }

    #[test]
    fn test_store_error_passes_through() {
        let err = SaleError::from(StoreError::new(
            404,
            "erp_ac_transaction_not_found",
            "Transaction not found.",
        ));

        assert_eq!(err.status_code(), 404);
        assert_eq!(err.error_code(), "erp_ac_transaction_not_found");
        assert_eq!(err.message(), "Transaction not found.");
    }

    #[test]
    fn test_invalid_id_message() {
        assert_eq!(SaleError::not_found().message(), "Invalid resource id.");
    }
}
