use super::*;

/// The custom errors the contract can produce.
#[derive(Serialize, Debug, PartialEq, Eq, Reject, SchemaType)]
pub enum CustomContractError {
    /// Failed parsing the parameter (Error code: -1).
    #[from(ParseError)]
    ParseParams,
    /// Failed logging: Log is full (Error code: -2).
    LogFull,
    /// Failed logging: Log is malformed (Error code: -3).
    LogMalformed,
    /// NFT does not exist (Error code: -4).
    TokenNotFound,
    /// Price cannot be negative or zero (Error code: -5).
    InvalidPrice,
    /// Token is not listed for sale (Error code: -6).
    ListingNotFound,
    /// Listing is already inactive (Error code: -7).
    ListingInactive,
    /// Token is already listed for sale (Error code: -8).
    TokenAlreadyListedForSale,
    /// Attached payment does not match the listing price (Error code: -9).
    PriceMismatch,
    /// Only account addresses can perform this action (Error code: -10).
    OnlyAccountAddress,
    /// Metadata fields must not be empty (Error code: -11).
    InvalidMetadata,
    /// Failed to invoke a transfer (Error code: -12).
    InvokeTransferError,
}

/// Mapping the logging errors to CustomContractError.
impl From<LogError> for CustomContractError {
    fn from(le: LogError) -> Self {
        match le {
            LogError::Full => Self::LogFull,
            LogError::Malformed => Self::LogMalformed,
        }
    }
}

/// Mapping CustomContractError to ContractError.
impl From<CustomContractError> for ContractError {
    fn from(c: CustomContractError) -> Self {
        Cis2Error::Custom(c)
    }
}

/// Mapping errors related to transfer invocations to CustomContractError.
impl From<TransferError> for CustomContractError {
    fn from(_te: TransferError) -> Self {
        Self::InvokeTransferError
    }
}
