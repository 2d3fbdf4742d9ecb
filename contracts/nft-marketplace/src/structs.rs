use super::*;

/// The metadata record of an NFT, fixed at mint time.
#[derive(Debug, Serialize, SchemaType, Clone, Eq, PartialEq)]
pub struct TokenMetadata {
    /// Display name of the NFT
    pub name: String,
    /// Description of the NFT
    pub description: String,
    /// URI of the off-chain asset
    pub token_uri: String,
}

/// Ownership and metadata of a minted token.
#[derive(Serialize, Clone)]
pub struct TokenData {
    /// Address of the current holder
    pub owner: Address,
    /// Metadata record, immutable after minting
    pub metadata: TokenMetadata,
}

/// A sale offer for a minted token.
#[derive(Debug, Serialize, SchemaType, Clone, Copy, Eq, PartialEq)]
pub struct Listing {
    /// The address that created the listing
    pub seller: AccountAddress,
    /// Cost of NFT
    pub price: Amount,
    /// Whether the listing can still be bought or cancelled
    pub active: bool,
}

/// Minting Data.
#[derive(Debug, Serialize, SchemaType, Clone, Eq, PartialEq)]
pub struct MintParams {
    /// Display name of the NFT
    pub name: String,
    /// Description of the NFT
    pub description: String,
    /// URI of the off-chain asset
    pub token_uri: String,
}

/// Listing Data.
#[derive(Debug, Serialize, SchemaType, Clone, Eq, PartialEq)]
pub struct ListParams {
    /// Token to list for sale
    pub token_id: ContractTokenId,
    /// Cost of NFT
    pub price: Amount,
}

/// Update Price Params.
#[derive(Serialize, SchemaType, Clone, Eq, PartialEq)]
pub struct UpdatePriceParams {
    /// Token to update price
    pub token_id: ContractTokenId,
    /// New cost of NFT
    pub price: Amount,
}

/// The contract state.
#[derive(Serial, DeserialWithState, StateClone)]
#[concordium(state_parameter = "S")]
pub struct State<S: HasStateApi> {
    /// Minted tokens by token ID.
    pub tokens: StateMap<ContractTokenId, TokenData, S>,
    /// Metadata lookup by token URI. Minting with an already used URI is
    /// allowed and repoints the index at the newest token.
    pub uri_index: StateMap<String, ContractTokenId, S>,
    /// Sale listings by token ID. An inactive listing is retained until the
    /// token is listed again.
    pub listings: StateMap<ContractTokenId, Listing, S>,
    /// The token ID assigned by the next mint.
    pub next_token_id: u64,
}
