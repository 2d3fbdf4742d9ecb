use super::*;

/// An untagged event of a token being listed for sale.
#[derive(Debug, Serialize, SchemaType)]
pub struct ListingEvent {
    /// The ID of the token being listed.
    pub token_id: ContractTokenId,
    /// The listed sale price.
    pub price: Amount,
    /// The address that created the listing.
    pub seller: AccountAddress,
}

/// An untagged event of a listing being cancelled.
#[derive(Debug, Serialize, SchemaType)]
pub struct UnlistingEvent {
    /// The ID of the token being unlisted.
    pub token_id: ContractTokenId,
}

/// An untagged event of a listing price change.
#[derive(Debug, Serialize, SchemaType)]
pub struct UpdatePriceEvent {
    /// The ID of the token whose price is being updated.
    pub token_id: ContractTokenId,
    /// Previous price of Token.
    pub from: Amount,
    /// Updated price of Token.
    pub to: Amount,
}

/// An untagged event of a listed token being sold.
#[derive(Debug, Serialize, SchemaType)]
pub struct BuyEvent {
    /// The ID of the token being purchased.
    pub token_id: ContractTokenId,
    /// The address owning the token before the sale.
    pub seller: AccountAddress,
    /// The address owning the token after the sale.
    pub buyer: AccountAddress,
    /// The settled sale price.
    pub price: Amount,
}

/// Tagged Custom event to be serialized for the event log.
#[derive(Debug)]
pub enum CustomEvent {
    /// Listing NFT
    Listing(ListingEvent),
    /// Unlisting NFT
    Unlisting(UnlistingEvent),
    /// Updating price of a listed NFT
    UpdatePrice(UpdatePriceEvent),
    /// Buying NFT
    Buy(BuyEvent),
}

impl Serial for CustomEvent {
    fn serial<W: Write>(&self, out: &mut W) -> Result<(), W::Err> {
        match self {
            CustomEvent::Listing(event) => {
                out.write_u8(LISTING_TAG)?;
                event.serial(out)
            }
            CustomEvent::Unlisting(event) => {
                out.write_u8(UNLISTING_TAG)?;
                event.serial(out)
            }
            CustomEvent::UpdatePrice(event) => {
                out.write_u8(UPDATE_PRICE_TAG)?;
                event.serial(out)
            }
            CustomEvent::Buy(event) => {
                out.write_u8(BUY_TAG)?;
                event.serial(out)
            }
        }
    }
}

impl Deserial for CustomEvent {
    fn deserial<R: Read>(source: &mut R) -> ParseResult<Self> {
        let tag = source.read_u8()?;
        match tag {
            LISTING_TAG => ListingEvent::deserial(source).map(CustomEvent::Listing),
            UNLISTING_TAG => UnlistingEvent::deserial(source).map(CustomEvent::Unlisting),
            UPDATE_PRICE_TAG => {
                UpdatePriceEvent::deserial(source).map(CustomEvent::UpdatePrice)
            }
            BUY_TAG => BuyEvent::deserial(source).map(CustomEvent::Buy),
            _ => Err(ParseError::default()),
        }
    }
}
