use super::*;

// Functions for creating, updating and querying the contract state.
impl<S: HasStateApi> State<S> {
    /// Creates an empty state with no tokens and no listings. Token IDs are
    /// assigned from 1.
    pub fn empty(state_builder: &mut StateBuilder<S>) -> Self {
        State {
            tokens: state_builder.new_map(),
            uri_index: state_builder.new_map(),
            listings: state_builder.new_map(),
            next_token_id: 1,
        }
    }

    /// Mint a new token with a given address as the owner.
    /// Allocates the next sequential token ID and fixes the metadata.
    ///
    /// Results in an error if any metadata field is empty.
    pub fn mint(
        &mut self,
        owner: Address,
        params: MintParams,
    ) -> ContractResult<ContractTokenId> {
        ensure!(
            !params.name.is_empty()
                && !params.description.is_empty()
                && !params.token_uri.is_empty(),
            CustomContractError::InvalidMetadata.into()
        );

        let token_id = TokenIdU64(self.next_token_id);
        self.next_token_id += 1;

        self.uri_index.insert(params.token_uri.clone(), token_id);
        self.tokens.insert(
            token_id,
            TokenData {
                owner,
                metadata: TokenMetadata {
                    name: params.name,
                    description: params.description,
                    token_uri: params.token_uri,
                },
            },
        );

        Ok(token_id)
    }

    /// Get the current owner of a token.
    /// Results in an error if the token ID does not exist in the state.
    pub fn owner_of(&self, token_id: &ContractTokenId) -> ContractResult<Address> {
        Ok(self
            .tokens
            .get(token_id)
            .ok_or(ContractError::Custom(CustomContractError::TokenNotFound))?
            .owner)
    }

    /// Get the metadata record of a token.
    /// Results in an error if the token ID does not exist in the state.
    pub fn metadata_of(&self, token_id: &ContractTokenId) -> ContractResult<TokenMetadata> {
        Ok(self
            .tokens
            .get(token_id)
            .ok_or(ContractError::Custom(CustomContractError::TokenNotFound))?
            .metadata
            .clone())
    }

    /// Add a listing for a minted token.
    ///
    /// Results in an error if the
    /// - token ID does not exist in the state
    /// - price is not strictly positive
    /// - sender is not the token owner or not an account address
    /// - token is already listed for sale
    pub fn list(&mut self, sender: Address, params: &ListParams) -> ContractResult<ListingEvent> {
        let seller = get_account_address(sender)?;
        let owner = self
            .tokens
            .get(&params.token_id)
            .ok_or(ContractError::Custom(CustomContractError::TokenNotFound))?
            .owner;

        ensure!(
            params.price > Amount::zero(),
            CustomContractError::InvalidPrice.into()
        );

        // Ensuring only owner of NFT can list.
        ensure!(owner == sender, ContractError::Unauthorized);

        // Ensuring token is not already listed for sale. A listing that was
        // cancelled or sold earlier is overwritten by the new one.
        ensure!(
            !self
                .listings
                .get(&params.token_id)
                .map_or(false, |listing| listing.active),
            CustomContractError::TokenAlreadyListedForSale.into()
        );

        self.listings.insert(
            params.token_id,
            Listing {
                seller,
                price: params.price,
                active: true,
            },
        );

        Ok(ListingEvent {
            token_id: params.token_id,
            price: params.price,
            seller,
        })
    }

    /// Cancel a listing. The listing record is retained and marked inactive;
    /// ownership is not affected.
    ///
    /// Results in an error if the
    /// - listing does not exist or is already inactive
    /// - sender is not the seller
    pub fn unlist(
        &mut self,
        sender: Address,
        token_id: &ContractTokenId,
    ) -> ContractResult<UnlistingEvent> {
        let mut listing = match self.listings.get_mut(token_id) {
            Some(listing) => listing,
            // A listing that never existed reports the same state error as a
            // cancelled one.
            None => bail!(CustomContractError::ListingInactive.into()),
        };

        ensure!(listing.active, CustomContractError::ListingInactive.into());

        // Ensuring only seller can cancel the listing.
        ensure!(
            sender.matches_account(&listing.seller),
            ContractError::Unauthorized
        );

        listing.active = false;

        Ok(UnlistingEvent {
            token_id: *token_id,
        })
    }

    /// Replace the price of an active listing.
    ///
    /// Results in an error if the
    /// - listing does not exist
    /// - listing is inactive
    /// - sender is not the seller
    /// - new price is not strictly positive
    pub fn update_price(
        &mut self,
        sender: Address,
        params: &UpdatePriceParams,
    ) -> ContractResult<UpdatePriceEvent> {
        let mut listing = self
            .listings
            .get_mut(&params.token_id)
            .ok_or(ContractError::Custom(CustomContractError::ListingNotFound))?;

        ensure!(listing.active, CustomContractError::ListingInactive.into());

        // Ensuring only seller can change the price.
        ensure!(
            sender.matches_account(&listing.seller),
            ContractError::Unauthorized
        );

        ensure!(
            params.price > Amount::zero(),
            CustomContractError::InvalidPrice.into()
        );

        let from = listing.price;
        listing.price = params.price;

        Ok(UpdatePriceEvent {
            token_id: params.token_id,
            from,
            to: params.price,
        })
    }

    /// Settle a sale: transfer ownership to the buyer and deactivate the
    /// listing. The attached payment has already been credited to the
    /// contract balance by the host.
    ///
    /// Results in an error if the
    /// - listing does not exist
    /// - listing is inactive
    /// - attached amount differs from the listing price
    /// - buyer is the seller
    pub fn settle(
        &mut self,
        buyer: AccountAddress,
        token_id: &ContractTokenId,
        amount: Amount,
    ) -> ContractResult<BuyEvent> {
        let (seller, price) = {
            let mut listing = self
                .listings
                .get_mut(token_id)
                .ok_or(ContractError::Custom(CustomContractError::ListingNotFound))?;

            ensure!(listing.active, CustomContractError::ListingInactive.into());

            // Ensuring the attached payment matches the listing price exactly.
            ensure!(
                amount == listing.price,
                CustomContractError::PriceMismatch.into()
            );

            // Ensuring anyone can buy except the seller.
            ensure!(buyer.ne(&listing.seller), ContractError::Unauthorized);

            listing.active = false;
            (listing.seller, listing.price)
        };

        let mut token = self
            .tokens
            .get_mut(token_id)
            .ok_or(ContractError::Custom(CustomContractError::TokenNotFound))?;
        token.owner = Address::Account(buyer);

        Ok(BuyEvent {
            token_id: *token_id,
            seller,
            buyer,
            price,
        })
    }
}
