use super::*;

/// Initialize the marketplace with no tokens and no listings.
#[init(contract = "NftMarketplace")]
fn init<S: HasStateApi>(
    _ctx: &impl HasInitContext,
    state_builder: &mut StateBuilder<S>,
) -> InitResult<State<S>> {
    Ok(State::empty(state_builder))
}

/// Mint a new NFT owned by the sender.
///
/// The token ID is allocated sequentially and returned to the caller.
/// Logs a `Mint` and a `TokenMetadata` event.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - Any metadata field is empty.
/// - Fails to log event.
#[receive(
    contract = "NftMarketplace",
    name = "mint",
    parameter = "MintParams",
    return_value = "ContractTokenId",
    mutable,
    enable_logger
)]
fn mint<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<ContractTokenId> {
    let params: MintParams = ctx.parameter_cursor().get()?;
    let owner = ctx.sender();

    let token_uri = params.token_uri.clone();
    let token_id = host.state_mut().mint(owner, params)?;

    // Event for minted NFT.
    logger.log(&Cis2Event::Mint(MintEvent {
        token_id,
        amount: ContractTokenAmount::from(1),
        owner,
    }))?;

    // Metadata URL for the NFT.
    logger.log(&token_metadata_event(token_id, token_uri))?;

    Ok(token_id)
}

/// List an NFT for sale.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - The token does not exist.
/// - The price is not strictly positive.
/// - The sender is not the token owner.
/// - The token is already listed for sale.
/// - Fails to log event.
#[receive(
    contract = "NftMarketplace",
    name = "list",
    parameter = "ListParams",
    mutable,
    enable_logger
)]
fn list<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params: ListParams = ctx.parameter_cursor().get()?;

    let event = host.state_mut().list(ctx.sender(), &params)?;

    // Event for listing NFT.
    logger.log(&CustomEvent::Listing(event))?;

    Ok(())
}

/// Remove an NFT from sale.
///
/// The listing record is retained and marked inactive; ownership is not
/// affected and the token may be listed again later.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - The listing does not exist or is already inactive.
/// - The sender is not the seller.
/// - Fails to log event.
#[receive(
    contract = "NftMarketplace",
    name = "unlist",
    parameter = "ContractTokenId",
    mutable,
    enable_logger
)]
fn unlist<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let token_id: ContractTokenId = ctx.parameter_cursor().get()?;

    let event = host.state_mut().unlist(ctx.sender(), &token_id)?;

    // Event for unlisting NFT.
    logger.log(&CustomEvent::Unlisting(event))?;

    Ok(())
}

/// Update the price of a listed NFT.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - The token is not listed or the listing is inactive.
/// - The sender is not the seller.
/// - The new price is not strictly positive.
/// - Fails to log event.
#[receive(
    contract = "NftMarketplace",
    name = "updatePrice",
    parameter = "UpdatePriceParams",
    mutable,
    enable_logger
)]
fn update_price<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params: UpdatePriceParams = ctx.parameter_cursor().get()?;

    let event = host.state_mut().update_price(ctx.sender(), &params)?;

    // Event for updating price of NFT.
    logger.log(&CustomEvent::UpdatePrice(event))?;

    Ok(())
}

/// Buy one of the listed NFTs by attaching the exact sale price.
///
/// The payment is credited to the contract balance; the instance owner
/// collects the accumulated proceeds with `withdraw`.
///
/// It rejects if:
/// - Sender is a contract address.
/// - It fails to parse the parameter.
/// - The token is not listed or the listing is inactive.
/// - The attached amount differs from the listed price.
/// - The sender is the seller.
/// - Fails to log event.
#[receive(
    contract = "NftMarketplace",
    name = "buy",
    parameter = "ContractTokenId",
    mutable,
    enable_logger,
    payable
)]
fn buy<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    amount: Amount,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let token_id: ContractTokenId = ctx.parameter_cursor().get()?;
    let buyer = get_account_address(ctx.sender())?;

    let event = host.state_mut().settle(buyer, &token_id, amount)?;

    // Event for transferring ownership to the buyer.
    logger.log(&Cis2Event::Transfer(TransferEvent {
        token_id,
        amount: ContractTokenAmount::from(1),
        from: Address::Account(event.seller),
        to: Address::Account(event.buyer),
    }))?;

    // Event for buying NFT.
    logger.log(&CustomEvent::Buy(event))?;

    Ok(())
}

/// Transfer the accumulated sale proceeds to the instance owner, leaving the
/// contract balance at zero.
///
/// It rejects if:
/// - The sender is not the instance owner.
/// - The transfer invocation fails.
#[receive(contract = "NftMarketplace", name = "withdraw", mutable)]
fn withdraw<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<()> {
    let owner = ctx.owner();
    let sender = ctx.sender();

    // Ensuring sender is the contract owner
    ensure!(sender.matches_account(&owner), ContractError::Unauthorized);

    let balance = host.self_balance();
    if balance == Amount::zero() {
        return Ok(());
    }

    host.invoke_transfer(&owner, balance)?;

    Ok(())
}

/// View function that returns the current owner of a token.
#[receive(
    contract = "NftMarketplace",
    name = "ownerOf",
    parameter = "ContractTokenId",
    return_value = "Address"
)]
fn owner_of<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<Address> {
    let token_id: ContractTokenId = ctx.parameter_cursor().get()?;

    Ok(host.state().owner_of(&token_id)?)
}

/// View function that returns the metadata URI of a token.
#[receive(
    contract = "NftMarketplace",
    name = "tokenUri",
    parameter = "ContractTokenId",
    return_value = "String"
)]
fn token_uri<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<String> {
    let token_id: ContractTokenId = ctx.parameter_cursor().get()?;

    Ok(host.state().metadata_of(&token_id)?.token_uri)
}

/// View function that returns the metadata record stored for a token URI.
/// When several tokens were minted with the same URI, the newest one is
/// returned.
#[receive(
    contract = "NftMarketplace",
    name = "viewMetadata",
    parameter = "String",
    return_value = "TokenMetadata"
)]
fn view_metadata<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<TokenMetadata> {
    let token_uri: String = ctx.parameter_cursor().get()?;
    let state = host.state();

    let token_id = *state
        .uri_index
        .get(&token_uri)
        .ok_or(CustomContractError::TokenNotFound)?;

    Ok(state.metadata_of(&token_id)?)
}

/// View function that returns the listing of a token.
#[receive(
    contract = "NftMarketplace",
    name = "viewListing",
    parameter = "ContractTokenId",
    return_value = "Listing"
)]
fn view_listing<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<Listing> {
    let token_id: ContractTokenId = ctx.parameter_cursor().get()?;

    Ok(*host
        .state()
        .listings
        .get(&token_id)
        .ok_or(CustomContractError::ListingNotFound)?)
}

fn token_metadata_event(
    token_id: ContractTokenId,
    token_uri: String,
) -> Cis2Event<ContractTokenId, ContractTokenAmount> {
    Cis2Event::TokenMetadata(TokenMetadataEvent {
        token_id,
        metadata_url: MetadataUrl {
            url: token_uri,
            hash: None,
        },
    })
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use test_infrastructure::*;

    const ACCOUNT_0: AccountAddress = AccountAddress([0u8; 32]);
    const ADDRESS_0: Address = Address::Account(ACCOUNT_0);
    const ACCOUNT_1: AccountAddress = AccountAddress([1u8; 32]);
    const ADDRESS_1: Address = Address::Account(ACCOUNT_1);

    const NAME: &str = "myNft";
    const DESCRIPTION: &str = "This is my Nft";
    const TOKEN_URI: &str = "https://example.com/nft";

    fn token_1() -> ContractTokenId {
        TokenIdU64(1)
    }

    fn nft_price() -> Amount {
        Amount::from_micro_ccd(1)
    }

    fn mint_params() -> MintParams {
        MintParams {
            name: NAME.to_string(),
            description: DESCRIPTION.to_string(),
            token_uri: TOKEN_URI.to_string(),
        }
    }

    fn list_params(price: Amount) -> ListParams {
        ListParams {
            token_id: token_1(),
            price,
        }
    }

    fn receive_ctx<'a>(owner: AccountAddress, sender: Address) -> TestReceiveContext<'a> {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(sender);
        ctx.set_owner(owner);
        ctx
    }

    /// Test helper function which creates a contract state with one token
    /// with id 1 owned by `ADDRESS_0`.
    fn minted_host() -> TestHost<State<TestStateApi>> {
        let mut state_builder = TestStateBuilder::new();
        let mut state = State::empty(&mut state_builder);
        state
            .mint(ADDRESS_0, mint_params())
            .expect_report("Failed to mint token");
        TestHost::new(state, state_builder)
    }

    /// Test helper function which creates a contract state with token 1
    /// owned by `ADDRESS_0` and listed for sale at `nft_price`.
    fn listed_host() -> TestHost<State<TestStateApi>> {
        let mut host = minted_host();
        host.state_mut()
            .list(ADDRESS_0, &list_params(nft_price()))
            .expect_report("Failed to list token");
        host
    }

    /// Test initialization succeeds.
    #[concordium_test]
    fn test_init() {
        // Setup the context
        let ctx = TestInitContext::empty();
        let mut builder = TestStateBuilder::new();

        // Call the contract function.
        let result = init(&ctx, &mut builder);

        // Check the result
        let state = result.expect_report("Contract initialization failed");

        // Check the state
        claim_eq!(
            state.tokens.iter().count(),
            0,
            "No token should be initialized"
        );
        claim_eq!(
            state.listings.iter().count(),
            0,
            "No listings should be initialized"
        );
        claim_eq!(state.next_token_id, 1, "Token IDs should be assigned from 1");
    }

    /// Test minting, ensuring the new token is owned by the sender, the
    /// metadata is queryable and the appropriate events are logged.
    #[concordium_test]
    fn test_mint() {
        // Setup the context
        let mut ctx = receive_ctx(ACCOUNT_0, ADDRESS_0);
        let parameter_bytes = to_bytes(&mint_params());
        ctx.set_parameter(&parameter_bytes);

        let mut logger = TestLogger::init();
        let mut state_builder = TestStateBuilder::new();
        let state = State::empty(&mut state_builder);
        let mut host = TestHost::new(state, state_builder);

        // Call the contract function.
        let result: ContractResult<ContractTokenId> = mint(&ctx, &mut host, &mut logger);

        // Check the result
        let token_id = result.expect_report("Results in rejection");
        claim_eq!(token_id, token_1(), "First minted token should have ID 1");

        // Check the state
        claim_eq!(
            host.state()
                .owner_of(&token_1())
                .expect_report("Token is expected to exist"),
            ADDRESS_0,
            "Token should be owned by the sender"
        );
        let metadata = host
            .state()
            .metadata_of(&token_1())
            .expect_report("Token is expected to exist");
        claim_eq!(metadata.name, NAME.to_string(), "Unexpected token name");
        claim_eq!(
            metadata.token_uri,
            TOKEN_URI.to_string(),
            "Unexpected token URI"
        );

        // Check the logs
        claim!(
            logger.logs.contains(&to_bytes(&Cis2Event::Mint(MintEvent {
                token_id: token_1(),
                amount: ContractTokenAmount::from(1),
                owner: ADDRESS_0,
            }))),
            "Expected an event for minting token 1"
        );
        claim!(
            logger
                .logs
                .contains(&to_bytes(&token_metadata_event(
                    token_1(),
                    TOKEN_URI.to_string()
                ))),
            "Expected an event for the metadata URL of token 1"
        );
    }

    /// Test token IDs are allocated sequentially and the URI index follows
    /// the newest token minted with a URI.
    #[concordium_test]
    fn test_mint_sequential_ids() {
        let mut ctx = receive_ctx(ACCOUNT_0, ADDRESS_0);
        let parameter_bytes = to_bytes(&mint_params());
        ctx.set_parameter(&parameter_bytes);

        let mut logger = TestLogger::init();
        let mut state_builder = TestStateBuilder::new();
        let state = State::empty(&mut state_builder);
        let mut host = TestHost::new(state, state_builder);

        let first: ContractResult<ContractTokenId> = mint(&ctx, &mut host, &mut logger);
        claim_eq!(
            first.expect_report("Results in rejection"),
            TokenIdU64(1),
            "First minted token should have ID 1"
        );

        // Minting with the same URI again is allowed and creates an
        // independent token.
        let second: ContractResult<ContractTokenId> = mint(&ctx, &mut host, &mut logger);
        claim_eq!(
            second.expect_report("Results in rejection"),
            TokenIdU64(2),
            "Second minted token should have ID 2"
        );

        claim_eq!(
            host.state()
                .uri_index
                .get(&TOKEN_URI.to_string())
                .map(|token_id| *token_id),
            Some(TokenIdU64(2)),
            "URI index should point at the newest token"
        );
    }

    /// Test minting with an empty metadata field fails.
    #[concordium_test]
    fn test_mint_empty_metadata() {
        let mut ctx = receive_ctx(ACCOUNT_0, ADDRESS_0);
        let parameter_bytes = to_bytes(&MintParams {
            name: String::new(),
            description: DESCRIPTION.to_string(),
            token_uri: TOKEN_URI.to_string(),
        });
        ctx.set_parameter(&parameter_bytes);

        let mut logger = TestLogger::init();
        let mut state_builder = TestStateBuilder::new();
        let state = State::empty(&mut state_builder);
        let mut host = TestHost::new(state, state_builder);

        let result: ContractResult<ContractTokenId> = mint(&ctx, &mut host, &mut logger);

        let err = result.expect_err_report("Expected to fail");
        claim_eq!(
            err,
            CustomContractError::InvalidMetadata.into(),
            "Error is expected to be InvalidMetadata"
        );
    }

    /// Test listing a minted token succeeds and the appropriate event is
    /// logged.
    #[concordium_test]
    fn test_list() {
        let mut ctx = receive_ctx(ACCOUNT_0, ADDRESS_0);
        let parameter_bytes = to_bytes(&list_params(nft_price()));
        ctx.set_parameter(&parameter_bytes);

        let mut logger = TestLogger::init();
        let mut host = minted_host();

        // Call the contract function.
        let result: ContractResult<()> = list(&ctx, &mut host, &mut logger);

        // Check the result
        claim!(result.is_ok(), "Results in rejection");

        // Check the state
        claim_eq!(
            host.state().listings.get(&token_1()).map(|listing| *listing),
            Some(Listing {
                seller: ACCOUNT_0,
                price: nft_price(),
                active: true,
            }),
            "Listing should be active at the listed price"
        );

        // Check the logs
        claim!(
            logger
                .logs
                .contains(&to_bytes(&CustomEvent::Listing(ListingEvent {
                    token_id: token_1(),
                    price: nft_price(),
                    seller: ACCOUNT_0,
                }))),
            "Expected an event for listing token 1"
        );
    }

    /// Test listing a token that was never minted fails.
    #[concordium_test]
    fn test_list_missing_token() {
        let mut ctx = receive_ctx(ACCOUNT_0, ADDRESS_0);
        let parameter_bytes = to_bytes(&list_params(nft_price()));
        ctx.set_parameter(&parameter_bytes);

        let mut logger = TestLogger::init();
        let mut state_builder = TestStateBuilder::new();
        let state = State::empty(&mut state_builder);
        let mut host = TestHost::new(state, state_builder);

        let result: ContractResult<()> = list(&ctx, &mut host, &mut logger);

        let err = result.expect_err_report("Expected to fail");
        claim_eq!(
            err,
            CustomContractError::TokenNotFound.into(),
            "Error is expected to be TokenNotFound"
        );
    }

    /// Test listing with a zero price fails.
    #[concordium_test]
    fn test_list_zero_price() {
        let mut ctx = receive_ctx(ACCOUNT_0, ADDRESS_0);
        let parameter_bytes = to_bytes(&list_params(Amount::zero()));
        ctx.set_parameter(&parameter_bytes);

        let mut logger = TestLogger::init();
        let mut host = minted_host();

        let result: ContractResult<()> = list(&ctx, &mut host, &mut logger);

        let err = result.expect_err_report("Expected to fail");
        claim_eq!(
            err,
            CustomContractError::InvalidPrice.into(),
            "Error is expected to be InvalidPrice"
        );
    }

    /// Test listing fails when the sender does not own the token.
    #[concordium_test]
    fn test_list_not_owner() {
        let mut ctx = receive_ctx(ACCOUNT_0, ADDRESS_1);
        let parameter_bytes = to_bytes(&list_params(nft_price()));
        ctx.set_parameter(&parameter_bytes);

        let mut logger = TestLogger::init();
        let mut host = minted_host();

        let result: ContractResult<()> = list(&ctx, &mut host, &mut logger);

        let err = result.expect_err_report("Expected to fail");
        claim_eq!(
            err,
            ContractError::Unauthorized,
            "Error is expected to be Unauthorized"
        );
    }

    /// Test listing an already listed token fails.
    #[concordium_test]
    fn test_list_already_listed() {
        let mut ctx = receive_ctx(ACCOUNT_0, ADDRESS_0);
        let parameter_bytes = to_bytes(&list_params(nft_price()));
        ctx.set_parameter(&parameter_bytes);

        let mut logger = TestLogger::init();
        let mut host = listed_host();

        let result: ContractResult<()> = list(&ctx, &mut host, &mut logger);

        let err = result.expect_err_report("Expected to fail");
        claim_eq!(
            err,
            CustomContractError::TokenAlreadyListedForSale.into(),
            "Error is expected to be TokenAlreadyListedForSale"
        );
    }

    /// Test cancelling a listing keeps the record, marks it inactive and
    /// logs the appropriate event.
    #[concordium_test]
    fn test_unlist() {
        let mut ctx = receive_ctx(ACCOUNT_0, ADDRESS_0);
        let parameter_bytes = to_bytes(&token_1());
        ctx.set_parameter(&parameter_bytes);

        let mut logger = TestLogger::init();
        let mut host = listed_host();

        // Call the contract function.
        let result: ContractResult<()> = unlist(&ctx, &mut host, &mut logger);

        // Check the result
        claim!(result.is_ok(), "Results in rejection");

        // Check the state
        claim_eq!(
            host.state().listings.get(&token_1()).map(|listing| *listing),
            Some(Listing {
                seller: ACCOUNT_0,
                price: nft_price(),
                active: false,
            }),
            "Listing should be retained and inactive"
        );
        claim_eq!(
            host.state()
                .owner_of(&token_1())
                .expect_report("Token is expected to exist"),
            ADDRESS_0,
            "Cancelling should not alter ownership"
        );

        // Check the logs
        claim!(
            logger
                .logs
                .contains(&to_bytes(&CustomEvent::Unlisting(UnlistingEvent {
                    token_id: token_1(),
                }))),
            "Expected an event for unlisting token 1"
        );
    }

    /// Test cancelling a listing that never existed fails with the same
    /// error as a cancelled one.
    #[concordium_test]
    fn test_unlist_never_listed() {
        let mut ctx = receive_ctx(ACCOUNT_0, ADDRESS_0);
        let parameter_bytes = to_bytes(&TokenIdU64(3));
        ctx.set_parameter(&parameter_bytes);

        let mut logger = TestLogger::init();
        let mut host = minted_host();

        let result: ContractResult<()> = unlist(&ctx, &mut host, &mut logger);

        let err = result.expect_err_report("Expected to fail");
        claim_eq!(
            err,
            CustomContractError::ListingInactive.into(),
            "Error is expected to be ListingInactive"
        );
    }

    /// Test cancelling the same listing twice fails on the second attempt.
    #[concordium_test]
    fn test_unlist_twice() {
        let mut ctx = receive_ctx(ACCOUNT_0, ADDRESS_0);
        let parameter_bytes = to_bytes(&token_1());
        ctx.set_parameter(&parameter_bytes);

        let mut logger = TestLogger::init();
        let mut host = listed_host();

        let result: ContractResult<()> = unlist(&ctx, &mut host, &mut logger);
        claim!(result.is_ok(), "Results in rejection");

        // Call the contract function again.
        let result: ContractResult<()> = unlist(&ctx, &mut host, &mut logger);

        let err = result.expect_err_report("Expected to fail");
        claim_eq!(
            err,
            CustomContractError::ListingInactive.into(),
            "Error is expected to be ListingInactive"
        );
    }

    /// Test cancelling fails when the sender is not the seller.
    #[concordium_test]
    fn test_unlist_not_seller() {
        let mut ctx = receive_ctx(ACCOUNT_0, ADDRESS_1);
        let parameter_bytes = to_bytes(&token_1());
        ctx.set_parameter(&parameter_bytes);

        let mut logger = TestLogger::init();
        let mut host = listed_host();

        let result: ContractResult<()> = unlist(&ctx, &mut host, &mut logger);

        let err = result.expect_err_report("Expected to fail");
        claim_eq!(
            err,
            ContractError::Unauthorized,
            "Error is expected to be Unauthorized"
        );
    }

    /// Test a token can be listed again after its listing was cancelled.
    #[concordium_test]
    fn test_relist_after_unlist() {
        let new_price = Amount::from_micro_ccd(5);

        let mut ctx = receive_ctx(ACCOUNT_0, ADDRESS_0);
        let parameter_bytes = to_bytes(&token_1());
        ctx.set_parameter(&parameter_bytes);

        let mut logger = TestLogger::init();
        let mut host = listed_host();

        let result: ContractResult<()> = unlist(&ctx, &mut host, &mut logger);
        claim!(result.is_ok(), "Results in rejection");

        let parameter_bytes = to_bytes(&list_params(new_price));
        ctx.set_parameter(&parameter_bytes);

        // Call the contract function.
        let result: ContractResult<()> = list(&ctx, &mut host, &mut logger);
        claim!(result.is_ok(), "Results in rejection");

        claim_eq!(
            host.state().listings.get(&token_1()).map(|listing| *listing),
            Some(Listing {
                seller: ACCOUNT_0,
                price: new_price,
                active: true,
            }),
            "A fresh listing should replace the cancelled one"
        );
    }

    /// Test updating the price of a listing succeeds and the appropriate
    /// event is logged.
    #[concordium_test]
    fn test_update_price() {
        let new_price = Amount::from_micro_ccd(2);

        let mut ctx = receive_ctx(ACCOUNT_0, ADDRESS_0);
        let parameter_bytes = to_bytes(&UpdatePriceParams {
            token_id: token_1(),
            price: new_price,
        });
        ctx.set_parameter(&parameter_bytes);

        let mut logger = TestLogger::init();
        let mut host = listed_host();

        // Call the contract function.
        let result: ContractResult<()> = update_price(&ctx, &mut host, &mut logger);

        // Check the result
        claim!(result.is_ok(), "Results in rejection");

        // Check the state
        claim_eq!(
            host.state().listings.get(&token_1()).map(|listing| *listing),
            Some(Listing {
                seller: ACCOUNT_0,
                price: new_price,
                active: true,
            }),
            "Listing should stay active at the new price"
        );

        // Check the logs
        claim!(
            logger
                .logs
                .contains(&to_bytes(&CustomEvent::UpdatePrice(UpdatePriceEvent {
                    token_id: token_1(),
                    from: nft_price(),
                    to: new_price,
                }))),
            "Expected an event for updating the price of token 1"
        );
    }

    /// Test updating the price of a token that is not listed fails.
    #[concordium_test]
    fn test_update_price_not_listed() {
        let mut ctx = receive_ctx(ACCOUNT_0, ADDRESS_0);
        let parameter_bytes = to_bytes(&UpdatePriceParams {
            token_id: token_1(),
            price: nft_price(),
        });
        ctx.set_parameter(&parameter_bytes);

        let mut logger = TestLogger::init();
        let mut host = minted_host();

        let result: ContractResult<()> = update_price(&ctx, &mut host, &mut logger);

        let err = result.expect_err_report("Expected to fail");
        claim_eq!(
            err,
            CustomContractError::ListingNotFound.into(),
            "Error is expected to be ListingNotFound"
        );
    }

    /// Test updating the price of a cancelled listing fails.
    #[concordium_test]
    fn test_update_price_cancelled() {
        let mut ctx = receive_ctx(ACCOUNT_0, ADDRESS_0);
        let parameter_bytes = to_bytes(&token_1());
        ctx.set_parameter(&parameter_bytes);

        let mut logger = TestLogger::init();
        let mut host = listed_host();

        let result: ContractResult<()> = unlist(&ctx, &mut host, &mut logger);
        claim!(result.is_ok(), "Results in rejection");

        let parameter_bytes = to_bytes(&UpdatePriceParams {
            token_id: token_1(),
            price: nft_price(),
        });
        ctx.set_parameter(&parameter_bytes);

        let result: ContractResult<()> = update_price(&ctx, &mut host, &mut logger);

        let err = result.expect_err_report("Expected to fail");
        claim_eq!(
            err,
            CustomContractError::ListingInactive.into(),
            "Error is expected to be ListingInactive"
        );
    }

    /// Test buying a listed token with the exact payment transfers ownership
    /// to the buyer, deactivates the listing and logs the appropriate
    /// events.
    #[concordium_test]
    fn test_buy() {
        let mut ctx = receive_ctx(ACCOUNT_0, ADDRESS_1);
        let parameter_bytes = to_bytes(&token_1());
        ctx.set_parameter(&parameter_bytes);

        let mut logger = TestLogger::init();
        let mut host = listed_host();

        // Call the contract function.
        let result: ContractResult<()> = buy(&ctx, &mut host, nft_price(), &mut logger);

        // Check the result
        claim!(result.is_ok(), "Results in rejection");

        // Check the state
        claim_eq!(
            host.state()
                .owner_of(&token_1())
                .expect_report("Token is expected to exist"),
            ADDRESS_1,
            "Token should be owned by the buyer"
        );
        claim_eq!(
            host.state().listings.get(&token_1()).map(|listing| *listing),
            Some(Listing {
                seller: ACCOUNT_0,
                price: nft_price(),
                active: false,
            }),
            "Listing should be inactive after the sale"
        );

        // Check the logs
        claim!(
            logger
                .logs
                .contains(&to_bytes(&Cis2Event::Transfer(TransferEvent {
                    token_id: token_1(),
                    amount: ContractTokenAmount::from(1),
                    from: ADDRESS_0,
                    to: ADDRESS_1,
                }))),
            "Expected an event for transferring token 1 to the buyer"
        );
        claim!(
            logger.logs.contains(&to_bytes(&CustomEvent::Buy(BuyEvent {
                token_id: token_1(),
                seller: ACCOUNT_0,
                buyer: ACCOUNT_1,
                price: nft_price(),
            }))),
            "Expected an event for buying token 1"
        );
    }

    /// Test buying with an attached amount different from the listed price
    /// fails, for both underpayment and overpayment.
    #[concordium_test]
    fn test_buy_price_mismatch() {
        let mut ctx = receive_ctx(ACCOUNT_0, ADDRESS_1);
        let parameter_bytes = to_bytes(&token_1());
        ctx.set_parameter(&parameter_bytes);

        let mut logger = TestLogger::init();
        let mut host = listed_host();

        let result: ContractResult<()> = buy(&ctx, &mut host, Amount::zero(), &mut logger);
        let err = result.expect_err_report("Expected to fail");
        claim_eq!(
            err,
            CustomContractError::PriceMismatch.into(),
            "Error is expected to be PriceMismatch"
        );

        let result: ContractResult<()> =
            buy(&ctx, &mut host, Amount::from_micro_ccd(2), &mut logger);
        let err = result.expect_err_report("Expected to fail");
        claim_eq!(
            err,
            CustomContractError::PriceMismatch.into(),
            "Error is expected to be PriceMismatch"
        );

        // The listing is untouched by the failed attempts.
        claim_eq!(
            host.state().listings.get(&token_1()).map(|listing| *listing),
            Some(Listing {
                seller: ACCOUNT_0,
                price: nft_price(),
                active: true,
            }),
            "Listing should still be active"
        );
    }

    /// Test the seller cannot buy their own listing.
    #[concordium_test]
    fn test_buy_own_listing() {
        let mut ctx = receive_ctx(ACCOUNT_0, ADDRESS_0);
        let parameter_bytes = to_bytes(&token_1());
        ctx.set_parameter(&parameter_bytes);

        let mut logger = TestLogger::init();
        let mut host = listed_host();

        let result: ContractResult<()> = buy(&ctx, &mut host, nft_price(), &mut logger);

        let err = result.expect_err_report("Expected to fail");
        claim_eq!(
            err,
            ContractError::Unauthorized,
            "Error is expected to be Unauthorized"
        );
    }

    /// Test buying a token that is not listed fails.
    #[concordium_test]
    fn test_buy_not_listed() {
        let mut ctx = receive_ctx(ACCOUNT_0, ADDRESS_1);
        let parameter_bytes = to_bytes(&token_1());
        ctx.set_parameter(&parameter_bytes);

        let mut logger = TestLogger::init();
        let mut host = minted_host();

        let result: ContractResult<()> = buy(&ctx, &mut host, nft_price(), &mut logger);

        let err = result.expect_err_report("Expected to fail");
        claim_eq!(
            err,
            CustomContractError::ListingNotFound.into(),
            "Error is expected to be ListingNotFound"
        );
    }

    /// Test buying a cancelled listing fails.
    #[concordium_test]
    fn test_buy_cancelled() {
        let mut ctx = receive_ctx(ACCOUNT_0, ADDRESS_0);
        let parameter_bytes = to_bytes(&token_1());
        ctx.set_parameter(&parameter_bytes);

        let mut logger = TestLogger::init();
        let mut host = listed_host();

        let result: ContractResult<()> = unlist(&ctx, &mut host, &mut logger);
        claim!(result.is_ok(), "Results in rejection");

        let mut buyer_ctx = receive_ctx(ACCOUNT_0, ADDRESS_1);
        buyer_ctx.set_parameter(&parameter_bytes);

        let result: ContractResult<()> = buy(&buyer_ctx, &mut host, nft_price(), &mut logger);

        let err = result.expect_err_report("Expected to fail");
        claim_eq!(
            err,
            CustomContractError::ListingInactive.into(),
            "Error is expected to be ListingInactive"
        );
    }

    /// Test the full sale flow through the entrypoints: mint, list, buy.
    /// The buyer ends up owning the token and a sale event is logged.
    #[concordium_test]
    fn test_mint_list_buy_flow() {
        let mut seller_ctx = receive_ctx(ACCOUNT_0, ADDRESS_0);
        let mint_parameter_bytes = to_bytes(&mint_params());
        seller_ctx.set_parameter(&mint_parameter_bytes);

        let mut logger = TestLogger::init();
        let mut state_builder = TestStateBuilder::new();
        let state = State::empty(&mut state_builder);
        let mut host = TestHost::new(state, state_builder);

        let result: ContractResult<ContractTokenId> = mint(&seller_ctx, &mut host, &mut logger);
        let token_id = result.expect_report("Minting should pass");

        let list_parameter_bytes = to_bytes(&list_params(nft_price()));
        seller_ctx.set_parameter(&list_parameter_bytes);

        let result: ContractResult<()> = list(&seller_ctx, &mut host, &mut logger);
        result.expect_report("Listing should pass");

        let mut buyer_ctx = receive_ctx(ACCOUNT_0, ADDRESS_1);
        let buy_parameter_bytes = to_bytes(&token_id);
        buyer_ctx.set_parameter(&buy_parameter_bytes);

        let result: ContractResult<()> = buy(&buyer_ctx, &mut host, nft_price(), &mut logger);
        result.expect_report("Buying should pass");

        // Check the ownership round-trip through the view function.
        let result: ReceiveResult<Address> = owner_of(&buyer_ctx, &host);
        claim_eq!(
            result.expect_report("Token is expected to exist"),
            ADDRESS_1,
            "Token should be owned by the buyer"
        );

        // Check the logs
        claim!(
            logger.logs.contains(&to_bytes(&CustomEvent::Buy(BuyEvent {
                token_id,
                seller: ACCOUNT_0,
                buyer: ACCOUNT_1,
                price: nft_price(),
            }))),
            "Expected an event for buying token 1"
        );
    }

    /// Test withdrawing the accumulated proceeds as the instance owner.
    #[concordium_test]
    fn test_withdraw() {
        let balance = Amount::from_micro_ccd(100);

        let ctx = receive_ctx(ACCOUNT_0, ADDRESS_0);

        let mut host = listed_host();
        host.set_self_balance(balance);

        // Call the contract function.
        let result: ContractResult<()> = withdraw(&ctx, &mut host);

        // Check the result
        claim!(result.is_ok(), "Results in rejection");
    }

    /// Test withdrawing with an empty balance succeeds without a transfer.
    #[concordium_test]
    fn test_withdraw_empty_balance() {
        let ctx = receive_ctx(ACCOUNT_0, ADDRESS_0);

        let mut host = minted_host();

        let result: ContractResult<()> = withdraw(&ctx, &mut host);

        claim!(result.is_ok(), "Results in rejection");
    }

    /// Test withdrawing fails when the sender is not the instance owner.
    #[concordium_test]
    fn test_withdraw_not_owner() {
        let ctx = receive_ctx(ACCOUNT_0, ADDRESS_1);

        let mut host = listed_host();
        host.set_self_balance(Amount::from_micro_ccd(100));

        let result: ContractResult<()> = withdraw(&ctx, &mut host);

        let err = result.expect_err_report("Expected to fail");
        claim_eq!(
            err,
            ContractError::Unauthorized,
            "Error is expected to be Unauthorized"
        );
    }

    /// Test the metadata view resolves a token URI to the stored record.
    #[concordium_test]
    fn test_view_metadata() {
        let mut ctx = receive_ctx(ACCOUNT_0, ADDRESS_0);
        let parameter_bytes = to_bytes(&TOKEN_URI.to_string());
        ctx.set_parameter(&parameter_bytes);

        let host = minted_host();

        // Call the contract function.
        let result: ReceiveResult<TokenMetadata> = view_metadata(&ctx, &host);

        let metadata = result.expect_report("Metadata is expected to exist");
        claim_eq!(
            metadata,
            TokenMetadata {
                name: NAME.to_string(),
                description: DESCRIPTION.to_string(),
                token_uri: TOKEN_URI.to_string(),
            },
            "Unexpected metadata record"
        );
    }
}
