/// Tag for the Custom Listing event.
pub const LISTING_TAG: u8 = u8::MAX - 5;

/// Tag for the Custom Unlisting event.
pub const UNLISTING_TAG: u8 = u8::MAX - 6;

/// Tag for the Custom Buy event.
pub const BUY_TAG: u8 = u8::MAX - 7;

/// Tag for the Custom Update Price event.
pub const UPDATE_PRICE_TAG: u8 = u8::MAX - 8;
