//! Service-account OAuth2: signed JWT assertion exchanged for an access token.

pub mod claims;
pub mod token;

pub use claims::AssertionClaims;
pub use token::TokenSource;
