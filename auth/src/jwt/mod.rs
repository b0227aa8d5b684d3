pub mod claims;
pub mod clock;
pub mod errors;
pub mod handler;
pub mod secret;

pub use claims::Claims;
pub use claims::Identity;
pub use claims::TokenKind;
pub use clock::Clock;
pub use clock::ManualClock;
pub use clock::SystemClock;
pub use errors::JwtError;
pub use handler::JwtHandler;
pub use handler::ACCESS_TOKEN_TTL_MINUTES;
pub use handler::REFRESH_TOKEN_TTL_DAYS;
pub use secret::SigningSecret;
