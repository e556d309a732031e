pub mod action;
pub mod conversion;
pub mod user_state;

pub use action::{Coin, Fiat, MenuAction};
pub use conversion::{ConversionRequest, SUPPORTED_CODES};
pub use user_state::SessionState;
