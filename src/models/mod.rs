pub mod account;
pub mod game;
pub mod proxy;

pub use account::{Account, TaggedAccount, TelegramUser};
pub use game::{Boss, BoosterResult, FreeBoosts, GameState, TapsBatchResult, UserProfile};
pub use proxy::ProxyRecord;
