pub mod business;
pub mod telegram;

pub use business::BusinessChannel;
pub use telegram::TelegramChannel;
