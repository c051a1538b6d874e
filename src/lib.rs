pub mod engine;
pub mod error;
pub mod formatter;
pub mod locale;
pub mod parser;
pub mod profile;
pub mod types;

// 导出主要 API
pub use engine::{NumberParser, create_number_parser};
pub use error::*;
pub use locale::{EmbeddedLocaleProvider, IcuLocaleProvider, LocaleDataProvider};
pub use types::*;

#[cfg(test)]
mod tests;
