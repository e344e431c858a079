pub use client::PropsClient;
pub use error::{PropsError, Result};
pub use self::scraper::{HttpSource, PageSource};

pub mod cache;
pub mod client;
pub mod error;
pub mod evaluate;
pub mod model;
mod props;
pub mod scraper;
pub(crate) mod util;
