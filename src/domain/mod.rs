pub mod item;
pub mod source;

pub use item::{parse_timestamp, FeedItem, Sentiment};
pub use source::FeedSource;
