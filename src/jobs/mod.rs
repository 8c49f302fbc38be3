pub mod price_feed_sync;
