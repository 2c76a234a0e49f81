pub mod attributes;
pub mod dynamo;
pub mod memory;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::types::{ScanCursor, ScanPage, UserRecord};

pub use dynamo::DynamoUserStore;
pub use memory::InMemoryUserStore;

/// Records read per page by GET /users
pub const PAGE_SIZE: usize = 100;

/// Key-value table keyed by `userid`. Every call is a single attempt.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Number of records in the table
    async fn count(&self) -> Result<u64, StoreError>;

    /// Read up to `limit` records after `start`. `next` is set when the
    /// scan stopped early and can be resumed.
    async fn scan(&self, limit: usize, start: Option<ScanCursor>) -> Result<ScanPage, StoreError>;

    async fn get(&self, userid: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Full replace, last writer wins
    async fn put(&self, record: &UserRecord) -> Result<(), StoreError>;

    /// Deleting a missing key is not an error
    async fn delete(&self, userid: &str) -> Result<(), StoreError>;
}
