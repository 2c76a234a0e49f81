use async_trait::async_trait;
use aws_sdk_dynamodb::{
    types::{AttributeValue, Select},
    Client as DynamoClient,
};

use super::attributes::{item_to_record, record_to_item, Item};
use super::UserStore;
use crate::error::StoreError;
use crate::types::{ScanCursor, ScanPage, UserRecord};

/// Users table in DynamoDB, partition key `userid` (S)
#[derive(Debug, Clone)]
pub struct DynamoUserStore {
    client: DynamoClient,
    table_name: String,
}

impl DynamoUserStore {
    pub fn new(client: DynamoClient, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

fn key(userid: &str) -> Item {
    Item::from([("userid".to_string(), AttributeValue::S(userid.to_string()))])
}

fn cursor_from_key(key: &Item) -> Option<ScanCursor> {
    key.get("userid")
        .and_then(|v| v.as_s().ok())
        .map(|id| ScanCursor::new(id.clone()))
}

#[async_trait]
impl UserStore for DynamoUserStore {
    async fn count(&self) -> Result<u64, StoreError> {
        // one scan page stops at 1 MB, keep going until the table is exhausted
        let mut total: u64 = 0;
        let mut start: Option<Item> = None;
        loop {
            let result = self
                .client
                .scan()
                .table_name(&self.table_name)
                .select(Select::Count)
                .set_exclusive_start_key(start.take())
                .send()
                .await
                .map_err(|e| StoreError::dynamo("Scan", e))?;

            total += u64::try_from(result.count()).unwrap_or(0);

            match result.last_evaluated_key {
                Some(key) if !key.is_empty() => start = Some(key),
                _ => break,
            }
        }
        Ok(total)
    }

    async fn scan(&self, limit: usize, start: Option<ScanCursor>) -> Result<ScanPage, StoreError> {
        let result = self
            .client
            .scan()
            .table_name(&self.table_name)
            .select(Select::AllAttributes)
            .limit(i32::try_from(limit).unwrap_or(i32::MAX))
            .set_exclusive_start_key(start.map(|cursor| key(&cursor.userid)))
            .send()
            .await
            .map_err(|e| StoreError::dynamo("Scan", e))?;

        let items = result
            .items()
            .iter()
            .filter_map(|item| {
                let record = item_to_record(item);
                if record.is_none() {
                    tracing::warn!("Skipping item without a string userid in {}", self.table_name);
                }
                record
            })
            .collect();

        let next = result.last_evaluated_key().and_then(cursor_from_key);

        Ok(ScanPage { items, next })
    }

    async fn get(&self, userid: &str) -> Result<Option<UserRecord>, StoreError> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .set_key(Some(key(userid)))
            .send()
            .await
            .map_err(|e| StoreError::dynamo("GetItem", e))?;

        result
            .item()
            .map(|item| {
                item_to_record(item)
                    .ok_or_else(|| StoreError::Decode(format!("item {} has no string userid", userid)))
            })
            .transpose()
    }

    async fn put(&self, record: &UserRecord) -> Result<(), StoreError> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(record_to_item(record)))
            .send()
            .await
            .map_err(|e| StoreError::dynamo("PutItem", e))?;

        tracing::info!("User saved: {}", record.userid);
        Ok(())
    }

    async fn delete(&self, userid: &str) -> Result<(), StoreError> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .set_key(Some(key(userid)))
            .send()
            .await
            .map_err(|e| StoreError::dynamo("DeleteItem", e))?;

        tracing::info!("User removed: {}", userid);
        Ok(())
    }
}
