//! Order record persistence

use crate::domain::order::OrderRecord;
use crate::shared::error::{AppError, AppResult};
use redis::{aio::ConnectionManager, AsyncCommands};
use std::sync::Arc;

#[derive(Clone)]
pub struct OrderStore {
    redis: Option<Arc<ConnectionManager>>,
    ttl_seconds: u64,
    memory: Arc<tokio::sync::RwLock<std::collections::HashMap<String, OrderRecord>>>,
}

impl OrderStore {
    pub fn new(redis: Option<Arc<ConnectionManager>>, ttl_seconds: u64) -> Self {
        Self {
            redis,
            ttl_seconds,
            memory: Arc::new(tokio::sync::RwLock::new(std::collections::HashMap::new())),
        }
    }

    fn key(order_id: &str) -> String {
        format!("orders:{}", order_id)
    }

    pub async fn put(&self, record: &OrderRecord) -> AppResult<()> {
        let serialized = serde_json::to_vec(record)
            .map_err(|e| AppError::Storage(format!("serialize order: {}", e)))?;

        if let Some(redis) = &self.redis {
            let mut conn = (**redis).clone();
            let _: () = conn
                .set_ex(Self::key(&record.order_id), serialized, self.ttl_seconds)
                .await
                .map_err(|e| AppError::Storage(format!("redis set: {}", e)))?;
        }

        self.memory.write().await.insert(record.order_id.clone(), record.clone());
        Ok(())
    }

    pub async fn get(&self, order_id: &str) -> AppResult<Option<OrderRecord>> {
        if let Some(redis) = &self.redis {
            let mut conn = (**redis).clone();
            let data: Option<Vec<u8>> = conn
                .get(Self::key(order_id))
                .await
                .map_err(|e| AppError::Storage(format!("redis get: {}", e)))?;
            if let Some(bytes) = data {
                let record: OrderRecord = serde_json::from_slice(&bytes)
                    .map_err(|e| AppError::Storage(format!("deserialize order: {}", e)))?;
                self.memory.write().await.insert(order_id.to_string(), record.clone());
                return Ok(Some(record));
            }
        }
        Ok(self.memory.read().await.get(order_id).cloned())
    }
}
