//! Session cart persistence
//!
//! Carts are stored as a JSON entry array under `dz_cart:<session_id>`,
//! mirroring the storefront's own storage key. Redis is optional; an
//! in-memory mirror is kept either way so checkout keeps working when
//! redis is down or disabled.

use crate::domain::cart::CartAggregate;
use crate::shared::error::{AppError, AppResult};
use redis::{aio::ConnectionManager, AsyncCommands};
use std::sync::Arc;

#[derive(Clone)]
pub struct CartStore {
    redis: Option<Arc<ConnectionManager>>,
    ttl_seconds: u64,
    memory: Arc<tokio::sync::RwLock<std::collections::HashMap<String, CartAggregate>>>,
}

impl CartStore {
    pub fn new(redis: Option<Arc<ConnectionManager>>, ttl_seconds: u64) -> Self {
        Self {
            redis,
            ttl_seconds,
            memory: Arc::new(tokio::sync::RwLock::new(std::collections::HashMap::new())),
        }
    }

    fn key(session_id: &str) -> String {
        format!("dz_cart:{}", session_id)
    }

    /// Load a session's cart; a missing key is an empty cart
    pub async fn load(&self, session_id: &str) -> AppResult<CartAggregate> {
        if let Some(redis) = &self.redis {
            let mut conn = (**redis).clone();
            let data: Option<Vec<u8>> = conn
                .get(Self::key(session_id))
                .await
                .map_err(|e| AppError::Storage(format!("redis get: {}", e)))?;
            if let Some(bytes) = data {
                let entries = serde_json::from_slice(&bytes)
                    .map_err(|e| AppError::Storage(format!("deserialize cart: {}", e)))?;
                let cart = CartAggregate::from_entries(entries);
                self.memory.write().await.insert(session_id.to_string(), cart.clone());
                return Ok(cart);
            }
        }
        Ok(self
            .memory
            .read()
            .await
            .get(session_id)
            .cloned()
            .unwrap_or_default())
    }

    /// Persist a session's cart, written on every mutation
    pub async fn save(&self, session_id: &str, cart: &CartAggregate) -> AppResult<()> {
        let serialized = serde_json::to_vec(cart.entries())
            .map_err(|e| AppError::Storage(format!("serialize cart: {}", e)))?;

        if let Some(redis) = &self.redis {
            let mut conn = (**redis).clone();
            let _: () = conn
                .set_ex(Self::key(session_id), serialized, self.ttl_seconds)
                .await
                .map_err(|e| AppError::Storage(format!("redis set: {}", e)))?;
        }

        self.memory.write().await.insert(session_id.to_string(), cart.clone());
        Ok(())
    }

    /// Remove the cart and its persisted representation together
    pub async fn clear(&self, session_id: &str) -> AppResult<()> {
        if let Some(redis) = &self.redis {
            let mut conn = (**redis).clone();
            let _: () = conn
                .del(Self::key(session_id))
                .await
                .map_err(|e| AppError::Storage(format!("redis del: {}", e)))?;
        }
        self.memory.write().await.remove(session_id);
        Ok(())
    }
}
