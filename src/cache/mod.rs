use redis::{Client, RedisError, aio::ConnectionManager};
use serde::{Serialize, de::DeserializeOwned};

#[derive(Clone)]
pub struct RedisCache {
    connection: ConnectionManager,
}

impl RedisCache {
    pub async fn new(redis_url: &str) -> Result<Self, RedisError> {
        let client = Client::open(redis_url)?;
        let connection = ConnectionManager::new(client).await?;
        Ok(Self { connection })
    }

    /// Get a value from cache
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> redis::RedisResult<Option<T>> {
        let value: Option<String> = redis::cmd("GET")
            .arg(key)
            .query_async(&mut self.connection.clone())
            .await?;

        match value {
            Some(v) => {
                let deserialized = serde_json::from_str(&v).map_err(|e| {
                    redis::RedisError::from((
                        redis::ErrorKind::TypeError,
                        "Deserialization error",
                        e.to_string(),
                    ))
                })?;
                Ok(Some(deserialized))
            }
            None => Ok(None),
        }
    }

    /// Set a value in cache with optional TTL (in seconds)
    pub async fn set<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl_seconds: Option<u64>,
    ) -> redis::RedisResult<()> {
        let serialized = serde_json::to_string(value).map_err(|e| {
            redis::RedisError::from((
                redis::ErrorKind::TypeError,
                "Serialization error",
                e.to_string(),
            ))
        })?;

        let mut cmd = redis::cmd("SET");
        cmd.arg(key).arg(serialized);

        if let Some(ttl) = ttl_seconds {
            cmd.arg("EX").arg(ttl);
        }

        cmd.query_async(&mut self.connection.clone()).await
    }

    /// Delete a key from cache
    pub async fn delete(&self, key: &str) -> redis::RedisResult<()> {
        redis::cmd("DEL")
            .arg(key)
            .query_async(&mut self.connection.clone())
            .await
    }

    /// Delete multiple keys matching a pattern
    pub async fn delete_pattern(&self, pattern: &str) -> redis::RedisResult<()> {
        let keys: Vec<String> = redis::cmd("KEYS")
            .arg(pattern)
            .query_async(&mut self.connection.clone())
            .await?;

        if !keys.is_empty() {
            let _: () = redis::cmd("DEL")
                .arg(&keys)
                .query_async(&mut self.connection.clone())
                .await?;
        }

        Ok(())
    }
}

/// Cache key generators
pub mod keys {
    /// Key for a single graduate profile
    pub fn graduate(id: &str) -> String {
        format!("graduate:{}", id)
    }

    /// Key for one page of the graduate listing
    pub fn graduate_list(filters: &str) -> String {
        format!("graduates:list:{}", filters)
    }

    /// Pattern matching every cached graduate listing page
    pub fn graduate_list_pattern() -> String {
        "graduates:list:*".to_string()
    }

    /// Key for the department list
    pub fn departments() -> String {
        "departments:all".to_string()
    }
}
