//! 内存文档存储

use std::sync::{Mutex, MutexGuard};

use super::store::{Collections, Document, DocumentStore, StoreError, StoreResult};

/// 不落盘的存储，用于测试与临时运行
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: Mutex<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以已有数据初始化
    pub fn with_collections(data: Collections) -> Self {
        Self {
            data: Mutex::new(data),
        }
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Collections>> {
        self.data.lock().map_err(|_| StoreError::LockPoisoned)
    }
}

impl DocumentStore for MemoryStore {
    fn get_all(&self, collection: &str) -> StoreResult<Vec<Document>> {
        Ok(self.lock()?.get_all(collection))
    }

    fn find_by_id(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        Ok(self.lock()?.find_by_id(collection, id))
    }

    fn insert(&self, collection: &str, record: Document) -> StoreResult<()> {
        self.lock()?.insert(collection, record);
        Ok(())
    }

    fn update_by_id(
        &self,
        collection: &str,
        id: &str,
        partial: Document,
    ) -> StoreResult<Option<Document>> {
        Ok(self.lock()?.update_by_id(collection, id, partial))
    }

    fn remove_by_id(&self, collection: &str, id: &str) -> StoreResult<bool> {
        Ok(self.lock()?.remove_by_id(collection, id))
    }
}
