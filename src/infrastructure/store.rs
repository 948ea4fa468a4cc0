//! 文档存储抽象
//!
//! 集合名 -> 有序的 JSON 对象序列。处理器只通过 [`DocumentStore`] 访问数据，
//! 每次操作都重新读取，不在请求之间缓存副本。

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use thiserror::Error;

/// 单条记录
pub type Document = Map<String, Value>;

/// 记录主键字段
pub const ID_FIELD: &str = "id";

/// 存储错误类型
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("读写存储文件失败: {0}")]
    Io(#[from] std::io::Error),
    #[error("序列化失败: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("存储内容损坏: {0}")]
    Corrupted(String),
    #[error("存储锁已中毒")]
    LockPoisoned,
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// 文档存储接口
pub trait DocumentStore: Send + Sync {
    /// 按插入顺序返回集合内所有记录，集合不存在时返回空
    fn get_all(&self, collection: &str) -> StoreResult<Vec<Document>>;

    fn find_by_id(&self, collection: &str, id: &str) -> StoreResult<Option<Document>>;

    /// 追加记录，返回前已持久化
    fn insert(&self, collection: &str, record: Document) -> StoreResult<()>;

    /// 浅合并 `partial` 到已有记录，`id` 永不改变；未找到时返回 `None`
    fn update_by_id(
        &self,
        collection: &str,
        id: &str,
        partial: Document,
    ) -> StoreResult<Option<Document>>;

    /// 删除匹配记录，返回是否有记录被删除
    fn remove_by_id(&self, collection: &str, id: &str) -> StoreResult<bool>;
}

/// 集合数据，内存与文件两种实现共用
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collections {
    inner: BTreeMap<String, Vec<Document>>,
}

impl Collections {
    pub fn new() -> Self {
        Self::default()
    }

    /// 确保集合存在
    pub fn ensure(&mut self, collection: &str) {
        self.inner.entry(collection.to_string()).or_default();
    }

    pub fn get_all(&self, collection: &str) -> Vec<Document> {
        self.inner.get(collection).cloned().unwrap_or_default()
    }

    pub fn find_by_id(&self, collection: &str, id: &str) -> Option<Document> {
        self.inner
            .get(collection)?
            .iter()
            .find(|doc| matches_id(doc, id))
            .cloned()
    }

    pub fn insert(&mut self, collection: &str, record: Document) {
        self.inner
            .entry(collection.to_string())
            .or_default()
            .push(record);
    }

    pub fn update_by_id(
        &mut self,
        collection: &str,
        id: &str,
        partial: Document,
    ) -> Option<Document> {
        let doc = self
            .inner
            .get_mut(collection)?
            .iter_mut()
            .find(|doc| matches_id(doc, id))?;

        for (key, value) in partial {
            if key == ID_FIELD {
                continue;
            }
            doc.insert(key, value);
        }
        Some(doc.clone())
    }

    pub fn remove_by_id(&mut self, collection: &str, id: &str) -> bool {
        let Some(docs) = self.inner.get_mut(collection) else {
            return false;
        };
        let before = docs.len();
        docs.retain(|doc| !matches_id(doc, id));
        docs.len() != before
    }

    /// 从 `{ "集合": [ {...}, ... ] }` 形式的 JSON 解析
    pub fn from_json(value: Value) -> StoreResult<Self> {
        let Value::Object(root) = value else {
            return Err(StoreError::Corrupted("根节点必须是对象".to_string()));
        };

        let mut inner = BTreeMap::new();
        for (name, docs) in root {
            let Value::Array(items) = docs else {
                return Err(StoreError::Corrupted(format!("集合 {} 必须是数组", name)));
            };
            let mut records = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::Object(doc) => records.push(doc),
                    _ => {
                        return Err(StoreError::Corrupted(format!(
                            "集合 {} 包含非对象记录",
                            name
                        )))
                    }
                }
            }
            inner.insert(name, records);
        }

        Ok(Self { inner })
    }

    pub fn to_json(&self) -> Value {
        let root = self
            .inner
            .iter()
            .map(|(name, docs)| {
                let items = docs.iter().cloned().map(Value::Object).collect();
                (name.clone(), Value::Array(items))
            })
            .collect();
        Value::Object(root)
    }
}

fn matches_id(doc: &Document, id: &str) -> bool {
    doc.get(ID_FIELD).and_then(Value::as_str) == Some(id)
}
