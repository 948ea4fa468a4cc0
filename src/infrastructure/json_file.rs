//! JSON 文件文档存储
//!
//! 整个数据库是一个 JSON 文件，每次变更都完整重写。
//! 先写同目录临时文件再 rename 覆盖，原文件要么是旧内容要么是新内容。
//! 变更先作用于副本，写盘成功后才替换内存状态。

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use serde_json::Value;
use tracing::{debug, info};

use super::store::{Collections, Document, DocumentStore, StoreError, StoreResult};

/// 默认集合
pub const DEFAULT_COLLECTION: &str = "produtos";

pub struct JsonFileStore {
    path: PathBuf,
    data: Mutex<Collections>,
}

impl JsonFileStore {
    /// 打开存储文件；文件不存在时以 `{"produtos": []}` 创建
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();

        let data = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            let value: Value = serde_json::from_str(&raw)?;
            let mut data = Collections::from_json(value)?;
            data.ensure(DEFAULT_COLLECTION);
            info!("已加载存储文件 {}", path.display());
            data
        } else {
            let mut data = Collections::new();
            data.ensure(DEFAULT_COLLECTION);
            write_file(&path, &data)?;
            info!("已创建存储文件 {}", path.display());
            data
        };

        Ok(Self {
            path,
            data: Mutex::new(data),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Collections>> {
        self.data.lock().map_err(|_| StoreError::LockPoisoned)
    }

    /// 在副本上执行变更，写盘后提交
    fn mutate<T>(&self, f: impl FnOnce(&mut Collections) -> T) -> StoreResult<T> {
        let mut guard = self.lock()?;
        let mut next = guard.clone();
        let out = f(&mut next);
        write_file(&self.path, &next)?;
        *guard = next;
        Ok(out)
    }
}

/// 同目录下的临时文件路径，保证 rename 不跨文件系统
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "db.json".into());
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_file(path: &Path, data: &Collections) -> StoreResult<()> {
    let raw = serde_json::to_string_pretty(&data.to_json())?;
    let tmp = temp_path(path);

    let mut file = File::create(&tmp)?;
    file.write_all(raw.as_bytes())?;
    file.sync_all()?;
    drop(file);

    if let Err(err) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(err.into());
    }
    debug!("已写入存储文件 {}", path.display());
    Ok(())
}

impl DocumentStore for JsonFileStore {
    fn get_all(&self, collection: &str) -> StoreResult<Vec<Document>> {
        Ok(self.lock()?.get_all(collection))
    }

    fn find_by_id(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        Ok(self.lock()?.find_by_id(collection, id))
    }

    fn insert(&self, collection: &str, record: Document) -> StoreResult<()> {
        self.mutate(|data| data.insert(collection, record))
    }

    fn update_by_id(
        &self,
        collection: &str,
        id: &str,
        partial: Document,
    ) -> StoreResult<Option<Document>> {
        // 未命中时不重写文件
        if self.lock()?.find_by_id(collection, id).is_none() {
            return Ok(None);
        }
        self.mutate(|data| data.update_by_id(collection, id, partial))
    }

    fn remove_by_id(&self, collection: &str, id: &str) -> StoreResult<bool> {
        self.mutate(|data| data.remove_by_id(collection, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_open_creates_default_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("db.json");

        let store = JsonFileStore::open(&path).unwrap();
        assert!(store.get_all("produtos").unwrap().is_empty());

        let raw: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw, json!({"produtos": []}));
    }

    #[test]
    fn test_mutations_are_persisted() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("db.json");

        let store = JsonFileStore::open(&path).unwrap();
        store
            .insert("produtos", doc(json!({"id": "a", "nome": "Sapato", "valor": 1.5})))
            .unwrap();
        store
            .insert("produtos", doc(json!({"id": "b", "nome": "Meia", "valor": 2.0})))
            .unwrap();
        store
            .update_by_id("produtos", "a", doc(json!({"valor": 3.0})))
            .unwrap();
        assert!(store.remove_by_id("produtos", "b").unwrap());

        let reopened = JsonFileStore::open(&path).unwrap();
        let all = reopened.get_all("produtos").unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0]["id"], "a");
        assert_eq!(all[0]["valor"], 3.0);
    }

    #[test]
    fn test_open_adds_missing_collection() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("db.json");
        fs::write(&path, r#"{"outros": [{"id": "x"}]}"#).unwrap();

        let store = JsonFileStore::open(&path).unwrap();
        assert!(store.get_all("produtos").unwrap().is_empty());
        assert_eq!(store.get_all("outros").unwrap().len(), 1);
    }

    #[test]
    fn test_open_rejects_corrupted_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("db.json");

        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            JsonFileStore::open(&path),
            Err(StoreError::Serialization(_))
        ));

        fs::write(&path, r#"{"produtos": 1}"#).unwrap();
        assert!(matches!(
            JsonFileStore::open(&path),
            Err(StoreError::Corrupted(_))
        ));
    }

    #[test]
    fn test_failed_write_keeps_memory_state() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("db.json");
        let store = JsonFileStore::open(&path).unwrap();

        // 让目标路径变成目录，写盘必然失败
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();

        let result = store.insert("produtos", doc(json!({"id": "a"})));
        assert!(matches!(result, Err(StoreError::Io(_))));
        assert!(store.get_all("produtos").unwrap().is_empty());
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn test_write_replaces_file_without_leftovers() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("db.json");
        let store = JsonFileStore::open(&path).unwrap();

        // 上次崩溃残留的临时文件会被覆盖
        fs::write(temp_path(&path), "{\"produtos\": [").unwrap();

        store
            .insert("produtos", doc(json!({"id": "a", "nome": "Sapato", "valor": 1.0})))
            .unwrap();

        assert!(!temp_path(&path).exists());
        let raw: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["produtos"][0]["id"], "a");

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_temp_path_is_sibling() {
        let path = Path::new("/srv/dados/db.json");
        assert_eq!(temp_path(path), PathBuf::from("/srv/dados/db.json.tmp"));
    }

    #[test]
    fn test_update_missing_does_not_touch_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("db.json");
        let store = JsonFileStore::open(&path).unwrap();

        fs::remove_file(&path).unwrap();
        let result = store
            .update_by_id("produtos", "nope", doc(json!({"valor": 1})))
            .unwrap();
        assert!(result.is_none());
        assert!(!path.exists());
    }
}
