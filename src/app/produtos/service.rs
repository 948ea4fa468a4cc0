//! 产品业务服务

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use super::model::{NovoProduto, Produto, ProdutoPatch};
use crate::core::CoreError;
use crate::infrastructure::{DocumentStore, StoreError};

/// 产品集合名
pub const COLLECTION: &str = "produtos";

/// 无状态服务，每次操作都从存储重新读取
#[derive(Clone)]
pub struct ProdutoService {
    store: Arc<dyn DocumentStore>,
}

impl ProdutoService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Result<Vec<Produto>, CoreError> {
        let produtos = self
            .store
            .get_all(COLLECTION)?
            .into_iter()
            .map(Produto::try_from)
            .collect::<Result<Vec<_>, StoreError>>()?;
        debug!("读取到 {} 个产品", produtos.len());
        Ok(produtos)
    }

    pub fn get(&self, id: &str) -> Result<Produto, CoreError> {
        match self.store.find_by_id(COLLECTION, id)? {
            Some(doc) => Ok(Produto::try_from(doc)?),
            None => Err(CoreError::NotFound),
        }
    }

    pub fn create(&self, novo: NovoProduto) -> Result<Produto, CoreError> {
        let produto = novo.into_produto(Uuid::new_v4().to_string());
        self.store
            .insert(COLLECTION, produto.clone().into_document()?)?;
        info!("产品已创建: {}", produto.id);
        Ok(produto)
    }

    pub fn update(&self, id: &str, patch: ProdutoPatch) -> Result<Produto, CoreError> {
        if self
            .store
            .update_by_id(COLLECTION, id, patch.into_document())?
            .is_none()
        {
            return Err(CoreError::NotFound);
        }
        info!("产品已更新: {}", id);
        // 返回存储中合并后的记录
        self.get(id)
    }

    pub fn delete(&self, id: &str) -> Result<(), CoreError> {
        if self.store.remove_by_id(COLLECTION, id)? {
            info!("产品已删除: {}", id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::MemoryStore;
    use serde_json::Map;
    use std::collections::HashSet;

    fn service() -> ProdutoService {
        ProdutoService::new(Arc::new(MemoryStore::new()))
    }

    fn novo(nome: &str, valor: f64) -> NovoProduto {
        NovoProduto {
            nome: nome.to_string(),
            valor,
            extra: Map::new(),
        }
    }

    #[test]
    fn test_create_generates_unique_ids() {
        let service = service();
        let ids: HashSet<String> = (0..50)
            .map(|i| service.create(novo("Sapato", i as f64)).unwrap().id)
            .collect();

        assert_eq!(ids.len(), 50);
        assert!(ids.iter().all(|id| !id.is_empty()));
        assert_eq!(service.list().unwrap().len(), 50);
    }

    #[test]
    fn test_update_keeps_other_fields() {
        let service = service();
        let created = service.create(novo("Sapato", 123.45)).unwrap();

        let patch = ProdutoPatch {
            valor: Some(200.0),
            ..Default::default()
        };
        let updated = service.update(&created.id, patch).unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.nome, "Sapato");
        assert_eq!(updated.valor, 200.0);
        assert_eq!(service.get(&created.id).unwrap(), updated);
    }

    #[test]
    fn test_missing_is_not_found() {
        let service = service();
        assert!(matches!(service.get("nope"), Err(CoreError::NotFound)));
        assert!(matches!(
            service.update("nope", ProdutoPatch::default()),
            Err(CoreError::NotFound)
        ));
        assert!(service.delete("nope").is_ok());
    }
}
