//! 应用共享状态

use std::sync::Arc;

use super::produtos::ProdutoService;
use crate::infrastructure::DocumentStore;

#[derive(Clone)]
pub struct AppState {
    pub produto_service: ProdutoService,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            produto_service: ProdutoService::new(store),
        }
    }
}
