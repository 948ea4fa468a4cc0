//! 产品领域：模型、服务与链接

pub mod hateoas;
pub mod model;
pub mod service;

pub use model::{NovoProduto, Produto, ProdutoPatch};
pub use service::ProdutoService;
