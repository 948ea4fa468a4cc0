//! OpenAPI 文档

use utoipa::openapi::server::Server;
use utoipa::{OpenApi, ToSchema};

use super::produtos::hateoas::Link;
use super::{v1, v2};

/// Produto armazenado
#[derive(ToSchema)]
#[schema(example = json!({"id": "d5fE_asz", "nome": "Novo Sapato", "imposto": 15.23, "valor": 123.45}))]
pub struct ProdutoSchema {
    /// Código gerado automaticamente para o produto
    pub id: String,
    /// Nome descritivo do produto
    pub nome: String,
    /// Valor de venda do produto
    pub valor: f64,
    /// Campos adicionais são armazenados como enviados
    pub imposto: Option<f64>,
}

/// Corpo de criação e atualização
#[derive(ToSchema)]
#[schema(example = json!({"nome": "Novo Sapato", "valor": 123.45}))]
pub struct NovoProdutoSchema {
    pub nome: String,
    pub valor: f64,
    pub imposto: Option<f64>,
}

/// Produto com links de navegação (v2, `hateoas=true`)
#[derive(ToSchema)]
pub struct ProdutoComLinksSchema {
    pub id: String,
    pub nome: String,
    pub valor: f64,
    pub imposto: Option<f64>,
    pub links: Option<Vec<Link>>,
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Exemplo de API",
        version = "1.0.0",
        description = "Simples exemplo de API Rest"
    ),
    paths(
        v1::handler::list_produtos,
        v1::handler::get_produto,
        v1::handler::create_produto,
        v1::handler::update_produto,
        v1::handler::delete_produto,
        v2::handler::list_produtos,
        v2::handler::get_produto,
        v2::handler::create_produto,
        v2::handler::update_produto,
        v2::handler::delete_produto,
    ),
    components(schemas(ProdutoSchema, NovoProdutoSchema, ProdutoComLinksSchema, Link)),
    tags((name = "Produtos", description = "API de gerenciamento de produtos"))
)]
pub struct ApiDoc;

/// 生成带本地服务器地址的文档
pub fn openapi(port: u16) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.servers = Some(vec![Server::new(format!("http://localhost:{}", port))]);
    doc
}
