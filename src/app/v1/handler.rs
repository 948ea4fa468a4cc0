//! v1 处理器：纯 JSON

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{Map, Value};

use crate::app::produtos::{NovoProduto, Produto, ProdutoPatch};
use crate::app::state::AppState;
use crate::core::error::CoreError;

/// Retorna a lista com todos os produtos
#[utoipa::path(
    get,
    path = "/v1/produtos",
    tag = "Produtos",
    responses(
        (status = 200, description = "A lista de produtos", body = Vec<crate::app::docs::ProdutoSchema>)
    )
)]
pub async fn list_produtos(
    State(state): State<AppState>,
) -> Result<Json<Vec<Produto>>, CoreError> {
    Ok(Json(state.produto_service.list()?))
}

/// Retorna o produto por id
#[utoipa::path(
    get,
    path = "/v1/produtos/{id}",
    tag = "Produtos",
    params(("id" = String, Path, description = "Id do produto")),
    responses(
        (status = 200, description = "Produto retornado com sucesso", body = crate::app::docs::ProdutoSchema),
        (status = 404, description = "Produto não encontrado"),
        (status = 500, description = "Ocorreu algum erro")
    )
)]
pub async fn get_produto(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Produto>, CoreError> {
    Ok(Json(state.produto_service.get(&id)?))
}

/// Cria um novo produto
#[utoipa::path(
    post,
    path = "/v1/produtos",
    tag = "Produtos",
    request_body = crate::app::docs::NovoProdutoSchema,
    responses(
        (status = 201, description = "Produto criado com sucesso", body = crate::app::docs::ProdutoSchema),
        (status = 400, description = "Campos obrigatórios ausentes ou inválidos"),
        (status = 500, description = "Ocorreu algum erro")
    )
)]
pub async fn create_produto(
    State(state): State<AppState>,
    Json(body): Json<Map<String, Value>>,
) -> Result<(StatusCode, Json<Produto>), CoreError> {
    let novo = NovoProduto::try_from(body)?;
    let produto = state.produto_service.create(novo)?;
    Ok((StatusCode::CREATED, Json(produto)))
}

/// Atualiza o produto por id
#[utoipa::path(
    put,
    path = "/v1/produtos/{id}",
    tag = "Produtos",
    params(("id" = String, Path, description = "Id do produto")),
    request_body = crate::app::docs::NovoProdutoSchema,
    responses(
        (status = 200, description = "Produto atualizado com sucesso", body = crate::app::docs::ProdutoSchema),
        (status = 400, description = "Campos inválidos"),
        (status = 404, description = "Produto não encontrado"),
        (status = 500, description = "Ocorreu algum erro")
    )
)]
pub async fn update_produto(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Map<String, Value>>,
) -> Result<Json<Produto>, CoreError> {
    let patch = ProdutoPatch::try_from(body)?;
    Ok(Json(state.produto_service.update(&id, patch)?))
}

/// Remove o produto por id
#[utoipa::path(
    delete,
    path = "/v1/produtos/{id}",
    tag = "Produtos",
    params(("id" = String, Path, description = "Id do produto")),
    responses(
        (status = 204, description = "O produto foi removido com sucesso"),
        (status = 500, description = "Ocorreu algum erro")
    )
)]
pub async fn delete_produto(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, CoreError> {
    state.produto_service.delete(&id)?;
    Ok(StatusCode::NO_CONTENT)
}
