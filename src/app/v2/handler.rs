//! v2 处理器：`hateoas=true` 时附加操作链接

use axum::{
    async_trait,
    extract::{FromRequestParts, Path, Query, State},
    http::{request::Parts, StatusCode},
    response::Json,
};
use serde::{de, Deserialize, Deserializer};
use serde_json::{Map, Value};
use utoipa::IntoParams;

use crate::app::produtos::hateoas::ProdutoResource;
use crate::app::produtos::{NovoProduto, ProdutoPatch};
use crate::app::state::AppState;
use crate::core::error::CoreError;

/// 链接开关
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HateoasQuery {
    /// Inclui links de navegação na resposta (`true`/`1`)
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub hateoas: bool,
}

/// `true`/`1` 开启，`false`/`0`/空值关闭
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim() {
        "true" | "1" => Ok(true),
        "false" | "0" | "" => Ok(false),
        other => Err(de::Error::custom(format!(
            "hateoas deve ser true ou false, recebido: {}",
            other
        ))),
    }
}

/// 从查询串提取链接开关，错误统一为 JSON 400
#[derive(Debug, Clone, Copy, Default)]
pub struct HateoasFlag(pub bool);

#[async_trait]
impl<S> FromRequestParts<S> for HateoasFlag
where
    S: Send + Sync,
{
    type Rejection = CoreError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<HateoasQuery>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| CoreError::BadRequest(rejection.body_text()))?;
        Ok(Self(query.hateoas))
    }
}

/// Retorna a lista com todos os produtos
#[utoipa::path(
    get,
    path = "/v2/produtos",
    tag = "Produtos",
    params(HateoasQuery),
    responses(
        (status = 200, description = "A lista de produtos", body = Vec<crate::app::docs::ProdutoComLinksSchema>)
    )
)]
pub async fn list_produtos(
    State(state): State<AppState>,
    HateoasFlag(hateoas): HateoasFlag,
) -> Result<Json<Vec<ProdutoResource>>, CoreError> {
    let produtos = state
        .produto_service
        .list()?
        .into_iter()
        .map(|produto| ProdutoResource::new(produto, hateoas))
        .collect();
    Ok(Json(produtos))
}

/// Retorna o produto por id
#[utoipa::path(
    get,
    path = "/v2/produtos/{id}",
    tag = "Produtos",
    params(("id" = String, Path, description = "Id do produto"), HateoasQuery),
    responses(
        (status = 200, description = "Produto retornado com sucesso", body = crate::app::docs::ProdutoComLinksSchema),
        (status = 404, description = "Produto não encontrado"),
        (status = 500, description = "Ocorreu algum erro")
    )
)]
pub async fn get_produto(
    State(state): State<AppState>,
    Path(id): Path<String>,
    HateoasFlag(hateoas): HateoasFlag,
) -> Result<Json<ProdutoResource>, CoreError> {
    let produto = state.produto_service.get(&id)?;
    Ok(Json(ProdutoResource::new(produto, hateoas)))
}

/// Cria um novo produto
#[utoipa::path(
    post,
    path = "/v2/produtos",
    tag = "Produtos",
    params(HateoasQuery),
    request_body = crate::app::docs::NovoProdutoSchema,
    responses(
        (status = 201, description = "Produto criado com sucesso", body = crate::app::docs::ProdutoComLinksSchema),
        (status = 400, description = "Campos obrigatórios ausentes ou inválidos"),
        (status = 500, description = "Ocorreu algum erro")
    )
)]
pub async fn create_produto(
    State(state): State<AppState>,
    HateoasFlag(hateoas): HateoasFlag,
    Json(body): Json<Map<String, Value>>,
) -> Result<(StatusCode, Json<ProdutoResource>), CoreError> {
    let novo = NovoProduto::try_from(body)?;
    let produto = state.produto_service.create(novo)?;
    Ok((
        StatusCode::CREATED,
        Json(ProdutoResource::new(produto, hateoas)),
    ))
}

/// Atualiza o produto por id
#[utoipa::path(
    put,
    path = "/v2/produtos/{id}",
    tag = "Produtos",
    params(("id" = String, Path, description = "Id do produto"), HateoasQuery),
    request_body = crate::app::docs::NovoProdutoSchema,
    responses(
        (status = 200, description = "Produto atualizado com sucesso", body = crate::app::docs::ProdutoComLinksSchema),
        (status = 400, description = "Campos inválidos"),
        (status = 404, description = "Produto não encontrado"),
        (status = 500, description = "Ocorreu algum erro")
    )
)]
pub async fn update_produto(
    State(state): State<AppState>,
    Path(id): Path<String>,
    HateoasFlag(hateoas): HateoasFlag,
    Json(body): Json<Map<String, Value>>,
) -> Result<Json<ProdutoResource>, CoreError> {
    let patch = ProdutoPatch::try_from(body)?;
    let produto = state.produto_service.update(&id, patch)?;
    Ok(Json(ProdutoResource::new(produto, hateoas)))
}

/// Remove o produto por id
#[utoipa::path(
    delete,
    path = "/v2/produtos/{id}",
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
