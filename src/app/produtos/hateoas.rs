//! v2 超媒体链接

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::model::{Produto, LINKS_FIELD};

/// v2 资源根路径
pub const V2_BASE_URL: &str = "/v2/produtos";

/// 单个操作链接
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Link {
    #[schema(example = "self")]
    pub rel: String,
    #[schema(example = "GET")]
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[schema(example = "/v2/produtos/d5fE_asz")]
    pub href: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    SelfLink,
    Create,
    Update,
    Delete,
}

/// 列表、查询、创建、更新都使用的链接集合
pub const ITEM_RELATIONS: &[Relation] = &[Relation::SelfLink, Relation::Update, Relation::Delete];

impl Relation {
    fn to_link(self, id: &str) -> Link {
        let item = format!("{}/{}", V2_BASE_URL, id);
        let (rel, method, title, href) = match self {
            Relation::SelfLink => ("self", "GET", None, item),
            Relation::Create => (
                "create",
                "POST",
                Some("Cria um produto"),
                V2_BASE_URL.to_string(),
            ),
            Relation::Update => ("update", "PUT", Some("Altera um produto"), item),
            Relation::Delete => ("delete", "DELETE", Some("Remove um produto"), item),
        };

        Link {
            rel: rel.to_string(),
            method: method.to_string(),
            title: title.map(str::to_string),
            href,
        }
    }
}

/// 按给定顺序生成链接
pub fn build_links(id: &str, relations: &[Relation]) -> Vec<Link> {
    relations.iter().map(|rel| rel.to_link(id)).collect()
}

/// v2 响应体：产品字段加可选 `links`
#[derive(Debug, Clone, Serialize)]
pub struct ProdutoResource {
    #[serde(flatten)]
    pub produto: Produto,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

impl ProdutoResource {
    pub fn new(mut produto: Produto, with_links: bool) -> Self {
        let links = if with_links {
            // 旧数据里可能残留 links 字段
            produto.extra.remove(LINKS_FIELD);
            build_links(&produto.id, ITEM_RELATIONS)
        } else {
            Vec::new()
        };
        Self { produto, links }
    }
}
