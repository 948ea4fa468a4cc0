//! 产品数据模型

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::CoreError;
use crate::infrastructure::{Document, StoreError};

/// 响应中链接使用的字段名，不作为扩展字段保存
pub const LINKS_FIELD: &str = "links";

/// 产品：`id`、`nome`、`valor` 固定，其余字段原样保存
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Produto {
    pub id: String,
    pub nome: String,
    pub valor: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Produto {
    pub fn into_document(self) -> Result<Document, StoreError> {
        match serde_json::to_value(self)? {
            Value::Object(doc) => Ok(doc),
            _ => Err(StoreError::Corrupted("产品必须序列化为对象".to_string())),
        }
    }
}

impl TryFrom<Document> for Produto {
    type Error = StoreError;

    fn try_from(doc: Document) -> Result<Self, Self::Error> {
        Ok(serde_json::from_value(Value::Object(doc))?)
    }
}

/// 创建请求：必须包含 `nome` 与 `valor`
#[derive(Debug, Clone, PartialEq)]
pub struct NovoProduto {
    pub nome: String,
    pub valor: f64,
    pub extra: Map<String, Value>,
}

impl NovoProduto {
    pub fn into_produto(self, id: String) -> Produto {
        Produto {
            id,
            nome: self.nome,
            valor: self.valor,
            extra: self.extra,
        }
    }
}

impl TryFrom<Map<String, Value>> for NovoProduto {
    type Error = CoreError;

    fn try_from(body: Map<String, Value>) -> Result<Self, Self::Error> {
        let patch = ProdutoPatch::try_from(body)?;
        let nome = patch
            .nome
            .ok_or_else(|| CoreError::BadRequest("campo obrigatório: nome".to_string()))?;
        let valor = patch
            .valor
            .ok_or_else(|| CoreError::BadRequest("campo obrigatório: valor".to_string()))?;

        Ok(Self {
            nome,
            valor,
            extra: patch.extra,
        })
    }
}

/// 更新请求：所有字段可选，`id` 被忽略
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProdutoPatch {
    pub nome: Option<String>,
    pub valor: Option<f64>,
    pub extra: Map<String, Value>,
}

impl ProdutoPatch {
    /// 转为存储层的浅合并文档
    pub fn into_document(self) -> Document {
        let mut doc = self.extra;
        if let Some(nome) = self.nome {
            doc.insert("nome".to_string(), Value::String(nome));
        }
        if let Some(valor) = self.valor {
            doc.insert("valor".to_string(), Value::from(valor));
        }
        doc
    }
}

impl TryFrom<Map<String, Value>> for ProdutoPatch {
    type Error = CoreError;

    fn try_from(body: Map<String, Value>) -> Result<Self, Self::Error> {
        let mut patch = ProdutoPatch::default();

        for (key, value) in body {
            match key.as_str() {
                "id" | LINKS_FIELD => {}
                "nome" => match value {
                    Value::String(nome) => patch.nome = Some(nome),
                    _ => return Err(CoreError::BadRequest("nome deve ser texto".to_string())),
                },
                "valor" => match value.as_f64() {
                    Some(valor) => patch.valor = Some(valor),
                    None => {
                        return Err(CoreError::BadRequest("valor deve ser numérico".to_string()))
                    }
                },
                _ => {
                    patch.extra.insert(key, value);
                }
            }
        }

        Ok(patch)
    }
}
