//! # 产品 REST API
//!
//! 基于 JSON 文件的产品增删改查服务：
//! - v1：纯 JSON（`/produtos` 与 `/v1/produtos`）
//! - v2：可选超媒体链接（`/v2/produtos?hateoas=true`）
//! - Swagger 文档：`/swagger`

pub mod app;
pub mod config;
pub mod core;
pub mod infrastructure;

pub use app::{create_app, AppState};
pub use config::AppConfig;
