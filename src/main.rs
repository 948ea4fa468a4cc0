use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use produtos_api::app::{OPENAPI_JSON_PATH, SWAGGER_PATH};
use produtos_api::infrastructure::{JsonFileStore, Logger};
use produtos_api::{create_app, AppConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    Logger::init(&config.log_level);

    let store = JsonFileStore::open(&config.db_path)
        .with_context(|| format!("无法打开存储文件 {}", config.db_path.display()))?;
    info!("存储文件: {}", store.path().display());

    let app = create_app(AppState::new(Arc::new(store)), config.port);

    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("无法绑定到 {}", address))?;

    info!("🚀 Servidor rodando na porta {}", config.port);
    info!("📖 API 端点:");
    info!("   GET    /v1/produtos        - 获取所有产品 (/produtos 同义)");
    info!("   POST   /v1/produtos        - 创建产品");
    info!("   GET    /v1/produtos/:id    - 获取产品");
    info!("   PUT    /v1/produtos/:id    - 更新产品");
    info!("   DELETE /v1/produtos/:id    - 删除产品");
    info!("   *      /v2/produtos[/:id]  - 同上，支持 ?hateoas=true");
    info!("   GET    {}            - Swagger UI ({})", SWAGGER_PATH, OPENAPI_JSON_PATH);

    axum::serve(listener, app).await.context("服务器运行失败")?;
    Ok(())
}
