//! 应用层：路由组装

pub mod docs;
pub mod produtos;
pub mod state;
pub mod v1;
pub mod v2;

use axum::{middleware, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::core::middleware::request_logging_middleware;
pub use state::AppState;

/// Swagger UI 路径
pub const SWAGGER_PATH: &str = "/swagger";
/// OpenAPI JSON 路径
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// v1 路由，挂载在 `base` 与 `base/:id`
fn v1_routes(base: &str) -> Router<AppState> {
    use self::v1::handler::*;

    Router::new()
        .route(base, get(list_produtos).post(create_produto))
        .route(
            &format!("{}/:id", base),
            get(get_produto).put(update_produto).delete(delete_produto),
        )
}

fn v2_routes(base: &str) -> Router<AppState> {
    use self::v2::handler::*;

    Router::new()
        .route(base, get(list_produtos).post(create_produto))
        .route(
            &format!("{}/:id", base),
            get(get_produto).put(update_produto).delete(delete_produto),
        )
}

/// 创建完整应用，`port` 仅用于文档中的服务器地址
pub fn create_app(state: AppState, port: u16) -> Router {
    Router::new()
        .merge(v1_routes("/produtos"))
        .merge(v1_routes("/v1/produtos"))
        .merge(v2_routes(produtos::hateoas::V2_BASE_URL))
        .with_state(state)
        .merge(SwaggerUi::new(SWAGGER_PATH).url(OPENAPI_JSON_PATH, docs::openapi(port)))
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
