pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;

#[cfg(test)]
pub(crate) mod testing;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::catalog_service::CatalogService;
use application::checkout_service::CheckoutService;
use application::order_service::OrderService;
use infrastructure::DieselUnitOfWork;

pub use config::AppConfig;
pub use db::{create_pool, DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::carts::checkout_cart,
        handlers::carts::get_cart,
        handlers::orders::get_order,
        handlers::orders::list_orders,
        handlers::products::list_products,
    ),
    components(schemas(
        handlers::carts::CheckoutBody,
        handlers::carts::CartResponse,
        handlers::carts::CartItemResponse,
        handlers::carts::CustomerResponse,
        handlers::orders::AddressResponse,
        handlers::orders::OrderResponse,
        handlers::orders::OrderItemResponse,
        handlers::orders::OrderSummaryResponse,
        handlers::orders::ListOrdersResponse,
        handlers::products::ProductResponse,
    )),
    tags(
        (name = "carts", description = "Cart projection and checkout"),
        (name = "orders", description = "Placed orders"),
        (name = "products", description = "Product catalog"),
    )
)]
pub struct ApiDoc;

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut conn = pool.get()?;
    conn.run_pending_migrations(MIGRATIONS)?;
    Ok(())
}

/// Register the services, extractor configs and routes on an app.
pub fn configure(cfg: &mut web::ServiceConfig, uow: DieselUnitOfWork) {
    cfg.app_data(web::Data::new(CheckoutService::new(uow.clone())))
        .app_data(web::Data::new(CatalogService::new(uow.clone())))
        .app_data(web::Data::new(OrderService::new(uow)))
        .app_data(handlers::json_config())
        .app_data(handlers::query_config())
        .service(
            web::scope("/carts")
                .route("/{cart_id}", web::get().to(handlers::carts::get_cart))
                .route(
                    "/{cart_id}/checkout",
                    web::post().to(handlers::carts::checkout_cart),
                ),
        )
        .service(
            web::scope("/orders")
                .route("", web::get().to(handlers::orders::list_orders))
                .route("/{id}", web::get().to(handlers::orders::get_order)),
        )
        .route("/products", web::get().to(handlers::products::list_products));
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    pool: DbPool,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let uow = DieselUnitOfWork::new(pool);
    let openapi = ApiDoc::openapi();

    Ok(HttpServer::new(move || {
        let uow = uow.clone();
        App::new()
            .wrap(Logger::default())
            .configure(move |cfg| configure(cfg, uow))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
