use actix_web::web;

use crate::errors::AppError;

pub mod carts;
pub mod orders;
pub mod products;

/// Body errors (bad JSON, unknown method names) become 422 with a JSON body.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::Unprocessable(err.to_string()).into())
}

/// Same treatment for malformed query strings such as `?page=abc`.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| AppError::Unprocessable(err.to_string()).into())
}
