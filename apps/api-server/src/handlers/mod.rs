//! HTTP handlers and route configuration.

mod auth;
mod comments;
mod health;
mod posts;

use actix_web::web;

use crate::middleware::error::{json_error, path_error, query_error};

/// Configure all application routes.
///
/// Protection is per handler: a route requires authentication when its
/// handler takes an `Identity`, so one path can mix public reads and
/// protected writes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::PathConfig::default().error_handler(path_error))
        .app_data(web::QueryConfig::default().error_handler(query_error))
        .service(
            web::scope("/api")
                // Public routes
                .route("/health", web::get().to(health::health_check))
                .route("/register", web::post().to(auth::register))
                .route("/login", web::post().to(auth::login))
                // Protected routes
                .route("/profile", web::get().to(auth::profile))
                // Posts
                .service(
                    web::resource("/posts")
                        .route(web::get().to(posts::list_posts))
                        .route(web::post().to(posts::create_post)),
                )
                .service(
                    web::resource("/posts/{id}")
                        .route(web::get().to(posts::get_post))
                        .route(web::put().to(posts::update_post))
                        .route(web::delete().to(posts::delete_post)),
                )
                .service(
                    web::resource("/posts/{id}/comments")
                        .route(web::get().to(comments::list_post_comments))
                        .route(web::post().to(comments::create_post_comment)),
                )
                // Comments
                .service(
                    web::resource("/comments")
                        .route(web::get().to(comments::list_comments))
                        .route(web::post().to(comments::create_comment)),
                ),
        );
}
