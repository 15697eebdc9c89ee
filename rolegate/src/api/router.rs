use axum::middleware;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use rolegate_core::api::{
    CreatePostRequest, DeleteUserResponse, ErrorBody, LoginRequest, LoginResponse,
    MessageResponse, PostAuthor, PostView, RegisterRequest, RoleChangeResponse, UserProfile,
};
use rolegate_core::authorization::Role;
use tower_http::services::{ServeDir, ServeFile};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::auth::{
    __path_login_handler, __path_logout_handler, __path_me_handler, __path_register_handler,
    login_handler, logout_handler, me_handler, register_handler,
};
use crate::api::handlers::health::{__path_health_checker_handler, health_checker_handler};
use crate::api::handlers::posts::{
    __path_create_post_handler, __path_delete_post_handler, __path_list_posts_handler,
    create_post_handler, delete_post_handler, list_posts_handler,
};
use crate::api::handlers::users::{
    __path_delete_user_handler, __path_demote_user_handler, __path_list_users_handler,
    __path_promote_user_handler, delete_user_handler, demote_user_handler, list_users_handler,
    promote_user_handler,
};
use crate::app_state::SharedAppState;

use super::middleware::authorization::require_roles;
use super::session_auth::auth;

const STAFF: &[Role] = &[Role::Admin, Role::Moderator];
const ADMIN_ONLY: &[Role] = &[Role::Admin];

#[derive(OpenApi)]
#[openapi(
    paths(
        health_checker_handler,
        register_handler,
        login_handler,
        logout_handler,
        me_handler,
        list_users_handler,
        delete_user_handler,
        promote_user_handler,
        demote_user_handler,
        create_post_handler,
        list_posts_handler,
        delete_post_handler,
    ),
    components(
        schemas(
            Role, UserProfile, PostAuthor, PostView, RegisterRequest, LoginRequest,
            CreatePostRequest, MessageResponse, LoginResponse, RoleChangeResponse,
            DeleteUserResponse, ErrorBody
        )
    ),
    tags(
        (name = "rolegate", description = "rolegate api")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let Some(components) = openapi.components.as_mut() else {
            return;
        };
        components.add_security_scheme(
            "bearerAuth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

impl ApiDoc {
    /// The generated document with the session cookie scheme named after the
    /// configured cookie.
    pub fn with_cookie_name(cookie_name: &str) -> utoipa::openapi::OpenApi {
        let mut api = ApiDoc::openapi();
        if let Some(components) = api.components.as_mut() {
            components.add_security_scheme(
                "cookieAuth",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(cookie_name))),
            );
        }
        api
    }
}

pub struct ApiRoutes;

impl ApiRoutes {
    pub fn create(state: SharedAppState) -> Router {
        let api = ApiDoc::with_cookie_name(&state.settings.api.cookie_name);
        let authenticated_router = Router::new()
            .route("/api/auth/me", get(me_handler))
            .route(
                "/api/users",
                get(list_users_handler).layer(middleware::from_fn(require_roles(STAFF))),
            )
            .route(
                "/api/users/{id}",
                delete(delete_user_handler).layer(middleware::from_fn(require_roles(STAFF))),
            )
            .route(
                "/api/users/{id}/promote",
                post(promote_user_handler).layer(middleware::from_fn(require_roles(ADMIN_ONLY))),
            )
            .route(
                "/api/users/{id}/demote",
                post(demote_user_handler).layer(middleware::from_fn(require_roles(ADMIN_ONLY))),
            )
            .route(
                "/api/posts",
                post(create_post_handler).get(list_posts_handler),
            )
            .route("/api/posts/{id}", delete(delete_post_handler))
            .route_layer(middleware::from_fn_with_state(state.clone(), auth));

        let public_router = Router::new()
            .route("/api/auth/register", post(register_handler))
            .route("/api/auth/login", post(login_handler))
            .route("/api/auth/logout", post(logout_handler))
            .route("/api/health", get(health_checker_handler))
            .route(
                "/api-docs/openapi.json",
                get(move || {
                    let api = api.clone();
                    async move { Json(api) }
                }),
            );

        let router = Router::new()
            .merge(authenticated_router)
            .merge(public_router)
            .with_state(state.clone());

        match state.settings.frontend_directory.as_deref() {
            Some(directory) => {
                tracing::info!("Serving static files from {}", directory);
                let index = format!("{}/index.html", directory.trim_end_matches('/'));
                router.fallback_service(ServeDir::new(directory).fallback(ServeFile::new(index)))
            }
            None => router,
        }
    }
}
