// File: crates/ruangbook_admin/src/doc.rs

#![cfg(feature = "openapi")]
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::auth::{AccountResponse, CredentialsRequest, LoginResponse, Session};
use crate::dashboard::{CancelResponse, DashboardList, DashboardStats, RoomStat};
use ruangbook_common::models::UserRole;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::register_handler,
        crate::handlers::login_handler,
        crate::handlers::me_handler,
        crate::handlers::list_handler,
        crate::handlers::stats_handler,
        crate::handlers::cancel_handler,
        crate::handlers::export_csv_handler,
        crate::handlers::export_pdf_handler
    ),
    components(
        schemas(
            CredentialsRequest,
            AccountResponse,
            LoginResponse,
            Session,
            UserRole,
            DashboardList,
            DashboardStats,
            RoomStat,
            CancelResponse
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "Admin", description = "Dashboard accounts and booking management")
    ),
    servers(
        (url = "/api", description = "RuangBook API server")
    )
)]
pub struct AdminApiDoc;
