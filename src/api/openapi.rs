//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, costumes, customers, health, rentals, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Fantasia API",
        version = "0.1.0",
        description = "Costume Rental Management REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login_for_access_token,
        auth::refresh_access_token,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
        // Costumes
        costumes::list_costumes,
        costumes::get_costume,
        costumes::create_costume,
        costumes::update_costume,
        costumes::delete_costume,
        // Customers
        customers::list_customers,
        customers::get_customer,
        customers::create_customer,
        customers::update_customer,
        customers::delete_customer,
        // Rental
        rentals::list_rentals,
        rentals::get_rental,
        rentals::create_rental,
        rentals::patch_rental,
        rentals::delete_rental,
    ),
    components(
        schemas(
            // Auth
            auth::AccessTokenForm,
            auth::Token,
            // Users
            crate::models::user::User,
            crate::models::user::UserShort,
            crate::models::user::UserInput,
            users::UserList,
            // Costumes
            crate::models::costume::Costume,
            crate::models::costume::Availability,
            crate::models::costume::CostumeInput,
            costumes::CostumeList,
            // Customers
            crate::models::customer::Customer,
            crate::models::customer::CustomerInput,
            customers::CustomerList,
            // Rental
            crate::models::rental::RentalDetails,
            crate::models::rental::CreateRental,
            crate::models::rental::RentalPatch,
            rentals::RentalList,
            // Health
            health::HealthResponse,
            // Shared
            crate::api::Message,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "users", description = "User management"),
        (name = "costumes", description = "Costume catalog management"),
        (name = "customers", description = "Customer registry"),
        (name = "rental", description = "Rental workflow")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
