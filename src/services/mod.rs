// Services layer - Business logic and orchestration
pub mod access;
pub mod admin_service;
pub mod auth_service;
pub mod crypto;
pub mod route_guard;
pub mod session_service;
pub mod token_service;

pub use admin_service::{AdminService, RoleAssignment};
pub use auth_service::{AuthService, TokenPair};
pub use route_guard::RouteGuard;
pub use session_service::SessionService;
pub use token_service::TokenService;
