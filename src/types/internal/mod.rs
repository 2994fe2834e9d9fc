// Internal types shared across services and stores
pub mod auth;
pub mod context;
pub mod role;
pub mod session;
pub mod status;

pub use auth::Claims;
pub use context::RequestContext;
pub use role::AppRole;
pub use session::{GuardDecision, RoleResolution, SessionState, SessionUser};
pub use status::{BookingStatus, ReservationStatus, RoomStatus};
