use crate::errors::InternalError;
use crate::errors::internal::AuthorizationError;
use crate::types::internal::{AppRole, SessionState, SessionUser};

/// The signed-in user, or `NoSession`
pub fn require_user(session: &SessionState) -> Result<&SessionUser, InternalError> {
    session.user.as_ref().ok_or_else(|| AuthorizationError::NoSession.into())
}

pub fn require_admin(session: &SessionState) -> Result<&SessionUser, InternalError> {
    let user = require_user(session)?;
    if !session.is_admin() {
        return Err(AuthorizationError::AdminRequired.into());
    }
    Ok(user)
}

/// Admin or staff
pub fn require_back_office(session: &SessionState) -> Result<&SessionUser, InternalError> {
    let user = require_user(session)?;
    if !is_back_office(session) {
        return Err(AuthorizationError::RoleRequired {
            required: vec![AppRole::Admin, AppRole::Staff],
            actual: session.role,
        }
        .into());
    }
    Ok(user)
}

pub fn is_back_office(session: &SessionState) -> bool {
    session.role.is_some_and(|role| role.is_back_office())
}

/// Owner of the row, or back office. Other users get `NotOwner`.
pub fn require_owner_or_back_office(
    session: &SessionState,
    owner_id: &str,
    resource: &str,
    id: &str,
) -> Result<(), InternalError> {
    let user = require_user(session)?;
    if user.id == owner_id || is_back_office(session) {
        return Ok(());
    }
    Err(AuthorizationError::NotOwner {
        user_id: user.id.clone(),
        resource: resource.to_string(),
        id: id.to_string(),
    }
    .into())
}
