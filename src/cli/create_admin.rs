// First-admin bootstrap. assign-role needs an existing admin, so the first
// one is created here.

use crate::app_data::AppData;
use crate::config::{BootstrapSettings, init_database, migrate_database};
use crate::errors::InternalError;
use crate::stores::CredentialStore;
use crate::types::db::user;
use crate::types::internal::{AppRole, RequestContext};

pub async fn run(
    settings: BootstrapSettings,
    email: &str,
    password: &str,
    full_name: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = init_database(&settings).await?;
    migrate_database(&db).await?;

    let app_data = AppData::init(db, settings).await?;
    let admin = create_admin(&app_data.credential_store, email, password, full_name).await?;

    println!("✅ Admin account created");
    println!("   Email: {}", admin.email);
    println!("   ID:    {}", admin.id);

    Ok(())
}

/// Register a confirmed account holding the admin role
pub async fn create_admin(
    credential_store: &CredentialStore,
    email: &str,
    password: &str,
    full_name: Option<String>,
) -> Result<user::Model, InternalError> {
    let ctx = RequestContext::for_cli("create_admin");

    let admin = credential_store
        .add_user_with_role(email, password, full_name, AppRole::Admin, true)
        .await?;

    tracing::info!(request_id = %ctx.request_id, user_id = %admin.id, "Admin account created from CLI");

    Ok(admin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::internal::CredentialError;
    use crate::test::utils::{TEST_PASSWORD, setup_test_app_data};

    #[tokio::test]
    async fn test_create_admin_assigns_role_and_confirms_email() {
        let app_data = setup_test_app_data(&[]).await;

        let admin = create_admin(
            &app_data.credential_store,
            "Boss@Example.com",
            TEST_PASSWORD,
            Some("The Boss".to_string()),
        )
        .await
        .unwrap();

        assert_eq!(admin.email, "boss@example.com");
        assert!(admin.email_confirmed_at.is_some());
        assert_eq!(app_data.role_store.get_role(&admin.id).await.unwrap(), Some(AppRole::Admin));
    }

    #[tokio::test]
    async fn test_create_admin_rejects_existing_email() {
        let app_data = setup_test_app_data(&[]).await;
        create_admin(&app_data.credential_store, "boss@example.com", TEST_PASSWORD, None)
            .await
            .unwrap();

        let result = create_admin(&app_data.credential_store, "boss@example.com", TEST_PASSWORD, None).await;

        assert!(matches!(
            result,
            Err(InternalError::Credential(CredentialError::DuplicateEmail(_)))
        ));
    }
}
