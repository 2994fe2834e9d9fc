#[cfg(test)]
mod tests {
    use crate::api::helpers::*;
    use crate::errors::internal::{InternalError, TokenError};
    use crate::services::{SessionService, TokenService};
    use crate::test::utils::{TEST_JWT_SECRET, TEST_REFRESH_SECRET, create_test_user, setup_test_app_data};
    use crate::types::internal::AppRole;
    use poem::Request;

    fn token_service() -> TokenService {
        TokenService::new(TEST_JWT_SECRET.to_string(), TEST_REFRESH_SECRET.to_string())
    }

    #[test]
    fn test_extract_ip_from_x_forwarded_for() {
        let req = Request::builder()
            .header("X-Forwarded-For", "192.168.1.1, 10.0.0.1")
            .finish();

        let ip = extract_ip_address(&req);
        assert_eq!(ip, Some("192.168.1.1".parse().unwrap()));
    }

    #[test]
    fn test_extract_ip_from_x_real_ip() {
        let req = Request::builder().header("X-Real-IP", "192.168.1.2").finish();

        let ip = extract_ip_address(&req);
        assert_eq!(ip, Some("192.168.1.2".parse().unwrap()));
    }

    #[test]
    fn test_extract_ip_fallback_to_remote_addr() {
        // In test environment, remote_addr is not a socket address
        let req = Request::builder().finish();

        assert_eq!(extract_ip_address(&req), None);
    }

    #[test]
    fn test_require_auth_without_header() {
        let req = Request::builder().finish();

        assert!(matches!(
            require_auth(&req, &token_service()),
            Err(InternalError::Token(TokenError::MissingAuthHeader))
        ));
    }

    #[test]
    fn test_require_auth_with_non_bearer_header() {
        for value in ["Token abc", "Basic Zm9vOmJhcg==", "garbage"] {
            let req = Request::builder().header("Authorization", value).finish();

            assert!(
                matches!(
                    require_auth(&req, &token_service()),
                    Err(InternalError::Token(TokenError::Invalid(_)))
                ),
                "{} should be an invalid token",
                value
            );
        }
    }

    #[test]
    fn test_require_auth_with_valid_jwt() {
        let tokens = token_service();
        let jwt = tokens.generate_jwt("user-1").unwrap();
        let req = Request::builder()
            .header("Authorization", format!("Bearer {}", jwt))
            .finish();

        let ctx = require_auth(&req, &tokens).unwrap();

        assert!(ctx.is_authenticated());
        assert_eq!(ctx.user_id(), Some("user-1"));
    }

    #[test]
    fn test_optional_auth_treats_bad_token_as_anonymous() {
        let req = Request::builder()
            .header("Authorization", "Bearer not-a-jwt")
            .finish();

        let ctx = optional_auth(&req, &token_service());

        assert!(!ctx.is_authenticated());
    }

    #[tokio::test]
    async fn test_require_session_loads_role() {
        let app_data = setup_test_app_data(&[]).await;
        let staff = create_test_user(&app_data.db, "staff@example.com", AppRole::Staff).await;
        let jwt = app_data.token_service.generate_jwt(&staff.id).unwrap();
        let sessions = SessionService::new(app_data.clone());
        let req = Request::builder()
            .header("Authorization", format!("Bearer {}", jwt))
            .finish();

        let (_ctx, session) = require_session(&req, &app_data.token_service, &sessions).await.unwrap();

        assert!(session.is_staff());
    }
}
