#[cfg(test)]
mod tests {
    use crate::auth::{
        hash_password, issue_token, login, register, role_for, validate_credentials,
        verify_password, verify_token, AuthError, CredentialsRequest,
    };
    use crate::store::MemoryAdminUserStore;
    use chrono::{Duration, TimeZone, Utc};
    use ruangbook_common::models::{AdminUser, UserRole};
    use ruangbook_common::{HttpStatusCode, RuangbookError};
    use ruangbook_config::AdminConfig;

    fn config() -> AdminConfig {
        AdminConfig {
            jwt_secret: "test-secret".to_string(),
            token_ttl_minutes: 60,
            bootstrap_admins: vec!["Admin@Kantor.co.id".to_string()],
        }
    }

    fn credentials(email: &str, password: &str) -> CredentialsRequest {
        CredentialsRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    fn user(role: UserRole) -> AdminUser {
        AdminUser {
            id: "u-1".to_string(),
            email: "admin@kantor.co.id".to_string(),
            password_hash: String::new(),
            role,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn hashes_are_salted_and_verifiable() {
        let first = hash_password("rahasia123").unwrap();
        let second = hash_password("rahasia123").unwrap();
        assert_ne!(first, second);
        assert!(first.starts_with("pbkdf2-sha256$100000$"));
        assert!(verify_password("rahasia123", &first));
        assert!(verify_password("rahasia123", &second));
        assert!(!verify_password("rahasia124", &first));
    }

    #[test]
    fn malformed_hashes_never_match() {
        for stored in [
            "",
            "plain-text",
            "pbkdf2-sha256$0$AAAA$AAAA",
            "bcrypt$100000$AAAA$AAAA",
            "pbkdf2-sha256$100000$!!$AAAA",
            "pbkdf2-sha256$100000$AAAA$AAAA$extra",
        ] {
            assert!(!verify_password("anything", stored), "{}", stored);
        }
    }

    #[test]
    fn credentials_are_validated() {
        assert_eq!(
            validate_credentials(&credentials("  Staf@Kantor.CO.ID ", "123456")).unwrap(),
            "staf@kantor.co.id"
        );

        for email in ["", "staf", "staf@", "@kantor.co.id", "staf@kantor", "st af@kantor.co.id"] {
            let errors = validate_credentials(&credentials(email, "123456")).unwrap_err();
            assert_eq!(errors[0].message, "Email tidak valid", "{}", email);
        }

        let errors = validate_credentials(&credentials("staf@kantor.co.id", "12345")).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "password");
        assert_eq!(errors[0].message, "Password minimal 6 karakter");
    }

    #[test]
    fn only_listed_emails_become_admins() {
        let config = config();
        assert_eq!(role_for(&config, "admin@kantor.co.id"), UserRole::Admin);
        assert_eq!(role_for(&config, "staf@kantor.co.id"), UserRole::User);
    }

    #[test]
    fn tokens_round_trip_and_expire() {
        let config = config();
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 2, 0, 0).unwrap();
        let (token, expires_at) = issue_token(&config, &user(UserRole::Admin), now).unwrap();
        assert_eq!(expires_at, now + Duration::minutes(60));

        let session = verify_token(&config, &token, now + Duration::minutes(59)).unwrap();
        assert_eq!(session.user_id, "u-1");
        assert_eq!(session.role, UserRole::Admin);
        assert_eq!(session.expires_at, expires_at);

        assert!(matches!(
            verify_token(&config, &token, now + Duration::minutes(60)),
            Err(AuthError::InvalidToken)
        ));

        let other = AdminConfig {
            jwt_secret: "another-secret".to_string(),
            ..config.clone()
        };
        assert!(matches!(
            verify_token(&other, &token, now),
            Err(AuthError::InvalidToken)
        ));
        assert!(matches!(
            verify_token(&config, "not.a.token", now),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn missing_secret_is_a_config_error() {
        let config = AdminConfig::default();
        let err = issue_token(&config, &user(UserRole::User), Utc::now()).unwrap_err();
        assert!(matches!(err, AuthError::Config(_)));
        let api: RuangbookError = err.into();
        assert_eq!(api.status_code(), 500);
    }

    #[tokio::test]
    async fn register_then_login() {
        let store = MemoryAdminUserStore::new();
        let config = config();

        let admin = register(&store, &config, &credentials("admin@kantor.co.id", "rahasia123"))
            .await
            .unwrap();
        assert_eq!(admin.role, UserRole::Admin);
        assert_ne!(admin.password_hash, "rahasia123");

        let staff = register(&store, &config, &credentials("staf@kantor.co.id", "rahasia123"))
            .await
            .unwrap();
        assert_eq!(staff.role, UserRole::User);

        let duplicate = register(&store, &config, &credentials("ADMIN@kantor.co.id", "lainnya1"))
            .await
            .unwrap_err();
        assert!(matches!(duplicate, AuthError::EmailTaken));
        let api: RuangbookError = duplicate.into();
        assert_eq!(api.status_code(), 409);

        let now = Utc::now();
        let response = login(&store, &config, now, &credentials(" Admin@Kantor.co.id", "rahasia123"))
            .await
            .unwrap();
        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.user.email, "admin@kantor.co.id");
        let session = verify_token(&config, &response.token, now).unwrap();
        assert!(session.is_admin());

        for (email, password) in [
            ("admin@kantor.co.id", "salah123"),
            ("nobody@kantor.co.id", "rahasia123"),
        ] {
            let err = login(&store, &config, now, &credentials(email, password))
                .await
                .unwrap_err();
            assert!(matches!(err, AuthError::InvalidCredentials));
            let api: RuangbookError = err.into();
            assert_eq!(api.status_code(), 401);
        }
    }
}
