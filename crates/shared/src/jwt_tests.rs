use super::*;

fn create_test_service() -> JwtService {
    JwtService::new(JwtConfig {
        secret: "test-secret-key-for-testing".to_string(),
        token_expires_secs: 3600,
    })
}

fn subject(id: Uuid) -> TokenSubject<'static> {
    TokenSubject {
        id,
        email: "manager@flow-erp.com",
        name: "Manager User",
        role: "MANAGER",
    }
}

#[test]
fn test_generate_and_validate_round_trip() {
    let service = create_test_service();
    let user_id = Uuid::new_v4();

    let token = service.generate_token(subject(user_id)).unwrap();
    let claims = service.validate_token(&token).unwrap();

    assert_eq!(claims.user_id(), user_id);
    assert_eq!(claims.email, "manager@flow-erp.com");
    assert_eq!(claims.name, "Manager User");
    assert_eq!(claims.role, "MANAGER");
    assert_eq!(claims.exp - claims.iat, 3600);
}

#[test]
fn test_invalid_token() {
    let service = create_test_service();
    let result = service.validate_token("invalid.token.here");
    assert!(matches!(result, Err(JwtError::DecodingError(_))));
}

#[test]
fn test_token_signed_with_other_secret_rejected() {
    let issuer = JwtService::new(JwtConfig {
        secret: "someone-else".to_string(),
        token_expires_secs: 3600,
    });
    let token = issuer.generate_token(subject(Uuid::new_v4())).unwrap();

    assert!(create_test_service().validate_token(&token).is_err());
}

#[test]
fn test_expired_token_rejected() {
    let service = JwtService::new(JwtConfig {
        secret: "test-secret-key-for-testing".to_string(),
        // Well past the default 60s leeway.
        token_expires_secs: -600,
    });
    let token = service.generate_token(subject(Uuid::new_v4())).unwrap();

    assert!(matches!(
        service.validate_token(&token),
        Err(JwtError::Expired)
    ));
}

#[test]
fn test_debug_hides_keys() {
    let rendered = format!("{:?}", create_test_service());
    assert!(!rendered.contains("test-secret-key-for-testing"));
    assert!(rendered.contains("[hidden]"));
}
