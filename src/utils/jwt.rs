use crate::config::AppConfig;
use crate::models::auth::entities::SessionUser;
use actix_web::HttpRequest;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::http::header;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

// 会话 JWT Claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,       // Subject (user ID)
    pub user: SessionUser, // 会话用户快照
    pub exp: usize,        // Expiration time (时间戳)
    pub iat: usize,        // Issued at (签发时间)
}

pub struct JwtUtils;

impl JwtUtils {
    // 获取 JWT 密钥
    fn get_secret() -> String {
        AppConfig::get().session.secret.clone()
    }

    /// 会话有效期
    pub fn session_expiry() -> chrono::Duration {
        chrono::Duration::hours(AppConfig::get().session.expiry_hours)
    }

    // 生成会话 Token
    pub fn generate_session_token(
        user: &SessionUser,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        Self::encode_session(user, &Self::get_secret(), Self::session_expiry())
    }

    // 验证会话 Token
    pub fn verify_session_token(token: &str) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
        Self::decode_session(token, &Self::get_secret())
    }

    pub fn encode_session(
        user: &SessionUser,
        secret: &str,
        expiry_duration: chrono::Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let expiration = now + expiry_duration;

        let claims = SessionClaims {
            sub: user.id.to_string(),
            user: user.clone(),
            exp: expiration.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_ref()),
        )
    }

    pub fn decode_session(
        token: &str,
        secret: &str,
    ) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
        let decoding_key = DecodingKey::from_secret(secret.as_ref());
        decode::<SessionClaims>(token, &decoding_key, &Validation::default())
            .map(|token_data| token_data.claims)
    }

    /// 创建会话 Cookie
    pub fn create_session_cookie(token: &str) -> Cookie<'static> {
        let config = AppConfig::get();
        Cookie::build(config.session.cookie_name.clone(), token.to_string())
            .path("/")
            .max_age(actix_web::cookie::time::Duration::hours(
                config.session.expiry_hours,
            ))
            .same_site(SameSite::Lax)
            .http_only(true)
            .secure(config.is_production()) // 生产环境下使用 HTTPS
            .finish()
    }

    /// 创建空的会话 Cookie（用于注销）
    pub fn create_empty_session_cookie() -> Cookie<'static> {
        let config = AppConfig::get();
        Cookie::build(config.session.cookie_name.clone(), "")
            .path("/")
            .max_age(actix_web::cookie::time::Duration::seconds(0))
            .same_site(SameSite::Lax)
            .http_only(true)
            .secure(config.is_production())
            .finish()
    }

    /// 从 Authorization: Bearer 或会话 Cookie 中提取 Token
    pub fn extract_token(req: &HttpRequest) -> Option<String> {
        let bearer = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty());

        bearer.or_else(|| {
            req.cookie(&AppConfig::get().session.cookie_name)
                .map(|cookie| cookie.value().to_string())
                .filter(|token| !token.is_empty())
        })
    }

    /// 解析请求中的会话用户，无效或缺失时返回 None
    pub fn session_user(req: &HttpRequest) -> Option<SessionUser> {
        let token = Self::extract_token(req)?;
        Self::verify_session_token(&token)
            .map(|claims| claims.user)
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;

    fn sample_user() -> SessionUser {
        SessionUser {
            id: 42,
            username: "jdoe".to_string(),
            email: "jdoe@school.test".to_string(),
            role: UserRole::Teacher,
            is_active: true,
            permissions: vec![],
        }
    }

    #[test]
    fn test_session_token_round_trip() {
        let token =
            JwtUtils::encode_session(&sample_user(), "secret", chrono::Duration::hours(8)).unwrap();
        let claims = JwtUtils::decode_session(&token, "secret").unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.user, sample_user());
        assert_eq!(claims.exp - claims.iat, 8 * 3600);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token =
            JwtUtils::encode_session(&sample_user(), "secret", chrono::Duration::hours(8)).unwrap();
        assert!(JwtUtils::decode_session(&token, "other").is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let token =
            JwtUtils::encode_session(&sample_user(), "secret", chrono::Duration::hours(-2))
                .unwrap();
        assert!(JwtUtils::decode_session(&token, "secret").is_err());
    }

    #[test]
    fn test_extract_bearer_token() {
        let req = actix_web::test::TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer abc.def.ghi"))
            .to_http_request();
        assert_eq!(JwtUtils::extract_token(&req).as_deref(), Some("abc.def.ghi"));
    }
}
