//! JWT を使った IdentityResolver 実装
//!
//! 認証サービスが発行する `{ id, email, name? }` を含む HS256 トークンを検証する。
//! トークンの発行は認証サービス側の責務で、本サーバーは検証のみ行う。

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;

use crate::domain::{Identity, IdentityResolver};

/// トークンのペイロード
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Claims {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    pub exp: u64,
}

/// HS256 JWT の検証
pub struct JwtIdentityResolver {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtIdentityResolver {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
        }
    }
}

impl IdentityResolver for JwtIdentityResolver {
    fn resolve(&self, token: Option<&str>) -> Option<Identity> {
        let token = token.filter(|t| !t.is_empty())?;

        let claims = match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => data.claims,
            Err(e) => {
                tracing::debug!("Token rejected, treating connection as anonymous: {}", e);
                return None;
            }
        };

        match Identity::new(claims.id, claims.email, claims.name) {
            Ok(identity) => Some(identity),
            Err(e) => {
                tracing::debug!("Token claims rejected: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode, get_current_timestamp};
    use serde_json::{Value, json};

    const DAY_SECS: u64 = 24 * 60 * 60;

    fn alice() -> Identity {
        Identity::new("u-alice", "alice@x.com", Some("Alice".to_string())).unwrap()
    }

    /// 認証サービスと同じ形式でトークンに署名する
    fn sign(secret: &[u8], claims: &Value) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret),
        )
        .unwrap()
    }

    fn claims_for(identity: &Identity, exp: u64) -> Value {
        json!({
            "id": identity.user_id(),
            "email": identity.email(),
            "name": identity.name(),
            "exp": exp,
        })
    }

    #[test]
    fn test_signed_token_resolves_to_identity() {
        // テスト項目: 正しい鍵で署名されたトークンから Identity が解決できる
        // given (前提条件):
        let resolver = JwtIdentityResolver::new(b"secret");
        let exp = get_current_timestamp() + 7 * DAY_SECS;
        let token = sign(b"secret", &claims_for(&alice(), exp));

        // when (操作):
        let result = resolver.resolve(Some(&token));

        // then (期待する結果):
        assert_eq!(result, Some(alice()));
    }

    #[test]
    fn test_token_without_name_resolves() {
        // テスト項目: name を含まない `{ id, email }` だけのトークンも受け付ける
        // given (前提条件):
        let resolver = JwtIdentityResolver::new(b"secret");
        let exp = get_current_timestamp() + DAY_SECS;
        let token = sign(
            b"secret",
            &json!({"id": "u-bob", "email": "bob@x.com", "exp": exp}),
        );

        // when (操作):
        let result = resolver.resolve(Some(&token));

        // then (期待する結果):
        assert_eq!(result.as_ref().map(Identity::email), Some("bob@x.com"));
        assert_eq!(result.and_then(|i| i.name().map(str::to_string)), None);
    }

    #[test]
    fn test_missing_or_empty_token_is_anonymous() {
        // テスト項目: トークンがない・空の場合は匿名になる
        // given (前提条件):
        let resolver = JwtIdentityResolver::new(b"secret");

        // when (操作):
        let missing = resolver.resolve(None);
        let empty = resolver.resolve(Some(""));

        // then (期待する結果):
        assert_eq!(missing, None);
        assert_eq!(empty, None);
    }

    #[test]
    fn test_malformed_token_is_anonymous() {
        // テスト項目: 形式が不正なトークンは匿名になる
        // given (前提条件):
        let resolver = JwtIdentityResolver::new(b"secret");

        // when (操作):
        let result = resolver.resolve(Some("not.a.jwt"));

        // then (期待する結果):
        assert_eq!(result, None);
    }

    #[test]
    fn test_bad_signature_is_anonymous() {
        // テスト項目: 別の鍵で署名されたトークンは匿名になる
        // given (前提条件):
        let resolver = JwtIdentityResolver::new(b"secret");
        let exp = get_current_timestamp() + DAY_SECS;
        let token = sign(b"other-secret", &claims_for(&alice(), exp));

        // when (操作):
        let result = resolver.resolve(Some(&token));

        // then (期待する結果):
        assert_eq!(result, None);
    }

    #[test]
    fn test_expired_token_is_anonymous() {
        // テスト項目: 期限切れのトークンは匿名になる
        // given (前提条件):
        let resolver = JwtIdentityResolver::new(b"secret");
        let yesterday = get_current_timestamp() - DAY_SECS;
        let token = sign(b"secret", &claims_for(&alice(), yesterday));

        // when (操作):
        let result = resolver.resolve(Some(&token));

        // then (期待する結果):
        assert_eq!(result, None);
    }

    #[test]
    fn test_token_with_invalid_claims_is_anonymous() {
        // テスト項目: 署名は正しくても email が不正なら匿名になる
        // given (前提条件):
        let resolver = JwtIdentityResolver::new(b"secret");
        let exp = get_current_timestamp() + 60;
        let token = sign(
            b"secret",
            &json!({"id": "u-1", "email": "no-at-sign", "exp": exp}),
        );

        // when (操作):
        let result = resolver.resolve(Some(&token));

        // then (期待する結果):
        assert_eq!(result, None);
    }
}
