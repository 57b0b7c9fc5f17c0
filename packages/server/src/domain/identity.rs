//! Identity Resolver trait 定義

use super::value_object::Identity;

/// 接続時の認証トークンから Identity を解決する
///
/// 検証に失敗した場合（トークンなし・形式不正・期限切れ・署名不一致）は
/// エラーにせず `None`（匿名）を返す。副作用を持たず、同期的に呼び出せる。
pub trait IdentityResolver: Send + Sync {
    fn resolve(&self, token: Option<&str>) -> Option<Identity>;
}
