use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use crate::core::config::JwtConfig;
use crate::features::auth::services::TokenPair;
use crate::shared::constants::{ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE};

/// Add both auth cookies to the jar
pub fn set_auth_cookies(jar: CookieJar, pair: &TokenPair, config: &JwtConfig) -> CookieJar {
    jar.add(build_cookie(
        ACCESS_TOKEN_COOKIE,
        pair.access_token.clone(),
        config.access_expiration_secs,
        config.secure_cookies,
    ))
    .add(build_cookie(
        REFRESH_TOKEN_COOKIE,
        pair.refresh_token.clone(),
        config.refresh_expiration_secs,
        config.secure_cookies,
    ))
}

/// Remove both auth cookies from the jar
pub fn clear_auth_cookies(jar: CookieJar) -> CookieJar {
    jar.remove(removal_cookie(ACCESS_TOKEN_COOKIE))
        .remove(removal_cookie(REFRESH_TOKEN_COOKIE))
}

fn build_cookie(
    name: &'static str,
    value: String,
    max_age_secs: u64,
    secure: bool,
) -> Cookie<'static> {
    Cookie::build((name, value))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .path("/")
        .max_age(Duration::seconds(max_age_secs as i64))
        .build()
}

// Removal must match the path the cookie was set with
fn removal_cookie(name: &'static str) -> Cookie<'static> {
    Cookie::build((name, "")).path("/").build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig {
            access_secret: "a".to_string(),
            access_expiration_secs: 900,
            refresh_secret: "r".to_string(),
            refresh_expiration_secs: 3600,
            issuer: "test".to_string(),
            secure_cookies: true,
        }
    }

    #[test]
    fn sets_both_cookies_with_hardened_attributes() {
        let pair = TokenPair {
            access_token: "acc".to_string(),
            refresh_token: "ref".to_string(),
        };

        let jar = set_auth_cookies(CookieJar::new(), &pair, &config());

        let access = jar.get(ACCESS_TOKEN_COOKIE).expect("access cookie set");
        assert_eq!(access.value(), "acc");
        assert_eq!(access.http_only(), Some(true));
        assert_eq!(access.secure(), Some(true));
        assert_eq!(access.same_site(), Some(SameSite::Strict));
        assert_eq!(access.path(), Some("/"));
        assert_eq!(access.max_age(), Some(Duration::seconds(900)));

        let refresh = jar.get(REFRESH_TOKEN_COOKIE).expect("refresh cookie set");
        assert_eq!(refresh.value(), "ref");
        assert_eq!(refresh.max_age(), Some(Duration::seconds(3600)));
    }

    #[test]
    fn clear_removes_both_cookies() {
        let pair = TokenPair {
            access_token: "acc".to_string(),
            refresh_token: "ref".to_string(),
        };

        let jar = set_auth_cookies(CookieJar::new(), &pair, &config());
        let jar = clear_auth_cookies(jar);

        assert!(jar.get(ACCESS_TOKEN_COOKIE).is_none());
        assert!(jar.get(REFRESH_TOKEN_COOKIE).is_none());
    }
}
