use axum::http::{header::COOKIE, HeaderMap};
use chrono::Duration;

pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

/// Reads a cookie value from every `Cookie` header of the request.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, value)| *key == name && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// Builds `Set-Cookie` values for the auth cookies.
///
/// Cookies are HttpOnly, scoped to `/` and `SameSite=Lax`; `Secure` is added when
/// enabled in the configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct CookieSettings {
    pub secure: bool,
}

impl CookieSettings {
    pub fn new(secure: bool) -> Self {
        Self { secure }
    }

    pub fn set(&self, name: &str, value: &str, max_age: Duration) -> String {
        self.build(name, value, max_age.num_seconds().max(0))
    }

    pub fn clear(&self, name: &str) -> String {
        self.build(name, "", 0)
    }

    fn build(&self, name: &str, value: &str, max_age: i64) -> String {
        let mut cookie = format!(
            "{}={}; HttpOnly; Path=/; SameSite=Lax; Max-Age={}",
            name, value, max_age
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn reads_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("theme=dark"));
        headers.append(
            COOKIE,
            HeaderValue::from_static("lang=en; access_token=abc.def; refresh_token="),
        );

        assert_eq!(
            read_cookie(&headers, ACCESS_TOKEN_COOKIE).as_deref(),
            Some("abc.def")
        );
        assert_eq!(read_cookie(&headers, REFRESH_TOKEN_COOKIE), None);
        assert_eq!(read_cookie(&headers, "missing"), None);
    }

    #[test]
    fn builds_secure_cookie() {
        let cookie = CookieSettings::new(true).set("access_token", "t", Duration::minutes(15));
        assert_eq!(
            cookie,
            "access_token=t; HttpOnly; Path=/; SameSite=Lax; Max-Age=900; Secure"
        );
        assert!(CookieSettings::new(false)
            .clear("refresh_token")
            .ends_with("Max-Age=0"));
    }
}
