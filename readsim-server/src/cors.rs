//! Cross-origin headers and `OPTIONS` handling.

use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    ACCESS_CONTROL_MAX_AGE, ACCESS_CONTROL_REQUEST_HEADERS, ACCESS_CONTROL_REQUEST_METHOD, ALLOW,
    HeaderName, ORIGIN,
};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type";
pub const MAX_AGE: &str = "86400";

/// Headers attached to every API response.
pub fn cors_headers() -> [(HeaderName, &'static str); 3] {
    [
        (ACCESS_CONTROL_ALLOW_ORIGIN, ALLOW_ORIGIN),
        (ACCESS_CONTROL_ALLOW_METHODS, ALLOW_METHODS),
        (ACCESS_CONTROL_ALLOW_HEADERS, ALLOW_HEADERS),
    ]
}

/// A real CORS preflight carries all three of these headers.
pub fn is_preflight(headers: &HeaderMap) -> bool {
    headers.contains_key(ORIGIN)
        && headers.contains_key(ACCESS_CONTROL_REQUEST_METHOD)
        && headers.contains_key(ACCESS_CONTROL_REQUEST_HEADERS)
}

///
/// Answer an `OPTIONS` request: full CORS headers for a preflight, otherwise
/// just the allowed methods.
///
pub async fn preflight(headers: HeaderMap) -> Response {
    if is_preflight(&headers) {
        (StatusCode::OK, cors_headers(), [(ACCESS_CONTROL_MAX_AGE, MAX_AGE)]).into_response()
    } else {
        (StatusCode::OK, [(ALLOW, ALLOW_METHODS)]).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::http::HeaderValue;
    use rstest::*;

    fn headers(names: &[HeaderName]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for name in names {
            map.insert(name.clone(), HeaderValue::from_static("x"));
        }
        map
    }

    #[rstest]
    #[case(vec![ORIGIN, ACCESS_CONTROL_REQUEST_METHOD, ACCESS_CONTROL_REQUEST_HEADERS], true)]
    #[case(vec![ORIGIN, ACCESS_CONTROL_REQUEST_METHOD], false)]
    #[case(vec![ACCESS_CONTROL_REQUEST_METHOD, ACCESS_CONTROL_REQUEST_HEADERS], false)]
    #[case(vec![], false)]
    fn test_is_preflight(#[case] names: Vec<HeaderName>, #[case] expected: bool) {
        assert_eq!(is_preflight(&headers(&names)), expected);
    }
}
