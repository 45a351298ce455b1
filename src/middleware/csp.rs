use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, Request, Response},
    middleware::Next,
};

/// JSON-only API: nothing may be framed, scripted or embedded from responses.
const CSP: &str = "default-src 'none'; frame-ancestors 'none'; base-uri 'none'; form-action 'none'";

/// Adds security headers to every response unless a handler already set them.
pub async fn csp_middleware(req: Request<Body>, next: Next) -> Response<Body> {
    let mut res = next.run(req).await;

    let headers = [
        ("content-security-policy", CSP),
        ("referrer-policy", "no-referrer"),
        ("x-content-type-options", "nosniff"),
    ];
    for (name, value) in headers {
        if res.headers().get(name).is_none() {
            res.headers_mut().insert(
                HeaderName::from_static(name),
                HeaderValue::from_static(value),
            );
        }
    }

    res
}
