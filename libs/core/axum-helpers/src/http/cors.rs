use axum::http::{HeaderValue, Method, header};
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::info;

/// Comma-separated list of allowed origins. Unset means no CORS layer.
pub const CORS_ORIGIN_VAR: &str = "CORS_ALLOWED_ORIGIN";

/// Parse a comma-separated origin list, skipping blanks.
pub fn parse_origins(raw: &str) -> io::Result<Vec<HeaderValue>> {
    let origins = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(HeaderValue::from_str)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid {} value: {}", CORS_ORIGIN_VAR, e),
            )
        })?;

    if origins.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} cannot be empty", CORS_ORIGIN_VAR),
        ));
    }

    Ok(origins)
}

/// Build a CORS layer from `CORS_ALLOWED_ORIGIN`, if it is set.
///
/// Allows the verbs the API serves plus `Content-Type`/`Accept` headers.
pub fn cors_layer_from_env() -> io::Result<Option<CorsLayer>> {
    let Ok(raw) = std::env::var(CORS_ORIGIN_VAR) else {
        return Ok(None);
    };
    let origins = parse_origins(&raw)?;
    info!("CORS configured with allowed origins: {}", raw);

    Ok(Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
            .max_age(Duration::from_secs(3600)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins_trims_and_skips_blanks() {
        let origins = parse_origins(" http://localhost:3000 ,, https://example.com").unwrap();
        assert_eq!(origins.len(), 2);
        assert_eq!(origins[0], "http://localhost:3000");
        assert_eq!(origins[1], "https://example.com");
    }

    #[test]
    fn test_parse_origins_rejects_empty() {
        assert!(parse_origins(" , ").is_err());
    }

    #[test]
    fn test_cors_layer_absent_without_env() {
        temp_env::with_var_unset(CORS_ORIGIN_VAR, || {
            assert!(cors_layer_from_env().unwrap().is_none());
        });
    }

    #[test]
    fn test_cors_layer_present_with_env() {
        temp_env::with_var(CORS_ORIGIN_VAR, Some("http://localhost:5173"), || {
            assert!(cors_layer_from_env().unwrap().is_some());
        });
    }
}
