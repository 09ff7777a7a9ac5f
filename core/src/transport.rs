//! Transport settings derived from a request configuration.
//!
//! # Design
//! `Transport` covers the two concerns below the HTTP exchange itself:
//! which proxy the connection goes through and whether certificate
//! verification is skipped. Derivation is pure and fallible only on a
//! malformed proxy URL, so a bad proxy configuration surfaces before any
//! network activity. Proxy credentials become a `Proxy-Authorization`
//! header value that the dispatcher attaches to the outbound request.

use url::Url;

use crate::client::Request;
use crate::encode::basic_auth_value;
use crate::error::Error;

/// Per-dispatch transport settings: proxy and TLS trust.
#[derive(Debug, Clone)]
pub struct Transport {
    pub proxy: Option<ureq::Proxy>,
    /// Skip certificate verification for this dispatch only.
    pub insecure: bool,
    /// `Basic ...` header value for the proxy hop, when the proxy carries
    /// credentials.
    pub proxy_authorization: Option<String>,
}

impl Transport {
    /// Derive transport settings from `request`.
    ///
    /// Certificate verification is only ever disabled for `https` targets
    /// with the insecure flag set; plain-http targets keep the default.
    pub fn for_request(request: &Request) -> Result<Transport, Error> {
        let mut proxy = None;
        let mut proxy_authorization = None;

        if !request.proxy.url.is_empty() {
            Url::parse(&request.proxy.url)
                .map_err(|e| Error::UrlParse(format!("proxy {}: {e}", request.proxy.url)))?;
            let parsed = ureq::Proxy::new(&request.proxy.url)
                .map_err(|e| Error::UrlParse(format!("proxy {}: {e}", request.proxy.url)))?;
            proxy = Some(parsed);

            if !request.proxy.username.is_empty() && !request.proxy.password.is_empty() {
                proxy_authorization = Some(basic_auth_value(
                    &request.proxy.username,
                    &request.proxy.password,
                ));
            }
        }

        let insecure = request.insecure && request.url.starts_with("https://");

        Ok(Transport {
            proxy,
            insecure,
            proxy_authorization,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(url: &str) -> Request {
        Request::new(url)
    }

    #[test]
    fn no_proxy_by_default() {
        let t = Transport::for_request(&request("http://example.com")).unwrap();
        assert!(t.proxy.is_none());
        assert!(t.proxy_authorization.is_none());
        assert!(!t.insecure);
    }

    #[test]
    fn proxy_url_is_validated() {
        let mut r = request("http://example.com");
        r.proxy.url = "::not a url::".to_string();
        let err = Transport::for_request(&r).unwrap_err();
        assert!(matches!(err, Error::UrlParse(_)));
    }

    #[test]
    fn proxy_with_credentials_gets_auth_header_value() {
        let mut r = request("http://example.com");
        r.proxy.url = "http://proxy.example:8080".to_string();
        r.proxy.username = "username".to_string();
        r.proxy.password = "password".to_string();
        let t = Transport::for_request(&r).unwrap();
        assert!(t.proxy.is_some());
        assert_eq!(
            t.proxy_authorization.as_deref(),
            Some("Basic dXNlcm5hbWU6cGFzc3dvcmQ=")
        );
    }

    #[test]
    fn proxy_credentials_are_both_or_neither() {
        let mut r = request("http://example.com");
        r.proxy.url = "http://proxy.example:8080".to_string();
        r.proxy.username = "username".to_string();
        let t = Transport::for_request(&r).unwrap();
        assert!(t.proxy.is_some());
        assert!(t.proxy_authorization.is_none());
    }

    #[test]
    fn insecure_applies_to_https_targets_only() {
        let mut r = request("https://example.com");
        r.insecure = true;
        assert!(Transport::for_request(&r).unwrap().insecure);

        let mut r = request("http://example.com");
        r.insecure = true;
        assert!(!Transport::for_request(&r).unwrap().insecure);

        let r = request("https://example.com");
        assert!(!Transport::for_request(&r).unwrap().insecure);
    }
}
