use axum::http::{uri::Authority, Method, Uri};

use crate::api::route_table::{RouteName, ROUTE_TABLE};
use crate::model::Id;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid URL: {0}")]
pub struct InvalidUrl(pub String);

/// A URL matched back to one of the service's routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    pub name: RouteName,
    pub params: Vec<(&'static str, Id)>,
}

impl ResolvedRoute {
    pub fn param(&self, name: &str) -> Option<Id> {
        self.params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
    }
}

/// Builds canonical resource URLs and maps URLs back to routes.
///
/// With a public base URL configured every link is absolute and only that
/// host is accepted when resolving; without one links are root-relative and
/// any URL naming a host is rejected. A path on the public URL (a service
/// mounted under `/api` behind a proxy) prefixes every link and is stripped
/// again before matching.
#[derive(Debug, Clone, Default)]
pub struct UrlMap {
    base: String,
    base_path: String,
    authority: Option<Authority>,
}

impl UrlMap {
    /// Root-relative links.
    pub fn relative() -> Self {
        Self::default()
    }

    pub fn with_public_url(public_url: &str) -> Result<Self, InvalidUrl> {
        let base = public_url.trim_end_matches('/');
        let uri: Uri = base
            .parse()
            .map_err(|_| InvalidUrl(public_url.to_string()))?;
        let authority = match (uri.scheme(), uri.authority()) {
            (Some(_), Some(authority)) => authority.clone(),
            _ => return Err(InvalidUrl(public_url.to_string())),
        };

        Ok(Self {
            base: base.to_string(),
            base_path: uri.path().trim_end_matches('/').to_string(),
            authority: Some(authority),
        })
    }

    /// Canonical URL of `route`, with `id` substituted for its parameter.
    pub fn url_for(&self, route: RouteName, id: Id) -> String {
        format!("{}{}", self.base, route.def().fill(id))
    }

    /// Resolve a URL as if it were requested with GET.
    pub fn resolve(&self, url: &str) -> Result<ResolvedRoute, InvalidUrl> {
        self.resolve_with_method(url, &Method::GET)
    }

    pub fn resolve_with_method(
        &self,
        url: &str,
        method: &Method,
    ) -> Result<ResolvedRoute, InvalidUrl> {
        let invalid = || InvalidUrl(url.to_string());
        let uri: Uri = url.parse().map_err(|_| invalid())?;

        if let Some(authority) = uri.authority() {
            if self.authority.as_ref() != Some(authority) {
                return Err(invalid());
            }
        }

        let path = uri
            .path()
            .strip_prefix(self.base_path.as_str())
            .filter(|rest| rest.starts_with('/'))
            .unwrap_or(uri.path());

        ROUTE_TABLE
            .iter()
            .filter(|route| route.methods.contains(method))
            .find_map(|route| {
                route.match_path(path).map(|params| ResolvedRoute {
                    name: route.name,
                    params,
                })
            })
            .ok_or_else(invalid)
    }
}
