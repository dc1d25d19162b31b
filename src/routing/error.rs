use thiserror::Error;

#[derive(Error, Debug)]
pub enum RouteError {
    #[error("No route matches path: {0}")]
    NotFound(String),

    #[error("Redirect loop navigating to {path} after {hops} redirects")]
    RedirectLoop { path: String, hops: usize },

    #[error("Invalid route table: {0}")]
    InvalidTable(String),

    #[error("Route table parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
