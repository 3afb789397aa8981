use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExpandError {
    #[error("component `{component}` still expands to a component after {depth} levels")]
    DepthExceeded { component: String, depth: usize },
    #[error("{kind} nodes cannot be expanded")]
    NotExpandable { kind: &'static str },
}

pub type Result<T> = std::result::Result<T, ExpandError>;
