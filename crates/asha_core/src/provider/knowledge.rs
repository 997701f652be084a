//! Knowledge-lookup collaborator contract.

use crate::provider::ProviderError;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Lookup outcome distinctions the handler must branch on.
#[derive(Debug)]
pub enum KnowledgeError {
    /// The topic maps to several articles; candidates in provider order.
    Disambiguation(Vec<String>),
    /// No article exists for the topic.
    NotFound,
    /// Transport-level failure.
    Provider(ProviderError),
}

impl Display for KnowledgeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Disambiguation(options) => {
                write!(f, "ambiguous topic with {} candidates", options.len())
            }
            Self::NotFound => write!(f, "no article found"),
            Self::Provider(err) => write!(f, "{err}"),
        }
    }
}

impl Error for KnowledgeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Provider(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ProviderError> for KnowledgeError {
    fn from(value: ProviderError) -> Self {
        Self::Provider(value)
    }
}

/// Plain-text topic summary, fixed language.
///
/// `sentences` is the summary length hint forwarded to the provider.
pub trait KnowledgeProvider: Send + Sync {
    fn summarize(&self, topic: &str, sentences: u8) -> Result<String, KnowledgeError>;
}
