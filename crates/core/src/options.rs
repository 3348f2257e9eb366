//! Pagination options.

use crate::error::{Error, Result};
use alloc::string::String;
use core::fmt;
use core::str::FromStr;

/// Number of documents requested per growth step when none is configured.
pub const DEFAULT_STEP_LIMIT: usize = 20;

/// Edge of the visible list where newly seen documents are placed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum InsertionEdge {
    /// Prepend.
    Start,
    /// Append.
    #[default]
    End,
}

impl InsertionEdge {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsertionEdge::Start => "start",
            InsertionEdge::End => "end",
        }
    }
}

impl fmt::Display for InsertionEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InsertionEdge {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "start" => Ok(InsertionEdge::Start),
            "end" => Ok(InsertionEdge::End),
            other => Err(Error::invalid_option("insertion_edge", other)),
        }
    }
}

/// Configuration of a paginated live query.
///
/// `listen_options` is handed to the transport on every subscribe call and
/// never interpreted by the engine.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(default, bound(deserialize = "L: serde::Deserialize<'de> + Default"))
)]
pub struct PaginationOptions<L = ()> {
    /// Documents requested per growth step. Zero selects the default.
    pub step_limit: usize,
    /// Where novel documents are placed.
    pub insertion_edge: InsertionEdge,
    /// Pass-through options for the transport.
    pub listen_options: L,
    /// Field name under which projected values receive their document id.
    pub id_field: Option<String>,
}

impl<L: Default> Default for PaginationOptions<L> {
    fn default() -> Self {
        Self {
            step_limit: DEFAULT_STEP_LIMIT,
            insertion_edge: InsertionEdge::End,
            listen_options: L::default(),
            id_field: None,
        }
    }
}

impl PaginationOptions<()> {
    /// Creates options with every default.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<L> PaginationOptions<L> {
    /// Sets the growth step.
    pub fn with_step_limit(mut self, step_limit: usize) -> Self {
        self.step_limit = step_limit;
        self
    }

    /// Sets the insertion edge.
    pub fn with_insertion_edge(mut self, edge: InsertionEdge) -> Self {
        self.insertion_edge = edge;
        self
    }

    /// Sets the projection id field.
    pub fn with_id_field(mut self, field: impl Into<String>) -> Self {
        self.id_field = Some(field.into());
        self
    }

    /// Replaces the transport listen options.
    pub fn with_listen_options<M>(self, listen_options: M) -> PaginationOptions<M> {
        PaginationOptions {
            step_limit: self.step_limit,
            insertion_edge: self.insertion_edge,
            listen_options,
            id_field: self.id_field,
        }
    }

    /// Returns the growth step, substituting the default for zero.
    #[inline]
    pub fn effective_step_limit(&self) -> usize {
        if self.step_limit == 0 {
            DEFAULT_STEP_LIMIT
        } else {
            self.step_limit
        }
    }
}
