use std::path::Path;

use crate::{Operation, Record};

/// A validated command, built once per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    List { file_name: String },
    Add { file_name: String, item: Record },
    Remove { file_name: String, id: String },
    FindById { file_name: String, id: String },
}

impl Request {
    pub fn operation(&self) -> Operation {
        match self {
            Request::List { .. } => Operation::List,
            Request::Add { .. } => Operation::Add,
            Request::Remove { .. } => Operation::Remove,
            Request::FindById { .. } => Operation::FindById,
        }
    }

    pub fn file_name(&self) -> &str {
        match self {
            Request::List { file_name }
            | Request::Add { file_name, .. }
            | Request::Remove { file_name, .. }
            | Request::FindById { file_name, .. } => file_name,
        }
    }

    pub fn path(&self) -> &Path {
        Path::new(self.file_name())
    }
}
