//! Test doubles for the resolver.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::Result;
use crate::resolver::finder::FileFinder;

/// A recorded `find_files` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub root: PathBuf,
    pub include: String,
    pub exclude: Option<String>,
    pub max_results: usize,
}

/// Replays canned responses in order and records every query.
/// Once the responses run out every query finds nothing.
#[derive(Debug, Default)]
pub struct RecordingFinder {
    responses: Mutex<VecDeque<Result<Vec<PathBuf>>>>,
    calls: Mutex<Vec<Query>>,
}

impl RecordingFinder {
    pub fn new(responses: Vec<Result<Vec<PathBuf>>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Query> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl FileFinder for RecordingFinder {
    async fn find_files(
        &self,
        root: &Path,
        include: &str,
        exclude: Option<&str>,
        max_results: usize,
    ) -> Result<Vec<PathBuf>> {
        self.calls.lock().unwrap().push(Query {
            root: root.to_path_buf(),
            include: include.to_string(),
            exclude: exclude.map(str::to_string),
            max_results,
        });

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}
