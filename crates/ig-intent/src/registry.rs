// registry.rs — Intent registry reader.
//
// The registry is parsed in full on every call. There is no cache: an edit
// must take effect on the very next decision.
//
// A broken registry is never a hard failure. Unparsable content, or content
// with the wrong top-level shape, behaves like "no intents defined", and we
// still try to recover the ids so denial messages can list them.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Deserialize;

use crate::error::{AvailableIds, IntentError};
use crate::intent::Intent;
use crate::layout::OrchestrationLayout;

/// Expected top-level shape of `active_intents.yaml`.
#[derive(Debug, Deserialize)]
struct RegistryFile {
    active_intents: Vec<Intent>,
}

/// The result of reading the registry once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrySnapshot {
    /// The registry file does not exist.
    Missing,
    /// The registry parsed and matched the expected shape.
    Loaded(Vec<Intent>),
    /// The file was read but could not be interpreted as a registry.
    Malformed {
        reason: String,
        recovered_ids: Vec<String>,
    },
    /// The file exists but reading it failed.
    Unreadable { reason: String },
}

impl RegistrySnapshot {
    /// Intents usable for decisions. Empty unless the registry loaded cleanly.
    pub fn intents(&self) -> &[Intent] {
        match self {
            RegistrySnapshot::Loaded(intents) => intents,
            _ => &[],
        }
    }

    /// Find an intent by exact id. The first declaration wins on duplicates.
    pub fn find(&self, intent_id: &str) -> Option<&Intent> {
        self.intents().iter().find(|i| i.id == intent_id)
    }

    /// The most specific list of ids we can offer a caller.
    pub fn available_ids(&self) -> AvailableIds {
        match self {
            RegistrySnapshot::Loaded(intents) => {
                AvailableIds::Listed(intents.iter().map(|i| i.id.clone()).collect())
            }
            RegistrySnapshot::Malformed {
                reason,
                recovered_ids,
            } => AvailableIds::Recovered {
                ids: recovered_ids.clone(),
                reason: reason.clone(),
            },
            RegistrySnapshot::Unreadable { reason } => AvailableIds::Unreadable(reason.clone()),
            RegistrySnapshot::Missing => AvailableIds::Unreadable("file does not exist".into()),
        }
    }
}

/// Read-only view of one workspace's intent registry.
pub struct IntentRegistry {
    path: PathBuf,
}

impl IntentRegistry {
    /// Registry at an explicit path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Registry at the standard location under `workspace_root`.
    pub fn for_workspace(workspace_root: &Path) -> Self {
        Self::new(OrchestrationLayout::for_workspace(workspace_root).registry)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the registry file. Never fails.
    pub fn load(&self) -> RegistrySnapshot {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return RegistrySnapshot::Missing,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "intent registry unreadable");
                return RegistrySnapshot::Unreadable {
                    reason: e.to_string(),
                };
            }
        };
        parse_registry(&text)
    }

    /// Resolve one intent by id.
    pub fn resolve(&self, intent_id: &str) -> Result<Intent, IntentError> {
        let snapshot = self.load();
        match snapshot.find(intent_id) {
            Some(intent) => Ok(intent.clone()),
            None => Err(IntentError::NotFound {
                intent_id: intent_id.to_string(),
                available: snapshot.available_ids(),
            }),
        }
    }

    /// All declared intent ids, in registry order.
    pub fn list_ids(&self) -> Vec<String> {
        self.load().available_ids().ids().to_vec()
    }
}

/// Resolve an intent id against the registry of `workspace_root`.
pub fn resolve_intent(workspace_root: &Path, intent_id: &str) -> Result<Intent, IntentError> {
    IntentRegistry::for_workspace(workspace_root).resolve(intent_id)
}

/// List the intent ids declared in the registry of `workspace_root`.
///
/// For a malformed registry this is the best-effort recovered list.
pub fn list_intent_ids(workspace_root: &Path) -> Vec<String> {
    IntentRegistry::for_workspace(workspace_root).list_ids()
}

fn parse_registry(text: &str) -> RegistrySnapshot {
    match serde_yaml::from_str::<RegistryFile>(text) {
        Ok(file) => RegistrySnapshot::Loaded(file.active_intents),
        Err(e) => {
            let recovered_ids = recover_ids(text);
            tracing::warn!(
                error = %e,
                recovered = recovered_ids.len(),
                "intent registry malformed; treating as empty"
            );
            RegistrySnapshot::Malformed {
                reason: e.to_string(),
                recovered_ids,
            }
        }
    }
}

/// Pull `id:` values out of text that failed to parse as a registry.
fn recover_ids(text: &str) -> Vec<String> {
    let re = match Regex::new(r#"(?m)^\s*(?:-\s+)?id:\s*["']?([^"'\s#]+)"#) {
        Ok(re) => re,
        Err(_) => return Vec::new(),
    };
    let mut ids: Vec<String> = Vec::new();
    for cap in re.captures_iter(text) {
        let id = cap[1].to_string();
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    ids
}
