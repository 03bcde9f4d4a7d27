//! # Schema Registry
//!
//! Resolves the schema directory, loads each [`SchemaKind`] document and
//! compiles it exactly once.
//!
//! ## Directory Resolution
//!
//! The same binary must work when run from the source tree (`cargo run`,
//! `cargo test`), from an installed layout where `schemas/` sits next to or
//! one level above the executable, and from a working directory that holds
//! `src/schemas`, `dist/schemas` or `schemas`. Candidates are tried in that
//! order; the first one containing every schema file wins.
//!
//! When nothing matches, resolution falls back to the first candidate
//! instead of failing. Loading then reports the missing file with its full
//! path, which is a more useful error than "no directory found".
//!
//! `DRAGON_SCHEMA_DIR` overrides the search entirely.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use dragon_core::SchemaKind;
use jsonschema::{Draft, Validator};
use serde_json::Value;

use crate::error::SchemaError;

/// Environment variable that pins the schema directory.
pub const SCHEMA_DIR_ENV: &str = "DRAGON_SCHEMA_DIR";

static GLOBAL: OnceLock<Result<SchemaRegistry, SchemaError>> = OnceLock::new();

/// Candidate schema directories, in priority order.
pub fn schema_dir_candidates() -> Vec<PathBuf> {
    let module_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");
    let mut candidates = vec![
        module_dir.join("..").join("schemas"),
        module_dir.join("..").join("..").join("schemas"),
    ];

    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        candidates.push(exe_dir.join("schemas"));
        candidates.push(exe_dir.join("..").join("schemas"));
    }

    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd.join("src").join("schemas"));
        candidates.push(cwd.join("dist").join("schemas"));
        candidates.push(cwd.join("schemas"));
    }

    candidates
}

/// Resolve the directory to load schemas from.
///
/// Honors [`SCHEMA_DIR_ENV`] when set, otherwise searches
/// [`schema_dir_candidates`].
pub fn resolve_schema_directory() -> PathBuf {
    if let Some(dir) = std::env::var_os(SCHEMA_DIR_ENV).filter(|v| !v.is_empty()) {
        let dir = PathBuf::from(dir);
        tracing::debug!(dir = %dir.display(), "schema directory pinned by {SCHEMA_DIR_ENV}");
        return dir;
    }
    resolve_from(&schema_dir_candidates())
}

/// First candidate that holds every schema file, else the first candidate.
pub(crate) fn resolve_from(candidates: &[PathBuf]) -> PathBuf {
    if let Some(found) = candidates.iter().find(|dir| contains_all_schemas(dir)) {
        tracing::debug!(dir = %found.display(), "resolved schema directory");
        return found.clone();
    }
    let fallback = candidates.first().cloned().unwrap_or_else(|| PathBuf::from("schemas"));
    tracing::debug!(
        dir = %fallback.display(),
        tried = candidates.len(),
        "no candidate holds the schema set; falling back to first candidate"
    );
    fallback
}

fn contains_all_schemas(dir: &Path) -> bool {
    SchemaKind::ALL
        .iter()
        .all(|kind| dir.join(kind.file_name()).is_file())
}

/// Build a validator with the engine settings used throughout the toolkit:
/// Draft 7, all errors collected, format assertions on, unknown keywords
/// ignored.
pub(crate) fn compile_schema(schema: &Value) -> Result<Validator, String> {
    jsonschema::options()
        .with_draft(Draft::Draft7)
        .should_validate_formats(true)
        .build(schema)
        .map_err(|e| e.to_string())
}

/// A parsed schema document together with its compiled validator.
pub(crate) struct CompiledSchema {
    pub(crate) document: Value,
    pub(crate) validator: Validator,
}

/// Compiled schemas keyed by [`SchemaKind`].
///
/// `SchemaRegistry` is `Send + Sync`; validators are built once at
/// construction and only read afterwards.
pub struct SchemaRegistry {
    schema_dir: PathBuf,
    schemas: HashMap<SchemaKind, CompiledSchema>,
}

impl fmt::Debug for SchemaRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaRegistry")
            .field("schema_dir", &self.schema_dir)
            .field("kinds", &self.kinds())
            .finish()
    }
}

impl SchemaRegistry {
    /// Load and compile every schema kind from `schema_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::SchemaLoad`] when a file is missing or is not
    /// valid JSON, and [`SchemaError::ValidatorBuild`] when a document is
    /// not a usable schema.
    pub fn load(schema_dir: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let schema_dir = schema_dir.as_ref().to_path_buf();
        let mut schemas = HashMap::new();

        for kind in SchemaKind::ALL {
            let name = kind.file_name();
            let path = schema_dir.join(name);
            let content =
                std::fs::read_to_string(&path).map_err(|e| SchemaError::SchemaLoad {
                    schema_name: name.to_string(),
                    reason: format!("cannot read {}: {e}", path.display()),
                })?;
            let document: Value =
                serde_json::from_str(&content).map_err(|e| SchemaError::SchemaLoad {
                    schema_name: name.to_string(),
                    reason: format!("invalid JSON: {e}"),
                })?;
            let validator =
                compile_schema(&document).map_err(|reason| SchemaError::ValidatorBuild {
                    schema_name: name.to_string(),
                    reason,
                })?;
            schemas.insert(kind, CompiledSchema { document, validator });
        }

        tracing::debug!(dir = %schema_dir.display(), count = schemas.len(), "compiled schemas");
        Ok(Self { schema_dir, schemas })
    }

    /// Load from the resolved default directory.
    pub fn load_default() -> Result<Self, SchemaError> {
        Self::load(resolve_schema_directory())
    }

    /// The process-wide registry, built on first call.
    ///
    /// A load failure is cached too: every later call returns the same
    /// error without touching the file system again.
    pub fn global() -> Result<&'static SchemaRegistry, SchemaError> {
        GLOBAL
            .get_or_init(Self::load_default)
            .as_ref()
            .map_err(Clone::clone)
    }

    pub fn schema_dir(&self) -> &Path {
        &self.schema_dir
    }

    /// Loaded kinds, in [`SchemaKind::ALL`] order.
    pub fn kinds(&self) -> Vec<SchemaKind> {
        SchemaKind::ALL
            .into_iter()
            .filter(|k| self.schemas.contains_key(k))
            .collect()
    }

    /// The raw schema document for `kind`.
    pub fn schema(&self, kind: SchemaKind) -> &Value {
        &self.compiled(kind).document
    }

    /// The schema's `title`, if it declares one.
    pub fn title(&self, kind: SchemaKind) -> Option<&str> {
        self.schema(kind).get("title").and_then(Value::as_str)
    }

    pub(crate) fn compiled(&self, kind: SchemaKind) -> &CompiledSchema {
        // `load` inserts every kind or fails, so the lookup cannot miss.
        &self.schemas[&kind]
    }
}
