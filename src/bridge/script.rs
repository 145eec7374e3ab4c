//! bridge::script — scoped materialization of the engine adapter scripts.
//!
//! Purpose
//! -------
//! Own the two small engine-side scripts the bridge needs: the analysis
//! adapter that calls the vendor `pls_analysis` and strips the
//! marshaling-incompatible `field_descrip` field, and the load adapter that
//! unwraps a persisted file's single top-level struct. Each is written as a
//! scoped resource — created on entry, removed on every exit path including
//! errors — confined to an injectable directory instead of the ambient
//! working directory, which removes the same-named-file collision hazard of
//! the original wrapper by construction.
//!
//! Key behaviors
//! -------------
//! - [`AdapterScript::materialize`] writes the script for a [`ScriptKind`]
//!   into the given directory, or into a fresh temporary directory when none
//!   is given; the temporary directory lives exactly as long as the guard.
//! - Dropping the guard removes the file (and any temporary directory)
//!   best-effort; removal failure on drop is not observable and is
//!   deliberately ignored.
//! - Callers that pre-install equivalents on the engine path skip this
//!   module entirely (`make_script = false` in the bridge config).
//!
//! Invariants & assumptions
//! ------------------------
//! - The script file name is fixed per kind, since the engine resolves the
//!   remote function by file name.
//! - The bridge must put the script's directory on the engine search path
//!   before the remote call; the guard exposes [`AdapterScript::dir`] for
//!   that.
//!
//! Testing notes
//! -------------
//! - Unit tests cover creation in both directory modes, content headers,
//!   and removal on drop.
use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;
use tracing::debug;

use crate::bridge::errors::{BridgeError, BridgeResult};

/// Engine function name of the analysis adapter.
pub const ANALYSIS_FN: &str = "pls_analysis_py";

/// Engine function name of the load adapter.
pub const LOAD_FN: &str = "pls_load_py";

/// The analysis adapter: forward to the vendor function, then drop the
/// character-array field the marshaling layer cannot carry.
const ANALYSIS_SOURCE: &str = "\
function result = pls_analysis_py(datamat_lst, num_subj_lst, k, opt)
    result_tmp = pls_analysis(datamat_lst, num_subj_lst, k, opt);
    result = rmfield(result_tmp, 'field_descrip');
end
";

/// The load adapter: require exactly one top-level struct, unwrap it, and
/// drop `field_descrip` when present.
const LOAD_SOURCE: &str = "\
function result = pls_load_py(path)
    contents = load(path);
    names = fieldnames(contents);
    if numel(names) ~= 1
        error('pls_load_py:badfile', ...
              'expected exactly one top-level struct in %s', path);
    end
    result = contents.(names{1});
    if isfield(result, 'field_descrip')
        result = rmfield(result, 'field_descrip');
    end
end
";

/// Which adapter script to materialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptKind {
    Analysis,
    Load,
}

impl ScriptKind {
    /// File name the engine resolves the function by.
    pub fn file_name(self) -> &'static str {
        match self {
            ScriptKind::Analysis => "pls_analysis_py.m",
            ScriptKind::Load => "pls_load_py.m",
        }
    }

    fn source(self) -> &'static str {
        match self {
            ScriptKind::Analysis => ANALYSIS_SOURCE,
            ScriptKind::Load => LOAD_SOURCE,
        }
    }
}

/// AdapterScript — RAII guard over one materialized adapter script.
///
/// The file exists exactly as long as the guard; dropping it removes the
/// file and, when the guard owns a temporary directory, the directory too.
pub struct AdapterScript {
    path: PathBuf,
    _scratch: Option<TempDir>,
}

impl AdapterScript {
    /// Write the script for `kind` into `dir`, or into a fresh temporary
    /// directory when `dir` is `None`.
    ///
    /// Errors
    /// ------
    /// - `ScriptIo` when the directory cannot be created or the file cannot
    ///   be written.
    pub fn materialize(kind: ScriptKind, dir: Option<&Path>) -> BridgeResult<AdapterScript> {
        let (base, scratch) = match dir {
            Some(path) => (path.to_path_buf(), None),
            None => {
                let scratch = TempDir::new().map_err(|e| BridgeError::ScriptIo {
                    path: PathBuf::from(kind.file_name()),
                    detail: e.to_string(),
                })?;
                (scratch.path().to_path_buf(), Some(scratch))
            }
        };

        let path = base.join(kind.file_name());
        fs::write(&path, kind.source()).map_err(|e| BridgeError::ScriptIo {
            path: path.clone(),
            detail: e.to_string(),
        })?;
        debug!(script = %path.display(), "materialized adapter script");
        Ok(AdapterScript { path, _scratch: scratch })
    }

    /// Path of the materialized script file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory the bridge must put on the engine search path.
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new("."))
    }
}

impl Drop for AdapterScript {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Materialization into an explicit directory and into a fresh
    //   temporary directory.
    // - Script content headers (function signatures the engine resolves).
    // - Removal of the file on drop, on the success path.
    //
    // They intentionally DO NOT cover:
    // - Engine-side execution of the scripts; the engine is opaque.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that materializing into an explicit directory creates the
    // fixed-name file with the adapter function signature, and that drop
    // removes it.
    //
    // Given
    // -----
    // - A temporary directory supplied by the test.
    //
    // Expect
    // ------
    // - `pls_analysis_py.m` exists with the expected first line while the
    //   guard lives, and is gone after drop; the directory itself remains.
    fn explicit_directory_script_is_created_and_removed() {
        // Arrange
        let dir = tempfile::tempdir().expect("test tempdir should be created");

        // Act
        let path = {
            let script = AdapterScript::materialize(ScriptKind::Analysis, Some(dir.path()))
                .expect("materialization should succeed");
            let content =
                fs::read_to_string(script.path()).expect("script file should be readable");

            // Assert (while alive)
            assert!(content.starts_with("function result = pls_analysis_py("));
            assert_eq!(script.dir(), dir.path());
            script.path().to_path_buf()
        };

        // Assert (after drop)
        assert!(!path.exists(), "script file should be removed on drop");
        assert!(dir.path().exists(), "caller-owned directory must survive");
    }

    #[test]
    // Purpose
    // -------
    // Verify the temporary-directory mode: a fresh directory holds the
    // script and disappears with the guard.
    //
    // Given
    // -----
    // - No injected directory.
    //
    // Expect
    // ------
    // - The load script exists while the guard lives; its directory is gone
    //   after drop.
    fn temporary_directory_mode_cleans_up_wholesale() {
        // Arrange + Act
        let dir_path = {
            let script = AdapterScript::materialize(ScriptKind::Load, None)
                .expect("materialization should succeed");

            // Assert (while alive)
            assert!(script.path().exists());
            assert!(script.path().ends_with("pls_load_py.m"));
            script.dir().to_path_buf()
        };

        // Assert (after drop)
        assert!(!dir_path.exists(), "temporary directory should be removed with the guard");
    }

    #[test]
    // Purpose
    // -------
    // Verify that the load adapter enforces the single-top-level-struct
    // contract in its generated text.
    //
    // Given
    // -----
    // - The load script source.
    //
    // Expect
    // ------
    // - It checks `numel(names) ~= 1` and strips `field_descrip`
    //   conditionally.
    fn load_script_checks_single_struct_and_strips_field() {
        // Arrange
        let script = AdapterScript::materialize(ScriptKind::Load, None)
            .expect("materialization should succeed");

        // Act
        let content = fs::read_to_string(script.path()).expect("script file should be readable");

        // Assert
        assert!(content.contains("numel(names) ~= 1"));
        assert!(content.contains("isfield(result, 'field_descrip')"));
    }
}
