//! Shader program build with diagnostics.
//!
//! Two WGSL stage files are read whole and pushed through naga's parser
//! and validator before any GPU object exists. Diagnostics are logged in
//! full, but a stage failing to compile does NOT fail the build: the
//! returned [`ShaderProgram`] simply carries no module for that stage and
//! records the failure in its [`ProgramStatus`], so callers and tests can
//! tell a working program from a broken one without parsing log text. A
//! broken program renders nothing; it never aborts the process.
//!
//! Only unreadable files are an error, surfaced before compilation.

use std::fs;
use std::path::{Path, PathBuf};

use naga::valid::{Capabilities, ValidationFlags, Validator};

/// Errors from the shader build. Compile and validation failures are NOT
/// errors; they degrade the program status instead.
#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error("failed to read shader {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// One stage's source text after the parse/validate pass.
#[derive(Debug)]
pub struct StageSource {
    pub path: PathBuf,
    pub source: String,
    pub ok: bool,
    /// Full diagnostic text; empty when the stage is clean.
    pub log: String,
}

/// Per-stage build outcome, observable without log parsing.
#[derive(Debug, Clone)]
pub struct ProgramStatus {
    pub vertex_ok: bool,
    pub fragment_ok: bool,
    pub vertex_log: String,
    pub fragment_log: String,
}

impl ProgramStatus {
    pub fn is_broken(&self) -> bool {
        !(self.vertex_ok && self.fragment_ok)
    }
}

/// A built program: zero, one, or two live stage modules plus status.
pub struct ShaderProgram {
    pub vertex: Option<wgpu::ShaderModule>,
    pub fragment: Option<wgpu::ShaderModule>,
    pub status: ProgramStatus,
}

/// Read one stage and run it through naga. Never fails past the file
/// read; parse/validation problems land in the returned log.
pub fn compile_stage(path: &Path) -> Result<StageSource, ShaderError> {
    let source = fs::read_to_string(path).map_err(|source| ShaderError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let log = match naga::front::wgsl::parse_str(&source) {
        Ok(module) => {
            match Validator::new(ValidationFlags::all(), Capabilities::all()).validate(&module) {
                Ok(_) => String::new(),
                Err(e) => e.emit_to_string(&source),
            }
        }
        Err(e) => e.emit_to_string(&source),
    };

    if !log.is_empty() {
        tracing::error!(path = %path.display(), "shader diagnostics:\n{log}");
    }

    Ok(StageSource {
        path: path.to_path_buf(),
        ok: log.is_empty(),
        source,
        log,
    })
}

/// Compile both stages. The GPU-free half of [`build_program`], split out
/// so the always-returns policy is testable without a device.
pub fn compile_pair(
    vs_path: &Path,
    fs_path: &Path,
) -> Result<(StageSource, StageSource), ShaderError> {
    Ok((compile_stage(vs_path)?, compile_stage(fs_path)?))
}

/// Build the shader program. Always returns a [`ShaderProgram`] when both
/// files are readable, even if one or both stages failed to compile.
pub fn build_program(
    device: &wgpu::Device,
    vs_path: &Path,
    fs_path: &Path,
) -> Result<ShaderProgram, ShaderError> {
    let (vs, fs) = compile_pair(vs_path, fs_path)?;

    let status = ProgramStatus {
        vertex_ok: vs.ok,
        fragment_ok: fs.ok,
        vertex_log: vs.log,
        fragment_log: fs.log,
    };
    if status.is_broken() {
        tracing::warn!("shader program is broken; the cube will not be drawn");
    }

    // Only validated sources reach the device; wgpu would panic on an
    // invalid module, and the degraded path must stay non-fatal.
    let vertex = vs.ok.then(|| {
        device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("cube_vertex_shader"),
            source: wgpu::ShaderSource::Wgsl(vs.source.into()),
        })
    });
    let fragment = fs.ok.then(|| {
        device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("cube_fragment_shader"),
            source: wgpu::ShaderSource::Wgsl(fs.source.into()),
        })
    });

    Ok(ShaderProgram {
        vertex,
        fragment,
        status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const VALID_FRAGMENT: &str = r#"
@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(1.0, 0.0, 1.0, 1.0);
}
"#;

    const BROKEN_VERTEX: &str = r#"
@vertex
fn vs_main() -> @builtin(position) vec4<f32> {
    return not_a_function(1.0);
}
"#;

    const VALID_VERTEX: &str = r#"
@vertex
fn vs_main() -> @builtin(position) vec4<f32> {
    return vec4<f32>(0.0, 0.0, 0.0, 1.0);
}
"#;

    fn stage_file(source: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::with_suffix(".wgsl").unwrap();
        f.write_all(source.as_bytes()).unwrap();
        f
    }

    #[test]
    fn clean_stage_has_empty_log() {
        let f = stage_file(VALID_VERTEX);
        let stage = compile_stage(f.path()).unwrap();
        assert!(stage.ok);
        assert!(stage.log.is_empty());
    }

    #[test]
    fn broken_vertex_with_valid_fragment_still_builds() {
        let vs = stage_file(BROKEN_VERTEX);
        let fs = stage_file(VALID_FRAGMENT);

        let (v, f) = compile_pair(vs.path(), fs.path()).unwrap();
        assert!(!v.ok);
        assert!(!v.log.is_empty());
        assert!(f.ok);

        let status = ProgramStatus {
            vertex_ok: v.ok,
            fragment_ok: f.ok,
            vertex_log: v.log,
            fragment_log: f.log,
        };
        assert!(status.is_broken());
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = compile_stage(Path::new("/nonexistent/shader.wgsl")).unwrap_err();
        assert!(matches!(err, ShaderError::Read { .. }));
    }

    #[test]
    fn both_stages_clean_is_not_broken() {
        let vs = stage_file(VALID_VERTEX);
        let fs = stage_file(VALID_FRAGMENT);
        let (v, f) = compile_pair(vs.path(), fs.path()).unwrap();
        let status = ProgramStatus {
            vertex_ok: v.ok,
            fragment_ok: f.ok,
            vertex_log: v.log,
            fragment_log: f.log,
        };
        assert!(!status.is_broken());
    }

    #[test]
    fn shipped_shaders_compile_clean() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../assets/shaders");
        for name in ["lit_texture.vs.wgsl", "lit_texture.fs.wgsl"] {
            let stage = compile_stage(&root.join(name)).unwrap();
            assert!(stage.ok, "{name} diagnostics:\n{}", stage.log);
        }
    }
}
