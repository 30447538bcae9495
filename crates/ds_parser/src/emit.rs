//! Code generation back to text.

use anyhow::{Context, Result};
use swc_common::{source_map::DefaultSourceMapGenConfig, sync::Lrc, SourceMap};
use swc_ecma_ast::{EsVersion, Module};
use swc_ecma_codegen::{text_writer::JsWriter, Emitter, Node};

/// Output of [`emit_module`].
pub struct Emitted {
    pub code: String,
    /// Source map JSON, when requested.
    pub source_map: Option<String>,
}

/// Print `module` as JavaScript/TypeScript.
///
/// `cm` must be the source map the module was parsed with, so spans of
/// surviving nodes map back to the original file.
pub fn emit_module(module: &Module, cm: &Lrc<SourceMap>, source_map: bool) -> Result<Emitted> {
    let mut buf = Vec::new();
    let mut srcmap_buf = if source_map { Some(vec![]) } else { None };
    {
        let writer = JsWriter::new(cm.clone(), "\n", &mut buf, srcmap_buf.as_mut());
        let mut emitter = Emitter {
            cfg: swc_ecma_codegen::Config::default().with_target(EsVersion::latest()),
            cm: cm.clone(),
            comments: None,
            wr: writer,
        };
        module.emit_with(&mut emitter)?;
    }

    let code = String::from_utf8(buf)?;

    let source_map = match srcmap_buf {
        Some(srcmap_data) => {
            let srcmap = cm.build_source_map(&srcmap_data, None, DefaultSourceMapGenConfig);
            let mut srcmap_json = vec![];
            srcmap
                .to_writer(&mut srcmap_json)
                .context("failed to serialize source map")?;
            Some(String::from_utf8(srcmap_json)?)
        }
        None => None,
    };

    Ok(Emitted { code, source_map })
}
