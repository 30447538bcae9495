use anyhow::Result;
use swc_common::{
    comments::SingleThreadedComments, errors::Handler, sync::Lrc, FileName, SourceMap,
};
use swc_ecma_ast::EsVersion;
use swc_ecma_parser::{EsSyntax, Syntax, TsSyntax};

/// Result of parsing a source file.
pub struct ParseResult {
    pub module: swc_ecma_ast::Module,
    pub comments: SingleThreadedComments,
    pub source_map: Lrc<SourceMap>,
}

/// Parse a JavaScript/TypeScript source string as an ES module.
///
/// Parse errors are printed to stderr as diagnostics and returned as an
/// error naming the file.
pub fn parse_source(source: &str, filename: &str) -> Result<ParseResult> {
    let source_map: Lrc<SourceMap> = Default::default();
    let source_file = source_map.new_source_file(
        Lrc::new(FileName::Custom(filename.to_string())),
        source.to_string(),
    );

    let comments = SingleThreadedComments::default();

    let handler = Handler::with_emitter_writer(Box::new(std::io::stderr()), Some(source_map.clone()));

    let syntax = syntax_for(filename);
    log::debug!("parsing {filename} as {syntax:?}");

    let module = swc_ecma_parser::parse_file_as_module(
        &source_file,
        syntax,
        EsVersion::latest(),
        Some(&comments),
        &mut vec![],
    )
    .map_err(|e| {
        e.into_diagnostic(&handler).emit();
        anyhow::anyhow!("failed to parse {filename}")
    })?;

    Ok(ParseResult {
        module,
        comments,
        source_map,
    })
}

/// Pick the parser syntax from the file extension.
///
/// Anything that is not TypeScript is parsed as JavaScript with JSX enabled.
fn syntax_for(filename: &str) -> Syntax {
    let extension = filename.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("");

    match extension {
        "ts" | "mts" | "cts" => Syntax::Typescript(TsSyntax {
            decorators: true,
            ..Default::default()
        }),
        "tsx" => Syntax::Typescript(TsSyntax {
            tsx: true,
            decorators: true,
            ..Default::default()
        }),
        _ => Syntax::Es(EsSyntax {
            jsx: true,
            ..Default::default()
        }),
    }
}
