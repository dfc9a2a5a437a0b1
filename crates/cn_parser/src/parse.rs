use anyhow::Result;
use cn_ast::{EsVersion, Module};
use swc_common::{
    comments::SingleThreadedComments, errors::Handler, sync::Lrc, FileName, SourceMap,
};
use swc_ecma_parser::{EsSyntax, Syntax, TsSyntax};

/// Result of parsing one source file.
pub struct ParseResult {
    pub module: Module,
    /// Comment trivia keyed by byte position; the macro engine both reads
    /// and splices this store.
    pub comments: SingleThreadedComments,
    pub source_map: Lrc<SourceMap>,
}

fn syntax_for(filename: &str) -> Syntax {
    if filename.ends_with(".ts") || filename.ends_with(".tsx") {
        Syntax::Typescript(TsSyntax {
            tsx: filename.ends_with(".tsx"),
            decorators: true,
            ..Default::default()
        })
    } else {
        Syntax::Es(EsSyntax {
            jsx: filename.ends_with(".jsx"),
            ..Default::default()
        })
    }
}

/// Parse a JavaScript/TypeScript module, capturing comment trivia.
pub fn parse_source(source: &str, filename: &str) -> Result<ParseResult> {
    let source_map: Lrc<SourceMap> = Default::default();
    let source_file = source_map.new_source_file(
        Lrc::new(FileName::Custom(filename.to_string())),
        source.to_string(),
    );

    let comments = SingleThreadedComments::default();

    let handler =
        Handler::with_emitter_writer(Box::new(std::io::stderr()), Some(source_map.clone()));

    let module = swc_ecma_parser::parse_file_as_module(
        &source_file,
        syntax_for(filename),
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
