use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use cn_ast::{Diagnostics, MacroSet, Severity};
use cn_expand::expand_module;
use cn_parser::parse_source;
use colored::Colorize;
use swc_common::{comments::SingleThreadedComments, sync::Lrc, SourceMap, SourceMapper};
use swc_ecma_codegen::{text_writer::JsWriter, Emitter, Node};

#[derive(Parser)]
#[command(name = "cnd", about = "condense — comment-macro expander for JavaScript")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Expand macro directives and emit the rewritten source.
    Expand {
        /// Input .js/.jsx/.ts/.tsx files.
        inputs: Vec<PathBuf>,
        /// Output file (stdout if omitted; single input only).
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Rewrite each input file in place.
        #[arg(long, conflicts_with = "output")]
        write: bool,
        /// Comma-separated macro families to enable (default: all).
        #[arg(long)]
        only: Option<String>,
    },
    /// Expand without writing anything; report diagnostics only.
    Check {
        input: PathBuf,
        #[arg(long)]
        only: Option<String>,
    },
    /// Parse and dump the AST.
    Parse {
        input: PathBuf,
        /// Dump as JSON instead of the debug tree.
        #[arg(long)]
        ast: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Expand {
            inputs,
            output,
            write,
            only,
        } => {
            if inputs.is_empty() {
                bail!("no input files");
            }
            if output.is_some() && inputs.len() > 1 {
                bail!("--output takes a single input file");
            }
            let macros = macro_set(only.as_deref())?;

            let mut failed = 0usize;
            for input in &inputs {
                match expand_file(input, &macros) {
                    Ok(expanded) => {
                        if write {
                            std::fs::write(input, &expanded)
                                .with_context(|| format!("failed to write {}", input.display()))?;
                        } else if let Some(path) = &output {
                            std::fs::write(path, &expanded)
                                .with_context(|| format!("failed to write {}", path.display()))?;
                        } else {
                            print!("{expanded}");
                        }
                    }
                    Err(error) => {
                        eprintln!("{} {error:#}", format!("{}:", input.display()).red());
                        failed += 1;
                    }
                }
            }
            if failed > 0 {
                bail!("{failed} of {} file(s) failed", inputs.len());
            }
        }
        Commands::Check { input, only } => {
            let macros = macro_set(only.as_deref())?;
            expand_file(&input, &macros)?;
            eprintln!("OK: {}", input.display());
        }
        Commands::Parse { input, ast } => {
            let source = std::fs::read_to_string(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let parsed = parse_source(&source, &input.display().to_string())?;

            if ast {
                let json = serde_json::to_string_pretty(&parsed.module)?;
                println!("{json}");
            } else {
                println!("{:#?}", parsed.module);
            }
        }
    }

    Ok(())
}

fn macro_set(only: Option<&str>) -> Result<MacroSet> {
    let Some(list) = only else {
        return Ok(MacroSet::default());
    };
    let mut set = MacroSet::none();
    for name in list.split(',') {
        let name = name.trim();
        if !set.enable(name) {
            bail!("unknown macro family {name:?} (expected Alias, Inline, InlineExp, DeadCode, or RewriteProps)");
        }
    }
    Ok(set)
}

/// Parse, expand, and re-emit one file, printing its diagnostics as they
/// were recorded.
fn expand_file(input: &Path, macros: &MacroSet) -> Result<String> {
    let source = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let filename = input.display().to_string();

    let mut parsed = parse_source(&source, &filename)?;
    let diagnostics = expand_module(&mut parsed.module, &parsed.comments, macros)
        .with_context(|| format!("failed to expand {filename}"))?;
    report(&filename, &parsed.source_map, &diagnostics);

    emit(&parsed.module, parsed.source_map.clone(), &parsed.comments)
}

fn report(filename: &str, source_map: &Lrc<SourceMap>, diagnostics: &Diagnostics) {
    for diagnostic in diagnostics.iter() {
        let loc = source_map.lookup_char_pos(diagnostic.span.lo);
        let message = match diagnostic.severity {
            Severity::Found => diagnostic.message.green(),
            Severity::Warning => diagnostic.message.black().on_yellow(),
        };
        eprintln!("{filename}:{}:{} {message}", loc.line, loc.col_display + 1);
        if diagnostic.severity == Severity::Found {
            if let Ok(snippet) = source_map.span_to_snippet(diagnostic.span) {
                for line in snippet.lines() {
                    eprintln!("    {line}");
                }
            }
        }
    }
}

fn emit(
    module: &swc_ecma_ast::Module,
    source_map: Lrc<SourceMap>,
    comments: &SingleThreadedComments,
) -> Result<String> {
    let mut buf = Vec::new();
    {
        let writer = JsWriter::new(source_map.clone(), "\n", &mut buf, None);
        let mut emitter = Emitter {
            cfg: swc_ecma_codegen::Config::default()
                .with_target(swc_ecma_ast::EsVersion::latest()),
            cm: source_map,
            comments: Some(comments),
            wr: writer,
        };
        module.emit_with(&mut emitter)?;
    }
    Ok(String::from_utf8(buf)?)
}
