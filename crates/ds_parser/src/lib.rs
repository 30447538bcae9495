//! Text boundary of the debugstrip pipeline.
//!
//! The transform itself only ever sees tree nodes. This crate turns source
//! text into an SWC [`Module`](swc_ecma_ast::Module) and back:
//!
//! - [`parse_source`] picks JS, JSX, TS or TSX syntax from the file name
//! - [`emit_module`] prints a module, optionally with a source map

pub mod emit;
pub mod parse;

pub use emit::{emit_module, Emitted};
pub use parse::{parse_source, ParseResult};
