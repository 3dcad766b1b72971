//! PDF parsing modules.
//!
//! - `lexer`: tokenizer over byte spans
//! - `pdf_parser`: PDF object parser
pub mod lexer;
pub mod pdf_parser;

pub use lexer::{Token, TokenKind, next_token, peek_token};
pub use pdf_parser::PDFParser;
