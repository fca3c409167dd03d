//! Lexical analysis module.
//!
//! This module contains the lexer (tokenizer) that converts source text
//! into tokens for parsing. It handles:
//!
//! - On-demand tokenization, one token per call
//! - Recognition of keywords, identifiers and integer literals
//! - One-character lookahead for `==` and `!=`
//! - Illegal characters, which become `Illegal` tokens instead of errors

pub mod lexer;
pub mod tokens;
