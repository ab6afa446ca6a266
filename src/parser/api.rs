use pest::error::{Error, ErrorVariant};
use pest::iterators::Pair;
use pest::{Parser, Position};
use pest_derive::Parser;

use super::ast::*;
use crate::runner::ds::error::ResolveError;

#[derive(Parser)]
#[grammar = "parser/path_grammar.pest"] // relative to src
pub struct PathParser;

/// Deepest `[..]` or `(..)` nesting accepted before parsing starts.
pub const MAX_NESTING: usize = 64;

impl PathParser {
    pub fn parse_to_ast_from_str(source: &str) -> Result<Expr, ResolveError> {
        parse_to_ast(source).map_err(|e| ResolveError::Syntax(e.to_string()))
    }
}

pub fn parse_to_ast(source: &str) -> Result<Expr, Error<Rule>> {
    check_nesting(source)?;
    let expression = match PathParser::parse(Rule::expression, source)?.next() {
        Some(pair) => pair,
        None => return Err(get_empty_input_error(source)),
    };
    let err = get_unexpected_error(0, &expression);
    let inner = expression
        .into_inner()
        .find(|p| p.as_rule() != Rule::EOI)
        .ok_or(err)?;
    build_ast_from_value_expr(inner)
}

/// Rejects bracket and call nesting beyond [`MAX_NESTING`]. Quoted text is skipped.
fn check_nesting(source: &str) -> Result<(), Error<Rule>> {
    let mut depth = 0usize;
    let mut quote = None;
    let mut chars = source.char_indices();
    while let Some((pos, c)) = chars.next() {
        match (quote, c) {
            (Some(_), '\\') => {
                chars.next();
            }
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'') | (None, '"') => quote = Some(c),
            (None, '[') | (None, '(') => {
                depth += 1;
                if depth > MAX_NESTING {
                    return Err(get_nesting_error(source, pos));
                }
            }
            (None, ']') | (None, ')') => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    Ok(())
}

fn get_nesting_error(source: &str, pos: usize) -> Error<Rule> {
    let message = format!("expression nested deeper than {} levels", MAX_NESTING);
    let position = Position::new(source, pos).unwrap_or_else(|| Position::from_start(source));
    Error::new_from_pos(ErrorVariant::CustomError { message }, position)
}

fn get_empty_input_error(source: &str) -> Error<Rule> {
    let message = "empty expression".to_string();
    Error::new_from_pos(ErrorVariant::CustomError { message }, Position::from_start(source))
}

fn get_unexpected_error(id: i32, pair: &Pair<Rule>) -> Error<Rule> {
    let message = format!("Unexpected state reached [{:?}] - {}", pair.as_rule(), id);
    Error::new_from_span(ErrorVariant::CustomError { message }, pair.as_span())
}

fn get_invalid_literal_error(pair: &Pair<Rule>, reason: &str) -> Error<Rule> {
    let message = format!("invalid literal {}: {}", pair.as_str(), reason);
    Error::new_from_span(ErrorVariant::CustomError { message }, pair.as_span())
}

fn build_ast_from_value_expr(pair: Pair<Rule>) -> Result<Expr, Error<Rule>> {
    Ok(match pair.as_rule() {
        Rule::path => Expr::Path(build_ast_from_path(pair)?),
        Rule::null_literal => Expr::Literal(Literal::Null),
        Rule::boolean_literal => Expr::Literal(Literal::Boolean(pair.as_str() == "true")),
        Rule::integer_literal => Expr::Literal(Literal::Integer(
            pair.as_str()
                .parse::<i64>()
                .map_err(|e| get_invalid_literal_error(&pair, &e.to_string()))?,
        )),
        Rule::float_literal => Expr::Literal(Literal::Float(
            pair.as_str()
                .parse::<f64>()
                .map_err(|e| get_invalid_literal_error(&pair, &e.to_string()))?,
        )),
        Rule::string_literal => Expr::Literal(Literal::String(build_string_literal(pair)?)),
        _ => return Err(get_unexpected_error(1, &pair)),
    })
}

fn build_ast_from_path(pair: Pair<Rule>) -> Result<PathExpr, Error<Rule>> {
    let err = get_unexpected_error(2, &pair);
    let mut pair_iter = pair.into_inner();
    let root_pair = pair_iter.next().ok_or(err)?;
    let root = match root_pair.as_rule() {
        Rule::identifier => Root::Identifier(root_pair.as_str().to_string()),
        Rule::function_call => Root::Call(build_ast_from_function_call(root_pair)?),
        _ => return Err(get_unexpected_error(2, &root_pair)),
    };
    let mut segments = vec![];
    for segment_pair in pair_iter {
        segments.push(match segment_pair.as_rule() {
            Rule::property_segment => {
                let name = segment_pair
                    .clone()
                    .into_inner()
                    .next()
                    .ok_or_else(|| get_unexpected_error(3, &segment_pair))?;
                Segment::Property(name.as_str().to_string())
            }
            Rule::index_segment => {
                let index = segment_pair
                    .clone()
                    .into_inner()
                    .next()
                    .ok_or_else(|| get_unexpected_error(4, &segment_pair))?;
                Segment::Index(Box::new(build_ast_from_value_expr(index)?))
            }
            _ => return Err(get_unexpected_error(5, &segment_pair)),
        });
    }
    Ok(PathExpr { root, segments })
}

fn build_ast_from_function_call(pair: Pair<Rule>) -> Result<FunctionCall, Error<Rule>> {
    let err = get_unexpected_error(6, &pair);
    let mut pair_iter = pair.into_inner();
    let prefix = pair_iter.next().ok_or_else(|| err.clone())?.as_str().to_string();
    let name = pair_iter.next().ok_or_else(|| err.clone())?.as_str().to_string();
    let mut arguments = vec![];
    if let Some(args_pair) = pair_iter.next() {
        for arg in args_pair.into_inner() {
            arguments.push(build_ast_from_value_expr(arg)?);
        }
    }
    Ok(FunctionCall {
        prefix,
        name,
        arguments,
    })
}

fn build_string_literal(pair: Pair<Rule>) -> Result<String, Error<Rule>> {
    let err = get_unexpected_error(7, &pair);
    let body = pair.into_inner().next().ok_or(err)?;
    let mut s = String::with_capacity(body.as_str().len());
    let mut chars = body.as_str().chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            s.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => s.push('\n'),
            Some('t') => s.push('\t'),
            Some('r') => s.push('\r'),
            Some('0') => s.push('\0'),
            Some(other) => s.push(other),
            None => return Err(get_invalid_literal_error(&body, "dangling escape")),
        }
    }
    Ok(s)
}
