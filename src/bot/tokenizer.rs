//! Shell-style argument splitting for chat commands.
//!
//! `!get_anime "Attack on Titan" tags` yields `["Attack on Titan", "tags"]`.
//! Double and single quotes group words. Outside quotes a backslash takes the
//! next character literally; inside double quotes it only escapes `"` and `\`
//! and is kept before any other character.

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::is_not,
    character::complete::{anychar, char, multispace0, multispace1},
    combinator::{all_consuming, map, opt},
    multi::{many0, many1, separated_list0},
    sequence::{delimited, preceded},
};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenizeError {
    #[error("No closing quotation")]
    UnbalancedQuotes,

    #[error("No escaped character")]
    TrailingEscape,
}

fn escaped(input: &str) -> IResult<&str, String> {
    map(preceded(char('\\'), anychar), String::from).parse(input)
}

fn single_quoted(input: &str) -> IResult<&str, String> {
    map(
        delimited(char('\''), opt(is_not("'")), char('\'')),
        |inner: Option<&str>| inner.unwrap_or_default().to_string(),
    )
    .parse(input)
}

fn escaped_in_double_quotes(input: &str) -> IResult<&str, String> {
    map(preceded(char('\\'), anychar), |c| match c {
        '"' | '\\' => String::from(c),
        other => format!("\\{other}"),
    })
    .parse(input)
}

fn double_quoted(input: &str) -> IResult<&str, String> {
    map(
        delimited(
            char('"'),
            many0(alt((
                map(is_not("\"\\"), str::to_string),
                escaped_in_double_quotes,
            ))),
            char('"'),
        ),
        |parts: Vec<String>| parts.concat(),
    )
    .parse(input)
}

fn bare(input: &str) -> IResult<&str, String> {
    map(is_not(" \t\r\n\"'\\"), str::to_string).parse(input)
}

/// One argument: adjacent quoted and unquoted segments glue together.
fn word(input: &str) -> IResult<&str, String> {
    map(
        many1(alt((double_quoted, single_quoted, escaped, bare))),
        |parts: Vec<String>| parts.concat(),
    )
    .parse(input)
}

pub fn tokenize(input: &str) -> Result<Vec<String>, TokenizeError> {
    all_consuming(delimited(
        multispace0,
        separated_list0(multispace1, word),
        multispace0,
    ))
    .parse(input)
    .map(|(_, words)| words)
    .map_err(|_| classify_failure(input))
}

/// The grammar only rejects input that ends inside a quote or right after a
/// backslash; replay the quoting state to tell which.
fn classify_failure(input: &str) -> TokenizeError {
    let mut quote: Option<char> = None;
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some('\''), '\'') => quote = None,
            (Some('\''), _) => {}
            (_, '\\') => {
                if chars.next().is_none() {
                    return TokenizeError::TrailingEscape;
                }
            }
            (Some('"'), '"') => quote = None,
            (None, '"' | '\'') => quote = Some(c),
            _ => {}
        }
    }

    TokenizeError::UnbalancedQuotes
}
