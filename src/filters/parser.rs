//! Filter query parser for list screens.
//!
//! Turns the text typed into a screen's filter box into [`FilterCriteria`].
//!
//! # Syntax
//!
//! ```text
//! filter    := term*
//! term      := field:value | field:"quoted value" | word | "quoted phrase"
//! field     := type | category | since | from | until | to | min | max | is
//! ```
//!
//! Bare words (and quoted phrases) are joined with single spaces into the free-text
//! query. Field names are case-insensitive.
//!
//! # Supported Fields
//!
//! - `type:tip` / `category:Noodles` - exact category match
//! - `since:YYYY-MM-DD` / `from:` - records on or after the date
//! - `until:YYYY-MM-DD` / `to:` - records on or before the date
//! - `min:10` / `max:25.50` - amount or price bounds
//! - `is:available` / `is:required` - boolean flags
//!
//! # Examples
//!
//! ```rust
//! # use delivery_desk::filters::parser::parse_filter;
//! let criteria = parse_filter("type:tip since:2024-01-01 min:5").unwrap();
//! assert_eq!(criteria.category.as_deref(), Some("tip"));
//!
//! let criteria = parse_filter("is:available \"green curry\"").unwrap();
//! assert_eq!(criteria.query.as_deref(), Some("green curry"));
//! ```
//!
//! # Validation
//!
//! - Dates must be YYYY-MM-DD and semantically valid
//! - Malformed amounts are ignored (the bound is left open), never rejected
//! - Unknown fields, empty values, and repeated fields are rejected

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;

use super::criteria::{FilterCriteria, RecordFlag, parse_amount};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    /// field:value or field:"quoted value"
    FieldValue { field: String, value: String },
    /// Bare word or quoted phrase
    Word(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FilterField {
    Category,
    Since,
    Until,
    Min,
    Max,
    Is,
}

fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&ch) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }

        let word = read_word(&mut chars);

        if word.starts_with('"') {
            let phrase = read_quoted_value(&mut chars, &word)?;
            if !phrase.trim().is_empty() {
                tokens.push(Token::Word(phrase));
            }
            continue;
        }

        if let Some(colon_pos) = word.find(':') {
            let field = word[..colon_pos].to_string();
            let mut value = word[colon_pos + 1..].to_string();

            if value.starts_with('"') {
                value = read_quoted_value(&mut chars, &value)?;
            }

            if field.is_empty() || value.is_empty() {
                return Err(anyhow!("Invalid field:value format: {}", word));
            }

            tokens.push(Token::FieldValue { field, value });
        } else {
            tokens.push(Token::Word(word));
        }
    }

    Ok(tokens)
}

/// Read a word (until whitespace or end)
fn read_word(chars: &mut std::iter::Peekable<std::str::Chars>) -> String {
    let mut word = String::new();

    while let Some(&ch) = chars.peek() {
        if ch.is_whitespace() {
            break;
        }
        word.push(ch);
        chars.next();
    }

    word
}

/// Read a quoted value; `initial` is the already-consumed part starting with the quote
fn read_quoted_value(
    chars: &mut std::iter::Peekable<std::str::Chars>,
    initial: &str,
) -> Result<String> {
    let mut value = initial[1..].to_string();

    if let Some(quote_pos) = value.find('"') {
        return Ok(value[..quote_pos].to_string());
    }

    for ch in chars.by_ref() {
        if ch == '"' {
            return Ok(value);
        }
        value.push(ch);
    }

    Err(anyhow!("Unterminated quoted string"))
}

fn parse_field(field: &str) -> Result<FilterField> {
    match field.to_lowercase().as_str() {
        "type" | "category" => Ok(FilterField::Category),
        "since" | "from" => Ok(FilterField::Since),
        "until" | "to" => Ok(FilterField::Until),
        "min" => Ok(FilterField::Min),
        "max" => Ok(FilterField::Max),
        "is" => Ok(FilterField::Is),
        _ => Err(anyhow!(
            "Unknown field: '{}' (valid fields: type, category, since, until, min, max, is)",
            field
        )),
    }
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    // Strict YYYY-MM-DD (10 chars); chrono rejects days that don't exist
    if value.len() != 10 {
        return Err(anyhow!("Invalid date format: '{}' (expected YYYY-MM-DD)", value));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| anyhow!("Invalid date format: '{}' (expected YYYY-MM-DD)", value))
}

fn parse_flag(value: &str) -> Result<RecordFlag> {
    match value.to_lowercase().as_str() {
        "available" => Ok(RecordFlag::Available),
        "required" => Ok(RecordFlag::Required),
        _ => Err(anyhow!("Invalid flag: '{}' (must be 'available' or 'required')", value)),
    }
}

/// Parse filter text into [`FilterCriteria`]
pub fn parse_filter(input: &str) -> Result<FilterCriteria> {
    if input.trim().is_empty() {
        return Ok(FilterCriteria::new());
    }

    let tokens = tokenize(input).context("Failed to tokenize filter")?;

    let mut criteria = FilterCriteria::new();
    let mut words: Vec<String> = Vec::new();
    let mut seen: Vec<FilterField> = Vec::new();

    for token in tokens {
        match token {
            Token::Word(word) => words.push(word),
            Token::FieldValue { field, value } => {
                let filter_field = parse_field(&field)?;

                if filter_field != FilterField::Is {
                    if seen.contains(&filter_field) {
                        return Err(anyhow!("Field '{}' given more than once", field));
                    }
                    seen.push(filter_field);
                }

                match filter_field {
                    FilterField::Category => criteria.category = Some(value),
                    FilterField::Since => criteria.date_range.start = Some(parse_date(&value)?),
                    FilterField::Until => criteria.date_range.end = Some(parse_date(&value)?),
                    FilterField::Min => criteria.amount_range.min = parse_amount(&value),
                    FilterField::Max => criteria.amount_range.max = parse_amount(&value),
                    FilterField::Is => criteria = criteria.with_flag(parse_flag(&value)?),
                }
            }
        }
    }

    if !words.is_empty() {
        criteria.query = Some(words.join(" "));
    }

    Ok(criteria)
}
