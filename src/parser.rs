// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

mod basics;

use crate::parser::basics::{
    parse_count, parse_ident, parse_movie_id, parse_score, parse_separator,
};
use controller::SearchBy;
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::char;
use nom::sequence::{delimited, tuple};
use nom::IResult;

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    QueryMovie(SearchBy),
    Rate(i32, f64),
    Unrate(i32),
    Recommend(usize),
}

fn parse_searchby(input: &str) -> IResult<&str, SearchBy> {
    let (input, index_type) = alt((tag("id"), tag("name")))(input)?;
    let (input, index) = delimited(char('('), parse_ident, char(')'))(input)?;

    let searchby = match index_type {
        "id" => SearchBy::id(index),
        _ => SearchBy::name(index),
    };

    Ok((input, searchby))
}

fn parse_statement(input: &str) -> IResult<&str, Statement> {
    let (input, statement_type) = alt((
        tag("movie"),
        tag("unrate"),
        tag("rate"),
        tag("recommend"),
    ))(input)?;

    let (input, statement) = match statement_type {
        "movie" => {
            let (input, searchby) = delimited(char('('), parse_searchby, char(')'))(input)?;
            (input, Statement::QueryMovie(searchby))
        }

        "rate" => {
            let (input, (movie_id, _, score)) = delimited(
                char('('),
                tuple((parse_movie_id, parse_separator, parse_score)),
                char(')'),
            )(input)?;

            (input, Statement::Rate(movie_id, score))
        }

        "unrate" => {
            let (input, movie_id) = delimited(char('('), parse_movie_id, char(')'))(input)?;
            (input, Statement::Unrate(movie_id))
        }

        _ => {
            let (input, count) = delimited(char('('), parse_count, char(')'))(input)?;
            (input, Statement::Recommend(count))
        }
    };

    Ok((input, statement))
}

pub fn parse_line(input: &str) -> Option<Statement> {
    let input = input.trim();
    let (rest, statement) = parse_statement(input).ok()?;

    if rest.is_empty() {
        Some(statement)
    } else {
        None
    }
}
