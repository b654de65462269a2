// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use nom::bytes::complete::{tag, take_while, take_while1};
use nom::character::complete::{char, digit1};
use nom::combinator::{map_res, opt, recognize};
use nom::sequence::{delimited, pair};
use nom::IResult;

pub(crate) fn parse_ident(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| {
        c.is_alphanumeric() || c == '_' || c == '-' || c == ' ' || c == ':' || c == '\''
    })(input)
}

pub(crate) fn parse_movie_id(input: &str) -> IResult<&str, i32> {
    map_res(digit1, |s: &str| s.parse::<i32>())(input)
}

pub(crate) fn parse_count(input: &str) -> IResult<&str, usize> {
    map_res(digit1, |s: &str| s.parse::<usize>())(input)
}

pub(crate) fn parse_score(input: &str) -> IResult<&str, f64> {
    map_res(
        recognize(pair(digit1, opt(pair(char('.'), digit1)))),
        |s: &str| s.parse::<f64>(),
    )(input)
}

pub(crate) fn parse_separator(input: &str) -> IResult<&str, &str> {
    delimited(
        take_while(|c: char| c == ' '),
        tag(","),
        take_while(|c: char| c == ' '),
    )(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_idents() {
        let parsed = parse_ident("toy story");
        let expected = ("", "toy story");

        assert_eq!(parsed, Ok(expected));

        let parsed = parse_ident("heat (1995)");
        let expected = ("(1995)", "heat ");

        assert_eq!(parsed, Ok(expected));
    }

    #[test]
    fn test_parse_movie_ids() {
        let parsed = parse_movie_id("12345");
        let expected = ("", 12345);

        assert_eq!(parsed, Ok(expected));

        let parsed = parse_movie_id("12c3");
        let expected = ("c3", 12);
        assert_eq!(parsed, Ok(expected));
    }

    #[test]
    fn test_parse_scores() {
        let parsed = parse_score("4.5");
        assert_eq!(parsed, Ok(("", 4.5)));

        let parsed = parse_score("3");
        assert_eq!(parsed, Ok(("", 3.0)));

        let parsed = parse_score("2.5)");
        assert_eq!(parsed, Ok((")", 2.5)));
    }

    #[test]
    fn test_parse_separators() {
        let parsed = parse_separator(" , 4");
        assert_eq!(parsed, Ok(("4", ",")));
    }
}
