use crate::{
    ast::expressions::{BinaryExpr, BinaryOp, CallExpr, Expr, ExprKind, MapExpr, UnaryExpr, UnaryOp},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_nud_lookup().get(&token_kind) {
        Some(nud) => *nud,
        None => return Err(parser.unexpected_token()),
    };

    let mut left = nud(parser)?;

    // While the next operator binds tighter than `bp`, keep extending lhs
    loop {
        let token_kind = parser.current_token_kind();
        if parser.ends_predicate(token_kind) {
            break;
        }

        let next_bp = match parser.get_bp_lookup().get(&token_kind) {
            Some(next_bp) if *next_bp > bp => *next_bp,
            _ => break,
        };

        let led = match parser.get_led_lookup().get(&token_kind) {
            Some(led) => *led,
            None => break,
        };

        left = led(parser, left, next_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    match parser.current_token_kind() {
        TokenKind::Number => {
            let value = parse_integer(&parser.current_token().value);

            match value {
                Some(value) => Ok(Expr::new(ExprKind::Integer(value), parser.advance().span)),
                None => Err(Error::new(
                    ErrorImpl::NumberParseError {
                        token: parser.current_token().value.clone(),
                    },
                    parser.get_position(),
                )),
            }
        }
        TokenKind::Identifier if parser.peek_kind(1) == TokenKind::OpenParen => {
            let call = parse_call(parser)?;
            let span = call.span.clone();
            Ok(Expr::new(ExprKind::Call(call), span))
        }
        TokenKind::Identifier => {
            let token = parser.advance();
            Ok(Expr::new(ExprKind::Builtin(token.value), token.span))
        }
        _ => Err(parser.unexpected_token()),
    }
}

fn parse_integer(value: &str) -> Option<i64> {
    match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => i64::from_str_radix(hex, 16).ok(),
        None => value.parse().ok(),
    }
}

/// Parses `name(arg, ...)`.
pub fn parse_call(parser: &mut Parser) -> Result<CallExpr, Error> {
    let name = parser.expect(TokenKind::Identifier)?;
    parser.expect(TokenKind::OpenParen)?;

    let args = parser.nested(|parser| parse_expr_list(parser, TokenKind::CloseParen))?;
    let close = parser.expect(TokenKind::CloseParen)?;

    Ok(CallExpr {
        func: name.value,
        args,
        span: Span {
            start: name.span.start,
            end: close.span.end,
        },
    })
}

/// Parses `@name` or `@name[key, ...]`.
pub fn parse_map(parser: &mut Parser) -> Result<MapExpr, Error> {
    let ident = parser.expect(TokenKind::MapIdent)?;

    if parser.current_token_kind() != TokenKind::OpenBracket {
        return Ok(MapExpr {
            ident: ident.value,
            args: vec![],
            span: ident.span,
        });
    }

    parser.advance();
    let args = parser.nested(|parser| parse_expr_list(parser, TokenKind::CloseBracket))?;
    if args.is_empty() {
        return Err(Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: parser.current_token().value.clone(),
                message: String::from("expected at least one map key"),
            },
            parser.get_position(),
        ));
    }
    let close = parser.expect(TokenKind::CloseBracket)?;

    Ok(MapExpr {
        ident: ident.value,
        args,
        span: Span {
            start: ident.span.start,
            end: close.span.end,
        },
    })
}

/// Parses comma separated expressions up to (not including) `close`.
fn parse_expr_list(parser: &mut Parser, close: TokenKind) -> Result<Vec<Expr>, Error> {
    let mut exprs = vec![];

    if parser.current_token_kind() == close {
        return Ok(exprs);
    }

    loop {
        exprs.push(parse_expr(parser, BindingPower::Default)?);

        if parser.current_token_kind() != TokenKind::Comma {
            return Ok(exprs);
        }
        parser.advance();
    }
}

pub fn parse_map_ref_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let map = parse_map(parser)?;
    let span = map.span.clone();
    Ok(Expr::new(ExprKind::Map(map), span))
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let operator = BinaryOp::from_token(operator_token.kind).ok_or_else(|| {
        Error::new(
            ErrorImpl::UnexpectedToken {
                token: operator_token.value.clone(),
            },
            operator_token.span.start.clone(),
        )
    })?;

    let right = parse_expr(parser, bp)?;

    let span = Span {
        start: left.span.start.clone(),
        end: right.span.end.clone(),
    };

    Ok(Expr::new(
        ExprKind::Binary(BinaryExpr {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }),
        span,
    ))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let operator = UnaryOp::from_token(operator_token.kind).ok_or_else(|| {
        Error::new(
            ErrorImpl::UnexpectedToken {
                token: operator_token.value.clone(),
            },
            operator_token.span.start.clone(),
        )
    })?;

    let rhs = parse_expr(parser, BindingPower::Unary)?;

    let span = Span {
        start: operator_token.span.start,
        end: rhs.span.end.clone(),
    };

    Ok(Expr::new(
        ExprKind::Unary(UnaryExpr {
            operator,
            expr: Box::new(rhs),
        }),
        span,
    ))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();
    let expr = parser.nested(|parser| parse_expr(parser, BindingPower::Default))?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}
