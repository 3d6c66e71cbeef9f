use crate::{
    ast::{
        ast::{Predicate, Probe},
        expressions::{Expr, ExprKind},
        statements::{AssignMapCallStmt, AssignMapStmt, ExpressionStmt, Stmt},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
    Span,
};

use super::parser::Parser;

/// Parses `provider[:attach_point] [/predicate/] { stmts }`.
pub fn parse_probe(parser: &mut Parser) -> Result<Probe, Error> {
    let error = Error::new(
        ErrorImpl::UnexpectedTokenDetailed {
            token: parser.current_token().value.clone(),
            message: String::from("expected probe type"),
        },
        parser.get_position(),
    );
    let provider = parser.expect_error(TokenKind::Identifier, Some(error))?;

    let attach_point = if parser.current_token_kind() == TokenKind::Colon {
        parser.advance();
        Some(parser.expect(TokenKind::Identifier)?.value)
    } else {
        None
    };

    let predicate = if parser.current_token_kind() == TokenKind::Slash {
        Some(parse_predicate(parser)?)
    } else {
        None
    };

    let (stmts, end) = parse_block(parser)?;

    Ok(Probe {
        provider: provider.value,
        attach_point,
        predicate,
        stmts,
        span: Span {
            start: provider.span.start,
            end: end.end,
        },
    })
}

pub fn parse_predicate(parser: &mut Parser) -> Result<Predicate, Error> {
    let open = parser.expect(TokenKind::Slash)?;
    let expr = parser.within_predicate(|parser| parse_expr(parser, BindingPower::Default))?;
    let close = parser.expect(TokenKind::Slash)?;

    Ok(Predicate {
        expr,
        span: Span {
            start: open.span.start,
            end: close.span.end,
        },
    })
}

/// Parses `{ stmt; stmt; ... }`, returning the statements and the span of
/// the closing brace. The final semicolon is optional.
pub fn parse_block(parser: &mut Parser) -> Result<(Vec<Stmt>, Span), Error> {
    parser.expect(TokenKind::OpenCurly)?;

    let mut stmts = vec![];

    loop {
        while parser.current_token_kind() == TokenKind::Semicolon {
            parser.advance();
        }

        if parser.current_token_kind() == TokenKind::CloseCurly {
            break;
        }

        stmts.push(parse_stmt(parser)?);

        match parser.current_token_kind() {
            TokenKind::Semicolon | TokenKind::CloseCurly => {}
            _ => return Err(parser.unexpected_token()),
        }
    }

    let close = parser.expect(TokenKind::CloseCurly)?;
    Ok((stmts, close.span))
}

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let expr = parse_expr(parser, BindingPower::Default)?;

    if parser.current_token_kind() != TokenKind::Assignment {
        let span = expr.span.clone();
        return Ok(Stmt::Expression(ExpressionStmt {
            expression: expr,
            span,
        }));
    }

    let assignment = parser.advance();
    let map = match expr.kind {
        ExprKind::Map(map) => map,
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: assignment.value,
                    message: String::from("only maps can be assigned to"),
                },
                assignment.span.start,
            ))
        }
    };

    let value = parse_expr(parser, BindingPower::Default)?;
    let span = Span {
        start: map.span.start.clone(),
        end: value.span.end.clone(),
    };

    match value.kind {
        ExprKind::Call(call) => Ok(Stmt::AssignMapCall(AssignMapCallStmt { map, call, span })),
        kind => Ok(Stmt::AssignMap(AssignMapStmt {
            map,
            value: Expr::new(kind, value.span),
            span,
        })),
    }
}
