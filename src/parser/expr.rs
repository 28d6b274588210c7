use std::io::Read;

use crate::{ast::ast::Expr, errors::errors::Error, lexer::tokens::Token};

use super::parser::Parser;

/// expr := primary binopRHS
pub fn parse_expr<R: Read>(parser: &mut Parser<R>) -> Result<Expr, Error> {
    let lhs = parse_primary(parser)?;
    parse_binop_rhs(parser, 0, lhs)
}

/// Precedence climbing over a chain of infix operators.
///
/// Consumes `op primary` pairs while the operator's binding strength is at
/// least `min_precedence`. When the operator after `rhs` binds tighter than
/// the one just consumed, the tighter chain is absorbed into `rhs` first;
/// otherwise pairs fold left-associatively.
fn parse_binop_rhs<R: Read>(
    parser: &mut Parser<R>,
    min_precedence: i32,
    mut lhs: Expr,
) -> Result<Expr, Error> {
    loop {
        let precedence = match parser.current_precedence() {
            Some(precedence) if precedence >= min_precedence => precedence,
            _ => return Ok(lhs),
        };

        let op = match parser.current_token() {
            Token::Char(op) => *op,
            _ => return Ok(lhs),
        };
        parser.advance();

        let mut rhs = parse_primary(parser)?;

        if let Some(next_precedence) = parser.current_precedence() {
            if next_precedence > precedence {
                rhs = parse_binop_rhs(parser, precedence + 1, rhs)?;
            }
        }

        lhs = Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        };
    }
}

/// primary := number | identifier call? | '(' expr ')' | ifExpr | forExpr
///
/// An identifier is a call exactly when the next token is '('; there is no
/// backtracking.
pub fn parse_primary<R: Read>(parser: &mut Parser<R>) -> Result<Expr, Error> {
    match parser.current_token().clone() {
        Token::Number(value) => {
            parser.advance();
            Ok(Expr::Number(value))
        }
        Token::Identifier(name) => {
            parser.advance();
            if *parser.current_token() == Token::Char('(') {
                parse_call_args(parser, name)
            } else {
                Ok(Expr::Variable(name))
            }
        }
        Token::Char('(') => parse_paren_expr(parser),
        Token::If => parse_if_expr(parser),
        Token::For => parse_for_expr(parser),
        _ => Err(Error::ExpectedExpression),
    }
}

fn parse_call_args<R: Read>(parser: &mut Parser<R>, callee: String) -> Result<Expr, Error> {
    parser.advance(); // eat '('

    let mut args = vec![];
    if *parser.current_token() != Token::Char(')') {
        loop {
            args.push(parse_expr(parser)?);
            match parser.current_token() {
                Token::Char(')') => break,
                Token::Char(',') => {
                    parser.advance();
                }
                _ => return Err(Error::ExpectedArgumentDelimiter),
            }
        }
    }
    parser.advance(); // eat ')'

    Ok(Expr::Call { callee, args })
}

fn parse_paren_expr<R: Read>(parser: &mut Parser<R>) -> Result<Expr, Error> {
    parser.advance(); // eat '('
    let expr = parse_expr(parser)?;
    parser.expect(Token::Char(')'), Error::ExpectedCloseParen)?;
    Ok(expr)
}

/// ifExpr := 'if' expr 'then' expr 'else' expr
fn parse_if_expr<R: Read>(parser: &mut Parser<R>) -> Result<Expr, Error> {
    parser.advance(); // eat 'if'

    let cond = parse_expr(parser)?;
    parser.expect(Token::Then, Error::ExpectedThen)?;
    let then = parse_expr(parser)?;
    parser.expect(Token::Else, Error::ExpectedElse)?;
    let otherwise = parse_expr(parser)?;

    Ok(Expr::If {
        cond: Box::new(cond),
        then: Box::new(then),
        otherwise: Box::new(otherwise),
    })
}

/// forExpr := 'for' identifier '=' expr ',' expr (',' expr)? 'in' expr
fn parse_for_expr<R: Read>(parser: &mut Parser<R>) -> Result<Expr, Error> {
    parser.advance(); // eat 'for'

    let var = match parser.current_token().clone() {
        Token::Identifier(name) => name,
        _ => return Err(Error::ExpectedForVariable),
    };
    parser.advance();

    parser.expect(Token::Char('='), Error::ExpectedForAssignment)?;
    let start = parse_expr(parser)?;
    parser.expect(Token::Char(','), Error::ExpectedForDelimiter)?;
    let end = parse_expr(parser)?;

    // The step is optional
    let step = if *parser.current_token() == Token::Char(',') {
        parser.advance();
        Some(Box::new(parse_expr(parser)?))
    } else {
        None
    };

    parser.expect(Token::In, Error::ExpectedForIn)?;
    let body = parse_expr(parser)?;

    Ok(Expr::For {
        var,
        start: Box::new(start),
        end: Box::new(end),
        step,
        body: Box::new(body),
    })
}
