//! The Parser module walks a token stream from the lexer against the
//! Teeny grammar, validating labels and identifiers as it goes.
//!
//! ```text
//! program     ::= {statement}
//! statement   ::= "PRINT" (expression | STRING) nl
//!               | "IF" comparison "THEN" nl statement nl "ENDIF" nl
//!               | "WHILE" comparison "REPEAT" nl {statement nl} "ENDWHILE" nl
//!               | "LABEL" IDENT nl
//!               | "GOTO" IDENT nl
//!               | "LET" IDENT "=" expression nl
//!               | "INPUT" IDENT nl
//! comparison  ::= expression comparator expression {comparator expression}
//! expression  ::= term [("+" | "-") term]
//! term        ::= unary [("/" | "*") unary]
//! unary       ::= ["+" | "-"] primary
//! primary     ::= NUMBER | IDENT
//! ```
//!
//! `expression` and `term` take at most one trailing operator, and IF wraps
//! exactly one statement.
use super::error::ParseError;
use super::lexer::{Token, TokenKind};
use super::symbols::SymbolTable;
use super::trace::Trace;

pub struct Parser<'t> {
    tokens:  Vec<Token>,
    pos:     usize,
    symbols: SymbolTable,
    trace:   &'t mut Trace,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: Vec<Token>, trace: &'t mut Trace) -> Self {
        Parser { tokens, pos: 0, symbols: SymbolTable::new(), trace }
    }

    /// Run the parser, consuming itself. On success the populated
    /// symbol table is returned; the first fault ends the run.
    pub fn run(mut self) -> Result<SymbolTable, ParseError> {
        self.trace.record("PROGRAM");
        while self.pos < self.tokens.len() {
            self.statement()?;
            self.newline()?;
        }

        self.symbols.check_labels()?;
        Ok(self.symbols)
    }

    fn statement(&mut self) -> Result<(), ParseError> {
        let kind = self.kind()?;

        match kind {
            TokenKind::Print => {
                self.trace.record("STATEMENT PRINT");
                self.advance()?;
                if self.kind()? == TokenKind::Str {
                    let text = self.current()?.text.clone();
                    self.trace.record(format!("STRING ( {} )", text));
                    self.advance()?;
                } else {
                    self.expression()?;
                }
            }

            TokenKind::If => {
                self.trace.record("STATEMENT IF");
                self.advance()?;
                self.comparison()?;
                self.expect(TokenKind::Then)?;
                self.advance()?;
                self.newline()?;
                self.statement()?;
                self.newline()?;
                self.expect(TokenKind::EndIf)?;
                self.trace.record("ENDIF");
                self.advance()?;
            }

            TokenKind::While => {
                self.trace.record("STATEMENT WHILE");
                self.advance()?;
                self.comparison()?;
                self.expect(TokenKind::Repeat)?;
                self.advance()?;
                self.newline()?;
                while self.kind()? != TokenKind::EndWhile {
                    self.statement()?;
                    self.newline()?;
                }
                self.trace.record("ENDWHILE");
                self.advance()?;
            }

            TokenKind::Label => {
                self.trace.record("STATEMENT LABEL");
                self.advance()?;
                let name = self.ident()?;
                self.symbols.declare_label(&name.text, name.line)?;
                self.advance()?;
            }

            TokenKind::Goto => {
                self.trace.record("STATEMENT GOTO");
                self.advance()?;
                let name = self.ident()?;
                self.symbols.reference_label(&name.text, name.line);
                self.advance()?;
            }

            TokenKind::Let => {
                self.trace.record("STATEMENT LET");
                self.advance()?;
                let name = self.ident()?;
                self.symbols.declare_ident(&name.text);
                self.advance()?;
                self.expect(TokenKind::Eq)?;
                self.advance()?;
                self.expression()?;
            }

            TokenKind::Input => {
                self.trace.record("STATEMENT INPUT");
                self.advance()?;
                let name = self.ident()?;
                self.symbols.declare_ident(&name.text);
                self.advance()?;
            }

            // Anything else is an empty statement; the newline that must
            // follow rejects it unless it is a blank line.
            _ => {}
        }

        Ok(())
    }

    fn comparison(&mut self) -> Result<(), ParseError> {
        self.trace.record("COMPARISON");
        self.expression()?;
        self.comparator()?;
        self.advance()?;
        self.expression()?;

        // A chain keeps going until the tokens run out, not until the
        // end of the line, so it never stops at THEN or REPEAT.
        if self.kind()?.is_comparator() {
            while self.pos < self.tokens.len() {
                self.comparator()?;
                self.advance()?;
                self.expression()?;
            }
        }
        Ok(())
    }

    fn comparator(&mut self) -> Result<(), ParseError> {
        let token = self.current()?;
        if token.kind.is_comparator() {
            let entry = format!("COMPARATOR ( {} )", token.text);
            self.trace.record(entry);
            Ok(())
        } else {
            Err(ParseError::ExpectedComparator { found: token.text.clone(), line: token.line })
        }
    }

    fn expression(&mut self) -> Result<(), ParseError> {
        self.trace.record("EXPRESSION");
        self.term()?;
        if let TokenKind::Plus | TokenKind::Minus = self.kind()? {
            self.advance()?;
            self.term()?;
        }
        Ok(())
    }

    fn term(&mut self) -> Result<(), ParseError> {
        self.trace.record("TERM");
        self.unary()?;
        if let TokenKind::Slash | TokenKind::Asterisk = self.kind()? {
            self.advance()?;
            self.unary()?;
        }
        Ok(())
    }

    fn unary(&mut self) -> Result<(), ParseError> {
        self.trace.record("UNARY");
        if let TokenKind::Plus | TokenKind::Minus = self.kind()? {
            self.advance()?;
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<(), ParseError> {
        let token = self.current()?.clone();
        match token.kind {
            TokenKind::Number => {
                self.trace.record(format!("PRIMARY {}", token));
            }
            TokenKind::Ident => {
                self.symbols.check_ident(&token.text, token.line)?;
                self.trace.record(format!("PRIMARY {}", token));
            }
            kind => {
                return Err(ParseError::ExpectedPrimary { kind, found: token.text, line: token.line });
            }
        }
        self.advance()
    }

    /// Consumes the NEWLINE closing a statement. The final NEWLINE moves
    /// the cursor past the end, which is how the program loop terminates.
    fn newline(&mut self) -> Result<(), ParseError> {
        self.expect(TokenKind::Newline)?;
        self.trace.record("NEWLINE");
        if self.pos + 1 == self.tokens.len() {
            self.pos += 1;
            Ok(())
        } else {
            self.advance()
        }
    }

    /// Checks that the current token is an identifier and returns it.
    fn ident(&mut self) -> Result<Token, ParseError> {
        self.expect(TokenKind::Ident)?;
        let token = self.current()?.clone();
        self.trace.record(format!("{}", token));
        Ok(token)
    }

    fn expect(&self, expected: TokenKind) -> Result<(), ParseError> {
        let token = self.current()?;
        if token.kind != expected {
            return Err(ParseError::UnexpectedToken { expected, found: token.kind, line: token.line });
        }
        Ok(())
    }

    #[inline]
    fn current(&self) -> Result<&Token, ParseError> {
        self.tokens.get(self.pos).ok_or(ParseError::UnexpectedEof)
    }

    #[inline]
    fn kind(&self) -> Result<TokenKind, ParseError> {
        self.current().map(|t| t.kind)
    }

    /// Moves to the next token. Running off the end is an error.
    fn advance(&mut self) -> Result<(), ParseError> {
        if self.pos + 1 >= self.tokens.len() {
            self.pos = self.tokens.len();
            return Err(ParseError::UnexpectedEof);
        }
        self.pos += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::lexer::tokenize;
    use super::super::lexer::TokenKind::*;

    fn parse(source: &str) -> Result<SymbolTable, ParseError> {
        let mut trace = Trace::new();
        let tokens = tokenize(source, &mut trace).expect("source should tokenize");
        Parser::new(tokens, &mut trace).run()
    }

    fn unexpected(expected: TokenKind, found: TokenKind, line: usize) -> Result<(), ParseError> {
        Err(ParseError::UnexpectedToken { expected, found, line })
    }

    #[test]
    fn test_empty_program() {
        assert!(parse("").is_ok());
        assert!(parse("\n\n# only a comment\n").is_ok());
    }

    #[test]
    fn test_print() {
        assert!(parse("PRINT 5\n").is_ok());
        assert!(parse("PRINT \"hello, world\"\n").is_ok());
        assert!(parse("PRINT -5 * 3 + 2").is_ok());
        assert!(parse("INPUT a\nPRINT a / 2 - a\n").is_ok());
    }

    #[test]
    fn test_let_and_input() {
        let table = parse("LET x = 1\nINPUT y\nLET z = x + y\nLET x = z\n").unwrap();
        assert_eq!(table.declared_idents(), vec!["x".to_string(), "y".to_string(), "z".to_string()]);

        // The name is declared before its initializer is parsed.
        assert!(parse("LET x = x\n").is_ok());

        assert_eq!(parse("LET x 5\n").map(|_| ()), unexpected(Eq, Number, 1));
        assert_eq!(parse("LET 5 = 5\n").map(|_| ()), unexpected(Ident, Number, 1));
        assert_eq!(parse("INPUT \"x\"\n").map(|_| ()), unexpected(Ident, Str, 1));
    }

    #[test]
    fn test_declare_before_use() {
        assert_eq!(
            parse("PRINT y").map(|_| ()),
            Err(ParseError::UndeclaredIdent { name: "y".to_string(), line: 1 })
        );
        assert_eq!(
            parse("LET x = 1\nPRINT x\nPRINT x + y\nINPUT y\n").map(|_| ()),
            Err(ParseError::UndeclaredIdent { name: "y".to_string(), line: 3 })
        );
        assert_eq!(
            parse("IF a > 1 THEN\nPRINT 1\nENDIF\n").map(|_| ()),
            Err(ParseError::UndeclaredIdent { name: "a".to_string(), line: 1 })
        );
    }

    #[test]
    fn test_labels() {
        let table = parse("LABEL start\nGOTO start\nGOTO finish\nLABEL finish\n").unwrap();
        assert_eq!(table.declared_labels(), vec!["finish".to_string(), "start".to_string()]);
        assert_eq!(table.referenced_labels(), vec!["finish".to_string(), "start".to_string()]);

        assert_eq!(
            parse("LABEL a\nPRINT 1\nLABEL a\n").map(|_| ()),
            Err(ParseError::DuplicateLabel { name: "a".to_string(), line: 3 })
        );
        assert_eq!(
            parse("LABEL a\nGOTO a\nGOTO b\n").map(|_| ()),
            Err(ParseError::UndeclaredLabel { name: "b".to_string(), line: 3 })
        );
        assert_eq!(parse("GOTO 10\n").map(|_| ()), unexpected(Ident, Number, 1));
    }

    #[test]
    fn test_undeclared_label_after_full_traversal() {
        // The label check only runs once every token is consumed, so a
        // later syntax error wins over an earlier dangling GOTO.
        assert_eq!(parse("GOTO nowhere\nLET\n").map(|_| ()), unexpected(Ident, Newline, 2));
    }

    #[test]
    fn test_if() {
        assert!(parse("LET x = 1\nIF x == 1 THEN\nPRINT x\nENDIF\n").is_ok());
        assert!(parse("IF 1 != 2 THEN\nIF 2 <= 3 THEN\nPRINT \"nested\"\nENDIF\nENDIF\n").is_ok());

        // Exactly one statement between THEN and ENDIF.
        assert_eq!(
            parse("IF 1 < 2 THEN\nPRINT 1\nPRINT 2\nENDIF\n").map(|_| ()),
            unexpected(EndIf, Print, 3)
        );
        assert_eq!(parse("IF 1 < 2 THEN\nENDIF\n").map(|_| ()), unexpected(Newline, EndIf, 2));
        assert_eq!(parse("IF 1 < 2\nPRINT 1\nENDIF\n").map(|_| ()), unexpected(Then, Newline, 1));
        assert_eq!(parse("IF 1 < 2 THEN PRINT 1\nENDIF\n").map(|_| ()), unexpected(Newline, Print, 1));
    }

    #[test]
    fn test_while() {
        assert!(parse("WHILE 1 < 2 REPEAT\nENDWHILE\n").is_ok());
        assert!(parse(
            "LET n = 0\nWHILE n < 10 REPEAT\nPRINT n\nLET n = n + 1\nIF n == 5 THEN\nPRINT \"half\"\nENDIF\nENDWHILE\n"
        ).is_ok());
        assert!(parse("WHILE 1 < 2 REPEAT\nWHILE 2 < 3 REPEAT\nPRINT 1\nENDWHILE\nENDWHILE\n").is_ok());

        assert_eq!(parse("WHILE 1 < 2 THEN\nENDWHILE\n").map(|_| ()), unexpected(Repeat, Then, 1));
        assert_eq!(
            parse("WHILE 1 < 2 REPEAT\nPRINT 1\n").map(|_| ()),
            Err(ParseError::UnexpectedEof)
        );
    }

    #[test]
    fn test_comparison() {
        for op in &["=", "==", "!=", "<", "<=", ">", ">="] {
            let source = format!("IF 1 {} 2 THEN\nPRINT 1\nENDIF\n", op);
            assert!(parse(&source).is_ok(), "comparator {}", op);
        }

        assert_eq!(
            parse("IF 1 THEN\nPRINT 1\nENDIF\n").map(|_| ()),
            Err(ParseError::ExpectedComparator { found: "THEN".to_string(), line: 1 })
        );
    }

    #[test]
    fn test_chained_comparison() {
        // The chain only ends when it hits something that isn't a comparator.
        assert_eq!(
            parse("IF 1 < 2 < 3 THEN\nPRINT 1\nENDIF\n").map(|_| ()),
            Err(ParseError::ExpectedComparator { found: "THEN".to_string(), line: 1 })
        );
    }

    #[test]
    fn test_single_operator_expressions() {
        assert!(parse("LET x = 2 * 3 + 4 / 2\n").is_ok());
        assert!(parse("LET x = -5\nLET y = +x - -x\n").is_ok());

        assert_eq!(parse("LET x = 1 + 2 + 3\n").map(|_| ()), unexpected(Newline, Plus, 1));
        assert_eq!(parse("LET x = 2 * 3 * 4\n").map(|_| ()), unexpected(Newline, Asterisk, 1));
        assert_eq!(parse("LET x = --1\n").map(|_| ()), Err(ParseError::ExpectedPrimary {
            kind: Minus,
            found: "-".to_string(),
            line: 1,
        }));
    }

    #[test]
    fn test_primary() {
        assert_eq!(
            parse("LET x = \"five\"\n").map(|_| ()),
            Err(ParseError::ExpectedPrimary { kind: Str, found: "five".to_string(), line: 1 })
        );
        assert_eq!(
            parse("PRINT THEN\n").map(|_| ()),
            Err(ParseError::ExpectedPrimary { kind: Then, found: "THEN".to_string(), line: 1 })
        );
    }

    #[test]
    fn test_stray_tokens() {
        assert_eq!(parse("THEN\n").map(|_| ()), unexpected(Newline, Then, 1));
        assert_eq!(parse("5\n").map(|_| ()), unexpected(Newline, Number, 1));
        assert_eq!(parse("ENDWHILE\n").map(|_| ()), unexpected(Newline, EndWhile, 1));
    }

    #[test]
    fn test_premature_end() {
        let mut trace = Trace::new();
        let tokens = vec![Token::new(Print, "PRINT", 1)];
        assert_eq!(Parser::new(tokens, &mut trace).run().map(|_| ()), Err(ParseError::UnexpectedEof));

        let tokens = vec![
            Token::new(Let, "LET", 1),
            Token::new(Ident, "x", 1),
            Token::new(Eq, "=", 1),
            Token::new(Number, "1", 1),
        ];
        assert_eq!(Parser::new(tokens, &mut trace).run().map(|_| ()), Err(ParseError::UnexpectedEof));
    }

    #[test]
    fn test_trace() {
        let mut trace = Trace::new();
        let tokens = tokenize("LET x = 5\nPRINT x\n", &mut trace).unwrap();
        let lexed = trace.len();
        Parser::new(tokens, &mut trace).run().unwrap();

        let parsed: Vec<&str> = trace.entries()[lexed..].iter().map(|e| e.as_str()).collect();
        assert_eq!(parsed, vec![
            "PROGRAM",
            "STATEMENT LET",
            "IDENT ( x )",
            "EXPRESSION",
            "TERM",
            "UNARY",
            "PRIMARY NUMBER ( 5 )",
            "NEWLINE",
            "STATEMENT PRINT",
            "EXPRESSION",
            "TERM",
            "UNARY",
            "PRIMARY IDENT ( x )",
            "NEWLINE",
        ]);
    }
}
