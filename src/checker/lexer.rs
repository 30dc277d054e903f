//! This lexer tokenizes Teeny source text.
use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use super::error::LexError;
use super::trace::Trace;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum TokenKind {
    Newline,
    Number,
    Ident,
    Str,

    // Keywords.
    Label,
    Goto,
    Print,
    Input,
    Let,
    If,
    Then,
    EndIf,
    While,
    Repeat,
    EndWhile,

    // Arithmetic operators.
    Plus,
    Minus,
    Asterisk,
    Slash,

    // Comparators.
    Eq,
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl TokenKind {
    /// Classifies a word as a keyword. Keywords are case-sensitive.
    pub fn keyword(word: &str) -> Option<TokenKind> {
        use TokenKind::*;
        match word {
            "LABEL"    => Some(Label),
            "GOTO"     => Some(Goto),
            "PRINT"    => Some(Print),
            "INPUT"    => Some(Input),
            "LET"      => Some(Let),
            "IF"       => Some(If),
            "THEN"     => Some(Then),
            "ENDIF"    => Some(EndIf),
            "WHILE"    => Some(While),
            "REPEAT"   => Some(Repeat),
            "ENDWHILE" => Some(EndWhile),
            _ => None,
        }
    }

    pub fn is_comparator(&self) -> bool {
        use TokenKind::*;
        matches!(self, Eq | EqEq | NotEq | Lt | LtEq | Gt | GtEq)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use TokenKind::*;
        let name = match self {
            Newline  => "NEWLINE",
            Number   => "NUMBER",
            Ident    => "IDENT",
            Str      => "STRING",
            Label    => "LABEL",
            Goto     => "GOTO",
            Print    => "PRINT",
            Input    => "INPUT",
            Let      => "LET",
            If       => "IF",
            Then     => "THEN",
            EndIf    => "ENDIF",
            While    => "WHILE",
            Repeat   => "REPEAT",
            EndWhile => "ENDWHILE",
            Plus     => "PLUS",
            Minus    => "MINUS",
            Asterisk => "ASTERISK",
            Slash    => "SLASH",
            Eq       => "EQ",
            EqEq     => "EQEQ",
            NotEq    => "NOTEQ",
            Lt       => "LT",
            LtEq     => "LTEQ",
            Gt       => "GT",
            GtEq     => "GTEQ",
        };
        write!(f, "{}", name)
    }
}

/// A classified lexeme and the line it starts on.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
}

impl Token {
    pub fn new<S: Into<String>>(kind: TokenKind, text: S, line: usize) -> Self {
        Token { kind, text: text.into(), line }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            TokenKind::Newline => write!(f, "{}", self.kind),
            _ => write!(f, "{} ( {} )", self.kind, self.text),
        }
    }
}

/// Converts the whole source text into tokens, recording each one in `trace`.
///
/// Runs of blank lines produce a single NEWLINE and a trailing NEWLINE is
/// supplied when the text does not end with one. There is no EOF token.
pub fn tokenize(source: &str, trace: &mut Trace) -> Result<Vec<Token>, LexError> {
    let mut tokens: Vec<Token> = Vec::with_capacity(512);
    let mut chars = source.chars().peekable();
    let mut line: usize = 1;

    while let Some(c) = chars.next() {
        use TokenKind::*;
        let token = match c {
            '#' => {
                // The terminating newline is left for the next iteration.
                while let Some(&next) = chars.peek() {
                    if next == '\n' {
                        break;
                    }
                    chars.next();
                }
                continue;
            }
            '\n' => {
                line += 1;
                if ends_with_newline(&tokens) {
                    continue;
                }
                Token::new(Newline, "\n", line - 1)
            }
            c if c.is_whitespace() => continue,

            '+' => Token::new(Plus, "+", line),
            '-' => Token::new(Minus, "-", line),
            '*' => Token::new(Asterisk, "*", line),
            '/' => Token::new(Slash, "/", line),

            '=' => either(&mut chars, (EqEq, "=="), (Eq, "="), line),
            '>' => either(&mut chars, (GtEq, ">="), (Gt, ">"), line),
            '<' => either(&mut chars, (LtEq, "<="), (Lt, "<"), line),
            '!' => {
                if chars.next_if_eq(&'=').is_some() {
                    Token::new(NotEq, "!=", line)
                } else {
                    return Err(LexError::UnexpectedChar('!', line));
                }
            }

            '"' => {
                let start = line;
                let mut text = String::new();
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some(ch) => {
                            if ch == '\n' {
                                line += 1;
                            }
                            text.push(ch);
                        }
                        None => return Err(LexError::UnterminatedString(start)),
                    }
                }
                Token::new(Str, text, start)
            }

            c if c.is_ascii_digit() => {
                Token::new(Number, run(c, &mut chars, |ch| ch.is_ascii_digit()), line)
            }
            c if c.is_ascii_alphabetic() => {
                let word = run(c, &mut chars, |ch| ch.is_ascii_alphabetic());
                let kind = TokenKind::keyword(&word).unwrap_or(Ident);
                Token::new(kind, word, line)
            }

            _ => return Err(LexError::UnexpectedChar(c, line)),
        };

        trace.record(format!("TOKEN {} {:?} (line {})", token.kind, token.text, token.line));
        tokens.push(token);
    }

    if !tokens.is_empty() && !ends_with_newline(&tokens) {
        let token = Token::new(TokenKind::Newline, "\n", line);
        trace.record(format!("TOKEN {} {:?} (line {})", token.kind, token.text, token.line));
        tokens.push(token);
    }

    Ok(tokens)
}

fn ends_with_newline(tokens: &[Token]) -> bool {
    tokens.last().map_or(false, |t| t.kind == TokenKind::Newline)
}

/// Picks the two-character form when the next character is `=`.
fn either(
    chars: &mut Peekable<Chars>,
    double: (TokenKind, &str),
    single: (TokenKind, &str),
    line: usize,
) -> Token {
    let (kind, text) = if chars.next_if_eq(&'=').is_some() { double } else { single };
    Token::new(kind, text, line)
}

/// Collects `first` and every following character accepted by `accept`.
fn run<F: Fn(char) -> bool>(first: char, chars: &mut Peekable<Chars>, accept: F) -> String {
    let mut sb = String::new();
    sb.push(first);
    while let Some(&c) = chars.peek() {
        if !accept(c) {
            break;
        }
        sb.push(c);
        chars.next();
    }
    sb
}
