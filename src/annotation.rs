//! Annotation expression parsing.
//!
//! # Grammar
//! ```text
//! annotation := component ( "|" component )*
//! component  := IDENT [ "[" arg ( "," arg )* "]" ]
//! arg        := INTEGER | FLOAT | STRING
//! ```
//!
//! # Design Decisions
//! - Parsing is purely syntactic: `Min["x"]` parses, and `Min::configure`
//!   rejects the string bound afterwards
//! - Whitespace is insignificant
//! - Any malformed input is a `ConfigError::Configuration`

use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;

use crate::error::{ConfigError, ConfigResult};
use crate::value::Value;

/// One `Name[args]` piece of an annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub name: String,
    pub args: Vec<Value>,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.args.is_empty() {
            write!(f, "[")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", arg)?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

/// Parse an annotation expression into its components, in order.
pub fn parse(input: &str) -> ConfigResult<Vec<Component>> {
    let mut parser = Parser {
        input,
        chars: input.char_indices().peekable(),
    };

    let mut components = vec![parser.component()?];
    loop {
        parser.skip_ws();
        match parser.chars.next() {
            None => break,
            Some((_, '|')) => components.push(parser.component()?),
            Some((pos, c)) => return Err(parser.error(pos, &format!("unexpected '{}'", c))),
        }
    }
    Ok(components)
}

struct Parser<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Parser<'a> {
    fn error(&self, pos: usize, msg: &str) -> ConfigError {
        ConfigError::Configuration(format!(
            "invalid annotation {:?} at offset {}: {}",
            self.input, pos, msg
        ))
    }

    fn skip_ws(&mut self) {
        while self.chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}
    }

    fn offset(&mut self) -> usize {
        self.chars.peek().map_or(self.input.len(), |(pos, _)| *pos)
    }

    fn component(&mut self) -> ConfigResult<Component> {
        self.skip_ws();
        let name = self.ident()?;
        self.skip_ws();

        let mut args = Vec::new();
        if self.chars.next_if(|(_, c)| *c == '[').is_some() {
            loop {
                self.skip_ws();
                args.push(self.arg()?);
                self.skip_ws();
                match self.chars.next() {
                    Some((_, ',')) => continue,
                    Some((_, ']')) => break,
                    Some((pos, c)) => {
                        return Err(self.error(pos, &format!("expected ',' or ']', found '{}'", c)))
                    }
                    None => return Err(self.error(self.input.len(), "unclosed '['")),
                }
            }
        }
        Ok(Component { name, args })
    }

    fn ident(&mut self) -> ConfigResult<String> {
        let start = self.offset();
        match self.chars.peek() {
            Some((_, c)) if c.is_alphabetic() || *c == '_' => {}
            _ => return Err(self.error(start, "expected handler name")),
        }
        let mut name = String::new();
        while let Some((_, c)) = self.chars.next_if(|(_, c)| c.is_alphanumeric() || *c == '_') {
            name.push(c);
        }
        Ok(name)
    }

    fn arg(&mut self) -> ConfigResult<Value> {
        let start = self.offset();
        match self.chars.peek() {
            Some((_, '"')) => self.string(),
            Some((_, c)) if c.is_ascii_digit() || matches!(*c, '-' | '+' | '.') => {
                self.number(start)
            }
            Some((pos, c)) => {
                let (pos, c) = (*pos, *c);
                Err(self.error(pos, &format!("unexpected '{}' in parameters", c)))
            }
            None => Err(self.error(start, "expected parameter")),
        }
    }

    fn string(&mut self) -> ConfigResult<Value> {
        let start = self.offset();
        self.chars.next();
        let mut out = String::new();
        loop {
            match self.chars.next() {
                Some((_, '"')) => return Ok(Value::String(out)),
                Some((_, '\\')) => match self.chars.next() {
                    Some((_, c)) => out.push(c),
                    None => break,
                },
                Some((_, c)) => out.push(c),
                None => break,
            }
        }
        Err(self.error(start, "unterminated string"))
    }

    fn number(&mut self, start: usize) -> ConfigResult<Value> {
        let mut end = start;
        while let Some((pos, c)) = self
            .chars
            .next_if(|(_, c)| c.is_ascii_alphanumeric() || matches!(*c, '-' | '+' | '.' | '_'))
        {
            end = pos + c.len_utf8();
        }
        let literal = self.input[start..end].replace('_', "");

        if let Ok(i) = literal.parse::<i64>() {
            return Ok(Value::Integer(i));
        }
        match literal.parse::<f64>() {
            Ok(f) if f.is_finite() => Ok(Value::Float(f)),
            _ => Err(self.error(start, &format!("invalid number '{}'", literal))),
        }
    }
}
