//! Name resolution for forward-referenced type expressions.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::{EnumType, TypeShape};
use crate::error::DomainError;
use crate::records::RecordType;

/// Immutable set of named types visible to type expressions.
///
/// Builtin names (`str`, `int`, `list`, `Optional`, ...) are always visible;
/// records and enums must be registered. Cloning is cheap.
#[derive(Debug, Clone, Default)]
pub struct TypeScope {
    entries: Arc<BTreeMap<String, TypeShape>>,
}

impl TypeScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, name: impl Into<String>, shape: TypeShape) -> Self {
        Arc::make_mut(&mut self.entries).insert(name.into(), shape);
        self
    }

    pub fn with_record(self, record: Arc<RecordType>) -> Self {
        let name = record.name().to_string();
        self.with_type(name, TypeShape::Record(record))
    }

    pub fn with_enum(self, enum_type: Arc<EnumType>) -> Self {
        let name = enum_type.name().to_string();
        self.with_type(name, TypeShape::Enum(enum_type))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Looks up a bare name: builtins first, then registered types.
    pub fn lookup(&self, name: &str) -> Option<TypeShape> {
        let bare = name.rsplit('.').next().unwrap_or(name);
        builtin(bare).or_else(|| self.entries.get(bare).cloned())
    }

    /// Replaces every forward reference inside `shape`.
    pub fn resolve(&self, shape: &TypeShape) -> Result<TypeShape, DomainError> {
        Ok(match shape {
            TypeShape::Named(expression) => self.parse(expression)?,
            TypeShape::List(inner) => TypeShape::list(self.resolve(inner)?),
            TypeShape::Tuple(inner) => TypeShape::tuple(self.resolve(inner)?),
            TypeShape::Set(inner) => TypeShape::set(self.resolve(inner)?),
            TypeShape::Map(key, value) => TypeShape::map(self.resolve(key)?, self.resolve(value)?),
            TypeShape::Union(members) => TypeShape::Union(
                members
                    .iter()
                    .map(|m| self.resolve(m))
                    .collect::<Result<_, _>>()?,
            ),
            other => other.clone(),
        })
    }

    /// Parses a type expression such as `list[Address] | None`.
    pub fn parse(&self, expression: &str) -> Result<TypeShape, DomainError> {
        let tokens = tokenize(expression)?;
        let mut parser = Parser {
            scope: self,
            tokens,
            pos: 0,
        };
        let shape = parser.union()?;
        if parser.pos != parser.tokens.len() {
            return Err(DomainError::parse(format!(
                "Trailing input in type expression '{expression}'"
            )));
        }
        Ok(shape)
    }
}

fn builtin(name: &str) -> Option<TypeShape> {
    Some(match name {
        "str" => TypeShape::Str,
        "int" => TypeShape::Int,
        "float" => TypeShape::Float,
        "bool" => TypeShape::Bool,
        "complex" => TypeShape::Complex,
        "date" => TypeShape::Date,
        "datetime" => TypeShape::DateTime,
        "uuid" | "UUID" => TypeShape::Uuid,
        "Any" | "any" => TypeShape::Any,
        "None" | "NoneType" => TypeShape::NoneType,
        "object" => TypeShape::Object,
        "JsonPatch" => TypeShape::Patch,
        _ => return None,
    })
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Ident(String),
    Open,
    Close,
    Comma,
    Pipe,
    Ellipsis,
}

fn tokenize(expression: &str) -> Result<Vec<Token>, DomainError> {
    let mut tokens = Vec::new();
    let mut chars = expression.chars().peekable();
    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '[' => {
                chars.next();
                tokens.push(Token::Open);
            }
            ']' => {
                chars.next();
                tokens.push(Token::Close);
            }
            ',' => {
                chars.next();
                tokens.push(Token::Comma);
            }
            '|' => {
                chars.next();
                tokens.push(Token::Pipe);
            }
            '.' => {
                let dots: String = std::iter::from_fn(|| chars.next_if_eq(&'.')).collect();
                if dots != "..." {
                    return Err(DomainError::parse(format!(
                        "Unexpected '{dots}' in type expression '{expression}'"
                    )));
                }
                tokens.push(Token::Ellipsis);
            }
            c if c.is_alphanumeric() || c == '_' => {
                let ident: String = std::iter::from_fn(|| {
                    chars.next_if(|c| c.is_alphanumeric() || *c == '_' || *c == '.')
                })
                .collect();
                tokens.push(Token::Ident(ident));
            }
            other => {
                return Err(DomainError::parse(format!(
                    "Unexpected '{other}' in type expression '{expression}'"
                )))
            }
        }
    }
    Ok(tokens)
}

struct Parser<'a> {
    scope: &'a TypeScope,
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &Token) -> Result<(), DomainError> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(DomainError::parse(format!(
                "Expected {token:?}, found {:?}",
                self.peek()
            )))
        }
    }

    fn union(&mut self) -> Result<TypeShape, DomainError> {
        let mut members = vec![self.primary()?];
        while self.eat(&Token::Pipe) {
            members.push(self.primary()?);
        }
        Ok(if members.len() == 1 {
            members.remove(0)
        } else {
            TypeShape::Union(members)
        })
    }

    fn arguments(&mut self) -> Result<Vec<TypeShape>, DomainError> {
        let mut args = Vec::new();
        if !self.eat(&Token::Open) {
            return Ok(args);
        }
        loop {
            if self.eat(&Token::Ellipsis) {
                // `tuple[T, ...]` is the homogeneous form.
            } else {
                args.push(self.union()?);
            }
            if !self.eat(&Token::Comma) {
                break;
            }
        }
        self.expect(&Token::Close)?;
        Ok(args)
    }

    fn primary(&mut self) -> Result<TypeShape, DomainError> {
        let name = match self.tokens.get(self.pos) {
            Some(Token::Ident(name)) => name.clone(),
            other => {
                return Err(DomainError::parse(format!(
                    "Expected a type name, found {other:?}"
                )))
            }
        };
        self.pos += 1;
        let bare = name.rsplit('.').next().unwrap_or(&name).to_string();
        let mut args = self.arguments()?;

        let single = |args: &mut Vec<TypeShape>| -> Result<TypeShape, DomainError> {
            match args.len() {
                0 => Ok(TypeShape::Any),
                1 => Ok(args.remove(0)),
                _ => Err(DomainError::parse(format!(
                    "'{bare}' takes one type argument, got {}",
                    args.len()
                ))),
            }
        };

        match name.rsplit('.').next().unwrap_or(&name) {
            "list" | "List" | "Sequence" | "Iterable" => Ok(TypeShape::list(single(&mut args)?)),
            "tuple" | "Tuple" => Ok(TypeShape::tuple(single(&mut args)?)),
            "set" | "Set" | "frozenset" | "FrozenSet" => Ok(TypeShape::set(single(&mut args)?)),
            "dict" | "Dict" | "Mapping" => match args.len() {
                0 => Ok(TypeShape::map(TypeShape::Any, TypeShape::Any)),
                2 => {
                    let value = args.remove(1);
                    Ok(TypeShape::map(args.remove(0), value))
                }
                n => Err(DomainError::parse(format!(
                    "'dict' takes two type arguments, got {n}"
                ))),
            },
            "Optional" => Ok(TypeShape::optional(single(&mut args)?)),
            "Union" => match args.len() {
                0 => Err(DomainError::parse("'Union' needs at least one member")),
                1 => Ok(args.remove(0)),
                _ => Ok(TypeShape::Union(args)),
            },
            _ if !args.is_empty() => Err(DomainError::parse(format!(
                "'{name}' is not a generic type"
            ))),
            _ => self
                .scope
                .lookup(&name)
                .ok_or_else(|| DomainError::unresolved_type(name.clone())),
        }
    }
}
