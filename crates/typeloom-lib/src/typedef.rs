//! Custom-type definition language.
//!
//! One definition per line:
//!
//! ```text
//! type Age      >>= Number
//! type Currency >>= "USD" | "CAD" | "GBP"
//! type Id       >>= String & Number
//! type Person   >>= name: String, age: Age
//! type Handler  >>= fn(event: String, retries: Number) -> Boolean
//! ```
//!
//! Blank lines and lines starting with `#` or `//` are skipped. Type references
//! (alias targets, object fields, function signatures) resolve to a kind name,
//! an AST kind token, or a type defined on an earlier line.

use indexmap::IndexMap;

use typeloom_core::{Kind, Literal, Meaning, Member, TypeRepr};

use crate::{Error, Result};

const KEYWORD: &str = "type";
const ARROW: &str = ">>=";

/// Parse definition source into a name → representation map.
pub fn parse(source: &str) -> Result<IndexMap<String, TypeRepr>> {
    let mut defs = IndexMap::new();
    for (i, raw) in source.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
            continue;
        }
        let parser = LineParser {
            line: i + 1,
            defs: &defs,
        };
        let (name, repr) = parser.definition(line)?;
        log::debug!("typedef `{name}` = {repr}");
        defs.insert(name, repr);
    }
    Ok(defs)
}

struct LineParser<'a> {
    line: usize,
    defs: &'a IndexMap<String, TypeRepr>,
}

impl LineParser<'_> {
    fn error(&self, reason: impl Into<String>) -> Error {
        Error::TypedefSyntax {
            line: self.line,
            reason: reason.into(),
        }
    }

    fn definition(&self, line: &str) -> Result<(String, TypeRepr)> {
        let rest = line
            .strip_prefix(KEYWORD)
            .filter(|r| r.starts_with(char::is_whitespace))
            .ok_or_else(|| self.error(format!("expected `{KEYWORD} Name {ARROW} ...`")))?;
        let (name, body) = rest
            .split_once(ARROW)
            .ok_or_else(|| self.error(format!("missing `{ARROW}`")))?;
        let name = name.trim();
        if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
            return Err(self.error(format!("invalid type name `{name}`")));
        }
        let body = body.trim();
        if body.is_empty() {
            return Err(self.error(format!("`{name}` has an empty definition")));
        }
        let meaning = self.meaning(body)?;
        Ok((name.to_string(), TypeRepr::new(Some(name.to_string()), meaning)))
    }

    fn meaning(&self, body: &str) -> Result<Meaning> {
        if let Some(signature) = body.strip_prefix("fn(") {
            return self.function(signature);
        }
        if body.contains('|') {
            return Ok(Meaning::Union(self.members(body, '|')?));
        }
        if body.contains('&') {
            return Ok(Meaning::Intersect(self.members(body, '&')?));
        }
        if body.contains(':') {
            return Ok(Meaning::Object(self.fields(body)?));
        }
        Ok(Meaning::Alias(Box::new(self.type_ref(body)?)))
    }

    fn function(&self, signature: &str) -> Result<Meaning> {
        let (params, ret) = signature
            .split_once(')')
            .ok_or_else(|| self.error("unclosed parameter list"))?;
        let ret = ret.trim();
        let ret = match ret.strip_prefix("->") {
            Some(ty) => self.type_ref(ty.trim())?,
            None if ret.is_empty() => TypeRepr::primitive(Kind::Any),
            None => return Err(self.error(format!("expected `->` before `{ret}`"))),
        };
        let params = if params.trim().is_empty() {
            IndexMap::new()
        } else {
            self.fields(params)?
        };
        Ok(Meaning::Function {
            params,
            ret: Box::new(ret),
        })
    }

    fn fields(&self, list: &str) -> Result<IndexMap<String, TypeRepr>> {
        let mut fields = IndexMap::new();
        for entry in list.split(',') {
            let (name, ty) = entry
                .split_once(':')
                .ok_or_else(|| self.error(format!("expected `name: Type`, got `{}`", entry.trim())))?;
            let name = name.trim();
            if fields.insert(name.to_string(), self.type_ref(ty.trim())?).is_some() {
                return Err(self.error(format!("duplicate field `{name}`")));
            }
        }
        Ok(fields)
    }

    fn members(&self, body: &str, sep: char) -> Result<Vec<Member>> {
        body.split(sep).map(|m| self.member(m.trim())).collect()
    }

    fn member(&self, text: &str) -> Result<Member> {
        if let Some(s) = quoted(text) {
            return Ok(Member::Literal(Literal::Str(s.to_string())));
        }
        if let Ok(n) = text.parse::<i64>() {
            return Ok(Member::Literal(Literal::Int(n)));
        }
        match text {
            "true" => return Ok(Member::Literal(Literal::Bool(true))),
            "false" => return Ok(Member::Literal(Literal::Bool(false))),
            _ => {}
        }
        resolve_kind(text)
            .map(Member::Kind)
            .ok_or_else(|| self.error(format!("`{text}` is neither a literal nor a kind")))
    }

    fn type_ref(&self, text: &str) -> Result<TypeRepr> {
        if let Some(def) = self.defs.get(text) {
            return Ok(def.clone());
        }
        resolve_kind(text)
            .map(TypeRepr::primitive)
            .ok_or_else(|| self.error(format!("unknown type `{text}`")))
    }
}

fn resolve_kind(text: &str) -> Option<Kind> {
    Kind::from_name(text).or_else(|| Kind::from_token(text).ok())
}

fn quoted(text: &str) -> Option<&str> {
    ['"', '\''].into_iter().find_map(|q| {
        text.strip_prefix(q)
            .and_then(|rest| rest.strip_suffix(q))
    })
}
