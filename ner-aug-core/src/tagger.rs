//! # Esquema de Tags BIO
//!
//! Classificação das tags textuais de um corpus no esquema **BIO**
//! (Beginning-Inside-Outside). O corpus pode trazer qualquer tipo de entidade
//! (`B-name`, `I-nat-name`, `B-title`...), por isso as tags permanecem como
//! `String` e apenas o prefixo é interpretado.
//!
//! ## Esquema BIO
//!
//! - `B-TIPO`: Begin, primeiro token de uma entidade
//! - `I-TIPO`: Inside, tokens subsequentes da mesma entidade
//! - `O`: Outside, não é parte de nenhuma entidade
//!
//! Qualquer tag sem prefixo `B-`/`I-` é tratada como `Outside`.

use serde::Serialize;

/// Visão classificada de uma tag do corpus, emprestando o tipo da entidade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Tag<'a> {
    /// **Begin**: início de uma entidade do tipo indicado. Ex: **Monkey** (B-name) D. Luffy.
    Begin(&'a str),
    /// **Inside**: continuação de uma entidade. Ex: Monkey **D.** (I-name) Luffy.
    Inside(&'a str),
    /// **Outside**: o token não faz parte de nenhuma entidade.
    Outside,
}

impl<'a> Tag<'a> {
    /// Classifica uma tag textual (ex: "B-name" → `Begin("name")`).
    pub fn parse(label: &'a str) -> Self {
        if let Some(kind) = label.strip_prefix("B-") {
            Tag::Begin(kind)
        } else if let Some(kind) = label.strip_prefix("I-") {
            Tag::Inside(kind)
        } else {
            Tag::Outside
        }
    }

    /// `true` para `B-` e `I-`.
    pub fn is_entity(&self) -> bool {
        !matches!(self, Tag::Outside)
    }

    pub fn is_begin(&self) -> bool {
        matches!(self, Tag::Begin(_))
    }

    pub fn is_inside(&self) -> bool {
        matches!(self, Tag::Inside(_))
    }

    /// Tipo da entidade (ex: "name"), se for B- ou I-.
    pub fn entity_type(&self) -> Option<&'a str> {
        match *self {
            Tag::Begin(kind) | Tag::Inside(kind) => Some(kind),
            Tag::Outside => None,
        }
    }
}

impl std::fmt::Display for Tag<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tag::Begin(kind) => write!(f, "B-{}", kind),
            Tag::Inside(kind) => write!(f, "I-{}", kind),
            Tag::Outside => write!(f, "O"),
        }
    }
}

/// Atalho: a tag textual marca um token de entidade (`B-` ou `I-`)?
pub fn is_entity_label(label: &str) -> bool {
    Tag::parse(label).is_entity()
}

/// Uma sequência é "de entidade" quando contém ao menos um `B-`.
pub fn has_entity<S: AsRef<str>>(tags: &[S]) -> bool {
    tags.iter().any(|t| Tag::parse(t.as_ref()).is_begin())
}
