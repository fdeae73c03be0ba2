//! # Mapeamento Tag → Tokens
//!
//! Para cada tag exata do corpus (ex: `B-name`), guarda os tokens distintos já
//! observados sob ela, na ordem da primeira ocorrência. É construído uma única
//! vez sobre o corpus completo e usado apenas para leitura durante a
//! substituição por rótulo (*label-wise replacement*).
//!
//! ```text
//! "Bob"/B-name, "Alice"/B-name, "Bob"/B-name  →  { "B-name": ["Bob", "Alice"] }
//! ```

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::corpus::Sentence;

/// Tag → tokens distintos em ordem de primeira ocorrência.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LabelTokenMap {
    entries: HashMap<String, Vec<String>>,
}

impl LabelTokenMap {
    /// Constrói o mapeamento a partir dos pares (token, tag) da coluna `entity_column`.
    ///
    /// Sentenças sem a coluna pedida são ignoradas.
    pub fn build(sentences: &[Sentence], entity_column: usize) -> Self {
        Self::from_pairs(sentences.iter().flat_map(|sentence| {
            let tags = sentence.column(entity_column).unwrap_or(&[]);
            sentence.words().iter().zip(tags.iter())
        }))
    }

    /// Constrói a partir de um iterador de pares (token, tag).
    pub fn from_pairs<I, T, L>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (T, L)>,
        T: AsRef<str>,
        L: AsRef<str>,
    {
        let mut entries: HashMap<String, Vec<String>> = HashMap::new();
        let mut seen: HashSet<(String, String)> = HashSet::new();

        for (token, tag) in pairs {
            let (token, tag) = (token.as_ref(), tag.as_ref());
            if seen.insert((tag.to_string(), token.to_string())) {
                entries
                    .entry(tag.to_string())
                    .or_default()
                    .push(token.to_string());
            }
        }

        Self { entries }
    }

    /// Tokens observados sob `tag`; vazio se a tag nunca apareceu.
    pub fn tokens_for(&self, tag: &str) -> &[String] {
        self.entries.get(tag).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_label(&self, tag: &str) -> bool {
        self.entries.contains_key(tag)
    }

    /// Tags conhecidas, em ordem alfabética.
    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        labels.sort_unstable();
        labels
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
