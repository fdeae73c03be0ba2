//! # Corpus Anotado em Colunas (BIO)
//!
//! Leitura de corpora no formato "um token por linha": cada linha traz colunas
//! separadas por espaço em branco, uma linha vazia separa sentenças e linhas
//! de comentário (ex: `# sent_id = 42`) são ignoradas.
//!
//! ```text
//! # sent_id = 1
//! Monkey   B-anon   B-name
//! D.       I-anon   I-name
//! Luffy    I-anon   I-name
//! é        O        O
//!
//! ```
//!
//! Cada [`Sentence`] guarda as colunas selecionadas já transpostas:
//! a coluna 0 é sempre a de palavras e as colunas `1..` são as colunas de tags,
//! na ordem configurada em [`ColumnLayout`].

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use regex::RegexSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AugError, Result};
use crate::tagger::has_entity;

/// Marcadores de comentário padrão (cabeçalhos no estilo CoNLL-U).
pub const DEFAULT_COMMENT_MARKERS: &[&str] = &["# newdoc id", "# sent_id"];

/// Uma sentença anotada: colunas paralelas de mesmo comprimento.
///
/// - `columns[0]`: palavras (tokens).
/// - `columns[1..]`: colunas de tags BIO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    columns: Vec<Vec<String>>,
}

impl Sentence {
    pub fn new(columns: Vec<Vec<String>>) -> Self {
        Self { columns }
    }

    /// Monta uma sentença de uma única coluna de tags.
    pub fn from_tokens_and_tags(tokens: Vec<String>, tags: Vec<String>) -> Self {
        Self::new(vec![tokens, tags])
    }

    pub fn words(&self) -> &[String] {
        self.columns.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Coluna pelo índice no layout da amostra (0 = palavras).
    pub fn column(&self, index: usize) -> Option<&[String]> {
        self.columns.get(index).map(Vec::as_slice)
    }

    pub fn columns(&self) -> &[Vec<String>] {
        &self.columns
    }

    pub fn into_columns(self) -> Vec<Vec<String>> {
        self.columns
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Número de tokens.
    pub fn len(&self) -> usize {
        self.words().len()
    }

    pub fn is_empty(&self) -> bool {
        self.words().is_empty()
    }

    /// A coluna `entity_column` contém ao menos um `B-`?
    pub fn has_entity(&self, entity_column: usize) -> bool {
        self.column(entity_column).is_some_and(|tags| has_entity(tags))
    }
}

/// Corpus completo, na ordem do arquivo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corpus {
    pub sentences: Vec<Sentence>,
}

impl Corpus {
    pub fn new(sentences: Vec<Sentence>) -> Self {
        Self { sentences }
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Sentenças com ao menos uma entidade (`B-`) na coluna indicada.
    pub fn entity_sentences(&self, entity_column: usize) -> Vec<&Sentence> {
        self.sentences
            .iter()
            .filter(|s| s.has_entity(entity_column))
            .collect()
    }
}

/// Quais colunas do arquivo de entrada extrair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnLayout {
    /// Índice da coluna de palavras no arquivo.
    pub word_column: usize,
    /// Índices das colunas de tags no arquivo, na ordem desejada.
    pub tag_columns: Vec<usize>,
}

impl ColumnLayout {
    pub fn new(word_column: usize, tag_columns: Vec<usize>) -> Self {
        Self {
            word_column,
            tag_columns,
        }
    }

    /// Quantidade mínima de campos que uma linha precisa ter.
    pub fn required_fields(&self) -> usize {
        self.tag_columns
            .iter()
            .copied()
            .chain(std::iter::once(self.word_column))
            .max()
            .map_or(0, |max| max + 1)
    }
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self::new(0, vec![1])
    }
}

/// Leitor de corpus em colunas.
pub struct CorpusReader {
    layout: ColumnLayout,
    comments: RegexSet,
}

impl CorpusReader {
    /// Cria um leitor. Cada marcador de comentário é uma regex ancorada no início da linha.
    pub fn new<S: AsRef<str>>(layout: ColumnLayout, comment_markers: &[S]) -> Result<Self> {
        if layout.tag_columns.is_empty() {
            return Err(AugError::invalid_config("ao menos uma coluna de tags é necessária"));
        }
        let anchored: Vec<String> = comment_markers
            .iter()
            .map(|m| format!("^(?:{})", m.as_ref()))
            .collect();
        Ok(Self {
            layout,
            comments: RegexSet::new(anchored)?,
        })
    }

    /// Leitor com os marcadores de comentário padrão.
    pub fn with_default_comments(layout: ColumnLayout) -> Result<Self> {
        Self::new(layout, DEFAULT_COMMENT_MARKERS)
    }

    pub fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    pub fn read_path(&self, path: impl AsRef<Path>) -> Result<Corpus> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| AugError::io(path, e))?;
        let corpus = self.read(BufReader::new(file)).map_err(|e| match e {
            AugError::Io { source, .. } => AugError::io(path, source),
            other => other,
        })?;
        debug!(path = %path.display(), sentences = corpus.len(), "corpus carregado");
        Ok(corpus)
    }

    pub fn read_str(&self, text: &str) -> Result<Corpus> {
        self.read(text.as_bytes())
    }

    /// Lê sentenças de qualquer fonte bufferizada.
    ///
    /// A última sentença é emitida mesmo sem linha vazia final.
    /// Linhas vazias consecutivas não geram sentenças vazias.
    pub fn read<R: BufRead>(&self, reader: R) -> Result<Corpus> {
        let required = self.layout.required_fields();
        let n_columns = self.layout.tag_columns.len() + 1;
        let mut sentences = Vec::new();
        let mut current: Vec<Vec<String>> = vec![Vec::new(); n_columns];

        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| AugError::io("<entrada>", e))?;
            if self.comments.is_match(&line) {
                continue;
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                if !current[0].is_empty() {
                    let columns = std::mem::replace(&mut current, vec![Vec::new(); n_columns]);
                    sentences.push(Sentence::new(columns));
                }
                continue;
            }

            let fields: Vec<&str> = trimmed.split_whitespace().collect();
            if fields.len() < required {
                return Err(AugError::MalformedRecord {
                    line: index + 1,
                    expected: required,
                    found: fields.len(),
                });
            }

            current[0].push(fields[self.layout.word_column].to_string());
            for (slot, &col) in self.layout.tag_columns.iter().enumerate() {
                current[slot + 1].push(fields[col].to_string());
            }
        }

        if !current[0].is_empty() {
            sentences.push(Sentence::new(current));
        }

        Ok(Corpus::new(sentences))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# newdoc id = saude
# sent_id = 1
A\tO\tO
Fiocruz\tB-ORG\tB-anon
desenvolveu\tO\tO

# sent_id = 2
Nada\tO\tO
aqui\tO\tO

Margareth\tB-PER\tB-anon
Dalcolmo\tI-PER\tI-anon
";

    fn reader(tag_columns: Vec<usize>) -> CorpusReader {
        CorpusReader::with_default_comments(ColumnLayout::new(0, tag_columns)).unwrap()
    }

    #[test]
    fn test_read_sentences_and_skip_comments() {
        let corpus = reader(vec![1]).read_str(SAMPLE).unwrap();
        assert_eq!(corpus.len(), 3);
        assert_eq!(corpus.sentences[0].words(), ["A", "Fiocruz", "desenvolveu"]);
        assert_eq!(corpus.sentences[0].column(1).unwrap(), ["O", "B-ORG", "O"]);
        // Última sentença sem linha em branco final
        assert_eq!(corpus.sentences[2].words(), ["Margareth", "Dalcolmo"]);
    }

    #[test]
    fn test_multiple_tag_columns_in_given_order() {
        let corpus = reader(vec![2, 1]).read_str(SAMPLE).unwrap();
        let first = &corpus.sentences[0];
        assert_eq!(first.n_columns(), 3);
        assert_eq!(first.column(1).unwrap(), ["O", "B-anon", "O"]);
        assert_eq!(first.column(2).unwrap(), ["O", "B-ORG", "O"]);
    }

    #[test]
    fn test_entity_sentences() {
        let corpus = reader(vec![1]).read_str(SAMPLE).unwrap();
        let entity = corpus.entity_sentences(1);
        assert_eq!(entity.len(), 2);
        assert_eq!(entity[1].words()[0], "Margareth");
    }

    #[test]
    fn test_malformed_record_reports_line() {
        let text = "Lula B-PER\nviajou\n";
        let err = reader(vec![1]).read_str(text).unwrap_err();
        match err {
            AugError::MalformedRecord { line, expected, found } => {
                assert_eq!(line, 2);
                assert_eq!(expected, 2);
                assert_eq!(found, 1);
            }
            other => panic!("erro inesperado: {other}"),
        }
    }

    #[test]
    fn test_blank_lines_do_not_create_empty_sentences() {
        let text = "\n\nLula B-PER\n\n\n\nBrasil B-LOC\n\n";
        let corpus = reader(vec![1]).read_str(text).unwrap();
        assert_eq!(corpus.len(), 2);
    }

    #[test]
    fn test_custom_comment_marker() {
        let layout = ColumnLayout::new(0, vec![1]);
        let reader = CorpusReader::new(layout, &["//", "#"]).unwrap();
        let corpus = reader.read_str("// cabeçalho\n# outro\nLula B-PER\n").unwrap();
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.sentences[0].len(), 1);
    }

    #[test]
    fn test_invalid_comment_pattern() {
        let err = CorpusReader::new(ColumnLayout::default(), &["("]);
        assert!(matches!(err, Err(AugError::CommentPattern(_))));
    }

    #[test]
    fn test_required_fields() {
        assert_eq!(ColumnLayout::new(0, vec![1]).required_fields(), 2);
        assert_eq!(ColumnLayout::new(3, vec![1, 2]).required_fields(), 4);
    }

    #[test]
    fn test_read_path_missing_file() {
        let err = reader(vec![1]).read_path("/caminho/que/nao/existe.tsv").unwrap_err();
        assert!(matches!(err, AugError::Io { .. }));
    }
}
