//! # Segmentação de Sequências BIO
//!
//! Divide uma sequência (tokens, tags) em **segmentos** contíguos de classe
//! uniforme: ou uma corrida de tokens fora de entidade, ou exatamente um span
//! de entidade (`B-` seguido de zero ou mais `I-`).
//!
//! ```text
//! tokens: My   name is   Monkey  D.      Luffy
//! tags:   O    O    O    B-name  I-name  I-name
//!         └──── seg 0 ──┘└──────── seg 1 ───────┘
//! ```
//!
//! Os segmentos cobrem a sequência inteira, sem lacunas nem sobreposição.
//! A concordância de tipo entre `B-X` e os `I-` seguintes não é verificada:
//! um `I-Y` logo após `B-X` continua o mesmo span.

use serde::Serialize;

use crate::tagger::Tag;

/// Classe de um segmento.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SegmentKind {
    /// Span de entidade (`B-`/`I-`).
    Entity,
    /// Corrida de tokens fora de entidade.
    Outside,
}

/// Trecho contíguo da sequência, com as posições absolutas de cada token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub tokens: Vec<String>,
    /// Posições absolutas na sequência de origem (estritamente crescentes).
    pub positions: Vec<usize>,
    pub kind: SegmentKind,
}

impl Segment {
    fn open(kind: SegmentKind) -> Self {
        Self {
            tokens: Vec::new(),
            positions: Vec::new(),
            kind,
        }
    }

    fn push(&mut self, token: &str, position: usize) {
        self.tokens.push(token.to_string());
        self.positions.push(position);
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn is_entity(&self) -> bool {
        self.kind == SegmentKind::Entity
    }

    /// Primeira posição absoluta (a do `B-` em spans bem formados).
    pub fn first_position(&self) -> Option<usize> {
        self.positions.first().copied()
    }

    pub fn last_position(&self) -> Option<usize> {
        self.positions.last().copied()
    }
}

/// Visão segmentada de uma sequência (tokens, tags) emprestada.
///
/// Função pura das entradas: nada é modificado. Se os comprimentos diferirem,
/// apenas o prefixo comum é considerado.
#[derive(Debug, Clone, Copy)]
pub struct SequenceSegmentation<'a> {
    tokens: &'a [String],
    tags: &'a [String],
}

impl<'a> SequenceSegmentation<'a> {
    pub fn new(tokens: &'a [String], tags: &'a [String]) -> Self {
        debug_assert_eq!(tokens.len(), tags.len(), "tokens e tags desalinhados");
        Self { tokens, tags }
    }

    pub fn tokens(&self) -> &'a [String] {
        &self.tokens[..self.len()]
    }

    pub fn tags(&self) -> &'a [String] {
        &self.tags[..self.len()]
    }

    pub fn len(&self) -> usize {
        self.tokens.len().min(self.tags.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn tag_at(&self, i: usize) -> Option<Tag<'a>> {
        if i < self.len() {
            Some(Tag::parse(&self.tags[i]))
        } else {
            None
        }
    }

    /// Segmentos que cobrem a sequência inteira, em ordem.
    ///
    /// Um segmento é fechado quando a **próxima** tag muda de classe:
    /// - após um token fora de entidade, se a próxima tag for `B-`/`I-`;
    /// - após um token de entidade, se a próxima tag não for `I-` (um `O` ou um novo `B-`).
    ///
    /// O fim da sequência fecha o segmento aberto.
    pub fn segments(&self) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut current: Option<Segment> = None;

        for i in 0..self.len() {
            let tag = Tag::parse(&self.tags[i]);
            let segment = current.get_or_insert_with(|| {
                Segment::open(if tag.is_entity() {
                    SegmentKind::Entity
                } else {
                    SegmentKind::Outside
                })
            });
            segment.push(&self.tokens[i], i);

            let closes = match self.tag_at(i + 1) {
                None => true,
                Some(next) if tag.is_entity() => !next.is_inside(),
                Some(next) => next.is_entity(),
            };
            if closes {
                if let Some(done) = current.take() {
                    segments.push(done);
                }
            }
        }

        segments
    }

    /// Itera preguiçosamente sobre os spans de entidade, um por corrida `B-(I-)*`.
    pub fn entity_spans(&self) -> EntitySpans<'a> {
        EntitySpans {
            segmentation: *self,
            cursor: 0,
        }
    }

    /// Fluxo achatado de tokens de todos os segmentos (fronteiras invisíveis).
    pub fn tokens_from_segments(&self) -> Vec<String> {
        self.segments()
            .into_iter()
            .flat_map(|segment| segment.tokens)
            .collect()
    }

    /// Número de combinações não vazias de spans de entidade (`2^k - 1`).
    ///
    /// Indica o tamanho do espaço de perturbações por span da sentença.
    pub fn span_combinations(&self) -> u64 {
        let k = self.entity_spans().count() as u32;
        1u64.checked_shl(k).map_or(u64::MAX, |n| n - 1)
    }
}

/// Iterador de spans de entidade retornado por [`SequenceSegmentation::entity_spans`].
#[derive(Debug, Clone)]
pub struct EntitySpans<'a> {
    segmentation: SequenceSegmentation<'a>,
    cursor: usize,
}

impl Iterator for EntitySpans<'_> {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        let seg = &self.segmentation;

        // Avança até o próximo token de entidade
        while self.cursor < seg.len() && !Tag::parse(&seg.tags[self.cursor]).is_entity() {
            self.cursor += 1;
        }
        if self.cursor >= seg.len() {
            return None;
        }

        let mut span = Segment::open(SegmentKind::Entity);
        while self.cursor < seg.len() {
            let i = self.cursor;
            span.push(&seg.tokens[i], i);
            self.cursor += 1;
            match seg.tag_at(i + 1) {
                Some(next) if next.is_inside() => continue,
                _ => break,
            }
        }
        Some(span)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn tagged_sequence() -> impl Strategy<Value = (Vec<String>, Vec<String>)> {
        prop::collection::vec(
            (
                "[a-zA-Z]{1,6}",
                prop::sample::select(vec!["O", "B-PER", "I-PER", "B-LOC", "I-LOC"]),
            ),
            0..30,
        )
        .prop_map(|pairs| {
            let (tokens, tags): (Vec<String>, Vec<String>) = pairs
                .into_iter()
                .map(|(tok, tag)| (tok, tag.to_string()))
                .unzip();
            (tokens, tags)
        })
    }

    proptest! {
        /// Concatenar os segmentos reproduz a sequência original.
        #[test]
        fn segments_are_a_tiling((tokens, tags) in tagged_sequence()) {
            let seg = SequenceSegmentation::new(&tokens, &tags);
            let positions: Vec<usize> = seg.segments().into_iter().flat_map(|s| s.positions).collect();
            prop_assert_eq!(positions, (0..tokens.len()).collect::<Vec<_>>());
            prop_assert_eq!(seg.tokens_from_segments(), tokens.clone());
        }

        /// Spans nunca contêm `O` e suas posições são estritamente crescentes.
        #[test]
        fn spans_are_entity_only((tokens, tags) in tagged_sequence()) {
            let seg = SequenceSegmentation::new(&tokens, &tags);
            for span in seg.entity_spans() {
                prop_assert!(!span.is_empty());
                prop_assert!(span.positions.windows(2).all(|w| w[0] < w[1]));
                for &p in &span.positions {
                    prop_assert!(Tag::parse(&tags[p]).is_entity());
                }
            }
        }

        /// Os spans coincidem com os segmentos de entidade.
        #[test]
        fn spans_match_entity_segments((tokens, tags) in tagged_sequence()) {
            let seg = SequenceSegmentation::new(&tokens, &tags);
            let from_segments: Vec<Segment> = seg.segments().into_iter().filter(|s| s.is_entity()).collect();
            let spans: Vec<Segment> = seg.entity_spans().collect();
            prop_assert_eq!(spans, from_segments);
        }
    }
}
