//! # Aumento por Segmento
//!
//! Estratégias que operam sobre spans de entidade e segmentos de uma única
//! sentença, sempre mantendo tokens e tags alinhados:
//!
//! 1. **Troca** (`swap_first_last`): primeiro ↔ último token do span.
//! 2. **Remoção de vizinhos** (`remove_entity_neighbor`): apaga o token logo antes
//!    e/ou logo depois de cada span, junto com sua tag.
//! 3. **Substituição por rótulo** (`label_wise_token_replacement`): troca tokens
//!    de entidade por outros vistos sob a mesma tag no corpus.
//! 4. **Embaralhamento** (`shuffle_within_entity_segment`, `shuffle_within_segments`).
//!
//! Cada decisão usa um gerador semeado por [`seeded_rng`] com o comprimento
//! que a governa (span, segmento ou lista de candidatos). A entrada nunca é
//! modificada: toda operação devolve uma nova sequência.

use std::collections::{BTreeSet, HashSet};

use rand::seq::SliceRandom;
use serde::Serialize;

use crate::mapping::LabelTokenMap;
use crate::random::{bernoulli, seeded_rng};
use crate::segmentation::SequenceSegmentation;
use crate::tagger::is_entity_label;

/// Resultado de [`SegmentAugmenter::remove_entity_neighbor`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NeighborRemoval {
    pub tokens: Vec<String>,
    pub tags: Vec<String>,
    /// Posições absolutas removidas (ordenadas, sem repetição).
    pub removed: Vec<usize>,
}

/// Aumentador de uma única sentença (tokens + coluna de tags principal).
#[derive(Debug, Clone, Copy)]
pub struct SegmentAugmenter<'a> {
    segmentation: SequenceSegmentation<'a>,
}

impl<'a> SegmentAugmenter<'a> {
    pub fn new(tokens: &'a [String], tags: &'a [String]) -> Self {
        Self {
            segmentation: SequenceSegmentation::new(tokens, tags),
        }
    }

    pub fn segmentation(&self) -> &SequenceSegmentation<'a> {
        &self.segmentation
    }

    /// Troca o primeiro e o último token de cada span aceito por Bernoulli(p).
    ///
    /// Spans de um único token ficam inalterados. As tags não mudam.
    pub fn swap_first_last(&self, p: f64) -> Vec<String> {
        let mut tokens = self.segmentation.tokens().to_vec();
        for span in self.segmentation.entity_spans() {
            let mut rng = seeded_rng(span.len(), p);
            if !bernoulli(&mut rng, p) {
                continue;
            }
            if let (Some(first), Some(last)) = (span.first_position(), span.last_position()) {
                tokens.swap(first, last);
            }
        }
        tokens
    }

    /// Remove vizinhos de spans de entidade.
    ///
    /// Candidatos: a posição antes de cada span (`left`) e/ou depois (`right`).
    /// Com os dois lados pedidos, todo candidato válido é removido; com um só
    /// lado, cada candidato passa por Bernoulli(p) de um gerador semeado pelo
    /// número de candidatos. Posições fora da sequência ou cujo token também é
    /// de entidade nunca são removidas.
    pub fn remove_entity_neighbor(&self, left: bool, right: bool, p: f64) -> NeighborRemoval {
        let tokens = self.segmentation.tokens();
        let tags = self.segmentation.tags();

        let mut candidates: Vec<Option<usize>> = Vec::new();
        for span in self.segmentation.entity_spans() {
            if left {
                candidates.push(span.first_position().and_then(|pos| pos.checked_sub(1)));
            }
            if right {
                candidates.push(span.last_position().map(|pos| pos + 1));
            }
        }

        let accepted: Vec<bool> = if left && right {
            vec![true; candidates.len()]
        } else {
            let mut rng = seeded_rng(candidates.len(), p);
            candidates.iter().map(|_| bernoulli(&mut rng, p)).collect()
        };

        let removed: BTreeSet<usize> = candidates
            .iter()
            .zip(accepted)
            .filter_map(|(candidate, keep)| if keep { *candidate } else { None })
            .filter(|&pos| pos < tokens.len() && !is_entity_label(&tags[pos]))
            .collect();
        let removed: Vec<usize> = removed.into_iter().collect();

        let mut columns = drop_positions(&[tokens.to_vec(), tags.to_vec()], &removed).into_iter();
        NeighborRemoval {
            tokens: columns.next().unwrap_or_default(),
            tags: columns.next().unwrap_or_default(),
            removed,
        }
    }

    /// Substitui tokens de entidade por outros observados sob a mesma tag.
    ///
    /// Para cada posição de cada span, Bernoulli(p) semeado pelo tamanho do span;
    /// se aceito, sorteia (com o mesmo gerador) entre os tokens da tag que ainda
    /// não foram usados nesta chamada. Tag ausente no mapa ou candidatos
    /// esgotados: o token original é mantido.
    pub fn label_wise_token_replacement(&self, map: &LabelTokenMap, p: f64) -> Vec<String> {
        let tags = self.segmentation.tags();
        let mut tokens = self.segmentation.tokens().to_vec();
        let mut used: HashSet<String> = HashSet::new();

        for span in self.segmentation.entity_spans() {
            for (original, &pos) in span.tokens.iter().zip(&span.positions) {
                used.insert(original.clone());

                let mut rng = seeded_rng(span.len(), p);
                if !bernoulli(&mut rng, p) {
                    continue;
                }
                let candidates: Vec<&String> = map
                    .tokens_for(&tags[pos])
                    .iter()
                    .filter(|t| !used.contains(t.as_str()))
                    .collect();
                if let Some(&replacement) = candidates.choose(&mut rng) {
                    tokens[pos] = replacement.clone();
                    used.insert(replacement.clone());
                }
            }
        }

        tokens
    }

    /// Embaralha os tokens de cada span de entidade (tamanho > 1) aceito por Bernoulli(p).
    ///
    /// As posições, e portanto as tags, ficam fixas.
    pub fn shuffle_within_entity_segment(&self, p: f64) -> Vec<String> {
        let mut tokens = self.segmentation.tokens().to_vec();
        for span in self.segmentation.entity_spans() {
            shuffle_into(&mut tokens, span.tokens, &span.positions, p);
        }
        tokens
    }

    /// Embaralha os tokens dentro de cada segmento (entidade ou não) de tamanho > 1.
    ///
    /// As tags permanecem posicionais: como cada segmento tem classe uniforme,
    /// todo token continua na sua classe e o `B-` continua abrindo o span.
    pub fn shuffle_within_segments(&self, p: f64) -> Vec<String> {
        let mut tokens = self.segmentation.tokens().to_vec();
        for segment in self.segmentation.segments() {
            shuffle_into(&mut tokens, segment.tokens, &segment.positions, p);
        }
        tokens
    }
}

fn shuffle_into(tokens: &mut [String], mut part: Vec<String>, positions: &[usize], p: f64) {
    if part.len() <= 1 {
        return;
    }
    let mut rng = seeded_rng(part.len(), p);
    if !bernoulli(&mut rng, p) {
        return;
    }
    part.shuffle(&mut rng);
    for (token, &pos) in part.into_iter().zip(positions) {
        tokens[pos] = token;
    }
}

/// Remove as mesmas posições de todas as colunas paralelas de uma amostra.
///
/// Devolve as colunas ajustadas juntas, na ordem de entrada.
pub fn drop_positions(columns: &[Vec<String>], positions: &[usize]) -> Vec<Vec<String>> {
    let drop: HashSet<usize> = positions.iter().copied().collect();
    columns
        .iter()
        .map(|column| {
            column
                .iter()
                .enumerate()
                .filter(|(i, _)| !drop.contains(i))
                .map(|(_, value)| value.clone())
                .collect()
        })
        .collect()
}
