//! # Pipeline de Aumento: Orquestrador com Eventos Observáveis
//!
//! O orquestrador coordena uma execução completa:
//!
//! ```text
//! Idle → Sampling → PerSequenceIteration → Done
//! ```
//!
//! 1. **Amostragem**: sorteia sem reposição (semente da configuração)
//!    `floor(sample_ratio * n)` das `n` sentenças com entidade.
//! 2. **Iteração por sentença**: cada sentença sorteada ganha um aumentador
//!    próprio e passa `n_iteration` rodadas da estratégia escolhida. Resultados
//!    idênticos à sentença original ou a uma rodada anterior são descartados.
//! 3. **Montagem**: cada amostra aceita espelha as colunas da entrada. Quando a
//!    estratégia remove posições, todas as colunas de tags perdem as mesmas
//!    posições da coluna de palavras.
//!
//! O progresso pode ser acompanhado por um canal `mpsc` ([`AugmentationPipeline::run_streaming`]).

use std::collections::HashSet;
use std::sync::mpsc;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::character_augmentation::CharacterAugmenter;
use crate::config::AugmentationConfig;
use crate::corpus::{Corpus, Sentence};
use crate::error::{AugError, Result};
use crate::mapping::LabelTokenMap;
use crate::segment_augmentation::{drop_positions, NeighborRemoval, SegmentAugmenter};
use crate::stats::AugmentationStats;
use crate::strategy::Strategy;

/// Fase da execução.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    Idle,
    Sampling,
    PerSequenceIteration,
    Done,
}

/// Eventos emitidos durante uma execução.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum AugmentationEvent {
    /// Mudança de fase.
    PhaseChanged { phase: RunPhase },
    /// Amostragem concluída.
    Sampled {
        n_sentences: usize,
        n_entity_sentences: usize,
        n_samples: usize,
    },
    /// Uma sentença sorteada foi processada.
    SentenceAugmented {
        /// Índice da sentença no corpus.
        source_index: usize,
        accepted: usize,
        /// Rodadas descartadas por duplicidade.
        rejected: usize,
    },
    /// Execução concluída.
    Done { stats: AugmentationStats },
}

/// Resultado de uma execução.
#[derive(Debug, Clone)]
pub struct AugmentationOutcome {
    /// Amostras aceitas, na ordem de sorteio.
    pub samples: Vec<Sentence>,
    pub stats: AugmentationStats,
}

/// Resultado de uma rodada sobre uma sentença.
struct Perturbation {
    tokens: Vec<String>,
    /// Posições removidas (vazio quando a estratégia preserva o comprimento).
    removed: Vec<usize>,
}

/// Amostras de uma sentença após todas as rodadas.
struct SentenceAugmentation {
    source_index: usize,
    accepted: Vec<Sentence>,
    rejected: usize,
}

/// O orquestrador de aumento sobre um corpus já carregado.
///
/// O mapeamento tag → tokens é construído uma única vez na criação e
/// compartilhado (somente leitura) por todas as sentenças.
pub struct AugmentationPipeline<'c> {
    corpus: &'c Corpus,
    config: AugmentationConfig,
    mapping: LabelTokenMap,
    /// Índices (no corpus) das sentenças com entidade.
    entity_indices: Vec<usize>,
}

impl<'c> AugmentationPipeline<'c> {
    /// Valida a configuração e prepara o mapeamento e o índice de sentenças com entidade.
    pub fn new(corpus: &'c Corpus, config: AugmentationConfig) -> Result<Self> {
        config.validate()?;
        let expected = config.sample_columns();
        if let Some(bad) = corpus.sentences.iter().find(|s| s.n_columns() != expected) {
            return Err(AugError::invalid_config(format!(
                "sentença com {} colunas, esperadas {}",
                bad.n_columns(),
                expected
            )));
        }

        let main = config.main_entity_column;
        let mapping = LabelTokenMap::build(&corpus.sentences, main);
        let entity_indices: Vec<usize> = corpus
            .sentences
            .iter()
            .enumerate()
            .filter(|(_, s)| s.has_entity(main))
            .map(|(i, _)| i)
            .collect();

        debug!(
            labels = mapping.len(),
            entity_sentences = entity_indices.len(),
            "pipeline preparado"
        );

        Ok(Self {
            corpus,
            config,
            mapping,
            entity_indices,
        })
    }

    pub fn config(&self) -> &AugmentationConfig {
        &self.config
    }

    pub fn mapping(&self) -> &LabelTokenMap {
        &self.mapping
    }

    /// Troca estratégia e razão de amostragem, mantendo o mapeamento já construído.
    pub fn reconfigure(&mut self, strategy: Strategy, sample_ratio: f64) -> Result<()> {
        let config = AugmentationConfig {
            strategy,
            sample_ratio,
            ..self.config.clone()
        };
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn n_sentences(&self) -> usize {
        self.corpus.len()
    }

    pub fn n_entity_sentences(&self) -> usize {
        self.entity_indices.len()
    }

    /// `floor(sample_ratio * n_entity_sentences)`.
    pub fn n_samples(&self) -> usize {
        (self.config.sample_ratio * self.entity_indices.len() as f64).floor() as usize
    }

    /// Sorteio sem reposição das sentenças a aumentar (índices no corpus).
    pub fn sample_indices(&self) -> Vec<usize> {
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        self.entity_indices
            .choose_multiple(&mut rng, self.n_samples())
            .copied()
            .collect()
    }

    /// Executa sem acompanhar eventos.
    pub fn run(&self) -> AugmentationOutcome {
        self.execute(None)
    }

    /// Executa enviando [`AugmentationEvent`]s pelo canal `tx`.
    ///
    /// Um receptor descartado não interrompe a execução.
    pub fn run_streaming(&self, tx: &mpsc::Sender<AugmentationEvent>) -> AugmentationOutcome {
        self.execute(Some(tx))
    }

    fn execute(&self, tx: Option<&mpsc::Sender<AugmentationEvent>>) -> AugmentationOutcome {
        let emit = |event: AugmentationEvent| {
            if let Some(tx) = tx {
                let _ = tx.send(event);
            }
        };

        emit(AugmentationEvent::PhaseChanged { phase: RunPhase::Sampling });
        let indices = self.sample_indices();
        emit(AugmentationEvent::Sampled {
            n_sentences: self.n_sentences(),
            n_entity_sentences: self.n_entity_sentences(),
            n_samples: indices.len(),
        });
        info!(
            strategy = %self.config.strategy,
            sample_ratio = self.config.sample_ratio,
            n_samples = indices.len(),
            "iniciando aumento"
        );

        emit(AugmentationEvent::PhaseChanged {
            phase: RunPhase::PerSequenceIteration,
        });
        let per_sentence: Vec<SentenceAugmentation> = if self.config.parallel {
            indices.par_iter().map(|&i| self.augment_indexed(i)).collect()
        } else {
            indices.iter().map(|&i| self.augment_indexed(i)).collect()
        };

        let mut samples = Vec::new();
        for result in per_sentence {
            debug!(
                source = result.source_index,
                accepted = result.accepted.len(),
                rejected = result.rejected,
                "sentença aumentada"
            );
            emit(AugmentationEvent::SentenceAugmented {
                source_index: result.source_index,
                accepted: result.accepted.len(),
                rejected: result.rejected,
            });
            samples.extend(result.accepted);
        }

        let stats = AugmentationStats {
            strategy: self.config.strategy,
            n_sentences: self.n_sentences(),
            n_entity_sentences: self.n_entity_sentences(),
            n_samples: indices.len(),
            n_iteration: self.config.n_iteration,
            n_augmented: samples.len(),
            sample_ratio: self.config.sample_ratio,
        };
        info!(
            strategy = %stats.strategy,
            n_augmented = stats.n_augmented,
            "aumento concluído"
        );
        emit(AugmentationEvent::PhaseChanged { phase: RunPhase::Done });
        emit(AugmentationEvent::Done {
            stats: stats.clone(),
        });

        AugmentationOutcome { samples, stats }
    }

    fn augment_indexed(&self, source_index: usize) -> SentenceAugmentation {
        let (accepted, rejected) = self.augment_counting(&self.corpus.sentences[source_index]);
        SentenceAugmentation {
            source_index,
            accepted,
            rejected,
        }
    }

    /// Aplica a estratégia configurada a uma sentença por `n_iteration` rodadas.
    ///
    /// Devolve apenas as amostras novas (diferentes da original e entre si).
    pub fn augment_sentence(&self, sentence: &Sentence) -> Vec<Sentence> {
        self.augment_counting(sentence).0
    }

    fn augment_counting(&self, sentence: &Sentence) -> (Vec<Sentence>, usize) {
        let mut already_produced: HashSet<Vec<String>> = HashSet::new();
        already_produced.insert(sentence.words().to_vec());

        let mut accepted = Vec::new();
        let mut rejected = 0;
        for _ in 0..self.config.n_iteration {
            let perturbation = self.perturb(sentence);
            if !already_produced.insert(perturbation.tokens.clone()) {
                rejected += 1;
                continue;
            }
            accepted.push(assemble(sentence, perturbation));
        }
        (accepted, rejected)
    }

    /// Uma rodada da estratégia sobre a coluna de palavras e a coluna principal.
    fn perturb(&self, sentence: &Sentence) -> Perturbation {
        let words = sentence.words();
        let tags = sentence
            .column(self.config.main_entity_column)
            .unwrap_or(&[]);
        let p = self.config.p_augmentation;
        let segment = SegmentAugmenter::new(words, tags);
        let character = CharacterAugmenter::new(words, tags);

        let removal = |r: NeighborRemoval| Perturbation {
            tokens: r.tokens,
            removed: r.removed,
        };
        let replaced = |tokens: Vec<String>| Perturbation {
            tokens,
            removed: Vec::new(),
        };

        match self.config.strategy {
            Strategy::SwapFirstLast => replaced(segment.swap_first_last(p)),
            Strategy::RemoveLeftNeighbor => removal(segment.remove_entity_neighbor(true, false, p)),
            Strategy::RemoveRightNeighbor => removal(segment.remove_entity_neighbor(false, true, p)),
            Strategy::RemoveSurroundingNeighbors => {
                removal(segment.remove_entity_neighbor(true, true, p))
            }
            Strategy::LabelWiseReplacement => {
                replaced(segment.label_wise_token_replacement(&self.mapping, p))
            }
            Strategy::ShuffleInEntity => replaced(segment.shuffle_within_entity_segment(p)),
            Strategy::ShuffleInSegments => replaced(segment.shuffle_within_segments(p)),
            Strategy::ReverseLetterCase => replaced(character.reverse_letter_case(p)),
            Strategy::DeleteCharacter => replaced(character.delete_character(p)),
            Strategy::ShuffleCharactersInToken => {
                replaced(character.shuffle_characters_in_token(p))
            }
        }
    }
}

/// Monta a amostra final espelhando as colunas da sentença de origem.
fn assemble(sentence: &Sentence, perturbation: Perturbation) -> Sentence {
    let mut columns = if perturbation.removed.is_empty() {
        sentence.columns().to_vec()
    } else {
        drop_positions(sentence.columns(), &perturbation.removed)
    };
    if let Some(words) = columns.first_mut() {
        *words = perturbation.tokens;
    }
    Sentence::new(columns)
}
