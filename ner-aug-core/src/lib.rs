//! # ner-aug-core: Aumento de Dados para Corpora NER no Formato BIO
//!
//! Este crate gera novas sentenças anotadas a partir de um corpus em colunas
//! (uma palavra por linha, tags BIO nas colunas seguintes), aplicando
//! perturbações que preservam o alinhamento entre tokens e tags.
//!
//! ## Arquitetura
//!
//! O fluxo de dados é linear, como um pipeline:
//!
//! 1.  **Leitura** ([`corpus`]): o arquivo é lido em [`Sentence`]s, cada uma com a coluna
//!     de palavras e uma ou mais colunas de tags.
//! 2.  **Segmentação** ([`segmentation`]): a sequência de tags é dividida em
//!     segmentos de entidade e segmentos `O`.
//! 3.  **Aumento**:
//!     *   **Por segmento** ([`segment_augmentation`]): troca, remoção de vizinhos,
//!         substituição por rótulo e embaralhamento.
//!     *   **Por caractere** ([`character_augmentation`]): caixa, remoção e
//!         embaralhamento de grafemas dentro de tokens.
//! 4.  **Orquestração** ([`pipeline`]): sorteio das sentenças com entidade,
//!     iterações, deduplicação e estatísticas.
//! 5.  **Saída** ([`output`], [`joiner`]): TSV, JSON lines, arquivo de estatísticas
//!     e junção com o corpus original.
//!
//! Toda decisão aleatória usa um gerador semeado explicitamente ([`random`]):
//! a mesma entrada com os mesmos parâmetros produz sempre a mesma saída.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use ner_aug_core::{AugmentationConfig, AugmentationPipeline, ColumnLayout, CorpusReader, Strategy};
//!
//! let text = "O\tO\nmédico\tO\nDrauzio\tB-PER\nVarella\tI-PER\nchegou\tO\n\n";
//!
//! // 1. Lê o corpus (palavras na coluna 0, tags na coluna 1)
//! let reader = CorpusReader::with_default_comments(ColumnLayout::default()).unwrap();
//! let corpus = reader.read_str(text).unwrap();
//!
//! // 2. Configura a execução
//! let config = AugmentationConfig {
//!     strategy: Strategy::RemoveSurroundingNeighbors,
//!     sample_ratio: 1.0,
//!     ..Default::default()
//! };
//!
//! // 3. Executa
//! let pipeline = AugmentationPipeline::new(&corpus, config).unwrap();
//! let outcome = pipeline.run();
//!
//! assert_eq!(outcome.stats.n_entity_sentences, 1);
//! for sample in &outcome.samples {
//!     assert_eq!(sample.words().len(), sample.column(1).unwrap().len());
//! }
//! ```
//!
//! ## Módulos Principais
//!
//! - [`pipeline`]: orquestrador que conecta todos os estágios.
//! - [`strategy`]: catálogo de estratégias e suas famílias.
//! - [`config`]: parâmetros de uma execução.
//! - [`error`]: tipos de erro do crate.

pub mod character_augmentation;
pub mod config;
pub mod corpus;
pub mod error;
pub mod joiner;
pub mod mapping;
pub mod output;
pub mod pipeline;
pub mod random;
pub mod segment_augmentation;
pub mod segmentation;
pub mod stats;
pub mod strategy;
pub mod tagger;

pub use character_augmentation::CharacterAugmenter;
pub use config::AugmentationConfig;
pub use corpus::{ColumnLayout, Corpus, CorpusReader, Sentence};
pub use error::{AugError, Result};
pub use mapping::LabelTokenMap;
pub use pipeline::{AugmentationEvent, AugmentationOutcome, AugmentationPipeline, RunPhase};
pub use segment_augmentation::{NeighborRemoval, SegmentAugmenter};
pub use segmentation::{Segment, SegmentKind, SequenceSegmentation};
pub use stats::AugmentationStats;
pub use strategy::{Family, Strategy};
pub use tagger::Tag;
