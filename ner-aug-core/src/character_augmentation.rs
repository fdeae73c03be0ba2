//! # Aumento por Caractere
//!
//! Perturbações dentro de tokens, sobre o fluxo achatado de tokens de uma
//! sentença (as fronteiras de segmento não importam aqui). Os "caracteres" são
//! grafemas Unicode, para que acentos combinados ("é" = `e` + `\u{301}`) nunca
//! sejam partidos.
//!
//! Nenhuma estratégia muda a quantidade de tokens, então as tags continuam
//! alinhadas sem ajuste.

use rand::seq::SliceRandom;
use unicode_segmentation::UnicodeSegmentation;

use crate::random::{bernoulli, position_for, seeded_rng};
use crate::segmentation::SequenceSegmentation;

/// Aumentador de caracteres para uma sentença.
#[derive(Debug, Clone, Copy)]
pub struct CharacterAugmenter<'a> {
    segmentation: SequenceSegmentation<'a>,
}

impl<'a> CharacterAugmenter<'a> {
    pub fn new(tokens: &'a [String], tags: &'a [String]) -> Self {
        Self {
            segmentation: SequenceSegmentation::new(tokens, tags),
        }
    }

    /// Inverte a caixa do grafema em `floor(p * (len - 1))` de cada token
    /// aceito por Bernoulli(p) com mais de 2 grafemas.
    pub fn reverse_letter_case(&self, p: f64) -> Vec<String> {
        self.map_tokens(p, 3, |graphemes, _rng| {
            let idx = position_for(graphemes.len(), p);
            let flipped = flip_case(graphemes[idx]);
            let mut out: Vec<&str> = graphemes.to_vec();
            out[idx] = &flipped;
            out.concat()
        })
    }

    /// Apaga o grafema em `floor(p * (len - 1))` de cada token aceito com mais de 1 grafema.
    pub fn delete_character(&self, p: f64) -> Vec<String> {
        self.map_tokens(p, 2, |graphemes, _rng| {
            let idx = position_for(graphemes.len(), p);
            graphemes
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != idx)
                .map(|(_, g)| *g)
                .collect()
        })
    }

    /// Embaralha todos os grafemas de cada token aceito com mais de 2 grafemas.
    pub fn shuffle_characters_in_token(&self, p: f64) -> Vec<String> {
        self.map_tokens(p, 3, |graphemes, rng| {
            let mut shuffled: Vec<&str> = graphemes.to_vec();
            shuffled.shuffle(rng);
            shuffled.concat()
        })
    }

    /// Aplica `edit` aos tokens com ao menos `min_len` grafemas que passam em Bernoulli(p).
    ///
    /// O gerador de cada token é semeado pelo seu número de grafemas.
    fn map_tokens<F>(&self, p: f64, min_len: usize, edit: F) -> Vec<String>
    where
        F: Fn(&[&str], &mut rand::rngs::StdRng) -> String,
    {
        self.segmentation
            .tokens_from_segments()
            .into_iter()
            .map(|token| {
                let edited = {
                    let graphemes: Vec<&str> = token.graphemes(true).collect();
                    let mut rng = seeded_rng(graphemes.len(), p);
                    if bernoulli(&mut rng, p) && graphemes.len() >= min_len {
                        Some(edit(&graphemes, &mut rng))
                    } else {
                        None
                    }
                };
                edited.unwrap_or(token)
            })
            .collect()
    }
}

/// Minúscula → maiúscula, qualquer outra coisa → minúscula.
fn flip_case(grapheme: &str) -> String {
    if grapheme.chars().any(char::is_lowercase) {
        grapheme.to_uppercase()
    } else {
        grapheme.to_lowercase()
    }
}
