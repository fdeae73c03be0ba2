//! # Junção Corpus Original + Aumentado
//!
//! Para cada arquivo aumentado de uma pasta (exceto o arquivo de
//! estatísticas), grava `aug-org-data/<arquivo>` com o corpus original seguido
//! do conteúdo aumentado. Subpastas são ignoradas.
//!
//! Se o original não terminar com uma linha vazia, uma é inserida entre os
//! dois, para que a última sentença original não se funda com a primeira
//! aumentada.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{AugError, Result};
use crate::output::STATS_FILE_NAME;

/// Nome da subpasta criada dentro da pasta de aumentos.
pub const JOINED_DIR_NAME: &str = "aug-org-data";

/// Junta `original` a cada arquivo aumentado em `aug_dir`.
///
/// Devolve os caminhos gravados, em ordem alfabética do nome do arquivo.
pub fn join_augmented(original: impl AsRef<Path>, aug_dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let original = original.as_ref();
    let aug_dir = aug_dir.as_ref();

    let mut head = fs::read_to_string(original).map_err(|e| AugError::io(original, e))?;
    if !head.is_empty() {
        if !head.ends_with('\n') {
            head.push('\n');
        }
        if !head.ends_with("\n\n") {
            head.push('\n');
        }
    }

    let mut augmented: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(aug_dir).map_err(|e| AugError::io(aug_dir, e))? {
        let path = entry.map_err(|e| AugError::io(aug_dir, e))?.path();
        if !path.is_file() {
            continue;
        }
        if path.file_name().is_some_and(|name| name == STATS_FILE_NAME) {
            debug!(path = %path.display(), "arquivo de estatísticas ignorado");
            continue;
        }
        augmented.push(path);
    }
    augmented.sort();

    let out_dir = aug_dir.join(JOINED_DIR_NAME);
    fs::create_dir_all(&out_dir).map_err(|e| AugError::io(&out_dir, e))?;

    let mut written = Vec::with_capacity(augmented.len());
    for path in augmented {
        let Some(name) = path.file_name() else {
            continue;
        };
        let body = fs::read_to_string(&path).map_err(|e| AugError::io(&path, e))?;
        let target = out_dir.join(name);
        fs::write(&target, format!("{head}{body}")).map_err(|e| AugError::io(&target, e))?;
        debug!(target = %target.display(), "arquivo juntado");
        written.push(target);
    }

    info!(
        n_files = written.len(),
        out_dir = %out_dir.display(),
        "junção concluída"
    );
    Ok(written)
}
