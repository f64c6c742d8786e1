//! A directory of GTO files.
use super::genome::Genome;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

const GTO_EXTENSION: &str = "gto";

/// The GTO files of a directory, sorted by file name.
/// Genomes are parsed only when they are requested.
#[derive(Debug, Clone)]
pub struct GenomeDirectory {
    path: PathBuf,
    files: Vec<PathBuf>,
}

impl GenomeDirectory {
    pub fn new<P: AsRef<Path>>(dir: P) -> std::io::Result<Self> {
        let path = dir.as_ref().to_path_buf();
        if !path.is_dir() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} is not a valid directory.", path.display()),
            ));
        }
        let mut files: Vec<PathBuf> = std::fs::read_dir(&path)?
            .map(|e| e.map(|entry| entry.path()))
            .collect::<std::io::Result<Vec<_>>>()?
            .into_iter()
            .filter(|file| file.is_file())
            .filter(|file| match file.extension() {
                Some(ext) => ext == GTO_EXTENSION,
                None => false,
            })
            .collect();
        files.sort();
        debug!("{} genomes in {}.", files.len(), path.display());
        Ok(Self { path, files })
    }
    pub fn path(&self) -> &Path {
        &self.path
    }
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }
    pub fn len(&self) -> usize {
        self.files.len()
    }
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
    pub fn iter(&self) -> Genomes<'_> {
        Genomes {
            inner: self.files.iter(),
        }
    }
    /// Parse every genome in parallel. The result is in file-name order.
    /// Fails on the first file which cannot be read.
    pub fn load_all(&self) -> std::io::Result<Vec<Genome>> {
        self.files.par_iter().map(Genome::from_file).collect()
    }
    /// Parse the genomes `size` files at a time, each batch in parallel,
    /// so only one batch is held in memory.
    pub fn load_chunks(
        &self,
        size: usize,
    ) -> impl Iterator<Item = std::io::Result<Vec<Genome>>> + '_ {
        self.files
            .chunks(size.max(1))
            .map(|files| {
                files
                    .par_iter()
                    .map(Genome::from_file)
                    .collect::<std::io::Result<Vec<_>>>()
            })
    }
}

/// Iterator over the genomes of a directory.
pub struct Genomes<'a> {
    inner: std::slice::Iter<'a, PathBuf>,
}

impl<'a> Iterator for Genomes<'a> {
    type Item = std::io::Result<Genome>;
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|file| {
            debug!("Parsing {}.", file.display());
            Genome::from_file(file)
        })
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> IntoIterator for &'a GenomeDirectory {
    type Item = std::io::Result<Genome>;
    type IntoIter = Genomes<'a>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
