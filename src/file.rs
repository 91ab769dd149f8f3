use std::{fs, path::Path};

use crate::{
    decoder::{Decoder, Utf8},
    store::{IndexedLineStore, StoreOptions},
    Result,
};

/// An `IndexedLineStore` reading from a `std::fs::File`
pub type File<D = Utf8> = IndexedLineStore<fs::File, D>;

impl IndexedLineStore<fs::File> {
    /// Opens the file at `path`. Nothing gets read until lines are requested.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<File> {
        Ok(Self::new(fs::File::open(path)?))
    }
}

impl<D: Decoder> IndexedLineStore<fs::File, D> {
    /// Opens the file at `path` using a custom decoder and options.
    pub fn open_with<P: AsRef<Path>>(path: P, decoder: D, options: StoreOptions) -> Result<File<D>> {
        Ok(Self::with_options(fs::File::open(path)?, decoder, options))
    }
}
