use thiserror::Error;

/// Failure to load the currency registry. Fatal to the engine: no pattern
/// is built and no scan is attempted until a load succeeds.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("malformed symbol table: {0}")]
    MalformedSymbols(String),

    #[error("malformed fee table: {0}")]
    MalformedFees(String),

    #[error("symbol table is empty")]
    EmptySymbolTable,

    #[error("invalid registry entry: {0}")]
    InvalidEntry(String),
}
