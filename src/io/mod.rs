//! Reading observations from and writing samples to delimited text files.

#[cfg(feature = "csv")]
pub mod csv;
