pub mod lazy_zip;
pub mod summary;
pub mod tsv;
