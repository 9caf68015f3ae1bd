pub mod directors;
pub mod email;
pub mod export;
pub mod flatten;
pub mod pages;
pub mod search;

pub use crate::domain::model::{CompanyPage, CompanyResult, DirectorInfo, Record, SearchResponse};
pub use crate::domain::ports::{DirectorSource, EmailDrafter, PageSource, Storage};
pub use crate::utils::error::Result;
