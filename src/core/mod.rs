pub mod analytics;
pub mod etl;
pub mod pipeline;
pub mod query;

pub use crate::domain::model::{
    GroupField, ProvinceFilter, QueryLimits, TransformResult, University, UniversityFilter,
};
pub use crate::domain::ports::{DatasetSource, Pipeline, Storage, UniversityStore};
pub use crate::utils::error::Result;
