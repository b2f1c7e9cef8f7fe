pub mod diagnostics;
pub mod group;

pub use crate::domain::model::{
    AggregatedGroupDetails, DocumentConfig, GroupDetails, GroupMetadata, GroupSelection,
};
pub use crate::domain::ports::{ConfigProvider, Fetcher};
pub use crate::utils::error::Result;
