//! Company-level tools.

pub mod compare;
pub mod profile;
pub mod search;
pub mod sector;

pub use compare::{CompareCompaniesParams, CompareCompaniesTool};
pub use profile::{CompanyProfileParams, CompanyProfileTool};
pub use search::{SearchCompaniesParams, SearchCompaniesTool};
pub use sector::{SectorOverviewParams, SectorOverviewTool};
