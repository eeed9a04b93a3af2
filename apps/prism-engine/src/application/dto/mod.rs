//! Data Transfer Objects (DTOs)
//!
//! DTOs are used for API boundaries and use case inputs/outputs.

mod exposure_dto;
mod probability_dto;
mod risk_dto;

pub use exposure_dto::{
    CalculationRequestDto, CalculationResponseDto, ClientDataDto, UploadSummaryDto,
};
pub use probability_dto::{RiskUpdateDto, UpdateRunSummaryDto};
pub use risk_dto::{
    DataSourceDto, DataSourcesDto, DomainsDto, HealthDto, LiveRiskDto, RecentSignalsDto,
    RiskHistoryDto, RiskListDto, SourceSignalsDto,
};
