mod status_dto;

pub use status_dto::{DatabaseHealthDto, HealthDto, MetricsDto, ServiceInfoDto};
