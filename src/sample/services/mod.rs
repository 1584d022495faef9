//! Application services for sample lifecycle orchestration.

mod lifecycle;

pub use lifecycle::{
    DeleteSampleRequest, LifecycleSettings, LoadPolicy, RegisterSampleRequest,
    ReturnSampleRequest, SampleLifecycleError, SampleLifecycleResult, SampleLifecycleService,
    SendSampleRequest,
};
