//! Domain model for sample lifecycle tracking.
//!
//! The domain holds the record schema, the two-state status machine, and the
//! table-level transitions. Storage and presentation stay outside of it.

mod column;
mod error;
mod recorded_at;
mod record;
mod serial;
mod status;
mod table;

pub use column::SampleColumn;
pub use error::{
    ParseRecordedAtError, ParseSampleColumnError, ParseSampleStatusError, RejectionKind,
    SampleDomainError,
};
pub use record::{
    DispatchDetails, PersistedSampleData, ResendPolicy, ReturnDetails, SampleDetails,
    SampleRecord,
};
pub use recorded_at::{RECORDED_AT_FORMAT, RecordedAt};
pub use serial::SerialNumber;
pub use status::SampleStatus;
pub use table::SampleTable;
