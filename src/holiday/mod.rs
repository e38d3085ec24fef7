pub mod date_math;
pub mod record;
pub mod repository;
pub mod transport;

pub use date_math::LabelStyle;
pub use record::{HolidayCategory, HolidayRecord};
pub use repository::{HolidayRepository, RepositoryError, SiteContext, DEFAULT_LIST_NAME};
pub use transport::{HttpTransport, ReqwestTransport};
