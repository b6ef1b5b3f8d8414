pub(crate) mod common;
pub use common::{ApiError, ErrorDetail, ErrorInfo};

mod http;
pub use self::http::{ClientError as HttpClientError, HttpBuildError, Provider as Http};

mod mock;
pub use mock::{MockError, MockResponse, MockRpc};
