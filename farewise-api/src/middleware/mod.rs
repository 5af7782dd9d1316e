pub mod session;

pub use session::{session_context_middleware, CURRENCY_HEADER, ROLE_HEADER};
