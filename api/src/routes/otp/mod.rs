//! OTP route handlers
//!
//! - `POST /generate`: issue and mail a code
//! - `POST /verify`: check a submitted code

pub mod generate;
pub mod verify;

pub use generate::generate;
pub use verify::verify;
