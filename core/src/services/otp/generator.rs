//! Numeric code generation

use rand::Rng;

use crate::domain::entities::otp_record::{CODE_MAX, CODE_MIN};

/// Produces the code sent to the user
pub trait OtpGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Uniform random codes from an inclusive range
#[derive(Debug, Clone)]
pub struct RandomOtpGenerator {
    min: u32,
    max: u32,
}

impl RandomOtpGenerator {
    /// Codes in `[1000, 9899]`
    pub fn new() -> Self {
        Self {
            min: CODE_MIN,
            max: CODE_MAX,
        }
    }

    /// Codes in `[min, max]`. The bounds are swapped if given in reverse.
    pub fn with_range(min: u32, max: u32) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn range(&self) -> (u32, u32) {
        (self.min, self.max)
    }
}

impl Default for RandomOtpGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl OtpGenerator for RandomOtpGenerator {
    fn generate(&self) -> String {
        let code = rand::thread_rng().gen_range(self.min..=self.max);
        code.to_string()
    }
}
