//! Age command implementation

use crate::core::convert::calculate_age_at_enrollment;
use clap::Args;

/// Arguments for the age command
#[derive(Args, Debug)]
pub struct AgeArgs {
    /// Date of birth, YYYY-MM-DD
    #[arg(long)]
    pub dob: String,

    /// Enrollment date, YYYY-MM-DD
    #[arg(short, long)]
    pub enrollment: String,
}

impl AgeArgs {
    /// Execute the age command
    pub fn execute(&self) -> anyhow::Result<i32> {
        match calculate_age_at_enrollment(self.dob.as_str(), self.enrollment.as_str()) {
            Some(age) => {
                println!("✅ Age at enrollment: {age}");
                Ok(0)
            }
            None => {
                println!("❌ Could not calculate age at enrollment");
                println!("   Both dates must be valid and the date of birth must not follow enrollment");
                Ok(1)
            }
        }
    }
}
