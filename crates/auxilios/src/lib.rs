//! Domain rules for the Auxílios BR site: benefit eligibility calculators and
//! the ad-slot pipeline that sanitizes administrator-authored ad markup.

pub mod ads;
pub mod benefits;
pub mod config;
pub mod error;
pub mod telemetry;
