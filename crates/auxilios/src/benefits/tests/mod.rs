mod common;
mod gas_subsidy;
