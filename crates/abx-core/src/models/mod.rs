pub mod analysis;
pub mod antibiotic;
pub mod breakpoint;
pub mod choices;
pub mod interim;
pub mod microorganism;
pub mod result_option;
