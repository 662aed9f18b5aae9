pub mod check;
pub mod execute;
pub mod fetch;
pub mod process;
pub mod respond;
