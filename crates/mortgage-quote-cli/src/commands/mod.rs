pub mod gate;
pub mod payment;
pub mod quote;
pub mod resolve;
