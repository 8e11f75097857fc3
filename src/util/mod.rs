#[cfg(test)]
pub mod counter;
#[cfg(test)]
pub mod hash;
pub mod option;
pub mod panic;
pub mod result;
pub mod trace;
