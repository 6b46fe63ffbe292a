mod dynamic;
pub use dynamic::DynamicValue;

mod hashmap;
mod mpsc;
